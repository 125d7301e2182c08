//! Front page

use axum::{extract::State, response::Html};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve `index.html` from the web root
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let path = state.config().web.index_path();

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "index.html unavailable");
            Err(AppError::NotFound("index.html not found".to_string()))
        }
    }
}
