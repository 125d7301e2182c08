//! Configuration management for the OCR server

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ocr::SegmentationMode;
use crate::pdf::DEFAULT_DPI;
use crate::pipeline::PipelineConfig;
use crate::upload::MAX_FILE_SIZE;
use crate::vision::DetectionConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
    pub pdf: PdfConfig,
    pub detection: DetectionConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub language: String,
    pub text_mode: SegmentationMode,
}

#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub dpi: u32,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Directory holding `index.html` and `static/`
    pub root: PathBuf,
}

impl WebConfig {
    pub fn index_path(&self) -> PathBuf {
        self.root.join("index.html")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            upload: UploadConfig {
                max_file_size: MAX_FILE_SIZE,
            },
            ocr: OcrConfig {
                tesseract_cmd: "tesseract".to_string(),
                language: "eng".to_string(),
                text_mode: SegmentationMode::Block,
            },
            pdf: PdfConfig { dpi: DEFAULT_DPI },
            detection: DetectionConfig::default(),
            web: WebConfig {
                root: PathBuf::from("."),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any variable source, defaulting unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let string = |name: &str, default: String| lookup(name).unwrap_or(default);

        Ok(Config {
            server: ServerConfig {
                host: string("SERVER_HOST", defaults.server.host),
                port: parse(&lookup, "SERVER_PORT", defaults.server.port)?,
            },
            upload: UploadConfig {
                max_file_size: parse(&lookup, "MAX_FILE_SIZE", defaults.upload.max_file_size)?,
            },
            ocr: OcrConfig {
                tesseract_cmd: string("TESSERACT_CMD", defaults.ocr.tesseract_cmd),
                language: string("OCR_LANGUAGE", defaults.ocr.language),
                text_mode: parse(&lookup, "OCR_TEXT_MODE", defaults.ocr.text_mode)?,
            },
            pdf: PdfConfig {
                dpi: parse(&lookup, "PDF_DPI", defaults.pdf.dpi)?,
            },
            detection: DetectionConfig {
                line_length: parse(&lookup, "TABLE_LINE_LENGTH", defaults.detection.line_length)?,
                open_iterations: parse(
                    &lookup,
                    "TABLE_OPEN_ITERATIONS",
                    defaults.detection.open_iterations,
                )?,
                min_width: parse(&lookup, "TABLE_MIN_WIDTH", defaults.detection.min_width)?,
                min_height: parse(&lookup, "TABLE_MIN_HEIGHT", defaults.detection.min_height)?,
            },
            web: WebConfig {
                root: lookup("WEB_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.web.root),
            },
        })
    }

    /// Settings handed to the extraction pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            language: self.ocr.language.clone(),
            text_mode: self.ocr.text_mode,
            detection: self.detection,
        }
    }

    /// Request body ceiling: the file limit plus room for multipart framing
    pub fn body_limit(&self) -> usize {
        self.upload.max_file_size.saturating_add(1024 * 1024)
    }
}

fn parse<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
