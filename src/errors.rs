use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parsing error: {0}")]
    DateError(#[from] chrono::ParseError),

    /// 非 2xx 响应，body 为尽力读取的响应内容
    #[error("{status} {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: Option<String>,
    },

    #[error("Logger error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    #[error("Invalid day window: {0}")]
    WindowError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl From<String> for ExportError {
    fn from(s: String) -> Self {
        ExportError::ConfigError(s)
    }
}

impl From<&str> for ExportError {
    fn from(s: &str) -> Self {
        ExportError::ConfigError(s.to_string())
    }
}
