use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("url: {url}, status code: {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("max_depth should >= 0, but got: {0}")]
    InvalidDepth(i32),

    #[error("thread_count should > 0")]
    NoWorkers,

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
