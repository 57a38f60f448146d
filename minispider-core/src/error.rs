use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("load {path} failed: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("{section} check failed: {reason}")]
    Check {
        section: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn check(section: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Check {
            section,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("read seed file {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file is not a JSON list of URLs: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("invalid target_url pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
