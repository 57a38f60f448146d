use crate::config::OutputerConf;
use crate::error::OutputError;
use async_trait::async_trait;
use minispider_engine::error::{Result as ScanResult, ScanError};
use minispider_engine::OutputSink;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Longest file name Linux and macOS accept, in bytes.
const FILE_NAME_MAX_LENGTH: usize = 255;
const MD5_HEX_LENGTH: usize = 32;

/// Saves fetched pages as files named after their escaped URL.
#[derive(Debug, Clone)]
pub struct FileOutputer {
    output_directory: PathBuf,
    pattern: Regex,
}

impl FileOutputer {
    pub fn new(cfg: &OutputerConf) -> Result<Self, OutputError> {
        let pattern = Regex::new(&cfg.target_url)?;
        Ok(Self {
            output_directory: cfg.output_path(),
            pattern,
        })
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Path a page named `name` would be written to.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.output_directory.join(hash_long_file_name(name))
    }
}

#[async_trait]
impl OutputSink for FileOutputer {
    async fn write(&self, name: &str, body: &[u8]) -> ScanResult<()> {
        if !self.pattern.is_match(name) {
            info!("{} does not match target_url, not saved", name);
            return Ok(());
        }

        create_output_directory(&self.output_directory).await?;

        let path = self.file_path(name);
        tokio::fs::write(&path, body).await.map_err(|e| {
            ScanError::Output(format!("write to file {} failed: {}", path.display(), e))
        })?;

        debug!("Saved {} to {}", name, path.display());
        Ok(())
    }
}

/// Creates the output directory (and parents) if missing.
pub async fn create_output_directory(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// Names longer than the file-system limit keep their head and replace the
/// tail with its md5 digest.
pub fn hash_long_file_name(name: &str) -> String {
    if name.len() <= FILE_NAME_MAX_LENGTH {
        return name.to_string();
    }

    let mut split = FILE_NAME_MAX_LENGTH - MD5_HEX_LENGTH;
    while !name.is_char_boundary(split) {
        split -= 1;
    }
    let (head, tail) = name.split_at(split);
    format!("{}{:x}", head, md5::compute(tail.as_bytes()))
}
