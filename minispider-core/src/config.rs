//! Spider configuration.
//!
//! The file is INI style with one section per component:
//!
//! ```ini
//! [basic]
//! url_list_file = ../data/url.data
//!
//! [crawler]
//! max_depth = 1
//! crawl_interval = 1
//! thread_count = 8
//!
//! [fetcher]
//! crawl_timeout = 1
//!
//! [outputer]
//! output_directory = ../output
//! target_url = .*.(htm|html)$
//! ```
//!
//! Backslashes in values are escape characters, so a literal `\` in
//! `target_url` must be written `\\`.

use crate::error::ConfigError;
use config::{Config as SettingsLoader, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File name looked up inside the configuration directory.
pub const CONF_FILE_NAME: &str = "spider.conf";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub basic: BasicConf,
    pub crawler: CrawlerConf,
    pub fetcher: FetcherConf,
    pub outputer: OutputerConf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasicConf {
    /// JSON file holding the seed URLs
    pub url_list_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlerConf {
    /// Link hops followed from a seed, seeds themselves are depth zero
    pub max_depth: i32,
    /// Seconds between two fetches to the same host
    pub crawl_interval: i64,
    pub thread_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetcherConf {
    /// Per-request timeout, in seconds
    pub crawl_timeout: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputerConf {
    pub output_directory: String,
    /// Only pages whose escaped URL matches this pattern are saved
    pub target_url: String,
}

impl BasicConf {
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.url_list_file.is_empty() {
            return Err(ConfigError::check("basic", "empty url_list_file"));
        }
        Ok(())
    }

    pub fn url_list_path(&self) -> PathBuf {
        expand(&self.url_list_file)
    }
}

impl CrawlerConf {
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_depth < 0 {
            return Err(ConfigError::check("crawler", "max_depth should >= 0"));
        }
        if self.crawl_interval <= 0 {
            return Err(ConfigError::check("crawler", "crawl_interval should > 0"));
        }
        if self.thread_count <= 0 {
            return Err(ConfigError::check("crawler", "thread_count should > 0"));
        }
        Ok(())
    }

    pub fn crawl_interval(&self) -> Duration {
        Duration::from_secs(self.crawl_interval.max(0) as u64)
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count.max(0) as usize
    }
}

impl FetcherConf {
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.crawl_timeout <= 0 {
            return Err(ConfigError::check("fetcher", "crawl_timeout should > 0"));
        }
        Ok(())
    }

    pub fn crawl_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl_timeout.max(0) as u64)
    }
}

impl OutputerConf {
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.output_directory.is_empty() {
            return Err(ConfigError::check("outputer", "empty output_directory"));
        }
        if self.target_url.is_empty() {
            return Err(ConfigError::check("outputer", "empty target_url"));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        expand(&self.output_directory)
    }
}

impl Config {
    /// Loads the file at `path` and checks every section.
    pub fn load_and_check(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.check()?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    fn load(path: &Path) -> Result<Self, ConfigError> {
        let load_error = |source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };

        SettingsLoader::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()
            .map_err(load_error)?
            .try_deserialize::<Config>()
            .map_err(load_error)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        self.basic.check()?;
        self.crawler.check()?;
        self.fetcher.check()?;
        self.outputer.check()?;
        Ok(())
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
