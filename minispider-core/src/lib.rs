pub mod config;
pub mod crawl;
pub mod error;
pub mod outputer;
pub mod seed;

pub use config::Config;
pub use crawl::{CrawlOptions, execute_crawl, generate_crawl_report};
pub use error::{ConfigError, OutputError, SeedError};
pub use outputer::FileOutputer;
