use crate::error::SeedError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Loads seed URLs from a JSON list such as
///
/// ```json
/// ["http://www.baidu.com", "http://www.sina.com.cn"]
/// ```
///
/// Duplicates are dropped, keeping the order of first appearance. Entries are
/// not validated here; the crawler rejects unparsable ones.
pub fn load(path: &Path) -> Result<Vec<String>, SeedError> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<String> = serde_json::from_str(&content)?;
    let total = raw.len();

    let mut seen = HashSet::with_capacity(total);
    let seeds: Vec<String> = raw
        .into_iter()
        .map(|seed| seed.trim().to_string())
        .filter(|seed| seen.insert(seed.clone()))
        .collect();

    if seeds.len() < total {
        debug!("Dropped {} duplicate seeds", total - seeds.len());
    }
    info!("Loaded {} seeds from {}", seeds.len(), path.display());
    Ok(seeds)
}
