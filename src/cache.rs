//! Local cache for fetched author data.
//!
//! Avoids re-fetching from the scholarly backend between runs: a cache hit
//! replaces the network round trip entirely, a miss or unreadable file falls
//! through to a fresh fetch.

use crate::error::Result;
use crate::semanticscholar::AuthorData;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Default cache file path: `~/.scholardash_cache.json`
fn default_cache_path() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".scholardash_cache.json"))
        .unwrap_or_else(|| PathBuf::from(".scholardash_cache.json"))
}

/// Cache manager for loading and saving author data
pub struct CacheManager {
    path: PathBuf,
}

impl CacheManager {
    /// Create a new CacheManager with default path
    pub fn new() -> Self {
        Self {
            path: default_cache_path(),
        }
    }

    /// Create a new CacheManager with custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the cache file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load cached author data.
    ///
    /// Returns None if the file doesn't exist or can't be parsed; a stale or
    /// corrupt cache never aborts a run.
    pub fn load(&self) -> Option<Vec<AuthorData>> {
        if !self.path.exists() {
            debug!("Cache file not found: {:?}", self.path);
            return None;
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Vec<AuthorData>>(&content) {
                Ok(data) => {
                    info!("Loaded {} cached authors from {:?}", data.len(), self.path);
                    Some(data)
                }
                Err(e) => {
                    warn!("Failed to parse cache: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read cache file: {}", e);
                None
            }
        }
    }

    /// Save author data to the cache file
    pub fn save(&self, data: &[AuthorData]) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        info!("Saved {} authors to {:?}", data.len(), self.path);
        Ok(())
    }

    /// Clear the cache file
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            info!("Cleared cache at {:?}", self.path);
        }
        Ok(())
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semanticscholar::Publication;
    use tempfile::NamedTempFile;

    fn sample_author() -> AuthorData {
        AuthorData {
            query: "jane doe".to_string(),
            name: "Jane Doe".to_string(),
            affiliation: "Example University".to_string(),
            citedby: 1234,
            hindex: 21,
            i10index: 30,
            cites_per_year: vec![(2019, 3), (2021, 12)],
            pubs: vec![Publication {
                title: "Deep audio models".to_string(),
                year: Some(2020),
                citedby: 42,
                link: "https://example.org/p1".to_string(),
            }],
        }
    }

    #[test]
    fn test_load_missing() {
        let manager = CacheManager::with_path(PathBuf::from("/nonexistent/path"));
        assert!(manager.load().is_none());
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp = NamedTempFile::new()?;
        let manager = CacheManager::with_path(temp.path().to_path_buf());

        manager.save(&[sample_author()])?;
        let loaded = manager.load().expect("cache present");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Jane Doe");
        assert_eq!(loaded[0].pubs[0].year, Some(2020));
        assert_eq!(loaded[0].cites_per_year, vec![(2019, 3), (2021, 12)]);
        Ok(())
    }

    #[test]
    fn test_load_corrupt_returns_none() -> Result<()> {
        let temp = NamedTempFile::new()?;
        std::fs::write(temp.path(), "not json")?;
        let manager = CacheManager::with_path(temp.path().to_path_buf());
        assert!(manager.load().is_none());
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let temp = NamedTempFile::new()?;
        let manager = CacheManager::with_path(temp.path().to_path_buf());
        manager.save(&[sample_author()])?;
        manager.clear()?;
        assert!(manager.load().is_none());
        Ok(())
    }
}
