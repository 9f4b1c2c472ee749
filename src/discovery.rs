//! Snapshot providers: where the service catalog comes from.
//!
//! Discovery itself (registry queries, wire formats) lives outside this
//! crate. The optimizer only sees the `SnapshotProvider` seam, which either
//! yields a catalog or a typed error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::schema::ServiceCatalog;

/// A fallible source of service catalogs.
pub trait SnapshotProvider {
    fn snapshot(&self) -> Result<ServiceCatalog, DiscoveryError>;
}

/// Errors raised while obtaining a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed JSON, or a catalog with duplicate services.
    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A catalog fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticSnapshot {
    catalog: ServiceCatalog,
}

impl StaticSnapshot {
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self { catalog }
    }
}

impl SnapshotProvider for StaticSnapshot {
    fn snapshot(&self) -> Result<ServiceCatalog, DiscoveryError> {
        Ok(self.catalog.clone())
    }
}

/// Reads a catalog from a JSON file on every call.
///
/// The file holds an array of `{"service": ..., "candidates": [...]}`
/// objects; array order becomes gene order.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotProvider for JsonFileSnapshot {
    fn snapshot(&self) -> Result<ServiceCatalog, DiscoveryError> {
        let text = fs::read_to_string(&self.path).map_err(|source| DiscoveryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let catalog: ServiceCatalog = serde_json::from_str(&text)?;
        debug!(
            "loaded {} services from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_snapshot() {
        let catalog = ServiceCatalog::from_pairs([("a", vec!["n1"])]).unwrap();
        let provider = StaticSnapshot::new(catalog.clone());
        assert_eq!(provider.snapshot().unwrap(), catalog);
    }

    #[test]
    fn test_json_file_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"service": "b", "candidates": ["n2"]}}, {{"service": "a", "candidates": ["n1", "n2"]}}]"#
        )
        .unwrap();

        let catalog = JsonFileSnapshot::new(file.path()).snapshot().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position("b"), Some(0));
        assert_eq!(catalog.candidates(1).unwrap(), ["n1", "n2"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFileSnapshot::new(dir.path().join("absent.json"));
        assert!(matches!(
            provider.snapshot(),
            Err(DiscoveryError::Io { .. })
        ));
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"service": "a"}}, {{"service": "a"}}]"#).unwrap();
        assert!(matches!(
            JsonFileSnapshot::new(file.path()).snapshot(),
            Err(DiscoveryError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<applications/>").unwrap();
        assert!(matches!(
            JsonFileSnapshot::new(file.path()).snapshot(),
            Err(DiscoveryError::Parse(_))
        ));
    }
}
