//! Service catalog: the ordered service → candidate-node snapshot.
//!
//! Gene positions of every chromosome follow the order of the entries in the
//! catalog, so the catalog is kept as an explicit ordered list rather than a
//! map.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single service and the nodes able to host it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Service identifier.
    pub service: String,
    /// Candidate node identifiers, in discovery order.
    #[serde(default)]
    pub candidates: Vec<String>,
}

impl ServiceEntry {
    pub fn new<S, I, N>(service: S, candidates: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            service: service.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered, duplicate-free mapping from service to candidate nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ServiceEntry>", into = "Vec<ServiceEntry>")]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    /// Build a catalog, rejecting duplicate service identifiers.
    pub fn new(entries: Vec<ServiceEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.service.as_str()) {
                return Err(CatalogError::DuplicateService(entry.service.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Convenience constructor from `(service, candidates)` pairs.
    pub fn from_pairs<S, I, N>(pairs: impl IntoIterator<Item = (S, I)>) -> Result<Self, CatalogError>
    where
        S: Into<String>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(service, candidates)| ServiceEntry::new(service, candidates))
                .collect(),
        )
    }

    /// Append a service at the end of the gene ordering.
    pub fn push(&mut self, entry: ServiceEntry) -> Result<(), CatalogError> {
        if self.position(&entry.service).is_some() {
            return Err(CatalogError::DuplicateService(entry.service));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Number of services (the chromosome length).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceEntry> {
        self.entries.iter()
    }

    /// Candidate list for the service at gene position `index`.
    pub fn candidates(&self, index: usize) -> Option<&[String]> {
        self.entries.get(index).map(|e| e.candidates.as_slice())
    }

    /// Gene position of a service.
    pub fn position(&self, service: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.service == service)
    }

    /// Every distinct node mentioned by any service.
    pub fn nodes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .flat_map(|e| e.candidates.iter())
            .filter(|n| seen.insert(n.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl TryFrom<Vec<ServiceEntry>> for ServiceCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<ServiceEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ServiceCatalog> for Vec<ServiceEntry> {
    fn from(catalog: ServiceCatalog) -> Self {
        catalog.entries
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a ServiceEntry;
    type IntoIter = std::slice::Iter<'a, ServiceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Catalog construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Service {0:?} appears more than once")]
    DuplicateService(String),
}
