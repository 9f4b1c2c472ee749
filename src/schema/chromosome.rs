//! Chromosome: one candidate global service → node assignment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ServiceCatalog;

/// Ordered node choices, one gene per catalog service.
///
/// `None` marks a service that had no candidate node when the chromosome was
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    genes: Vec<Option<String>>,
}

impl Chromosome {
    pub fn new(genes: Vec<Option<String>>) -> Self {
        Self { genes }
    }

    /// Chromosome with every gene absent.
    pub fn absent(len: usize) -> Self {
        Self {
            genes: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Option<String>] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [Option<String>] {
        &mut self.genes
    }

    pub fn into_genes(self) -> Vec<Option<String>> {
        self.genes
    }

    /// Allele at `index`, flattened so that out-of-range and absent look alike.
    pub fn gene(&self, index: usize) -> Option<&str> {
        self.genes.get(index).and_then(|g| g.as_deref())
    }

    /// Number of absent genes.
    pub fn absent_count(&self) -> usize {
        self.genes.iter().filter(|g| g.is_none()).count()
    }

    /// Number of distinct nodes used. Absent genes are not counted.
    pub fn distinct_nodes(&self) -> usize {
        self.genes
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Pair each catalog service with the node this chromosome assigns it.
    pub fn assignments<'a>(
        &'a self,
        catalog: &'a ServiceCatalog,
    ) -> Vec<(&'a str, Option<&'a str>)> {
        catalog
            .iter()
            .zip(&self.genes)
            .map(|(entry, gene)| (entry.service.as_str(), gene.as_deref()))
            .collect()
    }
}

impl From<Vec<Option<String>>> for Chromosome {
    fn from(genes: Vec<Option<String>>) -> Self {
        Self::new(genes)
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for Chromosome {
    fn from_iter<T: IntoIterator<Item = Option<S>>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|g| g.map(Into::into)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let chromosome: Chromosome = [Some("n1"), None, Some("n1"), Some("n2")]
            .into_iter()
            .collect();
        assert_eq!(chromosome.len(), 4);
        assert_eq!(chromosome.absent_count(), 1);
        assert_eq!(chromosome.distinct_nodes(), 2);
        assert_eq!(chromosome.gene(1), None);
        assert_eq!(chromosome.gene(3), Some("n2"));
    }

    #[test]
    fn test_assignments_follow_catalog_order() {
        let catalog =
            ServiceCatalog::from_pairs([("a", vec!["n1"]), ("b", Vec::<&str>::new())]).unwrap();
        let chromosome: Chromosome = [Some("n1"), None].into_iter().collect();
        assert_eq!(
            chromosome.assignments(&catalog),
            vec![("a", Some("n1")), ("b", None)]
        );
    }

    #[test]
    fn test_serializes_as_list() {
        let chromosome: Chromosome = [Some("n1"), None].into_iter().collect();
        let json = serde_json::to_string(&chromosome).unwrap();
        assert_eq!(json, r#"["n1",null]"#);
    }
}
