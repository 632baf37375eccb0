//! Subtype occurrence index.

use std::collections::HashMap;
use tracing::debug;

use crate::card::Catalog;

/// How the subtype list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeOrder {
    /// Most common first; ties keep first-occurrence order.
    #[default]
    ByCount,
    /// Lexicographic by subtype name.
    Alphabetical,
}

impl TypeOrder {
    pub fn toggled(self) -> Self {
        match self {
            TypeOrder::ByCount => TypeOrder::Alphabetical,
            TypeOrder::Alphabetical => TypeOrder::ByCount,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeOrder::ByCount => "count",
            TypeOrder::Alphabetical => "a-z",
        }
    }
}

/// A subtype and the number of filtered cards listing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    pub subtype: String,
    pub count: usize,
}

/// Ordered subtype groups. Every group has `count >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeIndex {
    groups: Vec<TypeGroup>,
}

impl TypeIndex {
    pub fn build(filtered: &Catalog, order: TypeOrder) -> Self {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<TypeGroup> = Vec::new();

        for subtype in filtered.iter().flat_map(|card| card.subtypes.iter()) {
            match position.get(subtype.as_str()) {
                Some(&idx) => groups[idx].count += 1,
                None => {
                    position.insert(subtype.as_str(), groups.len());
                    groups.push(TypeGroup {
                        subtype: subtype.clone(),
                        count: 1,
                    });
                }
            }
        }

        // Both sorts are stable, so equal counts keep first-occurrence order.
        match order {
            TypeOrder::ByCount => groups.sort_by(|a, b| b.count.cmp(&a.count)),
            TypeOrder::Alphabetical => groups.sort_by(|a, b| a.subtype.cmp(&b.subtype)),
        }

        debug!(groups = groups.len(), order = order.label(), "built type index");
        Self { groups }
    }

    pub fn groups(&self) -> &[TypeGroup] {
        &self.groups
    }

    pub fn first(&self) -> Option<&TypeGroup> {
        self.groups.first()
    }

    pub fn position(&self, subtype: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.subtype == subtype)
    }

    pub fn contains(&self, subtype: &str) -> bool {
        self.position(subtype).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of all group counts.
    pub fn total_occurrences(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::creature;

    fn pairs(index: &TypeIndex) -> Vec<(&str, usize)> {
        index
            .groups()
            .iter()
            .map(|g| (g.subtype.as_str(), g.count))
            .collect()
    }

    fn sample() -> Catalog {
        Catalog::from_cards(vec![
            creature("a", &["Zombie", "Elf"], 1, 1),
            creature("b", &["Elf"], 1, 1),
            creature("c", &["Merfolk"], 1, 1),
            creature("d", &["Zombie"], 1, 1),
            creature("e", &["Bird"], 1, 1),
        ])
    }

    #[test]
    fn test_by_count_breaks_ties_by_first_occurrence() {
        let index = TypeIndex::build(&sample(), TypeOrder::ByCount);
        assert_eq!(
            pairs(&index),
            vec![("Zombie", 2), ("Elf", 2), ("Merfolk", 1), ("Bird", 1)]
        );
    }

    #[test]
    fn test_alphabetical() {
        let index = TypeIndex::build(&sample(), TypeOrder::Alphabetical);
        assert_eq!(
            pairs(&index),
            vec![("Bird", 1), ("Elf", 2), ("Merfolk", 1), ("Zombie", 2)]
        );
    }

    #[test]
    fn test_repeated_subtype_counts_twice() {
        let catalog = Catalog::from_cards(vec![creature("odd", &["Elf", "Elf"], 1, 1)]);
        let index = TypeIndex::build(&catalog, TypeOrder::ByCount);
        assert_eq!(pairs(&index), vec![("Elf", 2)]);
    }

    #[test]
    fn test_empty_catalog_has_no_groups() {
        let index = TypeIndex::build(&Catalog::default(), TypeOrder::ByCount);
        assert!(index.is_empty());
        assert!(index.first().is_none());
    }

    #[test]
    fn test_total_occurrences_matches_pairs() {
        let catalog = sample();
        let index = TypeIndex::build(&catalog, TypeOrder::ByCount);
        let pairs: usize = catalog.iter().map(|c| c.subtypes.len()).sum();
        assert_eq!(index.total_occurrences(), pairs);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(TypeOrder::ByCount.toggled().toggled(), TypeOrder::ByCount);
        assert_eq!(TypeOrder::ByCount.toggled(), TypeOrder::Alphabetical);
    }
}
