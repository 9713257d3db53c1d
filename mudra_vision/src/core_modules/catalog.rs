// THEORY:
// The `catalog` module owns the one piece of configuration that decides what the
// classifier says: the ordered list of rules. Gesture poses overlap, so the
// order of the list is the disambiguation policy. An earlier rule always wins.
//
// Key architectural principles:
// 1.  **Built Once, Then Frozen**: A `GestureCatalog` is assembled through
//     `CatalogBuilder` and is immutable afterwards. It is passed to the classifier
//     explicitly, so tests can compose and reorder catalogs freely.
// 2.  **Identity Over Name**: Each rule holds its predicate behind an `Arc`. Two
//     entries sharing one `Arc` are the same rule under two labels; under
//     first-match-wins the later one can never be reported. The builder records
//     such entries as dead aliases and warns about them at build time.

use std::sync::Arc;

use tracing::warn;

use crate::core_modules::distance_table::DistanceTables;
use crate::core_modules::gestures::{GesturePredicate, Mudra, RuleOutcome};
use crate::core_modules::landmark::LandmarkSet;

/// One `(label, predicate)` entry.
#[derive(Clone)]
pub struct GestureRule {
    label: String,
    predicate: Arc<dyn GesturePredicate>,
}

impl GestureRule {
    pub fn new(label: impl Into<String>, predicate: Arc<dyn GesturePredicate>) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn evaluate(&self, landmarks: &LandmarkSet, tables: &DistanceTables) -> RuleOutcome {
        self.predicate.evaluate(landmarks, tables)
    }

    fn shares_predicate_with(&self, other: &GestureRule) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl std::fmt::Debug for GestureRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRule").field("label", &self.label).finish_non_exhaustive()
    }
}

/// An entry that can never be reported because an earlier entry holds the
/// same predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadAlias {
    pub label: String,
    pub shadowed_by: String,
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    rules: Vec<GestureRule>,
}

impl CatalogBuilder {
    pub fn rule(mut self, label: impl Into<String>, predicate: Arc<dyn GesturePredicate>) -> Self {
        self.rules.push(GestureRule::new(label, predicate));
        self
    }

    /// Appends a built-in rule under its canonical label.
    pub fn mudra(self, mudra: Mudra) -> Self {
        self.rule(mudra.label(), Arc::new(mudra))
    }

    pub fn build(self) -> GestureCatalog {
        let mut dead_aliases = Vec::new();
        for (position, rule) in self.rules.iter().enumerate() {
            let earlier = self.rules[..position].iter().find(|e| e.shares_predicate_with(rule));
            if let Some(earlier) = earlier {
                warn!(
                    label = rule.label(),
                    shadowed_by = earlier.label(),
                    position,
                    "Catalog entry is unreachable: its predicate is already registered"
                );
                dead_aliases.push(DeadAlias {
                    label: rule.label.clone(),
                    shadowed_by: earlier.label.clone(),
                    position,
                });
            }
        }
        GestureCatalog {
            rules: self.rules,
            dead_aliases,
        }
    }
}

/// The immutable, ordered rule list consulted by the classifier.
#[derive(Debug, Clone)]
pub struct GestureCatalog {
    rules: Vec<GestureRule>,
    dead_aliases: Vec<DeadAlias>,
}

impl GestureCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The built-in rule set in its curated priority order.
    pub fn standard() -> Self {
        Mudra::ALL
            .into_iter()
            .fold(Self::builder(), CatalogBuilder::mudra)
            .build()
    }

    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }

    /// Every label in priority order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(GestureRule::label)
    }

    pub fn dead_aliases(&self) -> &[DeadAlias] {
        &self.dead_aliases
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for GestureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_order() {
        let catalog = GestureCatalog::standard();
        assert_eq!(catalog.len(), 24);
        let labels: Vec<_> = catalog.labels().collect();
        assert_eq!(labels.first(), Some(&"Ardha Chandra Mudra"));
        assert_eq!(labels[1], "Suchi Mudra");
        assert_eq!(labels.last(), Some(&"Mukula Mudra"));
        let position = |label| labels.iter().position(|l| *l == label).unwrap();
        assert!(position("Ardhapataka Mudra") < position("Kartari Mukham Mudra"));
        assert!(position("Sarpashirsha Mudra") < position("Pataka Mudra"));
        assert!(catalog.dead_aliases().is_empty());
    }

    #[test]
    fn shared_predicate_is_flagged_as_dead() {
        let needle: Arc<dyn GesturePredicate> = Arc::new(Mudra::Suchi);
        let catalog = GestureCatalog::builder()
            .rule("Suchi Mudra", needle.clone())
            .mudra(Mudra::Pataka)
            .rule("Suchi (Needle)", needle)
            .build();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.dead_aliases(),
            [DeadAlias {
                label: "Suchi (Needle)".into(),
                shadowed_by: "Suchi Mudra".into(),
                position: 2,
            }]
        );
    }

    #[test]
    fn same_rule_type_in_separate_arcs_is_not_an_alias() {
        let catalog = GestureCatalog::builder()
            .mudra(Mudra::Suchi)
            .mudra(Mudra::Suchi)
            .build();
        assert!(catalog.dead_aliases().is_empty());
    }

    #[test]
    fn empty_catalog() {
        let catalog = GestureCatalog::builder().build();
        assert!(catalog.is_empty());
        assert_eq!(catalog.labels().count(), 0);
    }
}
