//! The ordered, immutable formula knowledge base.

use crate::catalog;
use crate::formula::{Formula, FormulaError};
use crate::tag::Tag;
use std::sync::OnceLock;

/// Ordered collection of formulas.
///
/// Order matters: the resolver tries formulas in this order on every pass, so when two
/// formulas produce the same tag the earlier one whose inputs are satisfied wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    formulas: Vec<Formula>,
}

impl Registry {
    pub fn new(formulas: Vec<Formula>) -> Self {
        Self { formulas }
    }

    /// The standard milling formula set.
    pub fn machining() -> Result<Self, FormulaError> {
        Ok(Self::new(catalog::machining_formulas()?))
    }

    /// Process-wide copy of [`Registry::machining`], built on first use.
    pub fn machining_shared() -> &'static Registry {
        static SHARED: OnceLock<Registry> = OnceLock::new();
        SHARED.get_or_init(|| {
            Registry::machining().expect("standard formula catalog is well-formed")
        })
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }

    /// Formulas producing `tag`, in registry order.
    pub fn producers_of(&self, tag: Tag) -> impl Iterator<Item = &Formula> {
        self.formulas.iter().filter(move |f| f.output() == tag)
    }

    pub fn can_produce(&self, tag: Tag) -> bool {
        self.producers_of(tag).next().is_some()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Formula;
    type IntoIter = std::slice::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.formulas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{CHIP_RAKE_ANGLE, SPINDLE_SPEED, TABLE_FEED};

    #[test]
    fn machining_registry_builds() {
        let registry = Registry::machining().expect("catalog should build");
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), Registry::machining_shared().len());
    }

    #[test]
    fn shared_registry_is_built_once() {
        let a = Registry::machining_shared() as *const Registry;
        let b = Registry::machining_shared() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn producers_keep_registry_order() {
        let registry = Registry::machining_shared();
        let names: Vec<&str> = registry.producers_of(TABLE_FEED).map(|f| f.name()).collect();
        assert_eq!(names, vec!["Vf", "Vf_from_fn"]);
        assert!(registry.can_produce(SPINDLE_SPEED));
        assert!(!registry.can_produce(CHIP_RAKE_ANGLE));
    }

    #[test]
    fn empty_registry_is_legal() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
