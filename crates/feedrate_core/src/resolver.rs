//! Forward-chaining resolution of unknown quantities.
//!
//! The resolver sweeps the registry in order, applying every formula whose inputs are
//! known and whose output is not, until a sweep derives nothing or the pass bound is
//! reached. Values derived earlier in a sweep are visible to later formulas in the
//! same sweep. The bound, not a dependency analysis, guarantees termination, so a
//! chain deeper than `max_passes` stays underived.

use crate::registry::Registry;
use crate::tag::Tag;
use crate::working_set::{TaggedValue, WorkingSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Maximum number of sweeps over the registry.
    pub max_passes: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { max_passes: 10 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveStats {
    /// Sweeps performed, including a final sweep that derived nothing.
    pub passes: usize,
    /// Values added to the working set.
    pub derived: usize,
}

/// Outcome of a [`solve`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// One entry per requested tag, in request order. `None` means undetermined.
    pub results: Vec<(Tag, Option<f64>)>,
    pub all_determined: bool,
    pub stats: ResolveStats,
}

impl Resolution {
    pub fn value(&self, tag: Tag) -> Option<f64> {
        self.results
            .iter()
            .find(|(t, _)| *t == tag)
            .and_then(|(_, value)| *value)
    }

    pub fn undetermined(&self) -> impl Iterator<Item = Tag> + '_ {
        self.results
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(tag, _)| *tag)
    }
}

/// Applies a registry to working sets. Cheap to build; holds only a borrow.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    settings: ResolverSettings,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r Registry, settings: ResolverSettings) -> Self {
        Self { registry, settings }
    }

    /// Derives everything reachable within the pass bound, in place.
    pub fn resolve(&self, values: &mut WorkingSet) -> ResolveStats {
        let mut stats = ResolveStats::default();

        while stats.passes < self.settings.max_passes {
            stats.passes += 1;
            let mut derived_this_pass = 0usize;

            for formula in self.registry {
                // First producer wins; a known output is never re-derived.
                if values.has(formula.output()) || !formula.is_applicable(&*values) {
                    continue;
                }
                let value = formula.evaluate(&*values);
                trace!(
                    pass = stats.passes,
                    formula = formula.name(),
                    tag = %formula.output(),
                    value,
                    "derived"
                );
                values.insert(formula.output(), value);
                derived_this_pass += 1;
            }

            stats.derived += derived_this_pass;
            if derived_this_pass == 0 {
                break;
            }
        }

        stats
    }

    /// Seeds a fresh working set, resolves it and reads out `requested`.
    pub fn solve<K, V>(&self, known: K, requested: &[Tag]) -> Resolution
    where
        K: IntoIterator<Item = V>,
        V: Into<TaggedValue>,
    {
        let mut values = WorkingSet::from_known(known);
        let stats = self.resolve(&mut values);
        let resolution = read_out(&values, requested, stats);

        debug!(
            passes = stats.passes,
            derived = stats.derived,
            all_determined = resolution.all_determined,
            undetermined = ?resolution
                .undetermined()
                .map(|tag| tag.to_string())
                .collect::<Vec<_>>(),
            "resolution finished"
        );
        resolution
    }
}

fn read_out(values: &WorkingSet, requested: &[Tag], stats: ResolveStats) -> Resolution {
    let results: Vec<(Tag, Option<f64>)> =
        requested.iter().map(|&tag| (tag, values.get(tag))).collect();
    let all_determined = results.iter().all(|(_, value)| value.is_some());
    Resolution {
        results,
        all_determined,
        stats,
    }
}

/// Solves with the default pass bound.
pub fn solve<K, V>(known: K, requested: &[Tag], registry: &Registry) -> Resolution
where
    K: IntoIterator<Item = V>,
    V: Into<TaggedValue>,
{
    solve_with(known, requested, registry, ResolverSettings::default())
}

pub fn solve_with<K, V>(
    known: K,
    requested: &[Tag],
    registry: &Registry,
    settings: ResolverSettings,
) -> Resolution
where
    K: IntoIterator<Item = V>,
    V: Into<TaggedValue>,
{
    Resolver::new(registry, settings).solve(known, requested)
}
