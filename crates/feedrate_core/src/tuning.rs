//! Tuning known inputs against a fitness built from resolved outputs.
//!
//! Each objective evaluation seeds a fresh working set with the fixed known values
//! plus the candidate parameters, resolves it, and hands the resolution to a fitness
//! function. [`simplex::minimize`] drives the search.

use crate::registry::Registry;
use crate::resolver::{Resolution, Resolver, ResolverSettings};
use crate::simplex::{self, SimplexSettings};
use crate::tag::Tag;
use crate::working_set::TaggedValue;
use anyhow::{bail, Context, Result};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// A tunable input and its admissible range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub tag: Tag,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl Parameter {
    /// `value` starts at the middle of the range.
    pub fn new(tag: Tag, min: f64, max: f64) -> Self {
        Self {
            tag,
            value: 0.5 * (min + max),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.min + self.max)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Where the search begins: `value` pulled into range, or the midpoint if it is NaN.
    pub fn start(&self) -> f64 {
        if self.value.is_nan() {
            self.midpoint()
        } else {
            self.clamp(self.value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TuningResult {
    /// Tuned parameter values, in parameter order.
    pub values: Vec<TaggedValue>,
    pub fitness: f64,
    /// Resolution at the tuned point.
    pub resolution: Resolution,
    pub iterations: usize,
    pub converged: bool,
}

pub struct TuningProblem<'r, const N: usize, F> {
    registry: &'r Registry,
    resolver_settings: ResolverSettings,
    known: Vec<TaggedValue>,
    parameters: [Parameter; N],
    requested: Vec<Tag>,
    fitness: F,
}

impl<'r, const N: usize, F> TuningProblem<'r, N, F>
where
    F: Fn(&Resolution) -> f64,
{
    /// `fitness` is minimized. It only sees resolutions where every requested tag
    /// was determined.
    pub fn new<K, V>(
        registry: &'r Registry,
        known: K,
        parameters: [Parameter; N],
        requested: &[Tag],
        fitness: F,
    ) -> Self
    where
        K: IntoIterator<Item = V>,
        V: Into<TaggedValue>,
    {
        Self {
            registry,
            resolver_settings: ResolverSettings::default(),
            known: known.into_iter().map(Into::into).collect(),
            parameters,
            requested: requested.to_vec(),
            fitness,
        }
    }

    pub fn with_resolver_settings(mut self, settings: ResolverSettings) -> Self {
        self.resolver_settings = settings;
        self
    }

    pub fn parameters(&self) -> &[Parameter; N] {
        &self.parameters
    }

    /// Resolves with `params` merged over the known values. Parameters win over
    /// known values for the same tag.
    pub fn resolve(&self, params: &SVector<f64, N>) -> Resolution {
        let tuned = self
            .parameters
            .iter()
            .zip(params.iter())
            .map(|(p, &value)| TaggedValue::new(p.tag, value));
        Resolver::new(self.registry, self.resolver_settings)
            .solve(self.known.iter().copied().chain(tuned), &self.requested)
    }

    /// Fitness at `params`; `+inf` outside the bounds or when a requested tag is
    /// undetermined.
    pub fn objective(&self, params: &SVector<f64, N>) -> f64 {
        let in_bounds = self
            .parameters
            .iter()
            .zip(params.iter())
            .all(|(p, &value)| p.contains(value));
        if !in_bounds {
            return f64::INFINITY;
        }

        let resolution = self.resolve(params);
        if !resolution.all_determined {
            return f64::INFINITY;
        }
        (self.fitness)(&resolution)
    }

    pub fn optimise(&self, settings: SimplexSettings) -> Result<TuningResult> {
        for p in &self.parameters {
            if !(p.min.is_finite() && p.max.is_finite()) || p.min >= p.max {
                bail!("Parameter {} has an empty or unbounded range.", p.tag);
            }
        }

        let start = SVector::<f64, N>::from_fn(|i, _| self.parameters[i].start());
        let objective = |params: &SVector<f64, N>| self.objective(params);
        let best = simplex::minimize(&objective, start, settings)
            .context("Simplex minimization failed.")?;
        if !best.value.is_finite() {
            bail!("No parameter combination inside the bounds determines every requested tag.");
        }

        let values = self
            .parameters
            .iter()
            .zip(best.point.iter())
            .map(|(p, &value)| TaggedValue::new(p.tag, value))
            .collect();

        Ok(TuningResult {
            values,
            fitness: best.value,
            resolution: self.resolve(&best.point),
            iterations: best.iterations,
            converged: best.converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::*;
    use std::f64::consts::PI;

    #[test]
    fn parameter_starts_at_midpoint() {
        let p = Parameter::new(SPINDLE_SPEED, 1000.0, 3000.0);
        assert_eq!(p.value, 2000.0);
        assert_eq!(p.midpoint(), 2000.0);
        assert_eq!(p.start(), 2000.0);
        assert_eq!(p.clamp(5000.0), 3000.0);
        assert!(!p.contains(999.0));
    }

    #[test]
    fn start_pulls_value_into_range() {
        let p = Parameter::new(SPINDLE_SPEED, 1000.0, 3000.0);
        assert_eq!(Parameter { value: 1200.0, ..p }.start(), 1200.0);
        assert_eq!(Parameter { value: 9000.0, ..p }.start(), 3000.0);
        assert_eq!(Parameter { value: f64::NAN, ..p }.start(), 2000.0);
    }

    #[test]
    fn optimise_starts_from_parameter_value() {
        let registry = Registry::machining_shared();
        let start = Parameter {
            value: 1500.0,
            ..Parameter::new(SPINDLE_SPEED, 1000.0, 5000.0)
        };
        // A flat fitness converges before the first step, leaving the start point.
        let problem = TuningProblem::new(
            registry,
            [(CUTTER_DIAMETER_AT_DEPTH_OF_CUT, 10.0)],
            [start],
            &[CUTTING_SPEED],
            |_: &Resolution| 0.0,
        );
        let result = problem.optimise(SimplexSettings::default()).expect("optimise");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.values[0].value, 1500.0);
    }

    #[test]
    fn objective_merges_parameters_over_known_values() {
        let registry = Registry::machining_shared();
        let problem = TuningProblem::new(
            registry,
            [(CUTTER_DIAMETER_AT_DEPTH_OF_CUT, 10.0), (SPINDLE_SPEED, 1.0)],
            [Parameter::new(SPINDLE_SPEED, 1000.0, 5000.0)],
            &[CUTTING_SPEED],
            |r: &Resolution| r.value(CUTTING_SPEED).unwrap_or(f64::NAN),
        );
        let vc = problem.objective(&SVector::<f64, 1>::new(2000.0));
        assert!((vc - 10.0 * PI * 2.0).abs() < 1e-9, "unexpected Vc {vc}");
    }

    #[test]
    fn objective_penalises_out_of_bounds_and_undetermined() {
        let registry = Registry::machining_shared();
        let bounded = TuningProblem::new(
            registry,
            [(CUTTER_DIAMETER_AT_DEPTH_OF_CUT, 10.0)],
            [Parameter::new(SPINDLE_SPEED, 1000.0, 5000.0)],
            &[CUTTING_SPEED],
            |_: &Resolution| 0.0,
        );
        assert_eq!(bounded.objective(&SVector::<f64, 1>::new(6000.0)), f64::INFINITY);

        let starved = TuningProblem::new(
            registry,
            Vec::<TaggedValue>::new(),
            [Parameter::new(SPINDLE_SPEED, 1000.0, 5000.0)],
            &[CUTTING_SPEED],
            |_: &Resolution| 0.0,
        );
        assert_eq!(starved.objective(&SVector::<f64, 1>::new(2000.0)), f64::INFINITY);
    }

    #[test]
    fn tunes_spindle_speed_to_target_cutting_speed() {
        let registry = Registry::machining_shared();
        let problem = TuningProblem::new(
            registry,
            [(CUTTER_DIAMETER_AT_DEPTH_OF_CUT, 10.0)],
            [Parameter::new(SPINDLE_SPEED, 1000.0, 5000.0)],
            &[CUTTING_SPEED],
            |r: &Resolution| {
                let vc = r.value(CUTTING_SPEED).unwrap_or(f64::NAN);
                (vc - 100.0).powi(2)
            },
        );
        let result = problem.optimise(SimplexSettings::default()).expect("optimise");
        assert!(result.converged);
        let n = result.values[0].value;
        let expected = 100.0 * 1000.0 / (PI * 10.0);
        assert!((n - expected).abs() < 1.0, "n = {n}, expected {expected}");
        let vc = result.resolution.value(CUTTING_SPEED).expect("Vc");
        assert!((vc - 100.0).abs() < 0.05);
    }

    #[test]
    fn maximises_removal_rate_under_torque_limit() {
        let registry = Registry::machining_shared();
        let max_torque = 0.5;
        let problem = TuningProblem::new(
            registry,
            [
                (DEPTH_OF_CUT, 2.0),
                (WORKING_ENGAGEMENT, 10.0),
                (SPECIFIC_CUTTING_FORCE, 1500.0),
                (SPINDLE_SPEED, 1000.0),
            ],
            [Parameter::new(TABLE_FEED, 10.0, 150.0)],
            &[MATERIAL_REMOVAL_RATE, TORQUE],
            move |r: &Resolution| {
                let q = r.value(MATERIAL_REMOVAL_RATE).unwrap_or(0.0);
                let mc = r.value(TORQUE).unwrap_or(f64::INFINITY);
                if mc > max_torque {
                    f64::INFINITY
                } else {
                    -q
                }
            },
        );
        let result = problem.optimise(SimplexSettings::default()).expect("optimise");

        // Mc = ap·ae·Vf·kc/(60e6) · 30e3/(π·n), linear in Vf.
        let torque_per_feed = 2.0 * 10.0 * 1500.0 / 60e6 * 30e3 / (PI * 1000.0);
        let limit_feed = max_torque / torque_per_feed;
        let vf = result.values[0].value;
        assert!(vf <= limit_feed + 1e-9, "feed {vf} exceeds torque limit {limit_feed}");
        assert!(vf > 0.95 * limit_feed, "feed {vf} far below limit {limit_feed}");
    }

    #[test]
    fn optimise_rejects_empty_range() {
        let registry = Registry::machining_shared();
        let problem = TuningProblem::new(
            registry,
            Vec::<TaggedValue>::new(),
            [Parameter::new(SPINDLE_SPEED, 10.0, 10.0)],
            &[SPINDLE_SPEED],
            |_: &Resolution| 0.0,
        );
        let err = problem
            .optimise(SimplexSettings::default())
            .expect_err("empty range should fail");
        assert!(err.to_string().contains("range"), "unexpected error: {err}");
    }
}
