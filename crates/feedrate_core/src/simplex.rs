//! Nelder–Mead downhill simplex minimization.
//!
//! Derivative-free; works on any [`Objective`] over a fixed number of parameters.
//! Non-finite objective values are treated as `+inf`, so an objective can reject a
//! point by returning `NaN` or `f64::INFINITY`.

use crate::traits::Objective;
use anyhow::{bail, Result};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimplexSettings {
    /// Stop once the spread of values across the simplex is at most this.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Initial vertex offset, relative to the component for non-zero components.
    pub initial_step: f64,
}

impl Default for SimplexSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-7,
            max_iterations: 5000,
            initial_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplexResult<const N: usize> {
    pub point: SVector<f64, N>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

struct Vertex<const N: usize> {
    point: SVector<f64, N>,
    value: f64,
}

fn evaluate<const N: usize>(objective: &impl Objective<N>, point: SVector<f64, N>) -> Vertex<N> {
    let value = objective.evaluate(&point);
    Vertex {
        point,
        value: if value.is_finite() { value } else { f64::INFINITY },
    }
}

/// Minimizes `objective` starting from `start`.
///
/// Returns the best vertex found. Hitting `max_iterations` is not an error; check
/// [`SimplexResult::converged`].
pub fn minimize<const N: usize>(
    objective: &impl Objective<N>,
    start: SVector<f64, N>,
    settings: SimplexSettings,
) -> Result<SimplexResult<N>> {
    if N == 0 {
        bail!("Cannot minimize over zero parameters.");
    }
    if settings.max_iterations == 0 {
        bail!("max_iterations must be greater than zero.");
    }
    if settings.tolerance <= 0.0 {
        bail!("tolerance must be positive.");
    }
    if settings.initial_step <= 0.0 {
        bail!("initial_step must be positive.");
    }
    if start.iter().any(|x| !x.is_finite()) {
        bail!("Starting point must be finite.");
    }

    let mut simplex: Vec<Vertex<N>> = Vec::with_capacity(N + 1);
    simplex.push(evaluate(objective, start));
    for i in 0..N {
        let mut point = start;
        point[i] += if point[i] != 0.0 {
            settings.initial_step * point[i]
        } else {
            settings.initial_step
        };
        simplex.push(evaluate(objective, point));
    }

    let mut iterations = 0usize;
    let mut converged = false;

    loop {
        simplex.sort_by(|a, b| a.value.total_cmp(&b.value));

        let best = simplex[0].value;
        let worst = simplex[N].value;
        if worst - best <= settings.tolerance {
            converged = true;
            break;
        }
        if iterations >= settings.max_iterations {
            break;
        }
        iterations += 1;

        let centroid = simplex[..N]
            .iter()
            .fold(SVector::<f64, N>::zeros(), |acc, v| acc + v.point)
            / N as f64;
        let worst_point = simplex[N].point;

        let reflected = evaluate(objective, centroid + (centroid - worst_point) * REFLECTION);

        if reflected.value < best {
            let expanded = evaluate(objective, centroid + (reflected.point - centroid) * EXPANSION);
            simplex[N] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }

        if reflected.value < simplex[N - 1].value {
            simplex[N] = reflected;
            continue;
        }

        let contracted = if reflected.value < worst {
            evaluate(objective, centroid + (reflected.point - centroid) * CONTRACTION)
        } else {
            evaluate(objective, centroid + (worst_point - centroid) * CONTRACTION)
        };
        if contracted.value < reflected.value.min(worst) {
            simplex[N] = contracted;
            continue;
        }

        let best_point = simplex[0].point;
        for vertex in simplex.iter_mut().skip(1) {
            *vertex = evaluate(objective, best_point + (vertex.point - best_point) * SHRINK);
        }
    }

    let best = &simplex[0];
    debug!(iterations, converged, value = best.value, "simplex finished");

    Ok(SimplexResult {
        point: best.point,
        value: best.value,
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector2, Vector3};

    #[test]
    fn minimizes_sphere() {
        let sphere = |p: &Vector3<f64>| p.norm_squared();
        let result = minimize(&sphere, Vector3::new(0.5, 0.5, 0.5), SimplexSettings::default())
            .expect("minimize should run");
        assert!(result.converged, "did not converge: {result:?}");
        assert!(result.value < 1e-4, "value too large: {}", result.value);
        assert!(result.point.norm() < 1e-2, "point too far: {}", result.point);
    }

    #[test]
    fn minimizes_shifted_quadratic() {
        let bowl = |p: &Vector2<f64>| (p[0] - 3.0).powi(2) + 10.0 * (p[1] + 1.0).powi(2);
        let settings = SimplexSettings {
            tolerance: 1e-12,
            ..SimplexSettings::default()
        };
        let result = minimize(&bowl, Vector2::new(0.0, 0.0), settings).expect("minimize");
        assert!(result.converged);
        assert!((result.point[0] - 3.0).abs() < 1e-3, "x = {}", result.point[0]);
        assert!((result.point[1] + 1.0).abs() < 1e-3, "y = {}", result.point[1]);
    }

    #[test]
    fn nan_regions_are_avoided() {
        let guarded = |p: &Vector2<f64>| {
            if p[0] < 1.0 {
                f64::NAN
            } else {
                (p[0] - 2.0).powi(2) + p[1].powi(2)
            }
        };
        let result =
            minimize(&guarded, Vector2::new(4.0, 1.0), SimplexSettings::default()).expect("run");
        assert!(result.value.is_finite());
        assert!(result.point[0] >= 1.0);
        assert!((result.point[0] - 2.0).abs() < 1e-2);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let sphere = |p: &Vector2<f64>| p.norm_squared();
        let settings = SimplexSettings {
            max_iterations: 3,
            tolerance: 1e-15,
            ..SimplexSettings::default()
        };
        let result = minimize(&sphere, Vector2::new(5.0, 5.0), settings).expect("run");
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn rejects_invalid_settings() {
        let sphere = |p: &Vector2<f64>| p.norm_squared();
        let start = Vector2::new(1.0, 1.0);

        let err = minimize(
            &sphere,
            start,
            SimplexSettings {
                tolerance: 0.0,
                ..SimplexSettings::default()
            },
        )
        .expect_err("zero tolerance should fail");
        assert!(err.to_string().contains("tolerance"));

        let err = minimize(
            &sphere,
            start,
            SimplexSettings {
                max_iterations: 0,
                ..SimplexSettings::default()
            },
        )
        .expect_err("zero iterations should fail");
        assert!(err.to_string().contains("max_iterations"));

        let err = minimize(&sphere, Vector2::new(f64::NAN, 0.0), SimplexSettings::default())
            .expect_err("non-finite start should fail");
        assert!(err.to_string().contains("finite"));
    }
}
