//! Fitting a cut to the spindle and feed limits of a machine.

use crate::registry::Registry;
use crate::resolver::{Resolution, Resolver, ResolverSettings};
use crate::tag::*;
use crate::working_set::{TaggedValue, WorkingSet};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outputs reported by [`fit_to_machine`].
pub const FIT_OUTPUTS: [Tag; 7] = [
    TABLE_FEED,
    SPINDLE_SPEED,
    MATERIAL_REMOVAL_RATE,
    NET_POWER,
    TORQUE,
    DEFLECTION,
    TANGENTIAL_FORCE,
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MachineLimits {
    /// rpm
    pub max_spindle_speed: f64,
    /// mm/min
    pub max_table_feed: f64,
    /// Nm
    pub max_torque: f64,
    pub max_adjustments: usize,
}

impl Default for MachineLimits {
    fn default() -> Self {
        Self {
            max_spindle_speed: 2800.0,
            max_table_feed: 200.0,
            max_torque: 0.07061551834,
            max_adjustments: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineFit {
    /// Resolution of [`FIT_OUTPUTS`] after the last adjustment.
    pub resolution: Resolution,
    /// Known values after adjustment, with spindle speed and feed pinned if scaled.
    /// A known cutting speed is scaled along with the spindle speed.
    pub known: Vec<TaggedValue>,
    pub adjustments: usize,
    pub over_torque: bool,
}

/// Scales spindle speed and table feed together until both are within `limits`.
///
/// Speed is brought down first, keeping the feed per tooth by scaling the feed by the
/// same factor; if only the feed is too high, both are scaled by the feed ratio.
/// Exceeding the torque limit is reported, not corrected.
pub fn fit_to_machine<K, V>(
    known: K,
    limits: MachineLimits,
    registry: &Registry,
    settings: ResolverSettings,
) -> Result<MachineFit>
where
    K: IntoIterator<Item = V>,
    V: Into<TaggedValue>,
{
    if limits.max_spindle_speed <= 0.0 {
        bail!("max_spindle_speed must be positive.");
    }
    if limits.max_table_feed <= 0.0 {
        bail!("max_table_feed must be positive.");
    }

    let resolver = Resolver::new(registry, settings);
    let mut known = WorkingSet::from_known(known);
    let mut adjustments = 0usize;

    loop {
        let resolution = resolver.solve(known.iter().copied(), &FIT_OUTPUTS);
        let (Some(n), Some(vf)) = (
            resolution.value(SPINDLE_SPEED),
            resolution.value(TABLE_FEED),
        ) else {
            bail!("Unable to determine spindle speed and table feed from the known values.");
        };

        let torque = resolution.value(TORQUE);
        let over_torque = torque.is_some_and(|mc| mc > limits.max_torque);
        if over_torque {
            warn!(?torque, max_torque = limits.max_torque, "torque over machine limit");
        }

        if n > limits.max_spindle_speed {
            let alpha = limits.max_spindle_speed / n;
            info!(from = n, to = limits.max_spindle_speed, alpha, "scaling spindle speed");
            known.insert(SPINDLE_SPEED, limits.max_spindle_speed);
            known.insert(TABLE_FEED, vf * alpha);
            scale_cutting_speed(&mut known, alpha);
        } else if vf > limits.max_table_feed {
            let alpha = limits.max_table_feed / vf;
            info!(from = vf, to = limits.max_table_feed, alpha, "scaling table feed");
            known.insert(SPINDLE_SPEED, n * alpha);
            known.insert(TABLE_FEED, limits.max_table_feed);
            scale_cutting_speed(&mut known, alpha);
        } else {
            return Ok(MachineFit {
                resolution,
                known: known.into_values(),
                adjustments,
                over_torque,
            });
        }

        adjustments += 1;
        if adjustments > limits.max_adjustments {
            bail!(
                "Speed and feed did not settle within {} adjustments.",
                limits.max_adjustments
            );
        }
    }
}

/// Vc is proportional to n, so a known cutting speed follows the spindle speed.
fn scale_cutting_speed(known: &mut WorkingSet, alpha: f64) {
    if let Some(vc) = known.get(CUTTING_SPEED) {
        known.insert(CUTTING_SPEED, vc * alpha);
    }
}
