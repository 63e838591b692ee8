//! Feeds and speeds for a 4 mm, 4 flute carbide end mill slotting mild steel,
//! fitted to a small machine.

use anyhow::{Context, Result};
use feedrate_core::limits::{fit_to_machine, MachineLimits};
use feedrate_core::tag::*;
use feedrate_core::{tag_names, Registry, ResolverSettings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let known = [
        // Tool
        (FEED_PER_TOOTH, 0.012),
        (CUTTER_DIAMETER_AT_DEPTH_OF_CUT, 4.0),
        (CUTTER_TEETH, 4.0),
        (CUTTER_OVERHANG, 20.0),
        (CUTTER_MATERIAL_ELASTICITY, 650_000.0),
        // Material, mild steel at the low end of the speed range
        (CUTTING_SPEED, 3.0),
        (SPECIFIC_CUTTING_FORCE, 1500.0),
        (MATERIAL_TENSILE_STRENGTH, 440.0),
        // Cut
        (DEPTH_OF_CUT, 0.6),
        (WORKING_ENGAGEMENT, 4.0),
        (EFFECTIVE_CUTTER_TEETH, 4.0),
    ];

    let registry = Registry::machining().context("Failed to build the formula registry.")?;
    let fit = fit_to_machine(
        known,
        MachineLimits::default(),
        &registry,
        ResolverSettings::default(),
    )?;

    for (tag, value) in &fit.resolution.results {
        let unit = tag_names::unit(*tag).unwrap_or("");
        match value {
            Some(value) => tracing::info!("{tag}: {value:.6} {unit}"),
            None => tracing::info!("{tag}: undetermined"),
        }
    }
    tracing::info!(
        adjustments = fit.adjustments,
        over_torque = fit.over_torque,
        "fit complete"
    );
    Ok(())
}
