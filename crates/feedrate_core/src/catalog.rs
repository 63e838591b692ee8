//! Standard milling formulas.
//!
//! Formulas follow the Sandvik Coromant milling reference. Units are those listed on
//! the tag constants; no unit checking is done.

use crate::formula::{Formula, FormulaError};
use crate::tag::*;
use std::f64::consts::PI;

/// The standard formulas in resolver order.
///
/// The first seven keep their historical order (torque is tried before net power).
pub fn machining_formulas() -> Result<Vec<Formula>, FormulaError> {
    Ok(vec![
        cutting_speed()?,
        spindle_speed()?,
        feed_per_tooth()?,
        material_removal_rate()?,
        table_feed()?,
        torque()?,
        net_power()?,
        feed_per_revolution()?,
        table_feed_from_feed_per_revolution()?,
        side_milling_chip_thickness()?,
        tangential_force()?,
        cutter_moment_of_inertia()?,
        deflection()?,
    ])
}

/// `Vc = Dcap·π·n / 1000`
pub fn cutting_speed() -> Result<Formula, FormulaError> {
    Formula::new(
        "Vc",
        CUTTING_SPEED,
        [CUTTER_DIAMETER_AT_DEPTH_OF_CUT, SPINDLE_SPEED],
        |[dcap, n]| dcap * PI * n / 1000.0,
    )
}

/// `n = Vc·1000 / (π·Dcap)`
pub fn spindle_speed() -> Result<Formula, FormulaError> {
    Formula::new(
        "n",
        SPINDLE_SPEED,
        [CUTTING_SPEED, CUTTER_DIAMETER_AT_DEPTH_OF_CUT],
        |[vc, dcap]| vc * 1000.0 / (PI * dcap),
    )
}

/// `fz = Vf / (n·Zc)`
pub fn feed_per_tooth() -> Result<Formula, FormulaError> {
    Formula::new(
        "fz",
        FEED_PER_TOOTH,
        [TABLE_FEED, SPINDLE_SPEED, EFFECTIVE_CUTTER_TEETH],
        |[vf, n, zc]| vf / (n * zc),
    )
}

/// `Q = ap·ae·Vf / 1000`
pub fn material_removal_rate() -> Result<Formula, FormulaError> {
    Formula::new(
        "Q",
        MATERIAL_REMOVAL_RATE,
        [DEPTH_OF_CUT, WORKING_ENGAGEMENT, TABLE_FEED],
        |[ap, ae, vf]| ap * ae * vf / 1000.0,
    )
}

/// `Vf = fz·n·Zc`
pub fn table_feed() -> Result<Formula, FormulaError> {
    Formula::new(
        "Vf",
        TABLE_FEED,
        [FEED_PER_TOOTH, SPINDLE_SPEED, EFFECTIVE_CUTTER_TEETH],
        |[fz, n, zc]| fz * n * zc,
    )
}

/// `Mc = Pc·30·1000 / (π·n)`
pub fn torque() -> Result<Formula, FormulaError> {
    Formula::new(
        "Mc",
        TORQUE,
        [NET_POWER, SPINDLE_SPEED],
        |[pc, n]| pc * 30.0 * 1000.0 / (PI * n),
    )
}

/// `Pc = ap·ae·Vf·kc / (60·10⁶)`
pub fn net_power() -> Result<Formula, FormulaError> {
    Formula::new(
        "Pc",
        NET_POWER,
        [DEPTH_OF_CUT, WORKING_ENGAGEMENT, TABLE_FEED, SPECIFIC_CUTTING_FORCE],
        |[ap, ae, vf, kc]| ap * ae * vf * kc / (60.0 * 1_000_000.0),
    )
}

/// `fn = fz·Zc`
pub fn feed_per_revolution() -> Result<Formula, FormulaError> {
    Formula::new(
        "fn",
        FEED_PER_REVOLUTION,
        [FEED_PER_TOOTH, EFFECTIVE_CUTTER_TEETH],
        |[fz, zc]| fz * zc,
    )
}

/// `Vf = fn·n`, for when the feed per revolution is known directly.
pub fn table_feed_from_feed_per_revolution() -> Result<Formula, FormulaError> {
    Formula::new(
        "Vf_from_fn",
        TABLE_FEED,
        [FEED_PER_REVOLUTION, SPINDLE_SPEED],
        |[feed_rev, n]| feed_rev * n,
    )
}

/// Average chip thickness for side milling (`ae < Dcap`), angles in degrees:
/// `hm = 360·sin(Kr)·ae·fz / (π·Dcap·acos(1 − 2ae/Dcap))`
pub fn side_milling_chip_thickness() -> Result<Formula, FormulaError> {
    Formula::new(
        "hm_side",
        AVERAGE_CHIP_THICKNESS,
        [ENTERING_ANGLE, WORKING_ENGAGEMENT, FEED_PER_TOOTH, CUTTER_DIAMETER_AT_DEPTH_OF_CUT],
        |[kr, ae, fz, dcap]| {
            let engagement = (1.0 - 2.0 * ae / dcap).acos().to_degrees();
            360.0 * kr.to_radians().sin() * ae * fz / (PI * dcap * engagement)
        },
    )
}

/// Average chip thickness for centred face milling, angles in degrees:
/// `hm = 180·sin(Kr)·ae·fz / (π·Dcap·asin(ae/Dcap))`
///
/// Not part of [`machining_formulas`]: it shares its inputs with the side milling
/// variant, which would always win.
pub fn face_milling_chip_thickness() -> Result<Formula, FormulaError> {
    Formula::new(
        "hm_face",
        AVERAGE_CHIP_THICKNESS,
        [ENTERING_ANGLE, WORKING_ENGAGEMENT, FEED_PER_TOOTH, CUTTER_DIAMETER_AT_DEPTH_OF_CUT],
        |[kr, ae, fz, dcap]| {
            let engagement = (ae / dcap).asin().to_degrees();
            180.0 * kr.to_radians().sin() * ae * fz / (PI * dcap * engagement)
        },
    )
}

/// `Ft = Pc·60000 / Vc`
pub fn tangential_force() -> Result<Formula, FormulaError> {
    Formula::new(
        "Ft",
        TANGENTIAL_FORCE,
        [NET_POWER, CUTTING_SPEED],
        |[pc, vc]| pc * 60_000.0 / vc,
    )
}

/// Solid round section: `I = π·Dcap⁴ / 64`
pub fn cutter_moment_of_inertia() -> Result<Formula, FormulaError> {
    Formula::new(
        "I",
        CUTTER_MOMENT_OF_INERTIA,
        [CUTTER_DIAMETER_AT_DEPTH_OF_CUT],
        |[dcap]| PI * dcap.powi(4) / 64.0,
    )
}

/// Cantilever tip deflection: `F = Ft·T³ / (3·ZE·I)`
pub fn deflection() -> Result<Formula, FormulaError> {
    Formula::new(
        "F",
        DEFLECTION,
        [TANGENTIAL_FORCE, CUTTER_OVERHANG, CUTTER_MATERIAL_ELASTICITY, CUTTER_MOMENT_OF_INERTIA],
        |[ft, overhang, ze, inertia]| ft * overhang.powi(3) / (3.0 * ze * inertia),
    )
}
