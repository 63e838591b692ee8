//! Machine-limit fitting entry point.

use crate::solver::SolveOutput;
use crate::tags::{parse_known, KnownValue, TagDescriptor};
use anyhow::Result;
use feedrate_core::limits::{self, MachineLimits};
use feedrate_core::{Registry, ResolverSettings};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Serialize)]
struct PinnedValue {
    tag: TagDescriptor,
    value: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MachineFitOutput {
    solution: SolveOutput,
    known: Vec<PinnedValue>,
    adjustments: usize,
    over_torque: bool,
}

fn fit_named(known: &[KnownValue], machine: MachineLimits) -> Result<MachineFitOutput> {
    let known = parse_known(known)?;
    let fit = limits::fit_to_machine(
        known,
        machine,
        Registry::machining_shared(),
        ResolverSettings::default(),
    )?;
    Ok(MachineFitOutput {
        solution: fit.resolution.into(),
        known: fit
            .known
            .into_iter()
            .map(|tv| PinnedValue {
                tag: tv.tag.into(),
                value: tv.value,
            })
            .collect(),
        adjustments: fit.adjustments,
        over_torque: fit.over_torque,
    })
}

/// `limits` may be `undefined` to use the default machine.
#[wasm_bindgen]
pub fn fit_to_machine(known: JsValue, limits: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let known: Vec<KnownValue> = from_value(known)
        .map_err(|e| JsValue::from_str(&format!("Invalid known values: {}", e)))?;
    let machine = if limits.is_undefined() || limits.is_null() {
        MachineLimits::default()
    } else {
        from_value(limits).map_err(|e| JsValue::from_str(&format!("Invalid limits: {}", e)))?
    };

    let output = fit_named(&known, machine)
        .map_err(|e| JsValue::from_str(&format!("Machine fit failed: {}", e)))?;
    to_value(&output).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
