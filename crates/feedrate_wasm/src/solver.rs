//! Resolver entry point.

use crate::tags::{parse_known, parse_requested, KnownValue, TagDescriptor};
use anyhow::Result;
use feedrate_core::{solve_with, Registry, Resolution, ResolverSettings};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ResolvedValue {
    pub tag: TagDescriptor,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SolveOutput {
    pub results: Vec<ResolvedValue>,
    pub all_determined: bool,
    pub passes: usize,
    pub derived: usize,
}

impl From<Resolution> for SolveOutput {
    fn from(resolution: Resolution) -> Self {
        Self {
            results: resolution
                .results
                .into_iter()
                .map(|(tag, value)| ResolvedValue {
                    tag: tag.into(),
                    value,
                })
                .collect(),
            all_determined: resolution.all_determined,
            passes: resolution.stats.passes,
            derived: resolution.stats.derived,
        }
    }
}

pub(crate) fn solve_named(
    known: &[KnownValue],
    requested: &[String],
    max_passes: usize,
) -> Result<SolveOutput> {
    let known = parse_known(known)?;
    let requested = parse_requested(requested)?;
    let resolution = solve_with(
        known,
        &requested,
        Registry::machining_shared(),
        ResolverSettings { max_passes },
    );
    Ok(resolution.into())
}

/// `known`: array of `{ tag, value }`; `requested`: array of tag strings.
/// A `max_passes` of zero selects the default bound.
#[wasm_bindgen]
pub fn solve(known: JsValue, requested: JsValue, max_passes: u32) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let known: Vec<KnownValue> = from_value(known)
        .map_err(|e| JsValue::from_str(&format!("Invalid known values: {}", e)))?;
    let requested: Vec<String> = from_value(requested)
        .map_err(|e| JsValue::from_str(&format!("Invalid requested tags: {}", e)))?;
    let max_passes = match max_passes {
        0 => ResolverSettings::default().max_passes,
        n => n as usize,
    };

    let output = solve_named(&known, &requested, max_passes)
        .map_err(|e| JsValue::from_str(&format!("Solve failed: {}", e)))?;
    to_value(&output).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
