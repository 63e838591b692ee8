//! Tag parsing and catalog listing.

use anyhow::{anyhow, Result};
use feedrate_core::{tag_names, Tag};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// A known value as sent from JavaScript.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct KnownValue {
    pub tag: String,
    pub value: f64,
}

/// A tag as sent back to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct TagDescriptor {
    pub mnemonic: String,
    pub name: Option<&'static str>,
    pub unit: Option<&'static str>,
}

impl From<Tag> for TagDescriptor {
    fn from(tag: Tag) -> Self {
        Self {
            mnemonic: tag.mnemonic().trim_start().to_string(),
            name: tag_names::name(tag),
            unit: tag_names::unit(tag),
        }
    }
}

/// Catalog names take precedence over mnemonics.
pub(crate) fn parse_tag(text: &str) -> Result<Tag> {
    tag_names::lookup(text)
        .or_else(|| Tag::parse(text))
        .ok_or_else(|| anyhow!("Unknown tag `{}`.", text))
}

pub(crate) fn parse_known(known: &[KnownValue]) -> Result<Vec<(Tag, f64)>> {
    known
        .iter()
        .map(|kv| Ok((parse_tag(&kv.tag)?, kv.value)))
        .collect()
}

pub(crate) fn parse_requested(requested: &[String]) -> Result<Vec<Tag>> {
    requested.iter().map(|text| parse_tag(text)).collect()
}

#[wasm_bindgen]
pub fn tag_name(mnemonic: &str) -> Option<String> {
    Tag::parse(mnemonic)
        .and_then(tag_names::name)
        .map(str::to_string)
}

#[wasm_bindgen]
pub fn tag_mnemonics() -> Result<JsValue, JsValue> {
    let tags: Vec<TagDescriptor> = tag_names::all().map(TagDescriptor::from).collect();
    to_value(&tags).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedrate_core::tag::{SPINDLE_SPEED, TORQUE};

    #[test]
    fn parse_tag_accepts_names_and_mnemonics() {
        assert_eq!(parse_tag("SpindleSpeed").expect("name"), SPINDLE_SPEED);
        assert_eq!(parse_tag("n").expect("mnemonic"), SPINDLE_SPEED);
        assert_eq!(parse_tag("Mc").expect("mnemonic"), TORQUE);
    }

    #[test]
    fn parse_tag_rejects_garbage() {
        let err = parse_tag("NotATagName").expect_err("long unknown text should fail");
        assert!(err.to_string().contains("Unknown tag"));
    }

    #[test]
    fn tag_name_resolves_mnemonics() {
        assert_eq!(tag_name("Pc").as_deref(), Some("NetPower"));
        assert_eq!(tag_name("zz"), None);
    }

    #[test]
    fn descriptor_trims_padding() {
        let descriptor = TagDescriptor::from(SPINDLE_SPEED);
        assert_eq!(descriptor.mnemonic, "n");
        assert_eq!(descriptor.name, Some("SpindleSpeed"));
        assert_eq!(descriptor.unit, Some("rpm"));
    }
}
