//! Quantity tags.
//!
//! A [`Tag`] names a kind of physical quantity. By convention the 32-bit value packs a
//! four character mnemonic (big-endian, left-padded with spaces), so `"  fz"` is the
//! feed per tooth. The resolver only ever compares tags for equality; the mnemonic is
//! there for humans reading logs.

use crate::tag_names;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    /// Packs four ASCII bytes big-endian.
    pub const fn from_mnemonic(code: &[u8; 4]) -> Self {
        Tag(u32::from_be_bytes(*code))
    }

    /// Parses a 1 to 4 character ASCII mnemonic, padding on the left with spaces.
    ///
    /// `Tag::parse("fz")` is the same tag as `Tag::from_mnemonic(b"  fz")`.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.is_empty() || bytes.len() > 4 || !code.is_ascii() {
            return None;
        }
        let mut packed = [b' '; 4];
        packed[4 - bytes.len()..].copy_from_slice(bytes);
        Some(Tag::from_mnemonic(&packed))
    }

    pub fn mnemonic(&self) -> String {
        self.0
            .to_be_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tag_names::name(*self) {
            Some(name) => f.write_str(name),
            None => f.write_str(self.mnemonic().trim_start()),
        }
    }
}

// Units are documentation only.

/// mm, cutter diameter at the actual depth of cut.
pub const CUTTER_DIAMETER_AT_DEPTH_OF_CUT: Tag = Tag::from_mnemonic(b"Dcap");
/// mm
pub const FEED_PER_TOOTH: Tag = Tag::from_mnemonic(b"  fz");
/// Total number of cutter teeth.
pub const CUTTER_TEETH: Tag = Tag::from_mnemonic(b"  Zn");
/// Number of teeth effectively engaged.
pub const EFFECTIVE_CUTTER_TEETH: Tag = Tag::from_mnemonic(b"  Zc");
/// mm/min
pub const TABLE_FEED: Tag = Tag::from_mnemonic(b"  Vf");
/// mm
pub const FEED_PER_REVOLUTION: Tag = Tag::from_mnemonic(b"  fn");
/// mm
pub const DEPTH_OF_CUT: Tag = Tag::from_mnemonic(b"  ap");
/// m/min
pub const CUTTING_SPEED: Tag = Tag::from_mnemonic(b"  Vc");
/// deg
pub const CHIP_RAKE_ANGLE: Tag = Tag::from_mnemonic(b"  Y0");
/// mm
pub const WORKING_ENGAGEMENT: Tag = Tag::from_mnemonic(b"  ae");
/// rpm
pub const SPINDLE_SPEED: Tag = Tag::from_mnemonic(b"   n");
/// kW
pub const NET_POWER: Tag = Tag::from_mnemonic(b"  Pc");
/// Nm
pub const TORQUE: Tag = Tag::from_mnemonic(b"  Mc");
/// cm3/min
pub const MATERIAL_REMOVAL_RATE: Tag = Tag::from_mnemonic(b"   Q");
/// mm
pub const AVERAGE_CHIP_THICKNESS: Tag = Tag::from_mnemonic(b"  hm");
/// mm
pub const MAX_CHIP_THICKNESS: Tag = Tag::from_mnemonic(b" hex");
/// deg
pub const ENTERING_ANGLE: Tag = Tag::from_mnemonic(b"  Kr");
/// mm, component diameter after machining.
pub const MACHINED_DIAMETER: Tag = Tag::from_mnemonic(b"  Dm");
/// mm
pub const UNMACHINED_DIAMETER: Tag = Tag::from_mnemonic(b"  Dw");
/// mm/min, table feed of the tool at the machined diameter.
pub const TABLE_FEED_AT_MACHINED_DIAMETER: Tag = Tag::from_mnemonic(b" Vfm");
/// N/mm2
pub const SPECIFIC_CUTTING_FORCE: Tag = Tag::from_mnemonic(b"  kc");
/// mm, unsupported cutter length.
pub const CUTTER_OVERHANG: Tag = Tag::from_mnemonic(b"   T");
/// N/mm2
pub const CUTTER_MATERIAL_ELASTICITY: Tag = Tag::from_mnemonic(b"  ZE");
/// mm4, area moment of inertia of the cutter section.
pub const CUTTER_MOMENT_OF_INERTIA: Tag = Tag::from_mnemonic(b"   I");
/// mm
pub const DEFLECTION: Tag = Tag::from_mnemonic(b"   F");
/// N
pub const TANGENTIAL_FORCE: Tag = Tag::from_mnemonic(b"  Ft");
/// mm2, uncut chip cross-sectional area.
pub const CHIP_CROSS_SECTIONAL_AREA: Tag = Tag::from_mnemonic(b"   A");
/// MPa
pub const MATERIAL_TENSILE_STRENGTH: Tag = Tag::from_mnemonic(b" sig");
