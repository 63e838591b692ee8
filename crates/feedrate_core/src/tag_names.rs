//! Human-readable names and units for the tag constants.
//!
//! Only log and display code consults this table.

use crate::tag::{self, Tag};

struct TagInfo {
    tag: Tag,
    name: &'static str,
    unit: &'static str,
}

const TAG_INFO: &[TagInfo] = &[
    TagInfo {
        tag: tag::CUTTER_DIAMETER_AT_DEPTH_OF_CUT,
        name: "CutterDiameterAtDepthOfCut",
        unit: "mm",
    },
    TagInfo {
        tag: tag::FEED_PER_TOOTH,
        name: "FeedPerTooth",
        unit: "mm",
    },
    TagInfo {
        tag: tag::CUTTER_TEETH,
        name: "CutterTeeth",
        unit: "",
    },
    TagInfo {
        tag: tag::EFFECTIVE_CUTTER_TEETH,
        name: "EffectiveCutterTeeth",
        unit: "",
    },
    TagInfo {
        tag: tag::TABLE_FEED,
        name: "TableFeed",
        unit: "mm/min",
    },
    TagInfo {
        tag: tag::FEED_PER_REVOLUTION,
        name: "FeedPerRevolution",
        unit: "mm",
    },
    TagInfo {
        tag: tag::DEPTH_OF_CUT,
        name: "DepthOfCut",
        unit: "mm",
    },
    TagInfo {
        tag: tag::CUTTING_SPEED,
        name: "CuttingSpeed",
        unit: "m/min",
    },
    TagInfo {
        tag: tag::CHIP_RAKE_ANGLE,
        name: "ChipRakeAngle",
        unit: "deg",
    },
    TagInfo {
        tag: tag::WORKING_ENGAGEMENT,
        name: "WorkingEngagement",
        unit: "mm",
    },
    TagInfo {
        tag: tag::SPINDLE_SPEED,
        name: "SpindleSpeed",
        unit: "rpm",
    },
    TagInfo {
        tag: tag::NET_POWER,
        name: "NetPower",
        unit: "kW",
    },
    TagInfo {
        tag: tag::TORQUE,
        name: "Torque",
        unit: "Nm",
    },
    TagInfo {
        tag: tag::MATERIAL_REMOVAL_RATE,
        name: "MaterialRemovalRate",
        unit: "cm3/min",
    },
    TagInfo {
        tag: tag::AVERAGE_CHIP_THICKNESS,
        name: "AverageChipThickness",
        unit: "mm",
    },
    TagInfo {
        tag: tag::MAX_CHIP_THICKNESS,
        name: "MaxChipThickness",
        unit: "mm",
    },
    TagInfo {
        tag: tag::ENTERING_ANGLE,
        name: "EnteringAngle",
        unit: "deg",
    },
    TagInfo {
        tag: tag::MACHINED_DIAMETER,
        name: "MachinedDiameter",
        unit: "mm",
    },
    TagInfo {
        tag: tag::UNMACHINED_DIAMETER,
        name: "UnmachinedDiameter",
        unit: "mm",
    },
    TagInfo {
        tag: tag::TABLE_FEED_AT_MACHINED_DIAMETER,
        name: "TableFeedAtMachinedDiameter",
        unit: "mm/min",
    },
    TagInfo {
        tag: tag::SPECIFIC_CUTTING_FORCE,
        name: "SpecificCuttingForce",
        unit: "N/mm2",
    },
    TagInfo {
        tag: tag::CUTTER_OVERHANG,
        name: "CutterOverhang",
        unit: "mm",
    },
    TagInfo {
        tag: tag::CUTTER_MATERIAL_ELASTICITY,
        name: "CutterMaterialElasticity",
        unit: "N/mm2",
    },
    TagInfo {
        tag: tag::CUTTER_MOMENT_OF_INERTIA,
        name: "CutterMomentOfInertia",
        unit: "mm4",
    },
    TagInfo {
        tag: tag::DEFLECTION,
        name: "Deflection",
        unit: "mm",
    },
    TagInfo {
        tag: tag::TANGENTIAL_FORCE,
        name: "TangentialForce",
        unit: "N",
    },
    TagInfo {
        tag: tag::CHIP_CROSS_SECTIONAL_AREA,
        name: "ChipCrossSectionalArea",
        unit: "mm2",
    },
    TagInfo {
        tag: tag::MATERIAL_TENSILE_STRENGTH,
        name: "MaterialTensileStrength",
        unit: "MPa",
    },
];

pub fn name(tag: Tag) -> Option<&'static str> {
    TAG_INFO.iter().find(|info| info.tag == tag).map(|info| info.name)
}

/// Unit string for a catalogued tag. Dimensionless quantities return `Some("")`.
pub fn unit(tag: Tag) -> Option<&'static str> {
    TAG_INFO.iter().find(|info| info.tag == tag).map(|info| info.unit)
}

/// Reverse lookup by catalog name, e.g. `"SpindleSpeed"`.
pub fn lookup(name: &str) -> Option<Tag> {
    TAG_INFO.iter().find(|info| info.name == name).map(|info| info.tag)
}

/// Every catalogued tag, in table order.
pub fn all() -> impl Iterator<Item = Tag> {
    TAG_INFO.iter().map(|info| info.tag)
}
