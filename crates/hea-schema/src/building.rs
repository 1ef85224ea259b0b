//! # Building Document Schema
//!
//! The declarative Constraint Schema for a home energy audit document.
//! This module is data, not logic: every field's type, bounds, enum
//! values, and conditional requirements live here, annotated with the
//! rule-specific messages the resolver prefers over generic templates.
//!
//! The two historical building shapes share this one definition; the
//! [`SchemaVersion`] tag only switches the wall-cardinality rules
//! (see [`wall_array`]).
//!
//! Sections mirror the document: `address`, `about` (assessment
//! metadata and geometry), `zone` (enclosure), `systems` (HVAC,
//! domestic hot water, solar generation).

use crate::compile::SchemaVersion;
use crate::matcher::MatchPattern;
use crate::node::ConstraintNode;

/// Compass sides a wall may face.
pub const WALL_SIDES: [&str; 4] = ["front", "back", "left", "right"];

/// Static lower bounds for equipment year fields. The cross-field pass
/// raises these by `year_built - 2` and caps them at the current year.
pub const HEATING_YEAR_MIN: i32 = 1970;
pub const COOLING_YEAR_MIN: i32 = 1970;
pub const HOT_WATER_YEAR_MIN: i32 = 1972;
pub const SOLAR_YEAR_MIN: i32 = 2000;

/// Build the root constraint node for one schema version.
pub fn building_document(version: SchemaVersion) -> ConstraintNode {
    ConstraintNode::object()
        .require(["address", "about", "zone", "systems"])
        .prop("address", address())
        .prop("about", about())
        .prop("zone", zone(version))
        .prop("systems", systems())
        .closed()
}

// ─── Address ─────────────────────────────────────────────────────────

fn address() -> ConstraintNode {
    ConstraintNode::object()
        .require(["address", "city", "state", "zip_code"])
        .prop("address", ConstraintNode::string().pattern(r"\S"))
        .prop("address2", ConstraintNode::string())
        .prop("city", ConstraintNode::string().pattern(r"\S"))
        .prop("state", ConstraintNode::string().pattern(r"^[A-Z]{2}$"))
        .prop("zip_code", ConstraintNode::string().pattern(r"^[0-9]{5}$"))
        .prop("external_building_id", ConstraintNode::string())
        .closed()
}

// ─── About (assessment metadata and geometry) ────────────────────────

fn about() -> ConstraintNode {
    ConstraintNode::object()
        .require([
            "assessment_type",
            "assessment_date",
            "dwelling_unit_type",
            "year_built",
            "number_bedrooms",
            "num_floor_above_grade",
            "floor_to_ceiling_height",
            "conditioned_floor_area",
            "orientation",
            "blower_door_test",
        ])
        .prop(
            "assessment_type",
            ConstraintNode::string().enum_of([
                "initial",
                "final",
                "qa",
                "alternative",
                "test",
                "corrected",
                "mentor",
                "preconstruction",
            ]),
        )
        .prop("assessment_date", ConstraintNode::string().format_date())
        .prop("comments", ConstraintNode::string())
        .prop(
            "dwelling_unit_type",
            ConstraintNode::string().enum_of([
                "single_family_detached",
                "single_family_attached",
                "apartment_unit",
                "manufactured_home",
            ]),
        )
        .prop(
            "manufactured_home_sections",
            ConstraintNode::string().enum_of(["single-wide", "double-wide", "triple-wide"]),
        )
        .when_msg(
            MatchPattern::value("dwelling_unit_type", "manufactured_home"),
            ConstraintNode::any().require(["manufactured_home_sections"]),
            "Manufactured home section is required for manufactured homes",
        )
        .prop(
            "year_built",
            ConstraintNode::integer().minimum(1600.0).maximum(2100.0),
        )
        .prop(
            "number_bedrooms",
            ConstraintNode::integer().minimum(1.0).maximum(10.0),
        )
        .prop(
            "num_floor_above_grade",
            ConstraintNode::integer().minimum(1.0).maximum(4.0),
        )
        .prop(
            "floor_to_ceiling_height",
            ConstraintNode::number().minimum(6.0).maximum(12.0),
        )
        .prop(
            "conditioned_floor_area",
            ConstraintNode::number().minimum(250.0).maximum(25000.0),
        )
        .prop(
            "orientation",
            ConstraintNode::string().enum_of([
                "north",
                "north_east",
                "east",
                "south_east",
                "south",
                "south_west",
                "west",
                "north_west",
            ]),
        )
        .prop("blower_door_test", ConstraintNode::boolean())
        .prop("air_sealing_present", ConstraintNode::boolean())
        .prop(
            "envelope_leakage",
            ConstraintNode::number().minimum(0.0).maximum(25000.0),
        )
        .when_else(
            MatchPattern::value("blower_door_test", true),
            ConstraintNode::any().require(["envelope_leakage"]),
            ConstraintNode::any().require(["air_sealing_present"]),
            "Envelope leakage is required when a blower door test was performed; \
             otherwise indicate whether air sealing is present",
        )
        .closed()
}

// ─── Zone (enclosure) ────────────────────────────────────────────────

fn zone(version: SchemaVersion) -> ConstraintNode {
    ConstraintNode::object()
        .require(["zone_roof", "zone_floor", "zone_wall"])
        .prop("wall_construction_same", ConstraintNode::boolean())
        .prop("window_construction_same", ConstraintNode::boolean())
        .prop("zone_roof", ConstraintNode::array().length(1, 2).items(roof()))
        .prop(
            "zone_floor",
            ConstraintNode::array().length(1, 2).items(floor()),
        )
        .prop("zone_wall", wall_array(version))
        .closed()
}

fn roof() -> ConstraintNode {
    ConstraintNode::object()
        .require(["roof_name", "roof_type"])
        .prop("roof_name", ConstraintNode::string().enum_of(["roof1", "roof2"]))
        .prop(
            "roof_type",
            ConstraintNode::string().enum_msg(
                ["vented_attic", "cath_ceiling"],
                "Roof type must be a vented attic or a cathedral ceiling",
            ),
        )
        .prop(
            "roof_area",
            ConstraintNode::number().minimum(4.0).maximum(25000.0),
        )
        .prop(
            "ceiling_area",
            ConstraintNode::number().minimum(4.0).maximum(25000.0),
        )
        .prop(
            "roof_assembly_code",
            ConstraintNode::string().pattern(r"^rf[a-z]{2}[0-9]{2}[a-z]{2}$"),
        )
        .prop(
            "ceiling_assembly_code",
            ConstraintNode::string().pattern(r"^ec[a-z]{2}[0-9]{2}$"),
        )
        .prop(
            "roof_color",
            ConstraintNode::string().enum_of([
                "white",
                "light",
                "medium",
                "medium_dark",
                "dark",
                "cool_color",
            ]),
        )
        .prop(
            "roof_absorptance",
            ConstraintNode::number().minimum(0.0).maximum(1.0),
        )
        .when_msg(
            MatchPattern::value("roof_color", "cool_color"),
            ConstraintNode::any().require(["roof_absorptance"]),
            "Absorptance is required when the roof color is cool",
        )
        .when_msg(
            MatchPattern::value("roof_type", "vented_attic"),
            ConstraintNode::any().require(["ceiling_area", "ceiling_assembly_code"]),
            "Ceiling area and ceiling assembly code are required for vented attics",
        )
        .when_msg(
            MatchPattern::value("roof_type", "cath_ceiling"),
            ConstraintNode::any().require(["roof_area", "roof_assembly_code"]),
            "Roof area and roof assembly code are required for cathedral ceilings",
        )
        .prop("knee_wall", knee_wall())
        .when(
            MatchPattern::value("roof_type", "cath_ceiling"),
            ConstraintNode::any().not(
                ConstraintNode::any().require(["knee_wall"]),
                "Knee walls are only allowed on vented attic roofs",
            ),
        )
        .prop("zone_skylight", skylight())
        .closed()
}

fn knee_wall() -> ConstraintNode {
    ConstraintNode::object()
        .require(["area", "assembly_code"])
        .prop("area", ConstraintNode::number().minimum(4.0).maximum(5000.0))
        .prop(
            "assembly_code",
            ConstraintNode::string().pattern(r"^kw[a-z]{2}[0-9]{2}$"),
        )
        .closed()
}

fn skylight() -> ConstraintNode {
    ConstraintNode::object()
        .require(["skylight_area"])
        .prop(
            "skylight_area",
            ConstraintNode::number().minimum(0.0).maximum(300.0),
        )
        .prop(
            "skylight_method",
            ConstraintNode::string().enum_of(["code", "custom"]),
        )
        .prop(
            "skylight_code",
            ConstraintNode::string().pattern(r"^[sd]c[a-z]{2}$"),
        )
        .prop(
            "skylight_u_value",
            ConstraintNode::number().minimum(0.01).maximum(5.0),
        )
        .prop(
            "skylight_shgc",
            ConstraintNode::number()
                .exclusive_minimum(0.0)
                .exclusive_maximum(1.0),
        )
        .prop("solar_screen", ConstraintNode::boolean())
        .when_msg(
            MatchPattern::field(
                "skylight_area",
                MatchPattern::Not(Box::new(MatchPattern::Equals(0.into()))),
            ),
            ConstraintNode::any().require(["skylight_method"]),
            "Skylight construction method is required when a skylight area is entered",
        )
        .when_msg(
            MatchPattern::value("skylight_method", "code"),
            ConstraintNode::any().require(["skylight_code"]),
            "Skylight code is required when using the code construction method",
        )
        .when_msg(
            MatchPattern::value("skylight_method", "custom"),
            ConstraintNode::any().require(["skylight_u_value", "skylight_shgc"]),
            "U-value and SHGC are required for custom skylights",
        )
        .closed()
}

fn floor() -> ConstraintNode {
    ConstraintNode::object()
        .require(["floor_name", "floor_area", "foundation_type"])
        .prop("floor_name", ConstraintNode::string().enum_of(["floor1", "floor2"]))
        .prop(
            "floor_area",
            ConstraintNode::number().minimum(4.0).maximum(25000.0),
        )
        .prop(
            "foundation_type",
            ConstraintNode::string().enum_of([
                "slab_on_grade",
                "uncond_basement",
                "cond_basement",
                "vented_crawl",
                "unvented_crawl",
                "above_other_unit",
                "belly_and_wing",
            ]),
        )
        .prop(
            "foundation_insulation_level",
            ConstraintNode::integer().enum_msg(
                [0, 5, 11, 19],
                "Foundation insulation level must be one of the standard levels",
            ),
        )
        .prop(
            "floor_assembly_code",
            ConstraintNode::string().pattern(r"^ef[a-z]{2}[0-9]{2}$"),
        )
        .when_msg(
            MatchPattern::field(
                "foundation_type",
                MatchPattern::Not(Box::new(MatchPattern::AnyOf(vec![
                    "above_other_unit".into(),
                    "belly_and_wing".into(),
                ]))),
            ),
            ConstraintNode::any().require(["foundation_insulation_level"]),
            "Foundation insulation level is required for this foundation type",
        )
        .when_msg(
            MatchPattern::field(
                "foundation_type",
                MatchPattern::Not(Box::new(MatchPattern::Equals("above_other_unit".into()))),
            ),
            ConstraintNode::any().require(["floor_assembly_code"]),
            "Floor assembly code is required for this foundation type",
        )
        .closed()
}

/// The wall array is the one place the two schema versions differ.
///
/// V1 requires exactly four walls, one per compass side, enforced with
/// a `contains` rule per side. V2 accepts only the sides actually
/// present (one to four walls) and forbids identical entries.
fn wall_array(version: SchemaVersion) -> ConstraintNode {
    match version {
        SchemaVersion::V1 => {
            let mut node = ConstraintNode::array().length(4, 4).items(wall());
            for side in WALL_SIDES {
                node = node.contains(
                    ConstraintNode::object()
                        .prop("side", ConstraintNode::string().const_value(side)),
                    format!("Walls must include one '{side}' side"),
                );
            }
            node
        }
        SchemaVersion::V2 => ConstraintNode::array().length(1, 4).unique().items(wall()),
    }
}

fn wall() -> ConstraintNode {
    ConstraintNode::object()
        .require(["side"])
        .prop("side", ConstraintNode::string().enum_of(WALL_SIDES))
        .prop(
            "wall_assembly_code",
            ConstraintNode::string().pattern(r"^(ew|iw)[a-z]{2}[0-9]{2}[a-z]{2}$"),
        )
        .prop(
            "adjacent_to",
            ConstraintNode::string().enum_of([
                "outside",
                "other_unit",
                "other_heated_space",
                "other_multifamily_buffer_space",
                "other_non_freezing_space",
            ]),
        )
        .when_else(
            MatchPattern::one_of("adjacent_to", ["other_unit", "other_heated_space"]),
            ConstraintNode::any(),
            ConstraintNode::any().require(["wall_assembly_code"]),
            "Wall assembly code is required for exterior walls",
        )
        .prop("zone_window", window())
        .closed()
}

fn window() -> ConstraintNode {
    ConstraintNode::object()
        .require(["window_area"])
        .prop(
            "window_area",
            ConstraintNode::number().minimum(0.0).maximum(1000.0),
        )
        .prop(
            "window_method",
            ConstraintNode::string().enum_of(["code", "custom"]),
        )
        .prop("window_code", ConstraintNode::string().pattern(r"^[a-z]{4}$"))
        .prop(
            "window_u_value",
            ConstraintNode::number().minimum(0.01).maximum(5.0),
        )
        .prop(
            "window_shgc",
            ConstraintNode::number()
                .exclusive_minimum(0.0)
                .exclusive_maximum(1.0),
        )
        .prop("solar_screen", ConstraintNode::boolean())
        .when_msg(
            MatchPattern::field(
                "window_area",
                MatchPattern::Not(Box::new(MatchPattern::Equals(0.into()))),
            ),
            ConstraintNode::any().require(["window_method"]),
            "Window construction method is required when a window area is entered",
        )
        .when_msg(
            MatchPattern::value("window_method", "code"),
            ConstraintNode::any().require(["window_code"]),
            "Window code is required when using the code construction method",
        )
        .when_msg(
            MatchPattern::value("window_method", "custom"),
            ConstraintNode::any().require(["window_u_value", "window_shgc"]),
            "U-value and SHGC are required for custom windows",
        )
        .closed()
}

// ─── Systems ─────────────────────────────────────────────────────────

fn systems() -> ConstraintNode {
    ConstraintNode::object()
        .require(["hvac", "domestic_hot_water"])
        .prop("hvac", ConstraintNode::array().length(1, 2).items(hvac()))
        .prop("domestic_hot_water", hot_water())
        .prop(
            "generation",
            ConstraintNode::object()
                .prop("solar_electric", solar_electric())
                .closed(),
        )
        .closed()
}

fn hvac() -> ConstraintNode {
    ConstraintNode::object()
        .require(["hvac_name", "hvac_fraction"])
        .prop("hvac_name", ConstraintNode::string().enum_of(["hvac1", "hvac2"]))
        .prop(
            "hvac_fraction",
            ConstraintNode::number().minimum(0.0).maximum(1.0),
        )
        .prop("heating", heating())
        .prop("cooling", cooling())
        .prop("hvac_distribution", distribution())
        .closed()
}

fn heating() -> ConstraintNode {
    ConstraintNode::object()
        .prop(
            "fuel_primary",
            ConstraintNode::string().enum_of([
                "electric",
                "natural_gas",
                "lpg",
                "fuel_oil",
                "cord_wood",
                "pellet_wood",
            ]),
        )
        .prop(
            "type",
            ConstraintNode::string().enum_of([
                "none",
                "central_furnace",
                "wall_furnace",
                "baseboard",
                "boiler",
                "heat_pump",
                "gchp",
                "mini_split",
                "wood_stove",
            ]),
        )
        .prop(
            "efficiency_method",
            ConstraintNode::string().enum_of(["user", "shipment_weighted"]),
        )
        .prop(
            "efficiency",
            ConstraintNode::number().minimum(0.1).maximum(20.0),
        )
        .prop(
            "year",
            ConstraintNode::integer()
                .minimum(HEATING_YEAR_MIN as f64)
                .maximum(2100.0),
        )
        .when_msg(
            MatchPattern::field(
                "type",
                MatchPattern::Not(Box::new(MatchPattern::Equals("none".into()))),
            ),
            ConstraintNode::any().require(["fuel_primary"]),
            "Heating fuel is required when a heating type is present",
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "user"),
            ConstraintNode::any().require(["efficiency"]),
            "A user-entered heating efficiency is required",
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "shipment_weighted"),
            ConstraintNode::any().require(["year"]),
            "Equipment year is required for shipment-weighted heating efficiency",
        )
        .closed()
}

fn cooling() -> ConstraintNode {
    ConstraintNode::object()
        .prop(
            "type",
            ConstraintNode::string().enum_of([
                "none",
                "packaged_dx",
                "split_dx",
                "heat_pump",
                "gchp",
                "dec",
                "mini_split",
            ]),
        )
        .prop(
            "efficiency_method",
            ConstraintNode::string().enum_of(["user", "shipment_weighted"]),
        )
        .prop(
            "efficiency",
            ConstraintNode::number().minimum(8.0).maximum(40.0),
        )
        .prop(
            "year",
            ConstraintNode::integer()
                .minimum(COOLING_YEAR_MIN as f64)
                .maximum(2100.0),
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "user"),
            ConstraintNode::any().require(["efficiency"]),
            "A user-entered cooling efficiency is required",
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "shipment_weighted"),
            ConstraintNode::any().require(["year"]),
            "Equipment year is required for shipment-weighted cooling efficiency",
        )
        .closed()
}

fn distribution() -> ConstraintNode {
    ConstraintNode::object()
        .prop(
            "leakage_method",
            ConstraintNode::string().enum_of(["qualitative", "quantitative"]),
        )
        .prop(
            "leakage_to_outside",
            ConstraintNode::number().minimum(0.0).maximum(1000.0),
        )
        .prop("sealed", ConstraintNode::boolean())
        .prop("duct", ConstraintNode::array().length(1, 3).items(duct()))
        .when_else(
            MatchPattern::value("leakage_method", "quantitative"),
            ConstraintNode::any().require(["leakage_to_outside"]),
            ConstraintNode::any().require(["sealed"]),
            "Measured leakage is required for the quantitative method; \
             otherwise indicate whether the ducts are sealed",
        )
        .closed()
}

fn duct() -> ConstraintNode {
    ConstraintNode::object()
        .require(["name", "location", "fraction"])
        .prop(
            "name",
            ConstraintNode::string().enum_of(["duct1", "duct2", "duct3"]),
        )
        .prop(
            "location",
            ConstraintNode::string().enum_of([
                "cond_space",
                "uncond_attic",
                "uncond_basement",
                "vented_crawl",
                "unvented_crawl",
                "under_slab",
                "exterior_wall",
                "outside",
            ]),
        )
        .prop("fraction", ConstraintNode::number().minimum(0.0).maximum(1.0))
        .prop("insulated", ConstraintNode::boolean())
        .closed()
}

fn hot_water() -> ConstraintNode {
    ConstraintNode::object()
        .require(["category"])
        .prop("category", ConstraintNode::string().enum_of(["unit", "combined"]))
        .prop(
            "type",
            ConstraintNode::string().enum_of([
                "storage",
                "indirect",
                "tankless_coil",
                "tankless",
                "heat_pump",
            ]),
        )
        .prop(
            "fuel_primary",
            ConstraintNode::string().enum_of(["electric", "natural_gas", "lpg", "fuel_oil"]),
        )
        .prop(
            "efficiency_method",
            ConstraintNode::string().enum_of(["user", "shipment_weighted"]),
        )
        .prop(
            "energy_factor",
            ConstraintNode::number().minimum(0.1).maximum(4.0),
        )
        .prop(
            "year",
            ConstraintNode::integer()
                .minimum(HOT_WATER_YEAR_MIN as f64)
                .maximum(2100.0),
        )
        .when_msg(
            MatchPattern::value("category", "unit"),
            ConstraintNode::any().require(["type"]),
            "Hot water type is required for unit systems",
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "user"),
            ConstraintNode::any().require(["energy_factor"]),
            "An energy factor is required for user-entered hot water efficiency",
        )
        .when_msg(
            MatchPattern::value("efficiency_method", "shipment_weighted"),
            ConstraintNode::any().require(["year"]),
            "Equipment year is required for shipment-weighted hot water efficiency",
        )
        .closed()
}

fn solar_electric() -> ConstraintNode {
    ConstraintNode::object()
        .prop("capacity_known", ConstraintNode::boolean())
        .prop(
            "system_capacity",
            ConstraintNode::number().minimum(0.05).maximum(100.0),
        )
        .prop(
            "num_panels",
            ConstraintNode::integer().minimum(1.0).maximum(100.0),
        )
        .prop(
            "year",
            ConstraintNode::integer()
                .minimum(SOLAR_YEAR_MIN as f64)
                .maximum(2100.0),
        )
        .one_of(
            [
                ConstraintNode::any().require(["system_capacity"]),
                ConstraintNode::any().require(["num_panels"]),
            ],
            "Provide either a system capacity or a number of panels, not both",
        )
        .closed()
}
