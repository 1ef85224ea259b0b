//! # Flat-Field Translation
//!
//! The legacy form format is a flat key/value map with positional
//! suffixes: `roof_type_1`, `wall_assembly_code_front`,
//! `duct_location_1_2`. This module maps it to the nested building
//! document and maps error paths back to flat keys.
//!
//! Every mapping is an explicit lookup table. Suffixes are enumerated,
//! never synthesized by string interpolation from unchecked input, so a
//! typo in a table entry fails tests instead of silently dropping a
//! field.

use serde_json::{json, Map, Value};

use hea_core::{DataPath, PathSegment};

/// Wall suffixes in the order translated walls are emitted.
const WALL_SUFFIXES: [&str; 4] = ["front", "back", "left", "right"];

const ROOF_COUNT: usize = 2;
const FLOOR_COUNT: usize = 2;
const HVAC_COUNT: usize = 2;
const DUCT_COUNT: usize = 3;

/// Top-level scalar fields: flat key → nested location.
const ADDRESS_FIELDS: [&str; 6] = [
    "address",
    "address2",
    "city",
    "state",
    "zip_code",
    "external_building_id",
];

const ABOUT_FIELDS: [&str; 14] = [
    "assessment_type",
    "assessment_date",
    "comments",
    "dwelling_unit_type",
    "manufactured_home_sections",
    "year_built",
    "number_bedrooms",
    "num_floor_above_grade",
    "floor_to_ceiling_height",
    "conditioned_floor_area",
    "orientation",
    "blower_door_test",
    "air_sealing_present",
    "envelope_leakage",
];

/// Roof fields indexed `_1`/`_2`, at the roof entry itself.
const ROOF_FIELDS: [&str; 7] = [
    "roof_type",
    "roof_area",
    "ceiling_area",
    "roof_assembly_code",
    "ceiling_assembly_code",
    "roof_color",
    "roof_absorptance",
];

/// Skylight fields indexed `_1`/`_2`, nested under `zone_skylight`.
const SKYLIGHT_FIELDS: [&str; 6] = [
    "skylight_area",
    "skylight_method",
    "skylight_code",
    "skylight_u_value",
    "skylight_shgc",
    "solar_screen",
];

const FLOOR_FIELDS: [&str; 4] = [
    "floor_area",
    "foundation_type",
    "foundation_insulation_level",
    "floor_assembly_code",
];

/// Wall fields suffixed by side, at the wall entry itself.
const WALL_FIELDS: [&str; 2] = ["wall_assembly_code", "adjacent_to"];

/// Window fields suffixed by side, nested under `zone_window`.
const WINDOW_FIELDS: [&str; 5] = [
    "window_area",
    "window_method",
    "window_code",
    "window_u_value",
    "window_shgc",
];

/// Heating and cooling fields: flat prefix → nested field name.
const EQUIPMENT_FIELDS: [(&str, &str); 5] = [
    ("type", "type"),
    ("fuel", "fuel_primary"),
    ("efficiency_method", "efficiency_method"),
    ("efficiency", "efficiency"),
    ("year", "year"),
];

/// Distribution fields indexed per system.
const DISTRIBUTION_FIELDS: [(&str, &str); 3] = [
    ("duct_leakage_method", "leakage_method"),
    ("duct_leakage", "leakage_to_outside"),
    ("duct_sealed", "sealed"),
];

/// Duct fields indexed `_{system}_{duct}`.
const DUCT_FIELDS: [&str; 3] = ["location", "fraction", "insulated"];

/// Hot water fields: flat key → nested field name.
const HOT_WATER_FIELDS: [(&str, &str); 6] = [
    ("hot_water_category", "category"),
    ("hot_water_type", "type"),
    ("hot_water_fuel", "fuel_primary"),
    ("hot_water_efficiency_method", "efficiency_method"),
    ("hot_water_energy_factor", "energy_factor"),
    ("hot_water_year", "year"),
];

const SOLAR_FIELDS: [(&str, &str); 4] = [
    ("solar_capacity_known", "capacity_known"),
    ("solar_system_capacity", "system_capacity"),
    ("solar_num_panels", "num_panels"),
    ("solar_year", "year"),
];

/// Translate a flat legacy map into a nested building document.
///
/// Entry names the flat format never carries (`roof_name`, `side`,
/// `hvac_name`, duct `name`) are defaulted from position, so a complete
/// flat submission translates to a document with no spurious
/// missing-field findings.
pub fn to_document(flat: &Map<String, Value>) -> Value {
    // Sections always exist so a sparse form yields field-level
    // missing-value paths instead of one finding per absent section.
    let mut doc = json!({"address": {}, "about": {}, "zone": {}, "systems": {}});

    for key in ADDRESS_FIELDS {
        copy_scalar(flat, key, &mut doc, &["address", key]);
    }
    for key in ABOUT_FIELDS {
        copy_scalar(flat, key, &mut doc, &["about", key]);
    }

    let roofs = translate_roofs(flat);
    if !roofs.is_empty() {
        set(&mut doc, &["zone", "zone_roof"], Value::Array(roofs));
    }
    let floors = translate_floors(flat);
    if !floors.is_empty() {
        set(&mut doc, &["zone", "zone_floor"], Value::Array(floors));
    }
    let walls = translate_walls(flat);
    if !walls.is_empty() {
        set(&mut doc, &["zone", "zone_wall"], Value::Array(walls));
    }

    let hvac = translate_hvac(flat);
    if !hvac.is_empty() {
        set(&mut doc, &["systems", "hvac"], Value::Array(hvac));
    }
    for (flat_key, field) in HOT_WATER_FIELDS {
        copy_scalar(flat, flat_key, &mut doc, &["systems", "domestic_hot_water", field]);
    }
    for (flat_key, field) in SOLAR_FIELDS {
        copy_scalar(
            flat,
            flat_key,
            &mut doc,
            &["systems", "generation", "solar_electric", field],
        );
    }

    doc
}

fn translate_roofs(flat: &Map<String, Value>) -> Vec<Value> {
    let mut roofs = Vec::new();
    for n in 1..=ROOF_COUNT {
        let mut roof = Map::new();
        for field in ROOF_FIELDS {
            if let Some(value) = flat.get(&format!("{field}_{n}")) {
                roof.insert(field.to_string(), value.clone());
            }
        }
        let mut knee_wall = Map::new();
        for (flat_field, field) in [("knee_wall_area", "area"), ("knee_wall_assembly_code", "assembly_code")] {
            if let Some(value) = flat.get(&format!("{flat_field}_{n}")) {
                knee_wall.insert(field.to_string(), value.clone());
            }
        }
        if !knee_wall.is_empty() {
            roof.insert("knee_wall".to_string(), Value::Object(knee_wall));
        }
        let mut skylight = Map::new();
        for field in SKYLIGHT_FIELDS {
            if let Some(value) = flat.get(&format!("{field}_{n}")) {
                skylight.insert(field.to_string(), value.clone());
            }
        }
        if !skylight.is_empty() {
            roof.insert("zone_skylight".to_string(), Value::Object(skylight));
        }
        if !roof.is_empty() {
            roof.insert("roof_name".to_string(), json!(format!("roof{n}")));
            roofs.push(Value::Object(roof));
        }
    }
    roofs
}

fn translate_floors(flat: &Map<String, Value>) -> Vec<Value> {
    let mut floors = Vec::new();
    for n in 1..=FLOOR_COUNT {
        let mut floor = Map::new();
        for field in FLOOR_FIELDS {
            if let Some(value) = flat.get(&format!("{field}_{n}")) {
                floor.insert(field.to_string(), value.clone());
            }
        }
        if !floor.is_empty() {
            floor.insert("floor_name".to_string(), json!(format!("floor{n}")));
            floors.push(Value::Object(floor));
        }
    }
    floors
}

fn translate_walls(flat: &Map<String, Value>) -> Vec<Value> {
    let mut walls = Vec::new();
    for side in WALL_SUFFIXES {
        let mut wall = Map::new();
        for field in WALL_FIELDS {
            if let Some(value) = flat.get(&format!("{field}_{side}")) {
                wall.insert(field.to_string(), value.clone());
            }
        }
        let mut window = Map::new();
        for field in WINDOW_FIELDS {
            if let Some(value) = flat.get(&format!("{field}_{side}")) {
                window.insert(field.to_string(), value.clone());
            }
        }
        if !window.is_empty() {
            wall.insert("zone_window".to_string(), Value::Object(window));
        }
        if !wall.is_empty() {
            wall.insert("side".to_string(), json!(side));
            walls.push(Value::Object(wall));
        }
    }
    walls
}

fn translate_hvac(flat: &Map<String, Value>) -> Vec<Value> {
    let mut entries = Vec::new();
    for n in 1..=HVAC_COUNT {
        let mut hvac = Map::new();
        if let Some(value) = flat.get(&format!("hvac_fraction_{n}")) {
            hvac.insert("hvac_fraction".to_string(), value.clone());
        }
        for unit in ["heating", "cooling"] {
            let mut equipment = Map::new();
            for (flat_field, field) in EQUIPMENT_FIELDS {
                if let Some(value) = flat.get(&format!("{unit}_{flat_field}_{n}")) {
                    equipment.insert(field.to_string(), value.clone());
                }
            }
            if !equipment.is_empty() {
                hvac.insert(unit.to_string(), Value::Object(equipment));
            }
        }

        let mut distribution = Map::new();
        for (flat_field, field) in DISTRIBUTION_FIELDS {
            if let Some(value) = flat.get(&format!("{flat_field}_{n}")) {
                distribution.insert(field.to_string(), value.clone());
            }
        }
        let mut ducts = Vec::new();
        for d in 1..=DUCT_COUNT {
            let mut duct = Map::new();
            for field in DUCT_FIELDS {
                if let Some(value) = flat.get(&format!("duct_{field}_{n}_{d}")) {
                    duct.insert(field.to_string(), value.clone());
                }
            }
            if !duct.is_empty() {
                duct.insert("name".to_string(), json!(format!("duct{d}")));
                ducts.push(Value::Object(duct));
            }
        }
        if !ducts.is_empty() {
            distribution.insert("duct".to_string(), Value::Array(ducts));
        }
        if !distribution.is_empty() {
            hvac.insert("hvac_distribution".to_string(), Value::Object(distribution));
        }

        if !hvac.is_empty() {
            hvac.insert("hvac_name".to_string(), json!(format!("hvac{n}")));
            entries.push(Value::Object(hvac));
        }
    }
    entries
}

/// Map a nested error path back to the flat key legacy consumers know.
///
/// Translation compacts sparse positional entries, so an array index
/// alone does not identify the source suffix. Every positional entry
/// carries its suffix in its injected name (`roof2`, `hvac1`, `duct3`),
/// and walls carry theirs in `side`; the inverse mapping reads those
/// back out of the translated document. Paths with no flat counterpart
/// return `None` and are dropped from the legacy buckets.
pub fn flat_key(path: &DataPath, document: &Value) -> Option<String> {
    use PathSegment::Key;

    let segments = path.segments();
    match segments {
        [Key(section), Key(field)] if section == "address" || section == "about" => {
            Some(field.clone())
        }
        [Key(zone), Key(collection), rest @ ..] if zone == "zone" => match collection.as_str() {
            "zone_roof" => roof_flat_key(rest, document),
            "zone_floor" => floor_flat_key(rest, document),
            "zone_wall" => wall_flat_key(rest, document),
            _ => None,
        },
        [Key(systems), rest @ ..] if systems == "systems" => systems_flat_key(rest, document),
        _ => None,
    }
}

/// Recover a source suffix from an entry's injected name.
fn entry_number(document: &Value, name_pointer: &str, prefix: &str) -> Option<usize> {
    document
        .pointer(name_pointer)?
        .as_str()?
        .strip_prefix(prefix)?
        .parse()
        .ok()
}

fn roof_flat_key(rest: &[PathSegment], document: &Value) -> Option<String> {
    use PathSegment::{Index, Key};
    let Index(i) = rest.first()? else {
        return None;
    };
    let n = entry_number(document, &format!("/zone/zone_roof/{i}/roof_name"), "roof")?;
    match &rest[1..] {
        [Key(nested), Key(field)] if nested == "knee_wall" => {
            Some(format!("knee_wall_{field}_{n}"))
        }
        [Key(nested)] if nested == "knee_wall" => Some(format!("knee_wall_area_{n}")),
        [Key(nested), Key(field)] if nested == "zone_skylight" => Some(format!("{field}_{n}")),
        [Key(field)] => Some(format!("{field}_{n}")),
        _ => None,
    }
}

fn floor_flat_key(rest: &[PathSegment], document: &Value) -> Option<String> {
    use PathSegment::{Index, Key};
    match rest {
        [Index(i), Key(field)] => {
            let n = entry_number(
                document,
                &format!("/zone/zone_floor/{i}/floor_name"),
                "floor",
            )?;
            Some(format!("{field}_{n}"))
        }
        _ => None,
    }
}

fn wall_flat_key(rest: &[PathSegment], document: &Value) -> Option<String> {
    use PathSegment::{Index, Key};
    // Warnings addressed to the array itself (duplicate sides).
    if rest.is_empty() {
        return Some("zone_wall".to_string());
    }
    let Index(i) = rest.first()? else {
        return None;
    };
    let side = document
        .pointer(&format!("/zone/zone_wall/{i}/side"))?
        .as_str()?
        .to_string();
    match &rest[1..] {
        [Key(field)] if field == "side" => Some(format!("wall_side_{side}")),
        [Key(field)] => Some(format!("{field}_{side}")),
        [Key(nested), Key(field)] if nested == "zone_window" => Some(format!("{field}_{side}")),
        _ => None,
    }
}

fn systems_flat_key(rest: &[PathSegment], document: &Value) -> Option<String> {
    use PathSegment::{Index, Key};
    match rest {
        [Key(hvac), Index(i), rest @ ..] if hvac == "hvac" => {
            let n = entry_number(document, &format!("/systems/hvac/{i}/hvac_name"), "hvac")?;
            match rest {
                [Key(field)] if field == "hvac_fraction" => Some(format!("hvac_fraction_{n}")),
                [Key(unit), Key(field)] if unit == "heating" || unit == "cooling" => {
                    let flat_field = EQUIPMENT_FIELDS
                        .iter()
                        .find(|(_, nested)| nested == field)?
                        .0;
                    Some(format!("{unit}_{flat_field}_{n}"))
                }
                [Key(dist), Key(field)] if dist == "hvac_distribution" => {
                    let flat_field = DISTRIBUTION_FIELDS
                        .iter()
                        .find(|(_, nested)| nested == field)?
                        .0;
                    Some(format!("{flat_field}_{n}"))
                }
                [Key(dist), Key(duct), Index(d), Key(field)]
                    if dist == "hvac_distribution" && duct == "duct" =>
                {
                    let m = entry_number(
                        document,
                        &format!("/systems/hvac/{i}/hvac_distribution/duct/{d}/name"),
                        "duct",
                    )?;
                    Some(format!("duct_{field}_{n}_{m}"))
                }
                _ => None,
            }
        }
        [Key(dhw), Key(field)] if dhw == "domestic_hot_water" => HOT_WATER_FIELDS
            .iter()
            .find(|(_, nested)| nested == field)
            .map(|(flat, _)| (*flat).to_string()),
        [Key(gen), Key(solar), Key(field)]
            if gen == "generation" && solar == "solar_electric" =>
        {
            SOLAR_FIELDS
                .iter()
                .find(|(_, nested)| nested == field)
                .map(|(flat, _)| (*flat).to_string())
        }
        _ => None,
    }
}

// ─── Nested insertion helpers ────────────────────────────────────────

fn copy_scalar(flat: &Map<String, Value>, key: &str, doc: &mut Value, at: &[&str]) {
    if let Some(value) = flat.get(key) {
        set(doc, at, value.clone());
    }
}

fn set(doc: &mut Value, at: &[&str], value: Value) {
    let mut node = doc;
    for key in &at[..at.len() - 1] {
        let Some(obj) = node.as_object_mut() else {
            return;
        };
        node = obj.entry(key.to_string()).or_insert_with(|| json!({}));
    }
    if let Some(obj) = node.as_object_mut() {
        obj.insert(at[at.len() - 1].to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_scalars_land_in_sections() {
        let doc = to_document(&flat(&[
            ("address", json!("12 Oak St")),
            ("year_built", json!(1980)),
            ("hot_water_type", json!("storage")),
        ]));
        assert_eq!(doc["address"]["address"], json!("12 Oak St"));
        assert_eq!(doc["about"]["year_built"], json!(1980));
        assert_eq!(doc["systems"]["domestic_hot_water"]["type"], json!("storage"));
    }

    #[test]
    fn test_positional_roofs_get_default_names() {
        let doc = to_document(&flat(&[
            ("roof_type_1", json!("vented_attic")),
            ("ceiling_area_1", json!(1000)),
            ("roof_type_2", json!("cath_ceiling")),
        ]));
        let roofs = doc["zone"]["zone_roof"].as_array().unwrap();
        assert_eq!(roofs.len(), 2);
        assert_eq!(roofs[0]["roof_name"], json!("roof1"));
        assert_eq!(roofs[0]["ceiling_area"], json!(1000));
        assert_eq!(roofs[1]["roof_name"], json!("roof2"));
    }

    #[test]
    fn test_side_suffixed_walls() {
        let doc = to_document(&flat(&[
            ("wall_assembly_code_front", json!("ewwf00wo")),
            ("window_area_front", json!(40)),
            ("wall_assembly_code_left", json!("ewwf00wo")),
        ]));
        let walls = doc["zone"]["zone_wall"].as_array().unwrap();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0]["side"], json!("front"));
        assert_eq!(walls[0]["zone_window"]["window_area"], json!(40));
        assert_eq!(walls[1]["side"], json!("left"));
    }

    #[test]
    fn test_equipment_and_duct_suffixes() {
        let doc = to_document(&flat(&[
            ("hvac_fraction_1", json!(1.0)),
            ("heating_type_1", json!("central_furnace")),
            ("heating_fuel_1", json!("natural_gas")),
            ("duct_location_1_2", json!("cond_space")),
            ("duct_fraction_1_2", json!(1.0)),
        ]));
        let hvac = &doc["systems"]["hvac"][0];
        assert_eq!(hvac["hvac_name"], json!("hvac1"));
        assert_eq!(hvac["heating"]["type"], json!("central_furnace"));
        assert_eq!(hvac["heating"]["fuel_primary"], json!("natural_gas"));
        let duct = &hvac["hvac_distribution"]["duct"][0];
        assert_eq!(duct["location"], json!("cond_space"));
        // Compacted to index 0, but the name keeps the source position.
        assert_eq!(duct["name"], json!("duct2"));
    }

    #[test]
    fn test_flat_key_round_trips_suffixes() {
        let doc = to_document(&flat(&[
            ("roof_type_1", json!("vented_attic")),
            ("roof_area_2", json!(500)),
            ("wall_assembly_code_back", json!("ewwf00wo")),
            ("window_area_back", json!(40)),
            ("hvac_fraction_1", json!(1.0)),
            ("heating_fuel_1", json!("natural_gas")),
            ("duct_location_1_1", json!("cond_space")),
            ("duct_fraction_1_2", json!(0.5)),
        ]));
        assert_eq!(
            flat_key(&DataPath::from("/about/year_built"), &doc).as_deref(),
            Some("year_built")
        );
        assert_eq!(
            flat_key(&DataPath::from("/zone/zone_roof/1/roof_area"), &doc).as_deref(),
            Some("roof_area_2")
        );
        assert_eq!(
            flat_key(&DataPath::from("/zone/zone_wall/0/wall_assembly_code"), &doc).as_deref(),
            Some("wall_assembly_code_back")
        );
        assert_eq!(
            flat_key(
                &DataPath::from("/zone/zone_wall/0/zone_window/window_area"),
                &doc
            )
            .as_deref(),
            Some("window_area_back")
        );
        assert_eq!(
            flat_key(&DataPath::from("/systems/hvac/0/heating/fuel_primary"), &doc).as_deref(),
            Some("heating_fuel_1")
        );
        assert_eq!(
            flat_key(
                &DataPath::from("/systems/hvac/0/hvac_distribution/duct/1/fraction"),
                &doc
            )
            .as_deref(),
            Some("duct_fraction_1_2")
        );
        assert_eq!(
            flat_key(&DataPath::from("/systems/domestic_hot_water/fuel_primary"), &doc).as_deref(),
            Some("hot_water_fuel")
        );
    }

    #[test]
    fn test_sparse_positions_keep_their_source_suffixes() {
        // Entries before a gap are absent; the translated arrays
        // compact, and the inverse mapping must follow the names, not
        // the indices.
        let doc = to_document(&flat(&[
            ("roof_type_2", json!("vented_attic")),
            ("duct_location_1_2", json!("cond_space")),
            ("duct_fraction_1_2", json!(0.5)),
            ("duct_location_1_3", json!("uncond_attic")),
            ("duct_fraction_1_3", json!(0.3)),
        ]));
        assert_eq!(doc["zone"]["zone_roof"][0]["roof_name"], json!("roof2"));
        assert_eq!(
            flat_key(&DataPath::from("/zone/zone_roof/0/roof_type"), &doc).as_deref(),
            Some("roof_type_2")
        );
        assert_eq!(
            flat_key(
                &DataPath::from("/systems/hvac/0/hvac_distribution/duct/0/fraction"),
                &doc
            )
            .as_deref(),
            Some("duct_fraction_1_2")
        );
        assert_eq!(
            flat_key(
                &DataPath::from("/systems/hvac/0/hvac_distribution/duct/1/fraction"),
                &doc
            )
            .as_deref(),
            Some("duct_fraction_1_3")
        );
    }

    #[test]
    fn test_unmapped_path_is_dropped() {
        let doc = json!({});
        assert_eq!(flat_key(&DataPath::from("/unknown/path"), &doc), None);
    }
}
