//! # Building Document
//!
//! The typed shape the cross-field rules walk. Every field is optional:
//! the structural pass guarantees the fields a rule needs are present
//! before the rule runs, and partial documents (address-only
//! validation, legacy translation) deserialize without loss.
//!
//! Field names match the wire format one-to-one so data paths computed
//! by the rules line up with the paths the structural pass reports.

use serde::{Deserialize, Serialize};

use crate::kinds::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<About>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systems: Option<Systems>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_building_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_type: Option<AssessmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dwelling_unit_type: Option<DwellingUnitType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufactured_home_sections: Option<ManufacturedHomeSections>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_floor_above_grade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_to_ceiling_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditioned_floor_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blower_door_test: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_sealing_present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_leakage: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Zone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_construction_same: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_construction_same: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_roof: Vec<Roof>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_floor: Vec<Floor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_wall: Vec<Wall>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roof {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_type: Option<RoofType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_assembly_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_assembly_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_color: Option<RoofColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_absorptance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee_wall: Option<KneeWall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_skylight: Option<Skylight>,
}

impl Roof {
    /// The area the roof contributes to coverage checks: ceiling area
    /// for vented attics, roof area for cathedral ceilings.
    pub fn covering_area(&self) -> Option<f64> {
        match self.roof_type? {
            RoofType::VentedAttic => self.ceiling_area,
            RoofType::CathCeiling => self.roof_area,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KneeWall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skylight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylight_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylight_method: Option<ConstructionMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylight_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylight_u_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skylight_shgc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_screen: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Floor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundation_type: Option<FoundationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foundation_insulation_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_assembly_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<WallSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_assembly_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjacent_to: Option<AdjacentTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_window: Option<Window>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Window {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_method: Option<ConstructionMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_u_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_shgc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_screen: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Systems {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hvac: Vec<Hvac>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domestic_hot_water: Option<HotWater>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<Generation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hvac {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<Heating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling: Option<Cooling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvac_distribution: Option<Distribution>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Heating {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_primary: Option<HeatingFuel>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HeatingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_method: Option<EfficiencyMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cooling {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CoolingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_method: Option<EfficiencyMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leakage_method: Option<LeakageMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leakage_to_outside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sealed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duct: Vec<Duct>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Duct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DuctLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulated: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotWater {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<HotWaterCategory>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HotWaterType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_primary: Option<HotWaterFuel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_method: Option<EfficiencyMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_electric: Option<SolarElectric>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolarElectric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_known: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_panels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_document_deserializes() {
        let doc: BuildingDocument = serde_json::from_value(json!({
            "about": {"year_built": 1980, "blower_door_test": false}
        }))
        .unwrap();
        let about = doc.about.unwrap();
        assert_eq!(about.year_built, Some(1980));
        assert_eq!(about.blower_door_test, Some(false));
        assert!(doc.zone.is_none());
    }

    #[test]
    fn test_heating_type_field_renamed() {
        let heating: Heating = serde_json::from_value(json!({
            "type": "central_furnace", "fuel_primary": "natural_gas"
        }))
        .unwrap();
        assert_eq!(heating.kind, Some(HeatingType::CentralFurnace));
        let round = serde_json::to_value(&heating).unwrap();
        assert_eq!(round["type"], json!("central_furnace"));
    }

    #[test]
    fn test_covering_area_by_roof_type() {
        let roof = Roof {
            roof_type: Some(RoofType::VentedAttic),
            roof_area: Some(900.0),
            ceiling_area: Some(700.0),
            ..Roof::default()
        };
        assert_eq!(roof.covering_area(), Some(700.0));
        let roof = Roof {
            roof_type: Some(RoofType::CathCeiling),
            ..roof
        };
        assert_eq!(roof.covering_area(), Some(900.0));
    }

    #[test]
    fn test_absent_arrays_default_empty() {
        let zone: Zone = serde_json::from_value(json!({})).unwrap();
        assert!(zone.zone_wall.is_empty());
        assert!(zone.zone_roof.is_empty());
    }

    #[test]
    fn test_none_fields_omitted_on_serialize() {
        let doc = BuildingDocument::default();
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({}));
    }
}
