//! # hea-model — Typed Building Document
//!
//! The serde model of a home energy audit document, consumed by the
//! cross-field rules after the structural pass has vouched for the
//! document's shape. All fields are optional so partial documents
//! (address-only validation, legacy translation) deserialize cleanly.

pub mod document;
pub mod kinds;

pub use document::{
    About, Address, BuildingDocument, Cooling, Distribution, Duct, Floor, Generation, Heating,
    HotWater, Hvac, KneeWall, Roof, Skylight, SolarElectric, Systems, Wall, Window, Zone,
};
pub use kinds::{
    AdjacentTo, AssessmentType, ConstructionMethod, CoolingType, DuctLocation, DwellingUnitType,
    EfficiencyMethod, FoundationType, HeatingFuel, HeatingType, HotWaterCategory, HotWaterFuel,
    HotWaterType, LeakageMethod, ManufacturedHomeSections, Orientation, RoofColor, RoofType,
    WallSide,
};
