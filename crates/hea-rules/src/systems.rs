//! # Mechanical Systems Rules
//!
//! Equipment compatibility, fraction sums, and year bounds over the
//! systems section. Soft rules (fraction sums, fuel and type pairings,
//! efficiency-method applicability) warn; hard rules (year bounds,
//! leakage conflicts, hot water category/fuel validity) error.

use hea_core::{DataPath, ErrorSurface};
use hea_model::{
    BuildingDocument, Cooling, CoolingType, Distribution, EfficiencyMethod, Heating, HeatingFuel,
    HeatingType, HotWater, HotWaterFuel, HotWaterType, Hvac, LeakageMethod, SolarElectric,
};

/// Static floors for equipment year fields. The structural pass
/// enforces the same values as absolute bounds; here they combine with
/// the building's own age.
pub const HEATING_YEAR_FLOOR: i32 = 1970;
pub const COOLING_YEAR_FLOOR: i32 = 1970;
pub const HOT_WATER_YEAR_FLOOR: i32 = 1972;
pub const SOLAR_YEAR_FLOOR: i32 = 2000;

/// Run every systems rule.
///
/// `current_year` is passed in rather than read from a clock so the
/// rules stay a pure function of their arguments.
pub fn check(document: &BuildingDocument, current_year: i32, surface: &mut ErrorSurface) {
    let Some(systems) = document.systems.as_ref() else {
        return;
    };
    let year_built = document.about.as_ref().and_then(|a| a.year_built);

    check_hvac_fractions(&systems.hvac, surface);
    for (i, hvac) in systems.hvac.iter().enumerate() {
        if let Some(heating) = hvac.heating.as_ref() {
            let cooling_kind = hvac.cooling.as_ref().and_then(|c| c.kind);
            check_heating(heating, cooling_kind, i, surface);
            check_year(
                heating.year,
                HEATING_YEAR_FLOOR,
                year_built,
                current_year,
                &hvac_path(i).child("heating").child("year"),
                surface,
            );
        }
        if let Some(cooling) = hvac.cooling.as_ref() {
            check_cooling(cooling, i, surface);
            check_year(
                cooling.year,
                COOLING_YEAR_FLOOR,
                year_built,
                current_year,
                &hvac_path(i).child("cooling").child("year"),
                surface,
            );
        }
        if let Some(distribution) = hvac.hvac_distribution.as_ref() {
            check_distribution(distribution, i, surface);
        }
    }

    if let Some(hot_water) = systems.domestic_hot_water.as_ref() {
        check_hot_water(hot_water, &systems.hvac, surface);
        check_year(
            hot_water.year,
            HOT_WATER_YEAR_FLOOR,
            year_built,
            current_year,
            &DataPath::root()
                .child("systems")
                .child("domestic_hot_water")
                .child("year"),
            surface,
        );
    }

    if let Some(solar) = systems
        .generation
        .as_ref()
        .and_then(|g| g.solar_electric.as_ref())
    {
        check_solar(solar, year_built, current_year, surface);
    }
}

/// The fractions of conditioned space served must total exactly 100%.
fn check_hvac_fractions(entries: &[Hvac], surface: &mut ErrorSurface) {
    let fractions: Vec<f64> = entries.iter().filter_map(|h| h.hvac_fraction).collect();
    if fractions.is_empty() {
        return;
    }
    if fractions.iter().sum::<f64>() != 1.0 {
        for (i, hvac) in entries.iter().enumerate() {
            if hvac.hvac_fraction.is_some_and(|f| f != 0.0) {
                surface.add_warning(
                    &hvac_path(i).child("hvac_fraction"),
                    "Total HVAC fraction must equal 100%",
                );
            }
        }
    }
}

/// Heating types each fuel can drive.
fn allowed_heating_types(fuel: HeatingFuel) -> &'static [HeatingType] {
    match fuel {
        HeatingFuel::Electric => &[
            HeatingType::CentralFurnace,
            HeatingType::HeatPump,
            HeatingType::MiniSplit,
            HeatingType::Gchp,
            HeatingType::Baseboard,
            HeatingType::Boiler,
        ],
        HeatingFuel::NaturalGas | HeatingFuel::Lpg | HeatingFuel::FuelOil => &[
            HeatingType::CentralFurnace,
            HeatingType::WallFurnace,
            HeatingType::Boiler,
        ],
        HeatingFuel::CordWood | HeatingFuel::PelletWood => &[HeatingType::WoodStove],
    }
}

fn check_heating(
    heating: &Heating,
    cooling_kind: Option<CoolingType>,
    i: usize,
    surface: &mut ErrorSurface,
) {
    let path = hvac_path(i).child("heating");

    if let (Some(fuel), Some(kind)) = (heating.fuel_primary, heating.kind) {
        if kind != HeatingType::None && !allowed_heating_types(fuel).contains(&kind) {
            surface.add_warning(
                &path.child("fuel_primary"),
                format!("'{fuel}' is not a valid fuel for heating type '{kind}'"),
            );
        }
    }

    if let (Some(kind), Some(cooling)) = (heating.kind, cooling_kind) {
        if !heating_compatible_with_cooling(kind, cooling) {
            surface.add_warning(
                &path.child("type"),
                format!("Heating type '{kind}' is not compatible with cooling type '{cooling}'"),
            );
        }
    }

    check_heating_efficiency_method(heating, &path, surface);
}

/// Compatibility matrix keyed by cooling type.
///
/// A heat pump or ground-coupled heat pump serves both sides of the
/// system, so the heating entry must be the same unit, a wood stove, or
/// nothing. Conventional compressors cannot share a unit with any heat
/// pump heating.
fn heating_compatible_with_cooling(heating: HeatingType, cooling: CoolingType) -> bool {
    match cooling {
        CoolingType::HeatPump => matches!(
            heating,
            HeatingType::HeatPump | HeatingType::WoodStove | HeatingType::None
        ),
        CoolingType::Gchp => matches!(
            heating,
            HeatingType::Gchp | HeatingType::WoodStove | HeatingType::None
        ),
        CoolingType::MiniSplit => !matches!(heating, HeatingType::HeatPump | HeatingType::Gchp),
        CoolingType::SplitDx => !matches!(
            heating,
            HeatingType::HeatPump | HeatingType::Gchp | HeatingType::MiniSplit
        ),
        CoolingType::Dec => heating != HeatingType::Gchp,
        CoolingType::PackagedDx | CoolingType::None => true,
    }
}

/// Some heating configurations have a fixed or nameplate-free
/// efficiency, so no method applies; others cannot be looked up by
/// shipment year and demand a user-entered value.
fn check_heating_efficiency_method(heating: &Heating, path: &DataPath, surface: &mut ErrorSurface) {
    let Some(method) = heating.efficiency_method else {
        return;
    };
    let method_path = path.child("efficiency_method");

    let fixed_efficiency = match heating.kind {
        None | Some(HeatingType::None | HeatingType::Baseboard | HeatingType::WoodStove) => true,
        Some(HeatingType::CentralFurnace) => heating.fuel_primary == Some(HeatingFuel::Electric),
        _ => false,
    };
    if fixed_efficiency {
        surface.add_warning(
            &method_path,
            "Efficiency method should not be set for this heating configuration",
        );
        return;
    }

    if method == EfficiencyMethod::ShipmentWeighted {
        let no_lookup = matches!(
            heating.kind,
            Some(HeatingType::MiniSplit | HeatingType::Gchp)
        ) || (heating.kind == Some(HeatingType::WallFurnace)
            && heating.fuel_primary != Some(HeatingFuel::NaturalGas));
        if no_lookup {
            surface.add_warning(
                &method_path,
                "Efficiency must be entered directly for this heating configuration",
            );
        }
    }
}

fn check_cooling(cooling: &Cooling, i: usize, surface: &mut ErrorSurface) {
    let Some(method) = cooling.efficiency_method else {
        return;
    };
    let method_path = hvac_path(i).child("cooling").child("efficiency_method");

    match cooling.kind {
        None | Some(CoolingType::None | CoolingType::Dec) => {
            surface.add_warning(
                &method_path,
                "Efficiency method should not be set for this cooling configuration",
            );
        }
        Some(CoolingType::MiniSplit | CoolingType::Gchp)
            if method == EfficiencyMethod::ShipmentWeighted =>
        {
            surface.add_warning(
                &method_path,
                "Efficiency must be entered directly for this cooling configuration",
            );
        }
        _ => {}
    }
}

fn check_distribution(distribution: &Distribution, i: usize, surface: &mut ErrorSurface) {
    let path = hvac_path(i).child("hvac_distribution");

    if distribution.leakage_method == Some(LeakageMethod::Qualitative)
        && distribution.leakage_to_outside.is_some()
    {
        surface.add_error(
            &path.child("leakage_to_outside"),
            "Measured leakage should not be entered for a qualitative assessment",
        );
    }

    let fractions: Vec<f64> = distribution.duct.iter().filter_map(|d| d.fraction).collect();
    if !fractions.is_empty() && fractions.iter().sum::<f64>() != 1.0 {
        for (j, duct) in distribution.duct.iter().enumerate() {
            if duct.fraction.is_some_and(|f| f != 0.0) {
                surface.add_warning(
                    &path.child("duct").child(j).child("fraction"),
                    "Total duct fraction must equal 100%",
                );
            }
        }
    }
}

fn check_hot_water(hot_water: &HotWater, hvac: &[Hvac], surface: &mut ErrorSurface) {
    let path = DataPath::root().child("systems").child("domestic_hot_water");

    if hot_water.category == Some(hea_model::HotWaterCategory::Combined) {
        let has_boiler = hvac.iter().any(|h| {
            h.heating
                .as_ref()
                .is_some_and(|heating| heating.kind == Some(HeatingType::Boiler))
        });
        if !has_boiler {
            surface.add_error(
                &path.child("category"),
                "A combined hot water system requires a boiler for heating",
            );
        }
    }

    match hot_water.kind {
        Some(HotWaterType::TanklessCoil | HotWaterType::Indirect) => {
            if hot_water.fuel_primary.is_some() {
                surface.add_error(
                    &path.child("fuel_primary"),
                    "Fuel is not used by this hot water type",
                );
            }
        }
        Some(HotWaterType::HeatPump) => {
            if hot_water
                .fuel_primary
                .is_some_and(|f| f != HotWaterFuel::Electric)
            {
                surface.add_error(
                    &path.child("fuel_primary"),
                    "A heat pump water heater must use electric fuel",
                );
            }
        }
        _ => {}
    }

    if hot_water.efficiency_method == Some(EfficiencyMethod::ShipmentWeighted)
        && matches!(
            hot_water.kind,
            Some(HotWaterType::HeatPump | HotWaterType::Tankless | HotWaterType::TanklessCoil)
        )
    {
        surface.add_error(
            &path.child("efficiency_method"),
            "Shipment-weighted efficiency is not available for this hot water type",
        );
    }
}

fn check_solar(
    solar: &SolarElectric,
    year_built: Option<i32>,
    current_year: i32,
    surface: &mut ErrorSurface,
) {
    check_year(
        solar.year,
        SOLAR_YEAR_FLOOR,
        year_built,
        current_year,
        &DataPath::root()
            .child("systems")
            .child("generation")
            .child("solar_electric")
            .child("year"),
        surface,
    );
}

/// Equipment cannot predate the building by more than two years and
/// cannot postdate the calendar.
fn check_year(
    year: Option<i32>,
    static_floor: i32,
    year_built: Option<i32>,
    current_year: i32,
    path: &DataPath,
    surface: &mut ErrorSurface,
) {
    let Some(year) = year else {
        return;
    };
    let min = match year_built {
        Some(built) => static_floor.max(built - 2),
        None => static_floor,
    };
    if year < min || year > current_year {
        surface.add_error(
            path,
            format!("Invalid year: must be between {min} and {current_year}"),
        );
    }
}

fn hvac_path(i: usize) -> DataPath {
    DataPath::root().child("systems").child("hvac").child(i)
}
