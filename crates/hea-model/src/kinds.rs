//! # Domain Value Kinds
//!
//! Closed value sets used across the building document. Each enum
//! mirrors the token set the Constraint Schema allows for the field, so
//! deserializing a structurally valid document cannot fail on these.
//!
//! `as_str` returns the wire token; `Display` delegates to it so the
//! cross-field rules can name values in messages without a separate
//! formatting table.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $token:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $token)] $variant,)+
        }

        impl $name {
            /// The wire token for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Why the assessment is being performed.
    AssessmentType {
        Initial => "initial",
        Final => "final",
        Qa => "qa",
        Alternative => "alternative",
        Test => "test",
        Corrected => "corrected",
        Mentor => "mentor",
        Preconstruction => "preconstruction",
    }
}

wire_enum! {
    DwellingUnitType {
        SingleFamilyDetached => "single_family_detached",
        SingleFamilyAttached => "single_family_attached",
        ApartmentUnit => "apartment_unit",
        ManufacturedHome => "manufactured_home",
    }
}

wire_enum! {
    ManufacturedHomeSections {
        SingleWide => "single-wide",
        DoubleWide => "double-wide",
        TripleWide => "triple-wide",
    }
}

wire_enum! {
    /// Compass orientation of the front door.
    Orientation {
        North => "north",
        NorthEast => "north_east",
        East => "east",
        SouthEast => "south_east",
        South => "south",
        SouthWest => "south_west",
        West => "west",
        NorthWest => "north_west",
    }
}

wire_enum! {
    WallSide {
        Front => "front",
        Back => "back",
        Left => "left",
        Right => "right",
    }
}

impl WallSide {
    /// Whether this side runs along the long (5-unit) axis of the
    /// modeled 5:3 footprint.
    pub fn is_long_axis(&self) -> bool {
        matches!(self, Self::Front | Self::Back)
    }
}

wire_enum! {
    RoofType {
        VentedAttic => "vented_attic",
        CathCeiling => "cath_ceiling",
    }
}

wire_enum! {
    RoofColor {
        White => "white",
        Light => "light",
        Medium => "medium",
        MediumDark => "medium_dark",
        Dark => "dark",
        CoolColor => "cool_color",
    }
}

wire_enum! {
    FoundationType {
        SlabOnGrade => "slab_on_grade",
        UncondBasement => "uncond_basement",
        CondBasement => "cond_basement",
        VentedCrawl => "vented_crawl",
        UnventedCrawl => "unvented_crawl",
        AboveOtherUnit => "above_other_unit",
        BellyAndWing => "belly_and_wing",
    }
}

wire_enum! {
    AdjacentTo {
        Outside => "outside",
        OtherUnit => "other_unit",
        OtherHeatedSpace => "other_heated_space",
        OtherMultifamilyBufferSpace => "other_multifamily_buffer_space",
        OtherNonFreezingSpace => "other_non_freezing_space",
    }
}

wire_enum! {
    /// How a window or skylight's thermal properties are specified.
    ConstructionMethod {
        Code => "code",
        Custom => "custom",
    }
}

wire_enum! {
    HeatingType {
        None => "none",
        CentralFurnace => "central_furnace",
        WallFurnace => "wall_furnace",
        Baseboard => "baseboard",
        Boiler => "boiler",
        HeatPump => "heat_pump",
        Gchp => "gchp",
        MiniSplit => "mini_split",
        WoodStove => "wood_stove",
    }
}

wire_enum! {
    HeatingFuel {
        Electric => "electric",
        NaturalGas => "natural_gas",
        Lpg => "lpg",
        FuelOil => "fuel_oil",
        CordWood => "cord_wood",
        PelletWood => "pellet_wood",
    }
}

wire_enum! {
    CoolingType {
        None => "none",
        PackagedDx => "packaged_dx",
        SplitDx => "split_dx",
        HeatPump => "heat_pump",
        Gchp => "gchp",
        Dec => "dec",
        MiniSplit => "mini_split",
    }
}

wire_enum! {
    EfficiencyMethod {
        User => "user",
        ShipmentWeighted => "shipment_weighted",
    }
}

wire_enum! {
    DuctLocation {
        CondSpace => "cond_space",
        UncondAttic => "uncond_attic",
        UncondBasement => "uncond_basement",
        VentedCrawl => "vented_crawl",
        UnventedCrawl => "unvented_crawl",
        UnderSlab => "under_slab",
        ExteriorWall => "exterior_wall",
        Outside => "outside",
    }
}

wire_enum! {
    LeakageMethod {
        Qualitative => "qualitative",
        Quantitative => "quantitative",
    }
}

wire_enum! {
    HotWaterCategory {
        Unit => "unit",
        Combined => "combined",
    }
}

wire_enum! {
    HotWaterType {
        Storage => "storage",
        Indirect => "indirect",
        TanklessCoil => "tankless_coil",
        Tankless => "tankless",
        HeatPump => "heat_pump",
    }
}

wire_enum! {
    HotWaterFuel {
        Electric => "electric",
        NaturalGas => "natural_gas",
        Lpg => "lpg",
        FuelOil => "fuel_oil",
    }
}
