//! # hea-rules — Cross-Field Domain Rules
//!
//! Second of the two validation phases: a fixed battery of arithmetic
//! and mutual-exclusion checks the declarative schema cannot express.
//! Every rule assumes a document that already passed the structural
//! pass; the orchestrating entry point enforces that ordering.
//!
//! The rules are independent of one another and all run on every call;
//! nothing fails fast. Each one appends its findings to the shared
//! [`ErrorSurface`], keyed by the data path of the offending field.

use hea_core::ErrorSurface;
use hea_model::BuildingDocument;

pub mod enclosure;
pub mod geometry;
pub mod systems;

pub use geometry::{FootprintModel, MIN_FOOTPRINT};

/// Run the full rule battery against a structurally valid document.
///
/// Pure function of its arguments; `current_year` is injected so tests
/// and replay tooling can pin the calendar.
pub fn cross_validate(
    document: &BuildingDocument,
    current_year: i32,
    surface: &mut ErrorSurface,
) {
    enclosure::check(document, surface);
    systems::check(document, current_year, surface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hea_core::DataPath;
    use hea_model::{About, Hvac, Systems, Wall, WallSide, Zone};

    #[test]
    fn test_rules_from_both_modules_accumulate() {
        let doc = BuildingDocument {
            about: Some(About {
                conditioned_floor_area: Some(2000.0),
                num_floor_above_grade: Some(2),
                year_built: Some(1980),
                ..About::default()
            }),
            zone: Some(Zone {
                zone_wall: vec![
                    Wall {
                        side: Some(WallSide::Back),
                        ..Wall::default()
                    },
                    Wall {
                        side: Some(WallSide::Back),
                        ..Wall::default()
                    },
                ],
                ..Zone::default()
            }),
            systems: Some(Systems {
                hvac: vec![Hvac {
                    hvac_fraction: Some(0.7),
                    ..Hvac::default()
                }],
                ..Systems::default()
            }),
            ..BuildingDocument::default()
        };
        let mut surface = ErrorSurface::new();
        cross_validate(&doc, 2026, &mut surface);
        assert!(surface.at(&DataPath::from("/zone/zone_wall")).is_some());
        assert!(surface
            .at(&DataPath::from("/systems/hvac/0/hvac_fraction"))
            .is_some());
    }

    #[test]
    fn test_empty_document_is_silent() {
        let mut surface = ErrorSurface::new();
        cross_validate(&BuildingDocument::default(), 2026, &mut surface);
        assert!(surface.is_empty());
    }
}
