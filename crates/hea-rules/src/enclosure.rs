//! # Enclosure Rules
//!
//! Area-consistency and wall checks over the zone section. All of
//! these assume a structurally valid document; fields a rule needs that
//! are legitimately optional simply skip the rule.
//!
//! Everything footprint-relative lives behind [`FootprintModel`]; when
//! the model cannot be derived those rules are skipped wholesale.

use hea_core::{DataPath, ErrorSurface};
use hea_model::{BuildingDocument, Floor, FoundationType, Roof, RoofType, Zone};

use crate::geometry::{floor_area_sum, FootprintModel, MIN_FOOTPRINT};

/// Lower and upper multiples of the footprint that combined roof and
/// floor areas must fall strictly between.
const AREA_RATIO_LOW: f64 = 0.95;
const AREA_RATIO_HIGH: f64 = 2.5;

/// Run every enclosure rule.
pub fn check(document: &BuildingDocument, surface: &mut ErrorSurface) {
    let Some(zone) = document.zone.as_ref() else {
        return;
    };

    check_duplicate_sides(zone, surface);
    check_foundation_insulation(zone, surface);

    let Some(model) = FootprintModel::derive(document) else {
        tracing::debug!("footprint model not derivable; skipping area rules");
        return;
    };

    if !model.is_plausible() {
        surface.add_warning(
            &DataPath::root()
                .child("about")
                .child("conditioned_floor_area"),
            format!("The calculated footprint must be greater than {MIN_FOOTPRINT} square feet"),
        );
    }

    check_window_areas(zone, &model, surface);
    check_area_consistency(zone, &model, surface);
    check_knee_walls(zone, &model, surface);
    check_skylights(zone, &model, surface);
}

/// Each compass side may appear at most once across the wall entries.
fn check_duplicate_sides(zone: &Zone, surface: &mut ErrorSurface) {
    let sides: Vec<_> = zone.zone_wall.iter().filter_map(|w| w.side).collect();
    let mut reported = Vec::new();
    for side in &sides {
        let count = sides.iter().filter(|s| *s == side).count();
        if count > 1 && !reported.contains(side) {
            reported.push(*side);
            surface.add_warning(
                &DataPath::root().child("zone").child("zone_wall"),
                format!("Duplicate wall side '{side}'"),
            );
        }
    }
}

/// A window cannot be larger than the modeled wall that holds it.
fn check_window_areas(zone: &Zone, model: &FootprintModel, surface: &mut ErrorSurface) {
    for (i, wall) in zone.zone_wall.iter().enumerate() {
        let (Some(side), Some(window)) = (wall.side, wall.zone_window.as_ref()) else {
            continue;
        };
        let (Some(window_area), Some(wall_area)) = (window.window_area, model.wall_area(side))
        else {
            continue;
        };
        if floor_area_sum(window_area) > wall_area {
            surface.add_warning(
                &wall_path(i).child("zone_window").child("window_area"),
                format!(
                    "Window area exceeds the modeled {side} wall area of {wall_area} square feet"
                ),
            );
        }
    }
}

/// Roof and floor areas must be mutually consistent and in proportion
/// to the footprint.
///
/// Gate first: if the combined roof and ceiling area does not cover at
/// least 95% of the combined floor area, every roof entry gets a
/// uniform coverage warning and the magnitude comparison is skipped —
/// the magnitudes are meaningless when the shapes disagree.
fn check_area_consistency(zone: &Zone, model: &FootprintModel, surface: &mut ErrorSurface) {
    if zone.zone_roof.is_empty() || zone.zone_floor.is_empty() {
        return;
    }
    let roof_total = floor_area_sum(zone.zone_roof.iter().filter_map(Roof::covering_area).sum());
    let floor_total = floor_area_sum(zone.zone_floor.iter().filter_map(|f| f.floor_area).sum());
    if floor_total <= 0 {
        return;
    }

    if (roof_total as f64) <= AREA_RATIO_LOW * floor_total as f64 {
        for (i, roof) in zone.zone_roof.iter().enumerate() {
            surface.add_warning(
                &covering_area_path(roof, i),
                "The roof does not cover the floor".to_string(),
            );
        }
        return;
    }

    let fp = model.footprint() as f64;
    let low = (AREA_RATIO_LOW * fp).floor() as i64;
    let high = (AREA_RATIO_HIGH * fp).floor() as i64;
    let within = |total: i64| (total as f64) > AREA_RATIO_LOW * fp && (total as f64) < AREA_RATIO_HIGH * fp;

    if !within(roof_total) {
        for (i, roof) in zone.zone_roof.iter().enumerate() {
            surface.add_warning(
                &covering_area_path(roof, i),
                format!("Combined roof and ceiling area must be between {low} and {high} square feet"),
            );
        }
    }
    if !within(floor_total) {
        for (i, _) in zone.zone_floor.iter().enumerate() {
            surface.add_warning(
                &floor_path(i).child("floor_area"),
                format!("Combined floor area must be between {low} and {high} square feet"),
            );
        }
    }
}

/// Knee walls cannot exceed two thirds of the footprint.
fn check_knee_walls(zone: &Zone, model: &FootprintModel, surface: &mut ErrorSurface) {
    let total = floor_area_sum(
        zone.zone_roof
            .iter()
            .filter_map(|r| r.knee_wall.as_ref()?.area)
            .sum(),
    );
    let limit = model.footprint() * 2 / 3;
    if total > limit {
        for (i, roof) in zone.zone_roof.iter().enumerate() {
            if roof.knee_wall.is_some() {
                surface.add_warning(
                    &roof_path(i).child("knee_wall"),
                    format!(
                        "Combined knee wall area must not exceed two thirds of the footprint \
                         ({limit} square feet)"
                    ),
                );
            }
        }
    }
}

/// Skylights cannot exceed the footprint itself.
fn check_skylights(zone: &Zone, model: &FootprintModel, surface: &mut ErrorSurface) {
    let total = floor_area_sum(
        zone.zone_roof
            .iter()
            .filter_map(|r| r.zone_skylight.as_ref()?.skylight_area)
            .sum(),
    );
    let footprint = model.footprint();
    if total > footprint {
        for (i, roof) in zone.zone_roof.iter().enumerate() {
            let has_area = roof
                .zone_skylight
                .as_ref()
                .and_then(|s| s.skylight_area)
                .is_some_and(|a| a > 0.0);
            if has_area {
                surface.add_warning(
                    &roof_path(i).child("zone_skylight").child("skylight_area"),
                    format!(
                        "Combined skylight area must not exceed the footprint \
                         ({footprint} square feet)"
                    ),
                );
            }
        }
    }
}

/// Insulation levels are a narrower set per foundation type than the
/// structural enum can express.
fn check_foundation_insulation(zone: &Zone, surface: &mut ErrorSurface) {
    for (i, floor) in zone.zone_floor.iter().enumerate() {
        let Some(foundation) = floor.foundation_type else {
            continue;
        };
        if matches!(
            foundation,
            FoundationType::AboveOtherUnit | FoundationType::BellyAndWing
        ) {
            continue;
        }
        let (allowed, message): (&[i32], &str) = if foundation == FoundationType::SlabOnGrade {
            (&[0, 5], "Insulation level must be 0 or 5 for a slab on grade")
        } else {
            (
                &[0, 11, 19],
                "Insulation level must be 0, 11, or 19 for this foundation type",
            )
        };
        let valid = floor
            .foundation_insulation_level
            .is_some_and(|level| allowed.contains(&level));
        if !valid {
            surface.add_warning(
                &floor_path(i).child("foundation_insulation_level"),
                message.to_string(),
            );
        }
    }
}

// ─── Path helpers ────────────────────────────────────────────────────

fn roof_path(i: usize) -> DataPath {
    DataPath::root().child("zone").child("zone_roof").child(i)
}

fn floor_path(i: usize) -> DataPath {
    DataPath::root().child("zone").child("zone_floor").child(i)
}

fn wall_path(i: usize) -> DataPath {
    DataPath::root().child("zone").child("zone_wall").child(i)
}

/// The area field a roof entry's coverage warning attaches to.
fn covering_area_path(roof: &Roof, i: usize) -> DataPath {
    let field = match roof.roof_type {
        Some(RoofType::VentedAttic) => "ceiling_area",
        _ => "roof_area",
    };
    roof_path(i).child(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hea_model::{About, KneeWall, Skylight, Wall, WallSide, Window};

    fn base_document() -> BuildingDocument {
        BuildingDocument {
            about: Some(About {
                conditioned_floor_area: Some(2000.0),
                num_floor_above_grade: Some(2),
                floor_to_ceiling_height: Some(8.0),
                ..About::default()
            }),
            zone: Some(Zone::default()),
            ..BuildingDocument::default()
        }
    }

    fn run(doc: &BuildingDocument) -> ErrorSurface {
        let mut surface = ErrorSurface::new();
        check(doc, &mut surface);
        surface
    }

    #[test]
    fn test_duplicate_side_warns_once_per_side() {
        let mut doc = base_document();
        doc.zone.as_mut().unwrap().zone_wall = vec![
            Wall {
                side: Some(WallSide::Front),
                ..Wall::default()
            },
            Wall {
                side: Some(WallSide::Front),
                ..Wall::default()
            },
            Wall {
                side: Some(WallSide::Left),
                ..Wall::default()
            },
        ];
        let surface = run(&doc);
        let entries = surface.at(&DataPath::from("/zone/zone_wall")).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.contains("'front'"));
    }

    #[test]
    fn test_window_larger_than_wall_warns() {
        let mut doc = base_document();
        // Footprint 1000, front wall (40 * 8 - 20) * 2 = 620.
        doc.zone.as_mut().unwrap().zone_wall = vec![Wall {
            side: Some(WallSide::Front),
            zone_window: Some(Window {
                window_area: Some(700.0),
                ..Window::default()
            }),
            ..Wall::default()
        }];
        let surface = run(&doc);
        let entries = surface
            .at(&DataPath::from("/zone/zone_wall/0/zone_window/window_area"))
            .unwrap();
        assert!(entries[0].message.contains("620"));
    }

    #[test]
    fn test_window_within_wall_is_silent() {
        let mut doc = base_document();
        doc.zone.as_mut().unwrap().zone_wall = vec![Wall {
            side: Some(WallSide::Front),
            zone_window: Some(Window {
                window_area: Some(100.0),
                ..Window::default()
            }),
            ..Wall::default()
        }];
        assert!(run(&doc).is_empty());
    }

    #[test]
    fn test_roof_not_covering_floor() {
        let mut doc = base_document();
        let zone = doc.zone.as_mut().unwrap();
        zone.zone_roof = vec![Roof {
            roof_type: Some(RoofType::VentedAttic),
            ceiling_area: Some(400.0),
            ..Roof::default()
        }];
        zone.zone_floor = vec![Floor {
            floor_area: Some(1000.0),
            foundation_type: Some(FoundationType::SlabOnGrade),
            foundation_insulation_level: Some(5),
            ..Floor::default()
        }];
        let surface = run(&doc);
        let entries = surface.at(&DataPath::from("/zone/zone_roof/0/ceiling_area")).unwrap();
        assert_eq!(entries[0].message, "The roof does not cover the floor");
        // Magnitude check is skipped when coverage fails.
        assert!(surface.at(&DataPath::from("/zone/zone_floor/0/floor_area")).is_none());
    }

    #[test]
    fn test_oversized_roof_warns_with_range() {
        let mut doc = base_document();
        let zone = doc.zone.as_mut().unwrap();
        // Footprint 1000: allowed strictly between 950 and 2500.
        zone.zone_roof = vec![Roof {
            roof_type: Some(RoofType::CathCeiling),
            roof_area: Some(3000.0),
            ..Roof::default()
        }];
        zone.zone_floor = vec![Floor {
            floor_area: Some(1000.0),
            foundation_type: Some(FoundationType::SlabOnGrade),
            foundation_insulation_level: Some(0),
            ..Floor::default()
        }];
        let surface = run(&doc);
        let entries = surface.at(&DataPath::from("/zone/zone_roof/0/roof_area")).unwrap();
        assert!(entries[0].message.contains("between 950 and 2500"));
    }

    #[test]
    fn test_consistent_areas_are_silent() {
        let mut doc = base_document();
        let zone = doc.zone.as_mut().unwrap();
        zone.zone_roof = vec![Roof {
            roof_type: Some(RoofType::VentedAttic),
            ceiling_area: Some(1000.0),
            ..Roof::default()
        }];
        zone.zone_floor = vec![Floor {
            floor_area: Some(1000.0),
            foundation_type: Some(FoundationType::SlabOnGrade),
            foundation_insulation_level: Some(0),
            ..Floor::default()
        }];
        assert!(run(&doc).is_empty());
    }

    #[test]
    fn test_knee_wall_limit() {
        let mut doc = base_document();
        let zone = doc.zone.as_mut().unwrap();
        // Footprint 1000; limit 666.
        zone.zone_roof = vec![Roof {
            roof_type: Some(RoofType::VentedAttic),
            knee_wall: Some(KneeWall {
                area: Some(700.0),
                ..KneeWall::default()
            }),
            ..Roof::default()
        }];
        let surface = run(&doc);
        let entries = surface.at(&DataPath::from("/zone/zone_roof/0/knee_wall")).unwrap();
        assert!(entries[0].message.contains("666"));
    }

    #[test]
    fn test_skylight_limit() {
        let mut doc = base_document();
        let zone = doc.zone.as_mut().unwrap();
        zone.zone_roof = vec![Roof {
            roof_type: Some(RoofType::VentedAttic),
            zone_skylight: Some(Skylight {
                skylight_area: Some(1100.0),
                ..Skylight::default()
            }),
            ..Roof::default()
        }];
        let surface = run(&doc);
        assert!(surface
            .at(&DataPath::from("/zone/zone_roof/0/zone_skylight/skylight_area"))
            .is_some());
    }

    #[test]
    fn test_slab_insulation_levels() {
        let mut doc = base_document();
        doc.zone.as_mut().unwrap().zone_floor = vec![Floor {
            foundation_type: Some(FoundationType::SlabOnGrade),
            foundation_insulation_level: Some(11),
            floor_area: Some(1000.0),
            ..Floor::default()
        }];
        let surface = run(&doc);
        let entries = surface
            .at(&DataPath::from("/zone/zone_floor/0/foundation_insulation_level"))
            .unwrap();
        assert!(entries[0].message.contains("0 or 5"));
    }

    #[test]
    fn test_above_other_unit_needs_no_insulation_level() {
        let mut doc = base_document();
        doc.zone.as_mut().unwrap().zone_floor = vec![Floor {
            foundation_type: Some(FoundationType::AboveOtherUnit),
            floor_area: Some(1000.0),
            ..Floor::default()
        }];
        assert!(run(&doc)
            .at(&DataPath::from("/zone/zone_floor/0/foundation_insulation_level"))
            .is_none());
    }

    #[test]
    fn test_small_footprint_warns() {
        let mut doc = base_document();
        doc.about.as_mut().unwrap().conditioned_floor_area = Some(260.0);
        doc.about.as_mut().unwrap().num_floor_above_grade = Some(2);
        let surface = run(&doc);
        assert!(surface.at(&DataPath::from("/about/conditioned_floor_area")).is_some());
    }
}
