//! # Footprint Geometry Model
//!
//! Derived quantities every area-consistency rule compares against.
//!
//! The building is modeled as a rectangle with a 5:3 aspect ratio:
//! the footprint is the conditioned floor area, minus any conditioned
//! basement, averaged over the above-grade stories. Front and back
//! walls run along the long (5-unit) axis, left and right along the
//! short axis. Front and back walls lose a fixed 20 square feet to the
//! door and fixed openings.
//!
//! Area sums are floored to whole square feet before any comparison,
//! matching the truncation policy used throughout the rules.

use hea_model::{BuildingDocument, FoundationType, WallSide};

/// Smallest footprint the model accepts, in square feet.
pub const MIN_FOOTPRINT: i64 = 250;

/// Door and fixed-opening deduction applied to front and back walls.
const OPENING_DEDUCTION: f64 = 20.0;

/// Floor a summed area to whole square feet.
pub fn floor_area_sum(sum: f64) -> i64 {
    sum.floor() as i64
}

/// The derived rectangle model for one document.
#[derive(Debug, Clone, Copy)]
pub struct FootprintModel {
    footprint: i64,
    stories: u32,
    ceiling_height: Option<f64>,
}

impl FootprintModel {
    /// Derive the model from a structurally valid document.
    ///
    /// Returns `None` when the inputs the model needs (conditioned
    /// floor area, above-grade story count) are absent, in which case
    /// every footprint-relative rule is skipped.
    pub fn derive(document: &BuildingDocument) -> Option<Self> {
        let about = document.about.as_ref()?;
        let cfa = about.conditioned_floor_area?;
        let stories = about.num_floor_above_grade.filter(|s| *s > 0)?;

        let basement: f64 = document
            .zone
            .iter()
            .flat_map(|z| &z.zone_floor)
            .filter(|f| f.foundation_type == Some(FoundationType::CondBasement))
            .filter_map(|f| f.floor_area)
            .sum();

        let footprint = ((cfa - basement) / f64::from(stories)).floor() as i64;
        Some(Self {
            footprint,
            stories,
            ceiling_height: about.floor_to_ceiling_height,
        })
    }

    /// Above-grade-averaged horizontal area, in whole square feet.
    pub fn footprint(&self) -> i64 {
        self.footprint
    }

    /// Whether the footprint clears the model's minimum.
    pub fn is_plausible(&self) -> bool {
        self.footprint > MIN_FOOTPRINT
    }

    /// Modeled length of the wall on one side, in whole feet.
    ///
    /// Solving `long * short = footprint` with `long / short = 5 / 3`
    /// gives `long = sqrt(5 * footprint / 3)` and
    /// `short = sqrt(3 * footprint / 5)`.
    pub fn wall_length(&self, side: WallSide) -> i64 {
        let fp = self.footprint as f64;
        let length = if side.is_long_axis() {
            (5.0 * fp / 3.0).sqrt()
        } else {
            (3.0 * fp / 5.0).sqrt()
        };
        length.floor() as i64
    }

    /// Modeled gross area of the wall on one side across all stories.
    ///
    /// `None` when the ceiling height is absent.
    pub fn wall_area(&self, side: WallSide) -> Option<i64> {
        let height = self.ceiling_height?;
        let mut story_area = self.wall_length(side) as f64 * height;
        if side.is_long_axis() {
            story_area -= OPENING_DEDUCTION;
        }
        Some(floor_area_sum(story_area * f64::from(self.stories)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hea_model::{About, Floor, Zone};

    fn document(cfa: f64, stories: u32, height: Option<f64>) -> BuildingDocument {
        BuildingDocument {
            about: Some(About {
                conditioned_floor_area: Some(cfa),
                num_floor_above_grade: Some(stories),
                floor_to_ceiling_height: height,
                ..About::default()
            }),
            ..BuildingDocument::default()
        }
    }

    #[test]
    fn test_footprint_averages_over_stories() {
        let model = FootprintModel::derive(&document(2000.0, 2, None)).unwrap();
        assert_eq!(model.footprint(), 1000);
    }

    #[test]
    fn test_conditioned_basement_excluded() {
        let mut doc = document(2400.0, 2, None);
        doc.zone = Some(Zone {
            zone_floor: vec![Floor {
                foundation_type: Some(FoundationType::CondBasement),
                floor_area: Some(400.0),
                ..Floor::default()
            }],
            ..Zone::default()
        });
        let model = FootprintModel::derive(&doc).unwrap();
        assert_eq!(model.footprint(), 1000);
    }

    #[test]
    fn test_wall_lengths_for_five_three_rectangle() {
        let model = FootprintModel::derive(&document(2000.0, 2, None)).unwrap();
        // sqrt(5 * 1000 / 3) = 40.8; sqrt(3 * 1000 / 5) = 24.5
        assert_eq!(model.wall_length(WallSide::Front), 40);
        assert_eq!(model.wall_length(WallSide::Back), 40);
        assert_eq!(model.wall_length(WallSide::Left), 24);
        assert_eq!(model.wall_length(WallSide::Right), 24);
    }

    #[test]
    fn test_front_wall_area_with_opening_deduction() {
        let mut doc = document(2000.0, 2, Some(8.0));
        doc.about.as_mut().unwrap().num_floor_above_grade = Some(1);
        // Force footprint 1000 with one story.
        doc.about.as_mut().unwrap().conditioned_floor_area = Some(1000.0);
        let model = FootprintModel::derive(&doc).unwrap();
        // (40 * 8 - 20) * 1 story
        assert_eq!(model.wall_area(WallSide::Front), Some(300));
    }

    #[test]
    fn test_side_wall_has_no_deduction() {
        let model = FootprintModel::derive(&document(1000.0, 1, Some(8.0))).unwrap();
        // 24 * 8, no opening deduction
        assert_eq!(model.wall_area(WallSide::Left), Some(192));
    }

    #[test]
    fn test_missing_inputs_yield_no_model() {
        assert!(FootprintModel::derive(&BuildingDocument::default()).is_none());
        let mut doc = document(1000.0, 1, None);
        doc.about.as_mut().unwrap().num_floor_above_grade = Some(0);
        assert!(FootprintModel::derive(&doc).is_none());
    }

    #[test]
    fn test_plausibility_threshold() {
        assert!(!FootprintModel::derive(&document(250.0, 1, None))
            .unwrap()
            .is_plausible());
        assert!(FootprintModel::derive(&document(251.0, 1, None))
            .unwrap()
            .is_plausible());
    }
}
