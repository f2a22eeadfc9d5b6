//! Per-feature classification: region filtering, data-quality scanning,
//! and length ranking. Each feature is processed independently.

use geo::algorithm::area::Area;
use geo::algorithm::euclidean_length::EuclideanLength;
use geo::algorithm::intersects::Intersects;

use crate::feature::{Feature, FeatureGeometry};
use crate::region::{Bounds, Region};

/// Lines shorter than this (in degrees) are flagged as likely degenerate.
pub const TINY_LENGTH: f64 = 1e-5;
/// Polygons enclosing less than this (in square degrees) are flagged.
pub const TINY_AREA: f64 = 1e-8;

const RANK_COUNT: usize = 5;

/// Whether the region filter is applied or every feature passes. The `All`
/// mode is the full-scan behavior, kept as an explicit toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Region,
    All,
}

/// True geometric intersection with the region, touching counts. Under
/// `FilterMode::All` every feature is inside.
pub fn is_inside(feature: &Feature, region: &Region, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Region => match &feature.geometry {
            FeatureGeometry::Point(point) => region.polygon().intersects(point),
            FeatureGeometry::LineString(line) => region.polygon().intersects(line),
            FeatureGeometry::Polygon(polygon) => region.polygon().intersects(polygon),
            FeatureGeometry::MultiLineString(lines) => region.polygon().intersects(lines),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    OutOfBoundsPoint { index: usize, lon: f64, lat: f64 },
    TinyLength { index: usize, length: f64 },
    TinyArea { index: usize, area: f64 },
}

/// Scan for suspicious features: points outside the bounds, lines of
/// near-zero length, polygons of near-zero area.
pub fn scan_features(features: &[Feature], bounds: &Bounds) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for feature in features {
        match &feature.geometry {
            FeatureGeometry::Point(point) => {
                if !bounds.contains(point.x(), point.y()) {
                    diagnostics.push(Diagnostic::OutOfBoundsPoint {
                        index: feature.index,
                        lon: point.x(),
                        lat: point.y(),
                    });
                }
            }
            FeatureGeometry::LineString(line) => {
                let length = line.euclidean_length();
                if length < TINY_LENGTH {
                    diagnostics.push(Diagnostic::TinyLength {
                        index: feature.index,
                        length,
                    });
                }
            }
            FeatureGeometry::MultiLineString(lines) => {
                let length = lines.euclidean_length();
                if length < TINY_LENGTH {
                    diagnostics.push(Diagnostic::TinyLength {
                        index: feature.index,
                        length,
                    });
                }
            }
            FeatureGeometry::Polygon(polygon) => {
                let area = polygon.unsigned_area();
                if area < TINY_AREA {
                    diagnostics.push(Diagnostic::TinyArea {
                        index: feature.index,
                        area,
                    });
                }
            }
        }
    }
    diagnostics
}

/// Arc length of a feature, or None for kinds without one (points).
/// Polygons rank by the length of their outer ring.
pub fn feature_length(feature: &Feature) -> Option<f64> {
    match &feature.geometry {
        FeatureGeometry::Point(_) => None,
        FeatureGeometry::LineString(line) => Some(line.euclidean_length()),
        FeatureGeometry::Polygon(polygon) => Some(polygon.exterior().euclidean_length()),
        FeatureGeometry::MultiLineString(lines) => Some(lines.euclidean_length()),
    }
}

/// The 5 shortest and 5 longest features as (index, length), both sorted
/// ascending by length. With fewer than 5 candidates the lists overlap.
#[derive(Debug, Clone, Default)]
pub struct LengthRanking {
    pub shortest: Vec<(usize, f64)>,
    pub longest: Vec<(usize, f64)>,
}

pub fn rank_by_length(features: &[Feature]) -> LengthRanking {
    let mut lengths: Vec<(usize, f64)> = features
        .iter()
        .filter_map(|feature| feature_length(feature).map(|length| (feature.index, length)))
        .collect();
    lengths.sort_by(|a, b| a.1.total_cmp(&b.1));

    let shortest = lengths.iter().take(RANK_COUNT).copied().collect();
    let longest = lengths
        .iter()
        .skip(lengths.len().saturating_sub(RANK_COUNT))
        .copied()
        .collect();
    LengthRanking { shortest, longest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{build_region, RegionSpec};
    use approx::assert_relative_eq;
    use geo::{LineString, Point, Polygon};

    fn point_feature(index: usize, lon: f64, lat: f64) -> Feature {
        Feature {
            index,
            geometry: FeatureGeometry::Point(Point::new(lon, lat)),
        }
    }

    fn line_feature(index: usize, coords: &[(f64, f64)]) -> Feature {
        Feature {
            index,
            geometry: FeatureGeometry::LineString(LineString::new(
                coords.iter().map(|&c| c.into()).collect(),
            )),
        }
    }

    fn polygon_feature(index: usize, ring: &[(f64, f64)]) -> Feature {
        Feature {
            index,
            geometry: FeatureGeometry::Polygon(Polygon::new(
                LineString::new(ring.iter().map(|&c| c.into()).collect()),
                vec![],
            )),
        }
    }

    fn unit_bounds() -> Bounds {
        Bounds {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 10.0,
        }
    }

    #[test]
    fn point_within_padded_auto_bounds_is_not_flagged() {
        let features = vec![
            line_feature(0, &[(0.0, 0.0), (10.0, 0.0)]),
            line_feature(1, &[(0.0, 10.0), (10.0, 10.0)]),
            line_feature(2, &[(0.0, 0.0), (0.0, 10.0)]),
            point_feature(3, 5.0, 5.0),
        ];
        let region = build_region(&features, &RegionSpec::Auto { padding: 0.05 }).unwrap();
        let diagnostics = scan_features(&features, region.bounds());
        assert!(!diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::OutOfBoundsPoint { .. })));
    }

    #[test]
    fn point_outside_bounds_is_flagged() {
        let features = vec![point_feature(0, 20.0, -3.0)];
        let diagnostics = scan_features(&features, &unit_bounds());
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::OutOfBoundsPoint { index: 0, .. }
        ));
    }

    #[test]
    fn point_on_bounds_edge_is_not_flagged() {
        let features = vec![point_feature(0, 10.0, 0.0)];
        let diagnostics = scan_features(&features, &unit_bounds());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn zero_length_line_is_flagged() {
        let features = vec![line_feature(0, &[(1.0, 1.0), (1.0, 1.0)])];
        let diagnostics = scan_features(&features, &unit_bounds());
        assert!(matches!(
            diagnostics[0],
            Diagnostic::TinyLength { index: 0, length } if length == 0.0
        ));
    }

    #[test]
    fn polygon_with_area_below_threshold_is_flagged() {
        // 1e-4 x 1e-5 rectangle, area 1e-9
        let features = vec![polygon_feature(
            0,
            &[
                (0.0, 0.0),
                (1e-4, 0.0),
                (1e-4, 1e-5),
                (0.0, 1e-5),
                (0.0, 0.0),
            ],
        )];
        let diagnostics = scan_features(&features, &unit_bounds());
        assert_eq!(diagnostics.len(), 1);
        match diagnostics[0] {
            Diagnostic::TinyArea { index, area } => {
                assert_eq!(index, 0);
                assert_relative_eq!(area, 1e-9, epsilon = 1e-15);
            }
            _ => panic!("expected TinyArea"),
        }
    }

    #[test]
    fn ordinary_polygon_is_not_flagged() {
        let features = vec![polygon_feature(
            0,
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
        )];
        assert!(scan_features(&features, &unit_bounds()).is_empty());
    }

    #[test]
    fn region_filter_rejects_far_features_and_keeps_touching_ones() {
        let region = build_region(
            &[line_feature(0, &[(0.0, 0.0), (10.0, 10.0)])],
            &RegionSpec::Auto { padding: 0.0 },
        )
        .unwrap();

        let far = line_feature(1, &[(100.0, 100.0), (101.0, 101.0)]);
        assert!(!is_inside(&far, &region, FilterMode::Region));
        assert!(is_inside(&far, &region, FilterMode::All));

        // Touches the boundary at (10, 5), which counts as intersecting.
        let touching = line_feature(2, &[(10.0, 5.0), (15.0, 5.0)]);
        assert!(is_inside(&touching, &region, FilterMode::Region));

        let corner = point_feature(3, 0.0, 0.0);
        assert!(is_inside(&corner, &region, FilterMode::Region));
    }

    #[test]
    fn ranking_is_ascending_and_ends_disjoint_for_large_inputs() {
        let features: Vec<Feature> = (0..12)
            .map(|i| line_feature(i, &[(0.0, 0.0), ((i + 1) as f64, 0.0)]))
            .collect();
        let ranking = rank_by_length(&features);

        assert_eq!(ranking.shortest.len(), 5);
        assert_eq!(ranking.longest.len(), 5);
        assert!(ranking
            .shortest
            .windows(2)
            .all(|pair| pair[0].1 <= pair[1].1));
        assert!(ranking
            .longest
            .windows(2)
            .all(|pair| pair[0].1 <= pair[1].1));
        assert!(ranking
            .shortest
            .iter()
            .all(|(index, _)| !ranking.longest.iter().any(|(i, _)| i == index)));
        assert_relative_eq!(ranking.shortest[0].1, 1.0);
        assert_relative_eq!(ranking.longest[4].1, 12.0);
    }

    #[test]
    fn points_do_not_participate_in_ranking() {
        let features = vec![
            point_feature(0, 1.0, 1.0),
            line_feature(1, &[(0.0, 0.0), (2.0, 0.0)]),
        ];
        let ranking = rank_by_length(&features);
        assert_eq!(ranking.shortest, vec![(1, 2.0)]);
        assert_eq!(ranking.longest, vec![(1, 2.0)]);
    }
}
