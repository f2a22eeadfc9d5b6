//! Bounds and bounding-region construction.

use geo::algorithm::area::Area;
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Coord, LineString, Polygon, Rect};

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureGeometry};

/// Default padding fraction applied per axis in auto mode.
pub const DEFAULT_PADDING: f64 = 0.05;

/// Axis-aligned min/max extents of a coordinate collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Componentwise min/max over a coordinate sequence. Fails on an empty
    /// sequence rather than producing infinite or NaN extents.
    pub fn from_coords<I>(coords: I) -> Result<Bounds>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next().ok_or(Error::EmptyInput)?;
        let mut bounds = Bounds {
            min_lon: first.x,
            max_lon: first.x,
            min_lat: first.y,
            max_lat: first.y,
        };
        for coord in iter {
            bounds.min_lon = bounds.min_lon.min(coord.x);
            bounds.max_lon = bounds.max_lon.max(coord.x);
            bounds.min_lat = bounds.min_lat.min(coord.y);
            bounds.max_lat = bounds.max_lat.max(coord.y);
        }
        Ok(bounds)
    }

    fn from_rect(rect: Rect<f64>) -> Bounds {
        Bounds {
            min_lon: rect.min().x,
            max_lon: rect.max().x,
            min_lat: rect.min().y,
            max_lat: rect.max().y,
        }
    }

    /// Expand each axis symmetrically by `fraction` of its range.
    pub fn padded(&self, fraction: f64) -> Bounds {
        let pad_lon = (self.max_lon - self.min_lon) * fraction;
        let pad_lat = (self.max_lat - self.min_lat) * fraction;
        Bounds {
            min_lon: self.min_lon - pad_lon,
            max_lon: self.max_lon + pad_lon,
            min_lat: self.min_lat - pad_lat,
            max_lat: self.max_lat + pad_lat,
        }
    }

    /// Closed-interval membership on both axes.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.min_lon <= lon && lon <= self.max_lon && self.min_lat <= lat && lat <= self.max_lat
    }
}

/// The closed polygon features are tested against, together with the
/// extents it was built from.
#[derive(Debug, Clone)]
pub struct Region {
    polygon: Polygon<f64>,
    bounds: Bounds,
}

impl Region {
    /// Five-corner closed rectangle over the given bounds.
    pub fn from_bounds(bounds: &Bounds) -> Region {
        let exterior = LineString::new(vec![
            (bounds.min_lon, bounds.max_lat).into(), // top-left
            (bounds.min_lon, bounds.min_lat).into(), // bottom-left
            (bounds.max_lon, bounds.min_lat).into(), // bottom-right
            (bounds.max_lon, bounds.max_lat).into(), // top-right
            (bounds.min_lon, bounds.max_lat).into(), // close the ring
        ]);
        Region {
            polygon: Polygon::new(exterior, vec![]),
            bounds: *bounds,
        }
    }

    /// Fixed mode: a caller-supplied closed ring. The ring must repeat its
    /// first coordinate at the end and enclose a non-zero area.
    pub fn from_ring(ring: Vec<(f64, f64)>) -> Result<Region> {
        if ring.len() < 4 {
            return Err(Error::DegenerateRegion(format!(
                "ring has {} coordinates, need at least 4",
                ring.len()
            )));
        }
        if ring.first() != ring.last() {
            return Err(Error::DegenerateRegion("ring is not closed".to_string()));
        }
        let exterior = LineString::new(ring.into_iter().map(|c| c.into()).collect());
        let polygon = Polygon::new(exterior, vec![]);
        if polygon.unsigned_area() == 0.0 {
            return Err(Error::DegenerateRegion("ring encloses no area".to_string()));
        }
        let rect = polygon
            .bounding_rect()
            .ok_or_else(|| Error::DegenerateRegion("ring has no extent".to_string()))?;
        Ok(Region {
            polygon,
            bounds: Bounds::from_rect(rect),
        })
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

/// How the region should be derived for a run.
#[derive(Debug, Clone)]
pub enum RegionSpec {
    /// A literal closed ring supplied by the caller.
    Fixed(Vec<(f64, f64)>),
    /// Min/max extents of all features, padded per axis.
    Auto { padding: f64 },
}

pub fn build_region(features: &[Feature], spec: &RegionSpec) -> Result<Region> {
    match spec {
        RegionSpec::Fixed(ring) => Region::from_ring(ring.clone()),
        RegionSpec::Auto { padding } => {
            let bounds = Bounds::from_coords(flatten_coords(features))?;
            Ok(Region::from_bounds(&bounds.padded(*padding)))
        }
    }
}

// Every coordinate of every feature, in input order. Polygon holes do not
// contribute: they cannot extend the outer ring's extents.
fn flatten_coords(features: &[Feature]) -> impl Iterator<Item = Coord<f64>> + '_ {
    features.iter().flat_map(|feature| match &feature.geometry {
        FeatureGeometry::Point(point) => vec![point.0],
        FeatureGeometry::LineString(line) => line.0.clone(),
        FeatureGeometry::Polygon(polygon) => polygon.exterior().0.clone(),
        FeatureGeometry::MultiLineString(lines) => lines
            .0
            .iter()
            .flat_map(|line| line.0.iter().copied())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::algorithm::intersects::Intersects;
    use geo::Point;

    fn line_feature(index: usize, coords: &[(f64, f64)]) -> Feature {
        Feature {
            index,
            geometry: FeatureGeometry::LineString(LineString::new(
                coords.iter().map(|&c| c.into()).collect(),
            )),
        }
    }

    #[test]
    fn bounds_envelope_covers_every_coordinate() {
        let coords: Vec<Coord<f64>> = vec![
            (3.0, 7.0).into(),
            (-2.5, 4.0).into(),
            (9.0, -1.0).into(),
            (0.0, 0.0).into(),
        ];
        let bounds = Bounds::from_coords(coords.clone()).unwrap();
        for coord in coords {
            assert!(bounds.min_lon <= coord.x && coord.x <= bounds.max_lon);
            assert!(bounds.min_lat <= coord.y && coord.y <= bounds.max_lat);
        }
        assert_relative_eq!(bounds.min_lon, -2.5);
        assert_relative_eq!(bounds.max_lon, 9.0);
        assert_relative_eq!(bounds.min_lat, -1.0);
        assert_relative_eq!(bounds.max_lat, 7.0);
    }

    #[test]
    fn padding_expands_each_axis_by_fraction_of_range() {
        let bounds = Bounds {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 10.0,
        };
        let padded = bounds.padded(0.05);
        assert_relative_eq!(padded.min_lon, -0.5, epsilon = 1e-12);
        assert_relative_eq!(padded.max_lon, 10.5, epsilon = 1e-12);
        assert_relative_eq!(padded.min_lat, -0.5, epsilon = 1e-12);
        assert_relative_eq!(padded.max_lat, 10.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = Bounds::from_coords(std::iter::empty::<Coord<f64>>()).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));

        let err = build_region(&[], &RegionSpec::Auto { padding: DEFAULT_PADDING }).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn region_intersects_itself() {
        let bounds = Bounds {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 10.0,
        };
        let region = Region::from_bounds(&bounds);
        assert!(region.polygon().intersects(region.polygon()));
    }

    #[test]
    fn auto_region_is_a_closed_padded_rectangle() {
        let features = vec![
            line_feature(0, &[(0.0, 0.0), (10.0, 10.0)]),
            Feature {
                index: 1,
                geometry: FeatureGeometry::Point(Point::new(5.0, 5.0)),
            },
        ];
        let region = build_region(&features, &RegionSpec::Auto { padding: 0.05 }).unwrap();

        let bounds = region.bounds();
        assert_relative_eq!(bounds.min_lon, -0.5, epsilon = 1e-12);
        assert_relative_eq!(bounds.max_lon, 10.5, epsilon = 1e-12);

        let exterior = region.polygon().exterior();
        assert_eq!(exterior.0.len(), 5);
        assert_eq!(exterior.0.first(), exterior.0.last());
    }

    #[test]
    fn fixed_ring_must_be_closed() {
        let err = Region::from_ring(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateRegion(_)));
    }

    #[test]
    fn fixed_ring_must_enclose_area() {
        let err = Region::from_ring(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateRegion(_)));
    }

    #[test]
    fn fixed_ring_accepts_a_closed_rectangle() {
        let region = Region::from_ring(vec![
            (0.0, 1.0),
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(region.bounds().max_lon, 1.0);
        assert_relative_eq!(region.bounds().min_lat, 0.0);
    }
}
