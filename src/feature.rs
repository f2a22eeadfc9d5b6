use std::fmt;

use geo::{LineString, MultiLineString, Point, Polygon};

/// The geometry kinds this tool understands. Anything else in the input is
/// skipped (and reported) at load time, so downstream code can match
/// exhaustively on these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiLineString,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiLineString,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiLineString => "MultiLineString",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coordinate payload of one feature, restricted to the supported kinds.
#[derive(Debug, Clone)]
pub enum FeatureGeometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
    MultiLineString(MultiLineString<f64>),
}

impl FeatureGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            FeatureGeometry::Point(_) => GeometryKind::Point,
            FeatureGeometry::LineString(_) => GeometryKind::LineString,
            FeatureGeometry::Polygon(_) => GeometryKind::Polygon,
            FeatureGeometry::MultiLineString(_) => GeometryKind::MultiLineString,
        }
    }
}

/// One entry of the input collection. `index` is the position in the
/// original file, so reports stay meaningful even after skips.
#[derive(Debug, Clone)]
pub struct Feature {
    pub index: usize,
    pub geometry: FeatureGeometry,
}
