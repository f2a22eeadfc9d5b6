//! GeoJSON reading and writing.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::{Coord, LineString, MultiLineString, Point, Polygon};
use geojson::{
    Feature as GeoJsonFeature, FeatureCollection, GeoJson, Geometry as GeoJsonGeometry,
    Value as GeoJsonValue,
};

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureGeometry};
use crate::region::Region;

/// Why a feature was left out of the run. These are data, not errors: a
/// skipped feature is counted and reported while the rest keep loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedKind(&'static str),
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedKind(kind) => write!(f, "unsupported geometry kind {kind}"),
            SkipReason::Malformed(detail) => write!(f, "malformed geometry: {detail}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Skipped {
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub features: Vec<Feature>,
    pub skipped: Vec<Skipped>,
    /// Feature count of the input file, including skipped entries.
    pub total: usize,
}

pub fn load_features(path: &Path) -> Result<LoadOutcome> {
    println!("Loading file: {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let geojson = GeoJson::from_reader(reader)?;
    let outcome = collect_features(geojson)?;
    println!(
        "Loaded {} of {} features ({} skipped)",
        outcome.features.len(),
        outcome.total,
        outcome.skipped.len()
    );
    Ok(outcome)
}

pub fn collect_features(geojson: GeoJson) -> Result<LoadOutcome> {
    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err(Error::NotAFeatureCollection),
    };

    let total = collection.features.len();
    let mut features = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (index, feature) in collection.features.into_iter().enumerate() {
        match feature.geometry {
            Some(geometry) => match convert_geometry(geometry.value) {
                Ok(geometry) => features.push(Feature { index, geometry }),
                Err(reason) => skipped.push(Skipped { index, reason }),
            },
            None => skipped.push(Skipped {
                index,
                reason: SkipReason::Malformed("missing geometry".to_string()),
            }),
        }
    }

    Ok(LoadOutcome {
        features,
        skipped,
        total,
    })
}

fn convert_geometry(value: GeoJsonValue) -> std::result::Result<FeatureGeometry, SkipReason> {
    match value {
        GeoJsonValue::Point(pos) => {
            let coord = position(&pos)?;
            Ok(FeatureGeometry::Point(Point::from(coord)))
        }
        GeoJsonValue::LineString(positions) => {
            Ok(FeatureGeometry::LineString(line_from(&positions)?))
        }
        GeoJsonValue::Polygon(rings) => {
            if rings.is_empty() {
                return Err(SkipReason::Malformed("polygon has no rings".to_string()));
            }
            let exterior = ring_from(&rings[0])?;
            let holes = rings[1..]
                .iter()
                .map(|ring| ring_from(ring))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(FeatureGeometry::Polygon(Polygon::new(exterior, holes)))
        }
        GeoJsonValue::MultiLineString(lines) => {
            if lines.is_empty() {
                return Err(SkipReason::Malformed(
                    "multi line string has no components".to_string(),
                ));
            }
            let lines = lines
                .iter()
                .map(|line| line_from(line))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(FeatureGeometry::MultiLineString(MultiLineString::new(lines)))
        }
        GeoJsonValue::MultiPoint(_) => Err(SkipReason::UnsupportedKind("MultiPoint")),
        GeoJsonValue::MultiPolygon(_) => Err(SkipReason::UnsupportedKind("MultiPolygon")),
        GeoJsonValue::GeometryCollection(_) => {
            Err(SkipReason::UnsupportedKind("GeometryCollection"))
        }
    }
}

fn position(pos: &[f64]) -> std::result::Result<Coord<f64>, SkipReason> {
    if pos.len() < 2 {
        return Err(SkipReason::Malformed(format!(
            "position has {} values, need 2",
            pos.len()
        )));
    }
    Ok(Coord {
        x: pos[0],
        y: pos[1],
    })
}

fn line_from(positions: &[Vec<f64>]) -> std::result::Result<LineString<f64>, SkipReason> {
    if positions.len() < 2 {
        return Err(SkipReason::Malformed(format!(
            "line string has {} positions, need at least 2",
            positions.len()
        )));
    }
    let coords = positions
        .iter()
        .map(|pos| position(pos))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(LineString::new(coords))
}

fn ring_from(positions: &[Vec<f64>]) -> std::result::Result<LineString<f64>, SkipReason> {
    if positions.len() < 3 {
        return Err(SkipReason::Malformed(format!(
            "ring has {} positions, need at least 3",
            positions.len()
        )));
    }
    let mut coords = positions
        .iter()
        .map(|pos| position(pos))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    // Tolerate unclosed rings in the input
    if coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    Ok(LineString::new(coords))
}

/// Write the kept features plus the region ring to a GeoJSON file. Each
/// feature carries its original index as a property; the region feature is
/// tagged with `"role": "region"`.
pub fn write_features(path: &Path, features: &[&Feature], region: &Region) -> Result<()> {
    let mut out: Vec<GeoJsonFeature> = features
        .iter()
        .map(|feature| {
            let mut properties = serde_json::Map::new();
            properties.insert(
                "index".to_string(),
                serde_json::Value::from(feature.index as u64),
            );
            GeoJsonFeature {
                bbox: None,
                geometry: Some(to_geojson_geometry(&feature.geometry)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let mut region_properties = serde_json::Map::new();
    region_properties.insert(
        "role".to_string(),
        serde_json::Value::from("region".to_string()),
    );
    out.push(GeoJsonFeature {
        bbox: None,
        geometry: Some(GeoJsonGeometry::new(GeoJsonValue::Polygon(vec![
            line_positions(region.polygon().exterior()),
        ]))),
        id: None,
        properties: Some(region_properties),
        foreign_members: None,
    });

    let collection = FeatureCollection {
        bbox: None,
        features: out,
        foreign_members: None,
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &collection)?;
    Ok(())
}

fn to_geojson_geometry(geometry: &FeatureGeometry) -> GeoJsonGeometry {
    match geometry {
        FeatureGeometry::Point(point) => {
            GeoJsonGeometry::new(GeoJsonValue::Point(vec![point.x(), point.y()]))
        }
        FeatureGeometry::LineString(line) => {
            GeoJsonGeometry::new(GeoJsonValue::LineString(line_positions(line)))
        }
        FeatureGeometry::Polygon(polygon) => {
            let mut rings = vec![line_positions(polygon.exterior())];
            rings.extend(polygon.interiors().iter().map(line_positions));
            GeoJsonGeometry::new(GeoJsonValue::Polygon(rings))
        }
        FeatureGeometry::MultiLineString(lines) => GeoJsonGeometry::new(
            GeoJsonValue::MultiLineString(lines.0.iter().map(line_positions).collect()),
        ),
    }
}

fn line_positions(line: &LineString<f64>) -> Vec<Vec<f64>> {
    line.points().map(|p| vec![p.x(), p.y()]).collect()
}
