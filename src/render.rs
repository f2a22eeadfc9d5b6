//! PNG map of the kept features and the bounding region.

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureGeometry};
use crate::region::Region;

// Extra axis range beyond the region, so features on the edge stay visible.
const AXIS_MARGIN: f64 = 0.0005;

pub fn render_map(path: &Path, features: &[&Feature], region: &Region) -> Result<()> {
    let bounds = region.bounds();
    let root = BitMapBackend::new(path, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("GeoJSON features and bounding region", ("sans-serif", 30))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            bounds.min_lon - AXIS_MARGIN..bounds.max_lon + AXIS_MARGIN,
            bounds.min_lat - AXIS_MARGIN..bounds.max_lat + AXIS_MARGIN,
        )
        .map_err(render_err)?;

    chart.configure_mesh().draw().map_err(render_err)?;

    for feature in features {
        match &feature.geometry {
            FeatureGeometry::LineString(line) => {
                chart
                    .draw_series(LineSeries::new(
                        line.points().map(|p| (p.x(), p.y())),
                        &BLUE,
                    ))
                    .map_err(render_err)?;
            }
            FeatureGeometry::Polygon(polygon) => {
                chart
                    .draw_series(LineSeries::new(
                        polygon.exterior().points().map(|p| (p.x(), p.y())),
                        &BLUE,
                    ))
                    .map_err(render_err)?;
            }
            FeatureGeometry::MultiLineString(lines) => {
                for line in &lines.0 {
                    chart
                        .draw_series(LineSeries::new(
                            line.points().map(|p| (p.x(), p.y())),
                            &GREEN,
                        ))
                        .map_err(render_err)?;
                }
            }
            FeatureGeometry::Point(point) => {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (point.x(), point.y()),
                        4,
                        RED.filled(),
                    )))
                    .map_err(render_err)?;
            }
        }
    }

    // Region ring, dashed red
    chart
        .draw_series(DashedLineSeries::new(
            region
                .polygon()
                .exterior()
                .points()
                .map(|p| (p.x(), p.y()))
                .collect::<Vec<_>>()
                .into_iter(),
            6,
            4,
            RED.stroke_width(2),
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}
