use std::path::PathBuf;

pub mod classify;
pub mod error;
pub mod feature;
pub mod io;
pub mod region;
pub mod render;
pub mod report;

pub use classify::{is_inside, rank_by_length, scan_features, FilterMode};
pub use error::{Error, Result};
pub use feature::{Feature, FeatureGeometry, GeometryKind};
pub use io::{load_features, LoadOutcome};
pub use region::{build_region, Bounds, Region, RegionSpec, DEFAULT_PADDING};

pub struct InspectConfig {
    pub file: PathBuf,
    pub region: RegionSpec,
    pub filter: FilterMode,
    /// PNG map output, if requested.
    pub output: Option<PathBuf>,
    /// GeoJSON export of the kept features and region, if requested.
    pub export: Option<PathBuf>,
}

/// Run one inspection: load the file, build the region, scan and rank the
/// features, print the report, and optionally render/export.
pub fn inspect(config: &InspectConfig) -> Result<()> {
    let outcome = io::load_features(&config.file)?;
    let region = region::build_region(&outcome.features, &config.region)?;

    let diagnostics = classify::scan_features(&outcome.features, region.bounds());
    let ranking = classify::rank_by_length(&outcome.features);
    let kept: Vec<&Feature> = outcome
        .features
        .iter()
        .filter(|feature| classify::is_inside(feature, &region, config.filter))
        .collect();

    report::print_report(&outcome, &region, &diagnostics, &ranking, kept.len());

    if let Some(path) = &config.export {
        io::write_features(path, &kept, &region)?;
        println!("Features written to {}", path.display());
    }
    if let Some(path) = &config.output {
        render::render_map(path, &kept, &region)?;
        println!("Map written to {}", path.display());
    }

    Ok(())
}
