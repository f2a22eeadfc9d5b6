use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use geojson_inspector::{inspect, FilterMode, InspectConfig, RegionSpec, DEFAULT_PADDING};

fn main() {
    let matches = Command::new("GeoJSON Region Inspector")
        .version("1.0")
        .about("Derives a bounding region for a GeoJSON file and inspects features against it")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .num_args(1)
                .required(true)
                .help("Input GeoJSON file"),
        )
        .arg(
            Arg::new("bounds")
                .short('b')
                .long("bounds")
                .num_args(1)
                .help("Fixed region as min_lon,min_lat,max_lon,max_lat (auto-computed when omitted)"),
        )
        .arg(
            Arg::new("padding")
                .short('p')
                .long("padding")
                .num_args(1)
                .help("Padding fraction per axis for the auto region (default 0.05)"),
        )
        .arg(
            Arg::new("no-filter")
                .long("no-filter")
                .action(ArgAction::SetTrue)
                .help("Keep every feature regardless of region intersection"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .help("Write a PNG map of the kept features and region"),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .num_args(1)
                .help("Write the kept features and region to a GeoJSON file"),
        )
        .get_matches();

    let file = PathBuf::from(matches.get_one::<String>("file").unwrap());
    if !file.exists() {
        eprintln!("Error: File not found: {}", file.display());
        std::process::exit(1);
    }

    let padding = matches
        .get_one::<String>("padding")
        .map(|p| p.parse::<f64>().expect("Invalid padding value"))
        .unwrap_or(DEFAULT_PADDING);

    let region = match matches.get_one::<String>("bounds") {
        Some(spec) => RegionSpec::Fixed(ring_from_bounds_arg(spec)),
        None => RegionSpec::Auto { padding },
    };

    let filter = if matches.get_flag("no-filter") {
        FilterMode::All
    } else {
        FilterMode::Region
    };

    let config = InspectConfig {
        file,
        region,
        filter,
        output: matches.get_one::<String>("output").map(PathBuf::from),
        export: matches.get_one::<String>("export").map(PathBuf::from),
    };

    if let Err(e) = inspect(&config) {
        eprintln!("Error inspecting file: {}", e);
        std::process::exit(1);
    }
}

// Expand a min_lon,min_lat,max_lon,max_lat argument into a closed ring:
// top-left, bottom-left, bottom-right, top-right, top-left.
fn ring_from_bounds_arg(spec: &str) -> Vec<(f64, f64)> {
    let values: Vec<f64> = spec
        .split(',')
        .map(|v| v.trim().parse::<f64>().expect("Invalid bounds value"))
        .collect();
    if values.len() != 4 {
        eprintln!("Error: --bounds expects min_lon,min_lat,max_lon,max_lat");
        std::process::exit(1);
    }
    let (min_lon, min_lat, max_lon, max_lat) = (values[0], values[1], values[2], values[3]);
    vec![
        (min_lon, max_lat),
        (min_lon, min_lat),
        (max_lon, min_lat),
        (max_lon, max_lat),
        (min_lon, max_lat),
    ]
}
