//! Console report of the inspection run.

use crate::classify::{Diagnostic, LengthRanking};
use crate::feature::GeometryKind;
use crate::io::LoadOutcome;
use crate::region::Region;

pub fn print_report(
    outcome: &LoadOutcome,
    region: &Region,
    diagnostics: &[Diagnostic],
    ranking: &LengthRanking,
    kept: usize,
) {
    println!("\n=== Inspection Report ===");
    println!("Total features in file: {}", outcome.total);

    println!("Counts by kind:");
    for kind in GeometryKind::ALL {
        let count = outcome
            .features
            .iter()
            .filter(|feature| feature.geometry.kind() == kind)
            .count();
        println!("  {}: {}", kind, count);
    }

    if !outcome.skipped.is_empty() {
        println!("Skipped features:");
        for skip in &outcome.skipped {
            println!("  #{}: {}", skip.index, skip.reason);
        }
    }

    let bounds = region.bounds();
    println!(
        "Region bounds: ({:.6}, {:.6}) to ({:.6}, {:.6})",
        bounds.min_lon, bounds.min_lat, bounds.max_lon, bounds.max_lat
    );

    println!("\nSuspicious features:");
    if diagnostics.is_empty() {
        println!("  none");
    }
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::OutOfBoundsPoint { index, lon, lat } => {
                println!("  Point #{} is out of bounds: ({}, {})", index, lon, lat);
            }
            Diagnostic::TinyLength { index, length } => {
                println!("  Feature #{} has tiny length: {}", index, length);
            }
            Diagnostic::TinyArea { index, area } => {
                println!("  Polygon #{} has tiny area: {}", index, area);
            }
        }
    }

    println!("\nGeometry lengths:");
    println!("Top {} shortest features:", ranking.shortest.len());
    for (index, length) in &ranking.shortest {
        println!("  #{}: {}", index, length);
    }
    println!("Top {} longest features:", ranking.longest.len());
    for (index, length) in &ranking.longest {
        println!("  #{}: {}", index, length);
    }

    println!(
        "\nFeatures kept by filter: {}/{}",
        kept,
        outcome.features.len()
    );
}
