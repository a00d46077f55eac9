//! lines2grid - Detect table grids from ruling-line segments
//!
//! A command line tool that reads the horizontal and vertical line segments
//! detected on a page from JSON and reports the rectangles and grid polygons
//! reconstructed from them.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use trellis_core::api::detect_grids;
use trellis_core::grid::{HorizontalLine, Rectangle, RectilinearPolygon, VerticalLine};

/// Output type for the detection report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// JSON report (default)
    #[default]
    Json,
    /// Human-readable summary
    Summary,
}

/// A command line tool that reconstructs table grids from the horizontal and
/// vertical ruling lines detected on a page.
#[derive(Parser, Debug)]
#[command(name = "lines2grid")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more paths to page JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output file path (- for stdout)
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output_type", value_enum, default_value = "json")]
    output_type: OutputType,

    /// Largest vertical gap (in points) across which two broken vertical
    /// rules may be spliced into one
    #[arg(long = "max-splice-gap", default_value = "6.0")]
    max_splice_gap: f64,

    /// Only report polygons with at least this many rows and columns
    #[arg(long = "min-grid", default_value = "0")]
    min_grid: usize,
}

/// One page's worth of detected line segments.
#[derive(Debug, Deserialize)]
struct PageInput {
    #[serde(default)]
    horizontals: Vec<SegmentInput>,
    #[serde(default)]
    verticals: Vec<SegmentInput>,
}

#[derive(Debug, Deserialize)]
struct SegmentInput {
    top: f64,
    left: f64,
    stretch: f64,
}

#[derive(Debug, Serialize)]
struct PageReport {
    file: String,
    rectangles: Vec<RectangleReport>,
    polygons: Vec<PolygonReport>,
}

#[derive(Debug, Serialize)]
struct RectangleReport {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl From<&Rectangle> for RectangleReport {
    fn from(rectangle: &Rectangle) -> Self {
        Self {
            min_x: rectangle.min_x,
            min_y: rectangle.min_y,
            width: rectangle.width,
            height: rectangle.height,
        }
    }
}

#[derive(Debug, Serialize)]
struct PolygonReport {
    bounding: RectangleReport,
    rows: usize,
    columns: usize,
    rectangles: Vec<RectangleReport>,
}

fn polygon_report(polygon: &RectilinearPolygon) -> PolygonReport {
    PolygonReport {
        bounding: RectangleReport::from(&polygon.bounding_rectangle()),
        rows: polygon.row_count(),
        columns: polygon.column_count(),
        rectangles: polygon
            .enclosed_rectangles()
            .iter()
            .map(RectangleReport::from)
            .collect(),
    }
}

fn process_file(path: &Path, args: &Args) -> Result<PageReport, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let page: PageInput = serde_json::from_str(&data)
        .map_err(|e| format!("invalid page JSON in {}: {e}", path.display()))?;

    let horizontals: Vec<HorizontalLine> = page
        .horizontals
        .iter()
        .map(|s| HorizontalLine::new(s.top, s.left, s.stretch))
        .collect();
    let verticals: Vec<VerticalLine> = page
        .verticals
        .iter()
        .map(|s| VerticalLine::new(s.top, s.left, s.stretch))
        .collect();

    let gap = args.max_splice_gap;
    let detection = detect_grids(&horizontals, &verticals, |upper, lower| {
        lower.top - upper.bottom() <= gap
    })
    .map_err(|e| e.to_string())?;

    let polygons = detection
        .polygons
        .iter()
        .filter(|p| p.row_count() >= args.min_grid && p.column_count() >= args.min_grid)
        .map(polygon_report)
        .collect();

    Ok(PageReport {
        file: path.display().to_string(),
        rectangles: detection.rectangles.iter().map(RectangleReport::from).collect(),
        polygons,
    })
}

fn write_report(
    output: &mut dyn Write,
    report: &PageReport,
    output_type: OutputType,
) -> io::Result<()> {
    match output_type {
        OutputType::Json => {
            let json = serde_json::to_string_pretty(report)?;
            writeln!(output, "{json}")
        }
        OutputType::Summary => {
            writeln!(
                output,
                "{}: {} rectangles, {} polygons",
                report.file,
                report.rectangles.len(),
                report.polygons.len()
            )?;
            for polygon in &report.polygons {
                writeln!(
                    output,
                    "  grid {}x{} at ({}, {}) size {}x{}",
                    polygon.rows,
                    polygon.columns,
                    polygon.bounding.min_x,
                    polygon.bounding.min_y,
                    polygon.bounding.width,
                    polygon.bounding.height
                )?;
            }
            Ok(())
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }
        match process_file(path, &args) {
            Ok(report) => write_report(&mut output, &report, args.output_type)?,
            Err(e) => {
                eprintln!("Error processing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    output.flush()?;
    Ok(())
}
