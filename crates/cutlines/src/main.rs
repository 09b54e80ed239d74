//! cutlines: clip polylines read as JSON against a rectangular window.
//!
//! Reads a JSON array of polylines (each an array of `{"x": .., "y": ..}`
//! points), clips every polyline to the window, and prints the result.
//! Optionally writes an SVG rendering and prints clip diagnostics.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin cutlines -- [OPTIONS] <INPUT>
//! echo '[[{"x":-1,"y":5},{"x":11,"y":5}]]' | cutlines --x-max 10 --y-max 10 -
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use cutlines_clip::diagnostics::Clock;
use cutlines_clip::{Polyline, PolylineList, Rect};

/// Clip polylines to an axis-aligned rectangular window.
///
/// Every input polyline is clipped independently. A polyline that leaves
/// and re-enters the window is split into several output polylines.
#[derive(Parser)]
#[command(name = "cutlines", version)]
struct Cli {
    /// JSON file holding an array of polylines, or `-` for stdin.
    input: PathBuf,

    /// Left boundary of the window.
    #[arg(long, allow_negative_numbers = true, default_value_t = Rect::DEFAULT.x_min)]
    x_min: f64,

    /// Right boundary of the window.
    #[arg(long, allow_negative_numbers = true, default_value_t = Rect::DEFAULT.x_max)]
    x_max: f64,

    /// Bottom boundary of the window.
    #[arg(long, allow_negative_numbers = true, default_value_t = Rect::DEFAULT.y_min)]
    y_min: f64,

    /// Top boundary of the window.
    #[arg(long, allow_negative_numbers = true, default_value_t = Rect::DEFAULT.y_max)]
    y_max: f64,

    /// Window as a JSON object (`{"x_min":..,"x_max":..,"y_min":..,"y_max":..}`).
    ///
    /// When provided, the individual boundary flags are ignored.
    #[arg(long)]
    rect_json: Option<String>,

    /// Output format for the clipped polylines.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write an SVG rendering of the clipped polylines to this file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Draw the unclipped input underneath the result in the SVG.
    #[arg(long, requires = "svg")]
    compare: bool,

    /// Print a human-readable diagnostics report to stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Print diagnostics as JSON to stderr instead of the report.
    #[arg(long)]
    json_diagnostics: bool,
}

/// Output format selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Nested bracketed lists: `[ [ (x, y) ... ] ... ]`.
    Text,
    /// Pretty-printed JSON array of polylines.
    Json,
}

/// Build the clip window from CLI arguments.
///
/// If `--rect-json` is provided, the JSON is parsed directly and the
/// individual boundary flags are ignored.
fn rect_from_cli(cli: &Cli) -> Result<Rect, String> {
    if let Some(ref json) = cli.rect_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --rect-json: {e}"));
    }
    Ok(Rect::new(cli.x_min, cli.x_max, cli.y_min, cli.y_max))
}

/// Read and parse the input polylines from a file or stdin.
fn read_polylines(path: &Path) -> Result<Vec<Polyline>, String> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).map_err(|e| format!("Error reading stdin: {e}"))?
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?
    };
    parse_polylines(&text)
}

/// Parse a JSON array of polylines.
fn parse_polylines(text: &str) -> Result<Vec<Polyline>, String> {
    serde_json::from_str(text).map_err(|e| format!("Error parsing input polylines: {e}"))
}

/// Render clipped polylines in the requested format.
fn render(clipped: &[Polyline], format: Format) -> Result<String, String> {
    match format {
        Format::Text => Ok(PolylineList(clipped).to_string()),
        Format::Json => serde_json::to_string_pretty(clipped)
            .map_err(|e| format!("Error serializing output: {e}")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let rect = match rect_from_cli(&cli) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let input = match read_polylines(&cli.input) {
        Ok(lines) => lines,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = cutlines_clip::validate(&input, &rect) {
        eprintln!("Invalid input: {e}");
        return ExitCode::FAILURE;
    }

    eprintln!(
        "Clipping {} polylines to x [{}, {}] y [{}, {}]",
        input.len(),
        rect.x_min,
        rect.x_max,
        rect.y_min,
        rect.y_max,
    );

    let (clipped, diagnostics) =
        cutlines_clip::clip_polylines_with_diagnostics(&input, &rect, &StdClock);

    match render(&clipped, cli.format) {
        Ok(out) => println!("{out}"),
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    }

    if cli.json_diagnostics {
        match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => {
                eprintln!("Error serializing diagnostics: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if cli.diagnostics {
        eprintln!("{}", diagnostics.report());
    }

    if let Some(ref svg_path) = cli.svg {
        let title = cli
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| *s != "-")
            .unwrap_or("cutlines");
        let desc = format!(
            "{} polylines clipped to x [{}, {}] y [{}, {}]",
            input.len(),
            rect.x_min,
            rect.x_max,
            rect.y_min,
            rect.y_max,
        );
        let metadata = cutlines_export::SvgMetadata {
            title: Some(title),
            description: Some(&desc),
        };
        let svg = if cli.compare {
            cutlines_export::to_comparison_svg(&input, &clipped, &rect, &metadata)
        } else {
            cutlines_export::to_svg(&clipped, &rect, &metadata)
        };
        match std::fs::write(svg_path, &svg) {
            Ok(()) => {
                eprintln!(
                    "SVG written to {} ({} bytes)",
                    svg_path.display(),
                    svg.len(),
                );
            }
            Err(e) => {
                eprintln!("Error writing SVG to {}: {e}", svg_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}
