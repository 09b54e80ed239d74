//! Clip diagnostics: timing and counts for a batch clip.
//!
//! The library has no I/O and no logging backend. Callers that want to
//! know what a clip did ask for a [`ClipDiagnostics`] alongside the
//! result and print or serialize it themselves.
//!
//! Time is read through the [`Clock`] trait so this crate does not
//! depend on a platform clock. Durations are serialized as fractional
//! seconds (`f64`) for JSON compatibility, since `std::time::Duration`
//! does not implement serde traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::polyline::assemble;
use crate::types::{ClipOutcome, Edge, Point, Polyline, Rect};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of timestamps for diagnostics.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Per-edge tally of clipped endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    /// Endpoints moved onto the left edge.
    pub left: usize,
    /// Endpoints moved onto the right edge.
    pub right: usize,
    /// Endpoints moved onto the bottom edge.
    pub bottom: usize,
    /// Endpoints moved onto the top edge.
    pub top: usize,
}

impl EdgeCounts {
    fn record(&mut self, edge: Option<Edge>) {
        match edge {
            Some(Edge::Left) => self.left += 1,
            Some(Edge::Right) => self.right += 1,
            Some(Edge::Bottom) => self.bottom += 1,
            Some(Edge::Top) => self.top += 1,
            None => {}
        }
    }

    /// Count for a single edge.
    #[must_use]
    pub const fn get(&self, edge: Edge) -> usize {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Top => self.top,
        }
    }

    /// Sum over all edges.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.left + self.right + self.bottom + self.top
    }
}

/// Diagnostics collected from a single batch clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDiagnostics {
    /// Window the polylines were clipped against.
    pub rect: Rect,
    /// Number of input polylines.
    pub polylines_in: usize,
    /// Number of output polylines (may exceed the input due to splits).
    pub polylines_out: usize,
    /// Total input points.
    pub points_in: usize,
    /// Total output points.
    pub points_out: usize,
    /// Segments examined (`len - 1` per polyline with 2+ points).
    pub segments: usize,
    /// Segments with a visible part.
    pub segments_accepted: usize,
    /// Segments entirely outside the window.
    pub segments_rejected: usize,
    /// Accepted segments whose start point was moved onto the boundary.
    pub starts_clipped: usize,
    /// Accepted segments whose end point was moved onto the boundary.
    pub ends_clipped: usize,
    /// Clipped endpoints broken down by the edge they report. Endpoints
    /// moved in from a corner region report no edge and are not counted
    /// here.
    pub edges: EdgeCounts,
    /// Wall-clock duration of the clip (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ClipDiagnostics {
    fn new(rect: Rect, input: &[Polyline]) -> Self {
        Self {
            rect,
            polylines_in: input.len(),
            polylines_out: 0,
            points_in: total_points(input),
            points_out: 0,
            segments: 0,
            segments_accepted: 0,
            segments_rejected: 0,
            starts_clipped: 0,
            ends_clipped: 0,
            edges: EdgeCounts::default(),
            duration: Duration::ZERO,
        }
    }

    fn record(&mut self, (a, b): (Point, Point), outcome: Option<&ClipOutcome>) {
        self.segments += 1;
        let Some(outcome) = outcome else {
            self.segments_rejected += 1;
            return;
        };
        self.segments_accepted += 1;
        self.edges.record(outcome.start_edge);
        self.edges.record(outcome.end_edge);
        self.starts_clipped += usize::from(!outcome.start.is_identical(a));
        self.ends_clipped += usize::from(!outcome.end.is_identical(b));
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Clip Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Window: x [{}, {}]  y [{}, {}]",
            self.rect.x_min, self.rect.x_max, self.rect.y_min, self.rect.y_max,
        ));
        lines.push(format!("Duration: {:.3}ms", duration_ms(self.duration)));
        lines.push(String::new());

        lines.push(format!("{:<24} {:>10} {:>10}", "", "In", "Out"));
        lines.push("-".repeat(46));
        lines.push(format!(
            "{:<24} {:>10} {:>10}",
            "Polylines", self.polylines_in, self.polylines_out,
        ));
        lines.push(format!(
            "{:<24} {:>10} {:>10}",
            "Points", self.points_in, self.points_out,
        ));
        lines.push(String::new());

        lines.push(format!(
            "Segments: {} ({} accepted, {} rejected, {:.1}% visible)",
            self.segments,
            self.segments_accepted,
            self.segments_rejected,
            self.accepted_ratio() * 100.0,
        ));
        lines.push(format!(
            "Clipped endpoints: {} starts, {} ends",
            self.starts_clipped, self.ends_clipped,
        ));
        lines.push(
            Edge::ALL
                .iter()
                .map(|&edge| format!("{edge}={}", self.edges.get(edge)))
                .collect::<Vec<_>>()
                .join(" "),
        );

        lines.join("\n")
    }

    /// Fraction of segments with a visible part, or `0.0` with no segments.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accepted_ratio(&self) -> f64 {
        if self.segments == 0 {
            0.0
        } else {
            self.segments_accepted as f64 / self.segments as f64
        }
    }
}

/// Clip `lines` to `rect` like [`clip_polylines`](crate::clip_polylines),
/// collecting per-segment counts and the elapsed time.
///
/// The returned polylines are identical to those of `clip_polylines`.
#[must_use = "returns the clipped polylines and their diagnostics"]
pub fn clip_polylines_with_diagnostics<C: Clock>(
    lines: &[Polyline],
    rect: &Rect,
    clock: &C,
) -> (Vec<Polyline>, ClipDiagnostics) {
    let start = clock.now();
    let mut diagnostics = ClipDiagnostics::new(*rect, lines);

    let clipped: Vec<Polyline> = lines
        .iter()
        .flat_map(|line| {
            assemble(line, rect, |segment, outcome| {
                diagnostics.record(segment, outcome);
            })
        })
        .collect();

    diagnostics.polylines_out = clipped.len();
    diagnostics.points_out = total_points(&clipped);
    diagnostics.duration = clock.elapsed(&start);
    (clipped, diagnostics)
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Total points across a slice of polylines.
fn total_points(polylines: &[Polyline]) -> usize {
    polylines.iter().map(Polyline::len).sum()
}
