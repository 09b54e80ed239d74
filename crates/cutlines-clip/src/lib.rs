//! cutlines-clip: Polyline clipping against a rectangular window (sans-IO).
//!
//! Clips polylines to an axis-aligned window in two layers:
//!
//! 1. [`clip_segment`] clips one segment with the Cohen-Sutherland
//!    outcode algorithm and reports which window edge each endpoint was
//!    moved onto.
//! 2. [`clip_polyline`] walks a polyline segment by segment and stitches
//!    the visible pieces into sub-polylines, starting a new one wherever
//!    the path leaves the window.
//!
//! This crate has **no I/O dependencies**. All computation is pure and
//! call-local, so every function may be called concurrently from any
//! number of threads.
//!
//! The unchecked functions do not validate their input; see
//! [`clip_segment`] for the behavior on degenerate windows and non-finite
//! coordinates, and [`try_clip_polylines`] for the validating variant.

pub mod diagnostics;
pub mod polyline;
pub mod segment;
pub mod types;

pub use diagnostics::{ClipDiagnostics, Clock, clip_polylines_with_diagnostics};
pub use polyline::{
    clip_polyline, clip_polylines, try_clip_polyline, try_clip_polylines, validate,
};
pub use segment::clip_segment;
pub use types::{ClipError, ClipOutcome, Edge, Point, Polyline, PolylineList, Rect};
