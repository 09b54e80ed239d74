//! Segment clipping: Cohen-Sutherland outcode clipping of a single line
//! segment against a rectangular window.
//!
//! Each endpoint is classified by a 4-bit outcode relative to the four
//! half-planes of the window. Segments are trivially accepted when both
//! codes are zero, trivially rejected when the codes share a bit, and
//! otherwise shortened one boundary at a time until one of the two
//! trivial cases applies.

use crate::types::{ClipOutcome, Edge, Point, Rect};

/// Cohen-Sutherland region code.
///
/// `x` and `y` bits are mutually exclusive within their axis, so a code
/// has at most two bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OutCode(u8);

impl OutCode {
    const INSIDE: Self = Self(0b0000);
    const LEFT: Self = Self(0b0001);
    const RIGHT: Self = Self(0b0010);
    const BOTTOM: Self = Self(0b0100);
    const TOP: Self = Self(0b1000);

    /// Classify `p` against `rect`. Points on the boundary are inside.
    fn of(p: Point, rect: &Rect) -> Self {
        let mut bits = Self::INSIDE.0;
        if p.x < rect.x_min {
            bits |= Self::LEFT.0;
        } else if p.x > rect.x_max {
            bits |= Self::RIGHT.0;
        }
        if p.y < rect.y_min {
            bits |= Self::BOTTOM.0;
        } else if p.y > rect.y_max {
            bits |= Self::TOP.0;
        }
        Self(bits)
    }

    const fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the two codes share at least one bit.
    const fn has(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Edge {
    /// Single-bit codes map to their edge. Zero and corner codes map to
    /// `None`.
    const fn from_outcode(code: OutCode) -> Option<Self> {
        match code {
            OutCode::LEFT => Some(Self::Left),
            OutCode::RIGHT => Some(Self::Right),
            OutCode::BOTTOM => Some(Self::Bottom),
            OutCode::TOP => Some(Self::Top),
            _ => None,
        }
    }
}

/// Clip the segment `a`-`b` to `rect`.
///
/// Returns `None` if no part of the segment lies inside the window.
/// Otherwise returns the visible sub-segment, keeping the direction of
/// travel from `a` to `b`, with each endpoint annotated by the edge it
/// was moved onto. An endpoint that was already inside has no edge. An
/// endpoint whose last outside classification was a corner region (two
/// bits) also reports no edge.
///
/// When both endpoints are outside on different sides, the endpoint
/// with the numerically larger outcode is moved first (the first
/// endpoint on ties), and its `TOP`, `BOTTOM`, `RIGHT`, `LEFT` bits are
/// resolved in that order.
///
/// # Limitations
///
/// `rect` is not validated; inverted bounds give unspecified results.
/// NaN coordinates compare false against every bound and so classify as
/// inside, and infinite coordinates can produce NaN intersections. Use
/// [`try_clip_polyline`](crate::try_clip_polyline) to reject such input
/// up front.
///
/// # Examples
///
/// ```
/// use cutlines_clip::{Edge, Point, Rect, clip_segment};
///
/// let rect = Rect::new(0.0, 10.0, 0.0, 10.0);
/// let outcome = clip_segment(Point::new(-5.0, 5.0), Point::new(15.0, 5.0), &rect).unwrap();
/// assert_eq!(outcome.start, Point::new(0.0, 5.0));
/// assert_eq!(outcome.end, Point::new(10.0, 5.0));
/// assert_eq!(outcome.start_edge, Some(Edge::Left));
/// assert_eq!(outcome.end_edge, Some(Edge::Right));
/// ```
#[must_use = "returns the visible part of the segment"]
pub fn clip_segment(a: Point, b: Point, rect: &Rect) -> Option<ClipOutcome> {
    let (mut p0, mut p1) = (a, b);
    let mut code0 = OutCode::of(p0, rect);
    let mut code1 = OutCode::of(p1, rect);

    // Last outside classification of each endpoint, kept after the point
    // has been moved inside so the crossing edge can be reported.
    let mut last0 = code0;
    let mut last1 = code1;

    loop {
        if code0.is_inside() && code1.is_inside() {
            return Some(ClipOutcome {
                start: p0,
                end: p1,
                start_edge: Edge::from_outcode(last0),
                end_edge: Edge::from_outcode(last1),
            });
        }
        if code0.has(code1) {
            return None;
        }

        let out = if code1 > code0 { code1 } else { code0 };
        let ix = boundary_intersection(p0, p1, out, rect);

        if out == code0 {
            p0 = ix;
            code0 = OutCode::of(p0, rect);
            if !code0.is_inside() {
                last0 = code0;
            }
        } else {
            p1 = ix;
            code1 = OutCode::of(p1, rect);
            if !code1.is_inside() {
                last1 = code1;
            }
        }
    }
}

/// Intersect the line through `p0` and `p1` with the boundary named by
/// the highest-priority bit of `out` (`TOP`, `BOTTOM`, `RIGHT`, `LEFT`).
///
/// `out` is non-zero and its selected bit guarantees the divisor is
/// non-zero: an endpoint outside in `y` implies the other endpoint is
/// not outside on the same side, so `y1 != y0`, and likewise for `x`.
fn boundary_intersection(p0: Point, p1: Point, out: OutCode, rect: &Rect) -> Point {
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    if out.has(OutCode::TOP) {
        Point::new(p0.x + dx * (rect.y_max - p0.y) / dy, rect.y_max)
    } else if out.has(OutCode::BOTTOM) {
        Point::new(p0.x + dx * (rect.y_min - p0.y) / dy, rect.y_min)
    } else if out.has(OutCode::RIGHT) {
        Point::new(rect.x_max, p0.y + dy * (rect.x_max - p0.x) / dx)
    } else {
        Point::new(rect.x_min, p0.y + dy * (rect.x_min - p0.x) / dx)
    }
}
