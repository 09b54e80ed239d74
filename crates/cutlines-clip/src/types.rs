//! Shared types for polyline clipping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate (grows upward, towards [`Rect::y_max`]).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite (neither NaN nor
    /// infinite).
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Bit-for-bit equality, so a NaN point still equals its own copy.
    pub(crate) const fn is_identical(self, other: Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned clip window.
///
/// Expected to satisfy `x_min <= x_max` and `y_min <= y_max`. The
/// unchecked clipping functions do not verify this; use
/// [`Rect::try_new`] to build a validated window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left boundary.
    pub x_min: f64,
    /// Right boundary.
    pub x_max: f64,
    /// Bottom boundary.
    pub y_min: f64,
    /// Top boundary.
    pub y_max: f64,
}

impl Rect {
    /// The unit window `[0, 1] x [0, 1]`.
    pub const DEFAULT: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Create a window without validating its bounds.
    ///
    /// Argument order follows the field order: both x bounds, then both
    /// y bounds.
    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Create a window, rejecting non-finite or inverted bounds.
    ///
    /// Zero-width and zero-height windows are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::InvalidRect`] if any bound is NaN or infinite,
    /// or if `x_min > x_max` or `y_min > y_max`.
    pub fn try_new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ClipError> {
        Self::new(x_min, x_max, y_min, y_max).validated()
    }

    /// Return `self` if its bounds are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::InvalidRect`] under the same conditions as
    /// [`Rect::try_new`].
    pub fn validated(self) -> Result<Self, ClipError> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.x_min <= self.x_max && self.y_min <= self.y_max {
            Ok(self)
        } else {
            Err(ClipError::InvalidRect {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            })
        }
    }

    /// Returns `true` if `p` lies inside the window or on its boundary.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Midpoint of the window.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.x_min.midpoint(self.x_max),
            self.y_min.midpoint(self.y_max),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A sequence of connected points forming a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Iterate over the straight segments between consecutive points.
    ///
    /// Yields nothing for polylines with fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for p in &self.0 {
            write!(f, "{p} ")?;
        }
        f.write_str("]")
    }
}

/// Display adapter for a list of polylines: `[ [ ... ] [ ... ] ]`.
///
/// Debugging aid only, not a stable serialization format.
#[derive(Debug, Clone, Copy)]
pub struct PolylineList<'a>(pub &'a [Polyline]);

impl fmt::Display for PolylineList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for line in self.0 {
            write!(f, "{line} ")?;
        }
        f.write_str("]")
    }
}

/// A boundary of the clip window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// `x == x_min`.
    Left,
    /// `x == x_max`.
    Right,
    /// `y == y_min`.
    Bottom,
    /// `y == y_max`.
    Top,
}

impl Edge {
    /// All four edges, in outcode bit order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Bottom, Self::Top];

    /// Lowercase name of the edge.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visible part of a segment after clipping.
///
/// `start_edge` / `end_edge` name the boundary an endpoint was moved onto,
/// or `None` when the endpoint was already inside the window (or was
/// moved onto a corner, see [`clip_segment`](crate::clip_segment)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipOutcome {
    /// Visible start point.
    pub start: Point,
    /// Visible end point.
    pub end: Point,
    /// Edge the start point was clipped against.
    pub start_edge: Option<Edge>,
    /// Edge the end point was clipped against.
    pub end_edge: Option<Edge>,
}

impl fmt::Display for ClipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} {} ]", self.start, self.end)
    }
}

/// Errors reported by the checked clipping entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ClipError {
    /// The window has a non-finite bound or `min > max` on some axis.
    #[error("invalid clip window: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidRect {
        /// Left boundary as supplied.
        x_min: f64,
        /// Right boundary as supplied.
        x_max: f64,
        /// Bottom boundary as supplied.
        y_min: f64,
        /// Top boundary as supplied.
        y_max: f64,
    },

    /// An input point has a NaN or infinite coordinate.
    #[error("polyline {polyline} has a non-finite coordinate at point {index}")]
    NonFiniteCoordinate {
        /// Index of the offending polyline in the input slice.
        polyline: usize,
        /// Index of the offending point within that polyline.
        index: usize,
    },
}
