//! Polyline clipping: stitch clipped segments back into sub-polylines.
//!
//! A polyline is walked one segment at a time. Visible segments extend
//! the sub-polyline under construction; a rejected segment, or a visible
//! segment whose end was moved onto the window boundary, closes it, so a
//! path that leaves and comes back never gets a straight jump across the
//! excluded region.

use crate::segment::clip_segment;
use crate::types::{ClipError, ClipOutcome, Point, Polyline, Rect};

/// Clip a single polyline to `rect`, splitting where it leaves the window.
///
/// Polylines with fewer than two points have no segments and produce no
/// output. A polyline entirely inside the window is returned unchanged as
/// the only element. See [`clip_segment`] for the treatment of points on
/// the boundary and of non-finite coordinates.
///
/// # Limitations
///
/// A vertex lying exactly on the boundary is inside, so a segment that
/// starts there and heads outward still has a visible part of zero
/// length. The output then ends with that vertex repeated, and a
/// two-point polyline `[(10, 5), (15, 5)]` against a window with
/// `x_max == 10` yields the degenerate `[(10, 5), (10, 5)]`.
///
/// # Examples
///
/// ```
/// use cutlines_clip::{Point, Polyline, Rect, clip_polyline};
///
/// let rect = Rect::new(0.0, 10.0, 0.0, 10.0);
/// let line = Polyline::new(vec![
///     Point::new(-1.0, 5.0),
///     Point::new(5.0, 5.0),
///     Point::new(5.0, -1.0),
///     Point::new(11.0, 5.0),
/// ]);
/// let clipped = clip_polyline(&line, &rect);
/// assert_eq!(clipped.len(), 2);
/// assert_eq!(
///     clipped[0].points(),
///     &[Point::new(0.0, 5.0), Point::new(5.0, 5.0), Point::new(5.0, 0.0)],
/// );
/// ```
#[must_use = "returns the clipped polylines"]
pub fn clip_polyline(line: &Polyline, rect: &Rect) -> Vec<Polyline> {
    assemble(line, rect, |_, _| {})
}

/// Clip multiple polylines to `rect`.
///
/// Each input polyline is clipped independently and the outputs are
/// concatenated in input order. A single input polyline may produce
/// several output polylines.
#[must_use = "returns the clipped polylines"]
pub fn clip_polylines(lines: &[Polyline], rect: &Rect) -> Vec<Polyline> {
    lines
        .iter()
        .flat_map(|line| clip_polyline(line, rect))
        .collect()
}

/// Like [`clip_polyline`], but validates the window and every input
/// coordinate first.
///
/// # Errors
///
/// Returns [`ClipError::InvalidRect`] if `rect` has non-finite or
/// inverted bounds, and [`ClipError::NonFiniteCoordinate`] (with
/// `polyline == 0`) if any point has a NaN or infinite coordinate.
pub fn try_clip_polyline(line: &Polyline, rect: &Rect) -> Result<Vec<Polyline>, ClipError> {
    try_clip_polylines(std::slice::from_ref(line), rect)
}

/// Like [`clip_polylines`], but validates the window and every input
/// coordinate first. Nothing is clipped if validation fails.
///
/// # Errors
///
/// Returns [`ClipError::InvalidRect`] if `rect` has non-finite or
/// inverted bounds, and [`ClipError::NonFiniteCoordinate`] naming the
/// first offending point otherwise.
pub fn try_clip_polylines(lines: &[Polyline], rect: &Rect) -> Result<Vec<Polyline>, ClipError> {
    validate(lines, rect)?;
    Ok(clip_polylines(lines, rect))
}

/// Check that `rect` is well formed and every point of `lines` is finite.
///
/// This is the validation performed by [`try_clip_polylines`], exposed
/// for callers that clip through another entry point afterwards.
///
/// # Errors
///
/// Returns [`ClipError::InvalidRect`] for a bad window, otherwise
/// [`ClipError::NonFiniteCoordinate`] for the first non-finite point.
pub fn validate(lines: &[Polyline], rect: &Rect) -> Result<(), ClipError> {
    rect.validated()?;
    for (polyline, line) in lines.iter().enumerate() {
        if let Some(index) = line.points().iter().position(|p| !p.is_finite()) {
            return Err(ClipError::NonFiniteCoordinate { polyline, index });
        }
    }
    Ok(())
}

/// Walk `line` segment by segment, reporting each segment's clip result
/// to `on_segment` and collecting the stitched sub-polylines.
pub(crate) fn assemble<F>(line: &Polyline, rect: &Rect, mut on_segment: F) -> Vec<Polyline>
where
    F: FnMut((Point, Point), Option<&ClipOutcome>),
{
    if line.len() < 2 {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for (a, b) in line.segments() {
        let clipped = clip_segment(a, b, rect);
        on_segment((a, b), clipped.as_ref());

        match clipped {
            None => {
                // Segment entirely outside: close the open sub-polyline.
                if !current.is_empty() {
                    result.push(Polyline::new(std::mem::take(&mut current)));
                }
            }
            Some(outcome) => {
                // A continuing segment starts at the tail of `current`.
                if current.is_empty() {
                    current.push(outcome.start);
                }
                current.push(outcome.end);
                // The path leaves the window after this segment. Corner
                // exits report no edge, so test the moved point directly.
                if !outcome.end.is_identical(b) {
                    result.push(Polyline::new(std::mem::take(&mut current)));
                }
            }
        }
    }

    if !current.is_empty() {
        result.push(Polyline::new(current));
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(0.0, 10.0, 0.0, 10.0);

    fn polyline(points: &[(f64, f64)]) -> Polyline {
        points.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn empty_polyline_returns_empty() {
        assert!(clip_polyline(&Polyline::default(), &RECT).is_empty());
    }

    #[test]
    fn single_point_polyline_returns_empty() {
        assert!(clip_polyline(&polyline(&[(5.0, 5.0)]), &RECT).is_empty());
    }

    #[test]
    fn entirely_inside_unchanged() {
        let pl = polyline(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (10.0, 10.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(result, vec![pl]);
    }

    #[test]
    fn entirely_outside_returns_empty() {
        let pl = polyline(&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (-5.0, 30.0)]);
        assert!(clip_polyline(&pl, &RECT).is_empty());
    }

    #[test]
    fn exit_through_bottom_and_reenter_produces_two_polylines() {
        let pl = polyline(&[(-1.0, 5.0), (5.0, 5.0), (5.0, -1.0), (11.0, 5.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0].points(),
            &[Point::new(0.0, 5.0), Point::new(5.0, 5.0), Point::new(5.0, 0.0)],
        );
        assert_eq!(
            result[1].points(),
            &[Point::new(6.0, 0.0), Point::new(10.0, 4.0)],
        );
    }

    #[test]
    fn crossing_segment_forms_its_own_polyline() {
        let pl = polyline(&[(-5.0, 5.0), (15.0, 5.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![polyline(&[(0.0, 5.0), (10.0, 5.0)])],
        );
    }

    #[test]
    fn entering_path_continues_until_exit() {
        let pl = polyline(&[(-5.0, 2.0), (2.0, 2.0), (4.0, 6.0), (8.0, 8.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![polyline(&[(0.0, 2.0), (2.0, 2.0), (4.0, 6.0), (8.0, 8.0)])],
        );
    }

    #[test]
    fn rejected_segment_closes_current_polyline() {
        // Inside, exit right, a fully-outside segment, then back in.
        let pl = polyline(&[
            (5.0, 5.0),
            (8.0, 5.0),
            (20.0, 5.0),
            (20.0, 8.0),
            (5.0, 8.0),
        ]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![
                polyline(&[(5.0, 5.0), (8.0, 5.0), (10.0, 5.0)]),
                polyline(&[(10.0, 8.0), (5.0, 8.0)]),
            ],
        );
    }

    #[test]
    fn exit_after_first_segment_is_flushed_immediately() {
        // The first visible segment already ends on the boundary.
        let pl = polyline(&[(5.0, 5.0), (5.0, 15.0), (7.0, 5.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], polyline(&[(5.0, 5.0), (5.0, 10.0)]));
        assert_eq!(result[1], polyline(&[(6.0, 10.0), (7.0, 5.0)]));
    }

    #[test]
    fn exit_on_later_segment_closes_polyline() {
        let pl = polyline(&[(2.0, 2.0), (4.0, 4.0), (4.0, 14.0), (20.0, 14.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![polyline(&[(2.0, 2.0), (4.0, 4.0), (4.0, 10.0)])],
        );
    }

    #[test]
    fn boundary_touching_vertex_is_inside() {
        let pl = polyline(&[(5.0, 5.0), (10.0, 5.0), (5.0, 8.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(result, vec![pl]);
    }

    #[test]
    fn clip_polylines_concatenates_in_order() {
        let lines = vec![
            polyline(&[(20.0, 20.0), (30.0, 20.0)]),
            polyline(&[(1.0, 1.0), (2.0, 2.0)]),
            polyline(&[(-5.0, 5.0), (15.0, 5.0)]),
        ];
        let result = clip_polylines(&lines, &RECT);
        assert_eq!(
            result,
            vec![
                polyline(&[(1.0, 1.0), (2.0, 2.0)]),
                polyline(&[(0.0, 5.0), (10.0, 5.0)]),
            ],
        );
    }

    #[test]
    fn try_clip_rejects_invalid_rect() {
        let pl = polyline(&[(1.0, 1.0), (2.0, 2.0)]);
        let rect = Rect::new(10.0, 0.0, 0.0, 10.0);
        assert!(matches!(
            try_clip_polyline(&pl, &rect),
            Err(ClipError::InvalidRect { .. }),
        ));
    }

    #[test]
    fn try_clip_rejects_nan_coordinates() {
        let lines = vec![
            polyline(&[(1.0, 1.0), (2.0, 2.0)]),
            polyline(&[(1.0, 1.0), (2.0, f64::NAN), (3.0, 3.0)]),
        ];
        assert_eq!(
            try_clip_polylines(&lines, &RECT),
            Err(ClipError::NonFiniteCoordinate {
                polyline: 1,
                index: 1,
            }),
        );
    }

    #[test]
    fn try_clip_rejects_infinite_coordinates() {
        let pl = polyline(&[(f64::NEG_INFINITY, 1.0), (2.0, 2.0)]);
        assert_eq!(
            try_clip_polyline(&pl, &RECT),
            Err(ClipError::NonFiniteCoordinate {
                polyline: 0,
                index: 0,
            }),
        );
    }

    #[test]
    fn try_clip_matches_unchecked_on_valid_input() {
        let pl = polyline(&[(-1.0, 5.0), (5.0, 5.0), (5.0, -1.0), (11.0, 5.0)]);
        assert_eq!(try_clip_polyline(&pl, &RECT).unwrap(), clip_polyline(&pl, &RECT));
    }

    #[test]
    fn assemble_reports_every_segment() {
        let pl = polyline(&[(5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0)]);
        let mut seen = Vec::new();
        let _ = assemble(&pl, &RECT, |_, outcome| seen.push(outcome.is_some()));
        assert_eq!(seen, vec![true, false, true]);
    }

    #[test]
    fn exit_from_corner_region_closes_polyline() {
        // (12, 14) is beyond the top-right corner; the path leaves through
        // the top edge and comes back through it.
        let pl = polyline(&[(5.0, 5.0), (12.0, 14.0), (5.0, 9.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![
                polyline(&[(5.0, 5.0), (5.0 + 7.0 * 5.0 / 9.0, 10.0)]),
                polyline(&[(12.0 + -7.0 * -4.0 / -5.0, 10.0), (5.0, 9.0)]),
            ],
        );
    }

    #[test]
    fn exit_through_corner_closes_polyline() {
        let pl = polyline(&[(5.0, 5.0), (15.0, 15.0), (5.0, 9.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(
            result,
            vec![
                polyline(&[(5.0, 5.0), (10.0, 10.0)]),
                polyline(&[(15.0 + -10.0 * -5.0 / -6.0, 10.0), (5.0, 9.0)]),
            ],
        );
    }

    #[test]
    fn corner_exits_report_no_edge() {
        let mut edges = Vec::new();
        let pl = polyline(&[(5.0, 5.0), (15.0, 15.0), (5.0, 9.0)]);
        let _ = assemble(&pl, &RECT, |_, outcome| {
            let outcome = outcome.unwrap();
            edges.push((outcome.start_edge, outcome.end_edge));
        });
        assert_eq!(edges, vec![(None, None), (None, None)]);
    }

    #[test]
    fn outward_segment_from_boundary_vertex_leaves_zero_length_tail() {
        let pl = polyline(&[(5.0, 5.0), (10.0, 5.0), (15.0, 5.0)]);
        assert_eq!(
            clip_polyline(&pl, &RECT),
            vec![polyline(&[(5.0, 5.0), (10.0, 5.0), (10.0, 5.0)])],
        );

        let pl = polyline(&[(10.0, 5.0), (15.0, 5.0)]);
        assert_eq!(
            clip_polyline(&pl, &RECT),
            vec![polyline(&[(10.0, 5.0), (10.0, 5.0)])],
        );
    }

    #[test]
    fn nan_vertex_does_not_split_polyline() {
        let pl = polyline(&[(1.0, 1.0), (f64::NAN, 2.0), (3.0, 3.0)]);
        let result = clip_polyline(&pl, &RECT);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 3);
    }
}
