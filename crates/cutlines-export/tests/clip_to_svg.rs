//! Integration test: clip a path that leaves and re-enters the window and
//! export both the clipped result and the before/after comparison to SVG.

use cutlines_clip::{Point, Polyline, Rect, clip_polylines};
use cutlines_export::{SvgMetadata, to_comparison_svg, to_svg};

fn zigzag() -> Vec<Polyline> {
    vec![
        Polyline::new(vec![
            Point::new(-1.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, -1.0),
            Point::new(11.0, 5.0),
        ]),
        Polyline::new(vec![Point::new(20.0, 20.0), Point::new(30.0, 25.0)]),
    ]
}

#[test]
fn clipped_zigzag_exports_one_path_per_sub_polyline() {
    let window = Rect::new(0.0, 10.0, 0.0, 10.0);
    let clipped = clip_polylines(&zigzag(), &window);
    assert_eq!(clipped.len(), 2);

    let metadata = SvgMetadata {
        title: Some("zigzag"),
        description: Some("exit through the bottom edge, re-entry to the right"),
    };
    let svg = to_svg(&clipped, &window, &metadata);

    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("<title>zigzag</title>"));
    assert_eq!(svg.matches("<path").count(), 2);
    // (0,5) (5,5) (5,0) with y mirrored inside a 0..10 window.
    assert!(svg.contains("M0,5 L5,5 L5,10"));
    assert!(svg.contains("M6,10 L10,6"));
}

#[test]
fn comparison_svg_draws_inputs_and_outputs() {
    let window = Rect::new(0.0, 10.0, 0.0, 10.0);
    let input = zigzag();
    let clipped = clip_polylines(&input, &window);

    let svg = to_comparison_svg(&input, &clipped, &window, &SvgMetadata::default());

    // Every input polyline plus every clipped polyline.
    assert_eq!(svg.matches("<path").count(), input.len() + clipped.len());
    assert!(svg.contains(r#"viewBox="-1 -1 31 26""#));
}
