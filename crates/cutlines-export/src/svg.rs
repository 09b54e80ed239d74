//! SVG export serializer.
//!
//! Converts polylines into an SVG string using the [`svg`] crate for
//! document construction, XML escaping, and path data formatting.
//!
//! Polyline coordinates use a y-up convention while SVG user space is
//! y-down, so every y coordinate is mirrored about the middle of the
//! `viewBox` before it is emitted. The `viewBox` itself is expressed in
//! the polylines' own units.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Group, Path, Rectangle, Title};
use svg::node::{Text, Value};

use cutlines_clip::{Point, Polyline, Rect};

/// Rendered document width in pixels. The height follows the aspect
/// ratio of the `viewBox`.
const DOCUMENT_WIDTH_PX: f64 = 800.0;

/// Stroke colour of the clip window outline.
const WINDOW_STROKE: &str = "#d03030";

/// Stroke colour of unclipped input polylines in comparison output.
const INPUT_STROKE: &str = "#b0b0b0";

/// Metadata to embed in the SVG document.
///
/// When present, a `<title>` and/or `<desc>` element is emitted
/// immediately after the opening `<svg>` tag. Text values are
/// XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points.
/// Returns an empty string for polylines with fewer than 2 points.
/// Coordinates are emitted as given, without the y flip applied by
/// [`to_svg`].
///
/// # Examples
///
/// ```
/// use cutlines_clip::{Point, Polyline};
/// use cutlines_export::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 40.0),
/// ]);
/// assert_eq!(build_path_data(&polyline), "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    build_path_data_mapped(polyline, |p| (p.x, p.y))
}

/// Like [`build_path_data`] but passes every point through `map` first.
fn build_path_data_mapped(polyline: &Polyline, map: impl Fn(&Point) -> (f64, f64)) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let mut data = Data::new().move_to(map(&points[0]));
    for p in &points[1..] {
        data = data.line_to(map(p));
    }
    String::from(Value::from(data))
}

/// Mirror `y` about the horizontal centre line of `view`.
fn flip_y(view: &Rect, y: f64) -> f64 {
    view.y_min + view.y_max - y
}

/// Open a document whose `viewBox` is `view`, with optional metadata.
fn document(view: &Rect, metadata: &SvgMetadata<'_>) -> Document {
    let width = view.width();
    let height = view.height();
    let doc_height = if width > 0.0 {
        DOCUMENT_WIDTH_PX * height / width
    } else {
        DOCUMENT_WIDTH_PX
    };

    let mut doc = Document::new()
        .set("width", DOCUMENT_WIDTH_PX)
        .set("height", doc_height)
        .set("viewBox", (view.x_min, view.y_min, width, height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }
    doc
}

/// Outline of `window` in the flipped coordinate system of `view`.
fn window_outline(window: &Rect, view: &Rect) -> Rectangle {
    Rectangle::new()
        .set("x", window.x_min)
        .set("y", flip_y(view, window.y_max))
        .set("width", window.width())
        .set("height", window.height())
        .set("fill", "none")
        .set("stroke", WINDOW_STROKE)
        .set("stroke-width", 1)
        .set("vector-effect", "non-scaling-stroke")
}

/// One `<path>` per polyline with 2 or more points, grouped under `id`.
fn polyline_group(id: &str, polylines: &[Polyline], view: &Rect, stroke: &str) -> Group {
    let mut group = Group::new().set("id", id);
    for polyline in polylines {
        let d = build_path_data_mapped(polyline, |p| (p.x, flip_y(view, p.y)));
        if d.is_empty() {
            continue;
        }
        group = group.add(
            Path::new()
                .set("d", d)
                .set("fill", "none")
                .set("stroke", stroke)
                .set("stroke-width", 1)
                .set("vector-effect", "non-scaling-stroke"),
        );
    }
    group
}

/// Serialize the SVG document, prepending the XML declaration the `svg`
/// crate omits.
fn finish(doc: &Document) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// Serialize clipped polylines into an SVG document string.
///
/// The `viewBox` equals `window`, which is also drawn as an outline.
/// Each [`Polyline`] with 2 or more points becomes a `<path>` element
/// inside `<g id="clipped">`; shorter polylines are skipped.
///
/// # Examples
///
/// ```
/// use cutlines_clip::{Point, Polyline, Rect};
/// use cutlines_export::{SvgMetadata, to_svg};
///
/// let window = Rect::new(0.0, 10.0, 0.0, 10.0);
/// let polylines = vec![
///     Polyline::new(vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]),
/// ];
/// let metadata = SvgMetadata {
///     title: Some("clipped"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&polylines, &window, &metadata);
/// assert!(svg.contains("<title>clipped</title>"));
/// assert!(svg.contains(r#"viewBox="0 0 10 10""#));
/// assert!(svg.contains("M0,5 L10,5"));
/// ```
#[must_use]
pub fn to_svg(polylines: &[Polyline], window: &Rect, metadata: &SvgMetadata<'_>) -> String {
    let doc = document(window, metadata)
        .add(window_outline(window, window))
        .add(polyline_group("clipped", polylines, window, "black"));
    finish(&doc)
}

/// Serialize the unclipped input and the clipped output into one SVG.
///
/// The `viewBox` is the bounding box of every input point and the
/// window. Inputs are drawn in light grey under `<g id="input">`, the
/// window outline on top of them, and the clipped polylines in black
/// under `<g id="clipped">`.
#[must_use]
pub fn to_comparison_svg(
    input: &[Polyline],
    clipped: &[Polyline],
    window: &Rect,
    metadata: &SvgMetadata<'_>,
) -> String {
    let view = bounding_rect(input, window);
    let doc = document(&view, metadata)
        .add(polyline_group("input", input, &view, INPUT_STROKE))
        .add(window_outline(window, &view))
        .add(polyline_group("clipped", clipped, &view, "black"));
    finish(&doc)
}

/// Smallest window containing `window` and every finite point of
/// `polylines`.
fn bounding_rect(polylines: &[Polyline], window: &Rect) -> Rect {
    polylines
        .iter()
        .flat_map(Polyline::points)
        .filter(|p| p.is_finite())
        .fold(*window, |acc, p| {
            Rect::new(
                acc.x_min.min(p.x),
                acc.x_max.max(p.x),
                acc.y_min.min(p.y),
                acc.y_max.max(p.y),
            )
        })
}
