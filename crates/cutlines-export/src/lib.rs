//! cutlines-export: Pure format serializers (sans-IO)
//!
//! Converts clipped polylines into output formats. Currently supports SVG.

pub mod svg;

pub use svg::{SvgMetadata, build_path_data, to_comparison_svg, to_svg};
