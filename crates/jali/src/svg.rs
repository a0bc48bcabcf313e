//! SVG parsing - import custom tile shapes.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, basic shapes)
//! and then walks the tree collecting every path. All paths of one file
//! form a single [`TileShape`]: the file is the tile.
//!
//! Raw path data (`d="..."` strings) goes through svgtypes instead, which
//! normalises relative commands, shorthands and elliptical arcs into
//! absolute moves, lines and curves.
//!
//! ## Curve Flattening
//!
//! Shapes keep their curves in the output path data; curves are only
//! flattened (with lyon_geom, via [`crate::flatten`]) to measure the
//! bounding box that clones are scaled from.

use thiserror::Error;

use crate::flatten::{FlattenConfig, flatten_cubic};
use crate::geometry::{Bounds, Point};

/// Error type for SVG import.
///
/// ## Rust Lesson #20: Error Handling
///
/// Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
/// `Display` and `std::error::Error` impls from the `#[error]` attributes.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    ParseError(String),
    #[error("No paths found in SVG")]
    NoPaths,
}

/// An imported shape usable as a custom tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileShape {
    /// Absolute SVG path data
    pub data: String,
    /// Extent of the geometry; clones map this box onto a cell
    pub bounds: Bounds,
    /// Optional ID from the source SVG
    pub id: Option<String>,
}

/// Absolute path segment in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ShapeSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Import every path of an SVG document as one tile shape.
pub fn extract_shape_from_svg(svg_content: &str) -> Result<TileShape, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut segments = Vec::new();
    let mut first_id = None;
    extract_from_group(tree.root(), &mut segments, &mut first_id);

    build_shape(&segments, first_id)
}

/// Parse raw path data (`M 0 0 L 10 10 ...`) as a tile shape.
pub fn shape_from_path_data(data: &str) -> Result<TileShape, SvgError> {
    let mut segments = Vec::new();

    for segment in svgtypes::SimplifyingPathParser::from(data) {
        let segment = segment.map_err(|e| SvgError::ParseError(e.to_string()))?;
        segments.push(match segment {
            svgtypes::SimplePathSegment::MoveTo { x, y } => ShapeSegment::MoveTo(Point::new(x, y)),
            svgtypes::SimplePathSegment::LineTo { x, y } => ShapeSegment::LineTo(Point::new(x, y)),
            svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                ShapeSegment::QuadTo(Point::new(x1, y1), Point::new(x, y))
            }
            svgtypes::SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                ShapeSegment::CubicTo(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y))
            }
            svgtypes::SimplePathSegment::ClosePath => ShapeSegment::Close,
        });
    }

    build_shape(&segments, None)
}

fn extract_from_group(group: &usvg::Group, segments: &mut Vec<ShapeSegment>, first_id: &mut Option<String>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, segments, first_id),
            usvg::Node::Path(path) => {
                if first_id.is_none() && !path.id().is_empty() {
                    *first_id = Some(path.id().to_string());
                }
                extract_path(path, segments);
            }
            // Ignore text, images, etc.
            _ => {}
        }
    }
}

/// Append one usvg path, mapped through its absolute transform.
fn extract_path(path: &usvg::Path, segments: &mut Vec<ShapeSegment>) {
    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| {
        let (x, y) = (p.x as f64, p.y as f64);
        Point::new(
            ts.sx as f64 * x + ts.kx as f64 * y + ts.tx as f64,
            ts.ky as f64 * x + ts.sy as f64 * y + ts.ty as f64,
        )
    };

    for cmd in path.data().segments() {
        segments.push(match cmd {
            usvg::tiny_skia_path::PathSegment::MoveTo(p) => ShapeSegment::MoveTo(map(p)),
            usvg::tiny_skia_path::PathSegment::LineTo(p) => ShapeSegment::LineTo(map(p)),
            usvg::tiny_skia_path::PathSegment::QuadTo(c, p) => ShapeSegment::QuadTo(map(c), map(p)),
            usvg::tiny_skia_path::PathSegment::CubicTo(c1, c2, p) => {
                ShapeSegment::CubicTo(map(c1), map(c2), map(p))
            }
            usvg::tiny_skia_path::PathSegment::Close => ShapeSegment::Close,
        });
    }
}

fn build_shape(segments: &[ShapeSegment], id: Option<String>) -> Result<TileShape, SvgError> {
    let bounds = measure(segments).ok_or(SvgError::NoPaths)?;
    Ok(TileShape {
        data: to_path_data(segments),
        bounds,
        id,
    })
}

/// Bounds of the geometry, curves flattened.
fn measure(segments: &[ShapeSegment]) -> Option<Bounds> {
    let config = FlattenConfig::default();
    let mut points = Vec::new();
    let mut current = None;
    let mut subpath_start = None;

    for segment in segments {
        match *segment {
            ShapeSegment::MoveTo(p) => {
                points.push(p);
                current = Some(p);
                subpath_start = Some(p);
            }
            ShapeSegment::LineTo(p) => {
                points.push(p);
                current = Some(p);
            }
            ShapeSegment::QuadTo(c, p) => {
                let from = current.unwrap_or(p);
                // Degree-elevate to a cubic.
                let c1 = Point::new(from.x + 2.0 / 3.0 * (c.x - from.x), from.y + 2.0 / 3.0 * (c.y - from.y));
                let c2 = Point::new(p.x + 2.0 / 3.0 * (c.x - p.x), p.y + 2.0 / 3.0 * (c.y - p.y));
                points.push(from);
                points.extend(flatten_cubic(from, c1, c2, p, &config));
                current = Some(p);
            }
            ShapeSegment::CubicTo(c1, c2, p) => {
                let from = current.unwrap_or(p);
                points.push(from);
                points.extend(flatten_cubic(from, c1, c2, p, &config));
                current = Some(p);
            }
            ShapeSegment::Close => current = subpath_start,
        }
    }

    Bounds::of_points(&points)
}

fn to_path_data(segments: &[ShapeSegment]) -> String {
    segments
        .iter()
        .map(|segment| match *segment {
            ShapeSegment::MoveTo(p) => format!("M {} {}", p.x, p.y),
            ShapeSegment::LineTo(p) => format!("L {} {}", p.x, p.y),
            ShapeSegment::QuadTo(c, p) => format!("Q {} {} {} {}", c.x, c.y, p.x, p.y),
            ShapeSegment::CubicTo(c1, c2, p) => {
                format!("C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
            ShapeSegment::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_rect() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="10" y="10" width="80" height="40"/>
            </svg>
        "#;

        let shape = extract_shape_from_svg(svg).unwrap();
        assert_eq!(shape.bounds, Bounds::new(10.0, 10.0, 90.0, 50.0));
        assert!(shape.data.starts_with("M 10 10"));
    }

    #[test]
    fn all_paths_form_one_shape() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path id="first" d="M 0 0 L 10 10"/>
                <path d="M 50 50 L 60 80"/>
            </svg>
        "#;

        let shape = extract_shape_from_svg(svg).unwrap();
        assert_eq!(shape.bounds, Bounds::new(0.0, 0.0, 60.0, 80.0));
        assert_eq!(shape.data.matches('M').count(), 2);
        assert_eq!(shape.id.as_deref(), Some("first"));
    }

    #[test]
    fn transforms_are_applied() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <g transform="translate(20 30)">
                    <path d="M 0 0 L 10 10"/>
                </g>
            </svg>
        "#;

        let shape = extract_shape_from_svg(svg).unwrap();
        assert_eq!(shape.bounds, Bounds::new(20.0, 30.0, 30.0, 40.0));
    }

    #[test]
    fn no_paths_error() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            </svg>
        "#;

        let result = extract_shape_from_svg(svg);
        assert!(matches!(result, Err(SvgError::NoPaths)));
    }

    #[test]
    fn malformed_svg_is_a_parse_error() {
        let result = extract_shape_from_svg("<svg");
        assert!(matches!(result, Err(SvgError::ParseError(_))));
    }

    #[test]
    fn path_data_relative_commands_become_absolute() {
        let shape = shape_from_path_data("m 10 10 l 5 0 l 0 5 z").unwrap();
        assert_eq!(shape.bounds, Bounds::new(10.0, 10.0, 15.0, 15.0));
        assert!(shape.data.starts_with("M 10 10 L 15 10 L 15 15"));
    }

    #[test]
    fn curve_bounds_use_the_curve_not_its_controls() {
        // Control points poke up to y = -40; the curve itself peaks at -30.
        let shape = shape_from_path_data("M 0 0 C 0 -40 40 -40 40 0").unwrap();
        assert!(shape.bounds.min_y > -31.0 && shape.bounds.min_y < -29.0,
            "curve top should be near -30, got {}", shape.bounds.min_y);
    }

    #[test]
    fn empty_path_data_has_no_paths() {
        assert!(matches!(shape_from_path_data(""), Err(SvgError::NoPaths)));
    }
}
