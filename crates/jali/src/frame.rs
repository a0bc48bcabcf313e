//! Jali frame contour - the pointed-arch outline around the mesh.
//!
//! The outline is a closed path: two vertical sides and a base made of
//! straight lines, topped by two mirrored cubic Béziers meeting at an apex.
//! The shoulder sits at half the inner height; the curve control points
//! (at `0.254 * h` and `0.4 * shoulder`) pull the arch into an ogee.

use serde::Serialize;

use crate::flatten::{FlattenConfig, flatten_cubic};
use crate::geometry::{Bounds, Point, Polyline};

/// One segment of the contour. Renderers accept these natively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ContourSegment {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// The closed frame outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameContour {
    segments: Vec<ContourSegment>,
    stroke_weight: f64,
}

impl FrameContour {
    /// Build the contour for an inner area starting at `inner_origin`
    /// and reaching `inner_extent` (far corner coordinates, not a size).
    pub fn new(inner_origin: Point, inner_extent: (f64, f64), stroke_weight: f64) -> Self {
        let Point { x: ox, y: oy } = inner_origin;
        let (w, h) = inner_extent;
        let shoulder = 0.5 * h;

        let segments = vec![
            ContourSegment::MoveTo { to: Point::new(ox, shoulder) },
            ContourSegment::LineTo { to: Point::new(ox, h) },
            ContourSegment::LineTo { to: Point::new(w, h) },
            ContourSegment::LineTo { to: Point::new(w, shoulder) },
            ContourSegment::CubicTo {
                ctrl1: Point::new(w, 0.254 * h),
                ctrl2: Point::new(w, 0.4 * shoulder),
                to: Point::new(w / 2.0, oy),
            },
            ContourSegment::CubicTo {
                ctrl1: Point::new(ox, 0.4 * shoulder),
                ctrl2: Point::new(ox, 0.254 * h),
                to: Point::new(ox, shoulder),
            },
            ContourSegment::Close,
        ];

        Self { segments, stroke_weight }
    }

    /// Frame for a target area tessellated with cells of `cell_size`:
    /// inset by one cell on the top/left, reaching one cell short of the
    /// far edges.
    pub fn for_area(width: f64, height: f64, cell_size: f64, stroke_weight: f64) -> Self {
        Self::new(
            Point::new(cell_size, cell_size),
            (width - cell_size, height - cell_size),
            stroke_weight,
        )
    }

    pub fn segments(&self) -> &[ContourSegment] {
        &self.segments
    }

    pub fn stroke_weight(&self) -> f64 {
        self.stroke_weight
    }

    /// Top of the arch.
    pub fn apex(&self) -> Option<Point> {
        self.segments.iter().find_map(|s| match s {
            ContourSegment::CubicTo { to, .. } => Some(*to),
            _ => None,
        })
    }

    /// SVG path data (`M .. L .. C .. Z`).
    pub fn to_path_data(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            parts.push(match segment {
                ContourSegment::MoveTo { to } => format!("M {} {}", to.x, to.y),
                ContourSegment::LineTo { to } => format!("L {} {}", to.x, to.y),
                ContourSegment::CubicTo { ctrl1, ctrl2, to } => format!(
                    "C {} {} {} {} {} {}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                ),
                ContourSegment::Close => "Z".to_string(),
            });
        }
        parts.join(" ")
    }

    /// Approximate the outline as one closed polyline.
    pub fn flatten(&self, config: &FlattenConfig) -> Polyline {
        let mut points: Polyline = Vec::new();
        let mut start: Option<Point> = None;

        for segment in &self.segments {
            match *segment {
                ContourSegment::MoveTo { to } => {
                    start = Some(to);
                    points.push(to);
                }
                ContourSegment::LineTo { to } => points.push(to),
                ContourSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let from = points.last().copied().unwrap_or(to);
                    points.extend(flatten_cubic(from, ctrl1, ctrl2, to, config));
                }
                ContourSegment::Close => {
                    if let (Some(s), Some(last)) = (start, points.last()) {
                        if !last.approx_eq(s, 1e-9) {
                            points.push(s);
                        }
                    }
                }
            }
        }

        points
    }

    /// Bounds of all anchor and control points.
    pub fn bounds(&self) -> Option<Bounds> {
        let points: Vec<Point> = self
            .segments
            .iter()
            .flat_map(|s| match *s {
                ContourSegment::MoveTo { to } | ContourSegment::LineTo { to } => vec![to],
                ContourSegment::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
                ContourSegment::Close => Vec::new(),
            })
            .collect();
        Bounds::of_points(&points)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return p.distance(a);
        }
        let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        p.distance(Point::new(a.x + t * dx, a.y + t * dy))
    }

    fn distance_to_polyline(p: Point, line: &[Point]) -> f64 {
        line.windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn traces_the_documented_outline() {
        let frame = FrameContour::new(Point::new(0.0, 0.0), (100.0, 200.0), 4.0);
        assert_eq!(
            frame.segments()[..4],
            [
                ContourSegment::MoveTo { to: Point::new(0.0, 100.0) },
                ContourSegment::LineTo { to: Point::new(0.0, 200.0) },
                ContourSegment::LineTo { to: Point::new(100.0, 200.0) },
                ContourSegment::LineTo { to: Point::new(100.0, 100.0) },
            ]
        );
        assert_eq!(frame.apex(), Some(Point::new(50.0, 0.0)));
        assert_eq!(frame.segments().last(), Some(&ContourSegment::Close));
        assert_eq!(frame.stroke_weight(), 4.0);
    }

    #[test]
    fn control_points_follow_constants() {
        let frame = FrameContour::new(Point::new(0.0, 0.0), (100.0, 100.0), 1.0);
        let ContourSegment::CubicTo { ctrl1, ctrl2, .. } = frame.segments()[4] else {
            panic!("expected cubic");
        };
        assert!(ctrl1.approx_eq(Point::new(100.0, 25.4), 1e-9));
        assert!(ctrl2.approx_eq(Point::new(100.0, 20.0), 1e-9));
    }

    #[test]
    fn square_contour_is_mirror_symmetric() {
        let frame = FrameContour::new(Point::new(0.0, 0.0), (120.0, 120.0), 2.0);
        let config = FlattenConfig::default();
        let outline = frame.flatten(&config);
        let axis = (0.0 + 120.0) / 2.0;

        for p in &outline {
            let mirrored = Point::new(2.0 * axis - p.x, p.y);
            let d = distance_to_polyline(mirrored, &outline);
            assert!(d < 2.0 * config.tolerance, "{p:?} mirrored is {d} away from the outline");
        }
    }

    #[test]
    fn flattened_outline_is_closed() {
        let frame = FrameContour::for_area(200.0, 200.0, 20.0, 4.0);
        let outline = frame.flatten(&FlattenConfig::default());
        assert!(outline.len() > 6);
        assert!(outline[0].approx_eq(*outline.last().unwrap(), 1e-6));
    }

    #[test]
    fn for_area_insets_by_one_cell() {
        let frame = FrameContour::for_area(200.0, 100.0, 10.0, 1.0);
        let bounds = frame.bounds().unwrap();
        assert_eq!(bounds, Bounds::new(10.0, 10.0, 190.0, 90.0));
    }

    #[test]
    fn path_data_uses_svg_commands() {
        let frame = FrameContour::new(Point::new(0.0, 0.0), (10.0, 10.0), 1.0);
        let data = frame.to_path_data();
        assert!(data.starts_with("M 0 5 L 0 10 L 10 10 L 10 5 C "));
        assert!(data.ends_with(" Z"));
        assert_eq!(data.matches('C').count(), 2);
    }
}
