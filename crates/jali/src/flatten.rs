//! Path flattening - turn abstract paths into polylines.
//!
//! Lines pass through untouched. Arcs and the frame's cubic curves are
//! approximated with lyon_geom, which picks the segment count from a
//! tolerance (maximum distance between the curve and its chords).
//!
//! ## Subpath rules
//!
//! - `MoveTo` always starts a new subpath.
//! - `LineTo` extends the current subpath; it is an error when no point has
//!   been established yet.
//! - `ArcTo` continues the current subpath only when the pen was placed by a
//!   `MoveTo`/`LineTo` exactly at the arc's start. Otherwise, including two
//!   arcs in a row, it opens a fresh subpath at its own start point.
//!
//! Subpaths with fewer than two points (a bare `MoveTo`) are dropped.
//! Output order follows input order: paths in sequence, subpaths in the
//! order they were drawn.

use lyon_geom::{Angle, Arc, CubicBezierSegment, LineSegment, point, vector};

use crate::geometry::{Point, Polyline};
use crate::path::{Path, PathCommand, PathError, arc_start, arc_sweep};

/// Distance under which an arc start counts as the current point.
const JOIN_EPSILON: f64 = 1e-6;

/// Floor for the tolerance; anything smaller explodes the point count.
const MIN_TOLERANCE: f64 = 1e-4;

/// Configuration for flattening.
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Maximum chord deviation in canvas units.
    /// Default: 0.1 (sub-pixel at px scale)
    pub tolerance: f64,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl FlattenConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn effective_tolerance(&self) -> f64 {
        if self.tolerance.is_finite() {
            self.tolerance.max(MIN_TOLERANCE)
        } else {
            FlattenConfig::default().tolerance
        }
    }
}

/// Flatten many paths, concatenating their polylines in order.
pub fn flatten_paths(paths: &[Path], config: &FlattenConfig) -> Result<Vec<Polyline>, PathError> {
    let mut polylines = Vec::new();
    for path in paths {
        flatten_into(path, config, &mut polylines)?;
    }
    Ok(polylines)
}

/// Flatten one path into zero or more polylines.
pub fn flatten_path(path: &Path, config: &FlattenConfig) -> Result<Vec<Polyline>, PathError> {
    let mut polylines = Vec::new();
    flatten_into(path, config, &mut polylines)?;
    Ok(polylines)
}

fn flatten_into(path: &Path, config: &FlattenConfig, out: &mut Vec<Polyline>) -> Result<(), PathError> {
    let tolerance = config.effective_tolerance();
    let mut current: Polyline = Vec::new();
    // Whether the pen was placed by a move/line (and may be joined by an arc).
    let mut linkable = false;

    for (index, command) in path.commands().iter().enumerate() {
        match *command {
            PathCommand::MoveTo(p) => {
                finish_subpath(&mut current, out);
                current.push(p);
                linkable = true;
            }
            PathCommand::LineTo(p) => {
                if current.is_empty() {
                    return Err(PathError::NoCurrentPoint { index });
                }
                current.push(p);
                linkable = true;
            }
            PathCommand::ArcTo { center, radius, start_angle, end_angle } => {
                let start = arc_start(center, radius, start_angle);
                let joins = linkable
                    && current
                        .last()
                        .is_some_and(|last| last.approx_eq(start, JOIN_EPSILON));
                if !joins {
                    finish_subpath(&mut current, out);
                    current.push(start);
                }
                append_arc(&mut current, center, radius, start_angle, end_angle, tolerance);
                linkable = false;
            }
        }
    }

    finish_subpath(&mut current, out);
    Ok(())
}

fn finish_subpath(current: &mut Polyline, out: &mut Vec<Polyline>) {
    let subpath = std::mem::take(current);
    if subpath.len() >= 2 {
        out.push(subpath);
    }
}

/// Append the points of an arc after its (already pushed) start point.
fn append_arc(
    current: &mut Polyline,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    tolerance: f64,
) {
    let sweep = arc_sweep(start_angle, end_angle);

    // Zero radius or zero sweep: a degenerate arc that ends where it starts.
    if !(radius > 0.0) || sweep == 0.0 || !sweep.is_finite() {
        current.push(center.on_circle(radius.max(0.0), start_angle + sweep));
        return;
    }

    let arc = Arc {
        center: point(center.x, center.y),
        radii: vector(radius, radius),
        start_angle: Angle::radians(start_angle),
        sweep_angle: Angle::radians(sweep),
        x_rotation: Angle::radians(0.0),
    };

    arc.for_each_flattened(tolerance, &mut |segment: &LineSegment<f64>| {
        current.push(Point::new(segment.to.x, segment.to.y));
    });
}

/// Flatten a cubic Bézier curve, returning the points after `from`.
pub fn flatten_cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point, config: &FlattenConfig) -> Vec<Point> {
    let curve = CubicBezierSegment {
        from: point(from.x, from.y),
        ctrl1: point(ctrl1.x, ctrl1.y),
        ctrl2: point(ctrl2.x, ctrl2.y),
        to: point(to.x, to.y),
    };

    let mut points = Vec::new();
    curve.for_each_flattened(config.effective_tolerance(), &mut |segment: &LineSegment<f64>| {
        points.push(Point::new(segment.to.x, segment.to.y));
    });
    points
}

// ============================================================================
// TESTS
// ============================================================================
