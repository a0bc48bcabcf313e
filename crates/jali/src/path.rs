//! Abstract drawing paths.
//!
//! A [`Path`] is a list of move/line/arc commands, independent of any
//! render target. Tile generators build one per cell; the flattener
//! ([`crate::flatten`]) turns it into polylines.

use std::f64::consts::TAU;

use thiserror::Error;

use crate::geometry::Point;

/// One drawing command.
///
/// Angles are radians, 0 along +x, growing clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

/// Errors raised while interpreting a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A `LineTo` appeared before any point was established.
    #[error("line_to at command {index} has no current point")]
    NoCurrentPoint { index: usize },
}

/// An ordered sequence of drawing commands, possibly several disconnected
/// subpaths.
///
/// ## Rust Lesson #8: Builder Methods
///
/// The drawing methods take `&mut self` and return `&mut Self`, so calls
/// can be chained: `path.move_to(a).line_to(b)`. The path is still owned by
/// whoever created it; the chain only borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new subpath at `p`.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    /// Straight segment from the current point to `p`.
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    /// Circular arc around `center`.
    ///
    /// No preceding `move_to` is required; the arc starts at
    /// `center + radius * (cos start, sin start)`. Radius and angle order
    /// are not validated.
    pub fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            center,
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    /// Convenience for a disconnected two-point segment.
    pub fn segment(&mut self, from: Point, to: Point) -> &mut Self {
        self.move_to(from).line_to(to)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when the path contains at least one arc.
    pub fn has_arcs(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::ArcTo { .. }))
    }

    /// Append all commands of `other`.
    pub fn extend(&mut self, other: Path) {
        self.commands.extend(other.commands);
    }
}

impl PathCommand {
    /// The point the pen rests on after this command.
    pub fn end_point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::ArcTo { center, radius, start_angle, end_angle } => {
                center.on_circle(radius, start_angle + arc_sweep(start_angle, end_angle))
            }
        }
    }
}

/// Sweep from `start` to `end` in the increasing-angle direction.
///
/// Negative spans wrap modulo a full turn; spans beyond a full turn are
/// clamped to one turn.
pub fn arc_sweep(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep < 0.0 {
        sweep.rem_euclid(TAU)
    } else {
        sweep.min(TAU)
    }
}

/// Start point of an arc.
#[inline]
pub fn arc_start(center: Point, radius: f64, start_angle: f64) -> Point {
    center.on_circle(radius, start_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn builder_chains_commands() {
        let mut p = Path::new();
        p.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .arc(Point::new(0.0, 0.0), 5.0, 0.0, FRAC_PI_2);
        assert_eq!(p.len(), 3);
        assert!(p.has_arcs());
        assert_eq!(p.commands()[0], PathCommand::MoveTo(Point::new(0.0, 0.0)));
    }

    #[test]
    fn sweep_wraps_backwards_spans() {
        assert!((arc_sweep(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-12);
        assert!((arc_sweep(PI, FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((arc_sweep(0.0, 3.0 * TAU) - TAU).abs() < 1e-12);
        assert_eq!(arc_sweep(1.0, 1.0), 0.0);
    }

    #[test]
    fn arc_end_point() {
        let cmd = PathCommand::ArcTo {
            center: Point::new(10.0, 10.0),
            radius: 10.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
        };
        assert!(cmd.end_point().approx_eq(Point::new(10.0, 20.0), 1e-9));
    }

    #[test]
    fn extend_appends() {
        let mut a = Path::new();
        a.segment(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let mut b = Path::new();
        b.segment(Point::new(2.0, 2.0), Point::new(3.0, 3.0));
        a.extend(b);
        assert_eq!(a.len(), 4);
    }
}
