//! Shared helpers for tile generators.
//!
//! Every generator works on the same square: an origin (top-left corner)
//! and a side length. [`Square`] pre-computes the named points generators
//! need so each variant reads as "from here to there".

use std::f64::consts::FRAC_PI_2;

use crate::geometry::Point;
use crate::path::Path;

/// The cell a tile is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Top-left corner
    pub origin: Point,
    /// Side length
    pub size: f64,
}

/// A corner of the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Angle at which a quarter arc centred on this corner starts.
    ///
    /// Each quarter turn sweeps clockwise (increasing angle) and stays inside
    /// the square: TL 0..pi/2, TR pi/2..pi, BR pi..3pi/2, BL 3pi/2..2pi.
    pub fn sweep_start(self) -> f64 {
        match self {
            Corner::TopLeft => 0.0,
            Corner::TopRight => FRAC_PI_2,
            Corner::BottomRight => 2.0 * FRAC_PI_2,
            Corner::BottomLeft => 3.0 * FRAC_PI_2,
        }
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }
}

impl Square {
    #[inline]
    pub fn new(origin: Point, size: f64) -> Self {
        Self { origin, size }
    }

    /// Point at fractions `(fx, fy)` of the side from the origin.
    #[inline]
    pub fn at(&self, fx: f64, fy: f64) -> Point {
        self.origin.offset(fx * self.size, fy * self.size)
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.at(0.0, 0.0),
            Corner::TopRight => self.at(1.0, 0.0),
            Corner::BottomRight => self.at(1.0, 1.0),
            Corner::BottomLeft => self.at(0.0, 1.0),
        }
    }

    pub fn top_mid(&self) -> Point {
        self.at(0.5, 0.0)
    }

    pub fn right_mid(&self) -> Point {
        self.at(1.0, 0.5)
    }

    pub fn bottom_mid(&self) -> Point {
        self.at(0.5, 1.0)
    }

    pub fn left_mid(&self) -> Point {
        self.at(0.0, 0.5)
    }

    /// Quarter arc of `radius` centred on `corner`, swept into the square.
    ///
    /// Emits a `move_to` at the arc start so the arc flattens as its own
    /// subpath.
    pub fn quarter_arc(&self, path: &mut Path, corner: Corner, radius: f64) {
        let center = self.corner(corner);
        let start = corner.sweep_start();
        path.move_to(center.on_circle(radius, start))
            .arc(center, radius, start, start + FRAC_PI_2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_points() {
        let sq = Square::new(Point::new(10.0, 20.0), 4.0);
        assert_eq!(sq.corner(Corner::BottomRight), Point::new(14.0, 24.0));
        assert_eq!(sq.top_mid(), Point::new(12.0, 20.0));
        assert_eq!(sq.left_mid(), Point::new(10.0, 22.0));
    }

    #[test]
    fn quarter_arcs_start_on_an_edge() {
        let sq = Square::new(Point::new(0.0, 0.0), 10.0);
        for corner in [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft] {
            let mut path = Path::new();
            sq.quarter_arc(&mut path, corner, 5.0);
            let crate::path::PathCommand::MoveTo(start) = path.commands()[0] else {
                panic!("quarter arc must begin with move_to");
            };
            let on_edge = start.x.abs() < 1e-9
                || (start.x - 10.0).abs() < 1e-9
                || start.y.abs() < 1e-9
                || (start.y - 10.0).abs() < 1e-9;
            assert!(on_edge, "{corner:?} arc starts off-edge at {start:?}");
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for corner in [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft] {
            assert_eq!(corner.opposite().opposite(), corner);
        }
    }
}
