//! Core geometry types for jali.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values are copied implicitly
//! - `PartialEq` = can compare with `==`
//!
//! Everything in this module is `Copy`: points and boxes are passed around
//! by value the same way you would pass a number.

use serde::Serialize;

/// A 2D point in canvas units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A flattened subpath: an ordered run of points stroked as one shape.
pub type Polyline = Vec<Point>;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point offset by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// True when both coordinates are within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Point on the circle of `radius` around `self` at `angle` radians.
    ///
    /// Angle 0 points along +x; with y pointing down, angles grow clockwise
    /// on screen.
    #[inline]
    pub fn on_circle(&self, radius: f64, angle: f64) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounding box of a point set, `None` when empty.
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// Rust has no `null`. An empty input has no bounds, and the type says
    /// so: callers must handle `None` before touching the coordinates.
    pub fn of_points<'a, I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds::new(p.x, p.y, p.x, p.y),
                Some(b) => b.include(*p),
            })
        })
    }

    /// Grow the box to contain `p`.
    #[inline]
    pub fn include(self, p: Point) -> Bounds {
        Bounds::new(
            self.min_x.min(p.x),
            self.min_y.min(p.y),
            self.max_x.max(p.x),
            self.max_y.max(p.y),
        )
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Whether `p` lies inside the box, edges included, with `epsilon` slack.
    #[inline]
    pub fn contains(&self, p: Point, epsilon: f64) -> bool {
        p.x >= self.min_x - epsilon
            && p.x <= self.max_x + epsilon
            && p.y >= self.min_y - epsilon
            && p.y <= self.max_y + epsilon
    }
}

// ============================================================================
// TESTS
// ============================================================================
