//! Diagonal tiles - straight strokes between edge midpoints.
//!
//! Single diagonals join two adjacent edge midpoints; adjacent cells share
//! those midpoints, so random placement forms continuous zigzags and
//! diamonds. The mesh variants combine two strokes per cell.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::Square;

/// Which pair of adjacent midpoints a diagonal joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    TopRight,
    RightBottom,
    BottomLeft,
    LeftTop,
}

pub fn draw_diagonal(origin: Point, size: f64, diagonal: Diagonal) -> Path {
    let sq = Square::new(origin, size);
    let (from, to) = match diagonal {
        Diagonal::TopRight => (sq.top_mid(), sq.right_mid()),
        Diagonal::RightBottom => (sq.right_mid(), sq.bottom_mid()),
        Diagonal::BottomLeft => (sq.bottom_mid(), sq.left_mid()),
        Diagonal::LeftTop => (sq.left_mid(), sq.top_mid()),
    };
    let mut path = Path::new();
    path.segment(from, to);
    path
}

pub fn diagonal_variants() -> Vec<TileVariant> {
    vec![
        TileVariant::new("diag-top-right", |o, s| draw_diagonal(o, s, Diagonal::TopRight)),
        TileVariant::new("diag-right-bottom", |o, s| draw_diagonal(o, s, Diagonal::RightBottom)),
        TileVariant::new("diag-bottom-left", |o, s| draw_diagonal(o, s, Diagonal::BottomLeft)),
        TileVariant::new("diag-left-top", |o, s| draw_diagonal(o, s, Diagonal::LeftTop)),
    ]
}

/// Both corner-to-corner diagonals.
pub fn draw_cross(origin: Point, size: f64) -> Path {
    let sq = Square::new(origin, size);
    let mut path = Path::new();
    path.segment(sq.at(0.0, 0.0), sq.at(1.0, 1.0))
        .segment(sq.at(1.0, 0.0), sq.at(0.0, 1.0));
    path
}

/// Left midpoint up to the top midpoint and back down to the right.
pub fn draw_chevron(origin: Point, size: f64) -> Path {
    let sq = Square::new(origin, size);
    let mut path = Path::new();
    path.move_to(sq.left_mid())
        .line_to(sq.top_mid())
        .line_to(sq.right_mid());
    path
}

/// Midpoint-to-midpoint vertical and horizontal strokes.
pub fn draw_plus(origin: Point, size: f64) -> Path {
    let sq = Square::new(origin, size);
    let mut path = Path::new();
    path.segment(sq.top_mid(), sq.bottom_mid())
        .segment(sq.left_mid(), sq.right_mid());
    path
}

pub fn mesh_variants() -> Vec<TileVariant> {
    vec![
        TileVariant::new("mesh-x", draw_cross),
        TileVariant::new("mesh-chevron", draw_chevron),
        TileVariant::new("mesh-plus", draw_plus),
    ]
}
