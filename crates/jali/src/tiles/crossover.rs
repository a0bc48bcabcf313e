//! Cross-over arc tiles.
//!
//! A pair of half-size quarter arcs at opposite corners, plus short stubs
//! where the other strand would pass underneath. Placed side by side the
//! arcs link up across cell edges and the stubs read as the strand dipping
//! under, giving a woven diagonal look.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::{Corner, Square};

/// Stub length as a fraction of the cell, measured along each axis.
const STUB: f64 = 0.25;

fn corner_stub(path: &mut Path, sq: &Square, corner: Corner) {
    let from = sq.corner(corner);
    let toward = sq.corner(corner.opposite());
    let dx = (toward.x - from.x) * STUB;
    let dy = (toward.y - from.y) * STUB;
    path.segment(from, from.offset(dx, dy));
}

/// Arcs at `corner` and its opposite, stubs on the other two corners.
pub fn draw_diagonal_weave(origin: Point, size: f64, corner: Corner) -> Path {
    let sq = Square::new(origin, size);
    let radius = size / 2.0;
    let mut path = Path::new();

    sq.quarter_arc(&mut path, corner, radius);
    sq.quarter_arc(&mut path, corner.opposite(), radius);

    let (a, b) = match corner {
        Corner::TopLeft | Corner::BottomRight => (Corner::TopRight, Corner::BottomLeft),
        Corner::TopRight | Corner::BottomLeft => (Corner::TopLeft, Corner::BottomRight),
    };
    corner_stub(&mut path, &sq, a);
    corner_stub(&mut path, &sq, b);

    path
}

/// TR and BL arcs continued by horizontal stubs from the side midpoints.
pub fn draw_bar_weave(origin: Point, size: f64) -> Path {
    let sq = Square::new(origin, size);
    let radius = size / 2.0;
    let mut path = Path::new();

    sq.quarter_arc(&mut path, Corner::TopRight, radius);
    sq.quarter_arc(&mut path, Corner::BottomLeft, radius);

    let left = sq.left_mid();
    let right = sq.right_mid();
    path.segment(left, left.offset(size * STUB, 0.0));
    path.segment(right, right.offset(-size * STUB, 0.0));

    path
}

pub fn crossover_variants() -> Vec<TileVariant> {
    vec![
        TileVariant::new("weave-tl-br", |o, s| draw_diagonal_weave(o, s, Corner::TopLeft)),
        TileVariant::new("weave-tr-bl", |o, s| draw_diagonal_weave(o, s, Corner::TopRight)),
        TileVariant::new("weave-bar", draw_bar_weave),
    ]
}
