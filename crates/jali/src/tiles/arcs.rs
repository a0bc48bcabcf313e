//! Plain arc tiles - half-size quarter arcs on a chosen set of corners.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::{Corner, Square};

/// Quarter arcs of radius `size / 2` on each listed corner.
pub fn draw_corner_set(origin: Point, size: f64, corners: &[Corner]) -> Path {
    let sq = Square::new(origin, size);
    let mut path = Path::new();
    for &corner in corners {
        sq.quarter_arc(&mut path, corner, size / 2.0);
    }
    path
}

pub fn arc_variants() -> Vec<TileVariant> {
    use Corner::*;

    vec![
        TileVariant::new("empty", |_, _| Path::new()),
        TileVariant::new("arc-tl", |o, s| draw_corner_set(o, s, &[TopLeft])),
        TileVariant::new("arcs-tl-br", |o, s| draw_corner_set(o, s, &[TopLeft, BottomRight])),
        TileVariant::new("arcs-tr-bl", |o, s| draw_corner_set(o, s, &[TopRight, BottomLeft])),
        TileVariant::new("arcs-tl-tr-bl", |o, s| draw_corner_set(o, s, &[TopLeft, TopRight, BottomLeft])),
        TileVariant::new("arcs-all", |o, s| {
            draw_corner_set(o, s, &[TopLeft, TopRight, BottomRight, BottomLeft])
        }),
    ]
}
