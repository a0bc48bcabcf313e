//! Corner arc tiles - concentric quarter circles fanning from one corner.
//!
//! Similar in spirit to Truchet tiles, but every arc of a tile shares the
//! same corner, so neighbouring cells sweep into each other.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::{Corner, Square};

/// Draw `count` quarter arcs of radius `i * size / count` around `corner`.
pub fn draw_corner_arcs(origin: Point, size: f64, count: usize, corner: Corner) -> Path {
    let sq = Square::new(origin, size);
    let step = size / count as f64;
    let mut path = Path::new();

    for i in 1..=count {
        sq.quarter_arc(&mut path, corner, i as f64 * step);
    }

    path
}

/// One variant per corner: TL, TR, BL, BR.
pub fn corner_variants(count: usize) -> Vec<TileVariant> {
    vec![
        TileVariant::new("corner-tl", move |o, s| draw_corner_arcs(o, s, count, Corner::TopLeft)),
        TileVariant::new("corner-tr", move |o, s| draw_corner_arcs(o, s, count, Corner::TopRight)),
        TileVariant::new("corner-bl", move |o, s| draw_corner_arcs(o, s, count, Corner::BottomLeft)),
        TileVariant::new("corner-br", move |o, s| draw_corner_arcs(o, s, count, Corner::BottomRight)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn arcs(path: &Path) -> Vec<(Point, f64, f64)> {
        path.commands()
            .iter()
            .filter_map(|c| match *c {
                PathCommand::ArcTo { center, radius, start_angle, .. } => Some((center, radius, start_angle)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn top_left_radii_grow_by_step() {
        let path = draw_corner_arcs(Point::new(0.0, 0.0), 12.0, 3, Corner::TopLeft);
        let radii: Vec<f64> = arcs(&path).iter().map(|a| a.1).collect();
        assert_eq!(radii, vec![4.0, 8.0, 12.0]);
    }

    #[test]
    fn bottom_right_arcs_centre_on_corner() {
        let path = draw_corner_arcs(Point::new(10.0, 10.0), 10.0, 2, Corner::BottomRight);
        for (center, _, start) in arcs(&path) {
            assert_eq!(center, Point::new(20.0, 20.0));
            assert_eq!(start, PI);
        }
    }

    #[test]
    fn top_right_moves_to_arc_start() {
        let path = draw_corner_arcs(Point::new(0.0, 0.0), 10.0, 1, Corner::TopRight);
        let PathCommand::MoveTo(start) = path.commands()[0] else {
            panic!("expected move_to");
        };
        assert!(start.approx_eq(Point::new(10.0, 10.0), 1e-9));
        let PathCommand::ArcTo { start_angle, end_angle, .. } = path.commands()[1] else {
            panic!("expected arc");
        };
        assert_eq!(start_angle, FRAC_PI_2);
        assert_eq!(end_angle, PI);
    }
}
