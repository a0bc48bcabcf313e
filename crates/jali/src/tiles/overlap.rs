//! Overlapping arc tiles - three concentric quarter arcs at two opposite
//! corners (radii 1/4, 2/4 and 3/4 of the cell). The outer arcs of the two
//! corners cross in the middle of the cell.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::{Corner, Square};

const RINGS: [f64; 3] = [0.25, 0.5, 0.75];

pub fn draw_overlapping(origin: Point, size: f64, corner: Corner) -> Path {
    let sq = Square::new(origin, size);
    let mut path = Path::new();
    for c in [corner, corner.opposite()] {
        for ring in RINGS {
            sq.quarter_arc(&mut path, c, ring * size);
        }
    }
    path
}

pub fn overlap_variants() -> Vec<TileVariant> {
    vec![
        TileVariant::new("overlap-tl-br", |o, s| draw_overlapping(o, s, Corner::TopLeft)),
        TileVariant::new("overlap-tr-bl", |o, s| draw_overlapping(o, s, Corner::TopRight)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    #[test]
    fn three_rings_per_corner() {
        let path = draw_overlapping(Point::new(0.0, 0.0), 40.0, Corner::TopRight);
        let radii: Vec<(Point, f64)> = path
            .commands()
            .iter()
            .filter_map(|c| match *c {
                PathCommand::ArcTo { center, radius, .. } => Some((center, radius)),
                _ => None,
            })
            .collect();
        assert_eq!(
            radii,
            vec![
                (Point::new(40.0, 0.0), 10.0),
                (Point::new(40.0, 0.0), 20.0),
                (Point::new(40.0, 0.0), 30.0),
                (Point::new(0.0, 40.0), 10.0),
                (Point::new(0.0, 40.0), 20.0),
                (Point::new(0.0, 40.0), 30.0),
            ]
        );
    }
}
