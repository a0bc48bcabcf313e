//! Rail tiles - evenly spaced parallel lines.
//!
//! Line `i` of `count` sits at offset `i * size / count` for `i = 1..=count`.
//! Offset 0 is never drawn, so a single rail lies on the far edge of the
//! cell rather than through its centre.

use crate::geometry::Point;
use crate::path::Path;

use super::TileVariant;
use super::util::Square;

/// Rail direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Draw `count` rails along `axis`.
pub fn draw_rails(origin: Point, size: f64, count: usize, axis: Axis) -> Path {
    let sq = Square::new(origin, size);
    let step = size / count as f64;
    let mut path = Path::new();

    for i in 1..=count {
        let offset = i as f64 * step;
        match axis {
            Axis::Horizontal => path.segment(sq.origin.offset(0.0, offset), sq.origin.offset(size, offset)),
            Axis::Vertical => path.segment(sq.origin.offset(offset, 0.0), sq.origin.offset(offset, size)),
        };
    }

    path
}

/// Both rail orientations, horizontal first.
pub fn rail_variants(count: usize) -> Vec<TileVariant> {
    vec![
        TileVariant::new("rails-h", move |o, s| draw_rails(o, s, count, Axis::Horizontal)),
        TileVariant::new("rails-v", move |o, s| draw_rails(o, s, count, Axis::Vertical)),
    ]
}
