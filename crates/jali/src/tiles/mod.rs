//! Tile library.
//!
//! A tile family is a non-empty list of interchangeable variants; each
//! variant draws one cell as a [`Path`] given the cell's top-left corner and
//! side length. Variants are deterministic: randomness only enters when the
//! tessellation engine picks which variant goes into a cell.

pub mod util;

mod arcs;
mod corner;
mod crossover;
mod diagonal;
mod overlap;
mod rails;

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Point;
use crate::path::Path;
use crate::picker::Picker;

pub use arcs::{arc_variants, draw_corner_set};
pub use corner::{corner_variants, draw_corner_arcs};
pub use crossover::{crossover_variants, draw_bar_weave, draw_diagonal_weave};
pub use diagonal::{Diagonal, diagonal_variants, draw_chevron, draw_cross, draw_diagonal, draw_plus, mesh_variants};
pub use overlap::{draw_overlapping, overlap_variants};
pub use rails::{Axis, draw_rails, rail_variants};
pub use util::{Corner, Square};

/// A boxed tile generator: `(origin, size) -> Path`.
pub type TileFn = Box<dyn Fn(Point, f64) -> Path + Send + Sync>;

/// One named way of drawing a cell.
pub struct TileVariant {
    name: &'static str,
    draw: TileFn,
}

impl TileVariant {
    pub fn new<F>(name: &'static str, draw: F) -> Self
    where
        F: Fn(Point, f64) -> Path + Send + Sync + 'static,
    {
        Self { name, draw: Box::new(draw) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Draw this variant into the cell at `origin` with side `size`.
    #[inline]
    pub fn draw(&self, origin: Point, size: f64) -> Path {
        (self.draw)(origin, size)
    }
}

impl fmt::Debug for TileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TileVariant").field(&self.name).finish()
    }
}

/// Available tile families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Rails,
    CornerArcs,
    ArcSweeps,
    CrossOverArcs,
    Arcs,
    Diagonals,
    DiagonalMesh,
    OverlappingArcs,
}

impl TileKind {
    /// Get all available families.
    pub fn all() -> &'static [TileKind] {
        &[
            TileKind::Rails,
            TileKind::CornerArcs,
            TileKind::ArcSweeps,
            TileKind::CrossOverArcs,
            TileKind::Arcs,
            TileKind::Diagonals,
            TileKind::DiagonalMesh,
            TileKind::OverlappingArcs,
        ]
    }

    /// Family name as used in requests.
    pub fn name(&self) -> &'static str {
        match self {
            TileKind::Rails => "rails",
            TileKind::CornerArcs => "cornerArcs",
            TileKind::ArcSweeps => "arcSweeps",
            TileKind::CrossOverArcs => "crossOverArcs",
            TileKind::Arcs => "arcs",
            TileKind::Diagonals => "diagonals",
            TileKind::DiagonalMesh => "diagonalMesh",
            TileKind::OverlappingArcs => "overlappingArcs",
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            TileKind::Rails => "Parallel rails, horizontal or vertical",
            TileKind::CornerArcs => "Concentric quarter arcs fanning from a corner",
            TileKind::ArcSweeps => "Rails and corner arcs mixed",
            TileKind::CrossOverArcs => "Opposite-corner arcs with weave stubs",
            TileKind::Arcs => "Half-size arcs on zero to four corners",
            TileKind::Diagonals => "Single midpoint-to-midpoint diagonal",
            TileKind::DiagonalMesh => "X, chevron or plus of two strokes",
            TileKind::OverlappingArcs => "Three concentric arcs at two opposite corners",
        }
    }

    /// Whether the `count` parameter changes this family's output.
    pub fn uses_count(&self) -> bool {
        matches!(self, TileKind::Rails | TileKind::CornerArcs | TileKind::ArcSweeps)
    }

    /// Build the ordered variant list. `count` is clamped to at least 1.
    pub fn variants(&self, count: usize) -> Vec<TileVariant> {
        let count = count.max(1);
        match self {
            TileKind::Rails => rail_variants(count),
            TileKind::CornerArcs => corner_variants(count),
            TileKind::ArcSweeps => {
                let mut variants = rail_variants(count);
                variants.extend(corner_variants(count));
                variants
            }
            TileKind::CrossOverArcs => crossover_variants(),
            TileKind::Arcs => arc_variants(),
            TileKind::Diagonals => diagonal_variants(),
            TileKind::DiagonalMesh => mesh_variants(),
            TileKind::OverlappingArcs => overlap_variants(),
        }
    }

    /// Parse a family from its name or a common alias.
    pub fn from_name(name: &str) -> Option<TileKind> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "rails" | "rail" => Some(TileKind::Rails),
            "cornerarcs" | "corners" => Some(TileKind::CornerArcs),
            "arcsweeps" | "sweeps" => Some(TileKind::ArcSweeps),
            "crossoverarcs" | "crossover" | "weave" => Some(TileKind::CrossOverArcs),
            "arcs" => Some(TileKind::Arcs),
            "diagonals" | "diagonal" => Some(TileKind::Diagonals),
            "diagonalmesh" | "mesh" => Some(TileKind::DiagonalMesh),
            "overlappingarcs" | "overlapping" => Some(TileKind::OverlappingArcs),
            _ => None,
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A family ready for tessellation. Never empty.
#[derive(Debug)]
pub struct TileFamily {
    kind: TileKind,
    variants: Vec<TileVariant>,
}

impl TileFamily {
    /// Build `kind` with the given `count`.
    pub fn build(kind: TileKind, count: usize) -> Self {
        let variants = kind.variants(count);
        debug_assert!(!variants.is_empty(), "tile family {kind} has no variants");
        Self { kind, variants }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Pick one variant uniformly at random.
    pub fn pick<'a>(&'a self, picker: &mut Picker) -> Option<&'a TileVariant> {
        picker.pick(&self.variants)
    }
}

/// Builds the variant list for a family from the `count` parameter.
pub type FamilyBuilder = fn(usize) -> Vec<TileVariant>;

/// Explicit table from family to builder, created once at startup.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    builders: BTreeMap<TileKind, FamilyBuilder>,
}

impl TileRegistry {
    /// Registry with every built-in family.
    pub fn standard() -> Self {
        let mut registry = Self { builders: BTreeMap::new() };
        for &kind in TileKind::all() {
            registry.register(kind, builder_for(kind));
        }
        registry
    }

    /// Add or replace a family builder.
    pub fn register(&mut self, kind: TileKind, builder: FamilyBuilder) {
        self.builders.insert(kind, builder);
    }

    /// Drop a family; later lookups for it return `None`.
    pub fn unregister(&mut self, kind: TileKind) {
        self.builders.remove(&kind);
    }

    pub fn kinds(&self) -> impl Iterator<Item = TileKind> + '_ {
        self.builders.keys().copied()
    }

    /// Build the family for `kind`, or `None` when it is not registered or
    /// its builder produced no variants.
    pub fn family(&self, kind: TileKind, count: usize) -> Option<TileFamily> {
        let builder = self.builders.get(&kind)?;
        let variants = builder(count.max(1));
        if variants.is_empty() {
            return None;
        }
        Some(TileFamily { kind, variants })
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn builder_for(kind: TileKind) -> FamilyBuilder {
    match kind {
        TileKind::Rails => rail_variants,
        TileKind::CornerArcs => corner_variants,
        TileKind::ArcSweeps => |count| TileKind::ArcSweeps.variants(count),
        TileKind::CrossOverArcs => |_| crossover_variants(),
        TileKind::Arcs => |_| arc_variants(),
        TileKind::Diagonals => |_| diagonal_variants(),
        TileKind::DiagonalMesh => |_| mesh_variants(),
        TileKind::OverlappingArcs => |_| overlap_variants(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{FlattenConfig, flatten_path};
    use crate::geometry::Bounds;

    #[test]
    fn family_sizes() {
        let sizes: Vec<(TileKind, usize)> = TileKind::all()
            .iter()
            .map(|&k| (k, k.variants(3).len()))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (TileKind::Rails, 2),
                (TileKind::CornerArcs, 4),
                (TileKind::ArcSweeps, 6),
                (TileKind::CrossOverArcs, 3),
                (TileKind::Arcs, 6),
                (TileKind::Diagonals, 4),
                (TileKind::DiagonalMesh, 3),
                (TileKind::OverlappingArcs, 2),
            ]
        );
    }

    #[test]
    fn names_round_trip() {
        for &kind in TileKind::all() {
            assert_eq!(TileKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TileKind::from_name("diagonal-mesh"), Some(TileKind::DiagonalMesh));
        assert_eq!(TileKind::from_name("OVERLAPPING_ARCS"), Some(TileKind::OverlappingArcs));
        assert_eq!(TileKind::from_name("customTiles"), None);
    }

    #[test]
    fn arc_sweeps_order_matches_rails_then_corners() {
        let names: Vec<&str> = TileKind::ArcSweeps.variants(2).iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec!["rails-h", "rails-v", "corner-tl", "corner-tr", "corner-bl", "corner-br"]
        );
    }

    #[test]
    fn zero_size_is_degenerate_but_fine() {
        let config = FlattenConfig::default();
        for &kind in TileKind::all() {
            for variant in kind.variants(3) {
                let path = variant.draw(Point::new(7.0, 9.0), 0.0);
                let polylines = flatten_path(&path, &config).unwrap();
                for line in polylines {
                    for p in line {
                        assert!(p.approx_eq(Point::new(7.0, 9.0), 1e-9), "{} drew {p:?}", variant.name());
                    }
                }
            }
        }
    }

    #[test]
    fn variants_stay_inside_their_cell() {
        let config = FlattenConfig::default();
        let origin = Point::new(40.0, 60.0);
        let size = 20.0;
        let cell = Bounds::new(origin.x, origin.y, origin.x + size, origin.y + size);
        for &kind in TileKind::all() {
            for variant in kind.variants(4) {
                let path = variant.draw(origin, size);
                for line in flatten_path(&path, &config).unwrap() {
                    for p in line {
                        assert!(cell.contains(p, 1e-6), "{} left the cell at {p:?}", variant.name());
                    }
                }
            }
        }
    }

    #[test]
    fn variants_are_deterministic() {
        for &kind in TileKind::all() {
            for variant in kind.variants(2) {
                let a = variant.draw(Point::new(1.0, 2.0), 13.0);
                let b = variant.draw(Point::new(1.0, 2.0), 13.0);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn registry_knows_every_family() {
        let registry = TileRegistry::standard();
        assert_eq!(registry.kinds().count(), TileKind::all().len());
        let family = registry.family(TileKind::Diagonals, 1).unwrap();
        assert_eq!(family.kind(), TileKind::Diagonals);
        assert_eq!(family.len(), 4);
    }

    #[test]
    fn unregistered_family_is_missing() {
        let mut registry = TileRegistry::standard();
        registry.unregister(TileKind::Arcs);
        assert!(registry.family(TileKind::Arcs, 1).is_none());
    }

    #[test]
    fn pick_is_reproducible_with_a_seed() {
        let family = TileFamily::build(TileKind::ArcSweeps, 2);
        let mut a = Picker::seeded(7);
        let mut b = Picker::seeded(7);
        for _ in 0..50 {
            assert_eq!(
                family.pick(&mut a).map(TileVariant::name),
                family.pick(&mut b).map(TileVariant::name)
            );
        }
    }
}
