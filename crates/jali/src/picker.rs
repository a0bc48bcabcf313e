//! Uniform random picking.
//!
//! The engine never reaches for a global random source: callers hand it a
//! [`Picker`], seeded for reproducible output or from the OS for variety.
//! Every pick consumes one sample; picks are independent (with
//! replacement), not a shuffle.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// A seedable uniform picker.
///
/// # Example
/// ```
/// use jali::picker::Picker;
///
/// let mut picker = Picker::seeded(12345);
/// let choice = picker.pick(&["a", "b", "c"]);
/// assert!(choice.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Picker {
    rng: StdRng,
    seed: Option<u64>,
}

impl Picker {
    /// Create a picker; `None` seeds from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self {
                rng: StdRng::from_os_rng(),
                seed: None,
            },
        }
    }

    /// The same seed always produces the same sequence of picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seed this picker was built from, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Pick one element uniformly. `None` only for an empty slice.
    #[inline]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Uniform index in `[0, len)`, `None` when `len` is 0.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let items: Vec<u32> = (0..100).collect();
        let mut p1 = Picker::seeded(42);
        let mut p2 = Picker::seeded(42);

        for _ in 0..100 {
            assert_eq!(p1.pick(&items), p2.pick(&items));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let items: Vec<u32> = (0..1000).collect();
        let mut p1 = Picker::seeded(1);
        let mut p2 = Picker::seeded(2);

        let picks1: Vec<_> = (0..10).map(|_| p1.pick(&items).copied()).collect();
        let picks2: Vec<_> = (0..10).map(|_| p2.pick(&items).copied()).collect();

        assert_ne!(picks1, picks2);
    }

    #[test]
    fn empty_slice_gives_none() {
        let mut picker = Picker::seeded(0);
        let empty: [u8; 0] = [];
        assert_eq!(picker.pick(&empty), None);
        assert_eq!(picker.index(0), None);
    }

    #[test]
    fn index_in_bounds() {
        let mut picker = Picker::seeded(12345);
        for _ in 0..1000 {
            let idx = picker.index(6).unwrap();
            assert!(idx < 6);
        }
    }

    #[test]
    fn every_item_gets_picked() {
        let items = ["a", "b", "c", "d"];
        let mut picker = Picker::seeded(9);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let idx = picker.index(items.len()).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn remembers_seed() {
        assert_eq!(Picker::seeded(5).seed(), Some(5));
        assert_eq!(Picker::new(None).seed(), None);
    }
}
