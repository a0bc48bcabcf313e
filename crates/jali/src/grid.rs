//! Grid walking for the tessellation engine.
//!
//! The cell size comes from the width alone (`width / resolution`) and is
//! reused for rows. Columns are walked outermost, rows innermost, by
//! repeatedly adding the cell size while the coordinate is below the bound.
//! A last cell may therefore start just short of the edge and overshoot it;
//! that is accepted, not clipped.

use serde::Serialize;

use crate::geometry::Point;

/// Target area and column count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    pub width: f64,
    pub height: f64,
    pub resolution: u32,
}

/// One visited cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
    pub origin: Point,
    pub size: f64,
}

impl GridSpec {
    pub fn new(width: f64, height: f64, resolution: u32) -> Self {
        Self { width, height, resolution }
    }

    /// Side of every cell, in both directions.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.width / self.resolution as f64
    }

    /// Walk the grid column by column.
    ///
    /// Yields nothing when the cell size is not a positive finite number
    /// (zero resolution or zero width), so the walk always terminates.
    pub fn cells(&self) -> GridCells {
        GridCells {
            width: self.width,
            height: self.height,
            size: self.cell_size(),
            x: 0.0,
            y: 0.0,
            column: 0,
            row: 0,
        }
    }

    /// Number of cells the walk visits.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }
}

/// Iterator over [`GridCell`]s in column-major order.
#[derive(Debug, Clone)]
pub struct GridCells {
    width: f64,
    height: f64,
    size: f64,
    x: f64,
    y: f64,
    column: usize,
    row: usize,
}

impl Iterator for GridCells {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return None;
        }

        loop {
            if self.x >= self.width {
                return None;
            }
            if self.y < self.height {
                let cell = GridCell {
                    column: self.column,
                    row: self.row,
                    origin: Point::new(self.x, self.y),
                    size: self.size,
                };
                self.y += self.size;
                self.row += 1;
                return Some(cell);
            }
            // Column finished: step right, restart at the top.
            self.x += self.size;
            self.column += 1;
            self.y = 0.0;
            self.row = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_gives_resolution_columns() {
        let grid = GridSpec::new(100.0, 100.0, 10);
        assert_eq!(grid.cell_size(), 10.0);
        let cells: Vec<GridCell> = grid.cells().collect();
        assert_eq!(cells.len(), 100);
        let columns = cells.iter().map(|c| c.column).max().unwrap() + 1;
        assert_eq!(columns, 10);
    }

    #[test]
    fn walk_is_column_major() {
        let grid = GridSpec::new(20.0, 20.0, 2);
        let origins: Vec<(f64, f64)> = grid.cells().map(|c| (c.origin.x, c.origin.y)).collect();
        assert_eq!(origins, vec![(0.0, 0.0), (0.0, 10.0), (10.0, 0.0), (10.0, 10.0)]);
    }

    #[test]
    fn rows_use_width_derived_size() {
        // 100 wide at 4 columns: cells are 25, so a 60 tall area gets rows at
        // 0, 25, 50 and the last one overshoots to 75.
        let grid = GridSpec::new(100.0, 60.0, 4);
        let rows: Vec<f64> = grid
            .cells()
            .filter(|c| c.column == 0)
            .map(|c| c.origin.y)
            .collect();
        assert_eq!(rows, vec![0.0, 25.0, 50.0]);
        assert_eq!(grid.cell_count(), 12);
    }

    #[test]
    fn short_height_still_draws_first_row() {
        let grid = GridSpec::new(100.0, 5.0, 10);
        assert_eq!(grid.cell_count(), 10);
    }

    #[test]
    fn zero_resolution_yields_nothing() {
        assert_eq!(GridSpec::new(100.0, 100.0, 0).cell_count(), 0);
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert_eq!(GridSpec::new(0.0, 100.0, 5).cell_count(), 0);
    }
}
