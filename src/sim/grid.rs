//! Uniform grid for pruning ball-ball collision checks
//!
//! Rebuilt from scratch every tick. A ball only needs testing against balls
//! in its own cell and the eight cells around it.

use glam::Vec2;

/// Uniform-cell partition of the arena holding ball indices
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, bounds: Vec2) -> Self {
        let mut grid = Self {
            cell_size,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.resize(bounds);
        grid
    }

    /// Re-fit the grid to new arena bounds (drops all entries)
    pub fn resize(&mut self, bounds: Vec2) {
        let cell_size = self.cell_size;
        let span = |extent: f32| {
            if cell_size > 0.0 && extent.is_finite() && extent > 0.0 {
                (extent / cell_size).ceil() as usize
            } else {
                0
            }
        };
        self.cols = span(bounds.x);
        self.rows = span(bounds.y);
        self.cells = vec![Vec::new(); self.cols * self.rows];
    }

    /// Grid dimensions as (columns, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cell coordinates holding `pos`, or `None` outside the grid
    pub fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        if !pos.is_finite() {
            return None;
        }
        let cx = (pos.x / self.cell_size).floor();
        let cy = (pos.y / self.cell_size).floor();
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        (cx < self.cols && cy < self.rows).then_some((cx, cy))
    }

    /// Bucket `index` by position; out-of-bounds positions are dropped
    pub fn insert(&mut self, index: usize, pos: Vec2) {
        if let Some((cx, cy)) = self.cell_of(pos) {
            self.cells[cy * self.cols + cx].push(index);
        }
    }

    /// Clear and refill from positions, using their enumeration index as id
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        self.clear();
        for (index, pos) in positions.into_iter().enumerate() {
            self.insert(index, pos);
        }
    }

    /// Collect the entries of the cell holding `pos` and its 8 neighbours
    ///
    /// `out` is not cleared first. Nothing is collected when `pos` lies
    /// outside the grid.
    pub fn collect_neighbors(&self, pos: Vec2, out: &mut Vec<usize>) {
        let Some((cx, cy)) = self.cell_of(pos) else {
            return;
        };

        let x_end = (cx + 1).min(self.cols - 1);
        let y_end = (cy + 1).min(self.rows - 1);

        for y in cy.saturating_sub(1)..=y_end {
            for x in cx.saturating_sub(1)..=x_end {
                out.extend_from_slice(&self.cells[y * self.cols + x]);
            }
        }
    }

    /// Indices stored in a single cell
    pub fn cell(&self, cx: usize, cy: usize) -> &[usize] {
        if cx < self.cols && cy < self.rows {
            &self.cells[cy * self.cols + cx]
        } else {
            &[]
        }
    }
}
