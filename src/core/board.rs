//! Board module - manages the 8x8 grid
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left.
//! Placements are addressed by the top-left of the piece's bounding box.

use arrayvec::ArrayVec;

use crate::core::pieces::Piece;
use crate::types::{Cell, PlacedCell, GRID_SIZE};

/// Total number of cells on the board
const BOARD_SIZE: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Full rows and columns detected on a board.
///
/// Rows and columns are evaluated independently; a cell at the intersection
/// of a full row and a full column belongs to both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    pub rows: ArrayVec<u8, { GRID_SIZE as usize }>,
    pub cols: ArrayVec<u8, { GRID_SIZE as usize }>,
}

impl LineSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Total lines, rows plus columns.
    pub fn line_count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }
}

/// Result of executing a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearStats {
    pub lines_cleared: u32,
    /// Distinct cells emptied; a row/column intersection counts once.
    pub cells_cleared: u32,
}

/// The game board - 8x8 using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * GRID_SIZE + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (GRID_SIZE as usize) + (col as usize))
    }

    pub fn size(&self) -> u8 {
        GRID_SIZE
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// In bounds and occupied
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// True iff every filled cell of the piece, overlaid with its top-left at
    /// (row, col), lands on an in-bounds empty cell.
    pub fn can_place(&self, piece: &Piece, row: i8, col: i8) -> bool {
        piece
            .cells()
            .all(|(dr, dc)| self.is_free(row + dr as i8, col + dc as i8))
    }

    /// Occupy every filled cell of the piece with its color.
    ///
    /// The caller must have confirmed `can_place`; violating that is a
    /// programming error, not a runtime failure.
    pub fn place(&mut self, piece: &Piece, row: i8, col: i8) {
        debug_assert!(self.can_place(piece, row, col));
        for (dr, dc) in piece.cells() {
            self.set(row + dr as i8, col + dc as i8, Some(PlacedCell::new(piece.color)));
        }
    }

    fn is_row_full(&self, row: usize) -> bool {
        let start = row * GRID_SIZE as usize;
        let end = start + GRID_SIZE as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    fn is_col_full(&self, col: usize) -> bool {
        (0..GRID_SIZE as usize)
            .all(|row| self.cells[row * GRID_SIZE as usize + col].is_some())
    }

    /// Find every fully occupied row and column.
    pub fn find_full_lines(&self) -> LineSet {
        let mut lines = LineSet::default();
        for row in 0..GRID_SIZE as usize {
            if self.is_row_full(row) {
                lines.rows.push(row as u8);
            }
        }
        for col in 0..GRID_SIZE as usize {
            if self.is_col_full(col) {
                lines.cols.push(col as u8);
            }
        }
        lines
    }

    /// Flag every cell in the listed lines as clearing (colors preserved).
    ///
    /// A transient presentation state; `clear_lines` removes the cells.
    pub fn mark_for_clearing(&mut self, lines: &LineSet) {
        for &row in &lines.rows {
            for col in 0..GRID_SIZE as usize {
                let idx = row as usize * GRID_SIZE as usize + col;
                if let Some(cell) = &mut self.cells[idx] {
                    cell.clearing = true;
                }
            }
        }
        for &col in &lines.cols {
            for row in 0..GRID_SIZE as usize {
                let idx = row * GRID_SIZE as usize + col as usize;
                if let Some(cell) = &mut self.cells[idx] {
                    cell.clearing = true;
                }
            }
        }
    }

    /// Empty every cell in the listed lines.
    ///
    /// No-op with zero counts when the set is empty.
    pub fn clear_lines(&mut self, lines: &LineSet) -> ClearStats {
        if lines.is_empty() {
            return ClearStats::default();
        }

        let mut cells_cleared = 0u32;
        for &row in &lines.rows {
            for col in 0..GRID_SIZE as usize {
                self.cells[row as usize * GRID_SIZE as usize + col] = None;
                cells_cleared += 1;
            }
        }
        for &col in &lines.cols {
            for row in 0..GRID_SIZE as u8 {
                // Intersections with a cleared row were counted above.
                if !lines.rows.contains(&row) {
                    cells_cleared += 1;
                }
                self.cells[row as usize * GRID_SIZE as usize + col as usize] = None;
            }
        }

        ClearStats {
            lines_cleared: lines.line_count(),
            cells_cleared,
        }
    }

    /// True iff at least one of the 64 positions accepts the piece.
    ///
    /// Exhaustive scan; the board is small enough that pruning buys nothing.
    pub fn can_fit_anywhere(&self, piece: &Piece) -> bool {
        for row in 0..GRID_SIZE as i8 {
            for col in 0..GRID_SIZE as i8 {
                if self.can_place(piece, row, col) {
                    return true;
                }
            }
        }
        false
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
