//! Pieces module - polyomino shape catalog
//!
//! Shapes are immutable templates: a list of (row, col) offsets of filled
//! cells within the shape's bounding box. Pieces never rotate; every
//! orientation that exists in the game is its own catalog entry.

use crate::types::BlockColor;

/// A shape template: bounding box plus the filled cells inside it.
///
/// Invariants (by construction of [`SHAPES`]): at least one filled cell,
/// bounding box between 1x1 and 5x5.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeDef {
    pub height: u8,
    pub width: u8,
    pub cells: &'static [(u8, u8)],
}

impl ShapeDef {
    /// Number of filled cells; the placement's base score contribution.
    pub fn cell_count(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        self.cells.iter().any(|&(r, c)| r == row && c == col)
    }
}

/// The fixed shape catalog (23 entries).
pub const SHAPES: [ShapeDef; 23] = [
    // 1x1 single
    shape(1, 1, &[(0, 0)]),
    // Horizontal bars 2..5
    shape(1, 2, &[(0, 0), (0, 1)]),
    shape(1, 3, &[(0, 0), (0, 1), (0, 2)]),
    shape(1, 4, &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    shape(1, 5, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    // Vertical bars 2..5
    shape(2, 1, &[(0, 0), (1, 0)]),
    shape(3, 1, &[(0, 0), (1, 0), (2, 0)]),
    shape(4, 1, &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    shape(5, 1, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    // Squares
    shape(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    shape(
        3,
        3,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ],
    ),
    // L / J variants
    shape(3, 2, &[(0, 0), (1, 0), (2, 0), (2, 1)]),
    shape(3, 2, &[(0, 1), (1, 1), (2, 0), (2, 1)]),
    shape(2, 3, &[(0, 0), (0, 1), (0, 2), (1, 0)]),
    shape(2, 3, &[(0, 0), (0, 1), (0, 2), (1, 2)]),
    // T
    shape(2, 3, &[(0, 0), (0, 1), (0, 2), (1, 1)]),
    // S / Z
    shape(2, 3, &[(0, 1), (0, 2), (1, 0), (1, 1)]),
    shape(2, 3, &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    // Small-L corners (all four orientations)
    shape(2, 2, &[(0, 0), (0, 1), (1, 0)]),
    shape(2, 2, &[(0, 0), (0, 1), (1, 1)]),
    shape(2, 2, &[(0, 0), (1, 0), (1, 1)]),
    shape(2, 2, &[(0, 1), (1, 0), (1, 1)]),
    // Plus
    shape(3, 3, &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]),
];

const fn shape(height: u8, width: u8, cells: &'static [(u8, u8)]) -> ShapeDef {
    ShapeDef {
        height,
        width,
        cells,
    }
}

/// A drawn piece: shape template, color, and a session-unique identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: &'static ShapeDef,
    pub color: BlockColor,
    pub id: u32,
}

impl Piece {
    pub fn new(shape: &'static ShapeDef, color: BlockColor, id: u32) -> Self {
        Self { shape, color, id }
    }

    pub fn cell_count(&self) -> u32 {
        self.shape.cell_count()
    }

    pub fn height(&self) -> u8 {
        self.shape.height
    }

    pub fn width(&self) -> u8 {
        self.shape.width
    }

    /// Filled cells as (row, col) offsets from the piece's top-left.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.shape.cells.iter().copied()
    }
}
