//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board side length (the board is always square)
pub const GRID_SIZE: u8 = 8;

/// Number of piece slots in the tray
pub const SLOT_COUNT: usize = 3;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const CLEAR_PAUSE_MS: u32 = 350;

/// Bonus points per cleared line (applied quadratically, see `core::scoring`)
pub const LINE_BONUS: u32 = 10;

/// Block colors - fixed 10-entry pastel palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Pink,
    Blue,
    Green,
    Peach,
    Lavender,
    Rose,
    Sky,
    Lemon,
    Violet,
    Coral,
}

impl BlockColor {
    /// All palette entries, in draw order
    pub const ALL: [BlockColor; 10] = [
        BlockColor::Pink,
        BlockColor::Blue,
        BlockColor::Green,
        BlockColor::Peach,
        BlockColor::Lavender,
        BlockColor::Rose,
        BlockColor::Sky,
        BlockColor::Lemon,
        BlockColor::Violet,
        BlockColor::Coral,
    ];

    /// 24-bit RGB value for terminal rendering
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BlockColor::Pink => (0xFF, 0xB3, 0xBA),
            BlockColor::Blue => (0xBA, 0xE1, 0xFF),
            BlockColor::Green => (0xBA, 0xFF, 0xC9),
            BlockColor::Peach => (0xFF, 0xE4, 0xBA),
            BlockColor::Lavender => (0xE8, 0xBA, 0xFF),
            BlockColor::Rose => (0xFF, 0xBA, 0xE1),
            BlockColor::Sky => (0xBA, 0xF2, 0xFF),
            BlockColor::Lemon => (0xFF, 0xF1, 0xBA),
            BlockColor::Violet => (0xD4, 0xBA, 0xFF),
            BlockColor::Coral => (0xFF, 0xD4, 0xBA),
        }
    }
}

/// An occupied board cell: its color plus the transient pre-clear marker.
///
/// `clearing` is only ever true between placement phase 1 (lines detected)
/// and phase 2 (lines removed); it is never persisted beyond that window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedCell {
    pub color: BlockColor,
    pub clearing: bool,
}

impl PlacedCell {
    pub fn new(color: BlockColor) -> Self {
        Self {
            color,
            clearing: false,
        }
    }
}

/// Cell on the board (None = empty, Some = occupied)
pub type Cell = Option<PlacedCell>;

/// Game actions (keyboard stands in for pointer drag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    SelectSlot(usize),
    CycleSlot,
    Commit,
    Restart,
}
