//! Read-only presentation snapshot of a session.
//!
//! Everything the view needs in one plain value: board cells with their
//! clearing flags, the tray, scores, and the ghost placement state.

use crate::core::game_state::LastPlacement;
use crate::core::pieces::Piece;
use crate::types::{BlockColor, GRID_SIZE, SLOT_COUNT};

/// One board cell as the view sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    pub color: Option<BlockColor>,
    pub clearing: bool,
}

impl CellView {
    pub fn occupied(&self) -> bool {
        self.color.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[CellView; GRID_SIZE as usize]; GRID_SIZE as usize],
    pub slots: [Option<Piece>; SLOT_COUNT],
    pub score: u32,
    pub best_score: u32,
    pub combo: u32,
    pub game_over: bool,
    /// A clear-animation pause is in progress.
    pub clearing: bool,
    pub cursor: (i8, i8),
    pub selected_slot: usize,
    pub ghost_valid: bool,
    pub last_placement: Option<LastPlacement>,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// The selected piece, if its slot is filled.
    pub fn selected_piece(&self) -> Option<Piece> {
        self.slots[self.selected_slot]
    }

    /// Whether (row, col) is covered by the ghost of the selected piece.
    pub fn is_ghost_cell(&self, row: i8, col: i8) -> bool {
        let Some(piece) = self.selected_piece() else {
            return false;
        };
        let covered = piece.cells().any(|(dr, dc)| {
            self.cursor.0 + dr as i8 == row && self.cursor.1 + dc as i8 == col
        });
        covered
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[CellView::default(); GRID_SIZE as usize]; GRID_SIZE as usize],
            slots: [None; SLOT_COUNT],
            score: 0,
            best_score: 0,
            combo: 0,
            game_over: false,
            clearing: false,
            cursor: (0, 0),
            selected_slot: 0,
            ghost_valid: false,
            last_placement: None,
            episode_id: 0,
        }
    }
}
