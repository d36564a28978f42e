//! Catalog module - random piece drawing
//!
//! Picks a shape and a color uniformly at random and stamps each piece with
//! a session-unique id. The id counter and the RNG both live here so a
//! session's draw sequence is a pure function of the seed.

use crate::core::pieces::{Piece, SHAPES};
use crate::core::rng::SimpleRng;
use crate::types::{BlockColor, SLOT_COUNT};

#[derive(Debug, Clone)]
pub struct PieceCatalog {
    rng: SimpleRng,
    next_id: u32,
}

impl PieceCatalog {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next_id: 0,
        }
    }

    /// Current RNG state (for restarting with a fresh sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Draw one piece: uniform shape, uniform color, fresh id.
    ///
    /// Catalog and palette are non-empty by construction, so this is total.
    pub fn draw_piece(&mut self) -> Piece {
        let shape = &SHAPES[self.rng.next_index(SHAPES.len())];
        let color = BlockColor::ALL[self.rng.next_index(BlockColor::ALL.len())];
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        Piece::new(shape, color, id)
    }

    /// Draw a full tray: three independent draws.
    pub fn draw_set(&mut self) -> [Option<Piece>; SLOT_COUNT] {
        [
            Some(self.draw_piece()),
            Some(self.draw_piece()),
            Some(self.draw_piece()),
        ]
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::new(1)
    }
}
