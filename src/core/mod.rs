//! Core module - pure game logic with no I/O
//!
//! Board rules, the piece catalog, scoring, and the session state machine.
//! Persistence is abstracted behind `store::BestScoreStore`; nothing here
//! blocks, sleeps, or touches the terminal.

pub mod board;
pub mod catalog;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::{Board, ClearStats, LineSet};
pub use catalog::PieceCatalog;
pub use game_state::{GameState, LastPlacement, PendingClear};
pub use pieces::{Piece, ShapeDef, SHAPES};
pub use snapshot::{CellView, GameSnapshot};
