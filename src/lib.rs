//! tui-blast: a terminal block-placement puzzle.
//!
//! Fill rows and columns of an 8x8 board with polyomino pieces drawn
//! three at a time. Completed lines clear, chains multiply the score.
//!
//! The crate splits into a pure `core` (board rules, piece catalog,
//! scoring, session state), a `store` for best-score persistence, an
//! `input` mapper, and a `term` layer that renders snapshots with
//! crossterm.

pub mod core;
pub mod input;
pub mod store;
pub mod term;
pub mod types;
