//! Terminal module - crossterm-backed rendering
//!
//! `GameView` turns a snapshot into a `FrameBuffer`; `TerminalRenderer`
//! owns the raw-mode terminal and flushes frames to it.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
