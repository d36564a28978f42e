//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::GameSnapshot;
use crate::core::Piece;
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CLEAR_FLASH: Rgb = Rgb::new(255, 255, 255);

/// A lightweight terminal view for the puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the snapshot into a framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = (GRID_SIZE as u16) * self.cell_w;
        let board_px_h = (GRID_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        // Frame plus the tray strip under it.
        let frame_h = board_px_h + 2;
        let tray_h = 6;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport
            .height
            .saturating_sub(frame_h + tray_h)
            / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Board cells.
        for row in 0..GRID_SIZE as usize {
            for col in 0..GRID_SIZE as usize {
                let cell = snap.board[row][col];
                match cell.color {
                    Some(_) if cell.clearing => {
                        self.fill_cell(&mut fb, start_x, start_y, row, col, '█', flash_style());
                    }
                    Some(color) => {
                        self.fill_cell(
                            &mut fb,
                            start_x,
                            start_y,
                            row,
                            col,
                            '█',
                            color_style(color, true),
                        );
                    }
                    None => {
                        self.fill_cell(&mut fb, start_x, start_y, row, col, '·', empty_style());
                    }
                }
            }
        }

        // Ghost of the selected piece (skipped during the clear pause).
        if !snap.clearing && !snap.game_over {
            if let Some(piece) = snap.selected_piece() {
                self.draw_ghost(&mut fb, snap, &piece, start_x, start_y);
            }
        }

        // Tray and side panel.
        self.draw_tray(&mut fb, snap, start_x, start_y + frame_h + 1);
        self.draw_side_panel(&mut fb, snap, viewport, start_x, start_y, frame_w);

        if snap.game_over {
            self.draw_overlay_text(
                &mut fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "GAME OVER - r to retry",
            );
        }

        fb
    }

    fn draw_ghost(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        piece: &Piece,
        start_x: u16,
        start_y: u16,
    ) {
        let style = if snap.ghost_valid {
            CellStyle {
                fg: piece.color.rgb().into(),
                bg: BOARD_BG,
                bold: false,
                dim: true,
            }
        } else {
            CellStyle {
                fg: Rgb::new(220, 80, 80),
                bg: BOARD_BG,
                bold: false,
                dim: true,
            }
        };

        for (dr, dc) in piece.cells() {
            let row = snap.cursor.0 + dr as i8;
            let col = snap.cursor.1 + dc as i8;
            if row < 0 || row >= GRID_SIZE as i8 || col < 0 || col >= GRID_SIZE as i8 {
                continue;
            }
            // Occupied cells keep their block; the ghost only tints free ones.
            if snap.board[row as usize][col as usize].occupied() {
                continue;
            }
            self.fill_cell(fb, start_x, start_y, row as usize, col as usize, '░', style);
        }
    }

    fn draw_tray(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, tray_y: u16) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };

        for (i, slot) in snap.slots.iter().enumerate() {
            let slot_x = start_x + (i as u16) * 13;
            let marker = if i == snap.selected_slot { '>' } else { ' ' };
            fb.put_char(slot_x, tray_y, marker, label);
            fb.put_str(slot_x + 1, tray_y, &format!("[{}]", i + 1), label);

            match slot {
                Some(piece) => {
                    let style = color_style(piece.color, false);
                    for (dr, dc) in piece.cells() {
                        fb.fill_rect(
                            slot_x + 1 + (dc as u16) * 2,
                            tray_y + 1 + dr as u16,
                            2,
                            1,
                            '█',
                            style,
                        );
                    }
                }
                None => {
                    fb.put_str(slot_x + 1, tray_y + 1, "--", CellStyle {
                        dim: true,
                        ..CellStyle::default()
                    });
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snap.best_score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("x{}", snap.combo.max(1)), value);
        y = y.saturating_add(2);

        if let Some(last) = snap.last_placement {
            if last.lines_cleared > 0 {
                let mut text = format!("+{}", last.points);
                if last.streak > 1 {
                    text.push_str(&format!("  Combo x{}!", last.streak));
                }
                fb.put_str(panel_x, y, &text, label);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: usize,
        col: usize,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + (col as u16) * self.cell_w;
        let py = start_y + 1 + (row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn color_style(color: BlockColor, on_board: bool) -> CellStyle {
    CellStyle {
        fg: color.rgb().into(),
        bg: if on_board {
            BOARD_BG
        } else {
            Rgb::new(0, 0, 0)
        },
        bold: true,
        dim: false,
    }
}

fn flash_style() -> CellStyle {
    CellStyle {
        fg: CLEAR_FLASH,
        bg: BOARD_BG,
        bold: true,
        dim: false,
    }
}

fn empty_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(90, 90, 100),
        bg: BOARD_BG,
        bold: false,
        dim: true,
    }
}
