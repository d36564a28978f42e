//! Game state module - the session controller
//!
//! Ties together board, catalog, scoring, and best-score persistence, and
//! drives the per-turn state machine. Line clears are a two-phase commit:
//! phase 1 (`try_place`) places the piece, marks the cleared lines, and
//! applies the score; phase 2 (`finish_clear`, reached via `tick` after the
//! presentation pause) removes the cells and consumes the slot. Placements
//! that clear nothing complete entirely in phase 1.
//!
//! No placement is accepted while a clear is pending; the engine itself
//! never blocks or sleeps.

use crate::core::board::{Board, LineSet};
use crate::core::catalog::PieceCatalog;
use crate::core::pieces::Piece;
use crate::core::scoring::{apply_streak, placement_score};
use crate::store::BestScoreStore;
use crate::types::{GameAction, CLEAR_PAUSE_MS, GRID_SIZE, SLOT_COUNT};

/// A clear that has been scored and marked but not yet executed.
#[derive(Debug, Clone)]
pub struct PendingClear {
    pub lines: LineSet,
    /// Slot consumed when the clear completes.
    pub slot: usize,
    pub timer_ms: u32,
}

/// What the last accepted placement was worth (drives the score popup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastPlacement {
    pub points: u32,
    pub lines_cleared: u32,
    /// Streak at the moment of the placement (0 when nothing cleared).
    pub streak: u32,
}

/// Complete session state
pub struct GameState {
    board: Board,
    catalog: PieceCatalog,
    slots: [Option<Piece>; SLOT_COUNT],
    score: u32,
    best_score: u32,
    /// Consecutive placements that each cleared at least one line.
    combo: u32,
    game_over: bool,
    pending: Option<PendingClear>,
    /// Ghost placement target (top-left of the selected piece).
    cursor: (i8, i8),
    selected_slot: usize,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    last_placement: Option<LastPlacement>,
    store: Box<dyn BestScoreStore>,
}

impl GameState {
    /// Create a new session. The best score is read from the store once;
    /// a failed read defaults to zero.
    pub fn new(seed: u32, store: Box<dyn BestScoreStore>) -> Self {
        let mut catalog = PieceCatalog::new(seed);
        let slots = catalog.draw_set();
        let best_score = store.load().unwrap_or(0);

        Self {
            board: Board::new(),
            catalog,
            slots,
            score: 0,
            best_score,
            combo: 0,
            game_over: false,
            pending: None,
            cursor: (0, 0),
            selected_slot: 0,
            episode_id: 0,
            last_placement: None,
            store,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn slots(&self) -> &[Option<Piece>; SLOT_COUNT] {
        &self.slots
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn cursor(&self) -> (i8, i8) {
        self.cursor
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    pub fn selected_piece(&self) -> Option<Piece> {
        self.slots[self.selected_slot]
    }

    pub fn last_placement(&self) -> Option<LastPlacement> {
        self.last_placement
    }

    /// A clear-animation pause is in progress; placements are gated.
    pub fn is_clearing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_clear(&self) -> Option<&PendingClear> {
        self.pending.as_ref()
    }

    /// Whether the selected piece fits at the cursor.
    pub fn ghost_valid(&self) -> bool {
        match self.selected_piece() {
            Some(piece) => self.board.can_place(&piece, self.cursor.0, self.cursor.1),
            None => false,
        }
    }

    /// Move the ghost cursor, clamped so the selected piece's bounding box
    /// stays on the board.
    pub fn move_cursor(&mut self, drow: i8, dcol: i8) {
        let (max_row, max_col) = self.cursor_limits();
        self.cursor.0 = (self.cursor.0 + drow).clamp(0, max_row);
        self.cursor.1 = (self.cursor.1 + dcol).clamp(0, max_col);
    }

    fn cursor_limits(&self) -> (i8, i8) {
        match self.selected_piece() {
            Some(piece) => (
                (GRID_SIZE - piece.height()) as i8,
                (GRID_SIZE - piece.width()) as i8,
            ),
            None => (GRID_SIZE as i8 - 1, GRID_SIZE as i8 - 1),
        }
    }

    /// Select a slot (no-op on an empty or out-of-range slot).
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot >= SLOT_COUNT || self.slots[slot].is_none() {
            return false;
        }
        self.selected_slot = slot;
        self.clamp_cursor();
        true
    }

    /// Advance selection to the next non-empty slot.
    pub fn cycle_slot(&mut self) -> bool {
        for step in 1..=SLOT_COUNT {
            let candidate = (self.selected_slot + step) % SLOT_COUNT;
            if self.slots[candidate].is_some() {
                self.selected_slot = candidate;
                self.clamp_cursor();
                return true;
            }
        }
        false
    }

    fn clamp_cursor(&mut self) {
        let (max_row, max_col) = self.cursor_limits();
        self.cursor.0 = self.cursor.0.clamp(0, max_row);
        self.cursor.1 = self.cursor.1.clamp(0, max_col);
    }

    /// Phase 1 of a placement.
    ///
    /// Rejects silently (returning false, touching nothing) when the session
    /// is over, a clear is pending, the slot is empty, or the piece does not
    /// fit at (row, col). An invalid target is a normal outcome, not an
    /// error.
    pub fn try_place(&mut self, slot: usize, row: i8, col: i8) -> bool {
        if self.game_over || self.pending.is_some() || slot >= SLOT_COUNT {
            return false;
        }
        let Some(piece) = self.slots[slot] else {
            return false;
        };
        if !self.board.can_place(&piece, row, col) {
            return false;
        }

        let cells_placed = piece.cell_count();
        self.board.place(&piece, row, col);

        let lines = self.board.find_full_lines();
        if lines.is_empty() {
            self.combo = 0;
            let points = placement_score(cells_placed, 0);
            self.add_score(points);
            self.last_placement = Some(LastPlacement {
                points,
                lines_cleared: 0,
                streak: 0,
            });
            self.consume_slot(slot);
        } else {
            self.combo += 1;
            let points = apply_streak(placement_score(cells_placed, lines.line_count()), self.combo);
            self.add_score(points);
            self.last_placement = Some(LastPlacement {
                points,
                lines_cleared: lines.line_count(),
                streak: self.combo,
            });
            self.board.mark_for_clearing(&lines);
            self.pending = Some(PendingClear {
                lines,
                slot,
                timer_ms: CLEAR_PAUSE_MS,
            });
        }

        true
    }

    /// Place the selected piece at the cursor.
    pub fn commit(&mut self) -> bool {
        let (row, col) = self.cursor;
        let slot = self.selected_slot;
        self.try_place(slot, row, col)
    }

    /// Phase 2 of a placement: execute the pending clear, consume the slot,
    /// refill if needed, and re-check for the terminal state.
    pub fn finish_clear(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.board.clear_lines(&pending.lines);
        self.consume_slot(pending.slot);
    }

    /// Advance the clear-animation timer. Returns true when phase 2 ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let Some(pending) = &mut self.pending else {
            return false;
        };
        pending.timer_ms = pending.timer_ms.saturating_sub(elapsed_ms);
        if pending.timer_ms == 0 {
            self.finish_clear();
            return true;
        }
        false
    }

    fn add_score(&mut self, points: u32) {
        self.score += points;
        if self.score > self.best_score {
            self.best_score = self.score;
            // Best-effort: a lost write is recovered on the next new max.
            let _ = self.store.save(self.best_score);
        }
    }

    fn consume_slot(&mut self, slot: usize) {
        self.slots[slot] = None;
        if self.slots.iter().all(|s| s.is_none()) {
            self.slots = self.catalog.draw_set();
        }

        if self.slots[self.selected_slot].is_none() {
            self.cycle_slot();
        }
        self.clamp_cursor();

        self.update_game_over();
    }

    /// Terminal iff the slot set is non-empty and no remaining piece fits
    /// anywhere. An empty set (mid-refill) is never terminal; `consume_slot`
    /// refills before this runs.
    fn update_game_over(&mut self) {
        let mut any_piece = false;
        let mut any_fit = false;
        for piece in self.slots.iter().flatten() {
            any_piece = true;
            if self.board.can_fit_anywhere(piece) {
                any_fit = true;
                break;
            }
        }
        self.game_over = any_piece && !any_fit;
    }

    /// Full reset: board, slots, score, combo, pending clear. The best score
    /// survives, the episode counter advances, and the catalog is reseeded
    /// from its current state so the next game draws a fresh sequence.
    pub fn restart(&mut self) {
        self.board.reset();
        self.catalog = PieceCatalog::new(self.catalog.seed());
        self.slots = self.catalog.draw_set();
        self.score = 0;
        self.combo = 0;
        self.game_over = false;
        self.pending = None;
        self.cursor = (0, 0);
        self.selected_slot = 0;
        self.last_placement = None;
        self.episode_id = self.episode_id.wrapping_add(1);
    }

    /// Apply a game action. Returns true when the action changed state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return match action {
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            };
        }

        match action {
            GameAction::CursorLeft => {
                self.move_cursor(0, -1);
                true
            }
            GameAction::CursorRight => {
                self.move_cursor(0, 1);
                true
            }
            GameAction::CursorUp => {
                self.move_cursor(-1, 0);
                true
            }
            GameAction::CursorDown => {
                self.move_cursor(1, 0);
                true
            }
            GameAction::SelectSlot(slot) => self.select_slot(slot),
            GameAction::CycleSlot => self.cycle_slot(),
            GameAction::Commit => self.commit(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::CellView;

        for row in 0..GRID_SIZE as usize {
            for col in 0..GRID_SIZE as usize {
                let cell = self.board.cells()[row * GRID_SIZE as usize + col];
                out.board[row][col] = CellView {
                    color: cell.map(|c| c.color),
                    clearing: cell.map(|c| c.clearing).unwrap_or(false),
                };
            }
        }

        out.slots = self.slots;
        out.score = self.score;
        out.best_score = self.best_score;
        out.combo = self.combo;
        out.game_over = self.game_over;
        out.clearing = self.pending.is_some();
        out.cursor = self.cursor;
        out.selected_slot = self.selected_slot;
        out.ghost_valid = self.ghost_valid();
        out.last_placement = self.last_placement;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::{Piece, SHAPES};
    use crate::store::MemoryScoreStore;
    use crate::types::{BlockColor, PlacedCell};
    use std::rc::Rc;

    fn state() -> GameState {
        GameState::new(12345, Box::new(MemoryScoreStore::default()))
    }

    fn single(id: u32) -> Piece {
        Piece::new(&SHAPES[0], BlockColor::Pink, id)
    }

    /// Fill a row except the given columns.
    fn fill_row_except(state: &mut GameState, row: i8, holes: &[i8]) {
        for col in 0..GRID_SIZE as i8 {
            if !holes.contains(&col) {
                state.board.set(row, col, Some(PlacedCell::new(BlockColor::Blue)));
            }
        }
    }

    #[test]
    fn new_session_starts_clean() {
        let state = state();
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 0);
        assert_eq!(state.combo(), 0);
        assert!(!state.game_over());
        assert!(!state.is_clearing());
        assert!(state.slots().iter().all(|s| s.is_some()));
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn best_score_loads_from_store() {
        let state = GameState::new(1, Box::new(MemoryScoreStore::new(500)));
        assert_eq!(state.best_score(), 500);
    }

    #[test]
    fn invalid_placement_is_silently_rejected() {
        let mut state = state();
        state.slots[0] = Some(single(100));
        state.board.set(4, 4, Some(PlacedCell::new(BlockColor::Blue)));

        let score_before = state.score();
        assert!(!state.try_place(0, 4, 4)); // collision
        assert!(!state.try_place(0, 8, 0)); // out of bounds
        assert!(!state.try_place(5, 0, 0)); // bad slot index

        assert_eq!(state.score(), score_before);
        assert!(state.slots[0].is_some());
        assert!(!state.is_clearing());
    }

    #[test]
    fn placement_without_clear_scores_and_consumes_immediately() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];

        assert!(state.try_place(0, 0, 0));
        assert_eq!(state.score(), 1);
        assert_eq!(state.combo(), 0);
        assert!(!state.is_clearing());
        assert!(state.slots[0].is_none());

        // Untouched slots keep their identity.
        assert_eq!(state.slots[1].unwrap().id, 2);
        assert_eq!(state.slots[2].unwrap().id, 3);
    }

    #[test]
    fn consuming_the_last_slot_refills_all_three() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];

        assert!(state.try_place(0, 0, 0));
        assert!(state.try_place(1, 2, 2));
        assert!(state.try_place(2, 4, 4));

        assert!(state.slots().iter().all(|s| s.is_some()));
        // Refilled pieces come from the catalog, after the seeded opening set.
        assert!(state.slots().iter().flatten().all(|p| p.id >= 3));
    }

    #[test]
    fn clear_runs_in_two_phases() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];
        fill_row_except(&mut state, 0, &[7]);

        assert!(state.try_place(0, 0, 7));

        // Phase 1: scored, marked, slot not yet consumed.
        assert_eq!(state.combo(), 1);
        assert_eq!(state.score(), 11); // 1 cell + 10 bonus, streak x1
        assert!(state.is_clearing());
        assert!(state.slots[0].is_some());
        for col in 0..8 {
            assert!(state.board.get(0, col).unwrap().unwrap().clearing);
        }

        // Placements are gated during the pause.
        assert!(!state.try_place(1, 4, 4));

        // Phase 2 after the presentation pause.
        assert!(!state.tick(CLEAR_PAUSE_MS - 1));
        assert!(state.tick(1));
        assert!(!state.is_clearing());
        assert!(state.slots[0].is_none());
        for col in 0..8 {
            assert!(state.board.is_free(0, col));
        }
    }

    #[test]
    fn streak_multiplies_consecutive_clears() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];

        fill_row_except(&mut state, 0, &[7]);
        assert!(state.try_place(0, 0, 7));
        state.finish_clear();
        assert_eq!(state.score(), 11);

        fill_row_except(&mut state, 1, &[3]);
        assert!(state.try_place(1, 1, 3));
        // Second consecutive clear: (1 + 10) * 2.
        assert_eq!(state.combo(), 2);
        assert_eq!(state.score(), 11 + 22);
        state.finish_clear();

        // A non-clearing placement resets the streak.
        assert!(state.try_place(2, 4, 4));
        assert_eq!(state.combo(), 0);
    }

    #[test]
    fn row_and_column_cleared_together() {
        let mut state = state();
        state.slots = [Some(single(1)), None, None];
        fill_row_except(&mut state, 2, &[5]);
        for row in 0..GRID_SIZE as i8 {
            if row != 2 {
                state.board.set(row, 5, Some(PlacedCell::new(BlockColor::Blue)));
            }
        }

        assert!(state.try_place(0, 2, 5));
        let pending = state.pending_clear().unwrap();
        assert_eq!(pending.lines.rows.as_slice(), &[2]);
        assert_eq!(pending.lines.cols.as_slice(), &[5]);
        // 1 cell + 2 lines * 10 * 2 lines = 41, streak x1.
        assert_eq!(state.score(), 41);

        state.finish_clear();
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn best_score_updates_and_persists_mid_game() {
        let store = Rc::new(MemoryScoreStore::new(5));
        let mut state = GameState::new(1, Box::new(store.clone()));
        state.slots = [Some(single(1)), Some(single(2)), None];

        assert!(state.try_place(0, 0, 0));
        // 1 point does not beat the stored 5.
        assert_eq!(state.best_score(), 5);
        assert_eq!(store.best(), 5);

        fill_row_except(&mut state, 7, &[0]);
        assert!(state.try_place(1, 7, 0));
        assert_eq!(state.score(), 12);
        assert_eq!(state.best_score(), 12);
        assert_eq!(store.best(), 12);
    }

    #[test]
    fn terminal_when_no_piece_fits() {
        let mut state = state();
        // One free 1x1 pocket; tray holds only 3x3 squares.
        for row in 0..GRID_SIZE as i8 {
            for col in 0..GRID_SIZE as i8 {
                if (row, col) != (7, 7) {
                    state.board.set(row, col, Some(PlacedCell::new(BlockColor::Blue)));
                }
            }
        }
        let big = Piece::new(&SHAPES[10], BlockColor::Green, 50);
        state.slots = [Some(big), Some(big), Some(big)];
        state.update_game_over();
        assert!(state.game_over());

        // A single 1x1 in the tray rescues the session.
        state.slots[1] = Some(single(51));
        state.update_game_over();
        assert!(!state.game_over());

        // An empty slot set is never terminal.
        state.slots = [None, None, None];
        state.update_game_over();
        assert!(!state.game_over());
    }

    #[test]
    fn game_over_gates_everything_but_restart() {
        let mut state = state();
        state.game_over = true;

        assert!(!state.apply_action(GameAction::Commit));
        assert!(!state.apply_action(GameAction::CursorLeft));
        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over());
    }

    #[test]
    fn restart_keeps_best_and_bumps_episode() {
        let mut state = state();
        state.slots = [Some(single(1)), None, None];
        fill_row_except(&mut state, 0, &[0]);
        assert!(state.try_place(0, 0, 0));
        state.finish_clear();
        let best = state.best_score();
        assert!(best > 0);

        state.restart();
        assert_eq!(state.score(), 0);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.best_score(), best);
        assert_eq!(state.episode_id(), 1);
        assert!(!state.is_clearing());
        assert!(state.board().cells().iter().all(|c| c.is_none()));
        assert!(state.slots().iter().all(|s| s.is_some()));
    }

    #[test]
    fn cursor_clamps_to_piece_bounds() {
        let mut state = state();
        let bar = Piece::new(&SHAPES[4], BlockColor::Blue, 9); // 1x5
        state.slots = [Some(bar), None, None];
        state.selected_slot = 0;

        for _ in 0..20 {
            state.move_cursor(0, 1);
        }
        assert_eq!(state.cursor(), (0, 3)); // 8 - 5

        for _ in 0..20 {
            state.move_cursor(1, 0);
        }
        assert_eq!(state.cursor(), (7, 3)); // 8 - 1
    }

    #[test]
    fn slot_selection_skips_empty_slots() {
        let mut state = state();
        state.slots = [Some(single(1)), None, Some(single(3))];
        state.selected_slot = 0;

        assert!(!state.select_slot(1));
        assert_eq!(state.selected_slot(), 0);

        assert!(state.cycle_slot());
        assert_eq!(state.selected_slot(), 2);
        assert!(state.cycle_slot());
        assert_eq!(state.selected_slot(), 0);
    }

    #[test]
    fn consuming_selected_slot_moves_selection() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];
        state.selected_slot = 0;

        assert!(state.try_place(0, 0, 0));
        assert!(state.slots[state.selected_slot()].is_some());
    }

    #[test]
    fn snapshot_reflects_session() {
        let mut state = state();
        state.slots = [Some(single(1)), Some(single(2)), Some(single(3))];
        fill_row_except(&mut state, 0, &[7]);
        assert!(state.try_place(0, 0, 7));

        let snap = state.snapshot();
        assert_eq!(snap.score, state.score());
        assert!(snap.clearing);
        assert!(snap.board[0][7].clearing);
        assert_eq!(snap.board[0][7].color, Some(BlockColor::Pink));
        assert!(!snap.board[4][4].clearing);
        assert_eq!(snap.last_placement.unwrap().lines_cleared, 1);
    }
}
