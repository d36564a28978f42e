//! Scoring module - placement points and the line-clear bonus
//!
//! The clear bonus is quadratic in the number of simultaneously cleared
//! lines: clearing 2 lines at once is worth 40 bonus points, not 20 + 20.
//! That matches the original game's tuning and is kept as-is. The combo
//! multiplier is applied separately, to the whole per-turn score.

use crate::types::LINE_BONUS;

/// Points for one placement before the combo multiplier.
///
/// `cells_placed` is the piece's cell count; the bonus only applies when at
/// least one line cleared.
pub fn placement_score(cells_placed: u32, lines_cleared: u32) -> u32 {
    let mut score = cells_placed;
    if lines_cleared > 0 {
        score += lines_cleared * LINE_BONUS * lines_cleared;
    }
    score
}

/// Scale a turn's score by the clear streak.
///
/// `streak` counts consecutive placements that each cleared at least one
/// line, including the current one. A streak of 0 or 1 leaves the score
/// unchanged.
pub fn apply_streak(points: u32, streak: u32) -> u32 {
    points.saturating_mul(streak.max(1))
}
