//! Board tests - placement validity, line detection, and clearing

use tui_blast::core::{Board, LineSet, Piece, SHAPES};
use tui_blast::types::{BlockColor, PlacedCell, GRID_SIZE};

fn piece(shape_index: usize) -> Piece {
    Piece::new(&SHAPES[shape_index], BlockColor::Blue, 0)
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.size(), GRID_SIZE);

    // All cells should be empty
    for row in 0..GRID_SIZE as i8 {
        for col in 0..GRID_SIZE as i8 {
            assert!(board.is_free(row, col));
            assert_eq!(board.get(row, col), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    // Negative coordinates
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);

    // Beyond bounds
    assert_eq!(board.get(GRID_SIZE as i8, 0), None);
    assert_eq!(board.get(0, GRID_SIZE as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 2, Some(PlacedCell::new(BlockColor::Peach))));
    let cell = board.get(5, 2).unwrap().unwrap();
    assert_eq!(cell.color, BlockColor::Peach);
    assert!(!cell.clearing);

    // Clear a cell
    assert!(board.set(5, 2, None));
    assert_eq!(board.get(5, 2), Some(None));

    // Out of bounds set is rejected
    assert!(!board.set(-1, 0, Some(PlacedCell::new(BlockColor::Peach))));
    assert!(!board.set(0, GRID_SIZE as i8, None));
}

#[test]
fn test_can_place_respects_bounds_and_collisions() {
    let mut board = Board::new();
    let bar5 = piece(4); // 1x5 horizontal

    assert!(board.can_place(&bar5, 0, 0));
    assert!(board.can_place(&bar5, 7, 3));
    assert!(!board.can_place(&bar5, 0, 4));
    assert!(!board.can_place(&bar5, -1, 0));

    board.set(3, 4, Some(PlacedCell::new(BlockColor::Rose)));
    assert!(!board.can_place(&bar5, 3, 0));
    assert!(!board.can_place(&bar5, 3, 2));
    assert!(board.can_place(&bar5, 2, 0));
}

#[test]
fn test_placement_ignores_empty_bounding_box_cells() {
    let mut board = Board::new();
    let plus = piece(22);

    // The plus has empty corners; blocks there must not prevent placement.
    board.set(2, 2, Some(PlacedCell::new(BlockColor::Sky)));
    board.set(2, 4, Some(PlacedCell::new(BlockColor::Sky)));
    board.set(4, 2, Some(PlacedCell::new(BlockColor::Sky)));
    board.set(4, 4, Some(PlacedCell::new(BlockColor::Sky)));
    assert!(board.can_place(&plus, 2, 2));

    board.place(&plus, 2, 2);
    assert!(board.is_occupied(3, 3));
    assert!(board.is_occupied(2, 3));
    // Corners still hold the old blocks.
    assert_eq!(board.get(2, 2).unwrap().unwrap().color, BlockColor::Sky);
}

#[test]
fn test_full_line_detection_rows_and_cols() {
    let mut board = Board::new();
    for col in 0..GRID_SIZE as i8 {
        board.set(0, col, Some(PlacedCell::new(BlockColor::Green)));
        board.set(6, col, Some(PlacedCell::new(BlockColor::Green)));
    }
    for row in 0..GRID_SIZE as i8 {
        board.set(row, 2, Some(PlacedCell::new(BlockColor::Green)));
    }

    let lines = board.find_full_lines();
    assert_eq!(lines.rows.as_slice(), &[0, 6]);
    assert_eq!(lines.cols.as_slice(), &[2]);
    assert_eq!(lines.line_count(), 3);
}

#[test]
fn test_near_full_line_is_not_detected() {
    let mut board = Board::new();
    for col in 0..7 {
        board.set(0, col, Some(PlacedCell::new(BlockColor::Green)));
    }
    assert!(board.find_full_lines().is_empty());
}

#[test]
fn test_clear_counts_each_cell_once() {
    let mut board = Board::new();
    for col in 0..GRID_SIZE as i8 {
        board.set(4, col, Some(PlacedCell::new(BlockColor::Lavender)));
    }
    for row in 0..GRID_SIZE as i8 {
        board.set(row, 4, Some(PlacedCell::new(BlockColor::Lavender)));
    }

    let lines = board.find_full_lines();
    let stats = board.clear_lines(&lines);

    assert_eq!(stats.lines_cleared, 2);
    // Row and column share the cell at (4, 4).
    assert_eq!(stats.cells_cleared, 15);
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_leaves_other_cells_alone() {
    let mut board = Board::new();
    for col in 0..GRID_SIZE as i8 {
        board.set(0, col, Some(PlacedCell::new(BlockColor::Pink)));
    }
    board.set(5, 5, Some(PlacedCell::new(BlockColor::Violet)));

    let lines = board.find_full_lines();
    board.clear_lines(&lines);

    assert!(board.is_free(0, 0));
    assert!(board.is_occupied(5, 5));
}

#[test]
fn test_clear_empty_lineset_is_noop() {
    let mut board = Board::new();
    board.set(1, 1, Some(PlacedCell::new(BlockColor::Lemon)));

    let stats = board.clear_lines(&LineSet::default());
    assert_eq!(stats.lines_cleared, 0);
    assert_eq!(stats.cells_cleared, 0);
    assert!(board.is_occupied(1, 1));
}

#[test]
fn test_row_completes_on_last_cell_regardless_of_order() {
    // Fill row 0 with two 1x4 bars, in both orders.
    for segments in [[0i8, 4], [4, 0]] {
        let mut board = Board::new();
        let bar4 = piece(3);

        board.place(&bar4, 0, segments[0]);
        assert!(board.find_full_lines().is_empty());

        board.place(&bar4, 0, segments[1]);
        let lines = board.find_full_lines();
        assert_eq!(lines.rows.as_slice(), &[0]);
        assert!(lines.cols.is_empty());
    }
}

#[test]
fn test_clear_restores_pre_placement_occupancy_outside_lines() {
    let mut board = Board::new();
    board.set(3, 3, Some(PlacedCell::new(BlockColor::Violet)));
    for col in 0..7 {
        board.set(0, col, Some(PlacedCell::new(BlockColor::Pink)));
    }
    let before = board.clone();

    // Complete row 0, then clear exactly the lines the placement finished.
    board.place(&piece(0), 0, 7);
    let lines = board.find_full_lines();
    board.clear_lines(&lines);

    for row in 1..GRID_SIZE as i8 {
        for col in 0..GRID_SIZE as i8 {
            assert_eq!(board.get(row, col), before.get(row, col));
        }
    }
    for col in 0..GRID_SIZE as i8 {
        assert!(board.is_free(0, col));
    }
}

#[test]
fn test_can_fit_anywhere() {
    let mut board = Board::new();
    assert!(board.can_fit_anywhere(&piece(10))); // 3x3 on an empty board

    // Checkerboard leaves no 2-cell pocket anywhere.
    for row in 0..GRID_SIZE as i8 {
        for col in 0..GRID_SIZE as i8 {
            if (row + col) % 2 == 0 {
                board.set(row, col, Some(PlacedCell::new(BlockColor::Coral)));
            }
        }
    }
    assert!(!board.can_fit_anywhere(&piece(1))); // 1x2
    assert!(board.can_fit_anywhere(&piece(0))); // 1x1
}
