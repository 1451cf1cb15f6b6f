#![cfg(test)]

use crate::board::Board;
use crate::game::{COL_COUNT, ROW_COUNT};
use crate::pieces::TileType;
use crate::tests::test_utils::fill_row_except;

#[test]
fn new_board_is_empty_and_accepts_a_spawn() {
    let board = Board::new();
    assert_eq!(board.width, COL_COUNT);
    assert_eq!(board.height, ROW_COUNT);
    for x in 0..board.width {
        for y in 0..board.height {
            assert!(board.cell(x, y).is_none());
        }
    }
    assert!(board.is_valid_and_empty(TileType::T, 4, 0, 0));
}

#[test]
fn positions_outside_the_grid_are_invalid() {
    let board = Board::new();
    // Left edge: the O box spans two columns starting at col
    assert!(board.is_valid_and_empty(TileType::O, 0, 0, 0));
    assert!(!board.is_valid_and_empty(TileType::O, -1, 0, 0));
    // Right edge
    assert!(board.is_valid_and_empty(TileType::O, COL_COUNT as i32 - 2, 0, 0));
    assert!(!board.is_valid_and_empty(TileType::O, COL_COUNT as i32 - 1, 0, 0));
    // Bottom edge
    assert!(board.is_valid_and_empty(TileType::O, 0, ROW_COUNT as i32 - 2, 0));
    assert!(!board.is_valid_and_empty(TileType::O, 0, ROW_COUNT as i32 - 1, 0));
    // Top edge
    assert!(!board.is_valid_and_empty(TileType::O, 0, -1, 0));
}

#[test]
fn occupied_cells_are_invalid() {
    let mut board = Board::new();
    board.add_piece(TileType::O, 4, 18, 0);
    assert!(!board.is_valid_and_empty(TileType::O, 4, 18, 0));
    // Overlapping by a single cell is enough to reject
    assert!(!board.is_valid_and_empty(TileType::O, 5, 17, 0));
    // A clear spot nearby is still fine
    assert!(board.is_valid_and_empty(TileType::O, 7, 18, 0));
}

#[test]
fn add_piece_tags_cells_with_the_tile_type() {
    let mut board = Board::new();
    board.add_piece(TileType::J, 4, 10, 0);
    for &(dx, dy) in TileType::J.cells(0) {
        let x = (4 + dx) as usize;
        let y = (10 + dy) as usize;
        assert_eq!(board.cell(x, y), Some(TileType::J));
    }
}

#[test]
fn single_full_row_is_removed() {
    let mut board = Board::new();
    let bottom = ROW_COUNT - 1;
    fill_row_except(&mut board, bottom, &[], TileType::I);
    // A stray block above the full row should drop with it
    board.cells[3][bottom - 1] = Some(TileType::S);

    assert_eq!(board.check_lines(), 1);
    assert_eq!(board.cell(3, bottom), Some(TileType::S));
    assert!(board.cell(3, bottom - 1).is_none());
    for x in 0..board.width {
        if x != 3 {
            assert!(board.cell(x, bottom).is_none());
        }
    }
}

#[test]
fn simultaneous_clears_shift_rows_together() {
    let mut board = Board::new();
    let r1 = 16;
    let r2 = 18;
    fill_row_except(&mut board, r1, &[], TileType::I);
    fill_row_except(&mut board, r2, &[], TileType::I);

    // Markers: above both rows, between them, and below both
    board.cells[3][15] = Some(TileType::S);
    board.cells[5][17] = Some(TileType::J);
    board.cells[7][19] = Some(TileType::L);

    assert_eq!(board.check_lines(), 2);

    // Above both cleared rows: shifted down by two
    assert_eq!(board.cell(3, 17), Some(TileType::S));
    // Between the cleared rows: shifted down by one
    assert_eq!(board.cell(5, 18), Some(TileType::J));
    // Below both cleared rows: untouched
    assert_eq!(board.cell(7, 19), Some(TileType::L));

    // The vacated top rows are empty
    for x in 0..board.width {
        assert!(board.cell(x, 0).is_none());
        assert!(board.cell(x, 1).is_none());
    }

    // Nothing else survived
    let occupied = board
        .cells
        .iter()
        .flatten()
        .filter(|cell| cell.is_some())
        .count();
    assert_eq!(occupied, 3);
}

#[test]
fn four_line_clear_returns_four() {
    let mut board = Board::new();
    for y in (ROW_COUNT - 4)..ROW_COUNT {
        fill_row_except(&mut board, y, &[], TileType::Z);
    }
    assert_eq!(board.check_lines(), 4);
    assert!(board.cells.iter().flatten().all(Option::is_none));
}

#[test]
fn partial_rows_are_not_cleared() {
    let mut board = Board::new();
    fill_row_except(&mut board, ROW_COUNT - 1, &[4], TileType::I);
    assert_eq!(board.check_lines(), 0);
    assert_eq!(board.cell(0, ROW_COUNT - 1), Some(TileType::I));
}

#[test]
fn clear_resets_every_cell() {
    let mut board = Board::new();
    board.add_piece(TileType::T, 4, 10, 0);
    fill_row_except(&mut board, 19, &[], TileType::I);
    board.clear();
    assert!(board.cells.iter().flatten().all(Option::is_none));
}
