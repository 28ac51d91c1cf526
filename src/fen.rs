// Piece placement only: side to move, castling rights and move counters are
// tracked by the caller and are not part of this format. Parsed pieces start
// with `has_moved = false`, so castling-rights history does not survive a
// round trip of a mid-game position.

use itertools::Itertools;

use crate::board::Board;
use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::piece::{piece_from_ascii, piece_to_ascii};


// Serializes occupancy rank by rank, from the board's first row (White's home
// rank) to its last, empty squares run-length encoded, ranks joined by "/".
pub fn board_to_placement(board: &Board) -> String {
    (0..NUM_ROWS)
        .map(|row| {
            let mut row_notation = String::new();
            let mut empty_count = 0;
            for col in 0..NUM_COLS {
                if let Some(piece) = board.piece_at(Coord::new(col, row)) {
                    if empty_count > 0 {
                        row_notation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_notation.push(piece_to_ascii(piece.kind, piece.color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                row_notation.push_str(&empty_count.to_string());
            }
            row_notation
        })
        .join("/")
}

pub fn placement_to_board(placement: &str) -> Result<Board, String> {
    let rows = placement.split('/').collect_vec();
    if rows.len() != NUM_ROWS as usize {
        return Err(format!("invalid placement: has {} rows, expected {}", rows.len(), NUM_ROWS));
    }
    let mut board = Board::empty();
    for (row, row_notation) in rows.iter().enumerate() {
        let row = row as i8;
        let mut col: i8 = 0;
        for ch in row_notation.chars() {
            if let Some(n) = ch.to_digit(10) {
                col += n as i8;
                if col > NUM_COLS {
                    return Err(format!("invalid placement: row {row} overflows the board"));
                }
            } else if let Some((kind, color)) = piece_from_ascii(ch) {
                if col >= NUM_COLS {
                    return Err(format!("invalid placement: row {row} overflows the board"));
                }
                board.add_piece(kind, color, Coord::new(col, row));
                col += 1;
            } else {
                return Err(format!("invalid placement: unknown piece: {ch}"));
            }
        }
        if col != NUM_COLS {
            return Err(format!(
                "invalid placement: row {row} has {col} columns, expected {NUM_COLS}"
            ));
        }
    }
    Ok(board)
}
