use crate::board::Board;
use crate::coord::{Coord, NUM_COLS};
use crate::error::MoveError;
use crate::piece::{Piece, PieceKind};
use crate::util::sort_two;


// Tests that every square strictly between `from` and `to` is free. Only
// meaningful for straight or exactly diagonal lines; any other geometry is
// reported clear, callers gate on shape first. `from == to` is a caller error.
pub fn path_is_clear(board: &Board, from: Coord, to: Coord) -> bool {
    assert!(from != to, "path query for a zero-length move");
    let (d_col, d_row) = to - from;
    if d_col != 0 && d_row != 0 && d_col.abs() != d_row.abs() {
        return true;
    }
    let step = (d_col.signum(), d_row.signum());
    let mut pos = from + step;
    while pos != to {
        if board.piece_at(pos).is_some() {
            return false;
        }
        pos = pos + step;
    }
    true
}

pub fn adjacent_files(a: i8, b: i8) -> Result<bool, MoveError> {
    if !(0..NUM_COLS).contains(&a) || !(0..NUM_COLS).contains(&b) {
        return Err(MoveError::OutOfRange);
    }
    Ok((a - b).abs() == 1)
}

// Pure legality predicate for a proposed (piece, destination) pair. Returns
// false for ordinary illegal moves and never mutates the board. A king landing
// on its own unmoved rook is the castling request and the only tolerated
// same-color destination.
pub fn validate_move(board: &Board, piece: &Piece, to: Coord) -> bool {
    if !to.is_on_board() {
        return false;
    }
    let target = board.piece_at(to);
    let is_castling_attempt = matches!(
        target,
        Some(t) if t.color == piece.color && t.kind == PieceKind::Rook
            && piece.kind == PieceKind::King
    );
    if let Some(target) = target {
        if target.color == piece.color && !is_castling_attempt {
            return false;
        }
    }

    let (d_col, d_row) = to - piece.pos;
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            // Initial double step: both the skipped square and the destination
            // must be empty.
            if piece.pos.row == piece.color.pawn_rank()
                && d_row == 2 * forward
                && d_col == 0
                && board.piece_at(piece.pos + (0, forward)).is_none()
                && target.is_none()
            {
                return true;
            }
            if d_row == forward && d_col == 0 && target.is_none() {
                return true;
            }
            if d_row == forward
                && d_col.abs() == 1
                && matches!(target, Some(t) if t.color != piece.color)
            {
                return true;
            }
            // En passant is not supported: the board keeps no record of the
            // previous move.
            false
        }
        PieceKind::Rook => {
            (d_col == 0 || d_row == 0)
                && !(d_col == 0 && d_row == 0)
                && path_is_clear(board, piece.pos, to)
        }
        PieceKind::Knight => sort_two((d_col.abs(), d_row.abs())) == (1, 2),
        PieceKind::Bishop => d_col.abs() == d_row.abs() && path_is_clear(board, piece.pos, to),
        PieceKind::Queen => {
            (d_col == 0 || d_row == 0 || d_col.abs() == d_row.abs())
                && path_is_clear(board, piece.pos, to)
        }
        PieceKind::King => {
            if is_castling_attempt {
                let on_home_rank = piece.pos.row == 0 || piece.pos.row == 7;
                if !(on_home_rank && d_row == 0 && (d_col == 3 || d_col == -4)) {
                    return false;
                }
                let rook_col = if d_col == 3 { 7 } else { 0 };
                let rook_ok = matches!(
                    board.piece_at(Coord::new(rook_col, piece.pos.row)),
                    Some(rook) if rook.kind == PieceKind::Rook
                        && rook.color == piece.color
                        && !rook.has_moved
                );
                rook_ok && !piece.has_moved && path_is_clear(board, piece.pos, to)
            } else {
                d_col.abs() <= 1 && d_row.abs() <= 1
            }
        }
    }
}
