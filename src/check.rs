use crate::board::Board;
use crate::coord::Coord;
use crate::error::MoveError;
use crate::piece::{Piece, PieceId, PieceKind};


const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_STEPS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2),
];

fn first_piece_along(board: &Board, from: Coord, step: (i8, i8)) -> Option<&Piece> {
    let mut pos = from + step;
    while pos.is_on_board() {
        if let Some(piece) = board.piece_at(pos) {
            return Some(piece);
        }
        pos = pos + step;
    }
    None
}

// Whether the king's square is attacked by any opposing piece. Scans sliding
// rays for rooks/bishops/queens, the knight offsets and the two pawn capture
// squares. An adjacent enemy king is not reported as a threat.
pub fn is_in_check(board: &Board, king: &Piece) -> bool {
    assert_eq!(king.kind, PieceKind::King, "check test against a non-king piece");

    for step in ORTHOGONAL_STEPS {
        if let Some(piece) = first_piece_along(board, king.pos, step) {
            if piece.color != king.color
                && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen)
            {
                return true;
            }
        }
    }
    for step in DIAGONAL_STEPS {
        if let Some(piece) = first_piece_along(board, king.pos, step) {
            if piece.color != king.color
                && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen)
            {
                return true;
            }
        }
    }
    for offset in KNIGHT_OFFSETS {
        if let Some(piece) = board.piece_at(king.pos + offset) {
            if piece.color != king.color && piece.kind == PieceKind::Knight {
                return true;
            }
        }
    }
    // An attacking pawn sits one rank ahead of the king, from the king's own
    // point of view, and moves towards it.
    let forward = king.color.forward();
    for offset in [(1, forward), (-1, forward)] {
        if let Some(piece) = board.piece_at(king.pos + offset) {
            if piece.color != king.color && piece.kind == PieceKind::Pawn {
                return true;
            }
        }
    }
    false
}

// Simulates relocating `piece_id` to `to` and reports whether the mover's own
// king would be in check. The relocation is reverted on every path, including
// early error returns, via a scope guard.
pub fn move_leaves_king_in_check(
    board: &mut Board, piece_id: PieceId, to: Coord,
) -> Result<bool, MoveError> {
    let (color, original_pos) = {
        let piece = board.piece(piece_id).ok_or(MoveError::PieceNotFound)?;
        (piece.color, piece.pos)
    };
    let mut board = scopeguard::guard(board, move |board| {
        if let Some(piece) = board.piece_mut(piece_id) {
            piece.pos = original_pos;
        }
    });
    board.piece_mut(piece_id).unwrap().pos = to;
    let king = *board.king(color).ok_or(MoveError::PieceNotFound)?;
    Ok(is_in_check(&board, &king))
}
