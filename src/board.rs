use log::debug;
use serde::{Deserialize, Serialize};

use crate::algebraic::{self, TranslatedMove};
use crate::check::move_leaves_king_in_check;
use crate::coord::{Coord, NUM_COLS};
use crate::error::MoveError;
use crate::movement::validate_move;
use crate::piece::{Color, Piece, PieceId, PieceKind};


// A move that already went through notation resolution: the validator's and
// the applicator's input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub piece: PieceId,
    pub to: Coord,
}

// The set of pieces plus the side to move. An explicit, caller-owned value:
// every operation takes the board it acts on, there is no process-wide state.
//
// Invariants: no two pieces share a square; at most one piece id is ever
// handed out per id counter value.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    active: Color,
    next_id: u32,
}

fn back_rank_kind(col: i8) -> PieceKind {
    match col {
        0 | 7 => PieceKind::Rook,
        1 | 6 => PieceKind::Knight,
        2 | 5 => PieceKind::Bishop,
        3 => PieceKind::Queen,
        4 => PieceKind::King,
        _ => panic!("no back rank piece for file {col}"),
    }
}

impl Board {
    pub fn empty() -> Board {
        Board { pieces: Vec::new(), active: Color::White, next_id: 0 }
    }

    // Standard starting position, White on rows 0 and 1.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for col in 0..NUM_COLS {
            let kind = back_rank_kind(col);
            board.add_piece(kind, Color::White, Coord::new(col, 0));
            board.add_piece(PieceKind::Pawn, Color::White, Coord::new(col, 1));
            board.add_piece(PieceKind::Pawn, Color::Black, Coord::new(col, 6));
            board.add_piece(kind, Color::Black, Coord::new(col, 7));
        }
        board
    }

    pub fn pieces(&self) -> &[Piece] { &self.pieces }
    pub fn active_color(&self) -> Color { self.active }
    pub fn set_active_color(&mut self, color: Color) { self.active = color; }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn piece_at(&self, pos: Coord) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.pos == pos)
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.kind == PieceKind::King && p.color == color)
    }

    pub fn add_piece(&mut self, kind: PieceKind, color: Color, pos: Coord) -> PieceId {
        assert!(pos.is_on_board());
        assert!(self.piece_at(pos).is_none(), "square {} is already occupied", pos.to_algebraic());
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece::new(id, kind, color, pos, false));
        id
    }

    pub fn remove_piece(&mut self, id: PieceId) {
        self.pieces.retain(|p| p.id != id);
    }

    // The move applicator. Assumes the move already passed validation and does
    // not re-validate. A same-color rook that has not moved yet sitting on the
    // destination square is the castling marker: both king and rook are then
    // relocated to their fixed post-castling files. The side to move flips on
    // every committed move.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let piece = *self.piece(mv.piece).ok_or(MoveError::PieceNotFound)?;
        let captured = self
            .piece_at(mv.to)
            .filter(|target| target.color != piece.color)
            .map(|target| target.id);
        let castling_rook = self
            .piece_at(mv.to)
            .filter(|target| {
                target.kind == PieceKind::Rook && target.color == piece.color && !target.has_moved
            })
            .map(|rook| (rook.id, rook.pos));

        if let Some(captured_id) = captured {
            debug!("captured {:?}", self.piece(captured_id).unwrap());
            self.remove_piece(captured_id);
        }
        if let Some((rook_id, rook_pos)) = castling_rook {
            let (king_col, rook_col) = if piece.pos.col > rook_pos.col {
                (2, 3) // queenside
            } else {
                (6, 5) // kingside
            };
            let row = piece.pos.row;
            self.piece_mut(mv.piece).unwrap().pos = Coord::new(king_col, row);
            let rook = self.piece_mut(rook_id).unwrap();
            rook.pos = Coord::new(rook_col, row);
            rook.has_moved = true;
            debug!("castled: king to {king_col}, rook to {rook_col} on row {row}");
        } else {
            self.piece_mut(mv.piece).unwrap().pos = mv.to;
        }
        self.piece_mut(mv.piece).unwrap().has_moved = true;
        self.active = self.active.opponent();
        Ok(())
    }

    // The full text-in entry point: resolve the notation for the side to move,
    // verify legality and king safety, then commit.
    pub fn make_algebraic_move(&mut self, notation: &str) -> Result<TranslatedMove, MoveError> {
        let mv = algebraic::from_algebraic(self, notation, self.active)?;
        let piece = *self.piece(mv.piece).ok_or(MoveError::PieceNotFound)?;
        if !validate_move(self, &piece, mv.to) {
            return Err(MoveError::IllegalMove);
        }
        if move_leaves_king_in_check(self, mv.piece, mv.to)? {
            return Err(MoveError::IllegalMove);
        }
        debug!("applying {notation}: {:?} to {:?}", piece, mv.to);
        self.apply_move(Move { piece: mv.piece, to: mv.to })?;
        Ok(mv)
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn coord(s: &str) -> Coord { Coord::from_algebraic(s).unwrap() }

    #[test]
    fn starting_position_shape() {
        let board = Board::new();
        assert_eq!(board.pieces().len(), 32);
        assert_eq!(board.active_color(), Color::White);
        assert_eq!(board.piece_at(coord("e1")).unwrap().kind, PieceKind::King);
        assert_eq!(board.piece_at(coord("d8")).unwrap().kind, PieceKind::Queen);
        assert_eq!(board.piece_at(coord("d8")).unwrap().color, Color::Black);
        assert_eq!(board.piece_at(coord("e4")), None);
        assert!(board.pieces().iter().all(|p| !p.has_moved));
    }

    #[test]
    fn apply_relocates_and_flips_side() {
        let mut board = Board::new();
        let pawn = board.piece_at(coord("e2")).unwrap().id;
        board.apply_move(Move { piece: pawn, to: coord("e4") }).unwrap();
        assert_eq!(board.piece(pawn).unwrap().pos, coord("e4"));
        assert!(board.piece(pawn).unwrap().has_moved);
        assert_eq!(board.active_color(), Color::Black);
    }

    #[test]
    fn apply_removes_captured_piece() {
        let mut board = Board::empty();
        let queen = board.add_piece(PieceKind::Queen, Color::White, coord("d1"));
        let target = board.add_piece(PieceKind::Queen, Color::Black, coord("d8"));
        board.apply_move(Move { piece: queen, to: coord("d8") }).unwrap();
        assert_eq!(board.piece(target), None);
        assert_eq!(board.piece(queen).unwrap().pos, coord("d8"));
        assert_eq!(board.pieces().len(), 1);
    }

    #[test]
    fn apply_kingside_castling_marker() {
        let mut board = Board::empty();
        let king = board.add_piece(PieceKind::King, Color::White, coord("e1"));
        let rook = board.add_piece(PieceKind::Rook, Color::White, coord("h1"));
        board.apply_move(Move { piece: king, to: coord("h1") }).unwrap();
        assert_eq!(board.piece(king).unwrap().pos, coord("g1"));
        assert_eq!(board.piece(rook).unwrap().pos, coord("f1"));
        assert!(board.piece(rook).unwrap().has_moved);
        assert!(board.piece(king).unwrap().has_moved);
    }

    #[test]
    fn apply_queenside_castling_marker() {
        let mut board = Board::empty();
        let king = board.add_piece(PieceKind::King, Color::Black, coord("e8"));
        let rook = board.add_piece(PieceKind::Rook, Color::Black, coord("a8"));
        board.apply_move(Move { piece: king, to: coord("a8") }).unwrap();
        assert_eq!(board.piece(king).unwrap().pos, coord("c8"));
        assert_eq!(board.piece(rook).unwrap().pos, coord("d8"));
    }

    #[test]
    fn apply_missing_piece_is_an_error() {
        let mut board = Board::empty();
        let ghost = PieceId(42);
        assert_eq!(
            board.apply_move(Move { piece: ghost, to: coord("e4") }),
            Err(MoveError::PieceNotFound)
        );
    }

    #[test]
    fn serde_round_trip() {
        let board = Board::new();
        let encoded = serde_json::to_string(&board).unwrap();
        let decoded: Board = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, board);
    }
}
