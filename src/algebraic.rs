use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::{Coord, col_from_algebraic, col_to_algebraic, row_from_algebraic};
use crate::error::MoveError;
use crate::movement::{adjacent_files, path_is_clear};
use crate::once_cell_regex;
use crate::piece::{CastleSide, Color, Piece, PieceId, PieceKind};
use crate::util::{as_single_char, sort_two};


// Origin hint carried by the notation. SAN omits the origin whenever the
// destination alone identifies the piece, so the hint comes in four shapes;
// anything else is rejected at parse time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Disambiguation {
    Unambiguous,
    ByFile(i8),
    ByRank(i8),
    BySquare(Coord),
}

#[derive(Clone, Debug)]
pub struct AlgebraicMove {
    pub kind: PieceKind,
    pub disambiguation: Disambiguation,
    pub capturing: bool,
    pub to: Coord,
    pub promote_to: Option<PieceKind>,
}

#[derive(Clone, Debug)]
pub enum AlgebraicTurn {
    Move(AlgebraicMove),
    Castle(CastleSide),
}

// Board-free reading of a notation string. Check and mate marks are recorded
// as-is; they are annotations supplied by the writer of the notation, not
// facts derived from a position.
#[derive(Clone, Debug)]
pub struct ParsedNotation {
    pub turn: AlgebraicTurn,
    pub is_check: bool,
    pub is_checkmate: bool,
}

// Notation resolved against a concrete board: the piece to move, where it
// goes, and the annotation flags from the input text.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TranslatedMove {
    pub piece: PieceId,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
}

impl ParsedNotation {
    pub fn parse(notation: &str) -> Result<Self, MoveError> {
        let notation = notation.trim();
        let move_re = once_cell_regex!(
            r"^([A-Z])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=([A-Z]))?([+#]?)$"
        );
        let queenside_re = once_cell_regex!(r"^(0-0-0|O-O-O)([+#]?)$");
        let kingside_re = once_cell_regex!(r"^(0-0|O-O)([+#]?)$");

        let (turn, mark) = if let Some(cap) = move_re.captures(notation) {
            let kind = match cap.get(1) {
                None => PieceKind::Pawn,
                Some(m) => {
                    PieceKind::from_algebraic(m.as_str()).ok_or(MoveError::MalformedNotation)?
                }
            };
            let from_col = cap
                .get(2)
                .map(|m| col_from_algebraic(as_single_char(m.as_str()).unwrap()).unwrap());
            let from_row = cap
                .get(3)
                .map(|m| row_from_algebraic(as_single_char(m.as_str()).unwrap()).unwrap());
            let disambiguation = match (from_col, from_row) {
                (None, None) => Disambiguation::Unambiguous,
                (Some(col), None) => Disambiguation::ByFile(col),
                (None, Some(row)) => Disambiguation::ByRank(row),
                (Some(col), Some(row)) => Disambiguation::BySquare(Coord::new(col, row)),
            };
            let capturing = cap.get(4).is_some();
            let to = Coord::from_algebraic(cap.get(5).unwrap().as_str()).unwrap();
            let promote_to = match cap.get(6) {
                None => None,
                // The letter must name a piece; whether it is a sensible
                // promotion target is not checked.
                Some(m) => Some(
                    PieceKind::from_algebraic(m.as_str()).ok_or(MoveError::MalformedNotation)?,
                ),
            };
            let mark = cap.get(7).map(|m| m.as_str().to_owned());
            (
                AlgebraicTurn::Move(AlgebraicMove { kind, disambiguation, capturing, to, promote_to }),
                mark,
            )
        } else if let Some(cap) = queenside_re.captures(notation) {
            (AlgebraicTurn::Castle(CastleSide::Queenside), cap.get(2).map(|m| m.as_str().to_owned()))
        } else if let Some(cap) = kingside_re.captures(notation) {
            (AlgebraicTurn::Castle(CastleSide::Kingside), cap.get(2).map(|m| m.as_str().to_owned()))
        } else {
            return Err(MoveError::MalformedNotation);
        };

        let mark = mark.unwrap_or_default();
        Ok(ParsedNotation {
            turn,
            is_check: mark == "+",
            is_checkmate: mark == "#",
        })
    }
}

// Renders a move as SAN text. Castling is recognized first: a king travelling
// two or more files along its home rank. Origin file/rank prefixes for
// disambiguation are never emitted; `from_algebraic` accepts them but this
// direction does not produce them.
pub fn to_algebraic(
    piece: &Piece, to: Coord, capture: bool, promote_to: Option<PieceKind>,
) -> String {
    let (d_col, _) = to - piece.pos;
    if piece.kind == PieceKind::King
        && d_col.abs() >= 2
        && piece.pos.row == piece.color.home_rank()
    {
        return if d_col > 0 { "O-O" } else { "O-O-O" }.to_owned();
    }

    let promotion = match promote_to {
        Some(kind) => format!("={}", kind.to_full_algebraic()),
        None => String::new(),
    };
    if piece.kind == PieceKind::Pawn && capture {
        return format!(
            "{}x{}{}",
            col_to_algebraic(piece.pos.col),
            to.to_algebraic(),
            promotion
        );
    }
    format!(
        "{}{}{}{}",
        piece.kind.to_algebraic_for_move(),
        if capture { "x" } else { "" },
        to.to_algebraic(),
        promotion,
    )
}

// Resolves SAN text against a board for the given side to move. Candidate
// pieces are filtered by geometric reachability (line shape plus clear path
// for sliders), then by the origin hint.
pub fn from_algebraic(
    board: &Board, notation: &str, color: Color,
) -> Result<TranslatedMove, MoveError> {
    let parsed = ParsedNotation::parse(notation)?;
    match parsed.turn {
        AlgebraicTurn::Castle(side) => resolve_castle(board, color, side, &parsed),
        AlgebraicTurn::Move(ref mv) => resolve_move(board, color, mv, &parsed),
    }
}

fn resolve_castle(
    board: &Board, color: Color, side: CastleSide, parsed: &ParsedNotation,
) -> Result<TranslatedMove, MoveError> {
    let king = board.king(color).ok_or(MoveError::InvalidCastling)?;
    let rook_col = match side {
        CastleSide::Kingside => 7,
        CastleSide::Queenside => 0,
    };
    // The destination is the rook's corner square: the applicator reads a
    // same-color unmoved rook on the destination as the castling request.
    let corner = Coord::new(rook_col, king.pos.row);
    let rook = board
        .piece_at(corner)
        .filter(|p| p.kind == PieceKind::Rook && p.color == color)
        .ok_or(MoveError::InvalidCastling)?;
    if king.has_moved || rook.has_moved {
        return Err(MoveError::InvalidCastling);
    }
    Ok(TranslatedMove {
        piece: king.id,
        to: corner,
        promotion: None,
        is_castling: true,
        is_capture: false,
        is_check: parsed.is_check,
        is_checkmate: parsed.is_checkmate,
    })
}

fn resolve_move(
    board: &Board, color: Color, mv: &AlgebraicMove, parsed: &ParsedNotation,
) -> Result<TranslatedMove, MoveError> {
    // Pawn captures always carry the origin file ("exd5"); a bare "xd5" is
    // inconsistent notation.
    if mv.kind == PieceKind::Pawn
        && mv.capturing
        && mv.disambiguation == Disambiguation::Unambiguous
    {
        return Err(MoveError::MalformedNotation);
    }

    let mut matching: Vec<&Piece> = Vec::new();
    for piece in board.pieces().iter().filter(|p| p.kind == mv.kind && p.color == color) {
        if candidate_matches(board, piece, mv)? {
            matching.push(piece);
        }
    }

    let piece = match matching.as_slice() {
        [] => return Err(MoveError::PieceNotFound),
        [piece] => piece,
        // A full square hint is unambiguous by definition; anything less with
        // several candidates left means the notation underspecifies the move.
        [piece, ..] => match mv.disambiguation {
            Disambiguation::BySquare(_) => piece,
            _ => return Err(MoveError::AmbiguousNotation),
        },
    };
    Ok(TranslatedMove {
        piece: piece.id,
        to: mv.to,
        promotion: mv.promote_to,
        is_castling: false,
        is_capture: mv.capturing,
        is_check: parsed.is_check,
        is_checkmate: parsed.is_checkmate,
    })
}

fn candidate_matches(board: &Board, piece: &Piece, mv: &AlgebraicMove) -> Result<bool, MoveError> {
    // A piece already standing on the destination cannot be the mover.
    if piece.pos == mv.to {
        return Ok(false);
    }
    Ok(match mv.disambiguation {
        Disambiguation::Unambiguous => reachable_by_shape(board, piece, mv.to),
        Disambiguation::ByFile(col) => {
            if piece.kind == PieceKind::Pawn {
                if mv.capturing {
                    piece.pos.col == col && adjacent_files(col, mv.to.col)?
                } else {
                    // No diagonal movement implied: the stated file must also
                    // be the destination file.
                    piece.pos.col == col && col == mv.to.col
                }
            } else {
                reachable_by_shape(board, piece, mv.to) && piece.pos.col == col
            }
        }
        Disambiguation::ByRank(row) => {
            if piece.kind == PieceKind::Pawn {
                // Pawn moves are only ever disambiguated by file.
                false
            } else {
                reachable_by_shape(board, piece, mv.to) && piece.pos.row == row
            }
        }
        Disambiguation::BySquare(from) => piece.pos == from,
    })
}

fn reachable_by_shape(board: &Board, piece: &Piece, to: Coord) -> bool {
    let (d_col, d_row) = to - piece.pos;
    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.color.forward();
            d_col == 0 && (d_row == forward || (d_row == 2 * forward && !piece.has_moved))
        }
        PieceKind::Rook => (d_col == 0 || d_row == 0) && path_is_clear(board, piece.pos, to),
        PieceKind::Knight => sort_two((d_col.abs(), d_row.abs())) == (1, 2),
        PieceKind::Bishop => d_col.abs() == d_row.abs() && path_is_clear(board, piece.pos, to),
        PieceKind::Queen => {
            (d_col == 0 || d_row == 0 || d_col.abs() == d_row.abs())
                && path_is_clear(board, piece.pos, to)
        }
        PieceKind::King => {
            d_col.abs() <= 1 && d_row.abs() <= 1 && path_is_clear(board, piece.pos, to)
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn coord(s: &str) -> Coord { Coord::from_algebraic(s).unwrap() }

    fn parse_move(notation: &str) -> AlgebraicMove {
        match ParsedNotation::parse(notation).unwrap().turn {
            AlgebraicTurn::Move(mv) => mv,
            AlgebraicTurn::Castle(_) => panic!("expected a move, got a castle"),
        }
    }

    #[test]
    fn parses_piece_letters_and_destinations() {
        let mv = parse_move("Nf3");
        assert_eq!(mv.kind, PieceKind::Knight);
        assert_eq!(mv.to, coord("f3"));
        assert_eq!(mv.disambiguation, Disambiguation::Unambiguous);
        assert!(!mv.capturing);

        let mv = parse_move("e4");
        assert_eq!(mv.kind, PieceKind::Pawn);
        assert_eq!(mv.to, coord("e4"));
    }

    #[test]
    fn parses_capture_and_origin_hints() {
        let mv = parse_move("exd5");
        assert_eq!(mv.kind, PieceKind::Pawn);
        assert_eq!(mv.disambiguation, Disambiguation::ByFile(4));
        assert!(mv.capturing);
        assert_eq!(mv.to, coord("d5"));

        let mv = parse_move("R1d1");
        assert_eq!(mv.disambiguation, Disambiguation::ByRank(0));

        let mv = parse_move("Ra1d1");
        assert_eq!(mv.disambiguation, Disambiguation::BySquare(coord("a1")));

        let mv = parse_move("Qxd8");
        assert_eq!(mv.kind, PieceKind::Queen);
        assert!(mv.capturing);
    }

    #[test]
    fn parses_promotion_and_marks() {
        let parsed = ParsedNotation::parse("e8=Q+").unwrap();
        let AlgebraicTurn::Move(ref mv) = parsed.turn else { panic!() };
        assert_eq!(mv.promote_to, Some(PieceKind::Queen));
        assert!(parsed.is_check);
        assert!(!parsed.is_checkmate);

        let parsed = ParsedNotation::parse("Qd8#").unwrap();
        assert!(parsed.is_checkmate);
        assert!(!parsed.is_check);

        // The promotion letter is not checked against legal promotion targets.
        let mv = parse_move("e8=K");
        assert_eq!(mv.promote_to, Some(PieceKind::King));
    }

    #[test]
    fn parses_castling_text() {
        let parsed = ParsedNotation::parse("O-O").unwrap();
        assert!(matches!(parsed.turn, AlgebraicTurn::Castle(CastleSide::Kingside)));
        let parsed = ParsedNotation::parse("0-0-0").unwrap();
        assert!(matches!(parsed.turn, AlgebraicTurn::Castle(CastleSide::Queenside)));
        let parsed = ParsedNotation::parse("O-O-O+").unwrap();
        assert!(matches!(parsed.turn, AlgebraicTurn::Castle(CastleSide::Queenside)));
        assert!(parsed.is_check);
    }

    #[test]
    fn rejects_malformed_text() {
        for notation in ["", "hello", "Zf3", "e9", "i4", "Nf3x", "e4=", "O-O-O-O"] {
            assert_eq!(
                ParsedNotation::parse(notation).unwrap_err(),
                MoveError::MalformedNotation,
                "notation {notation:?}"
            );
        }
    }

    #[test]
    fn formats_moves() {
        let pawn =
            Piece::new(PieceId(0), PieceKind::Pawn, Color::White, coord("e2"), false);
        assert_eq!(to_algebraic(&pawn, coord("e4"), false, None), "e4");

        let knight =
            Piece::new(PieceId(1), PieceKind::Knight, Color::White, coord("g1"), false);
        assert_eq!(to_algebraic(&knight, coord("f3"), false, None), "Nf3");

        let queen =
            Piece::new(PieceId(2), PieceKind::Queen, Color::White, coord("d1"), true);
        assert_eq!(to_algebraic(&queen, coord("d8"), true, None), "Qxd8");

        let pawn =
            Piece::new(PieceId(3), PieceKind::Pawn, Color::White, coord("e4"), true);
        assert_eq!(to_algebraic(&pawn, coord("d5"), true, None), "exd5");

        let pawn =
            Piece::new(PieceId(4), PieceKind::Pawn, Color::White, coord("e7"), true);
        assert_eq!(to_algebraic(&pawn, coord("e8"), false, Some(PieceKind::Queen)), "e8=Q");
    }

    #[test]
    fn formats_castling_from_king_travel() {
        let king = Piece::new(PieceId(0), PieceKind::King, Color::White, coord("e1"), false);
        assert_eq!(to_algebraic(&king, coord("g1"), false, None), "O-O");
        assert_eq!(to_algebraic(&king, coord("h1"), false, None), "O-O");
        assert_eq!(to_algebraic(&king, coord("c1"), false, None), "O-O-O");
        assert_eq!(to_algebraic(&king, coord("a1"), false, None), "O-O-O");
        // A single step is an ordinary king move.
        assert_eq!(to_algebraic(&king, coord("f1"), false, None), "Kf1");

        let king = Piece::new(PieceId(1), PieceKind::King, Color::Black, coord("e8"), false);
        assert_eq!(to_algebraic(&king, coord("g8"), false, None), "O-O");
    }
}
