use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::Coord;
use crate::util::as_single_char;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
pub enum Color {
    White,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u32);

#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Coord,
    pub has_moved: bool,
}

impl PieceKind {
    // Should not be used to construct moves in algebraic notation, because it returns a
    // non-empty letter for a pawn (use `to_algebraic_for_move` instead).
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn to_algebraic_for_move(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Self> {
        as_single_char(notation).and_then(Self::from_algebraic_char)
    }
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    // Rank delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

pub fn piece_to_ascii(kind: PieceKind, color: Color) -> char {
    let ch = kind.to_full_algebraic();
    match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch.to_ascii_lowercase(),
    }
}

pub fn piece_from_ascii(ch: char) -> Option<(PieceKind, Color)> {
    let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
    let kind = PieceKind::from_algebraic_char(ch.to_ascii_uppercase())?;
    Some((kind, color))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn algebraic_letters() {
        assert_eq!(PieceKind::from_algebraic("N"), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_algebraic("K"), Some(PieceKind::King));
        assert_eq!(PieceKind::from_algebraic("Z"), None);
        assert_eq!(PieceKind::from_algebraic("NN"), None);
        assert_eq!(PieceKind::Pawn.to_algebraic_for_move(), "");
        assert_eq!(PieceKind::Queen.to_algebraic_for_move(), "Q");
    }

    #[test]
    fn ascii_round_trip() {
        for kind in PieceKind::iter() {
            for color in Color::iter() {
                assert_eq!(piece_from_ascii(piece_to_ascii(kind, color)), Some((kind, color)));
            }
        }
        assert_eq!(piece_from_ascii('q'), Some((PieceKind::Queen, Color::Black)));
        assert_eq!(piece_from_ascii('P'), Some((PieceKind::Pawn, Color::White)));
        assert_eq!(piece_from_ascii('x'), None);
    }

    #[test]
    fn pawn_directions() {
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
        assert_eq!(Color::White.opponent(), Color::Black);
    }
}
