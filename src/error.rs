use serde::{Deserialize, Serialize};


// Classified failures surfaced to the caller. Callers are expected to match on
// the variant, not on the rendered message.
#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display, Serialize, Deserialize)]
pub enum MoveError {
    // A square or letter-to-index conversion outside the 8x8 board.
    OutOfRange,
    // Notation resolved to zero candidate pieces.
    PieceNotFound,
    // More than one candidate piece and no full square disambiguator.
    AmbiguousNotation,
    // Castling requested, but king or rook is missing or has already moved.
    InvalidCastling,
    // A concrete (piece, destination) pair failed validation.
    IllegalMove,
    // Notation text the parser does not recognize.
    MalformedNotation,
}

impl std::error::Error for MoveError {}
