#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod algebraic;
pub mod board;
pub mod check;
pub mod coord;
pub mod error;
pub mod fen;
pub mod movement;
pub mod piece;
pub mod util;

pub use crate::algebraic::{from_algebraic, to_algebraic, TranslatedMove};
pub use crate::board::{Board, Move};
pub use crate::coord::Coord;
pub use crate::error::MoveError;
pub use crate::piece::{CastleSide, Color, Piece, PieceId, PieceKind};
