use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const NUM_ROWS: i8 = 8;
pub const NUM_COLS: i8 = 8;


pub fn col_from_algebraic(ch: char) -> Option<i8> {
    if ('a'..='h').contains(&ch) { Some(ch as i8 - 'a' as i8) } else { None }
}
pub fn col_to_algebraic(col: i8) -> char {
    assert!((0..NUM_COLS).contains(&col));
    (col as u8 + b'a') as char
}
pub fn row_from_algebraic(ch: char) -> Option<i8> {
    if ('1'..='8').contains(&ch) { Some(ch as i8 - '1' as i8) } else { None }
}
pub fn row_to_algebraic(row: i8) -> char {
    assert!((0..NUM_ROWS).contains(&row));
    (row as u8 + b'1') as char
}


// A square addressed by zero-based file (`col`, a-h) and rank (`row`, 1-8).
// Off-board values are representable so that ray walks can step over the edge
// and notice; `is_on_board` is the containment test.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: i8,
    pub row: i8,
}

impl Coord {
    pub const fn new(col: i8, row: i8) -> Self { Coord { col, row } }

    pub fn is_on_board(self) -> bool {
        (0..NUM_COLS).contains(&self.col) && (0..NUM_ROWS).contains(&self.row)
    }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (file, rank) = s.chars().collect_tuple()?;
        Some(Coord {
            col: col_from_algebraic(file)?,
            row: row_from_algebraic(rank)?,
        })
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", col_to_algebraic(self.col), row_to_algebraic(self.row))
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_ROWS)
            .cartesian_product(0..NUM_COLS)
            .map(|(row, col)| Coord { col, row })
    }
}

impl ops::Add<(i8, i8)> for Coord {
    type Output = Self;
    // `other` is (delta col, delta row).
    fn add(self, other: (i8, i8)) -> Self::Output {
        Coord { col: self.col + other.0, row: self.row + other.1 }
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output {
        (self.col - other.col, self.row - other.row)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "Coord({})", self.to_algebraic())
        } else {
            write!(f, "Coord({},{})", self.col, self.row)
        }
    }
}
