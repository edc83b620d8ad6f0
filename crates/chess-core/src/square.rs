//! Board square representation.

use std::fmt;

/// A square on the chess board, addressed by file and rank.
///
/// Files run 0-7 from the a-file to the h-file. Ranks are counted from the
/// top of the board as White sees it: rank 0 is the eighth row (Black's back
/// rank) and rank 7 is the first row (White's back rank). So `a1` is
/// `(0, 7)` and `h8` is `(7, 0)`.
///
/// Both coordinates are always in `0..8`; the constructors refuse anything
/// else, so every `Square` value is on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from file and rank, or `None` if either is off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Creates a square from an index (0-63, row-major from a8).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                file: index % 8,
                rank: index / 8,
            })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let row = bytes[1];
        if file < b'a' || file > b'h' || row < b'1' || row > b'8' {
            return None;
        }
        Square::new(file - b'a', 8 - (row - b'0'))
    }

    /// Returns the file (0 = a, 7 = h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank, counted from the top (0 = eighth row).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the row-major index (0-63, a8 = 0, h1 = 63).
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Returns the square displaced by the given file and rank steps, or
    /// `None` if that lands off the board.
    #[inline]
    pub const fn offset(self, file_step: i8, rank_step: i8) -> Option<Self> {
        let file = self.file as i8 + file_step;
        let rank = self.rank as i8 + rank_step;
        if file < 0 || rank < 0 {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }

    /// Iterates over all 64 squares, row-major from a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).filter_map(Square::from_index)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }

    pub const A1: Square = Square { file: 0, rank: 7 };
    pub const B1: Square = Square { file: 1, rank: 7 };
    pub const C1: Square = Square { file: 2, rank: 7 };
    pub const D1: Square = Square { file: 3, rank: 7 };
    pub const E1: Square = Square { file: 4, rank: 7 };
    pub const F1: Square = Square { file: 5, rank: 7 };
    pub const G1: Square = Square { file: 6, rank: 7 };
    pub const H1: Square = Square { file: 7, rank: 7 };
    pub const A8: Square = Square { file: 0, rank: 0 };
    pub const B8: Square = Square { file: 1, rank: 0 };
    pub const C8: Square = Square { file: 2, rank: 0 };
    pub const D8: Square = Square { file: 3, rank: 0 };
    pub const E8: Square = Square { file: 4, rank: 0 };
    pub const F8: Square = Square { file: 5, rank: 0 };
    pub const G8: Square = Square { file: 6, rank: 0 };
    pub const H8: Square = Square { file: 7, rank: 0 };
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let b1 = Square::new(1, 7).unwrap();
        assert_eq!(b1.file(), 1);
        assert_eq!(b1.rank(), 7);
        assert_eq!(b1, Square::B1);
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 4));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(4, 4).unwrap().to_algebraic(), "e4");
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(0, 1), None);
        assert_eq!(Square::A1.offset(1, -2), Square::from_algebraic("b3"));
        assert_eq!(Square::H8.offset(1, 0), None);
        assert_eq!(Square::H8.offset(0, -1), None);
    }

    #[test]
    fn index_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.index() as u8), Some(sq));
        }
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H1.index(), 63);
    }
}
