//! Castling rights bookkeeping.

use chess_core::{Color, Square};

/// The two sides a king can castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// Toward the h-file (O-O).
    Kingside,
    /// Toward the a-file (O-O-O).
    Queenside,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File step from the king toward this side's rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastlingSide::Kingside => 1,
            CastlingSide::Queenside => -1,
        }
    }

    /// Returns the file of this side's rook corner.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    /// Returns the corner square this side's rook starts on.
    pub const fn rook_home(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastlingSide::Kingside) => Square::H1,
            (Color::White, CastlingSide::Queenside) => Square::A1,
            (Color::Black, CastlingSide::Kingside) => Square::H8,
            (Color::Black, CastlingSide::Queenside) => Square::A8,
        }
    }

    /// Returns which color's rook corner the square is, if it is one.
    pub fn from_rook_home(sq: Square) -> Option<(Color, CastlingSide)> {
        Color::BOTH.into_iter().find_map(|color| {
            Self::BOTH
                .into_iter()
                .find(|side| side.rook_home(color) == sq)
                .map(|side| (color, side))
        })
    }

    /// Returns the castling side a king move displaced by `file_step` files
    /// performs, if it is a castling move.
    pub const fn from_king_step(file_step: i8) -> Option<CastlingSide> {
        match file_step {
            2 => Some(CastlingSide::Kingside),
            -2 => Some(CastlingSide::Queenside),
            _ => None,
        }
    }
}

/// Castling rights flags.
///
/// One bit per color and side. Bits are only ever cleared, never set again,
/// once a game is under way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Parses the FEN castling field ("KQkq", "Kq", "-", ...).
    ///
    /// Unknown characters are ignored; the FEN parser rejects them earlier.
    pub fn from_fen(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            };
        }
        CastlingRights::new(flags)
    }

    /// Returns the FEN castling field for these rights.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Color::White, CastlingSide::Kingside, 'K'),
            (Color::White, CastlingSide::Queenside, 'Q'),
            (Color::Black, CastlingSide::Kingside, 'k'),
            (Color::Black, CastlingSide::Queenside, 'q'),
        ]
        .into_iter()
        .filter(|&(color, side, _)| self.allows(color, side))
        .map(|(_, _, c)| c)
        .collect()
    }

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the color may still castle toward the given side.
    #[inline]
    pub const fn allows(self, color: Color, side: CastlingSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given color can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.allows(color, CastlingSide::Kingside)
    }

    /// Returns true if the given color can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.allows(color, CastlingSide::Queenside)
    }

    /// Removes one side's castling right for a color.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastlingSide::Kingside);
        self.remove(color, CastlingSide::Queenside);
    }

    /// Returns true if every right held by `self` is also held by `earlier`.
    #[inline]
    pub const fn is_subset_of(self, earlier: CastlingRights) -> bool {
        self.0 & !earlier.0 == 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}
