//! Piece identities and their glyph / FEN mappings.
//!
//! Manual data identifies pieces by a single Chinese glyph. Red pieces use
//! the simplified characters and black pieces the traditional ones, so the
//! glyph alone determines both side and kind.

/// The two sides of a Xiangqi game. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// Returns the turn indicator used in position strings.
    pub const fn fen_char(self) -> char {
        match self {
            Side::Red => 'w',
            Side::Black => 'b',
        }
    }
}

/// The kind of a piece, independent of side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Pawn,
}

/// A piece of a given kind belonging to a given side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Parses a manual glyph. Returns `None` for characters outside the
    /// fourteen-glyph alphabet.
    pub fn from_glyph(c: char) -> Option<Piece> {
        let (side, kind) = match c {
            '帅' => (Side::Red, PieceKind::King),
            '仕' => (Side::Red, PieceKind::Advisor),
            '相' => (Side::Red, PieceKind::Elephant),
            '马' => (Side::Red, PieceKind::Horse),
            '车' => (Side::Red, PieceKind::Chariot),
            '炮' => (Side::Red, PieceKind::Cannon),
            '兵' => (Side::Red, PieceKind::Pawn),
            '將' => (Side::Black, PieceKind::King),
            '士' => (Side::Black, PieceKind::Advisor),
            '象' => (Side::Black, PieceKind::Elephant),
            '馬' => (Side::Black, PieceKind::Horse),
            '車' => (Side::Black, PieceKind::Chariot),
            '砲' => (Side::Black, PieceKind::Cannon),
            '卒' => (Side::Black, PieceKind::Pawn),
            _ => return None,
        };
        Some(Piece { side, kind })
    }

    /// Returns the position-string character: uppercase for red,
    /// lowercase for black.
    pub const fn fen_char(self) -> char {
        let c = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Pawn => 'p',
        };
        match self.side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// Maps a glyph straight to its position-string character.
pub fn glyph_to_fen_char(c: char) -> Option<char> {
    Piece::from_glyph(c).map(Piece::fen_char)
}
