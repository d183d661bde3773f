use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Rank direction pawns of this color advance in.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
    /// Back rank (0-based) of this color.
    pub fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, most valuable first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN letter.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece on the board. `moved` only ever goes from false to true for a
/// given piece; promotion replaces the piece instead of clearing the flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            moved: false,
        }
    }

    pub fn kind(self) -> PieceKind {
        self.kind
    }
    pub fn color(self) -> Color {
        self.color
    }
    pub fn has_moved(self) -> bool {
        self.moved
    }

    /// Same piece, flagged as having moved.
    pub fn mark_moved(self) -> Self {
        Self {
            moved: true,
            ..self
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A move is plain data: start square, end square and an optional promotion
/// kind (a promotion without one becomes a Queen). It carries no legality
/// guarantee until checked against the legal move list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub promo: Option<PieceKind>,
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            from,
            to,
            promo: None,
        }
    }

    pub fn with_promo(from: u8, to: u8, promo: PieceKind) -> Self {
        Self {
            from,
            to,
            promo: Some(promo),
        }
    }

    /// Promotion kind applied if this move takes a pawn to its last rank.
    pub fn promotion_kind(self) -> PieceKind {
        self.promo.unwrap_or(PieceKind::Queen)
    }

    /// True if both moves name the same squares and resolve to the same
    /// promotion kind.
    pub fn same_as(self, other: Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.promotion_kind() == other.promotion_kind()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

// Helpers
pub fn file_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub fn rank_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

/// 1-based (file, rank) pair, e.g. e2 -> (5, 2).
pub fn to_file_rank(sq: u8) -> (u8, u8) {
    (sq % 8 + 1, sq / 8 + 1)
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
