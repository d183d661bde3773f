use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Castling rights in fixed order: White kingside, White queenside,
/// Black kingside, Black queenside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    /// The four flags as `[wk, wq, bk, bq]`.
    pub fn as_array(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    /// Number of active flags for one color (0..=2).
    pub fn count(&self, c: Color) -> i32 {
        self.kingside(c) as i32 + self.queenside(c) as i32
    }

    pub fn clear(&mut self, c: Color) {
        match c {
            Color::White => {
                self.wk = false;
                self.wq = false;
            }
            Color::Black => {
                self.bk = false;
                self.bq = false;
            }
        }
    }

    /// Whether `sq` is the original corner of a `c` rook that still has a right.
    pub fn corner_right(&self, c: Color, sq: u8) -> bool {
        match (c, sq) {
            (Color::White, 0) => self.wq,
            (Color::White, 7) => self.wk,
            (Color::Black, 56) => self.bq,
            (Color::Black, 63) => self.bk,
            _ => false,
        }
    }

    /// Drop the right tied to a `c` rook on corner `sq`, if any.
    pub fn clear_corner(&mut self, c: Color, sq: u8) {
        match (c, sq) {
            (Color::White, 0) => self.wq = false,
            (Color::White, 7) => self.wk = false,
            (Color::Black, 56) => self.bq = false,
            (Color::Black, 63) => self.bk = false,
            _ => {}
        }
    }

    /// Parse the FEN castling field. Unknown letters are ignored.
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = Self::default();
        for c in field.chars() {
            match c {
                'K' => rights.wk = true,
                'Q' => rights.wq = true,
                'k' => rights.bk = true,
                'q' => rights.bq = true,
                _ => {}
            }
        }
        rights
    }

    pub fn to_fen_field(&self) -> String {
        let mut s = String::with_capacity(4);
        for (on, ch) in self.as_array().into_iter().zip(['K', 'Q', 'k', 'q']) {
            if on {
                s.push(ch);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::all();

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(PieceKind::Pawn, Color::White));
            p.board[48 + f] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(kind, Color::White));
            p.board[56 + f] = Some(Piece::new(kind, Color::Black));
        }
        p
    }

    /// Empty board, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse a FEN string.
    ///
    /// Only the board field is mandatory. Missing or unreadable trailing
    /// fields default field by field: White to move, no castling, no
    /// en-passant square, half-move clock 0, full-move number 1.
    ///
    /// FEN has no notion of "has moved", so the flags are inferred: a pawn off
    /// its starting rank has moved, and a king or rook counts as unmoved only
    /// while a castling right still refers to its square. Knights, bishops
    /// and queens always come back unmoved, so `from_fen(&p.to_fen())` equals
    /// `p` at the FEN level but not necessarily field for field.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().ok_or(FenError::Empty)?;

        let mut pos = Position::empty();
        pos.board = parse_board(board_part)?;
        pos.side_to_move = match parts.next() {
            Some("b") | Some("B") => Color::Black,
            _ => Color::White,
        };
        pos.castling = parts
            .next()
            .map(CastlingRights::from_fen_field)
            .unwrap_or_default();
        pos.en_passant = parts.next().and_then(coord_to_sq);
        pos.halfmove_clock = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        pos.fullmove_number = parts
            .next()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(1);

        pos.infer_moved_flags();
        Ok(pos)
    }

    fn infer_moved_flags(&mut self) {
        for s in 0..64u8 {
            let Some(pc) = self.board[s as usize] else {
                continue;
            };
            let moved = match pc.kind {
                PieceKind::Pawn => rank_of(s) != pc.color.home_rank() + pc.color.forward(),
                PieceKind::King => {
                    let home = sq(4, pc.color.home_rank());
                    !(home == Some(s)
                        && (self.castling.kingside(pc.color) || self.castling.queenside(pc.color)))
                }
                PieceKind::Rook => !self.castling.corner_right(pc.color, s),
                _ => false,
            };
            self.board[s as usize] = Some(Piece { moved, ..pc });
        }
    }

    /// Board field of the FEN (ranks 8 down to 1).
    pub fn board_fen(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Board and side to move only; the opening table key.
    pub fn truncated_fen(&self) -> String {
        let stm = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.board_fen(), stm)
    }

    pub fn to_fen(&self) -> String {
        let ep = self
            .en_passant
            .map(sq_to_coord)
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} {} {} {} {}",
            self.truncated_fen(),
            self.castling.to_fen_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| {
            self.piece_at(s)
                .is_some_and(|pc| pc.color == c && pc.kind == PieceKind::King)
        })
    }

    /// `None` for empty squares and for indices off the board.
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board.get(sq as usize).copied().flatten()
    }
    /// Writes to indices off the board are ignored.
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(slot) = self.board.get_mut(sq as usize) {
            *slot = pc;
        }
    }

    /// Total number of pieces on the board, kings included.
    pub fn piece_count(&self) -> usize {
        self.board.iter().flatten().count()
    }

    /// Number of pieces of one kind and color.
    pub fn count(&self, c: Color, kind: PieceKind) -> i32 {
        self.board
            .iter()
            .flatten()
            .filter(|pc| pc.color == c && pc.kind == kind)
            .count() as i32
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn holds(&self, s: u8, by: Color, kinds: &[PieceKind]) -> bool {
        self.piece_at(s)
            .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
    }

    /// Whether any `by` piece attacks `target` on the current board.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A `by` pawn attacks from one rank behind the target.
        let pawn_rank = tr - by.forward();
        for df in [-1, 1] {
            if sq(tf + df, pawn_rank).is_some_and(|s| self.holds(s, by, &[PieceKind::Pawn])) {
                return true;
            }
        }

        let leapers = [
            (&KNIGHT_DELTAS, PieceKind::Knight),
            (&KING_DELTAS, PieceKind::King),
        ];
        for (deltas, kind) in leapers {
            for (df, dr) in deltas {
                if sq(tf + df, tr + dr).is_some_and(|s| self.holds(s, by, &[kind])) {
                    return true;
                }
            }
        }

        let sliders = [
            (&DIAGONALS, PieceKind::Bishop),
            (&ORTHOGONALS, PieceKind::Rook),
        ];
        for (dirs, kind) in sliders {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.holds(s, by, &[kind, PieceKind::Queen]) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// True if `mv` is a pawn capturing onto the en-passant target.
    pub fn is_en_passant(&self, mv: Move) -> bool {
        self.en_passant == Some(mv.to)
            && file_of(mv.from) != file_of(mv.to)
            && self.piece_at(mv.to).is_none()
            && self
                .piece_at(mv.from)
                .is_some_and(|pc| pc.kind == PieceKind::Pawn)
    }

    /// The piece `mv` would remove from the board, en passant included.
    pub fn captured_by(&self, mv: Move) -> Option<Piece> {
        if self.is_en_passant(mv) {
            return sq(file_of(mv.to), rank_of(mv.from)).and_then(|s| self.piece_at(s));
        }
        self.piece_at(mv.to)
    }

    /// Execute a move assumed to be legal.
    ///
    /// Handles captures, en passant, promotion, castling (a two-file king
    /// move drags its rook along), castling-right bookkeeping, both clocks and
    /// the side to move. A move from an empty square leaves the position
    /// untouched.
    pub fn make_move(&mut self, mv: Move) {
        let from = mv.from;
        let to = mv.to;
        let Some(moved) = self.piece_at(from) else {
            debug_assert!(false, "make_move from empty square {}", sq_to_coord(from));
            return;
        };
        let mover = moved.color;
        let is_pawn = moved.kind == PieceKind::Pawn;
        let mut captured = self.piece_at(to);

        // En passant: the captured pawn sits beside the origin, not on `to`.
        if self.is_en_passant(mv) {
            if let Some(cs) = sq(file_of(to), rank_of(from)) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(from, None);
        let last_rank = mover.other().home_rank();
        let placed = if is_pawn && rank_of(to) == last_rank {
            Piece::new(mv.promotion_kind(), mover).mark_moved()
        } else {
            moved.mark_moved()
        };
        self.set_piece(to, Some(placed));

        if moved.kind == PieceKind::King && (file_of(to) - file_of(from)).abs() == 2 {
            let rank = rank_of(from);
            let (corner_file, rook_file) = if file_of(to) > file_of(from) {
                (7, file_of(to) - 1)
            } else {
                (0, file_of(to) + 1)
            };
            if let (Some(rf), Some(rt)) = (sq(corner_file, rank), sq(rook_file, rank)) {
                if let Some(rook) = self.piece_at(rf) {
                    self.set_piece(rf, None);
                    self.set_piece(rt, Some(rook.mark_moved()));
                }
            }
        }

        if moved.kind == PieceKind::King {
            self.castling.clear(mover);
        }
        if moved.kind == PieceKind::Rook {
            self.castling.clear_corner(mover, from);
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                self.castling.clear_corner(cp.color, to);
            }
        }

        self.en_passant = None;
        if is_pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if is_pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
    }

    /// Copy of the position with `mv` applied.
    pub fn after(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Zobrist hash over pieces, side to move, castling rights and the
    /// en-passant file. Independent of object identity, so clones agree.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for (s, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= ZOBRIST.piece_key(*pc, s as u8);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        for (i, on) in self.castling.as_array().into_iter().enumerate() {
            if on {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.ep_key(file_of(ep) as u8);
        }
        h
    }
}

fn parse_board(board_part: &str) -> Result<[Option<Piece>; 64], FenError> {
    let mut board = [None; 64];
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
        let fen_rank = 8 - rank_idx;
        let mut file: usize = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += d as usize;
            } else {
                let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece {
                    ch,
                    rank: fen_rank,
                })?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let s = sq(file as i8, rank).ok_or(FenError::FileCount {
                    rank: fen_rank,
                    files: file + 1,
                })?;
                board[s as usize] = Some(Piece::new(kind, color));
                file += 1;
            }
            if file > 8 {
                return Err(FenError::FileCount {
                    rank: fen_rank,
                    files: file,
                });
            }
        }
        if file != 8 {
            return Err(FenError::FileCount {
                rank: fen_rank,
                files: file,
            });
        }
    }
    Ok(board)
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
