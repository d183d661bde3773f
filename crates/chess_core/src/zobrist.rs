//! Zobrist keys for position hashing.
//!
//! `Position::position_hash` XORs one key per occupied (color, kind, square),
//! one for Black to move, one per active castling right and one for the
//! en-passant file. The search uses the result as its evaluation cache key, so
//! two clones of the same position always hash alike.

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// En-passant file 0-7
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

// splitmix64 step: returns (new state, output)
const fn splitmix(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

impl ZobristKeys {
    /// Deterministic keys from a fixed seed, evaluated at compile time.
    pub const fn new() -> Self {
        let mut state = 0x00C0_FFEE_D15E_A5E5u64;
        let mut step;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            step = splitmix(state);
            state = step.0;
            pieces[i / 384][(i / 64) % 6][i % 64] = step.1;
            i += 1;
        }

        step = splitmix(state);
        state = step.0;
        let side_to_move = step.1;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            step = splitmix(state);
            state = step.0;
            castling[i] = step.1;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            step = splitmix(state);
            state = step.0;
            en_passant[i] = step.1;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
