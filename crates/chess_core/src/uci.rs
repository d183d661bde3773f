//! Coordinate move notation: `e2e4`, with an optional promotion letter
//! (`e7e8n`). Formatting and parsing are inverses.

use crate::{
    board::Position,
    error::{ChessError, ChessResult},
    movegen::legal_moves_from,
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Parse notation without looking at a position.
pub fn parse_move(txt: &str) -> ChessResult<Move> {
    let invalid = || ChessError::InvalidNotation(txt.to_string());
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(invalid());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(invalid)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(invalid)?;
    let promo = match txt.chars().nth(4) {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
            _ => return Err(invalid()),
        },
    };
    Ok(Move { from, to, promo })
}

/// Parse notation and resolve it against the legal moves of `pos`.
pub fn parse_uci_move(pos: &Position, txt: &str) -> ChessResult<Move> {
    let wanted = parse_move(txt)?;
    legal_moves_from(pos, wanted.from)
        .into_iter()
        .find(|m| m.same_as(wanted))
        .ok_or_else(|| ChessError::IllegalMove {
            mv: txt.trim().to_string(),
        })
}

/// Play a sequence of moves in notation, stopping at the first illegal one.
pub fn play_moves<S: AsRef<str>>(pos: &mut Position, moves: &[S]) -> ChessResult<()> {
    for txt in moves {
        let mv = parse_uci_move(pos, txt.as_ref())?;
        pos.make_move(mv);
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
