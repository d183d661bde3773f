//! A live game: the current position plus everything needed to classify it.

use tracing::debug;

use crate::{
    board::Position,
    error::{ChessError, ChessResult},
    movegen::{legal_moves, legal_moves_from},
    types::*,
};

/// Outcome of a game, derived from the position and its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    WhiteWins,
    BlackWins,
    /// Stalemate, threefold repetition or the fifty-move rule
    Draw,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    /// Board field of every position reached, starting position included
    board_history: Vec<String>,
    moves: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Position::startpos())
    }
}

impl Game {
    pub fn new(position: Position) -> Self {
        let board_history = vec![position.board_fen()];
        Self {
            position,
            board_history,
            moves: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::new(Position::from_fen(fen)?))
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    /// Legal moves from one square, for move hints.
    pub fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        legal_moves_from(&self.position, from)
    }

    /// Validate and apply a move. Nothing changes when it is rejected.
    pub fn try_move(&mut self, mv: Move) -> ChessResult<()> {
        if mv.from >= 64 || mv.to >= 64 {
            return Err(ChessError::InvalidNotation(format!(
                "square index out of range: {} -> {}",
                mv.from, mv.to
            )));
        }
        let square = || sq_to_coord(mv.from);
        let pc = self
            .position
            .piece_at(mv.from)
            .ok_or_else(|| ChessError::EmptySquare { square: square() })?;
        if pc.color != self.position.side_to_move {
            return Err(ChessError::WrongSide { square: square() });
        }
        let legal = self
            .legal_moves_from(mv.from)
            .into_iter()
            .find(|m| m.same_as(mv))
            .ok_or_else(|| ChessError::IllegalMove { mv: mv.to_string() })?;

        self.position.make_move(legal);
        self.board_history.push(self.position.board_fen());
        self.moves.push(legal);
        debug!(mv = %legal, fen = %self.position.to_fen(), "move played");
        Ok(())
    }

    pub fn is_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    /// Current board has appeared at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.board_history.last() else {
            return false;
        };
        self.board_history.iter().filter(|b| *b == current).count() >= 3
    }

    pub fn status(&self) -> GameStatus {
        if self.legal_moves().is_empty() {
            if !self.is_check() {
                return GameStatus::Draw;
            }
            return match self.position.side_to_move {
                Color::White => GameStatus::BlackWins,
                Color::Black => GameStatus::WhiteWins,
            };
        }
        if self.is_threefold_repetition() || self.position.is_fifty_move_draw() {
            return GameStatus::Draw;
        }
        GameStatus::Ongoing
    }
}
