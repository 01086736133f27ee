//! 对局记录
//!
//! `Game` 持有权威棋盘、行棋方和走子历史，所有走子都经过合法性校验，
//! 可以逐步悔棋。

use crate::board::Board;
use crate::check::{game_result, is_in_check};
use crate::error::{FenError, MoveError};
use crate::fen::{parse_fen, to_fen};
use crate::movegen::{apply_move, get_legal_moves};
use crate::types::{GameResult, Move, Piece, Side, Square};

/// 一步走子的记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    history: Vec<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// 标准开局，红方先走
    pub fn new() -> Self {
        Game {
            board: Board::initial(),
            side_to_move: Side::Red,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, side_to_move) = parse_fen(fen)?;
        Ok(Game {
            board,
            side_to_move,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn to_fen(&self) -> String {
        to_fen(&self.board, self.side_to_move)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        get_legal_moves(&self.board, self.side_to_move)
    }

    pub fn in_check(&self) -> bool {
        is_in_check(&self.board, self.side_to_move)
    }

    pub fn result(&self) -> GameResult {
        game_result(&self.board, self.side_to_move)
    }

    pub fn is_over(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    /// 走一步棋，返回被吃的棋子
    ///
    /// 校验顺序：对局是否结束、起点是否有子、是否轮到该方、走法是否合法。
    /// 任何错误都不会修改棋盘。
    pub fn play(&mut self, from: Square, to: Square) -> Result<Option<Piece>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get(from)
            .ok_or(MoveError::EmptySquare { square: from })?;
        if piece.side != self.side_to_move {
            return Err(MoveError::WrongSide {
                expected: self.side_to_move,
                found: piece.side,
            });
        }

        let captured = apply_move(&mut self.board, from, to)?;
        self.history.push(MoveRecord {
            mv: Move::new(from, to),
            piece,
            captured,
        });
        self.side_to_move = self.side_to_move.opposite();
        Ok(captured)
    }

    /// 用 ICCS 字符串走棋（如 "h2e2"）
    pub fn play_iccs(&mut self, notation: &str) -> Result<Option<Piece>, MoveError> {
        let mv = Move::from_iccs(notation).ok_or_else(|| MoveError::InvalidNotation {
            notation: notation.to_string(),
        })?;
        self.play(mv.from, mv.to)
    }

    /// 悔棋一步；没有历史时返回 None
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.board.undo_move(record.mv, record.captured);
        self.side_to_move = self.side_to_move.opposite();
        Some(record)
    }

    /// 按顺序列出所有被吃的棋子
    pub fn captured(&self) -> Vec<Piece> {
        self.history.iter().filter_map(|r| r.captured).collect()
    }
}
