//! AI 模块
//!
//! 迭代加深 Alpha-Beta 搜索，配合置换表、历史表和按难度划分的深度/时间预算。
//! `AIEngine` 持有跨搜索复用的缓存，只有 `reset()` 会清空它们。

pub mod difficulty;
pub mod eval;
pub mod search;
pub mod tt;

pub use difficulty::Difficulty;
pub use eval::evaluate;
pub use search::{SearchResult, SearchState, MATE_SCORE, MATE_THRESHOLD};

use std::time::Duration;

use log::warn;
use rand::prelude::*;

use crate::board::Board;
use crate::movegen::get_legal_moves;
use crate::types::{Move, Side};

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 随机种子
    pub seed: Option<u64>,
    /// 简单难度下改走随机走法的概率（0.0-1.0）
    pub random_move_chance: f64,
    /// 置换表大小为 2^tt_bits
    pub tt_bits: u32,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            seed: None,
            random_move_chance: 0.3,
            tt_bits: tt::DEFAULT_TT_BITS,
        }
    }
}

/// AI 引擎
pub struct AIEngine {
    rng: StdRng,
    random_move_chance: f64,
    state: SearchState,
}

impl Default for AIEngine {
    fn default() -> Self {
        AIEngine::new(&AIConfig::default())
    }
}

impl AIEngine {
    pub fn new(config: &AIConfig) -> Self {
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        AIEngine {
            rng,
            random_move_chance: config.random_move_chance.clamp(0.0, 1.0),
            state: SearchState::new(config.tt_bits),
        }
    }

    /// 指定深度和时间预算搜索
    pub fn search(
        &mut self,
        board: &Board,
        side: Side,
        max_depth: u32,
        time_limit: Duration,
    ) -> SearchResult {
        self.state.iterative_deepening(board, side, max_depth, time_limit)
    }

    /// 按难度搜索（简单难度可能替换为随机走法）
    pub fn search_with_difficulty(
        &mut self,
        board: &Board,
        side: Side,
        difficulty: Difficulty,
    ) -> SearchResult {
        let mut result = self.search(board, side, difficulty.max_depth(), difficulty.time_limit());

        if difficulty.allows_random_move()
            && result.mv.is_some()
            && self.rng.gen_bool(self.random_move_chance)
        {
            let moves = get_legal_moves(board, side);
            if let Some(&mv) = moves.choose(&mut self.rng) {
                warn!("{} difficulty: playing random move {} instead of {:?}", difficulty, mv, result.mv);
                result.mv = Some(mv);
            }
        }

        result
    }

    /// 选择最佳走法；无合法走法时返回 None
    pub fn get_best_move(&mut self, board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
        self.search_with_difficulty(board, side, difficulty).mv
    }

    /// 清空置换表和历史表
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }
}

/// 用一个新引擎选择最佳走法
pub fn get_best_move(board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
    AIEngine::default().get_best_move(board, side, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::movegen::apply_move;
    use crate::test_positions;
    use std::time::Instant;

    fn engine(seed: u64, random_move_chance: f64) -> AIEngine {
        AIEngine::new(&AIConfig {
            seed: Some(seed),
            random_move_chance,
            tt_bits: 14,
        })
    }

    #[test]
    fn test_easy_from_opening_returns_legal_move_in_time() {
        let board = Board::initial();
        let mut ai = engine(42, 0.3);
        let start = Instant::now();
        let mv = ai.get_best_move(&board, Side::Red, Difficulty::Easy).unwrap();
        assert!(start.elapsed() < Difficulty::Easy.time_limit() * 2);

        let mut board = board;
        assert!(apply_move(&mut board, mv.from, mv.to).is_ok());
    }

    #[test]
    fn test_easy_with_forced_random_move_is_legal() {
        let board = Board::initial();
        let legal = get_legal_moves(&board, Side::Red);
        let mut ai = engine(7, 1.0);
        for _ in 0..3 {
            let mv = ai.get_best_move(&board, Side::Red, Difficulty::Easy).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let board = Board::initial();
        let a = engine(5, 0.5).get_best_move(&board, Side::Red, Difficulty::Easy);
        let b = engine(5, 0.5).get_best_move(&board, Side::Red, Difficulty::Easy);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_moves_gives_none() {
        let (board, side) = parse_fen(test_positions::BLACK_STALEMATED).unwrap();
        assert_eq!(get_best_move(&board, side, Difficulty::Medium), None);
    }

    #[test]
    fn test_mate_in_one_on_medium() {
        let (board, side) = parse_fen(test_positions::MATE_IN_ONE).unwrap();
        let mut ai = engine(1, 0.0);
        let result = ai.search_with_difficulty(&board, side, Difficulty::Medium);
        assert!(result.score > MATE_THRESHOLD);
        let mv = result.mv.unwrap();

        let mut after = board.clone();
        after.make_move(mv);
        assert!(crate::check::is_checkmate(&after, side.opposite()));
    }

    #[test]
    fn test_caches_persist_until_reset() {
        let board = Board::initial();
        let mut ai = engine(3, 0.0);
        ai.search(&board, Side::Red, 2, Duration::from_secs(30));
        let filled = ai.state().tt().len();
        assert!(filled > 0);

        ai.search(&Board::initial(), Side::Red, 1, Duration::from_secs(30));
        assert!(ai.state().tt().len() >= filled);

        ai.reset();
        assert!(ai.state().tt().is_empty());
    }
}
