//! 迭代加深 + Negamax Alpha-Beta 搜索
//!
//! 搜索在调用方棋盘的私有副本上原地 make/undo。超时通过返回 `None` 一路向上传递，
//! 当前深度的结果整体作废，保留上一个完整深度的最佳走法。

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::eval::{evaluate, piece_value, position_value, GENERAL_VALUE};
use super::tt::{position_hash, Bound, TTEntry, TranspositionTable};
use crate::board::Board;
use crate::movegen::{gives_check, legal_moves_in_place};
use crate::types::{Move, PieceKind, Side, SQUARE_COUNT};

/// 杀棋分数（再按层数修正，越快的杀越高）
pub const MATE_SCORE: i32 = GENERAL_VALUE;
/// 超过该绝对值视为已找到杀棋
pub const MATE_THRESHOLD: i32 = 9000;
const INFINITY: i32 = 30000;

/// 超过时间预算的这个比例后不再开始新的深度
const TIME_FRACTION: f64 = 0.8;

// 走法排序权重
const TT_MOVE_BONUS: i32 = 1_000_000;
const SOLDIER_ADVANCE_BONUS: i32 = 300;
const CHECK_BONUS: i32 = 500;
const HISTORY_CAP: i32 = 1 << 16;

/// 杀棋分数存表时改为相对当前节点的距离
#[inline]
fn value_to_tt(value: i32, ply: i32) -> i32 {
    if value > MATE_THRESHOLD {
        value + ply
    } else if value < -MATE_THRESHOLD {
        value - ply
    } else {
        value
    }
}

/// 取表时把杀棋分数换回相对根节点的距离
#[inline]
fn value_from_tt(value: i32, ply: i32) -> i32 {
    if value > MATE_THRESHOLD {
        value - ply
    } else if value < -MATE_THRESHOLD {
        value + ply
    } else {
        value
    }
}

/// 一次搜索的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 最佳走法；走子方无合法走法时为 None
    pub mv: Option<Move>,
    /// 走子方视角的分数
    pub score: i32,
    /// 最后完成的搜索深度
    pub depth: u32,
    /// 访问的节点数
    pub nodes: u64,
}

/// 跨搜索保留的状态：置换表和历史表
pub struct SearchState {
    tt: TranspositionTable,
    history: Vec<[i32; SQUARE_COUNT]>,
    nodes: u64,
    deadline: Option<Instant>,
}

impl SearchState {
    pub fn new(tt_bits: u32) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_bits),
            history: vec![[0; SQUARE_COUNT]; SQUARE_COUNT],
            nodes: 0,
            deadline: None,
        }
    }

    /// 清空置换表和历史表
    pub fn reset(&mut self) {
        self.tt.clear();
        for row in &mut self.history {
            row.fill(0);
        }
        self.nodes = 0;
        self.deadline = None;
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn history_score(&self, mv: Move) -> i32 {
        self.history[mv.from.to_index()][mv.to.to_index()]
    }

    fn update_history(&mut self, mv: Move, depth: u32) {
        let entry = &mut self.history[mv.from.to_index()][mv.to.to_index()];
        *entry = entry.saturating_add(1 << depth.min(16));

        if *entry > HISTORY_CAP {
            for row in &mut self.history {
                for v in row.iter_mut() {
                    *v /= 2;
                }
            }
        }
    }

    #[inline]
    fn is_time_up(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// 迭代加深搜索
    ///
    /// 深度 1 不受时间限制，所以只要有合法走法就一定返回走法。
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        side: Side,
        max_depth: u32,
        time_limit: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        self.nodes = 0;
        self.deadline = None;

        let mut scratch = board.clone();
        let root_moves = legal_moves_in_place(&mut scratch, side);
        if root_moves.is_empty() {
            info!("{} has no legal moves", side);
            return SearchResult {
                mv: None,
                score: -MATE_SCORE,
                depth: 0,
                nodes: 0,
            };
        }

        let soft_limit = time_limit.mul_f64(TIME_FRACTION);
        let mut result = SearchResult {
            mv: root_moves.first().copied(),
            score: 0,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth.max(1) {
            if depth > 1 {
                if start.elapsed() >= soft_limit {
                    debug!("time budget spent before depth {}", depth);
                    break;
                }
                self.deadline = start.checked_add(time_limit);
            }

            match self.search_root(&mut scratch, side, &root_moves, depth, result.mv) {
                Some((mv, score)) => {
                    result.mv = mv;
                    result.score = score;
                    result.depth = depth;
                    debug!(
                        "depth {} best {} score {} nodes {} elapsed {:?}",
                        depth,
                        mv.map_or_else(|| "-".to_string(), |m| m.to_string()),
                        score,
                        self.nodes,
                        start.elapsed()
                    );
                    if score.abs() > MATE_THRESHOLD {
                        break;
                    }
                }
                None => {
                    warn!("depth {} aborted on time, keeping depth {}", depth, result.depth);
                    break;
                }
            }
        }

        self.deadline = None;
        result.nodes = self.nodes;
        info!(
            "{} plays {} (score {}, depth {}, nodes {}, {:?})",
            side,
            result.mv.map_or_else(|| "-".to_string(), |m| m.to_string()),
            result.score,
            result.depth,
            result.nodes,
            start.elapsed()
        );
        result
    }

    /// 根节点搜索，返回最佳走法和分数；超时返回 None
    fn search_root(
        &mut self,
        board: &mut Board,
        side: Side,
        moves: &[Move],
        depth: u32,
        prev_best: Option<Move>,
    ) -> Option<(Option<Move>, i32)> {
        self.nodes += 1;
        let hash = position_hash(board, side);
        let ordered = self.order_moves(board, side, moves.to_vec(), prev_best);

        let mut alpha = -INFINITY;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in ordered {
            let captured = board.make_move(mv);
            let score = self.negamax(board, side.opposite(), depth - 1, -INFINITY, -alpha, 1);
            board.undo_move(mv, captured);
            let score = -score?;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
                self.update_history(mv, depth);
            }
        }

        self.tt.store(TTEntry {
            hash,
            depth,
            value: best_score,
            bound: Bound::Exact,
            best_move,
        });
        Some((best_move, best_score))
    }

    /// Negamax Alpha-Beta，分数为 `side` 视角；超时返回 None
    pub(crate) fn negamax(
        &mut self,
        board: &mut Board,
        side: Side,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        ply: i32,
    ) -> Option<i32> {
        if self.is_time_up() {
            return None;
        }
        self.nodes += 1;

        if depth == 0 {
            return Some(evaluate(board, side));
        }

        let hash = position_hash(board, side);
        let mut tt_move = None;
        if let Some(entry) = self.tt.get(hash) {
            if entry.depth >= depth {
                let value = value_from_tt(entry.value, ply);
                match entry.bound {
                    Bound::Exact => return Some(value),
                    Bound::Lower => alpha = alpha.max(value),
                    Bound::Upper => beta = beta.min(value),
                }
                if alpha >= beta {
                    return Some(value);
                }
            }
            tt_move = entry.best_move;
        }
        // 按探查后收窄的窗口判断边界类型
        let alpha_orig = alpha;

        let moves = legal_moves_in_place(board, side);
        if moves.is_empty() {
            // 被将死或困毙都判负
            return Some(-MATE_SCORE + ply);
        }
        let moves = self.order_moves(board, side, moves, tt_move);

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            let captured = board.make_move(mv);
            let score = self.negamax(board, side.opposite(), depth - 1, -beta, -alpha, ply + 1);
            board.undo_move(mv, captured);
            let score = -score?;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.update_history(mv, depth);
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(TTEntry {
            hash,
            depth,
            value: value_to_tt(best_score, ply),
            bound,
            best_move,
        });

        Some(best_score)
    }

    /// 单个走法的排序分
    fn move_order_score(&self, board: &mut Board, side: Side, mv: Move) -> i32 {
        let piece = match board.get(mv.from) {
            Some(p) => p,
            None => return 0,
        };
        let mut score = 0;

        // MVV-LVA
        if let Some(victim) = board.get(mv.to) {
            score += 10 * piece_value(victim, mv.to) - piece_value(piece, mv.from);
        }

        if piece.kind == PieceKind::Soldier && mv.to.is_across_river(side) {
            score += SOLDIER_ADVANCE_BONUS;
        }

        score += (position_value(piece, mv.to) - position_value(piece, mv.from)) * 2;

        if gives_check(board, mv) {
            score += CHECK_BONUS;
        }

        score + self.history_score(mv)
    }

    /// 走法排序（分高在前，同分保持生成顺序）
    pub(crate) fn order_moves(
        &self,
        board: &mut Board,
        side: Side,
        moves: Vec<Move>,
        first: Option<Move>,
    ) -> Vec<Move> {
        let mut scored: Vec<(i32, Move)> = moves
            .into_iter()
            .map(|mv| {
                let mut score = self.move_order_score(board, side, mv);
                if first == Some(mv) {
                    score += TT_MOVE_BONUS;
                }
                (score, mv)
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }
}
