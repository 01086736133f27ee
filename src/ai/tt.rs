//! Zobrist 哈希与置换表
//!
//! 哈希覆盖棋盘内容和行棋方。置换表是固定大小的数组，按 `hash & mask` 寻址，
//! 条目里保存完整哈希用于校验；不同局面落在同一槽位时直接覆盖。

use rand::prelude::*;

use crate::board::Board;
use crate::types::{Move, Piece, Side, SQUARE_COUNT};

struct ZobristTable {
    /// [格子][阵营 * 7 + 棋子类型]
    pieces: [[u64; 14]; SQUARE_COUNT],
    black_to_move: u64,
}

impl ZobristTable {
    fn new() -> Self {
        // 固定种子：同一局面在任何进程里哈希都相同
        let mut rng = StdRng::seed_from_u64(0xDEADCAFE);
        let mut pieces = [[0u64; 14]; SQUARE_COUNT];
        for square in pieces.iter_mut() {
            for key in square.iter_mut() {
                *key = rng.gen();
            }
        }
        ZobristTable {
            pieces,
            black_to_move: rng.gen(),
        }
    }

    #[inline]
    fn piece_key(&self, index: usize, piece: Piece) -> u64 {
        self.pieces[index][piece.side.index() * 7 + piece.kind.index()]
    }
}

lazy_static::lazy_static! {
    static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

/// 计算局面哈希（棋盘 + 行棋方）
pub fn position_hash(board: &Board, side_to_move: Side) -> u64 {
    let mut hash = board.pieces().fold(0u64, |h, (sq, piece)| {
        h ^ ZOBRIST.piece_key(sq.to_index(), piece)
    });
    if side_to_move == Side::Black {
        hash ^= ZOBRIST.black_to_move;
    }
    hash
}

/// 置换表分值的边界类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// 精确值
    Exact,
    /// 下界（发生了 beta 剪枝）
    Lower,
    /// 上界（没有走法超过 alpha）
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u32,
    pub value: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// 默认 2^18 个槽位
pub const DEFAULT_TT_BITS: u32 = 18;

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_BITS)
    }
}

impl TranspositionTable {
    /// 创建 2^bits 个槽位的置换表
    pub fn new(bits: u32) -> Self {
        let size = 1usize << bits.clamp(1, 26);
        TranspositionTable {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[inline]
    pub fn get(&self, hash: u64) -> Option<&TTEntry> {
        self.entries[(hash as usize) & self.mask]
            .as_ref()
            .filter(|e| e.hash == hash)
    }

    /// 写入条目：同一局面只在深度不更浅时替换，不同局面直接覆盖
    pub fn store(&mut self, entry: TTEntry) {
        let slot = &mut self.entries[(entry.hash as usize) & self.mask];
        match slot {
            Some(old) if old.hash == entry.hash && old.depth > entry.depth => {}
            _ => *slot = Some(entry),
        }
    }

    /// 已占用槽位数
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }
}
