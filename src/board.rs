//! 象棋棋盘
//!
//! 使用 90 格数组存储棋子。棋子本身不记录位置，位置完全由数组下标决定。
//! 棋盘只是数据容器，不做任何走法校验（校验由 `movegen` 负责）。

use std::fmt;

use crate::types::{Move, Piece, PieceKind, Side, Square, COLS, ROWS, SQUARE_COUNT};

/// 标准开局 FEN
pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

/// 开局底线排布（从左到右）
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// 象棋棋盘（10 行 x 9 列）
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
    /// 将的位置缓存，只在 `set` 中维护
    generals: [Option<Square>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [None; SQUARE_COUNT],
            generals: [None; 2],
        }
    }

    /// 标准开局局面
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            board.set(Square::new(0, col), Some(Piece::new(*kind, Side::Black)));
            board.set(Square::new(9, col), Some(Piece::new(*kind, Side::Red)));
        }
        for col in [1, 7] {
            board.set(Square::new(2, col), Some(Piece::new(PieceKind::Cannon, Side::Black)));
            board.set(Square::new(7, col), Some(Piece::new(PieceKind::Cannon, Side::Red)));
        }
        for col in (0..COLS).step_by(2) {
            board.set(Square::new(3, col), Some(Piece::new(PieceKind::Soldier, Side::Black)));
            board.set(Square::new(6, col), Some(Piece::new(PieceKind::Soldier, Side::Red)));
        }
        board
    }

    /// 获取某位置的棋子（越界返回 None）
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !sq.is_valid() {
            return None;
        }
        self.squares[sq.to_index()]
    }

    /// 放置或清空某位置，返回原来的棋子
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        debug_assert!(sq.is_valid(), "square out of board: {:?}", sq);
        let old = std::mem::replace(&mut self.squares[sq.to_index()], piece);

        if let Some(p) = old {
            if p.kind == PieceKind::General && self.generals[p.side.index()] == Some(sq) {
                self.generals[p.side.index()] = None;
            }
        }
        if let Some(p) = piece {
            if p.kind == PieceKind::General {
                self.generals[p.side.index()] = Some(sq);
            }
        }

        old
    }

    /// 检查位置是否有棋子
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.get(sq).is_some()
    }

    /// 找到某方某类棋子的位置（多个时返回下标最小的一个）
    pub fn find(&self, kind: PieceKind, side: Side) -> Option<Square> {
        if kind == PieceKind::General {
            return self.find_general(side);
        }
        let target = Piece::new(kind, side);
        self.pieces()
            .find(|(_, p)| *p == target)
            .map(|(sq, _)| sq)
    }

    /// 找到将的位置（使用缓存）
    #[inline]
    pub fn find_general(&self, side: Side) -> Option<Square> {
        self.generals[side.index()]
    }

    /// 双方的将都在场
    pub fn is_valid_position(&self) -> bool {
        self.generals.iter().all(|g| g.is_some())
    }

    /// 遍历所有棋子
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (Square::from_index(i), p)))
    }

    /// 遍历某方所有棋子
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side == side)
    }

    /// 两个同行或同列位置之间（不含两端）的棋子数
    ///
    /// 不在同一直线上时返回 None。
    pub fn count_between(&self, a: Square, b: Square) -> Option<usize> {
        if a == b {
            return Some(0);
        }
        let (dr, dc) = if a.row == b.row {
            (0, (b.col - a.col).signum())
        } else if a.col == b.col {
            ((b.row - a.row).signum(), 0)
        } else {
            return None;
        };
        let mut count = 0;
        let mut sq = a.offset(dr, dc);
        while sq != b {
            if self.is_occupied(sq) {
                count += 1;
            }
            sq = sq.offset(dr, dc);
        }
        Some(count)
    }

    /// 执行走棋（不做合法性检查），返回被吃的棋子
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let piece = self.set(mv.from, None);
        self.set(mv.to, piece)
    }

    /// 撤销走棋
    pub fn undo_move(&mut self, mv: Move, captured: Option<Piece>) {
        let piece = self.set(mv.to, captured);
        self.set(mv.from, piece);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{} ", 9 - row)?;
            for col in 0..COLS {
                let c = self
                    .get(Square::new(row, col))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{}", c)?;
                if col + 1 < COLS {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h i")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}
