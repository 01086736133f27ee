//! 象棋核心类型定义
//!
//! 定义象棋中所有基础数据类型：阵营、棋子类型、棋子、坐标、走法

use std::fmt;

/// 棋盘行数
pub const ROWS: i8 = 10;
/// 棋盘列数
pub const COLS: i8 = 9;
/// 格子总数
pub const SQUARE_COUNT: usize = 90;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opposite(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 从 FEN 字符解析（`w`/`r` 红方，`b` 黑方）
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' | 'r' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'w',
            Side::Black => 'b',
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马
    Horse,
    /// 车
    Chariot,
    /// 炮
    Cannon,
    /// 卒/兵
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 从 FEN 字符解析（大小写均可，马接受 h/n，象接受 e/b）
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'b' | 'e' => Some(PieceKind::Elephant),
            'n' | 'h' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Chariot),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    /// 作为表索引使用的序号
    #[inline]
    pub(crate) fn index(&self) -> usize {
        match self {
            PieceKind::General => 0,
            PieceKind::Advisor => 1,
            PieceKind::Elephant => 2,
            PieceKind::Horse => 3,
            PieceKind::Chariot => 4,
            PieceKind::Cannon => 5,
            PieceKind::Soldier => 6,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        };
        write!(f, "{}", name)
    }
}

/// 棋子：只有身份，没有位置（位置由棋盘下标决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// FEN 字符：红方大写，黑方小写
    pub fn to_fen_char(&self) -> char {
        let c = self.kind.to_fen_char();
        match self.side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        Some(Piece { kind, side })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0-9 (0 是黑方底线，9 是红方底线；0-4 为黑方半场)
/// col: 0-8 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..ROWS).contains(&self.row) && (0..COLS).contains(&self.col)
    }

    /// 检查位置是否在某方九宫格内
    pub fn is_in_palace(&self, side: Side) -> bool {
        if !(3..=5).contains(&self.col) {
            return false;
        }
        match side {
            Side::Red => (7..=9).contains(&self.row),
            Side::Black => (0..=2).contains(&self.row),
        }
    }

    /// 检查位置是否在某方己方半场
    pub fn is_on_own_side(&self, side: Side) -> bool {
        match side {
            Side::Red => (5..=9).contains(&self.row),
            Side::Black => (0..=4).contains(&self.row),
        }
    }

    /// 对某方而言是否已过河
    #[inline]
    pub fn is_across_river(&self, side: Side) -> bool {
        self.is_valid() && !self.is_on_own_side(side)
    }

    /// 位置加偏移量（结果可能越界，需调用方检查）
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Square {
        Square {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 数组下标 (0..90)
    #[inline]
    pub fn to_index(&self) -> usize {
        (self.row as usize) * (COLS as usize) + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Square {
        Square {
            row: (idx / COLS as usize) as i8,
            col: (idx % COLS as usize) as i8,
        }
    }

    /// 按下标顺序遍历所有格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).map(Square::from_index)
    }

    /// 从 ICCS 坐标解析（如 "h2"：列字母 + 红方视角行号，0 为红方底线）
    pub fn from_iccs(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = match file {
            'a'..='i' => (file as u8 - b'a') as i8,
            _ => return None,
        };
        let rank = match rank {
            '0'..='9' => (rank as u8 - b'0') as i8,
            _ => return None,
        };
        Some(Square::new(9 - rank, col))
    }

    /// 转换为 ICCS 坐标；棋盘外的位置输出为 `(row,col)`
    pub fn to_iccs(&self) -> String {
        if !self.is_valid() {
            return format!("({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col as u8) as char;
        format!("{}{}", file, 9 - self.row)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs())
    }
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// 从 ICCS 走法字符串解析（如 "h2e2"）
    pub fn from_iccs(s: &str) -> Option<Move> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_iccs(&s[0..2])?;
        let to = Square::from_iccs(&s[2..4])?;
        Some(Move { from, to })
    }

    pub fn to_iccs(&self) -> String {
        format!("{}{}", self.from.to_iccs(), self.to.to_iccs())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs())
    }
}

/// 游戏结果
///
/// 象棋没有逼和：无子可动的一方判负。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    RedWin,
    BlackWin,
}

impl GameResult {
    /// 某方输棋时的结果
    pub fn loss_for(side: Side) -> GameResult {
        match side {
            Side::Red => GameResult::BlackWin,
            Side::Black => GameResult::RedWin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_from_iccs() {
        assert_eq!(Square::from_iccs("a0"), Some(Square::new(9, 0)));
        assert_eq!(Square::from_iccs("e4"), Some(Square::new(5, 4)));
        assert_eq!(Square::from_iccs("i9"), Some(Square::new(0, 8)));
        assert_eq!(Square::from_iccs("j0"), None);
        assert_eq!(Square::from_iccs("a10"), None);
    }

    #[test]
    fn test_square_to_iccs() {
        assert_eq!(Square::new(9, 0).to_iccs(), "a0");
        assert_eq!(Square::new(7, 7).to_iccs(), "h2");
        assert_eq!(Square::new(0, 8).to_iccs(), "i9");
        assert_eq!(Square::new(-1, -1).to_iccs(), "(-1,-1)");
        assert_eq!(Square::new(10, 9).to_iccs(), "(10,9)");
    }

    #[test]
    fn test_square_index_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.to_index()), sq);
        }
        assert_eq!(Square::all().count(), SQUARE_COUNT);
    }

    #[test]
    fn test_palace_and_river() {
        assert!(Square::new(9, 4).is_in_palace(Side::Red));
        assert!(!Square::new(6, 4).is_in_palace(Side::Red));
        assert!(Square::new(0, 3).is_in_palace(Side::Black));
        assert!(!Square::new(1, 6).is_in_palace(Side::Black));

        assert!(Square::new(4, 0).is_across_river(Side::Red));
        assert!(!Square::new(5, 0).is_across_river(Side::Red));
        assert!(Square::new(5, 0).is_across_river(Side::Black));
    }

    #[test]
    fn test_move_from_iccs() {
        let m = Move::from_iccs("h2e2").unwrap();
        assert_eq!(m.from, Square::new(7, 7));
        assert_eq!(m.to, Square::new(7, 4));
        assert_eq!(m.to_iccs(), "h2e2");
        assert!(Move::from_iccs("h2e").is_none());
        assert!(Move::from_iccs("z2e2").is_none());
    }

    #[test]
    fn test_piece_fen_char() {
        let p = Piece::from_fen_char('N').unwrap();
        assert_eq!(p, Piece::new(PieceKind::Horse, Side::Red));
        assert_eq!(p.to_fen_char(), 'N');
        let e = Piece::from_fen_char('e').unwrap();
        assert_eq!(e, Piece::new(PieceKind::Elephant, Side::Black));
        assert_eq!(e.to_fen_char(), 'b');
        assert!(Piece::from_fen_char('x').is_none());
    }
}
