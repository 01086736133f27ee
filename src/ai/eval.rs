//! 局面评估
//!
//! 总是先按红方视角算出分数，再按需取反，所以
//! `evaluate(b, Red) == -evaluate(b, Black)` 恒成立。
//!
//! 评分组成：子力 + 位置分 x10 + 战术奖励 + 将军奖励 + 机动性。

use crate::board::Board;
use crate::check::is_in_check;
use crate::movegen::legal_moves_in_place;
use crate::types::{Piece, PieceKind, Side, Square, COLS, ROWS};

/// 将的子力价值，也是杀棋分数的基准
pub const GENERAL_VALUE: i32 = 10000;

/// 位置分放大倍数
const POSITION_SCALE: i32 = 10;

const CONTROL_CENTER: i32 = 30;
const CONNECTED_CHARIOTS: i32 = 30;
const PROTECTED_GENERAL: i32 = 50;
const ADVANCED_SOLDIER: i32 = 20;
const DOUBLED_CANNONS: i32 = 40;
const HORSE_PAIR: i32 = 25;
const ATTACKING_POSITION: i32 = 35;
const MOBILITY: i32 = 5;
const CHECK_BONUS: i32 = 100;

type Table = [[i32; COLS as usize]; ROWS as usize];

// 以下位置表均为红方视角（红方在下方，row 9 为红方底线）

#[rustfmt::skip]
const GENERAL_TABLE: Table = [
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  0,  0,  0, 0, 0, 0],
    [0, 0, 0,  2,  2,  2, 0, 0, 0],
    [0, 0, 0,  5,  8,  5, 0, 0, 0],
    [0, 0, 0, 10, 15, 10, 0, 0, 0],
];

#[rustfmt::skip]
const ADVISOR_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 5, 0, 5, 0, 0, 0],
    [0, 0, 0, 0, 8, 0, 0, 0, 0],
    [0, 0, 0, 5, 0, 5, 0, 0, 0],
];

#[rustfmt::skip]
const ELEPHANT_TABLE: Table = [
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 8, 0,  0, 0, 8, 0, 0],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [7, 0, 0, 0, 10, 0, 0, 0, 7],
    [0, 0, 0, 0,  0, 0, 0, 0, 0],
    [0, 0, 8, 0,  0, 0, 8, 0, 0],
];

#[rustfmt::skip]
const HORSE_TABLE: Table = [
    [0, 2, 4,  4,  0,  4, 4, 2, 0],
    [2, 4, 6,  6,  6,  6, 6, 4, 2],
    [4, 6, 8,  8,  8,  8, 8, 6, 4],
    [4, 6, 8, 10, 10, 10, 8, 6, 4],
    [4, 6, 8, 10, 10, 10, 8, 6, 4],
    [4, 6, 8, 10, 10, 10, 8, 6, 4],
    [4, 6, 8,  8,  8,  8, 8, 6, 4],
    [2, 4, 6,  6,  6,  6, 6, 4, 2],
    [0, 2, 4,  4,  4,  4, 4, 2, 0],
    [0, 0, 2,  2,  2,  2, 2, 0, 0],
];

#[rustfmt::skip]
const CHARIOT_TABLE: Table = [
    [10, 10, 10, 12, 14, 12, 10, 10, 10],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [12, 14, 14, 16, 18, 16, 14, 14, 12],
    [14, 16, 16, 18, 20, 18, 16, 16, 14],
    [12, 14, 14, 16, 18, 16, 14, 14, 12],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [ 8, 10, 10, 12, 14, 12, 10, 10,  8],
    [ 6,  8,  8, 10, 12, 10,  8,  8,  6],
];

#[rustfmt::skip]
const CANNON_TABLE: Table = [
    [ 8,  8,  8, 10, 12, 10,  8,  8,  8],
    [ 8, 10, 10, 12, 14, 12, 10, 10,  8],
    [ 8, 10, 10, 12, 14, 12, 10, 10,  8],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [12, 14, 14, 16, 18, 16, 14, 14, 12],
    [10, 12, 12, 14, 16, 14, 12, 12, 10],
    [ 8, 10, 10, 12, 14, 12, 10, 10,  8],
    [ 8, 10, 10, 12, 14, 12, 10, 10,  8],
    [ 6,  8,  8, 10, 12, 10,  8,  8,  6],
    [ 4,  6,  6,  8, 10,  8,  6,  6,  4],
];

#[rustfmt::skip]
const SOLDIER_TABLE: Table = [
    [14, 16, 18, 20, 22, 20, 18, 16, 14],
    [12, 14, 16, 18, 20, 18, 16, 14, 12],
    [10, 12, 14, 16, 18, 16, 14, 12, 10],
    [ 8, 10, 12, 14, 16, 14, 12, 10,  8],
    [ 6,  8, 10, 12, 14, 12, 10,  8,  6],
    [ 4,  6,  8, 10, 12, 10,  8,  6,  4],
    [ 2,  4,  6,  8, 10,  8,  6,  4,  2],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

/// 按 `PieceKind::index()` 排列
const TABLES: [&Table; 7] = [
    &GENERAL_TABLE,
    &ADVISOR_TABLE,
    &ELEPHANT_TABLE,
    &HORSE_TABLE,
    &CHARIOT_TABLE,
    &CANNON_TABLE,
    &SOLDIER_TABLE,
];

/// 棋子类型的基础价值
pub fn kind_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::General => GENERAL_VALUE,
        PieceKind::Advisor => 200,
        PieceKind::Elephant => 200,
        PieceKind::Horse => 400,
        PieceKind::Chariot => 900,
        PieceKind::Cannon => 450,
        PieceKind::Soldier => 100,
    }
}

/// 棋子在某位置的子力价值（过河兵翻倍）
#[inline]
pub fn piece_value(piece: Piece, sq: Square) -> i32 {
    if piece.kind == PieceKind::Soldier && sq.is_across_river(piece.side) {
        200
    } else {
        kind_value(piece.kind)
    }
}

/// 位置表原始分（未放大）；黑方读取 `9 - row` 行
#[inline]
pub fn position_value(piece: Piece, sq: Square) -> i32 {
    let row = match piece.side {
        Side::Red => sq.row,
        Side::Black => ROWS - 1 - sq.row,
    };
    TABLES[piece.kind.index()][row as usize][sq.col as usize]
}

/// 同一行或同一列
#[inline]
fn aligned(a: Square, b: Square) -> bool {
    a.row == b.row || a.col == b.col
}

/// 成对计数：`pred` 为真的无序对数量
fn count_pairs(squares: &[Square], pred: impl Fn(Square, Square) -> bool) -> i32 {
    let mut count = 0;
    for (i, &a) in squares.iter().enumerate() {
        for &b in &squares[i + 1..] {
            if pred(a, b) {
                count += 1;
            }
        }
    }
    count
}

/// 某方的子力、位置分和战术奖励（不含机动性与将军）
fn side_score(board: &Board, side: Side) -> i32 {
    let mut score = 0;
    let mut chariots = Vec::with_capacity(2);
    let mut cannons = Vec::with_capacity(2);
    let mut horses = 0;
    let mut guards = Vec::with_capacity(4);

    for (sq, piece) in board.pieces_of(side) {
        score += piece_value(piece, sq) + position_value(piece, sq) * POSITION_SCALE;

        if (3..=6).contains(&sq.row) && (3..=5).contains(&sq.col) {
            score += CONTROL_CENTER;
        }
        if sq.is_across_river(side) {
            score += ATTACKING_POSITION;
        }

        match piece.kind {
            PieceKind::Chariot => chariots.push(sq),
            PieceKind::Cannon => cannons.push(sq),
            PieceKind::Horse => horses += 1,
            PieceKind::Advisor | PieceKind::Elephant => guards.push(sq),
            PieceKind::Soldier if sq.is_across_river(side) => score += ADVANCED_SOLDIER,
            _ => {}
        }
    }

    score += CONNECTED_CHARIOTS
        * count_pairs(&chariots, |a, b| board.count_between(a, b) == Some(0));
    score += DOUBLED_CANNONS * count_pairs(&cannons, aligned);
    if horses >= 2 {
        score += HORSE_PAIR;
    }

    if let Some(general) = board.find_general(side) {
        let protected = guards
            .iter()
            .any(|g| (g.row - general.row).abs() <= 1 && (g.col - general.col).abs() <= 1);
        if protected {
            score += PROTECTED_GENERAL;
        }
    }

    score
}

/// 评估局面，正分对 `perspective` 有利
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    let mut red = side_score(board, Side::Red);
    let mut black = side_score(board, Side::Black);

    if is_in_check(board, Side::Black) {
        red += CHECK_BONUS;
    }
    if is_in_check(board, Side::Red) {
        black += CHECK_BONUS;
    }

    let mut scratch = board.clone();
    red += MOBILITY * legal_moves_in_place(&mut scratch, Side::Red).len() as i32;
    black += MOBILITY * legal_moves_in_place(&mut scratch, Side::Black).len() as i32;

    let raw = red - black;
    match perspective {
        Side::Red => raw,
        Side::Black => -raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    fn board_of(fen: &str) -> Board {
        parse_fen(fen).unwrap().0
    }

    /// 上下翻转并交换颜色
    fn mirror(board: &Board) -> Board {
        let mut out = Board::empty();
        for (sq, piece) in board.pieces() {
            out.set(
                Square::new(ROWS - 1 - sq.row, sq.col),
                Some(Piece::new(piece.kind, piece.side.opposite())),
            );
        }
        out
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::initial();
        assert_eq!(evaluate(&board, Side::Red), 0);
        assert_eq!(evaluate(&board, Side::Black), 0);
    }

    #[test]
    fn test_perspective_symmetry() {
        let board = board_of("2bak4/4a4/4b1n2/p3p1p1p/2p6/6P2/P3P3P/4B1N2/4A4/2BAK4 w");
        assert_eq!(evaluate(&board, Side::Red), -evaluate(&board, Side::Black));
    }

    #[test]
    fn test_mirrored_position_scores_the_same() {
        let board = board_of("3akab2/9/4b1n2/p3C1p1p/2p6/6P2/P3P3P/4B1N2/4A4/2BAK4 w");
        let mirrored = mirror(&board);
        assert_eq!(evaluate(&board, Side::Red), evaluate(&mirrored, Side::Black));
    }

    #[test]
    fn test_material_advantage() {
        // 红方多一个车
        let board = board_of("3k5/9/9/9/9/9/9/9/4R4/5K3 w");
        assert!(evaluate(&board, Side::Red) > 800);
        assert!(evaluate(&board, Side::Black) < -800);
    }

    #[test]
    fn test_soldier_value_doubles_across_river() {
        let red_soldier = Piece::new(PieceKind::Soldier, Side::Red);
        assert_eq!(piece_value(red_soldier, Square::new(6, 0)), 100);
        assert_eq!(piece_value(red_soldier, Square::new(4, 0)), 200);
        let black_soldier = Piece::new(PieceKind::Soldier, Side::Black);
        assert_eq!(piece_value(black_soldier, Square::new(5, 0)), 200);
    }

    #[test]
    fn test_position_table_mirrors_for_black() {
        let red = Piece::new(PieceKind::Soldier, Side::Red);
        let black = Piece::new(PieceKind::Soldier, Side::Black);
        assert_eq!(
            position_value(red, Square::new(1, 4)),
            position_value(black, Square::new(8, 4))
        );
        // 红兵越靠近黑方底线越好
        assert!(position_value(red, Square::new(1, 4)) > position_value(red, Square::new(5, 4)));
    }

    #[test]
    fn test_check_bonus() {
        let quiet = board_of("3k5/9/9/9/9/9/9/9/9/4K3R w");
        let check = board_of("3k4R/9/9/9/9/9/9/9/9/4K4 w");
        // 车同样在底线附近，将军一方额外加分
        assert!(is_in_check(&check, Side::Black));
        assert!(!is_in_check(&quiet, Side::Black));
        let diff_quiet = evaluate(&quiet, Side::Red);
        let diff_check = evaluate(&check, Side::Red);
        assert!(diff_check > diff_quiet);
    }
}
