//! 走法生成
//!
//! 每种棋子一个走法规则函数，通过 `MOVE_RULES` 表按 `PieceKind` 分派。
//! 伪合法走法只考虑走法几何和阻挡；合法走法再过滤掉走后己方被将军的走法。

use crate::board::Board;
use crate::check::is_in_check;
use crate::error::MoveError;
use crate::types::{Move, Piece, Side, Square};

/// 走法规则：把 `from` 处棋子的伪合法目标位置追加到 `out`
type MoveRule = fn(&Board, Square, Side, &mut Vec<Square>);

/// 按 `PieceKind::index()` 排列的分派表
const MOVE_RULES: [MoveRule; 7] = [
    general_moves,
    advisor_moves,
    elephant_moves,
    horse_moves,
    chariot_moves,
    cannon_moves,
    soldier_moves,
];

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 马的走法：(目标偏移, 马腿偏移)
pub(crate) const HORSE_STEPS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((-1, -2), (0, -1)),
];

/// 兵的前进方向（行增量）
#[inline]
pub(crate) fn forward_dir(side: Side) -> i8 {
    match side {
        Side::Red => -1,
        Side::Black => 1,
    }
}

/// 目标格在棋盘内，且为空或对方棋子
#[inline]
fn can_land(board: &Board, side: Side, sq: Square) -> bool {
    if !sq.is_valid() {
        return false;
    }
    match board.get(sq) {
        None => true,
        Some(target) => target.side != side,
    }
}

fn general_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (dr, dc) in ORTHOGONAL {
        let to = from.offset(dr, dc);
        if to.is_in_palace(side) && can_land(board, side, to) {
            out.push(to);
        }
    }

    // 飞将：同列且中间无子时可直接吃对方的将
    if let Some(enemy) = board.find_general(side.opposite()) {
        if enemy.col == from.col && board.count_between(from, enemy) == Some(0) {
            out.push(enemy);
        }
    }
}

fn advisor_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (dr, dc) in DIAGONAL {
        let to = from.offset(dr, dc);
        if to.is_in_palace(side) && can_land(board, side, to) {
            out.push(to);
        }
    }
}

fn elephant_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (dr, dc) in DIAGONAL {
        let to = from.offset(dr * 2, dc * 2);
        // 象不能过河
        if !to.is_valid() || !to.is_on_own_side(side) {
            continue;
        }
        // 塞象眼
        if board.is_occupied(from.offset(dr, dc)) {
            continue;
        }
        if can_land(board, side, to) {
            out.push(to);
        }
    }
}

fn horse_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for ((dr, dc), (lr, lc)) in HORSE_STEPS {
        let to = from.offset(dr, dc);
        if !to.is_valid() {
            continue;
        }
        // 蹩马腿
        if board.is_occupied(from.offset(lr, lc)) {
            continue;
        }
        if can_land(board, side, to) {
            out.push(to);
        }
    }
}

fn chariot_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (dr, dc) in ORTHOGONAL {
        let mut to = from.offset(dr, dc);
        while to.is_valid() {
            match board.get(to) {
                None => out.push(to),
                Some(target) => {
                    if target.side != side {
                        out.push(to);
                    }
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
}

fn cannon_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for (dr, dc) in ORTHOGONAL {
        let mut to = from.offset(dr, dc);
        let mut screened = false;
        while to.is_valid() {
            match board.get(to) {
                None => {
                    if !screened {
                        out.push(to);
                    }
                }
                Some(target) => {
                    if !screened {
                        screened = true;
                    } else {
                        // 炮架之后遇到的第一个棋子
                        if target.side != side {
                            out.push(to);
                        }
                        break;
                    }
                }
            }
            to = to.offset(dr, dc);
        }
    }
}

fn soldier_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    let forward = from.offset(forward_dir(side), 0);
    if can_land(board, side, forward) {
        out.push(forward);
    }

    // 过河后可以左右走
    if from.is_across_river(side) {
        for dc in [-1, 1] {
            let to = from.offset(0, dc);
            if can_land(board, side, to) {
                out.push(to);
            }
        }
    }
}

/// 某个棋子的伪合法目标位置（不检查是否送将）
pub fn pseudo_legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(17);
    if let Some(piece) = board.get(from) {
        push_destinations(board, from, piece, &mut out);
    }
    out
}

#[inline]
fn push_destinations(board: &Board, from: Square, piece: Piece, out: &mut Vec<Square>) {
    MOVE_RULES[piece.kind.index()](board, from, piece.side, out);
}

/// 某方所有伪合法走法
pub fn pseudo_legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let mut targets = Vec::with_capacity(17);
    for (from, piece) in board.pieces_of(side) {
        targets.clear();
        push_destinations(board, from, piece, &mut targets);
        moves.extend(targets.iter().map(|&to| Move::new(from, to)));
    }
    moves
}

/// 走完之后己方是否被将军（走法先执行再撤销，棋盘保持不变）
#[inline]
pub(crate) fn leaves_in_check(board: &mut Board, mv: Move, side: Side) -> bool {
    let captured = board.make_move(mv);
    let in_check = is_in_check(board, side);
    board.undo_move(mv, captured);
    in_check
}

/// 某方所有合法走法（原地走子再撤销，返回时棋盘与调用前相同）
///
/// 己方没有将时视为已输，返回空列表。
pub fn legal_moves_in_place(board: &mut Board, side: Side) -> Vec<Move> {
    if board.find_general(side).is_none() {
        return Vec::new();
    }
    let mut moves = pseudo_legal_moves(board, side);
    moves.retain(|&mv| !leaves_in_check(board, mv, side));
    moves
}

/// 某方所有合法走法
pub fn get_legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut scratch = board.clone();
    legal_moves_in_place(&mut scratch, side)
}

/// 某个棋子的合法目标位置（用于界面高亮）
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return Vec::new(),
    };
    if board.find_general(piece.side).is_none() {
        return Vec::new();
    }
    let mut scratch = board.clone();
    let mut targets = pseudo_legal_destinations(board, from);
    targets.retain(|&to| !leaves_in_check(&mut scratch, Move::new(from, to), piece.side));
    targets
}

/// 检查走法是否合法（走子方由起点棋子决定）
pub fn is_legal_move(board: &Board, mv: Move) -> bool {
    legal_destinations(board, mv.from).contains(&mv.to)
}

/// 执行一步合法走法，返回被吃的棋子
///
/// 非法走法被拒绝，棋盘不会被修改。
pub fn apply_move(board: &mut Board, from: Square, to: Square) -> Result<Option<Piece>, MoveError> {
    if board.get(from).is_none() {
        return Err(MoveError::EmptySquare { square: from });
    }
    let mv = Move::new(from, to);
    if !is_legal_move(board, mv) {
        return Err(MoveError::IllegalMove { from, to });
    }
    Ok(board.make_move(mv))
}

/// 走法是否吃子
#[inline]
pub fn is_capture(board: &Board, mv: Move) -> bool {
    board.get(mv.to).is_some()
}

/// 走法是否将军对方
pub fn gives_check(board: &mut Board, mv: Move) -> bool {
    let side = match board.get(mv.from) {
        Some(p) => p.side,
        None => return false,
    };
    let captured = board.make_move(mv);
    let check = is_in_check(board, side.opposite());
    board.undo_move(mv, captured);
    check
}
