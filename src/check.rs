//! 将军检测
//!
//! 判断将是否被攻击时不生成完整走法列表，而是从目标格反向扫描，
//! 结果与“任一对方棋子的伪合法走法包含该格”一致。

use crate::board::Board;
use crate::movegen::{forward_dir, leaves_in_check, pseudo_legal_moves, HORSE_STEPS};
use crate::types::{GameResult, Piece, PieceKind, Side, Square};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
fn is_piece(board: &Board, sq: Square, kind: PieceKind, side: Side) -> bool {
    board.get(sq) == Some(Piece::new(kind, side))
}

/// 检测某位置是否被某方攻击
///
/// `target` 上如果是攻击方自己的棋子，结果没有意义。
pub fn is_square_attacked(board: &Board, target: Square, attacker: Side) -> bool {
    // 车/炮/飞将（直线）
    for (dr, dc) in ORTHOGONAL {
        let mut sq = target.offset(dr, dc);
        let mut screened = false;
        while sq.is_valid() {
            if let Some(piece) = board.get(sq) {
                if piece.side == attacker {
                    if !screened && piece.kind == PieceKind::Chariot {
                        return true;
                    }
                    if screened && piece.kind == PieceKind::Cannon {
                        return true;
                    }
                    // 飞将只能沿直线吃对方的将
                    if !screened
                        && piece.kind == PieceKind::General
                        && dc == 0
                        && is_piece(board, target, PieceKind::General, attacker.opposite())
                    {
                        return true;
                    }
                }
                if screened {
                    break;
                }
                screened = true;
            }
            sq = sq.offset(dr, dc);
        }
    }

    // 将的一步攻击（只在攻击方九宫内）
    if target.is_in_palace(attacker) {
        for (dr, dc) in ORTHOGONAL {
            if is_piece(board, target.offset(dr, dc), PieceKind::General, attacker) {
                return true;
            }
        }
        for (dr, dc) in DIAGONAL {
            if is_piece(board, target.offset(dr, dc), PieceKind::Advisor, attacker) {
                return true;
            }
        }
    }

    // 象（只在攻击方半场）
    if target.is_on_own_side(attacker) {
        for (dr, dc) in DIAGONAL {
            let elephant = target.offset(dr * 2, dc * 2);
            if is_piece(board, elephant, PieceKind::Elephant, attacker)
                && !board.is_occupied(target.offset(dr, dc))
            {
                return true;
            }
        }
    }

    // 马：马腿紧挨着马本身
    for ((dr, dc), (lr, lc)) in HORSE_STEPS {
        let horse = target.offset(-dr, -dc);
        if is_piece(board, horse, PieceKind::Horse, attacker)
            && !board.is_occupied(horse.offset(lr, lc))
        {
            return true;
        }
    }

    // 兵：从后方一步，或过河后从左右
    let forward = forward_dir(attacker);
    if is_piece(board, target.offset(-forward, 0), PieceKind::Soldier, attacker) {
        return true;
    }
    for dc in [-1, 1] {
        let soldier = target.offset(0, dc);
        if soldier.is_across_river(attacker) && is_piece(board, soldier, PieceKind::Soldier, attacker)
        {
            return true;
        }
    }

    false
}

/// 检查某方是否被将军
///
/// 没有将的一方视为已被将死。
pub fn is_in_check(board: &Board, side: Side) -> bool {
    match board.find_general(side) {
        Some(general) => is_square_attacked(board, general, side.opposite()),
        None => true,
    }
}

/// 某方是否至少有一个合法走法（找到即返回）
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    if board.find_general(side).is_none() {
        return false;
    }
    let mut scratch = board.clone();
    pseudo_legal_moves(board, side)
        .into_iter()
        .any(|mv| !leaves_in_check(&mut scratch, mv, side))
}

/// 被将军且无合法走法
pub fn is_checkmate(board: &Board, side: Side) -> bool {
    is_in_check(board, side) && !has_legal_move(board, side)
}

/// 未被将军但无合法走法（困毙）
///
/// 象棋规则中困毙同样判负，不是和棋。
pub fn is_stalemate(board: &Board, side: Side) -> bool {
    !is_in_check(board, side) && !has_legal_move(board, side)
}

/// 判断轮到 `to_move` 走棋时的对局结果
pub fn game_result(board: &Board, to_move: Side) -> GameResult {
    if board.find_general(Side::Red).is_none() {
        return GameResult::BlackWin;
    }
    if board.find_general(Side::Black).is_none() {
        return GameResult::RedWin;
    }
    if has_legal_move(board, to_move) {
        GameResult::Ongoing
    } else {
        GameResult::loss_for(to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::movegen::{get_legal_moves, pseudo_legal_destinations};

    fn board_of(fen: &str) -> Board {
        parse_fen(fen).unwrap().0
    }

    /// 逐个生成对方走法的慢速版本
    fn attacked_by_movegen(board: &Board, target: Square, attacker: Side) -> bool {
        board
            .pieces_of(attacker)
            .any(|(from, _)| pseudo_legal_destinations(board, from).contains(&target))
    }

    #[test]
    fn test_check_detection() {
        // 红车将军黑将
        let board = board_of("4k4/4R4/9/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(is_in_check(&board, Side::Black));
        assert!(!is_in_check(&board, Side::Red));
    }

    #[test]
    fn test_cannon_check_needs_screen() {
        let no_screen = board_of("4k4/9/9/9/9/9/9/4C4/9/3K5 b - - 0 1");
        assert!(!is_in_check(&no_screen, Side::Black));

        let screen = board_of("4k4/9/9/4p4/9/9/9/4C4/9/3K5 b - - 0 1");
        assert!(is_in_check(&screen, Side::Black));

        let two_screens = board_of("4k4/9/4a4/4p4/9/9/9/4C4/9/3K5 b - - 0 1");
        assert!(!is_in_check(&two_screens, Side::Black));
    }

    #[test]
    fn test_horse_check_leg() {
        // 红马在 d7 (row 2, col 3)，黑将 e9 (row 0, col 4)，马腿 d8 (row 1, col 3)
        let open = board_of("4k4/9/3N5/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(is_in_check(&open, Side::Black));

        let blocked = board_of("4k4/3p5/3N5/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(!is_in_check(&blocked, Side::Black));

        // 将旁边的斜线格不是马腿
        let near_target = board_of("4k4/4p4/3N5/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(is_in_check(&near_target, Side::Black));
    }

    #[test]
    fn test_soldier_check() {
        let front = board_of("4k4/4P4/9/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(is_in_check(&front, Side::Black));

        let side = board_of("3Pk4/9/9/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(is_in_check(&side, Side::Black));

        // 兵不能后退吃
        let behind = board_of("4P4/4k4/9/9/9/9/9/9/9/3K5 b - - 0 1");
        assert!(!is_in_check(&behind, Side::Black));
    }

    #[test]
    fn test_flying_general_is_check() {
        let board = board_of("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1");
        assert!(is_in_check(&board, Side::Red));
        assert!(is_in_check(&board, Side::Black));
    }

    #[test]
    fn test_missing_general_counts_as_check() {
        let board = board_of("4k4/9/9/9/9/9/9/9/9/9 w - - 0 1");
        assert!(is_in_check(&board, Side::Red));
        assert!(is_checkmate(&board, Side::Red));
        assert_eq!(game_result(&board, Side::Black), GameResult::BlackWin);
    }

    #[test]
    fn test_double_chariot_checkmate() {
        // 双车错杀：车在 9 路将军，另一车封住 8 路
        let board = board_of("3k5/8R/7R1/9/9/9/9/9/9/4K4 w - - 0 1");
        assert!(!is_checkmate(&board, Side::Black));

        let mate = board_of("R2k5/7R1/9/9/9/9/9/9/9/4K4 b - - 0 1");
        assert!(is_in_check(&mate, Side::Black));
        assert!(get_legal_moves(&mate, Side::Black).is_empty());
        assert!(is_checkmate(&mate, Side::Black));
        assert_eq!(game_result(&mate, Side::Black), GameResult::RedWin);
    }

    #[test]
    fn test_stalemate_is_loss() {
        // 黑将被困在 d9 无路可走，但并未被将军
        let board = board_of("3k5/R8/4R4/9/9/9/9/9/9/5K3 b - - 0 1");
        assert!(!is_in_check(&board, Side::Black));
        assert!(is_stalemate(&board, Side::Black));
        assert!(!is_checkmate(&board, Side::Black));
        assert_eq!(game_result(&board, Side::Black), GameResult::RedWin);
    }

    #[test]
    fn test_initial_position_ongoing() {
        let board = Board::initial();
        assert!(!is_in_check(&board, Side::Red));
        assert!(!is_checkmate(&board, Side::Red));
        assert_eq!(game_result(&board, Side::Red), GameResult::Ongoing);
    }

    #[test]
    fn test_attack_scan_matches_movegen_initial() {
        let board = Board::initial();
        for target in Square::all() {
            for attacker in [Side::Red, Side::Black] {
                if board.get(target).is_some_and(|p| p.side == attacker) {
                    continue;
                }
                assert_eq!(
                    is_square_attacked(&board, target, attacker),
                    attacked_by_movegen(&board, target, attacker),
                    "mismatch at {} for {}",
                    target,
                    attacker
                );
            }
        }
    }
}
