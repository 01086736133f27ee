//! 象棋测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、基准测试和调试

// =============================================================================
// 开局
// =============================================================================

/// 初始局面
pub const START: &str = crate::board::START_FEN;

/// 红方第一步: 中炮 (炮二平五, h2e2)
pub const CENTRAL_CANNON: &str =
    "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR b - - 0 1";

// =============================================================================
// 中局
// =============================================================================

/// 双方车马兵俱全的中局
pub const MIDDLEGAME: &str =
    "r1bak4/4a4/2n1b1n2/p3p1p1p/2p6/6P2/P3P3P/2N1B1N2/4A4/R1BAK4 w - - 0 1";

// =============================================================================
// 残局
// =============================================================================

/// 单车对士将
pub const SPARSE_ENDGAME: &str = "4k4/4a4/9/9/9/9/9/9/4R4/3K5 w - - 0 1";

/// 车兵对马卒，黑方走
pub const CHARIOT_VS_HORSE: &str = "3k5/9/4n4/9/2p6/6P2/9/9/4R4/5K3 b - - 0 1";

// =============================================================================
// 杀棋与困毙
// =============================================================================

/// 红方一步杀：车九进五 (a4a9) 双车错杀
pub const MATE_IN_ONE: &str = "3k5/7R1/9/9/9/R8/9/9/9/5K3 w - - 0 1";

/// 黑方已被将死
pub const BLACK_CHECKMATED: &str = "R2k5/7R1/9/9/9/9/9/9/9/4K4 b - - 0 1";

/// 黑方困毙（未被将军但无子可动）
pub const BLACK_STALEMATED: &str = "3k5/R8/4R4/9/9/9/9/9/9/5K3 b - - 0 1";

/// 所有局面（名称, FEN）
pub const ALL: [(&str, &str); 8] = [
    ("START", START),
    ("CENTRAL_CANNON", CENTRAL_CANNON),
    ("MIDDLEGAME", MIDDLEGAME),
    ("SPARSE_ENDGAME", SPARSE_ENDGAME),
    ("CHARIOT_VS_HORSE", CHARIOT_VS_HORSE),
    ("MATE_IN_ONE", MATE_IN_ONE),
    ("BLACK_CHECKMATED", BLACK_CHECKMATED),
    ("BLACK_STALEMATED", BLACK_STALEMATED),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{is_checkmate, is_stalemate};
    use crate::fen::{parse_fen, to_fen};
    use crate::types::Side;

    #[test]
    fn test_all_positions_parse_and_roundtrip() {
        for (name, fen) in ALL {
            let (board, side) = parse_fen(fen).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(board.is_valid_position(), "{}", name);
            assert_eq!(to_fen(&board, side), fen, "{}", name);
        }
    }

    #[test]
    fn test_terminal_positions() {
        let (mated, _) = parse_fen(BLACK_CHECKMATED).unwrap();
        assert!(is_checkmate(&mated, Side::Black));

        let (stalemated, _) = parse_fen(BLACK_STALEMATED).unwrap();
        assert!(is_stalemate(&stalemated, Side::Black));

        let (mate_in_one, side) = parse_fen(MATE_IN_ONE).unwrap();
        assert_eq!(side, Side::Red);
        assert!(!is_checkmate(&mate_in_one, Side::Black));
    }
}
