//! FEN 解析和生成
//!
//! 标准象棋 FEN：`<棋盘> <行棋方> [- - 0 1]`
//!
//! 棋盘符号：
//! - 红方：K(帅) A(仕) B/E(相) N/H(马) R(车) C(炮) P(兵)
//! - 黑方：k a b/e n/h r c p
//! - 空格：数字 (1-9)
//!
//! 第一段对应 row 0（黑方底线），最后一段对应 row 9（红方底线）。
//! 行棋方 `w`/`r` 为红方，`b` 为黑方；省略时默认红方先走。

use crate::board::Board;
use crate::error::FenError;
use crate::types::{Piece, PieceKind, Side, Square, COLS, ROWS};

/// 解析 FEN 字符串，返回棋盘和行棋方
pub fn parse_fen(fen: &str) -> Result<(Board, Side), FenError> {
    let mut parts = fen.split_whitespace();
    let board_str = parts.next().ok_or(FenError::Empty)?;
    let board = parse_board(board_str)?;

    let side = match parts.next() {
        None => Side::Red,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                (Some(side), None) => side,
                _ => {
                    return Err(FenError::InvalidSideToMove {
                        found: s.to_string(),
                    })
                }
            }
        }
    };

    Ok((board, side))
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<Board, FenError> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != ROWS as usize {
        return Err(FenError::WrongRowCount { found: rows.len() });
    }

    let mut board = Board::empty();

    for (row_idx, row_str) in rows.iter().enumerate() {
        let row = row_idx as i8;
        let mut col: usize = 0;

        for ch in row_str.chars() {
            if let Some(n) = ch.to_digit(10) {
                col += n as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidPiece { char: ch })?;
            if col >= COLS as usize {
                return Err(FenError::WrongColumnCount {
                    row: row_idx,
                    found: col + 1,
                });
            }
            if piece.kind == PieceKind::General && board.find_general(piece.side).is_some() {
                return Err(FenError::DuplicateGeneral { side: piece.side });
            }
            board.set(Square::new(row, col as i8), Some(piece));
            col += 1;
        }

        if col != COLS as usize {
            return Err(FenError::WrongColumnCount {
                row: row_idx,
                found: col,
            });
        }
    }

    Ok(board)
}

/// 棋盘部分的 FEN 字符串
pub fn board_to_fen(board: &Board) -> String {
    let mut rows = Vec::with_capacity(ROWS as usize);

    for row in 0..ROWS {
        let mut row_str = String::new();
        let mut empty = 0;

        for col in 0..COLS {
            match board.get(Square::new(row, col)) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        row_str.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row_str.push(piece.to_fen_char());
                }
            }
        }
        if empty > 0 {
            row_str.push_str(&empty.to_string());
        }
        rows.push(row_str);
    }

    rows.join("/")
}

/// 生成完整 FEN 字符串
pub fn to_fen(board: &Board, side: Side) -> String {
    format!("{} {} - - 0 1", board_to_fen(board), side.to_fen_char())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    #[test]
    fn test_parse_start_fen() {
        let (board, side) = parse_fen(START_FEN).unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(side, Side::Red);
    }

    #[test]
    fn test_fen_roundtrip() {
        let fen = "2bak4/4a4/4b1n2/p3p1p1p/2p6/6P2/P3P3P/4B1N2/4A4/2BAK4 b - - 0 1";
        let (board, side) = parse_fen(fen).unwrap();
        assert_eq!(side, Side::Black);
        assert_eq!(to_fen(&board, side), fen);
    }

    #[test]
    fn test_alternative_letters() {
        let (a, _) = parse_fen("rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r").unwrap();
        assert_eq!(a, Board::initial());
    }

    #[test]
    fn test_default_side_is_red() {
        let (_, side) = parse_fen("4k4/9/9/9/9/9/9/9/9/4K4").unwrap();
        assert_eq!(side, Side::Red);
    }

    #[test]
    fn test_invalid_fen() {
        assert_eq!(parse_fen(""), Err(FenError::Empty));
        assert_eq!(
            parse_fen("9/9/9 w"),
            Err(FenError::WrongRowCount { found: 3 })
        );
        assert_eq!(
            parse_fen("4k5/9/9/9/9/9/9/9/9/4K4 w"),
            Err(FenError::WrongColumnCount { row: 0, found: 10 })
        );
        assert_eq!(
            parse_fen("4x4/9/9/9/9/9/9/9/9/4K4 w"),
            Err(FenError::InvalidPiece { char: 'x' })
        );
        assert_eq!(
            parse_fen("4k4/9/9/9/9/9/9/9/9/4K4 x"),
            Err(FenError::InvalidSideToMove {
                found: "x".to_string()
            })
        );
        assert_eq!(
            parse_fen("3kk4/9/9/9/9/9/9/9/9/4K4 w"),
            Err(FenError::DuplicateGeneral { side: Side::Black })
        );
    }
}
