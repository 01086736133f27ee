//! 错误类型

use thiserror::Error;

use crate::types::{Side, Square};

/// FEN 解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// 缺少棋盘部分
    #[error("FEN string is empty")]
    Empty,
    /// 行数不是 10
    #[error("FEN board must have 10 rows, found {found}")]
    WrongRowCount { found: usize },
    /// 某行列数不是 9
    #[error("FEN row {row} must have 9 columns, found {found}")]
    WrongColumnCount { row: usize, found: usize },
    /// 非法棋子字符
    #[error("Invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// 非法行棋方
    #[error("Invalid side to move '{found}', expected 'w', 'r' or 'b'")]
    InvalidSideToMove { found: String },
    /// 某方有多个将
    #[error("{side} has more than one General")]
    DuplicateGeneral { side: Side },
}

/// 走子请求错误（棋盘不会被修改）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// 走法字符串无法解析
    #[error("Invalid move notation '{notation}'")]
    InvalidNotation { notation: String },
    /// 起点没有棋子
    #[error("No piece on {square}")]
    EmptySquare { square: Square },
    /// 不是该方的回合
    #[error("It is {expected}'s turn, but the piece belongs to {found}")]
    WrongSide { expected: Side, found: Side },
    /// 走法不在合法走法列表中
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    /// 对局已结束
    #[error("The game is already over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MoveError::IllegalMove {
            from: Square::new(9, 0),
            to: Square::new(8, 0),
        };
        assert_eq!(err.to_string(), "Illegal move a0a1");
        assert_eq!(
            FenError::WrongRowCount { found: 3 }.to_string(),
            "FEN board must have 10 rows, found 3"
        );
    }

    #[test]
    fn test_off_board_square_in_message() {
        let err = MoveError::EmptySquare {
            square: Square::new(-1, -1),
        };
        assert_eq!(err.to_string(), "No piece on (-1,-1)");
    }
}
