//! Xiangqi AI Engine
//!
//! 中国象棋走法生成与 Alpha-Beta 搜索引擎 - 支持 FEN 输入输出

pub mod ai;
pub mod board;
pub mod check;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod test_positions;
pub mod types;

pub use ai::{get_best_move, AIConfig, AIEngine, Difficulty, SearchResult};
pub use board::{Board, START_FEN};
pub use check::{game_result, is_checkmate, is_in_check, is_square_attacked, is_stalemate};
pub use error::{FenError, MoveError};
pub use fen::{parse_fen, to_fen};
pub use game::{Game, MoveRecord};
pub use movegen::{apply_move, get_legal_moves, is_legal_move, legal_destinations};
pub use types::{GameResult, Move, Piece, PieceKind, Side, Square};
