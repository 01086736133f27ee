//! Xiangqi AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 按行收发 JSON

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use xiangqi_engine::ai::evaluate;
use xiangqi_engine::{
    apply_move, get_legal_moves, parse_fen, to_fen, AIConfig, AIEngine, Difficulty, Move,
    MoveError, SearchResult, Side,
};

#[derive(Parser)]
#[command(name = "xiangqi-engine")]
#[command(about = "Xiangqi move generator and search engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 难度 (easy, medium, hard, expert)
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// 覆盖难度的搜索深度
        #[arg(long)]
        depth: Option<u32>,

        /// 覆盖难度的时间限制（秒）
        #[arg(long)]
        time_limit: Option<f64>,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数（行棋方视角）
    Score {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 执行一步走法并输出新的 FEN
    Apply {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// ICCS 走法（如 h2e2）
        #[arg(long = "move")]
        mv: String,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server {
        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,
    },
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default, rename = "move")]
    mv: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    time_limit: Option<f64>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_best(result: &SearchResult, elapsed_secs: f64) -> Self {
        Self {
            ok: true,
            mv: result.mv.map(|m| m.to_iccs()),
            score: Some(result.score),
            depth: Some(result.depth),
            nodes: Some(result.nodes),
            nps: Some(calc_nps(result.nodes, elapsed_secs)),
            elapsed_ms: Some(elapsed_secs * 1000.0),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(score: i32, side: Side) -> Self {
        Self {
            ok: true,
            score: Some(score),
            color: Some(side_to_str(side).to_string()),
            ..Default::default()
        }
    }

    fn success_fen(fen: String) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"{}\"}}", e))
    }
}

fn side_to_str(side: Side) -> &'static str {
    match side {
        Side::Red => "red",
        Side::Black => "black",
    }
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

fn exit_with(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

/// 合法走法的 ICCS 字符串
fn legal_moves_from_fen(fen: &str) -> Result<Vec<String>, String> {
    let (board, side) = parse_fen(fen).map_err(|e| e.to_string())?;
    Ok(get_legal_moves(&board, side)
        .iter()
        .map(Move::to_iccs)
        .collect())
}

/// 执行搜索；给了深度或时间时覆盖难度设置（此时不做随机替换）
fn run_search(
    engine: &mut AIEngine,
    fen: &str,
    difficulty: Difficulty,
    depth: Option<u32>,
    time_limit: Option<f64>,
) -> Result<SearchResult, String> {
    let (board, side) = parse_fen(fen).map_err(|e| e.to_string())?;
    if depth.is_none() && time_limit.is_none() {
        return Ok(engine.search_with_difficulty(&board, side, difficulty));
    }
    let depth = depth.unwrap_or_else(|| difficulty.max_depth());
    let time_limit = match time_limit {
        Some(secs) => Duration::try_from_secs_f64(secs)
            .map_err(|e| format!("Invalid time limit {}: {}", secs, e))?,
        None => difficulty.time_limit(),
    };
    Ok(engine.search(&board, side, depth, time_limit))
}

/// 在 FEN 局面上走一步，返回新 FEN
fn apply_to_fen(fen: &str, notation: &str) -> Result<String, String> {
    let (mut board, side) = parse_fen(fen).map_err(|e| e.to_string())?;
    let mv = Move::from_iccs(notation).ok_or_else(|| {
        MoveError::InvalidNotation {
            notation: notation.to_string(),
        }
        .to_string()
    })?;
    match board.get(mv.from) {
        Some(piece) if piece.side != side => {
            return Err(MoveError::WrongSide {
                expected: side,
                found: piece.side,
            }
            .to_string())
        }
        _ => {}
    }
    apply_move(&mut board, mv.from, mv.to).map_err(|e| e.to_string())?;
    Ok(to_fen(&board, side.opposite()))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen, json } => match legal_moves_from_fen(&fen) {
            Ok(moves) => {
                if json {
                    println!("{}", ServerResponse::success_legal_moves(moves).to_json());
                } else {
                    println!("Legal moves ({}):", moves.len());
                    for mv in &moves {
                        println!("  {}", mv);
                    }
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Best {
            fen,
            difficulty,
            depth,
            time_limit,
            seed,
            json,
        } => {
            let mut engine = AIEngine::new(&AIConfig {
                seed,
                ..Default::default()
            });
            let start = Instant::now();
            match run_search(&mut engine, &fen, difficulty, depth, time_limit) {
                Ok(result) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    if json {
                        println!("{}", ServerResponse::success_best(&result, elapsed).to_json());
                    } else {
                        match result.mv {
                            Some(mv) => println!("Best move ({}): {} (score: {})", difficulty, mv, result.score),
                            None => println!("No legal moves"),
                        }
                        println!(
                            "\nStats: depth={}, nodes={}, time={:.3}s, nps={:.0}",
                            result.depth,
                            result.nodes,
                            elapsed,
                            calc_nps(result.nodes, elapsed)
                        );
                    }
                }
                Err(e) => exit_with(e),
            }
        }

        Commands::Score { fen, json } => match parse_fen(&fen) {
            Ok((board, side)) => {
                let score = evaluate(&board, side);
                if json {
                    println!("{}", ServerResponse::success_eval(score, side).to_json());
                } else {
                    let side_cn = match side {
                        Side::Red => "红方",
                        Side::Black => "黑方",
                    };
                    println!("局面评估 ({} 视角): {}", side_cn, score);
                }
            }
            Err(e) => exit_with(e),
        },

        Commands::Apply { fen, mv } => match apply_to_fen(&fen, &mv) {
            Ok(new_fen) => println!("{}", new_fen),
            Err(e) => exit_with(e),
        },

        Commands::Server { seed } => {
            run_server(seed);
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout；引擎缓存在请求之间保留
fn run_server(seed: Option<u64>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut engine = AIEngine::new(&AIConfig {
        seed,
        ..Default::default()
    });

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => match request.cmd.as_str() {
                "best" => handle_best_request(&mut engine, &request),
                "moves" => match legal_moves_from_fen(&request.fen) {
                    Ok(moves) => ServerResponse::success_legal_moves(moves),
                    Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
                },
                "eval" => match parse_fen(&request.fen) {
                    Ok((board, side)) => ServerResponse::success_eval(evaluate(&board, side), side),
                    Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
                },
                "apply" => match apply_to_fen(&request.fen, request.mv.as_deref().unwrap_or("")) {
                    Ok(fen) => ServerResponse::success_fen(fen),
                    Err(e) => ServerResponse::error(&e),
                },
                "reset" => {
                    engine.reset();
                    ServerResponse {
                        ok: true,
                        ..Default::default()
                    }
                }
                "quit" => break,
                _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
            },
            Err(e) => ServerResponse::error(&format!("Invalid JSON: {}", e)),
        };

        println!("{}", response.to_json());
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(engine: &mut AIEngine, request: &ServerRequest) -> ServerResponse {
    let difficulty = match request.difficulty.as_deref().map(str::parse::<Difficulty>) {
        None => Difficulty::default(),
        Some(Ok(d)) => d,
        Some(Err(e)) => return ServerResponse::error(&e),
    };

    let start = Instant::now();
    match run_search(engine, &request.fen, difficulty, request.depth, request.time_limit) {
        Ok(result) => ServerResponse::success_best(&result, start.elapsed().as_secs_f64()),
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}
