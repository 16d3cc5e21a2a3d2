//! Line protocol on stdin/stdout:
//!
//! ```text
//! isready                      -> readyok
//! position <54-char string>    -> Position set.
//! go [gtime <ms>] [btime <ms>] -> bestmove <text> | bestmove none
//! quit                         -> exit 0
//! ```
//!
//! Everything is synchronous: `go` searches inline under its own deadline,
//! so there is nothing to interrupt and no reader thread to juggle. Errors
//! keep the previous board installed.

use std::io::BufRead;

use olympus_core::{
    board::Board,
    player::Player,
    search,
    transposition_table::TranspositionTable,
};

const DEFAULT_TIME_MS: u64 = 1000;

struct Engine {
    board: Option<Board>,
    tt: TranspositionTable,
}

impl Engine {
    fn new() -> Self {
        Engine {
            board: None,
            tt: TranspositionTable::new(),
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<Option<String>, String> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(None);
        };

        match command {
            "isready" => Ok(Some("readyok".to_owned())),
            "position" => {
                let position = parts
                    .next()
                    .ok_or("position must be followed by a position string")?;
                let board = Board::try_from(position)?;
                self.board = Some(board);
                Ok(Some("Position set.".to_owned()))
            }
            "go" => {
                let (gray_time, blue_time) = parse_go_times(parts)?;
                let Some(board) = self.board.as_mut() else {
                    return Ok(Some("bestmove none".to_owned()));
                };

                let remaining = match board.current_player {
                    Player::Gray => gray_time,
                    Player::Blue => blue_time,
                };

                let reply = match search::best_move(board, remaining, &mut self.tt) {
                    Some(mv) => format!("bestmove {}", mv.to_text()),
                    None => "bestmove none".to_owned(),
                };
                Ok(Some(reply))
            }
            _ => Ok(Some(format!("Unknown command: {line}"))),
        }
    }
}

fn parse_go_times<'a, I: Iterator<Item = &'a str>>(mut parts: I) -> Result<(u64, u64), String> {
    let mut gray_time = DEFAULT_TIME_MS;
    let mut blue_time = DEFAULT_TIME_MS;

    while let Some(key) = parts.next() {
        let value = parts
            .next()
            .ok_or_else(|| format!("go: missing value after '{key}'"))?;
        let millis: u64 = value
            .parse()
            .map_err(|_| format!("go: bad time value '{value}'"))?;
        match key {
            "gtime" => gray_time = millis,
            "btime" => blue_time = millis,
            _ => return Err(format!("go: unknown option '{key}'")),
        }
    }

    Ok((gray_time, blue_time))
}

fn main() {
    let mut engine = Engine::new();

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" {
            break;
        }

        match engine.handle_command(trimmed) {
            Ok(Some(reply)) => println!("{reply}"),
            Ok(None) => {}
            Err(message) => println!("Error: {message}"),
        }
    }
}
