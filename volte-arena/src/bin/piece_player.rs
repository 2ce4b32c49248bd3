//! Alpha-beta piece-count player speaking the arena line protocol.
//!
//! Usage: `piece_player [BLACK|WHITE] [depth]`. The color tag is accepted
//! for protocol compatibility; board strings arrive relative to the mover,
//! so it only labels the colors.

use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use volte_othello::search::{AlphaBetaSearch, PieceEvaluator};
use volte_othello::{Board, Turn};

const DEFAULT_DEPTH: usize = 3;

fn respond(output: &mut impl Write, reply: &str) {
    // The arena reads line by line; without the flush it waits forever.
    if writeln!(output, "{}", reply)
        .and_then(|_| output.flush())
        .is_err()
    {
        process::exit(1);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let turn = args
        .get(1)
        .and_then(|raw| raw.parse::<Turn>().ok())
        .unwrap_or_default();
    let depth = args
        .get(2)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(DEFAULT_DEPTH);

    let search = AlphaBetaSearch::new(Box::new(PieceEvaluator));
    let mut board = Board::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    for line in stdin.lock().lines() {
        let request = match line {
            Ok(request) => request,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        };
        let request = request.trim();

        if request == "ping" {
            respond(&mut output, "pong");
            continue;
        }

        if let Err(err) = board.set_board_str(request, turn) {
            eprintln!("{}", err);
            process::exit(1);
        }
        match search.get_move(&board, depth) {
            Ok(chosen) => respond(&mut output, &chosen.to_string()),
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}
