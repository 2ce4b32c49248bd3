//! Uniformly random player speaking the arena line protocol.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::process;
use volte_othello::{Board, Turn};

fn respond(output: &mut impl Write, reply: &str) {
    if writeln!(output, "{}", reply)
        .and_then(|_| output.flush())
        .is_err()
    {
        process::exit(1);
    }
}

fn main() {
    let mut rng = StdRng::from_entropy();
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

        if let Err(err) = board.set_board_str(request, Turn::Black) {
            eprintln!("{}", err);
            process::exit(1);
        }
        match board.legal_moves_vec().choose(&mut rng) {
            Some(square) => respond(&mut output, &square.to_string()),
            None => respond(&mut output, "pass"),
        }
    }
}
