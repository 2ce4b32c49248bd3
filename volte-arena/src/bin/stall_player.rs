//! Protocol fixture: answers the liveness probe, then never answers a board.

use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    for line in stdin.lock().lines() {
        let request = match line {
            Ok(request) => request,
            Err(_) => return,
        };
        if request.trim() == "ping" {
            if writeln!(output, "pong").and_then(|_| output.flush()).is_err() {
                return;
            }
        }
        // Board requests go unanswered.
    }
}
