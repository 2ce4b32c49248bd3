//! Players the arena can pit against each other.

use crate::error::PlayerError;
use crate::process::PlayerProcess;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;
use volte_othello::search::{AlphaBetaSearch, Evaluator};
use volte_othello::{Board, Move};

/// How long a player may take to answer a single request.
pub(crate) const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// A competitor in arena matches.
///
/// The game loop treats every player the same way: a liveness probe at game
/// start, then one move request per turn. A player is only asked to move
/// when it has at least one legal move.
pub trait Player {
    /// Confirm the player is ready for a new game, restarting whatever backs
    /// it if necessary.
    fn probe(&mut self) -> Result<(), PlayerError>;

    /// Pick a move for the position. The board arrives from the player's
    /// own perspective.
    fn propose_move(&mut self, board: &Board) -> Result<Move, PlayerError>;
}

/// A player backed by a subprocess speaking the line protocol.
///
/// The process is spawned lazily, reused from game to game, and discarded as
/// soon as it fails; the next probe starts a fresh one.
pub struct ProcessPlayer {
    command: Vec<String>,
    process: Option<PlayerProcess>,
}

impl ProcessPlayer {
    pub fn new(command: Vec<String>) -> Self {
        ProcessPlayer {
            command,
            process: None,
        }
    }

    fn ensure_spawned(&mut self) -> Result<&mut PlayerProcess, PlayerError> {
        if self.process.is_none() {
            self.process = Some(PlayerProcess::spawn(&self.command)?);
        }
        match self.process.as_mut() {
            Some(process) => Ok(process),
            None => Err(PlayerError::Spawn),
        }
    }

    fn request_move(&mut self, board: &Board) -> Result<Move, PlayerError> {
        let process = self.ensure_spawned()?;
        process.send_line(&board.to_board_str())?;
        let reply = process.read_line(REPLY_TIMEOUT)?;
        reply.trim().parse().map_err(|_| PlayerError::Parse)
    }
}

impl Player for ProcessPlayer {
    fn probe(&mut self) -> Result<(), PlayerError> {
        let result = self
            .ensure_spawned()
            .and_then(|process| process.ping(REPLY_TIMEOUT));
        if result.is_err() {
            self.process = None;
        }
        result
    }

    fn propose_move(&mut self, board: &Board) -> Result<Move, PlayerError> {
        let result = self.request_move(board);
        if result.is_err() {
            self.process = None;
        }
        result
    }
}

/// An in-process player that picks moves with alpha-beta search.
pub struct SearchPlayer {
    search: AlphaBetaSearch,
    depth: usize,
}

impl SearchPlayer {
    pub fn new(evaluator: Box<dyn Evaluator>, depth: usize) -> Self {
        SearchPlayer {
            search: AlphaBetaSearch::new(evaluator),
            depth,
        }
    }
}

impl Player for SearchPlayer {
    fn probe(&mut self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn propose_move(&mut self, board: &Board) -> Result<Move, PlayerError> {
        Ok(self.search.get_move(board, self.depth)?)
    }
}

/// An in-process player that picks uniformly among the legal moves.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn probe(&mut self) -> Result<(), PlayerError> {
        Ok(())
    }

    fn propose_move(&mut self, board: &Board) -> Result<Move, PlayerError> {
        match board.legal_moves_vec().choose(&mut self.rng) {
            Some(&square) => Ok(Move::Place(square)),
            None => Ok(Move::Pass),
        }
    }
}
