//! Batch match play between Othello engines.
//!
//! Engines are subprocesses speaking a line protocol on stdin/stdout: each
//! request is a 64-character board string from the mover's perspective, each
//! reply a square index or `pass`, and `ping` must answer `pong`. The
//! [`Arena`] drives batches of games between two [`Player`]s, alternating
//! colors and tallying results; in-process players back the search and
//! random baselines without any subprocess.

mod arena;
mod error;
mod player;
mod process;

pub use crate::arena::Arena;
pub use crate::error::{ArenaError, PlayerError};
pub use crate::player::{Player, ProcessPlayer, RandomPlayer, SearchPlayer};
pub use crate::process::PlayerProcess;
