//! Error types for match play.

use derive_more::{Display, Error};
use std::io;
use volte_othello::search::SearchError;
use volte_othello::BoardError;

/// Ways a single player can fail to produce a usable move. Any of these
/// forfeits the game in progress to the opponent.
#[derive(Debug, PartialEq, Error, Display)]
pub enum PlayerError {
    Spawn,
    Io,
    Timeout,
    Parse,
    IllegalMove,
    Search(SearchError),
}

impl From<io::Error> for PlayerError {
    fn from(_: io::Error) -> Self {
        PlayerError::Io
    }
}

impl From<SearchError> for PlayerError {
    fn from(err: SearchError) -> Self {
        PlayerError::Search(err)
    }
}

impl From<BoardError> for PlayerError {
    fn from(_: BoardError) -> Self {
        PlayerError::IllegalMove
    }
}

/// Errors that end a whole batch rather than a single game.
#[derive(Debug, PartialEq, Error, Display)]
pub enum ArenaError {
    EngineStart,
    GameCountOdd,
}
