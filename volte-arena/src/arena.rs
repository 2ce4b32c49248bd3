//! Batch match orchestration.

use crate::error::{ArenaError, PlayerError};
use crate::player::{Player, ProcessPlayer};
use std::cmp::Ordering;
use volte_othello::{Board, Move, Turn};

/// Cumulative results for one batch, indexed by physical player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MatchRecord {
    wins1: usize,
    wins2: usize,
    draws: usize,
    pieces1: usize,
    pieces2: usize,
}

/// How one game ended, in absolute colors.
struct GameOutcome {
    black_pieces: u32,
    white_pieces: u32,
    winner: Option<Turn>,
}

/// Pits two players against each other over batches of games.
///
/// Which physical player holds Black alternates from game to game to cancel
/// the first-move advantage, so batches must be even-sized. A failing player
/// forfeits only the game in progress; the batch keeps going.
pub struct Arena<P1, P2> {
    player1: P1,
    player2: P2,
    record: MatchRecord,
}

impl Arena<ProcessPlayer, ProcessPlayer> {
    /// An arena between two subprocess players given their launch commands
    /// (program plus arguments).
    pub fn new(command1: Vec<String>, command2: Vec<String>) -> Self {
        Arena::with_players(ProcessPlayer::new(command1), ProcessPlayer::new(command2))
    }
}

impl<P1: Player, P2: Player> Arena<P1, P2> {
    /// An arena between any two players.
    pub fn with_players(player1: P1, player2: P2) -> Self {
        Arena {
            player1,
            player2,
            record: MatchRecord::default(),
        }
    }

    /// Play `n` games back to back. `n` must be even so both players hold
    /// each color equally often.
    ///
    /// Only failure to start a player process at all aborts the batch; any
    /// in-game failure forfeits that one game to the opponent.
    pub fn play_n(&mut self, n: usize) -> Result<(), ArenaError> {
        if n % 2 != 0 {
            return Err(ArenaError::GameCountOdd);
        }
        for game in 0..n {
            self.play_one(game % 2 == 1)?;
        }
        Ok(())
    }

    /// Wins for player 1, wins for player 2, and draws.
    pub fn get_stats(&self) -> (usize, usize, usize) {
        (self.record.wins1, self.record.wins2, self.record.draws)
    }

    /// Cumulative final piece counts for player 1 and player 2.
    pub fn get_pieces(&self) -> (usize, usize) {
        (self.record.pieces1, self.record.pieces2)
    }

    fn play_one(&mut self, swapped: bool) -> Result<(), ArenaError> {
        let outcome = {
            let (black, white): (&mut dyn Player, &mut dyn Player) = if swapped {
                (&mut self.player2, &mut self.player1)
            } else {
                (&mut self.player1, &mut self.player2)
            };
            run_game(black, white)?
        };
        self.record_outcome(&outcome, swapped);
        Ok(())
    }

    fn record_outcome(&mut self, outcome: &GameOutcome, swapped: bool) {
        let (pieces1, pieces2) = if swapped {
            (outcome.white_pieces, outcome.black_pieces)
        } else {
            (outcome.black_pieces, outcome.white_pieces)
        };
        self.record.pieces1 += pieces1 as usize;
        self.record.pieces2 += pieces2 as usize;

        match outcome.winner {
            None => self.record.draws += 1,
            Some(color) => {
                if (color == Turn::Black) != swapped {
                    self.record.wins1 += 1;
                } else {
                    self.record.wins2 += 1;
                }
            }
        }
    }
}

fn run_game(
    black: &mut dyn Player,
    white: &mut dyn Player,
) -> Result<GameOutcome, ArenaError> {
    let mut board = Board::new();

    let black_ready = probe(black)?;
    let white_ready = probe(white)?;
    match (black_ready, white_ready) {
        // With nobody left to play, the game is void and scores as a draw.
        (false, false) => return Ok(drawn(&board)),
        (false, true) => return Ok(forfeit(&board, Turn::Black)),
        (true, false) => return Ok(forfeit(&board, Turn::White)),
        (true, true) => {}
    }

    while !board.is_terminal() {
        if board.legal_moves() == 0 {
            // Forced pass: players are never consulted without a move.
            board = board.passed();
            continue;
        }

        let mover: &mut dyn Player = match board.turn() {
            Turn::Black => &mut *black,
            Turn::White => &mut *white,
        };
        let played = match mover.propose_move(&board) {
            Ok(Move::Place(square)) => board
                .apply_move(square)
                .map(|_| ())
                .map_err(PlayerError::from),
            // Passing while holding a legal move breaks the protocol.
            Ok(Move::Pass) => Err(PlayerError::IllegalMove),
            Err(err) => Err(err),
        };
        match played {
            Ok(()) => {}
            Err(PlayerError::Spawn) => return Err(ArenaError::EngineStart),
            Err(_) => return Ok(forfeit(&board, board.turn())),
        }
    }

    Ok(scored(&board))
}

fn probe(player: &mut dyn Player) -> Result<bool, ArenaError> {
    match player.probe() {
        Ok(()) => Ok(true),
        Err(PlayerError::Spawn) => Err(ArenaError::EngineStart),
        Err(_) => Ok(false),
    }
}

fn color_counts(board: &Board) -> (u32, u32) {
    let (player, opponent) = board.piece_counts();
    match board.turn() {
        Turn::Black => (player, opponent),
        Turn::White => (opponent, player),
    }
}

/// The game as played out, won on piece count.
fn scored(board: &Board) -> GameOutcome {
    let (black_pieces, white_pieces) = color_counts(board);
    let winner = match black_pieces.cmp(&white_pieces) {
        Ordering::Greater => Some(Turn::Black),
        Ordering::Less => Some(Turn::White),
        Ordering::Equal => None,
    };
    GameOutcome {
        black_pieces,
        white_pieces,
        winner,
    }
}

/// The game cut short, charged to `loser`. Pieces count as they stood.
fn forfeit(board: &Board, loser: Turn) -> GameOutcome {
    let (black_pieces, white_pieces) = color_counts(board);
    GameOutcome {
        black_pieces,
        white_pieces,
        winner: Some(!loser),
    }
}

fn drawn(board: &Board) -> GameOutcome {
    let (black_pieces, white_pieces) = color_counts(board);
    GameOutcome {
        black_pieces,
        white_pieces,
        winner: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{RandomPlayer, SearchPlayer};
    use volte_othello::search::PieceEvaluator;

    /// Fails every probe without ever spawning anything.
    struct DeadPlayer;

    impl Player for DeadPlayer {
        fn probe(&mut self) -> Result<(), PlayerError> {
            Err(PlayerError::Io)
        }

        fn propose_move(&mut self, _: &Board) -> Result<Move, PlayerError> {
            Err(PlayerError::Io)
        }
    }

    /// Probes fine, then passes no matter what.
    struct PassingPlayer;

    impl Player for PassingPlayer {
        fn probe(&mut self) -> Result<(), PlayerError> {
            Ok(())
        }

        fn propose_move(&mut self, _: &Board) -> Result<Move, PlayerError> {
            Ok(Move::Pass)
        }
    }

    /// Cannot be started at all.
    struct UnspawnablePlayer;

    impl Player for UnspawnablePlayer {
        fn probe(&mut self) -> Result<(), PlayerError> {
            Err(PlayerError::Spawn)
        }

        fn propose_move(&mut self, _: &Board) -> Result<Move, PlayerError> {
            Err(PlayerError::Spawn)
        }
    }

    #[test]
    fn rejects_odd_game_counts() {
        let mut arena = Arena::with_players(RandomPlayer::new(1), RandomPlayer::new(2));
        assert_eq!(arena.play_n(3), Err(ArenaError::GameCountOdd));
        assert_eq!(arena.get_stats(), (0, 0, 0));
    }

    #[test]
    fn accounts_every_game_in_a_batch() {
        let mut arena = Arena::with_players(RandomPlayer::new(7), RandomPlayer::new(11));
        arena.play_n(100).unwrap();
        let (wins1, wins2, draws) = arena.get_stats();
        assert_eq!(wins1 + wins2 + draws, 100);
        let (pieces1, pieces2) = arena.get_pieces();
        assert!(pieces1 > 0);
        assert!(pieces2 > 0);
    }

    #[test]
    fn search_beats_random_over_a_long_batch() {
        let mut arena = Arena::with_players(
            SearchPlayer::new(Box::new(PieceEvaluator), 3),
            RandomPlayer::new(99),
        );
        arena.play_n(1000).unwrap();
        let (wins1, wins2, _) = arena.get_stats();
        assert!(wins1 > wins2);
        let (pieces1, pieces2) = arena.get_pieces();
        assert!(pieces1 > pieces2);
    }

    #[test]
    fn dead_player_forfeits_to_the_opponent() {
        let mut arena = Arena::with_players(DeadPlayer, RandomPlayer::new(5));
        arena.play_n(10).unwrap();
        assert_eq!(arena.get_stats(), (0, 10, 0));
        // Forfeits credit the untouched starting position.
        assert_eq!(arena.get_pieces(), (20, 20));
    }

    #[test]
    fn both_dead_draws_every_game() {
        let mut arena = Arena::with_players(DeadPlayer, DeadPlayer);
        arena.play_n(8).unwrap();
        assert_eq!(arena.get_stats(), (0, 0, 8));
        assert_eq!(arena.get_pieces(), (16, 16));
    }

    #[test]
    fn passing_with_moves_available_forfeits() {
        let mut arena = Arena::with_players(PassingPlayer, PassingPlayer);
        arena.play_n(2).unwrap();
        // Black always has an opening move, so each game's first mover
        // forfeits immediately.
        assert_eq!(arena.get_stats(), (1, 1, 0));
        assert_eq!(arena.get_pieces(), (4, 4));
    }

    #[test]
    fn spawn_failure_aborts_the_batch() {
        let mut arena = Arena::with_players(UnspawnablePlayer, RandomPlayer::new(3));
        assert_eq!(arena.play_n(2), Err(ArenaError::EngineStart));
    }
}
