//! Move selection: evaluation heuristics and alpha-beta search.

mod alpha_beta;
mod evaluator;
mod time_keeper;

pub use alpha_beta::{AlphaBetaSearch, SearchError};
pub use evaluator::{Evaluator, MatrixEvaluator, MobilityEvaluator, PieceEvaluator};
pub use time_keeper::TimeKeeper;
