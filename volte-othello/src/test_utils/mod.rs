//! Utilities shared by tests and benchmarks.

pub mod perft;
