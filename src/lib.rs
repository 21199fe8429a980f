//! 15-puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `puzzle15::{core,input,ranking,term,types}` and hosts the
//! terminal binary's configuration.

pub mod config;

pub use puzzle15_core as core;
pub use puzzle15_input as input;
pub use puzzle15_ranking as ranking;
pub use puzzle15_term as term;
pub use puzzle15_types as types;
