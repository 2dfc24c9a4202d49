//! # Search Stepper Library
//!
//! Step-by-step implementations of classic search algorithms, meant to be
//! driven by a presenter that shows one expansion at a time:
//! - depth-first search over a small graph,
//! - depth-limited search with a configurable bound,
//! - uniform-cost search over a weighted graph,
//! - an 8-puzzle solver using breadth-first, depth-first or A* search.
//!
//! Every variant is a session value implementing [`session::Stepper`]. A
//! presenter calls `step` by hand or hands the session to
//! [`scheduler::AutoPlay`], and renders the session after each step.
//!
//! It is used by two binaries:
//! - `stepper`: interactive terminal player (step, play, pause, reset).
//! - `solver`: runs a session to the end, optionally printing a JSON trace.
//!
//! ## Modules
//! - `graph`: the static graph model and the 7-node sample graphs.
//! - `frontier`: pending records and the FIFO / LIFO / lowest-cost policies.
//! - `session`: the `Stepper` contract, statuses and node coloring.
//! - `dfs`, `dls`, `ucs`: the graph search sessions.
//! - `puzzle`: the 3x3 board, moves and shuffling.
//! - `heuristics`: Manhattan distance and solvability.
//! - `solver`: the 8-puzzle session.
//! - `scheduler`: timed auto-play with a pause switch.
//! - `utils`: parsing of boards and depth limits typed by users.
//! - `presenter`: variant selection for the binaries and `AnySession`.
//! - `error`: the crate's error type.

pub mod dfs;
pub mod dls;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristics;
pub mod presenter;
pub mod puzzle;
pub mod scheduler;
pub mod session;
pub mod solver;
pub mod ucs;
pub mod utils;

pub use error::SearchError;
pub use session::{Status, Stepper};
