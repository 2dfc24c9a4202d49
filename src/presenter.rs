//! Glue shared by the binaries: command-line selection of a search variant
//! and a session type that can hold any of them.
use crate::dfs::{self, DfsSession};
use crate::dls::{self, DlsSession};
use crate::error::SearchError;
use crate::graph::{sample_graph, weighted_sample_graph, Graph, SAMPLE_GOAL, SAMPLE_START};
use crate::puzzle::Board;
use crate::session::{Status, Stepper};
use crate::solver::{self, Algorithm, PuzzleSession};
use crate::ucs::{self, UcsSession};
use crate::utils::{parse_depth_limit, solvable_board_from_str};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

fn parse_algorithm(s: &str) -> Result<Algorithm, SearchError> {
    s.parse()
}

/// The search to run.
#[derive(clap::Subcommand, Debug, Clone)]
pub enum Variant {
    /// Depth-first search on the sample graph.
    Dfs,

    /// Depth-limited search on the sample graph.
    Dls {
        /// Depth bound, clamped to 0..=10. Non-numeric input means 0.
        #[arg(short, long, default_value = "3", allow_hyphen_values = true)]
        limit: String,
    },

    /// Uniform-cost search on the weighted sample graph.
    Ucs,

    /// 8-puzzle solver.
    Puzzle {
        /// bfs, dfs or astar.
        #[arg(short, long, default_value = "astar", value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Start board as nine tiles, e.g. "813/402/765" (0 or _ is the blank).
        #[arg(short, long, conflicts_with = "seed")]
        board: Option<String>,

        /// Seed for a reproducible shuffle. Without a board or a seed the
        /// start board is shuffled at random.
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// The two static graphs, built once and borrowed by graph sessions.
pub struct SampleGraphs {
    pub plain: Graph,
    pub weighted: Graph,
}

impl SampleGraphs {
    pub fn new() -> Self {
        SampleGraphs {
            plain: sample_graph(),
            weighted: weighted_sample_graph(),
        }
    }
}

impl Default for SampleGraphs {
    fn default() -> Self {
        Self::new()
    }
}

impl Variant {
    /// Builds a fresh session for this variant.
    ///
    /// # Errors
    /// Fails for a malformed or unsolvable `--board`.
    pub fn build<'g>(&self, graphs: &'g SampleGraphs) -> Result<AnySession<'g>, SearchError> {
        let session = match self {
            Variant::Dfs => {
                AnySession::Dfs(DfsSession::new(&graphs.plain, SAMPLE_START, SAMPLE_GOAL)?)
            }
            Variant::Dls { limit } => AnySession::Dls(DlsSession::new(
                &graphs.plain,
                SAMPLE_START,
                SAMPLE_GOAL,
                parse_depth_limit(limit),
            )?),
            Variant::Ucs => {
                AnySession::Ucs(UcsSession::new(&graphs.weighted, SAMPLE_START, SAMPLE_GOAL)?)
            }
            Variant::Puzzle {
                algorithm,
                board,
                seed,
            } => {
                let start = match (board, seed) {
                    (Some(text), _) => solvable_board_from_str(text)?,
                    (None, Some(seed)) => Board::shuffled_with_seed(*seed),
                    (None, None) => Board::shuffled(&mut rand::thread_rng()),
                };
                log::info!("puzzle start board: {:?}", start.tiles());
                AnySession::Puzzle(PuzzleSession::new(start, *algorithm))
            }
        };
        Ok(session)
    }
}

/// Any one of the four search sessions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum AnySession<'g> {
    Dfs(DfsSession<'g>),
    Dls(DlsSession<'g>),
    Ucs(UcsSession<'g>),
    Puzzle(PuzzleSession),
}

impl AnySession<'_> {
    /// Auto-play delay used when none is given.
    pub fn default_interval(&self) -> Duration {
        match self {
            AnySession::Dfs(_) => dfs::AUTO_PLAY_INTERVAL,
            AnySession::Dls(_) => dls::AUTO_PLAY_INTERVAL,
            AnySession::Ucs(_) => ucs::AUTO_PLAY_INTERVAL,
            AnySession::Puzzle(_) => solver::AUTO_PLAY_INTERVAL,
        }
    }

    /// Replaces a puzzle session with one on a freshly shuffled board,
    /// keeping its algorithm. Returns `false` for graph sessions.
    pub fn shuffle(&mut self, rng: &mut impl Rng) -> bool {
        match self {
            AnySession::Puzzle(session) => {
                *session = PuzzleSession::new(Board::shuffled(rng), session.algorithm());
                true
            }
            _ => false,
        }
    }

    /// One-line description of the result so far.
    pub fn summary(&self) -> String {
        match (self, self.status()) {
            (_, Status::Running) => format!("running, {} steps taken", self.steps()),
            (AnySession::Dfs(s), Status::Found) => format!("found: {}", s.path().join(" -> ")),
            (AnySession::Dls(s), Status::Found) => {
                format!("found: {}", s.solution().unwrap_or_default().join(" -> "))
            }
            (AnySession::Dls(s), _) if s.cutoff_reached() => {
                format!("failed: cutoff at depth {}", s.limit().get())
            }
            (AnySession::Ucs(s), Status::Found) => match s.solution() {
                Some((path, cost)) => format!("found: {} (cost {})", path.join(" -> "), cost),
                None => "found".to_string(),
            },
            (AnySession::Puzzle(s), Status::Found) => {
                let moves = s.solution().unwrap_or_default();
                let labels: Vec<String> = moves.iter().map(ToString::to_string).collect();
                format!("solved in {} moves: {}", moves.len(), labels.join(" "))
            }
            (_, _) => format!("failed: frontier exhausted after {} steps", self.steps()),
        }
    }
}

impl Stepper for AnySession<'_> {
    fn step(&mut self) -> Status {
        match self {
            AnySession::Dfs(s) => s.step(),
            AnySession::Dls(s) => s.step(),
            AnySession::Ucs(s) => s.step(),
            AnySession::Puzzle(s) => s.step(),
        }
    }

    fn status(&self) -> Status {
        match self {
            AnySession::Dfs(s) => s.status(),
            AnySession::Dls(s) => s.status(),
            AnySession::Ucs(s) => s.status(),
            AnySession::Puzzle(s) => s.status(),
        }
    }

    fn steps(&self) -> u32 {
        match self {
            AnySession::Dfs(s) => s.steps(),
            AnySession::Dls(s) => s.steps(),
            AnySession::Ucs(s) => s.steps(),
            AnySession::Puzzle(s) => s.steps(),
        }
    }

    fn reset(&mut self) {
        match self {
            AnySession::Dfs(s) => s.reset(),
            AnySession::Dls(s) => s.reset(),
            AnySession::Ucs(s) => s.reset(),
            AnySession::Puzzle(s) => s.reset(),
        }
    }
}

impl fmt::Display for AnySession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnySession::Dfs(s) => fmt::Display::fmt(s, f),
            AnySession::Dls(s) => fmt::Display::fmt(s, f),
            AnySession::Ucs(s) => fmt::Display::fmt(s, f),
            AnySession::Puzzle(s) => fmt::Display::fmt(s, f),
        }
    }
}
