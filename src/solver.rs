//! Steppable 8-puzzle solver driven by breadth-first, depth-first or A*
//! search.
//!
//! The algorithm is chosen when the session is created and only decides
//! which open node is expanded next. Everything else is shared:
//! - the expanded board is appended to the closed list,
//! - the goal test happens when a node is expanded,
//! - a successor is dropped if its board is already closed or open.
//!
//! Duplicates are dropped on first sight, with no cost-based replacement.
//! A* therefore keeps the first route it found to an open board even if a
//! cheaper one turns up later, so its result is not guaranteed optimal.
use crate::error::SearchError;
use crate::frontier::{Frontier, Prioritized, Selection};
use crate::heuristics::manhattan_distance;
use crate::puzzle::{Board, Move};
use crate::session::{Status, Stepper};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const AUTO_PLAY_INTERVAL: Duration = Duration::from_millis(500);

/// Search strategy for the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    /// Frontier policy implementing the algorithm.
    pub fn selection(self) -> Selection {
        match self {
            Algorithm::Bfs => Selection::Fifo,
            Algorithm::Dfs => Selection::Lifo,
            Algorithm::AStar => Selection::LowestCost,
        }
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        };
        f.write_str(name)
    }
}

/// A board waiting in, or taken from, the open list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PuzzleNode {
    pub board: Board,
    pub empty_index: usize,
    /// Moves made so far.
    pub cost: u32,
    /// Manhattan distance to the goal.
    pub heuristic: u32,
    pub path: Vec<Move>,
    pub depth: u32,
}

impl PuzzleNode {
    fn root(board: Board) -> Self {
        PuzzleNode {
            board,
            empty_index: board.empty_index(),
            cost: 0,
            heuristic: manhattan_distance(&board),
            path: Vec::new(),
            depth: 0,
        }
    }

    fn successors(&self) -> impl Iterator<Item = PuzzleNode> + '_ {
        self.board.successors().into_iter().map(move |(m, board)| {
            let mut path = self.path.clone();
            path.push(m);
            PuzzleNode {
                board,
                empty_index: board.empty_index(),
                cost: self.cost + 1,
                heuristic: manhattan_distance(&board),
                path,
                depth: self.depth + 1,
            }
        })
    }

    /// `cost + heuristic`, the A* ordering key.
    pub fn estimate(&self) -> u32 {
        self.cost + self.heuristic
    }
}

impl Prioritized for PuzzleNode {
    fn priority(&self) -> u32 {
        self.estimate()
    }
}

/// State of one puzzle-solving run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PuzzleSession {
    start: Board,
    algorithm: Algorithm,
    open: Frontier<PuzzleNode>,
    closed: Vec<Board>,
    #[serde(skip)]
    open_boards: HashSet<Board>,
    #[serde(skip)]
    closed_boards: HashSet<Board>,
    current: Option<PuzzleNode>,
    steps: u32,
    status: Status,
}

impl PuzzleSession {
    /// Creates a session that searches from `start` with `algorithm`.
    ///
    /// # Examples
    /// ```
    /// use search_stepper::puzzle::{Board, Move};
    /// use search_stepper::session::{Status, Stepper};
    /// use search_stepper::solver::{Algorithm, PuzzleSession};
    ///
    /// let start = Board::goal().apply(Move::Left).unwrap();
    /// let mut session = PuzzleSession::new(start, Algorithm::AStar);
    /// assert_eq!(session.run_to_end(None), Status::Found);
    /// assert_eq!(session.solution(), Some(&[Move::Right][..]));
    /// ```
    pub fn new(start: Board, algorithm: Algorithm) -> Self {
        let root = PuzzleNode::root(start);
        PuzzleSession {
            start,
            algorithm,
            open: Frontier::with_record(root),
            closed: Vec::new(),
            open_boards: HashSet::from([start]),
            closed_boards: HashSet::new(),
            current: None,
            steps: 0,
            status: Status::Running,
        }
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn open(&self) -> impl Iterator<Item = &PuzzleNode> {
        self.open.iter()
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Expanded boards, in expansion order.
    pub fn closed(&self) -> &[Board] {
        &self.closed
    }

    pub fn current(&self) -> Option<&PuzzleNode> {
        self.current.as_ref()
    }

    /// Moves leading from the start board to the goal, once found.
    pub fn solution(&self) -> Option<&[Move]> {
        match (&self.current, self.status) {
            (Some(node), Status::Found) => Some(node.path.as_slice()),
            _ => None,
        }
    }

    fn is_known(&self, board: &Board) -> bool {
        self.closed_boards.contains(board) || self.open_boards.contains(board)
    }
}

impl Stepper for PuzzleSession {
    fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        let Some(node) = self.open.select_next(self.algorithm.selection()) else {
            self.status = Status::Exhausted;
            return self.status;
        };

        self.steps += 1;
        self.open_boards.remove(&node.board);
        self.closed_boards.insert(node.board);
        self.closed.push(node.board);
        log::debug!(
            "{} step {}: expanding depth {} (g={} h={})",
            self.algorithm,
            self.steps,
            node.depth,
            node.cost,
            node.heuristic
        );

        if node.board.is_goal() {
            log::info!(
                "{} solved the puzzle in {} moves after {} expansions",
                self.algorithm,
                node.path.len(),
                self.steps
            );
            self.current = Some(node);
            self.status = Status::Found;
            return self.status;
        }

        let fresh: Vec<PuzzleNode> = node
            .successors()
            .filter(|child| !self.is_known(&child.board))
            .collect();
        for child in fresh {
            self.open_boards.insert(child.board);
            self.open.push(child);
        }
        self.current = Some(node);

        if self.open.is_empty() {
            self.status = Status::Exhausted;
            log::info!("{} ran out of boards after {} expansions", self.algorithm, self.steps);
        }
        self.status
    }

    fn status(&self) -> Status {
        self.status
    }

    fn steps(&self) -> u32 {
        self.steps
    }

    fn reset(&mut self) {
        *self = PuzzleSession::new(self.start, self.algorithm);
    }
}

impl fmt::Display for PuzzleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "8-puzzle ({})  step {}  status {:?}  open {}  closed {}",
            self.algorithm,
            self.steps,
            self.status,
            self.open.len(),
            self.closed.len()
        )?;
        let node = self.current.as_ref();
        let board = node.map_or(self.start, |n| n.board);
        writeln!(f, "{}", board.to_colored_string())?;
        if let Some(node) = node {
            let moves: Vec<String> = node.path.iter().map(Move::to_string).collect();
            write!(
                f,
                "g={} h={} f={}  moves: {}",
                node.cost,
                node.heuristic,
                node.estimate(),
                moves.join(" ")
            )?;
        }
        Ok(())
    }
}
