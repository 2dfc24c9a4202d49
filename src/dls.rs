//! Depth-limited search: depth-first search that refuses to expand
//! below a configurable depth.
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::session::{GraphSnapshot, Status, Stepper};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const AUTO_PLAY_INTERVAL: Duration = Duration::from_millis(1000);

/// Largest accepted depth limit.
pub const MAX_DEPTH_LIMIT: u32 = 10;

/// A depth bound in `0..=MAX_DEPTH_LIMIT`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DepthLimit(u32);

impl DepthLimit {
    /// Clamps `value` into the accepted range.
    ///
    /// ```
    /// use search_stepper::dls::DepthLimit;
    /// assert_eq!(DepthLimit::clamped(-3).get(), 0);
    /// assert_eq!(DepthLimit::clamped(4).get(), 4);
    /// assert_eq!(DepthLimit::clamped(99).get(), 10);
    /// ```
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(0, i64::from(MAX_DEPTH_LIMIT));
        if bounded != value {
            log::warn!("depth limit {} clamped to {}", value, bounded);
        }
        // bounded is within 0..=10
        DepthLimit(bounded as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// One entry of the depth-limited stack. Each entry carries its own
/// path, since a stack alone cannot tell which branch an entry came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DlsRecord {
    pub node: String,
    pub depth: u32,
    pub path: Vec<String>,
}

impl DlsRecord {
    fn root(node: &str) -> Self {
        DlsRecord {
            node: node.to_string(),
            depth: 0,
            path: vec![node.to_string()],
        }
    }

    fn child(&self, node: &str) -> Self {
        let mut path = self.path.clone();
        path.push(node.to_string());
        DlsRecord {
            node: node.to_string(),
            depth: self.depth + 1,
            path,
        }
    }
}

/// State of a depth-limited search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DlsSession<'g> {
    #[serde(skip)]
    graph: &'g Graph,
    start: String,
    goal: String,
    limit: DepthLimit,
    stack: Frontier<DlsRecord>,
    visited: Vec<String>,
    current: Option<DlsRecord>,
    steps: u32,
    status: Status,
    cutoff_reached: bool,
}

impl<'g> DlsSession<'g> {
    /// # Errors
    /// `SearchError::UnknownNode` if `start` or `goal` is not in `graph`.
    pub fn new(
        graph: &'g Graph,
        start: &str,
        goal: &str,
        limit: DepthLimit,
    ) -> Result<Self, SearchError> {
        graph.require(start)?;
        graph.require(goal)?;
        Ok(DlsSession {
            graph,
            start: start.to_string(),
            goal: goal.to_string(),
            limit,
            stack: Frontier::with_record(DlsRecord::root(start)),
            visited: Vec::new(),
            current: None,
            steps: 0,
            status: Status::Running,
            cutoff_reached: false,
        })
    }

    pub fn limit(&self) -> DepthLimit {
        self.limit
    }

    pub fn stack(&self) -> impl Iterator<Item = &DlsRecord> {
        self.stack.iter()
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn current_record(&self) -> Option<&DlsRecord> {
        self.current.as_ref()
    }

    /// Set once the depth bound prevented an expansion. Stays set until
    /// [`Stepper::reset`].
    pub fn cutoff_reached(&self) -> bool {
        self.cutoff_reached
    }

    /// Path to the goal, once found.
    pub fn solution(&self) -> Option<&[String]> {
        match (&self.current, self.status) {
            (Some(record), Status::Found) => Some(record.path.as_slice()),
            _ => None,
        }
    }

    fn is_queued(&self, id: &str) -> bool {
        self.stack.contains_where(|r| r.node == id)
    }
}

impl Stepper for DlsSession<'_> {
    fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        let Some(record) = self.stack.pop_back() else {
            self.status = Status::Exhausted;
            return self.status;
        };

        self.steps += 1;
        self.visited.push(record.node.clone());
        log::debug!(
            "dls step {}: expanding {} at depth {}",
            self.steps,
            record.node,
            record.depth
        );

        if record.node == self.goal {
            log::info!("dls reached {} at depth {}", record.node, record.depth);
            self.current = Some(record);
            self.status = Status::Found;
            return self.status;
        }

        let unvisited: Vec<&str> = self
            .graph
            .edges(&record.node)
            .iter()
            .map(|e| e.to.as_str())
            .filter(|n| !self.visited.iter().any(|v| v == n))
            .collect();

        if record.depth < self.limit.get() {
            let children: Vec<DlsRecord> = unvisited
                .iter()
                .filter(|n| !self.is_queued(n))
                .map(|n| record.child(n))
                .collect();
            for child in children.into_iter().rev() {
                self.stack.push(child);
            }
        } else if !unvisited.is_empty() {
            if !self.cutoff_reached {
                log::debug!("dls cutoff below {} at depth {}", record.node, record.depth);
            }
            self.cutoff_reached = true;
        }

        self.current = Some(record);
        if self.stack.is_empty() {
            self.status = Status::Exhausted;
            log::info!(
                "dls stack empty without reaching {} (cutoff: {})",
                self.goal,
                self.cutoff_reached
            );
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
        self.stack = Frontier::with_record(DlsRecord::root(&self.start));
        self.visited.clear();
        self.current = None;
        self.steps = 0;
        self.status = Status::Running;
        self.cutoff_reached = false;
    }
}

impl GraphSnapshot for DlsSession<'_> {
    fn graph(&self) -> &Graph {
        self.graph
    }

    fn goal(&self) -> &str {
        &self.goal
    }

    fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.node.as_str())
    }

    fn is_visited(&self, id: &str) -> bool {
        self.visited.iter().any(|v| v == id)
    }

    fn in_frontier(&self, id: &str) -> bool {
        self.is_queued(id)
    }
}

impl fmt::Display for DlsSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DLS  limit {}  step {}  status {:?}  cutoff {}",
            self.limit.get(),
            self.steps,
            self.status,
            self.cutoff_reached
        )?;
        writeln!(f, "{}", self.render_nodes())?;
        let stack: Vec<String> = self
            .stack
            .iter()
            .map(|r| format!("{}@{}", r.node, r.depth))
            .collect();
        write!(f, "stack: [{}]", stack.join(", "))?;
        if let Some(record) = &self.current {
            write!(f, "\npath:  {}", record.path.join(" -> "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{sample_graph, SAMPLE_GOAL, SAMPLE_START};

    fn session(graph: &Graph, limit: i64) -> DlsSession<'_> {
        DlsSession::new(graph, SAMPLE_START, SAMPLE_GOAL, DepthLimit::clamped(limit)).unwrap()
    }

    #[test]
    fn test_limit_zero_sets_cutoff_and_keeps_it() {
        let graph = sample_graph();
        let mut session = session(&graph, 0);
        session.step();
        assert_eq!(session.visited(), ["A"]);
        assert_eq!(session.stack().count(), 0);
        assert!(session.cutoff_reached());
        assert_eq!(session.status(), Status::Exhausted);

        session.step();
        session.step();
        assert!(session.cutoff_reached());
        assert_eq!(session.steps(), 1);

        session.reset();
        assert!(!session.cutoff_reached());
    }

    #[test]
    fn test_finds_goal_within_limit() {
        let graph = sample_graph();
        let mut session = session(&graph, 3);
        assert_eq!(session.run_to_end(None), Status::Found);
        assert_eq!(session.solution().unwrap(), ["A", "B", "E", "G"]);
        assert_eq!(session.visited(), ["A", "B", "D", "E", "G"]);
        assert!(!session.cutoff_reached());
    }

    #[test]
    fn test_goal_beyond_limit_is_cutoff_failure() {
        let graph = sample_graph();
        let mut session = session(&graph, 2);
        assert_eq!(session.run_to_end(None), Status::Exhausted);
        assert!(session.cutoff_reached());
        assert!(session.solution().is_none());
        assert_eq!(session.visited(), ["A", "B", "D", "E", "C", "F"]);
    }

    #[test]
    fn test_records_carry_their_own_paths() {
        let graph = sample_graph();
        let mut session = session(&graph, 5);
        session.step();
        session.step();
        let paths: Vec<(String, u32, Vec<String>)> = session
            .stack()
            .map(|r| (r.node.clone(), r.depth, r.path.clone()))
            .collect();
        assert_eq!(
            paths,
            vec![
                ("C".to_string(), 1, vec!["A".to_string(), "C".to_string()]),
                (
                    "E".to_string(),
                    2,
                    vec!["A".to_string(), "B".to_string(), "E".to_string()]
                ),
                (
                    "D".to_string(),
                    2,
                    vec!["A".to_string(), "B".to_string(), "D".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let graph = sample_graph();
        let initial = session(&graph, 2);
        let mut stepped = initial.clone();
        stepped.run_to_end(None);
        stepped.reset();
        assert_eq!(stepped, initial);
        stepped.reset();
        assert_eq!(stepped, initial);
    }

    #[test]
    fn test_visited_grows_by_one_per_step() {
        let graph = sample_graph();
        let mut session = session(&graph, 2);
        let mut previous: Vec<String> = Vec::new();
        while !session.is_terminal() {
            session.step();
            let visited = session.visited();
            assert_eq!(visited.len(), previous.len() + 1);
            assert_eq!(&visited[..previous.len()], previous.as_slice());
            assert_eq!(
                session.current_record().map(|r| r.node.as_str()),
                visited.last().map(String::as_str)
            );
            previous = visited.to_vec();
        }
    }

    #[test]
    fn test_fresh_sessions_step_identically() {
        let graph = sample_graph();
        let mut first = session(&graph, 3);
        let mut second = session(&graph, 3);
        while !first.is_terminal() {
            assert_eq!(first.step(), second.step());
            assert_eq!(first, second);
        }
        assert_eq!(second.status(), Status::Found);
        assert_eq!(second.current_record().map(|r| r.depth), Some(3));
    }

    #[test]
    fn test_depth_limit_clamping() {
        assert_eq!(DepthLimit::clamped(11).get(), MAX_DEPTH_LIMIT);
        assert_eq!(DepthLimit::clamped(-1).get(), 0);
        assert_eq!(DepthLimit::clamped(7).get(), 7);
    }
}
