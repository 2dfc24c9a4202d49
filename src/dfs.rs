//! Depth-first search over a static graph, one expansion per step.
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::session::{GraphSnapshot, Status, Stepper};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Delay between two automatic steps.
pub const AUTO_PLAY_INTERVAL: Duration = Duration::from_millis(1000);

/// State of a depth-first search.
///
/// The frontier is a stack of node ids. `path` records nodes in expansion
/// order and is never truncated, so on graphs with dead ends it is the
/// expansion trace rather than a start-to-current path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DfsSession<'g> {
    #[serde(skip)]
    graph: &'g Graph,
    start: String,
    goal: String,
    stack: Frontier<String>,
    visited: Vec<String>,
    path: Vec<String>,
    current: Option<String>,
    steps: u32,
    status: Status,
}

impl<'g> DfsSession<'g> {
    /// Starts a search from `start` looking for `goal`.
    ///
    /// # Errors
    /// `SearchError::UnknownNode` if either id is not in `graph`.
    pub fn new(graph: &'g Graph, start: &str, goal: &str) -> Result<Self, SearchError> {
        graph.require(start)?;
        graph.require(goal)?;
        Ok(DfsSession {
            graph,
            start: start.to_string(),
            goal: goal.to_string(),
            stack: Frontier::with_record(start.to_string()),
            visited: Vec::new(),
            path: Vec::new(),
            current: None,
            steps: 0,
            status: Status::Running,
        })
    }

    pub fn stack(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(String::as_str)
    }

    /// Expanded nodes, in expansion order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl Stepper for DfsSession<'_> {
    fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        let Some(node) = self.stack.pop_back() else {
            self.status = Status::Exhausted;
            return self.status;
        };

        self.steps += 1;
        self.visited.push(node.clone());
        self.path.push(node.clone());
        self.current = Some(node.clone());
        log::debug!("dfs step {}: expanding {}", self.steps, node);

        if node == self.goal {
            self.status = Status::Found;
            log::info!("dfs reached {} after {} steps", node, self.steps);
            return self.status;
        }

        let fresh: Vec<String> = self
            .graph
            .edges(&node)
            .iter()
            .filter(|e| !self.visited.contains(&e.to) && !self.stack.contains_where(|s| *s == e.to))
            .map(|e| e.to.clone())
            .collect();
        // Pushed in reverse so the first declared neighbor is popped first.
        for neighbor in fresh.into_iter().rev() {
            self.stack.push(neighbor);
        }

        if self.stack.is_empty() {
            self.status = Status::Exhausted;
            log::info!("dfs exhausted the graph without reaching {}", self.goal);
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
        self.stack = Frontier::with_record(self.start.clone());
        self.visited.clear();
        self.path.clear();
        self.current = None;
        self.steps = 0;
        self.status = Status::Running;
    }
}

impl GraphSnapshot for DfsSession<'_> {
    fn graph(&self) -> &Graph {
        self.graph
    }

    fn goal(&self) -> &str {
        &self.goal
    }

    fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn is_visited(&self, id: &str) -> bool {
        self.visited.iter().any(|v| v == id)
    }

    fn in_frontier(&self, id: &str) -> bool {
        self.stack.contains_where(|s| s == id)
    }
}

impl fmt::Display for DfsSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DFS  step {}  status {:?}", self.steps, self.status)?;
        writeln!(f, "{}", self.render_nodes())?;
        writeln!(f, "stack: [{}]", self.stack().collect::<Vec<_>>().join(", "))?;
        write!(f, "path:  {}", self.path.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{sample_graph, Node, SAMPLE_GOAL, SAMPLE_START};
    use crate::session::NodeState;

    #[test]
    fn test_expansion_order_on_sample_graph() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, SAMPLE_START, SAMPLE_GOAL).unwrap();
        assert_eq!(session.run_to_end(None), Status::Found);
        assert_eq!(session.path(), ["A", "B", "D", "E", "G"]);
        assert_eq!(session.visited(), ["A", "B", "D", "E", "G"]);
        // G is the fifth expansion (index 4).
        assert_eq!(session.steps(), 5);
    }

    #[test]
    fn test_first_step_pushes_neighbors_reversed() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        assert_eq!(session.step(), Status::Running);
        assert_eq!(session.stack().collect::<Vec<_>>(), vec!["C", "B"]);
        session.step();
        assert_eq!(session.stack().collect::<Vec<_>>(), vec!["C", "E", "D"]);
    }

    #[test]
    fn test_visited_grows_by_one_per_step() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        let mut previous = 0;
        while !session.is_terminal() {
            session.step();
            assert_eq!(session.visited().len(), previous + 1);
            previous = session.visited().len();
        }
    }

    #[test]
    fn test_steps_after_goal_are_noops() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        session.run_to_end(None);
        let finished = session.clone();
        assert_eq!(session.step(), Status::Found);
        assert_eq!(session, finished);
    }

    #[test]
    fn test_exhaustion_when_goal_unreachable() {
        let graph = Graph::new(vec![
            Node::unweighted("A", (0.0, 0.0), &["B"]),
            Node::unweighted("B", (0.0, 0.0), &["A"]),
            Node::unweighted("Z", (0.0, 0.0), &[]),
        ])
        .unwrap();
        let mut session = DfsSession::new(&graph, "A", "Z").unwrap();
        assert_eq!(session.step(), Status::Running);
        assert_eq!(session.step(), Status::Exhausted);
        assert_eq!(session.steps(), 2);
        assert_eq!(session.step(), Status::Exhausted);
        assert_eq!(session.steps(), 2);
    }

    #[test]
    fn test_determinism_and_reset() {
        let graph = sample_graph();
        let initial = DfsSession::new(&graph, "A", "G").unwrap();
        let a = initial.stepped().stepped().stepped();
        let b = initial.stepped().stepped().stepped();
        assert_eq!(a, b);

        let mut session = a;
        session.reset();
        assert_eq!(session, initial);
        session.reset();
        assert_eq!(session, initial);
    }

    #[test]
    fn test_node_states() {
        let graph = sample_graph();
        let mut session = DfsSession::new(&graph, "A", "G").unwrap();
        assert_eq!(session.node_state("A"), NodeState::Frontier);
        session.step();
        session.step();
        assert_eq!(session.node_state("B"), NodeState::Current);
        assert_eq!(session.node_state("A"), NodeState::Visited);
        assert_eq!(session.node_state("D"), NodeState::Frontier);
        assert_eq!(session.node_state("G"), NodeState::Goal);
        assert_eq!(session.node_state("F"), NodeState::Default);
    }

    #[test]
    fn test_unknown_start_rejected() {
        let graph = sample_graph();
        assert_eq!(
            DfsSession::new(&graph, "Q", "G").unwrap_err(),
            SearchError::UnknownNode("Q".to_string())
        );
    }
}
