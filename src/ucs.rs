//! Uniform-cost search over a weighted graph.
//!
//! The frontier is fully sorted by cumulative cost before every pop. When a
//! cheaper route to a queued node is found, the stale entry is dropped and
//! replaced, so the node popped is always the cheapest one known.
use crate::error::SearchError;
use crate::frontier::{Frontier, Prioritized, Selection};
use crate::graph::Graph;
use crate::session::{GraphSnapshot, Status, Stepper};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub const AUTO_PLAY_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UcsRecord {
    pub node: String,
    pub cost: u32,
    pub path: Vec<String>,
}

impl Prioritized for UcsRecord {
    fn priority(&self) -> u32 {
        self.cost
    }
}

/// State of a uniform-cost search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UcsSession<'g> {
    #[serde(skip)]
    graph: &'g Graph,
    start: String,
    goal: String,
    frontier: Frontier<UcsRecord>,
    visited: Vec<String>,
    /// Cheapest cost seen so far for every discovered node.
    best_costs: BTreeMap<String, u32>,
    current: Option<UcsRecord>,
    steps: u32,
    status: Status,
}

impl<'g> UcsSession<'g> {
    /// # Errors
    /// `SearchError::UnknownNode` if `start` or `goal` is not in `graph`.
    pub fn new(graph: &'g Graph, start: &str, goal: &str) -> Result<Self, SearchError> {
        graph.require(start)?;
        graph.require(goal)?;
        let mut session = UcsSession {
            graph,
            start: start.to_string(),
            goal: goal.to_string(),
            frontier: Frontier::new(),
            visited: Vec::new(),
            best_costs: BTreeMap::new(),
            current: None,
            steps: 0,
            status: Status::Running,
        };
        session.reset();
        Ok(session)
    }

    pub fn frontier(&self) -> impl Iterator<Item = &UcsRecord> {
        self.frontier.iter()
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn best_cost(&self, id: &str) -> Option<u32> {
        self.best_costs.get(id).copied()
    }

    pub fn current_record(&self) -> Option<&UcsRecord> {
        self.current.as_ref()
    }

    /// Cheapest path and its cost, once the goal has been popped.
    pub fn solution(&self) -> Option<(&[String], u32)> {
        match (&self.current, self.status) {
            (Some(record), Status::Found) => Some((record.path.as_slice(), record.cost)),
            _ => None,
        }
    }

    fn relax(&mut self, from: &UcsRecord) {
        let graph = self.graph;
        for edge in graph.edges(&from.node) {
            if self.visited.contains(&edge.to) {
                continue;
            }
            // Saturates at u32::MAX.
            let candidate = from.cost.saturating_add(edge.cost);
            let improves = self
                .best_costs
                .get(&edge.to)
                .map_or(true, |&best| candidate < best);
            if !improves {
                continue;
            }
            self.best_costs.insert(edge.to.clone(), candidate);
            self.frontier.remove_where(|r| r.node == edge.to);
            let mut path = from.path.clone();
            path.push(edge.to.clone());
            log::debug!("ucs: {} reachable at cost {}", edge.to, candidate);
            self.frontier.push(UcsRecord {
                node: edge.to.clone(),
                cost: candidate,
                path,
            });
        }
    }
}

impl Stepper for UcsSession<'_> {
    fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        let Some(record) = self.frontier.select_next(Selection::LowestCost) else {
            self.status = Status::Exhausted;
            return self.status;
        };

        self.steps += 1;
        self.visited.push(record.node.clone());
        log::debug!(
            "ucs step {}: expanding {} (cost {})",
            self.steps,
            record.node,
            record.cost
        );

        if record.node == self.goal {
            log::info!("ucs reached {} at cost {}", record.node, record.cost);
            self.current = Some(record);
            self.status = Status::Found;
            return self.status;
        }

        self.relax(&record);
        self.current = Some(record);

        if self.frontier.is_empty() {
            self.status = Status::Exhausted;
            log::info!("ucs frontier empty without reaching {}", self.goal);
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
        self.frontier = Frontier::with_record(UcsRecord {
            node: self.start.clone(),
            cost: 0,
            path: vec![self.start.clone()],
        });
        self.visited.clear();
        self.best_costs.clear();
        self.best_costs.insert(self.start.clone(), 0);
        self.current = None;
        self.steps = 0;
        self.status = Status::Running;
    }
}

impl GraphSnapshot for UcsSession<'_> {
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
        self.frontier.contains_where(|r| r.node == id)
    }
}

impl fmt::Display for UcsSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UCS  step {}  status {:?}", self.steps, self.status)?;
        writeln!(f, "{}", self.render_nodes())?;
        let queue: Vec<String> = self
            .frontier
            .iter()
            .map(|r| format!("{}({})", r.node, r.cost))
            .collect();
        write!(f, "frontier: [{}]", queue.join(", "))?;
        if let Some(record) = &self.current {
            write!(f, "\npath:     {}  cost {}", record.path.join(" -> "), record.cost)?;
        }
        Ok(())
    }
}
