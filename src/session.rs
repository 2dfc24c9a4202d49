//! The step contract shared by every search session.
//!
//! A session owns its frontier, its visited set and its counters. It is
//! advanced one expansion at a time through [`Stepper::step`] and can be
//! rebuilt from its static configuration with [`Stepper::reset`].
use crate::graph::Graph;
use serde::Serialize;
use std::fmt::Write;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// More steps may be taken.
    Running,
    /// The goal was expanded.
    Found,
    /// The frontier emptied before the goal was reached.
    Exhausted,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }
}

/// A steppable search session.
pub trait Stepper: Clone {
    /// Performs one expansion and returns the resulting status.
    ///
    /// Calling this on a terminal session does nothing.
    fn step(&mut self) -> Status;

    fn status(&self) -> Status;

    /// Number of expansions performed since the last reset.
    fn steps(&self) -> u32;

    /// Rebuilds the initial session. Calling it repeatedly is harmless.
    fn reset(&mut self);

    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Pure form of [`Stepper::step`]: returns the successor session and
    /// leaves `self` untouched.
    fn stepped(&self) -> Self {
        let mut next = self.clone();
        next.step();
        next
    }

    /// Steps until the session is terminal, or until `max_steps` further
    /// steps have been taken.
    fn run_to_end(&mut self, max_steps: Option<u32>) -> Status {
        let mut taken = 0;
        while !self.is_terminal() && max_steps.map_or(true, |max| taken < max) {
            self.step();
            taken += 1;
        }
        self.status()
    }
}

/// Display state of a graph node, derived from a session snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Default,
    Frontier,
    Current,
    Visited,
    Goal,
}

impl NodeState {
    /// ANSI background color code for terminal output.
    fn to_ansi_color_code(self) -> &'static str {
        match self {
            NodeState::Default => "47",
            NodeState::Frontier => "43",
            NodeState::Current => "44",
            NodeState::Visited => "42",
            NodeState::Goal => "41",
        }
    }
}

/// Read-only view over a graph search session used for coloring.
pub trait GraphSnapshot {
    fn graph(&self) -> &Graph;

    fn goal(&self) -> &str;

    /// Node expanded by the most recent step, if any.
    fn current(&self) -> Option<&str>;

    fn is_visited(&self, id: &str) -> bool;

    fn in_frontier(&self, id: &str) -> bool;

    /// Color of `id`. Precedence: current, goal, visited, frontier.
    fn node_state(&self, id: &str) -> NodeState {
        if self.current() == Some(id) {
            NodeState::Current
        } else if self.goal() == id {
            NodeState::Goal
        } else if self.is_visited(id) {
            NodeState::Visited
        } else if self.in_frontier(id) {
            NodeState::Frontier
        } else {
            NodeState::Default
        }
    }

    /// One colored cell per node, in graph declaration order.
    fn render_nodes(&self) -> String {
        let mut output = String::new();
        for node in self.graph().nodes() {
            let code = self.node_state(&node.id).to_ansi_color_code();
            // Writing to a String cannot fail.
            let _ = write!(output, "\x1b[1;30;{}m {} \x1b[m ", code, node.id);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Counter {
        steps: u32,
        limit: u32,
    }

    impl Stepper for Counter {
        fn step(&mut self) -> Status {
            if !self.is_terminal() {
                self.steps += 1;
            }
            self.status()
        }

        fn status(&self) -> Status {
            if self.steps >= self.limit {
                Status::Found
            } else {
                Status::Running
            }
        }

        fn steps(&self) -> u32 {
            self.steps
        }

        fn reset(&mut self) {
            self.steps = 0;
        }
    }

    #[test]
    fn test_run_to_end_respects_budget() {
        let mut counter = Counter { steps: 0, limit: 10 };
        assert_eq!(counter.run_to_end(Some(3)), Status::Running);
        assert_eq!(counter.steps(), 3);
        assert_eq!(counter.run_to_end(None), Status::Found);
        assert_eq!(counter.steps(), 10);
    }

    #[test]
    fn test_stepped_leaves_original_untouched() {
        let counter = Counter { steps: 0, limit: 2 };
        let next = counter.stepped();
        assert_eq!(counter.steps(), 0);
        assert_eq!(next.steps(), 1);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!Status::Running.is_terminal());
        assert!(Status::Found.is_terminal());
        assert!(Status::Exhausted.is_terminal());
    }
}
