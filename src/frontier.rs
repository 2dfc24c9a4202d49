//! Frontier of pending search records and the policies that pick from it.
//!
//! Every search variant keeps its pending records in a [`Frontier`] and
//! chooses the next record with one [`Selection`] policy, fixed when the
//! session is created.
use serde::Serialize;
use std::collections::VecDeque;

/// Ordering key used by [`Selection::LowestCost`].
pub trait Prioritized {
    /// Lower values are selected first.
    fn priority(&self) -> u32;
}

/// How the next record is taken out of a frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Selection {
    /// Oldest record first (queue).
    Fifo,
    /// Newest record first (stack).
    Lifo,
    /// Record with the lowest priority first. The frontier is stably
    /// sorted before the pop, so equal keys keep their insertion order.
    LowestCost,
}

/// Ordered collection of discovered-but-unexpanded records.
///
/// Records are appended at the back. Snapshots list them in storage order,
/// which for `LowestCost` is the order left by the last sort.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontier<R> {
    records: VecDeque<R>,
}

impl<R> Default for Frontier<R> {
    fn default() -> Self {
        Frontier {
            records: VecDeque::new(),
        }
    }
}

impl<R> Frontier<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding a single record.
    pub fn with_record(record: R) -> Self {
        let mut frontier = Self::new();
        frontier.push(record);
        frontier
    }

    pub fn push(&mut self, record: R) {
        self.records.push_back(record);
    }

    /// Removes the oldest record.
    pub fn pop_front(&mut self) -> Option<R> {
        self.records.pop_front()
    }

    /// Removes the newest record.
    pub fn pop_back(&mut self) -> Option<R> {
        self.records.pop_back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in storage order (front first).
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn contains_where(&self, pred: impl Fn(&R) -> bool) -> bool {
        self.records.iter().any(pred)
    }

    /// Drops every record matching `pred`, keeping the order of the rest.
    pub fn remove_where(&mut self, pred: impl Fn(&R) -> bool) {
        self.records.retain(|r| !pred(r));
    }

    /// Takes the next record according to `selection`.
    ///
    /// Returns `None` when the frontier is empty.
    ///
    /// ```
    /// use search_stepper::frontier::{Frontier, Prioritized, Selection};
    ///
    /// struct Cost(u32);
    /// impl Prioritized for Cost {
    ///     fn priority(&self) -> u32 { self.0 }
    /// }
    ///
    /// let mut frontier = Frontier::new();
    /// frontier.push(Cost(5));
    /// frontier.push(Cost(2));
    /// frontier.push(Cost(7));
    /// assert_eq!(frontier.select_next(Selection::LowestCost).map(|c| c.0), Some(2));
    /// assert_eq!(frontier.select_next(Selection::Lifo).map(|c| c.0), Some(7));
    /// assert_eq!(frontier.select_next(Selection::Fifo).map(|c| c.0), Some(5));
    /// ```
    pub fn select_next(&mut self, selection: Selection) -> Option<R>
    where
        R: Prioritized,
    {
        match selection {
            Selection::Fifo => self.pop_front(),
            Selection::Lifo => self.pop_back(),
            Selection::LowestCost => {
                // sort_by_key on a slice is stable
                self.records.make_contiguous().sort_by_key(|r| r.priority());
                self.records.pop_front()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Rec(&'static str, u32);

    impl Prioritized for Rec {
        fn priority(&self) -> u32 {
            self.1
        }
    }

    fn frontier_of(items: &[(&'static str, u32)]) -> Frontier<Rec> {
        let mut frontier = Frontier::new();
        for &(id, cost) in items {
            frontier.push(Rec(id, cost));
        }
        frontier
    }

    #[test]
    fn test_fifo_and_lifo() {
        let mut frontier = frontier_of(&[("a", 0), ("b", 0), ("c", 0)]);
        assert_eq!(frontier.select_next(Selection::Fifo), Some(Rec("a", 0)));
        assert_eq!(frontier.select_next(Selection::Lifo), Some(Rec("c", 0)));
        assert_eq!(frontier.select_next(Selection::Lifo), Some(Rec("b", 0)));
        assert_eq!(frontier.select_next(Selection::Lifo), None);
    }

    #[test]
    fn test_lowest_cost_is_stable_for_ties() {
        let mut frontier = frontier_of(&[("d", 5), ("e", 6), ("f", 5)]);
        assert_eq!(frontier.select_next(Selection::LowestCost), Some(Rec("d", 5)));
        // The sort is left in place for the remaining records.
        let rest: Vec<&str> = frontier.iter().map(|r| r.0).collect();
        assert_eq!(rest, vec!["f", "e"]);
    }

    #[test]
    fn test_remove_where_keeps_order() {
        let mut frontier = frontier_of(&[("a", 1), ("b", 2), ("c", 3)]);
        frontier.remove_where(|r| r.0 == "b");
        assert!(!frontier.contains_where(|r| r.0 == "b"));
        let rest: Vec<&str> = frontier.iter().map(|r| r.0).collect();
        assert_eq!(rest, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_frontier() {
        let mut frontier: Frontier<Rec> = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.select_next(Selection::LowestCost), None);
        assert_eq!(Frontier::with_record(Rec("x", 1)).len(), 1);
    }
}
