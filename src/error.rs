/// Errors raised while building graphs, boards or sessions.
///
/// Stepping a session never fails: running out of frontier is reported
/// through [`crate::session::Status::Exhausted`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("edge from '{from}' points to missing node '{to}'")]
    DanglingEdge { from: String, to: String },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("board cannot reach the goal configuration")]
    UnsolvableBoard,

    #[error("unknown algorithm '{0}' (expected bfs, dfs or astar)")]
    UnknownAlgorithm(String),
}
