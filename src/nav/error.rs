//! Navigation failure taxonomy
//!
//! None of these are fatal. Public queries log them and hand back an empty
//! route; the `try_` variants expose them for callers that care why.

/// Why a navigation query produced no route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// The graph has no nodes to query
    EmptyGraph,
    /// A start or goal node could not be resolved
    UnresolvedNode,
    /// The frontier was exhausted without reaching the goal
    PathNotFound,
    /// A level collaborator (spawn node, escape node, cover, escape route) is absent
    MissingCollaborator(&'static str),
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "navigation graph is empty"),
            Self::UnresolvedNode => write!(f, "start or goal node could not be resolved"),
            Self::PathNotFound => write!(f, "no path between start and goal"),
            Self::MissingCollaborator(what) => write!(f, "missing {what}"),
        }
    }
}

impl std::error::Error for NavError {}
