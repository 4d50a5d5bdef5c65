//! Errors surfaced by the graph's public surface.
use thiserror::Error;

/// Misuse of the graph API.
///
/// Every mutator validates its inputs before touching any internal table, so
/// a returned error means the container is unchanged.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GraphError {
    /// The handle names a record that is not live in this graph, either
    /// because it was removed or because the handle was minted by a
    /// different graph.
    #[error("invalid handle: the named record is not live in this graph")]
    InvalidHandle,
    /// A compact index outside `[0, len)` was passed to a positional lookup.
    #[error("index {index} out of range for {len} live records")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of live records at the time of the call.
        len: usize,
    },
    /// Both endpoints of an edge operation named the same node.
    #[error("self-loops are not permitted")]
    SelfLoopRejected,
}
