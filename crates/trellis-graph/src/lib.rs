#![warn(missing_docs)]
//! # Undirected graph container
//!
//! Implements a mutable, undirected graph holding user-supplied data on both
//! nodes and edges, with at most one edge between any pair of distinct nodes.
//!
//! The graph hands out cheap, copyable [`Node`] and [`Edge`] handles; the data
//! itself stays inside the container and is reached through its accessors.
//! Handles stay comparable and hashable after arbitrary mutation, while the
//! externally visible *compact indices* (`0..size()`) remain dense: removing a
//! record shifts everything behind it one position forward.
//!
//! ```
//! use trellis_graph::{Graph, Point};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(Point::new(0.0, 0.0, 0.0), "a");
//! let b = graph.add_node(Point::new(3.0, 4.0, 0.0), "b");
//! let edge = graph.add_edge(a, b, 1.5)?;
//!
//! assert!(graph.has_edge(a, b));
//! assert_eq!(graph.length(edge)?, 5.0);
//! # Ok::<(), trellis_graph::GraphError>(())
//! ```
use slotmap::new_key_type;

mod adjacency;
pub mod errors;
pub mod graph;
pub mod handle;
pub mod iter;
mod store;

pub use errors::GraphError;
pub use graph::Graph;
pub use handle::{Edge, GraphId, Node};
pub use iter::{Edges, IncidentEdges, Nodes};

/// Position of a node in 3-space.
pub type Point = nalgebra::Point3<f64>;

new_key_type! {
    /// Permanent identifier of a node record.
    ///
    /// Assigned at creation and never reassigned to another node, even after
    /// the record it names is removed.
    pub struct NodeUid;
    /// Permanent identifier of an edge record.
    pub struct EdgeUid;
}
