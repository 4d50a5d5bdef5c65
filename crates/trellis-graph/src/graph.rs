//! The graph container itself.
use crate::adjacency::Adjacency;
use crate::errors::GraphError;
use crate::handle::{Edge, GraphId, Node};
use crate::iter::{Edges, IncidentEdges, Nodes};
use crate::store::{Compact, Store};
use crate::{EdgeUid, NodeUid, Point};

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<V> {
    pub(crate) index: usize,
    pub(crate) position: Point,
    pub(crate) value: V,
}

impl<V> Compact for NodeRecord<V> {
    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeRecord<E> {
    /// Endpoint uids in the order supplied to the creating call.
    pub(crate) a: NodeUid,
    pub(crate) b: NodeUid,
    pub(crate) index: usize,
    pub(crate) value: E,
}

impl<E> Compact for EdgeRecord<E> {
    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// A mutable, undirected graph with a position and a `V` payload per node and
/// an `E` payload per edge.
///
/// Nodes and edges are named by [`Node`]/[`Edge`] handles whose identity
/// survives structural mutation, while positional access through compact
/// indices (`0..size()`, `0..num_edges()`) stays dense: removals shift the
/// records behind the removed one forward and every surviving handle observes
/// its updated [`index_of`](Graph::index_of) automatically.
///
/// There is at most one edge between any pair of distinct nodes, and
/// self-loops are rejected. All operations run to completion on the calling
/// thread; misuse surfaces a [`GraphError`] and leaves the container
/// untouched.
///
/// # Examples
///
/// ```
/// use trellis_graph::{Graph, Point};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Point::new(0.0, 0.0, 0.0), "a");
/// let b = graph.add_node(Point::new(1.0, 0.0, 0.0), "b");
/// let c = graph.add_node(Point::new(0.0, 1.0, 0.0), "c");
///
/// graph.add_edge(a, b, ())?;
/// graph.add_edge(b, c, ())?;
/// assert_eq!(graph.size(), 3);
/// assert_eq!(graph.num_edges(), 2);
///
/// graph.remove_node(b)?;
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.num_edges(), 0);
/// assert!(!graph.has_edge(a, c));
/// # Ok::<(), trellis_graph::GraphError>(())
/// ```
#[derive(Debug)]
pub struct Graph<V, E> {
    id: GraphId,
    nodes: Store<NodeUid, NodeRecord<V>>,
    edges: Store<EdgeUid, EdgeRecord<E>>,
    adjacency: Adjacency,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> {
    /// Create a new, empty graph. Takes no configuration.
    pub fn new() -> Self {
        Self {
            id: GraphId::fresh(),
            nodes: Store::new(),
            edges: Store::new(),
            adjacency: Adjacency::new(),
        }
    }

    /// Identity of this graph instance, as embedded in its handles.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Number of live nodes. O(1).
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Synonym for [`size`](Graph::size).
    pub fn num_nodes(&self) -> usize {
        self.size()
    }

    /// Number of live edges. O(1).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// True if the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    // NODES

    /// Add a node at `position` carrying `value`, returning its handle.
    ///
    /// The new node takes the compact index `old size()` and starts with no
    /// incident edges. O(1) amortized.
    ///
    /// ```
    /// use trellis_graph::{Graph, Point};
    ///
    /// let mut graph: Graph<i32, ()> = Graph::new();
    /// let position = Point::new(1.0, 2.0, 3.0);
    /// let node = graph.add_node(position, 42);
    ///
    /// assert_eq!(graph.size(), 1);
    /// assert_eq!(graph.index_of(node)?, 0);
    /// assert_eq!(graph.position(node)?, position);
    /// assert_eq!(*graph.value(node)?, 42);
    /// # Ok::<(), trellis_graph::GraphError>(())
    /// ```
    pub fn add_node(&mut self, position: Point, value: V) -> Node {
        let record = NodeRecord {
            index: self.nodes.len(),
            position,
            value,
        };
        let uid = self.nodes.insert(record);
        self.adjacency.insert_node(uid);
        Node {
            graph: self.id,
            uid,
        }
    }

    /// Add a node at `position` with a defaulted payload.
    pub fn add_node_default(&mut self, position: Point) -> Node
    where
        V: Default,
    {
        self.add_node(position, V::default())
    }

    /// Handle of the node at compact index `index`. O(1).
    pub fn node(&self, index: usize) -> Result<Node, GraphError> {
        let uid = self.nodes.uid_at(index).ok_or(GraphError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })?;
        Ok(Node {
            graph: self.id,
            uid,
        })
    }

    /// Remove `node` and every edge incident to it.
    ///
    /// Surviving nodes with a higher compact index move down one position;
    /// their handles remain valid and observe the updated index. `node` and
    /// every handle equal to it become stale. O(size() + degree).
    pub fn remove_node(&mut self, node: Node) -> Result<(), GraphError> {
        self.node_record(node)?;
        // Unlinking mutates the live bucket, so cascade over a snapshot.
        for edge_uid in self.adjacency.incident_snapshot(node.uid) {
            self.remove_edge_record(edge_uid);
        }
        self.nodes.remove(node.uid);
        self.adjacency.remove_node(node.uid);
        Ok(())
    }

    /// Remove all nodes and edges. Invalidates every outstanding handle.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    /// True if `node` names a live node of this graph.
    pub fn contains(&self, node: Node) -> bool {
        node.graph == self.id && self.nodes.contains(node.uid)
    }

    /// Current position of `node`.
    pub fn position(&self, node: Node) -> Result<Point, GraphError> {
        Ok(self.node_record(node)?.position)
    }

    /// Move `node` to `position`.
    pub fn set_position(&mut self, node: Node, position: Point) -> Result<(), GraphError> {
        self.node_record_mut(node)?.position = position;
        Ok(())
    }

    /// Current compact index of `node`, in `[0, size())`.
    pub fn index_of(&self, node: Node) -> Result<usize, GraphError> {
        Ok(self.node_record(node)?.index)
    }

    /// Payload of `node`.
    pub fn value(&self, node: Node) -> Result<&V, GraphError> {
        Ok(&self.node_record(node)?.value)
    }

    /// Mutable payload of `node`.
    pub fn value_mut(&mut self, node: Node) -> Result<&mut V, GraphError> {
        Ok(&mut self.node_record_mut(node)?.value)
    }

    /// Number of edges incident to `node`.
    pub fn degree(&self, node: Node) -> Result<usize, GraphError> {
        self.node_record(node)?;
        Ok(self.adjacency.degree(node.uid))
    }

    // EDGES

    /// Add an edge between the distinct nodes `a` and `b`, or return the
    /// existing edge if the pair is already connected.
    ///
    /// The idempotent re-add leaves [`num_edges`](Graph::num_edges) and the
    /// stored payload untouched and returns a handle comparing equal to the
    /// original one.
    ///
    /// O(log degree(a)) for the existence probe plus O(1) amortized insert.
    ///
    /// ```
    /// use trellis_graph::{Graph, GraphError, Point};
    ///
    /// let mut graph = Graph::new();
    /// let a = graph.add_node(Point::new(0.0, 0.0, 0.0), ());
    /// let b = graph.add_node(Point::new(1.0, 0.0, 0.0), ());
    ///
    /// let first = graph.add_edge(a, b, "weight")?;
    /// let again = graph.add_edge(b, a, "ignored")?;
    ///
    /// assert_eq!(first, again);
    /// assert_eq!(graph.num_edges(), 1);
    /// assert_eq!(*graph.edge_value(first)?, "weight");
    /// assert_eq!(graph.add_edge(a, a, "loop"), Err(GraphError::SelfLoopRejected));
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn add_edge(&mut self, a: Node, b: Node, value: E) -> Result<Edge, GraphError> {
        self.node_record(a)?;
        self.node_record(b)?;
        if a.uid == b.uid {
            return Err(GraphError::SelfLoopRejected);
        }
        if let Some(uid) = self.adjacency.edge_between(a.uid, b.uid) {
            return Ok(self.edge_handle(uid));
        }
        let record = EdgeRecord {
            a: a.uid,
            b: b.uid,
            index: self.edges.len(),
            value,
        };
        let uid = self.edges.insert(record);
        self.adjacency.link(a.uid, b.uid, uid);
        Ok(Edge {
            graph: self.id,
            uid,
            a: a.uid,
            b: b.uid,
        })
    }

    /// Add an edge with a defaulted payload.
    pub fn add_edge_default(&mut self, a: Node, b: Node) -> Result<Edge, GraphError>
    where
        E: Default,
    {
        self.add_edge(a, b, E::default())
    }

    /// Handle of the edge at compact index `index`. O(1).
    pub fn edge(&self, index: usize) -> Result<Edge, GraphError> {
        let uid = self.edges.uid_at(index).ok_or(GraphError::IndexOutOfRange {
            index,
            len: self.edges.len(),
        })?;
        Ok(self.edge_handle(uid))
    }

    /// True if an edge connects `a` and `b`.
    ///
    /// Symmetric in its arguments. Stale handles, handles from another graph
    /// and `a == b` all answer `false`. O(log degree(a)).
    pub fn has_edge(&self, a: Node, b: Node) -> bool {
        if a.graph != self.id || b.graph != self.id || a.uid == b.uid {
            return false;
        }
        self.adjacency.edge_between(a.uid, b.uid).is_some()
    }

    /// True if `edge` names a live edge of this graph.
    pub fn contains_edge(&self, edge: Edge) -> bool {
        edge.graph == self.id && self.edges.contains(edge.uid)
    }

    /// Remove the edge between `a` and `b`, if any, returning the number of
    /// edges removed (0 or 1).
    pub fn remove_edge_between(&mut self, a: Node, b: Node) -> Result<usize, GraphError> {
        self.node_record(a)?;
        self.node_record(b)?;
        if a.uid == b.uid {
            return Err(GraphError::SelfLoopRejected);
        }
        match self.adjacency.edge_between(a.uid, b.uid) {
            Some(uid) => {
                self.remove_edge_record(uid);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    /// Remove `edge`, returning the number of edges removed (always 1).
    ///
    /// Unlike [`remove_edge_between`](Graph::remove_edge_between) this skips
    /// the adjacency probe; the handle is only checked for liveness.
    pub fn remove_edge(&mut self, edge: Edge) -> Result<usize, GraphError> {
        if edge.graph != self.id || !self.edges.contains(edge.uid) {
            return Err(GraphError::InvalidHandle);
        }
        self.remove_edge_record(edge.uid);
        Ok(1)
    }

    /// The two endpoints of `edge`, in the order supplied to the creating
    /// call.
    pub fn endpoints(&self, edge: Edge) -> Result<(Node, Node), GraphError> {
        let record = self.edge_record(edge)?;
        Ok((
            Node {
                graph: self.id,
                uid: record.a,
            },
            Node {
                graph: self.id,
                uid: record.b,
            },
        ))
    }

    /// Current compact index of `edge`, in `[0, num_edges())`.
    pub fn edge_index_of(&self, edge: Edge) -> Result<usize, GraphError> {
        Ok(self.edge_record(edge)?.index)
    }

    /// Payload of `edge`.
    pub fn edge_value(&self, edge: Edge) -> Result<&E, GraphError> {
        Ok(&self.edge_record(edge)?.value)
    }

    /// Mutable payload of `edge`.
    pub fn edge_value_mut(&mut self, edge: Edge) -> Result<&mut E, GraphError> {
        Ok(&mut self.edge_record_mut(edge)?.value)
    }

    /// Euclidean distance between the endpoint positions of `edge`.
    pub fn length(&self, edge: Edge) -> Result<f64, GraphError> {
        let record = self.edge_record(edge)?;
        let a = self.nodes[record.a].position;
        let b = self.nodes[record.b].position;
        Ok(nalgebra::distance(&a, &b))
    }

    // ITERATION

    /// Iterate over all nodes in compact-index order.
    ///
    /// ```
    /// use trellis_graph::{Graph, Point};
    ///
    /// let mut graph: Graph<i32, ()> = Graph::new();
    /// for i in 0..3 {
    ///     graph.add_node(Point::new(i as f64, 0.0, 0.0), i);
    /// }
    ///
    /// let indices: Vec<usize> = graph
    ///     .nodes()
    ///     .map(|node| graph.index_of(node).unwrap())
    ///     .collect();
    /// assert_eq!(indices, vec![0, 1, 2]);
    /// ```
    pub fn nodes(&self) -> Nodes<'_, V, E> {
        Nodes::new(self)
    }

    /// Iterate over all edges in compact-index order.
    pub fn edges(&self) -> Edges<'_, V, E> {
        Edges::new(self)
    }

    /// Iterate over the edges incident to `node`, each exactly once, in a
    /// fixed order for a given snapshot of the graph.
    pub fn incident_edges(&self, node: Node) -> Result<IncidentEdges<'_, V, E>, GraphError> {
        self.node_record(node)?;
        Ok(IncidentEdges::new(self, node.uid))
    }

    // INTERNALS

    fn node_record(&self, node: Node) -> Result<&NodeRecord<V>, GraphError> {
        if node.graph != self.id {
            return Err(GraphError::InvalidHandle);
        }
        self.nodes.get(node.uid).ok_or(GraphError::InvalidHandle)
    }

    fn node_record_mut(&mut self, node: Node) -> Result<&mut NodeRecord<V>, GraphError> {
        if node.graph != self.id {
            return Err(GraphError::InvalidHandle);
        }
        self.nodes.get_mut(node.uid).ok_or(GraphError::InvalidHandle)
    }

    fn edge_record(&self, edge: Edge) -> Result<&EdgeRecord<E>, GraphError> {
        if edge.graph != self.id {
            return Err(GraphError::InvalidHandle);
        }
        self.edges.get(edge.uid).ok_or(GraphError::InvalidHandle)
    }

    fn edge_record_mut(&mut self, edge: Edge) -> Result<&mut EdgeRecord<E>, GraphError> {
        if edge.graph != self.id {
            return Err(GraphError::InvalidHandle);
        }
        self.edges.get_mut(edge.uid).ok_or(GraphError::InvalidHandle)
    }

    /// Build a handle for a live edge uid, endpoints in creation order.
    pub(crate) fn edge_handle(&self, uid: EdgeUid) -> Edge {
        let record = &self.edges[uid];
        Edge {
            graph: self.id,
            uid,
            a: record.a,
            b: record.b,
        }
    }

    pub(crate) fn incident_at(&self, node: NodeUid, position: usize) -> Option<EdgeUid> {
        self.adjacency.incident_at(node, position)
    }

    /// Remove a live edge record: recompact the edge index table and erase
    /// both adjacency directions.
    fn remove_edge_record(&mut self, uid: EdgeUid) {
        if let Some(record) = self.edges.remove(uid) {
            self.adjacency.unlink(record.a, record.b);
        }
    }
}
