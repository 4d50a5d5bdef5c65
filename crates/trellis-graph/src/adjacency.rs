//! Symmetric neighbor bookkeeping.
//!
//! Each node owns a bucket mapping neighbor uid to the uid of the connecting
//! edge. Buckets are kept symmetric at all times: `bucket(a)[b]` and
//! `bucket(b)[a]` either both name the same edge or both are absent. The
//! bucket doubles as the existence oracle for [`Graph::has_edge`] and as the
//! source of truth for incident-edge enumeration.
//!
//! [`Graph::has_edge`]: crate::Graph::has_edge
use crate::{EdgeUid, NodeUid};
use slotmap::SecondaryMap;
use std::collections::BTreeMap;

/// Per-node adjacency buckets, keyed by node uid.
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    buckets: SecondaryMap<NodeUid, BTreeMap<NodeUid, EdgeUid>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the empty bucket for a freshly added node.
    pub fn insert_node(&mut self, node: NodeUid) {
        self.buckets.insert(node, BTreeMap::new());
    }

    /// Drop a node's bucket. Callers remove the node's incident edges first,
    /// so the bucket is empty by the time this runs.
    pub fn remove_node(&mut self, node: NodeUid) {
        self.buckets.remove(node);
    }

    /// Edge connecting `a` and `b`, if one exists. O(log degree(a)).
    pub fn edge_between(&self, a: NodeUid, b: NodeUid) -> Option<EdgeUid> {
        self.buckets.get(a)?.get(&b).copied()
    }

    /// Record `edge` in both directions.
    pub fn link(&mut self, a: NodeUid, b: NodeUid, edge: EdgeUid) {
        self.buckets[a].insert(b, edge);
        self.buckets[b].insert(a, edge);
    }

    /// Erase the `a`/`b` entry in both directions.
    pub fn unlink(&mut self, a: NodeUid, b: NodeUid) {
        if let Some(bucket) = self.buckets.get_mut(a) {
            bucket.remove(&b);
        }
        if let Some(bucket) = self.buckets.get_mut(b) {
            bucket.remove(&a);
        }
    }

    /// Number of edges incident to `node`.
    pub fn degree(&self, node: NodeUid) -> usize {
        self.buckets.get(node).map_or(0, BTreeMap::len)
    }

    /// Edge uid at ordinal `position` within `node`'s bucket, in neighbor-uid
    /// order.
    pub fn incident_at(&self, node: NodeUid, position: usize) -> Option<EdgeUid> {
        let bucket = self.buckets.get(node)?;
        bucket.values().nth(position).copied()
    }

    /// Snapshot of the edges incident to `node`, safe to iterate while the
    /// live bucket is being unlinked underneath.
    pub fn incident_snapshot(&self, node: NodeUid) -> Vec<EdgeUid> {
        self.buckets
            .get(node)
            .map_or_else(Vec::new, |bucket| bucket.values().copied().collect())
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
