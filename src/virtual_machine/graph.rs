//! Node registry and symmetric adjacency.
//!
//! Nodes live in an arena keyed by caller-visible integer ids. Adjacency is
//! stored as sets of ids on both endpoints, so a node never owns references to
//! its neighbors and destroying one is "purge the id everywhere, then remove it".
//!
//! Every mutation is idempotent and silently ignores ids that do not exist.

use std::collections::{BTreeMap, BTreeSet};

/// Caller-visible node identity.
pub type NodeId = i64;

/// Integer state held by a node.
pub type Value = i64;

/// A graph vertex: its value and the ids of its neighbors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    value: Value,
    neighbors: BTreeSet<NodeId>,
}

impl Node {
    /// Creates an unconnected node holding `value`.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            neighbors: BTreeSet::new(),
        }
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn neighbors(&self) -> &BTreeSet<NodeId> {
        &self.neighbors
    }
}

/// Undirected graph of integer-valued nodes.
///
/// Invariant: `a` lists `b` as a neighbor iff `b` lists `a`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn value(&self, id: NodeId) -> Option<Value> {
        self.nodes.get(&id).map(Node::value)
    }

    /// Node ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Neighbors of `id`, empty if the node does not exist.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|node| node.neighbors.iter().copied())
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes
            .get(&a)
            .is_some_and(|node| node.neighbors.contains(&b))
    }

    /// Overwrites the value of an existing node. Returns `false` if absent.
    pub fn set_value(&mut self, id: NodeId, value: Value) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.value = value;
                true
            }
            None => false,
        }
    }

    /// Adds `delta` to a node's value with wrapping arithmetic. Returns `false` if absent.
    pub fn adjust_value(&mut self, id: NodeId, delta: Value) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.value = node.value.wrapping_add(delta);
                true
            }
            None => false,
        }
    }

    /// Defines `id` with `value`, keeping its adjacency if it already exists.
    pub fn define(&mut self, id: NodeId, value: Value) {
        self.nodes.entry(id).or_default().value = value;
    }

    /// Inserts a node with value 0 unless `id` is taken.
    pub fn create(&mut self, id: NodeId) {
        self.nodes.entry(id).or_insert_with(|| Node::new(0));
    }

    /// Detaches and removes `id`.
    pub fn destroy(&mut self, id: NodeId) {
        self.disconnect_all(id);
        self.nodes.remove(&id);
    }

    /// Adds the edge `a`-`b` on both sides. No-op unless both nodes exist.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if !self.contains(a) || !self.contains(b) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbors.insert(b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.insert(a);
        }
    }

    /// Removes the edge `a`-`b` from both sides if present.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) {
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbors.remove(&b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.remove(&a);
        }
    }

    /// Removes `a` from every neighbor and clears its own adjacency.
    pub fn disconnect_all(&mut self, a: NodeId) {
        let Some(node) = self.nodes.get_mut(&a) else {
            return;
        };
        let neighbors = std::mem::take(&mut node.neighbors);
        for neighbor in neighbors {
            if let Some(other) = self.nodes.get_mut(&neighbor) {
                other.neighbors.remove(&a);
            }
        }
    }
}
