mod node;

pub use node::{CostId, NodeId};

use node::NodeSlot;
use slotmap::SlotMap;
use tracing::trace;

use crate::error::{ResourceError, Result, TopologyError};

/// Slot-recycling directed graph shared by open paths and loops.
///
/// Nodes and edge costs live in two generational arenas. Destroyed slots go
/// back to the arenas' free lists and are handed out again before either
/// arena grows, so storage is bounded by the peak number of live entries.
///
/// The graph puts no limit on how many forward or reverse links a node has;
/// path kinds built on top of it enforce their own shape.
#[derive(Debug, Clone)]
pub struct Graph<T, C> {
    nodes: SlotMap<NodeId, NodeSlot<T>>,
    costs: SlotMap<CostId, C>,
    node_limit: Option<usize>,
}

impl<T, C> Default for Graph<T, C> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            costs: SlotMap::with_key(),
            node_limit: None,
        }
    }
}

impl<T, C> Graph<T, C> {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph that refuses to hold more than `limit` live nodes.
    #[must_use]
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            node_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The live-node limit set by [`Graph::with_node_limit`], if any.
    #[must_use]
    pub fn node_limit(&self) -> Option<usize> {
        self.node_limit
    }

    /// Number of node slots the graph can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if `id` refers to a live node of this graph.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // --- Node lifecycle ---

    /// Allocates a node holding `data`, reusing a freed slot when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Exhausted`] if the node limit is reached.
    /// Nothing is allocated in that case.
    pub fn create_node(&mut self, data: T) -> Result<NodeId> {
        if let Some(limit) = self.node_limit {
            if self.nodes.len() >= limit {
                return Err(ResourceError::Exhausted { limit }.into());
            }
        }
        let id = self.nodes.insert(NodeSlot::new(data));
        trace!(?id, live = self.nodes.len(), "node created");
        Ok(id)
    }

    /// Destroys a node, unlinking it from every neighbor and releasing its
    /// cost slots. Returns the node's payload.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<T> {
        let slot = self.nodes.remove(id).ok_or(TopologyError::StaleNode)?;
        for (&other, &cost) in &slot.forward {
            if let Some(n) = self.nodes.get_mut(other) {
                n.reverse.remove(&id);
            }
            self.costs.remove(cost);
        }
        for (&other, &cost) in &slot.reverse {
            if let Some(n) = self.nodes.get_mut(other) {
                n.forward.remove(&id);
            }
            // Self-links share one cost slot that was already released above.
            self.costs.remove(cost);
        }
        trace!(?id, live = self.nodes.len(), "node destroyed");
        Ok(slot.data)
    }

    /// Releases every node and cost.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.costs.clear();
    }

    // --- Adjacency ---

    /// Links `a → b` with `cost`. Reconnecting a linked pair overwrites its cost.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if either node is not live.
    pub fn connect(&mut self, a: NodeId, b: NodeId, cost: C) -> Result<()> {
        if !self.nodes.contains_key(b) {
            return Err(TopologyError::StaleNode.into());
        }
        let existing = self.slot(a)?.forward.get(&b).copied();
        if let Some(cid) = existing {
            if let Some(c) = self.costs.get_mut(cid) {
                *c = cost;
                return Ok(());
            }
        }
        let cid = self.costs.insert(cost);
        self.slot_mut(a)?.forward.insert(b, cid);
        self.slot_mut(b)?.reverse.insert(a, cid);
        Ok(())
    }

    /// Links `a → b`, computing the cost from the two payloads.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if either node is not live.
    pub fn connect_with<F>(&mut self, a: NodeId, b: NodeId, cost_fn: F) -> Result<()>
    where
        F: FnOnce(&T, &T) -> C,
    {
        let cost = cost_fn(self.data(a)?, self.data(b)?);
        self.connect(a, b, cost)
    }

    /// Removes the link `a → b`. Does nothing if the pair is not linked.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if either node is not live.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        if !self.nodes.contains_key(b) {
            return Err(TopologyError::StaleNode.into());
        }
        let removed = self.slot_mut(a)?.forward.remove(&b);
        if let Some(cid) = removed {
            self.slot_mut(b)?.reverse.remove(&a);
            self.costs.remove(cid);
        }
        Ok(())
    }

    // --- Access ---

    /// Returns the payload of a node.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn data(&self, id: NodeId) -> Result<&T> {
        Ok(&self.slot(id)?.data)
    }

    /// Returns the cached cost of `a → b`, or `None` if they are not linked.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `a` is not live.
    pub fn cost(&self, a: NodeId, b: NodeId) -> Result<Option<&C>> {
        Ok(self
            .slot(a)?
            .forward
            .get(&b)
            .and_then(|&cid| self.costs.get(cid)))
    }

    /// Iterates the links leaving `id` as `(neighbor, cost)`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn forward_links(&self, id: NodeId) -> Result<impl Iterator<Item = (NodeId, &C)> + '_> {
        let slot = self.slot(id)?;
        Ok(slot
            .forward
            .iter()
            .filter_map(|(&n, &cid)| self.costs.get(cid).map(|c| (n, c))))
    }

    /// Iterates the links arriving at `id` as `(neighbor, cost)`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn reverse_links(&self, id: NodeId) -> Result<impl Iterator<Item = (NodeId, &C)> + '_> {
        let slot = self.slot(id)?;
        Ok(slot
            .reverse
            .iter()
            .filter_map(|(&n, &cid)| self.costs.get(cid).map(|c| (n, c))))
    }

    /// First forward neighbor of `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn first_forward(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.slot(id)?.forward.keys().next().copied())
    }

    /// First reverse neighbor of `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::StaleNode`] if `id` is not live.
    pub fn first_reverse(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.slot(id)?.reverse.keys().next().copied())
    }

    /// Iterates all live nodes in storage order.
    ///
    /// Storage order matches creation order until a freed slot is reused.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.nodes.iter().map(|(id, slot)| (id, &slot.data))
    }

    /// Iterates all live nodes in reverse storage order.
    pub fn iter_rev(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        let mut live: Vec<_> = self.iter().collect();
        live.reverse();
        live.into_iter()
    }

    fn slot(&self, id: NodeId) -> Result<&NodeSlot<T>> {
        self.nodes
            .get(id)
            .ok_or_else(|| TopologyError::StaleNode.into())
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut NodeSlot<T>> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TopologyError::StaleNode.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ToolpathError;

    fn chain(n: usize) -> (Graph<u32, f64>, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids: Vec<NodeId> = (0..n)
            .map(|i| g.create_node(u32::try_from(i).unwrap()).unwrap())
            .collect();
        for w in ids.windows(2) {
            g.connect(w[0], w[1], 1.0).unwrap();
        }
        (g, ids)
    }

    #[test]
    fn create_and_count() {
        let (g, ids) = chain(3);
        assert_eq!(g.count(), 3);
        assert!(!g.is_empty());
        assert_eq!(*g.data(ids[2]).unwrap(), 2);
    }

    #[test]
    fn connect_records_both_directions() {
        let (g, ids) = chain(2);
        let fwd: Vec<_> = g.forward_links(ids[0]).unwrap().collect();
        let rev: Vec<_> = g.reverse_links(ids[1]).unwrap().collect();
        assert_eq!(fwd, vec![(ids[1], &1.0)]);
        assert_eq!(rev, vec![(ids[0], &1.0)]);
        assert_eq!(g.first_reverse(ids[0]).unwrap(), None);
    }

    #[test]
    fn reconnect_overwrites_cost() {
        let (mut g, ids) = chain(2);
        g.connect(ids[0], ids[1], 7.5).unwrap();
        assert_eq!(g.cost(ids[0], ids[1]).unwrap(), Some(&7.5));
        assert_eq!(g.forward_links(ids[0]).unwrap().count(), 1);
        let rev: Vec<_> = g.reverse_links(ids[1]).unwrap().collect();
        assert_eq!(rev, vec![(ids[0], &7.5)]);
    }

    #[test]
    fn connect_with_computes_cost_from_payloads() {
        let mut g: Graph<u32, u32> = Graph::new();
        let a = g.create_node(3).unwrap();
        let b = g.create_node(10).unwrap();
        g.connect_with(a, b, |x, y| y - x).unwrap();
        assert_eq!(g.cost(a, b).unwrap(), Some(&7));
    }

    #[test]
    fn disconnect_removes_both_directions() {
        let (mut g, ids) = chain(2);
        g.disconnect(ids[0], ids[1]).unwrap();
        assert_eq!(g.first_forward(ids[0]).unwrap(), None);
        assert_eq!(g.first_reverse(ids[1]).unwrap(), None);
        // Second disconnect is a no-op.
        g.disconnect(ids[0], ids[1]).unwrap();
    }

    #[test]
    fn destroy_unlinks_neighbors() {
        let (mut g, ids) = chain(3);
        assert_eq!(g.destroy_node(ids[1]).unwrap(), 1);
        assert_eq!(g.count(), 2);
        assert_eq!(g.first_forward(ids[0]).unwrap(), None);
        assert_eq!(g.first_reverse(ids[2]).unwrap(), None);
    }

    #[test]
    fn destroy_self_linked_node() {
        let mut g: Graph<u32, f64> = Graph::new();
        let a = g.create_node(1).unwrap();
        g.connect(a, a, 0.0).unwrap();
        g.destroy_node(a).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn destroyed_slot_is_reused_and_stale_id_rejected() {
        let (mut g, ids) = chain(3);
        let capacity = g.capacity();
        let count = g.count();

        g.destroy_node(ids[1]).unwrap();
        let fresh = g.create_node(42).unwrap();

        assert_eq!(g.count(), count);
        assert_eq!(g.capacity(), capacity);
        assert_ne!(fresh, ids[1]);
        assert!(!g.contains(ids[1]));
        assert!(matches!(
            g.data(ids[1]),
            Err(ToolpathError::Topology(TopologyError::StaleNode))
        ));
        assert!(g.destroy_node(ids[1]).is_err());
    }

    #[test]
    fn connect_to_stale_node_fails_without_side_effects() {
        let (mut g, ids) = chain(2);
        g.destroy_node(ids[1]).unwrap();
        assert!(g.connect(ids[0], ids[1], 1.0).is_err());
        assert_eq!(g.forward_links(ids[0]).unwrap().count(), 0);
    }

    #[test]
    fn node_limit_reports_exhaustion() {
        let mut g: Graph<u32, f64> = Graph::with_node_limit(2);
        assert_eq!(g.node_limit(), Some(2));
        assert_eq!(Graph::<u32, f64>::new().node_limit(), None);
        g.create_node(0).unwrap();
        let b = g.create_node(1).unwrap();
        assert!(matches!(
            g.create_node(2),
            Err(ToolpathError::Resource(ResourceError::Exhausted { limit: 2 }))
        ));
        assert_eq!(g.count(), 2);
        g.destroy_node(b).unwrap();
        assert!(g.create_node(3).is_ok());
    }

    #[test]
    fn iteration_in_both_orders() {
        let (g, _) = chain(4);
        let fwd: Vec<u32> = g.iter().map(|(_, d)| *d).collect();
        let rev: Vec<u32> = g.iter_rev().map(|(_, d)| *d).collect();
        assert_eq!(fwd, vec![0, 1, 2, 3]);
        assert_eq!(rev, vec![3, 2, 1, 0]);
    }

    #[test]
    fn clear_resets() {
        let (mut g, ids) = chain(3);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.count(), 0);
        assert!(!g.contains(ids[0]));
    }
}
