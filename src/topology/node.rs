use std::collections::BTreeMap;

slotmap::new_key_type! {
    /// Unique, generation-tagged identifier for a node in a [`Graph`](super::Graph).
    ///
    /// Destroying a node bumps its slot's generation, so an identifier held
    /// across the destroy no longer resolves even after the slot is reused.
    pub struct NodeId;
}

slotmap::new_key_type! {
    /// Identifier for a cached edge cost, shared by both directions of a link.
    pub struct CostId;
}

/// Neighbor identifier to cost slot.
pub(crate) type AdjacencyMap = BTreeMap<NodeId, CostId>;

/// Storage for one node: its payload plus forward and reverse adjacency.
#[derive(Debug, Clone)]
pub(crate) struct NodeSlot<T> {
    pub(crate) data: T,
    /// Links that leave this node.
    pub(crate) forward: AdjacencyMap,
    /// Links that arrive at this node.
    pub(crate) reverse: AdjacencyMap,
}

impl<T> NodeSlot<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            data,
            forward: AdjacencyMap::new(),
            reverse: AdjacencyMap::new(),
        }
    }
}
