use crate::error::{Result, TopologyError};
use crate::math::{LineSegment2, Point2};
use crate::topology::{Graph, NodeId};

/// Node storage behind every path kind: points linked by cached distances.
pub(crate) type PointGraph = Graph<Point2, f64>;

/// Which neighbor a [`Cursor`] follows when advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follows forward (clockwise) links.
    Forward,
    /// Follows reverse (counter-clockwise) links.
    Reverse,
}

impl Direction {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// A traversal position inside an open path or loop.
///
/// Holds a node identifier plus a direction tag and is resolved against its
/// owner on every access. Inserting or removing other nodes leaves it valid;
/// destroying its own node makes every access fail with
/// [`TopologyError::StaleNode`].
///
/// Two cursors are equal when they sit on the same node, whatever their
/// direction. All end sentinels are equal to each other.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    node: Option<NodeId>,
    direction: Direction,
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Cursor {}

impl Cursor {
    pub(crate) fn at(node: NodeId, direction: Direction) -> Self {
        Self {
            node: Some(node),
            direction,
        }
    }

    pub(crate) fn end(direction: Direction) -> Self {
        Self {
            node: None,
            direction,
        }
    }

    pub(crate) fn from_option(node: Option<NodeId>, direction: Direction) -> Self {
        Self { node, direction }
    }

    /// Returns `true` for the one-past-the-last sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The node under the cursor, or `None` for the end sentinel.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Same position, opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            node: self.node,
            direction: self.direction.flipped(),
        }
    }

    pub(crate) fn require_node(&self) -> Result<NodeId> {
        self.node.ok_or_else(|| TopologyError::PastEnd.into())
    }
}

/// Links `a → b` with their Euclidean distance as cost.
pub(crate) fn link(graph: &mut PointGraph, a: NodeId, b: NodeId) -> Result<()> {
    graph.connect_with(a, b, |p, q| nalgebra::distance(p, q))
}

/// Point under `cursor`.
pub(crate) fn point_at(graph: &PointGraph, cursor: Cursor) -> Result<Point2> {
    graph.data(cursor.require_node()?).copied()
}

/// Moves `cursor` one step along its direction. A node without a neighbor in
/// that direction yields the end sentinel.
pub(crate) fn step(graph: &PointGraph, cursor: Cursor) -> Result<Cursor> {
    let node = cursor.require_node()?;
    let next = match cursor.direction {
        Direction::Forward => graph.first_forward(node)?,
        Direction::Reverse => graph.first_reverse(node)?,
    };
    Ok(Cursor::from_option(next, cursor.direction))
}

/// Segment from the node under `cursor` to its forward neighbor.
pub(crate) fn segment_after(graph: &PointGraph, cursor: Cursor) -> Result<LineSegment2> {
    let node = cursor.require_node()?;
    let next = graph
        .first_forward(node)?
        .ok_or(TopologyError::NoSuccessor)?;
    Ok(LineSegment2::new(*graph.data(node)?, *graph.data(next)?))
}

/// First live node whose point equals `p`.
pub(crate) fn find(graph: &PointGraph, p: &Point2) -> Option<NodeId> {
    graph.iter().find(|(_, q)| *q == p).map(|(id, _)| id)
}

/// Read-only iterator over the points of an open path, in either direction.
#[derive(Debug, Clone)]
pub struct Points<'a> {
    graph: &'a PointGraph,
    cursor: Cursor,
    remaining: usize,
}

impl<'a> Points<'a> {
    pub(crate) fn new(graph: &'a PointGraph, cursor: Cursor) -> Self {
        Self {
            graph,
            cursor,
            remaining: graph.count(),
        }
    }
}

impl Iterator for Points<'_> {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.remaining == 0 {
            return None;
        }
        let p = point_at(self.graph, self.cursor).ok()?;
        self.cursor = step(self.graph, self.cursor).ok()?;
        self.remaining -= 1;
        Some(p)
    }
}
