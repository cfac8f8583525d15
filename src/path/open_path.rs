use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::{LineSegment2, Point2};
use crate::topology::NodeId;

use super::cursor::{self, Cursor, Direction, PointGraph, Points};
use super::entry::EntryExit;

/// A linear point sequence with a head and a tail, such as one infill stroke.
///
/// The head has no reverse neighbor and the tail has no forward neighbor.
/// An open path is always printed end to end, so only the two boundary
/// points are entry points.
#[derive(Debug, Clone, Default)]
pub struct OpenPath {
    graph: PointGraph,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl OpenPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty path that holds at most `limit` points.
    #[must_use]
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            graph: PointGraph::with_node_limit(limit),
            ..Self::default()
        }
    }

    /// Builds a path from points in order.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut path = Self::new();
        path.append_points(points)?;
        Ok(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.head = None;
        self.tail = None;
    }

    // --- Mutation ---

    /// Extends the path past its tail.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted; the path is unchanged.
    pub fn append_point(&mut self, p: Point2) -> Result<Cursor> {
        let n = self.graph.create_node(p)?;
        match self.tail {
            Some(t) => cursor::link(&mut self.graph, t, n)?,
            None => self.head = Some(n),
        }
        self.tail = Some(n);
        Ok(Cursor::at(n, Direction::Forward))
    }

    /// Extends the path before its head.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted; the path is unchanged.
    pub fn prepend_point(&mut self, p: Point2) -> Result<Cursor> {
        let n = self.graph.create_node(p)?;
        match self.head {
            Some(h) => cursor::link(&mut self.graph, n, h)?,
            None => self.tail = Some(n),
        }
        self.head = Some(n);
        Ok(Cursor::at(n, Direction::Forward))
    }

    /// Appends a copy of `points` after the tail, in the order the iterator
    /// yields them. Passing another path's `iter_rev()` appends it reversed.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted. Points appended by this
    /// call are removed again before returning, leaving the path as it was.
    pub fn append_points<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point2>,
    {
        let old_head = self.head;
        let old_tail = self.tail;
        let mut added = Vec::new();
        for p in points {
            match self.append_point(p) {
                Ok(c) => added.extend(c.node()),
                Err(e) => {
                    for id in added {
                        self.graph.destroy_node(id)?;
                    }
                    self.head = old_head;
                    self.tail = old_tail;
                    return Err(e);
                }
            }
        }
        debug!(appended = added.len(), len = self.len(), "points spliced onto path");
        Ok(())
    }

    /// Inserts `p` directly after `after` in forward order.
    ///
    /// # Errors
    ///
    /// Returns an error if `after` is stale or the end sentinel, or if node
    /// storage is exhausted.
    pub fn insert_point(&mut self, p: Point2, after: Cursor) -> Result<Cursor> {
        let a = after.require_node()?;
        let next = self.graph.first_forward(a)?;
        let n = self.graph.create_node(p)?;
        if let Some(b) = next {
            self.graph.disconnect(a, b)?;
            cursor::link(&mut self.graph, n, b)?;
        } else {
            self.tail = Some(n);
        }
        cursor::link(&mut self.graph, a, n)?;
        Ok(Cursor::at(n, after.direction()))
    }

    /// Removes the point under `at`, joining its neighbors.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn remove_point(&mut self, at: Cursor) -> Result<Point2> {
        let node = at.require_node()?;
        let prev = self.graph.first_reverse(node)?;
        let next = self.graph.first_forward(node)?;
        let p = self.graph.destroy_node(node)?;
        match (prev, next) {
            (Some(a), Some(b)) => cursor::link(&mut self.graph, a, b)?,
            (None, _) => self.head = next,
            (_, None) => self.tail = prev,
        }
        if prev.is_none() && next.is_none() {
            self.tail = None;
        }
        debug!(x = p.x, y = p.y, len = self.len(), "point removed from path");
        Ok(p)
    }

    // --- Traversal ---

    /// Forward cursor at the head.
    #[must_use]
    pub fn from_start(&self) -> Cursor {
        Cursor::from_option(self.head, Direction::Forward)
    }

    /// Reverse cursor at the tail.
    #[must_use]
    pub fn from_end(&self) -> Cursor {
        Cursor::from_option(self.tail, Direction::Reverse)
    }

    /// Sentinel one past the tail.
    #[must_use]
    pub fn end(&self) -> Cursor {
        Cursor::end(Direction::Forward)
    }

    /// Sentinel one before the head.
    #[must_use]
    pub fn rend(&self) -> Cursor {
        Cursor::end(Direction::Reverse)
    }

    /// Point under `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn point(&self, at: Cursor) -> Result<Point2> {
        cursor::point_at(&self.graph, at)
    }

    /// Moves `at` one step in its direction; stepping off a boundary yields
    /// the end sentinel.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or already the end sentinel.
    pub fn advance(&self, at: Cursor) -> Result<Cursor> {
        cursor::step(&self.graph, at)
    }

    /// Segment from the point under `at` to its forward neighbor.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoSuccessor`] at the tail, or an error if
    /// `at` is stale or the end sentinel.
    pub fn segment_after_point(&self, at: Cursor) -> Result<LineSegment2> {
        cursor::segment_after(&self.graph, at)
    }

    /// Points from head to tail.
    #[must_use]
    pub fn iter(&self) -> Points<'_> {
        Points::new(&self.graph, self.from_start())
    }

    /// Points from tail to head.
    #[must_use]
    pub fn iter_rev(&self) -> Points<'_> {
        Points::new(&self.graph, self.from_end())
    }

    /// Returns a reversed copy of this path with the same node limit.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted.
    pub fn reversed(&self) -> Result<Self> {
        let mut copy = match self.graph.node_limit() {
            Some(limit) => Self::with_node_limit(limit),
            None => Self::new(),
        };
        copy.append_points(self.iter_rev())?;
        Ok(copy)
    }

    /// Total length from head to tail, summed from the cached edge costs.
    #[must_use]
    pub fn length(&self) -> f64 {
        let mut total = 0.0;
        let mut node = self.head;
        while let Some(a) = node {
            let next = self.graph.first_forward(a).ok().flatten();
            if let Some(b) = next {
                total += self.graph.cost(a, b).ok().flatten().copied().unwrap_or(0.0);
            }
            node = next;
        }
        total
    }

    fn boundary_points(&self) -> Option<(Point2, Point2)> {
        let head = self.graph.data(self.head?).ok()?;
        let tail = self.graph.data(self.tail?).ok()?;
        Some((*head, *tail))
    }
}

impl EntryExit for OpenPath {
    fn entry_points(&self) -> Vec<Point2> {
        match (self.head, self.boundary_points()) {
            (Some(h), Some((head, tail))) if Some(h) != self.tail => vec![head, tail],
            (_, Some((head, _))) => vec![head],
            _ => Vec::new(),
        }
    }

    fn exit_point(&self, entry: &Point2) -> Result<Point2> {
        match self.boundary_points() {
            Some((head, tail)) if head == *entry => Ok(tail),
            Some((head, tail)) if tail == *entry => Ok(head),
            _ => {
                debug!(x = entry.x, y = entry.y, "exit requested for non-boundary point");
                Err(TopologyError::not_a_boundary(entry).into())
            }
        }
    }
}

impl<'a> IntoIterator for &'a OpenPath {
    type Item = Point2;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Points<'a> {
        self.iter()
    }
}
