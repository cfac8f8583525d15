use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::{LineSegment2, Point2};
use crate::topology::NodeId;

use super::cursor::{self, Cursor, Direction, PointGraph};
use super::entry::EntryExit;
use super::loop_path::LoopPath;

/// A closed ring of points, such as one printed contour.
///
/// Every node has exactly one forward (clockwise) and one reverse
/// (counter-clockwise) neighbor. A single-point loop links to itself.
/// Traversal never runs out on its own; [`LoopPath`] gives a bounded view.
#[derive(Debug, Clone, Default)]
pub struct Loop {
    graph: PointGraph,
    start: Option<NodeId>,
}

impl Loop {
    /// Creates an empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty loop that holds at most `limit` points.
    #[must_use]
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            graph: PointGraph::with_node_limit(limit),
            start: None,
        }
    }

    /// Creates a single-point loop linked to itself.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted.
    pub fn from_point(p: Point2) -> Result<Self> {
        let mut ring = Self::new();
        ring.seed(p)?;
        Ok(ring)
    }

    /// Builds a loop whose clockwise order is the order of `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if node storage is exhausted.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut ring = Self::new();
        let mut at = ring.clockwise_end();
        for p in points {
            at = ring.insert_point(p, at)?;
        }
        Ok(ring)
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
        self.start = None;
    }

    // --- Mutation ---

    /// Inserts `p` directly after `after` in clockwise order and returns a
    /// cursor on the new point with the direction of `after`.
    ///
    /// Inserting at the end sentinel of an empty loop seeds the ring.
    ///
    /// # Errors
    ///
    /// Returns an error if `after` is stale, if it is the end sentinel of a
    /// non-empty loop, or if node storage is exhausted.
    pub fn insert_point(&mut self, p: Point2, after: Cursor) -> Result<Cursor> {
        if after.is_end() && self.is_empty() {
            let n = self.seed(p)?;
            return Ok(Cursor::at(n, after.direction()));
        }
        let a = after.require_node()?;
        let b = self
            .graph
            .first_forward(a)?
            .ok_or(TopologyError::NoSuccessor)?;
        let n = self.graph.create_node(p)?;
        self.graph.disconnect(a, b)?;
        cursor::link(&mut self.graph, a, n)?;
        cursor::link(&mut self.graph, n, b)?;
        Ok(Cursor::at(n, after.direction()))
    }

    /// Removes the point under `at` and closes the ring over the gap.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn remove_point(&mut self, at: Cursor) -> Result<Point2> {
        let node = at.require_node()?;
        let prev = self.graph.first_reverse(node)?;
        let next = self.graph.first_forward(node)?;
        let p = self.graph.destroy_node(node)?;
        if let (Some(a), Some(b)) = (prev, next) {
            if a != node {
                cursor::link(&mut self.graph, a, b)?;
            }
        }
        if self.start == Some(node) {
            self.start = if self.is_empty() { None } else { next };
        }
        debug!(x = p.x, y = p.y, len = self.len(), "point removed from loop");
        Ok(p)
    }

    fn seed(&mut self, p: Point2) -> Result<NodeId> {
        let n = self.graph.create_node(p)?;
        cursor::link(&mut self.graph, n, n)?;
        self.start = Some(n);
        Ok(n)
    }

    // --- Traversal ---

    /// Clockwise cursor at the ring's first point.
    #[must_use]
    pub fn clockwise(&self) -> Cursor {
        Cursor::from_option(self.start, Direction::Forward)
    }

    /// Clockwise cursor at the point equal to `p`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::PointNotFound`] if no point equals `p`.
    pub fn clockwise_at(&self, p: &Point2) -> Result<Cursor> {
        self.locate(p, Direction::Forward)
    }

    /// Counter-clockwise cursor at the ring's first point.
    #[must_use]
    pub fn counter_clockwise(&self) -> Cursor {
        Cursor::from_option(self.start, Direction::Reverse)
    }

    /// Counter-clockwise cursor at the point equal to `p`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::PointNotFound`] if no point equals `p`.
    pub fn counter_clockwise_at(&self, p: &Point2) -> Result<Cursor> {
        self.locate(p, Direction::Reverse)
    }

    #[must_use]
    pub fn clockwise_end(&self) -> Cursor {
        Cursor::end(Direction::Forward)
    }

    #[must_use]
    pub fn counter_clockwise_end(&self) -> Cursor {
        Cursor::end(Direction::Reverse)
    }

    fn locate(&self, p: &Point2, direction: Direction) -> Result<Cursor> {
        match cursor::find(&self.graph, p) {
            Some(id) => Ok(Cursor::at(id, direction)),
            None => {
                debug!(x = p.x, y = p.y, "point not on loop");
                Err(TopologyError::point_not_found(p).into())
            }
        }
    }

    /// Point under `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn point(&self, at: Cursor) -> Result<Point2> {
        cursor::point_at(&self.graph, at)
    }

    /// Moves `at` one step around the ring in its direction.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn advance(&self, at: Cursor) -> Result<Cursor> {
        cursor::step(&self.graph, at)
    }

    /// Segment from the point under `at` to its clockwise neighbor.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is stale or the end sentinel.
    pub fn segment_after_point(&self, at: Cursor) -> Result<LineSegment2> {
        cursor::segment_after(&self.graph, at)
    }

    /// Unbounded walk around the ring starting at `from`.
    ///
    /// Stops only if `from` is stale or the end sentinel.
    #[must_use]
    pub fn walk(&self, from: Cursor) -> Walk<'_> {
        Walk {
            ring: self,
            cursor: from,
        }
    }

    /// Every ring point once, in storage order.
    pub fn entries(&self) -> impl Iterator<Item = Point2> + '_ {
        self.graph.iter().map(|(_, p)| *p)
    }

    /// Bounded traversal that starts and ends at `seam`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::PointNotFound`] if `seam` is not on the loop.
    pub fn loop_path(&self, seam: &Point2) -> Result<LoopPath<'_>> {
        LoopPath::new(self, self.clockwise_at(seam)?, self.counter_clockwise_at(seam)?)
    }

    /// Length of one full revolution, summed from the cached edge costs.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        let mut total = 0.0;
        let mut node = start;
        for _ in 0..self.len() {
            let Ok(Some(next)) = self.graph.first_forward(node) else {
                break;
            };
            total += self.graph.cost(node, next).ok().flatten().copied().unwrap_or(0.0);
            node = next;
        }
        total
    }
}

impl EntryExit for Loop {
    fn entry_points(&self) -> Vec<Point2> {
        self.entries().collect()
    }

    fn exit_point(&self, entry: &Point2) -> Result<Point2> {
        if cursor::find(&self.graph, entry).is_none() {
            return Err(TopologyError::point_not_found(entry).into());
        }
        Ok(*entry)
    }
}

/// Endless iterator around a [`Loop`], from [`Loop::walk`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    ring: &'a Loop,
    cursor: Cursor,
}

impl Iterator for Walk<'_> {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        let p = self.ring.point(self.cursor).ok()?;
        self.cursor = self.ring.advance(self.cursor).ok()?;
        Some(p)
    }
}
