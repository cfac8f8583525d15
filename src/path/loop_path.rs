use crate::error::{Result, TopologyError};
use crate::math::Point2;

use super::contour::Loop;
use super::cursor::{Cursor, Direction};
use super::entry::EntryExit;

/// A finite traversal of a [`Loop`] that starts and ends at a chosen seam.
///
/// Walking forward yields the seam, every other ring point once in
/// clockwise order, then the seam again: `ring.len() + 1` points in total.
/// The view borrows the loop, so the loop cannot change while it is alive.
#[derive(Debug, Clone, Copy)]
pub struct LoopPath<'a> {
    ring: &'a Loop,
    cw: Cursor,
    ccw: Cursor,
}

impl<'a> LoopPath<'a> {
    /// Creates a view over `ring` from a clockwise and a counter-clockwise
    /// cursor that both sit on the seam.
    ///
    /// # Errors
    ///
    /// Returns an error if either cursor is stale, an end sentinel, runs in
    /// the wrong direction, or if the two cursors sit on different points.
    pub fn new(ring: &'a Loop, cw: Cursor, ccw: Cursor) -> Result<Self> {
        if cw.direction() != Direction::Forward {
            return Err(TopologyError::WrongDirection("seam cursor must run clockwise").into());
        }
        if ccw.direction() != Direction::Reverse {
            return Err(
                TopologyError::WrongDirection("seam cursor must run counter-clockwise").into(),
            );
        }
        ring.point(cw)?;
        ring.point(ccw)?;
        if cw != ccw {
            return Err(TopologyError::SeamMismatch.into());
        }
        Ok(Self { ring, cw, ccw })
    }

    /// The seam point, where the traversal starts and ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the seam node no longer exists.
    pub fn seam(&self) -> Result<Point2> {
        self.ring.point(self.cw)
    }

    /// Number of points a full traversal yields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len() + 1
    }

    /// Always `false`: a traversal visits the seam at least twice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Clockwise traversal from the seam back to the seam.
    #[must_use]
    pub fn from_start(&self) -> LoopPathIter<'a> {
        LoopPathIter {
            ring: self.ring,
            cursor: self.cw,
            remaining: self.len(),
        }
    }

    /// Counter-clockwise traversal from the seam back to the seam.
    #[must_use]
    pub fn from_end(&self) -> LoopPathIter<'a> {
        LoopPathIter {
            ring: self.ring,
            cursor: self.ccw,
            remaining: self.len(),
        }
    }

    /// The exhausted traversal that [`from_start`](Self::from_start)
    /// compares equal to once every position has been yielded.
    #[must_use]
    pub fn end(&self) -> LoopPathIter<'a> {
        LoopPathIter {
            ring: self.ring,
            cursor: self.cw,
            remaining: 0,
        }
    }

    #[must_use]
    pub fn iter(&self) -> LoopPathIter<'a> {
        self.from_start()
    }

    #[must_use]
    pub fn iter_rev(&self) -> LoopPathIter<'a> {
        self.from_end()
    }
}

impl EntryExit for LoopPath<'_> {
    fn entry_points(&self) -> Vec<Point2> {
        self.seam().into_iter().collect()
    }

    fn exit_point(&self, entry: &Point2) -> Result<Point2> {
        let seam = self.seam()?;
        if seam == *entry {
            Ok(seam)
        } else {
            Err(TopologyError::point_not_found(entry).into())
        }
    }
}

/// Iterator over a [`LoopPath`].
///
/// Termination is counted, not detected by position: the seam is visited
/// twice, so cursor identity alone cannot tell the first visit from the last.
#[derive(Debug, Clone)]
pub struct LoopPathIter<'a> {
    ring: &'a Loop,
    cursor: Cursor,
    remaining: usize,
}

impl LoopPathIter<'_> {
    /// Returns `true` once every position has been yielded.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.remaining == 0
    }
}

impl PartialEq for LoopPathIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ring, other.ring)
            && self.remaining == other.remaining
            && (self.remaining == 0 || self.cursor == other.cursor)
    }
}

impl Iterator for LoopPathIter<'_> {
    type Item = Point2;

    fn next(&mut self) -> Option<Point2> {
        if self.remaining == 0 {
            return None;
        }
        let p = self.ring.point(self.cursor).ok()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.cursor = self.ring.advance(self.cursor).ok()?;
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LoopPathIter<'_> {}

impl<'a> IntoIterator for LoopPath<'a> {
    type Item = Point2;
    type IntoIter = LoopPathIter<'a>;

    fn into_iter(self) -> LoopPathIter<'a> {
        self.from_start()
    }
}

impl<'a> IntoIterator for &LoopPath<'a> {
    type Item = Point2;
    type IntoIter = LoopPathIter<'a>;

    fn into_iter(self) -> LoopPathIter<'a> {
        self.from_start()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ToolpathError;
    use crate::path::OpenPath;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn two_point_ring_yields_three_positions() {
        let mut ring = Loop::from_point(p(1.0, 2.0)).unwrap();
        ring.insert_point(p(3.0, 4.0), ring.clockwise()).unwrap();

        let cw = ring.clockwise_at(&p(1.0, 2.0)).unwrap();
        let ccw = ring.counter_clockwise_at(&p(1.0, 2.0)).unwrap();
        assert_ne!(cw, ring.clockwise_end());
        assert_ne!(ccw, ring.counter_clockwise_end());

        let lp = LoopPath::new(&ring, cw, ccw).unwrap();
        let mut i = lp.from_start();
        assert_eq!(i.next(), Some(p(1.0, 2.0)));
        assert_eq!(i.next(), Some(p(3.0, 4.0)));
        assert!(i != lp.end());
        assert_eq!(i.next(), Some(p(1.0, 2.0)));
        assert!(i == lp.end());
        assert_eq!(i.next(), None);
    }

    #[test]
    fn three_point_ring_with_seam_at_first_point() {
        let ring = Loop::from_points([p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap();
        let lp = ring.loop_path(&p(0.0, 0.0)).unwrap();
        assert_eq!(lp.len(), 4);
        assert_eq!(lp.iter().len(), 4);
        assert_eq!(
            lp.iter().collect::<Vec<_>>(),
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(0.0, 0.0)]
        );

        let mut i = lp.from_start();
        assert_eq!(i.next(), Some(p(0.0, 0.0)));
        assert_eq!(i.next(), Some(p(1.0, 0.0)));
        assert_eq!(i.next(), Some(p(0.0, 1.0)));
        // Back on the seam node, but the closing position is still pending.
        assert!(i != lp.end());
        assert_eq!(i.next(), Some(p(0.0, 0.0)));
        assert!(i == lp.end());
        assert!(i.is_end());
        assert_eq!(i.next(), None);
    }

    #[test]
    fn seam_in_the_middle_and_reverse_traversal() {
        let ring = Loop::from_points([p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap();
        let lp = ring.loop_path(&p(1.0, 1.0)).unwrap();
        assert_eq!(
            lp.iter().collect::<Vec<_>>(),
            vec![p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]
        );
        assert_eq!(
            lp.iter_rev().collect::<Vec<_>>(),
            vec![p(1.0, 1.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)]
        );
        assert_eq!(lp.entry_points(), vec![p(1.0, 1.0)]);
        assert_eq!(lp.exit_point(&p(1.0, 1.0)).unwrap(), p(1.0, 1.0));
        assert!(lp.exit_point(&p(0.0, 0.0)).is_err());
    }

    #[test]
    fn single_point_ring_visits_seam_twice() {
        let ring = Loop::from_point(p(7.0, 7.0)).unwrap();
        let lp = ring.loop_path(&p(7.0, 7.0)).unwrap();
        assert_eq!(lp.iter().collect::<Vec<_>>(), vec![p(7.0, 7.0), p(7.0, 7.0)]);
    }

    #[test]
    fn mismatched_seam_cursors_are_rejected() {
        let ring = Loop::from_points([p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap();
        let cw = ring.clockwise_at(&p(0.0, 0.0)).unwrap();
        let ccw = ring.counter_clockwise_at(&p(1.0, 0.0)).unwrap();
        assert!(matches!(
            LoopPath::new(&ring, cw, ccw),
            Err(ToolpathError::Topology(TopologyError::SeamMismatch))
        ));
        assert!(matches!(
            LoopPath::new(&ring, ccw, cw),
            Err(ToolpathError::Topology(TopologyError::WrongDirection(_)))
        ));
        assert!(LoopPath::new(&ring, ring.clockwise_end(), ring.counter_clockwise_end()).is_err());
        assert!(ring.loop_path(&p(9.0, 9.0)).is_err());
    }

    #[test]
    fn open_path_joined_with_loop_path() {
        let open = OpenPath::from_points([p(1.0, 1.0), p(2.0, 2.0)]).unwrap();
        let mut ring = Loop::from_point(p(3.0, 3.0)).unwrap();
        let at = ring.insert_point(p(3.0, 4.0), ring.clockwise()).unwrap();
        ring.insert_point(p(4.0, 3.0), at).unwrap();

        let lp = ring.loop_path(&p(3.0, 3.0)).unwrap();
        let mut joined = OpenPath::new();
        joined.append_points(&open).unwrap();
        joined.append_points(&lp).unwrap();

        assert_eq!(
            joined.iter().collect::<Vec<_>>(),
            vec![
                p(1.0, 1.0),
                p(2.0, 2.0),
                p(3.0, 3.0),
                p(3.0, 4.0),
                p(4.0, 3.0),
                p(3.0, 3.0),
            ]
        );
        assert_eq!(ring.len(), 3);
    }
}
