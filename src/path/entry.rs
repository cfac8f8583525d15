use crate::error::Result;
use crate::math::Point2;

/// Where traversal of a path kind may begin and where it then ends.
///
/// Open paths are entered at either end and left at the other. Loops may be
/// entered anywhere and are left where they were entered.
pub trait EntryExit {
    /// Points at which traversal may legally begin.
    fn entry_points(&self) -> Vec<Point2>;

    /// Point at which a traversal started at `entry` ends.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is not a legal entry point.
    fn exit_point(&self, entry: &Point2) -> Result<Point2>;

    /// Entry point closest to `from`, or `None` if there is none.
    fn nearest_entry(&self, from: &Point2) -> Option<Point2> {
        self.entry_points().into_iter().min_by(|a, b| {
            nalgebra::distance_squared(a, from).total_cmp(&nalgebra::distance_squared(b, from))
        })
    }
}
