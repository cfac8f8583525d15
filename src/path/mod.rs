//! Path kinds built on the topology graph.
//!
//! [`OpenPath`] is a linear stroke entered and left at its two ends.
//! [`Loop`] is a closed ring entered anywhere; a [`LoopPath`] bounds one
//! revolution of it around a chosen seam.

mod contour;
mod cursor;
mod entry;
mod loop_path;
mod open_path;

pub use contour::{Loop, Walk};
pub use cursor::{Cursor, Direction, Points};
pub use entry::EntryExit;
pub use loop_path::{LoopPath, LoopPathIter};
pub use open_path::OpenPath;
