use tracing::debug;

use crate::config::ToolpathConfig;
use crate::error::{GeometryError, Result};
use crate::math::{LineSegment2, Point2};

/// Standoff points placed before and after a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadPoints {
    /// Where the head starts, behind the first point along the first edge.
    pub start: Point2,
    /// Where the head stops, past the last point along the last edge.
    pub stop: Point2,
}

/// Computes lead-in and lead-out points for a traversal.
///
/// The lead-in point sits `lead_in` behind the first point, against the
/// direction of the first edge. The lead-out point sits `lead_out` past the
/// last point, along the direction of the last edge.
pub struct LeadInOut {
    lead_in: f64,
    lead_out: f64,
}

impl LeadInOut {
    /// Creates a new `LeadInOut` operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if either distance is negative or
    /// not finite.
    ///
    /// [`ConfigError::Invalid`]: crate::error::ConfigError::Invalid
    pub fn new(lead_in: f64, lead_out: f64) -> Result<Self> {
        Self::from_config(&ToolpathConfig::new(lead_in, lead_out))
    }

    /// Creates the operation from the lead distances of `config`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`ToolpathConfig::validate`].
    pub fn from_config(config: &ToolpathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lead_in: config.lead_in,
            lead_out: config.lead_out,
        })
    }

    /// Executes the operation over the points of a traversal, in order.
    ///
    /// Pass an open path's `iter()` or `iter_rev()`, or a loop path.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for fewer than two points and
    /// [`GeometryError::ZeroVector`] if the first or last edge has zero length.
    pub fn execute<I>(&self, points: I) -> Result<LeadPoints>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut points = points.into_iter();
        let (Some(a), Some(b)) = (points.next(), points.next()) else {
            debug!("lead-in/out requested for fewer than two points");
            return Err(GeometryError::Degenerate(
                "lead-in/out needs at least two points".into(),
            )
            .into());
        };

        let (mut c, mut d) = (a, b);
        for p in points {
            c = d;
            d = p;
        }

        let first = LineSegment2::new(a, b).direction()?;
        let last = LineSegment2::new(c, d).direction()?;

        Ok(LeadPoints {
            start: a - first * self.lead_in,
            stop: d + last * self.lead_out,
        })
    }
}
