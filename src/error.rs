//! Error types for visibility queries.

use thiserror::Error;

/// Errors that can occur while building a visibility polygon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SightlineError {
    /// No region has been set, or the region has no loops.
    #[error("region is empty: no boundary loops to sweep")]
    EmptyRegion,

    /// Fewer than three ray directions survived the sweep, so no closed
    /// polygon can be formed. Callers should treat this as "fully occluded
    /// or no valid region" rather than as a fault.
    #[error("degenerate output: only {rays} ray directions resolved (need 3)")]
    DegenerateOutput {
        /// Number of ray directions that survived the sweep.
        rays: usize,
    },
}
