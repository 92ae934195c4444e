//! Core trait for the route engine's distance seam.
//!
//! The engine only ever needs leg distances between two blocks. Concrete
//! providers decide how to compute and memoize them; tests can substitute a
//! synthetic metric.

use crate::block::Block;

/// Provides the distance in kilometers between two blocks.
///
/// Takes `&mut self` so implementations can memoize across calls.
pub trait DistanceProvider {
    fn leg_km(&mut self, from: &Block, to: &Block) -> f64;
}
