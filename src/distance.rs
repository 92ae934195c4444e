//! Haversine distance with a canonical-pair memo cache.
//!
//! Great-circle distance over coordinates parsed at load time. Distance is
//! symmetric, so one cache slot serves both directions of a pair.

use std::collections::HashMap;

use crate::block::Block;
use crate::traits::DistanceProvider;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Memoized block-to-block distances.
///
/// Keyed by the numerically ordered id pair, so `(a, b)` and `(b, a)` share a
/// slot. Coordinates are immutable once loaded; entries stay valid until the
/// owner reloads the block set and calls [`DistanceCache::clear`].
#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    entries: HashMap<(u32, u32), f64>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance in kilometers between two blocks, computed at most once per
    /// unordered pair.
    pub fn distance(&mut self, a: &Block, b: &Block) -> f64 {
        let key = if a.id <= b.id { (a.id, b.id) } else { (b.id, a.id) };
        *self
            .entries
            .entry(key)
            .or_insert_with(|| haversine_km((a.lat, a.lng), (b.lat, b.lng)))
    }

    /// Drop every memoized distance. Call after reloading the block set.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DistanceProvider for DistanceCache {
    fn leg_km(&mut self, from: &Block, to: &Block) -> f64 {
        self.distance(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u32, lat: f64, lng: f64) -> Block {
        Block {
            id,
            name: format!("Bloco {id}"),
            date: "2026-02-14".to_string(),
            start_min: 600,
            end_min: None,
            lat,
            lng,
            venue: "Centro".to_string(),
            search_text: format!("bloco {id} centro"),
        }
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_km((36.1, -115.1), (36.1, -115.1));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas (36.17, -115.14) to Los Angeles (34.05, -118.24)
        // Actual distance ~370 km
        let dist = haversine_km((36.17, -115.14), (34.05, -118.24));
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let forward = haversine_km((-19.92, -43.94), (-19.95, -43.97));
        let backward = haversine_km((-19.95, -43.97), (-19.92, -43.94));
        assert_eq!(forward, backward);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_mirrored_lookup_shares_a_slot() {
        let a = block(1, -19.92, -43.94);
        let b = block(2, -19.95, -43.97);

        let mut cache = DistanceCache::new();
        let forward = cache.distance(&a, &b);
        let backward = cache.distance(&b, &a);

        assert_eq!(forward, backward);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_and_recompute_is_identical() {
        let a = block(1, -19.92, -43.94);
        let b = block(2, -19.95, -43.97);

        let mut cache = DistanceCache::new();
        let first = cache.distance(&a, &b);
        cache.clear();
        assert!(cache.is_empty());
        let second = cache.distance(&a, &b);

        assert_eq!(first.to_bits(), second.to_bits());
    }
}
