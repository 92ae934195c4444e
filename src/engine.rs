//! Same-day three-stop route suggestion engine.
//!
//! Given a start block and the day's block list, enumerate ordered (B, C)
//! pairs of later blocks, score them by gap deviation and total distance, and
//! return a ranked, truncated result. A relaxed fallback pass answers "best
//! we can do" when nothing satisfies the minimum-gap floor.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::traits::DistanceProvider;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Early-exit bound on (B, C) pairs considered per start block.
    pub max_pairs_considered: usize,
    /// Maximum routes returned to the caller.
    pub max_routes: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_pairs_considered: 100,
            max_routes: 5,
        }
    }
}

/// A suggested three-stop itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    /// [start, B, C] block ids in visiting order.
    pub block_ids: [u32; 3],
    /// Sum of the two leg distances, kilometers.
    pub total_km: f64,
    /// True when produced under the relaxed gap policy.
    pub is_fallback: bool,
}

/// Candidate plus the scores it is ranked by. Internal to a generation call.
#[derive(Debug, Clone)]
struct ScoredRoute {
    route: CandidateRoute,
    gap_ab: i32,
    gap_bc: i32,
}

/// Outcome of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub routes: Vec<CandidateRoute>,
    /// Earliest same-day block after the start, regardless of the gap
    /// constraint. Feedback for when no full itinerary exists.
    pub next_immediate: Option<Block>,
}

/// Generate ranked route suggestions starting from `start_block`.
///
/// Runs the strict pass first; if it yields nothing and a gap was requested,
/// reruns relaxed. The two passes are never mixed in one result.
pub fn generate_routes_from_start<M: DistanceProvider>(
    start_block: &Block,
    all_blocks: &[Block],
    min_gap_minutes: f64,
    distances: &mut M,
    options: &EngineOptions,
) -> RouteResult {
    let min_gap = normalize_gap(min_gap_minutes);

    let mut pool: Vec<&Block> = all_blocks
        .iter()
        .filter(|b| b.date == start_block.date && b.id != start_block.id)
        .collect();
    pool.sort_by_key(|b| b.start_min);

    let next_immediate = pool
        .iter()
        .find(|b| b.start_min > start_block.start_min)
        .map(|b| (*b).clone());

    let mut scored = find_routes(start_block, &pool, min_gap, false, distances, options);
    if scored.is_empty() && min_gap > 0 {
        scored = find_routes(start_block, &pool, min_gap, true, distances, options);
    }

    scored.sort_by(|a, b| {
        a.gap_ab
            .cmp(&b.gap_ab)
            .then(a.gap_bc.cmp(&b.gap_bc))
            .then(a.route.total_km.total_cmp(&b.route.total_km))
    });
    scored.truncate(options.max_routes);

    RouteResult {
        routes: scored.into_iter().map(|s| s.route).collect(),
        next_immediate,
    }
}

/// Enumerate and score (B, C) pairs among same-day candidates.
///
/// Strict mode enforces the minimum-gap floor on both transitions and scores
/// each by how far it overshoots the floor. Fallback mode drops the floor and
/// scores by absolute deviation from the ideal gap. Both modes require
/// strictly increasing start times.
fn find_routes<M: DistanceProvider>(
    start_block: &Block,
    candidates: &[&Block],
    min_gap: i32,
    fallback: bool,
    distances: &mut M,
    options: &EngineOptions,
) -> Vec<ScoredRoute> {
    let mut results = Vec::new();
    let start_min = start_block.start_min;
    let mut pairs_considered = 0usize;

    let gap_score = |prev: i32, next: i32| {
        let deviation = next - (prev + min_gap);
        if fallback { deviation.abs() } else { deviation }
    };

    'outer: for block_b in candidates {
        let time_b = block_b.start_min;
        if time_b <= start_min {
            continue;
        }
        if !fallback && time_b < start_min + min_gap {
            continue;
        }

        let dist_ab = distances.leg_km(start_block, block_b);
        let gap_ab = gap_score(start_min, time_b);

        for block_c in candidates {
            if block_c.id == block_b.id {
                continue;
            }
            let time_c = block_c.start_min;
            if time_c <= time_b {
                continue;
            }
            if !fallback && time_c < time_b + min_gap {
                continue;
            }

            pairs_considered += 1;
            if pairs_considered >= options.max_pairs_considered {
                break 'outer;
            }

            let dist_bc = distances.leg_km(block_b, block_c);
            results.push(ScoredRoute {
                route: CandidateRoute {
                    block_ids: [start_block.id, block_b.id, block_c.id],
                    total_km: dist_ab + dist_bc,
                    is_fallback: fallback,
                },
                gap_ab,
                gap_bc: gap_score(time_b, time_c),
            });
        }
    }

    tracing::debug!(pairs_considered, fallback, "scored candidate pairs");
    results
}

/// Clamp the requested gap to a non-negative whole number of minutes.
/// Non-finite input is not an error; it means "no gap".
fn normalize_gap(minutes: f64) -> i32 {
    if minutes.is_finite() {
        minutes.floor().max(0.0) as i32
    } else {
        0
    }
}
