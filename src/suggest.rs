//! User-facing copy for suggested routes.
//!
//! The engine returns bare ids and distances; this module turns one result
//! into the numbered, human-readable entries an interface shows, plus the
//! status line for the outcomes that need explaining.

use serde::{Deserialize, Serialize};

use crate::engine::RouteResult;

/// One displayable suggestion entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSuggestion {
    pub title: String,
    pub description: String,
    pub block_ids: [u32; 3],
    pub is_fallback: bool,
}

/// Build numbered suggestion entries for a result.
pub fn suggestions_for(result: &RouteResult, min_gap_minutes: i32) -> Vec<RouteSuggestion> {
    let label = gap_label(min_gap_minutes);
    let primary = if min_gap_minutes > 0 {
        format!("Optimized circuit with {label} windows.")
    } else {
        "Optimized circuit with no minimum gap.".to_string()
    };
    let fallback = if min_gap_minutes > 0 {
        format!("Next available blocks (gap below {label}).")
    } else {
        "Next available blocks.".to_string()
    };

    result
        .routes
        .iter()
        .enumerate()
        .map(|(idx, route)| RouteSuggestion {
            title: format!("Itinerary {}", idx + 1),
            description: if route.is_fallback {
                fallback.clone()
            } else {
                primary.clone()
            },
            block_ids: route.block_ids,
            is_fallback: route.is_fallback,
        })
        .collect()
}

/// Status line for a result, or `None` when the suggestions speak for
/// themselves (a non-empty strict result).
pub fn info_message_for(result: &RouteResult, min_gap_minutes: i32) -> Option<String> {
    if result.routes.is_empty() {
        return Some(match &result.next_immediate {
            Some(block) => format!(
                "Could not build a full three-stop itinerary. The next block today is {} at {}.",
                block.name,
                clock_label(block.start_min)
            ),
            None => "No more blocks scheduled today after this time.".to_string(),
        });
    }

    if min_gap_minutes > 0 && result.routes.iter().all(|r| r.is_fallback) {
        return Some(format!(
            "No blocks {} apart; picked the next available ones instead.",
            gap_label(min_gap_minutes)
        ));
    }

    None
}

fn gap_label(minutes: i32) -> String {
    if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}min", minutes)
    }
}

fn clock_label(start_min: i32) -> String {
    format!("{:02}:{:02}", start_min / 60, start_min % 60)
}
