//! Block records and the load-time enrichment pass.
//!
//! The feed is stringly typed: times arrive as "HH:MM" strings and
//! coordinates as strings that may be missing or unparseable. Everything is
//! parsed exactly once here, producing the read-only [`Block`] value the rest
//! of the crate works with.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw block record as it appears in the flat JSON feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: u32,
    pub name: String,
    /// ISO date, "YYYY-MM-DD".
    pub date: String,
    /// "HH:MM" or "HH:MM:SS".
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub favorites: u32,
}

/// Enriched, immutable block.
///
/// Only the enrichment pass constructs these from feed data, so downstream
/// code can assume finite coordinates and a parsed start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub name: String,
    /// ISO date, compared lexicographically.
    pub date: String,
    /// Start time in minutes since midnight, derived once at load.
    pub start_min: i32,
    pub end_min: Option<i32>,
    pub lat: f64,
    pub lng: f64,
    pub venue: String,
    /// Lowercased, diacritics-folded name + venue, derived once at load.
    pub search_text: String,
}

impl Block {
    /// Case- and accent-insensitive substring match against name and venue.
    pub fn matches_query(&self, query: &str) -> bool {
        self.search_text.contains(&fold_search_text(query))
    }
}

/// Parse an "HH:MM" (or "HH:MM:SS") clock string into minutes since midnight.
pub fn parse_clock(clock: &str) -> Option<i32> {
    let mut parts = clock.splitn(3, ':');
    let hours: i32 = parts.next()?.trim().parse().ok()?;
    let minutes: i32 = parts.next()?.trim().parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Lowercase and fold the accented characters that show up in block names.
pub fn fold_search_text(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Load-time transformation: validate and convert raw feed records.
///
/// Records with missing or non-finite coordinates, or an unparseable start
/// time, are dropped here. Feeds run to the thousands of records, so the
/// pass runs in parallel.
pub fn enrich(raw: Vec<RawBlock>) -> Vec<Block> {
    let total = raw.len();
    let blocks: Vec<Block> = raw.into_par_iter().filter_map(enrich_one).collect();
    if blocks.len() < total {
        tracing::warn!(
            kept = blocks.len(),
            total,
            "discarded records with invalid coordinates or times"
        );
    }
    blocks
}

fn enrich_one(raw: RawBlock) -> Option<Block> {
    let lat: f64 = raw.latitude.as_deref()?.trim().parse().ok()?;
    let lng: f64 = raw.longitude.as_deref()?.trim().parse().ok()?;
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    let start_min = parse_clock(&raw.start_time)?;
    let end_min = raw.end_time.as_deref().and_then(parse_clock);
    let search_text = fold_search_text(&format!("{} {}", raw.name, raw.venue));

    Some(Block {
        id: raw.id,
        name: raw.name,
        date: raw.date,
        start_min,
        end_min,
        lat,
        lng,
        venue: raw.venue,
        search_text,
    })
}
