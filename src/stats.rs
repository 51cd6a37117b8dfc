//! Per-year release counts over the most common platforms.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Record;

/// How many of the most frequent platforms contribute to the statistics.
pub const TOP_PLATFORMS: usize = 15;

/// Counts games per release year, restricted to the [`TOP_PLATFORMS`] most
/// frequent platforms. Ties at the boundary break by count descending, then
/// platform name ascending, so the selection is deterministic.
///
/// An empty input yields an empty map, which callers treat as "no statistics".
pub fn calculate_statistics(records: &[Record]) -> BTreeMap<i32, u64> {
    let mut platform_counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *platform_counts.entry(record.platform.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, u64)> = platform_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let top_platforms: HashSet<&str> = ranked
        .into_iter()
        .take(TOP_PLATFORMS)
        .map(|(platform, _)| platform)
        .collect();

    let mut per_year = BTreeMap::new();
    for record in records {
        if top_platforms.contains(record.platform.as_str()) {
            *per_year.entry(record.release_year).or_insert(0u64) += 1;
        }
    }

    per_year
}
