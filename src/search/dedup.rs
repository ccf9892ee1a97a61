use std::collections::HashSet;

use crate::types::edition::Edition;

/// Keeps the best ranked edition of every work.
///
/// Candidates are stable-sorted by descending rank first, so among editions
/// with the same rank the earlier one wins. Unranked editions sort last.
pub fn dedup_by_work(mut candidates: Vec<Edition>) -> Vec<Edition> {
    candidates.sort_by(|a, b| {
        let a = a.rank.unwrap_or(f32::NEG_INFINITY);
        let b = b.rank.unwrap_or(f32::NEG_INFINITY);
        b.total_cmp(&a)
    });
    let mut seen = HashSet::new();
    candidates.retain(|edition| seen.insert(edition.parent_work_id));
    candidates
}
