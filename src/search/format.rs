use chrono::Datelike;

use crate::types::{edition::Edition, search_result::SearchResult};

/// Converts a catalog edition into a search result. Local results carry no
/// connector and no view link.
pub fn format_search_result(edition: &Edition, media_full_url: &str) -> SearchResult {
    SearchResult {
        author: Some(edition.author_text.clone()),
        year: edition.published_date.map(|date| date.year()),
        cover: edition
            .cover
            .as_deref()
            .filter(|cover| !cover.is_empty())
            .map(|cover| format!("{media_full_url}{cover}")),
        confidence: edition.rank.unwrap_or(1.0),
        ..SearchResult::new(&edition.title, &edition.remote_id)
    }
}
