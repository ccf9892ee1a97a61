use anyhow::Result;
use tracing::debug;

use super::{dedup::dedup_by_work, SearchOptions};
use crate::{
    catalog::{Catalog, TextQuery},
    types::edition::Edition,
};

/// Ranked search on title and author, optionally reduced to one edition per
/// work.
pub async fn search_title_author(
    catalog: &impl Catalog,
    query: &str,
    options: &SearchOptions,
    dedup: bool,
) -> Result<Vec<Edition>> {
    let text_query = TextQuery {
        text:           query.to_string(),
        min_confidence: options.min_confidence,
    };
    // The first deduplicated row is only known once every candidate is ranked.
    let limit_in_query = options.return_first && !dedup;
    let mut results = catalog
        .rank_by_text(&text_query, &options.scope(limit_in_query))
        .await?;
    debug!("Ranked {} candidates for {:?}", results.len(), query);
    if dedup {
        results = dedup_by_work(results);
        if options.return_first {
            results.truncate(1);
        }
    }
    Ok(results)
}
