//! Local catalog search.
//!
//! Queries without whitespace are tried as identifiers first (ISBN, remote
//! id, ...). Anything else, or an identifier that matched nothing, goes
//! through ranked full-text search on title and author.

pub mod dedup;
pub mod filter;
pub mod format;
pub mod identifier;
pub mod text;

use anyhow::Result;
use tracing::debug;

use crate::{
    catalog::{Catalog, IdentifierQuery, Scope},
    types::{edition::Edition, id::UserId, isbn::normalize_isbn},
};
use filter::Filter;
use identifier::{is_identifier_shaped, search_identifiers};
use text::search_title_author;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Text matches have to be ranked strictly above this.
    pub min_confidence: f32,
    pub filters:        Vec<Filter>,
    /// Only the first match is wanted.
    pub return_first:   bool,
    /// Editions to search in instead of the whole catalog.
    pub start:          Option<Filter>,
}

impl SearchOptions {
    pub(crate) fn scope(&self, limit_to_first: bool) -> Scope {
        Scope {
            start:   self.start.clone(),
            filters: self.filters.clone(),
            limit:   limit_to_first.then_some(1),
        }
    }
}

/// Searches the local catalog, keeping the best edition of each work.
pub async fn search(
    catalog: &impl Catalog,
    query: &str,
    options: SearchOptions,
) -> Result<Vec<Edition>> {
    generic_search(catalog, query, &options, true).await
}

/// Like [search], but only the best match.
pub async fn search_first(
    catalog: &impl Catalog,
    query: &str,
    options: SearchOptions,
) -> Result<Option<Edition>> {
    let options = SearchOptions {
        return_first: true,
        ..options
    };
    Ok(generic_search(catalog, query, &options, true)
        .await?
        .into_iter()
        .next())
}

/// Searches the editions on `user`'s shelves. Every matching edition is
/// returned, even several of the same work.
pub async fn search_user_shelves(
    catalog: &impl Catalog,
    query: &str,
    user: UserId,
    mut options: SearchOptions,
) -> Result<Vec<Edition>> {
    options.filters.push(Filter::ShelvedBy(user));
    generic_search(catalog, query, &options, false).await
}

/// Looks `query` up as an ISBN-10 or ISBN-13, nothing else.
pub async fn isbn_search(catalog: &impl Catalog, query: &str) -> Result<Vec<Edition>> {
    if query.trim().is_empty() {
        return Ok(vec![]);
    }
    let query = IdentifierQuery {
        value:   normalize_isbn(query),
        columns: vec!["isbn_10", "isbn_13"],
    };
    catalog.find_by_identifier(&query, &Scope::default()).await
}

async fn generic_search(
    catalog: &impl Catalog,
    query: &str,
    options: &SearchOptions,
    dedup: bool,
) -> Result<Vec<Edition>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(vec![]);
    }

    if is_identifier_shaped(query) {
        let results = search_identifiers(catalog, query, options).await?;
        if !results.is_empty() {
            return Ok(results);
        }
        debug!("No identifier matched {query:?}, falling back to text search");
    }

    search_title_author(catalog, query, options, dedup).await
}
