//! The edition catalog the search runs against.
//!
//! Search logic only talks to the [Catalog] trait; [PgCatalog] implements it
//! on top of PostgreSQL full-text search.

mod postgres;

pub use postgres::PgCatalog;

use anyhow::Result;

use crate::{search::filter::Filter, types::edition::Edition};

/// Exact match of one value against several identifier columns, any of which
/// may match.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierQuery {
    pub value:   String,
    pub columns: Vec<&'static str>,
}

/// Ranked full-text match on title and author.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
    /// Raw query text, handed to the text search parser untouched.
    pub text:           String,
    /// Only rows ranked strictly above this are returned.
    pub min_confidence: f32,
}

/// Restrictions applied on top of a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// Base set of editions to search in. `None` searches the whole catalog.
    pub start:   Option<Filter>,
    pub filters: Vec<Filter>,
    pub limit:   Option<i64>,
}

impl Scope {
    /// All restrictions as one predicate, `None` if there are none.
    pub fn predicate(&self) -> Option<Filter> {
        let mut filters = self.start.iter().cloned().collect::<Vec<Filter>>();
        filters.extend(self.filters.iter().cloned());
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(Filter::All(filters)),
        }
    }
}

pub trait Catalog {
    /// Editions where any of `query.columns` equals `query.value`, distinct and
    /// ordered by id.
    async fn find_by_identifier(
        &self,
        query: &IdentifierQuery,
        scope: &Scope,
    ) -> Result<Vec<Edition>>;

    /// Editions matching `query.text`, each with its `rank` set, ranked above
    /// `query.min_confidence` and ordered by descending rank (ties by id).
    async fn rank_by_text(&self, query: &TextQuery, scope: &Scope) -> Result<Vec<Edition>>;
}
