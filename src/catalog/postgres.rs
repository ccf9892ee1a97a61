use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::{Catalog, IdentifierQuery, Scope, TextQuery};
use crate::{config::Config, traits::*, types::edition::Edition};

/// Text search configurations a query is parsed with. A row matching under
/// any of them is a candidate.
const SEARCH_CONFIGS: [&str; 2] = ["simple", "english"];

#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

impl Catalog for PgCatalog {
    async fn find_by_identifier(
        &self,
        query: &IdentifierQuery,
        scope: &Scope,
    ) -> Result<Vec<Edition>> {
        if query.columns.is_empty() {
            return Ok(vec![]);
        }
        let mut builder = identifier_sql(query, scope);
        debug!(sql = builder.sql(), "Identifier lookup");
        Ok(builder
            .build_query_as::<Edition>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn rank_by_text(&self, query: &TextQuery, scope: &Scope) -> Result<Vec<Edition>> {
        let mut builder = text_sql(query, scope);
        debug!(sql = builder.sql(), "Ranked text search");
        Ok(builder
            .build_query_as::<Edition>()
            .fetch_all(&self.pool)
            .await?)
    }
}

fn identifier_sql(query: &IdentifierQuery, scope: &Scope) -> QueryBuilder<'static, Postgres> {
    let editions = Edition::TABLE_NAME;
    let mut builder = QueryBuilder::new(format!(
        "SELECT DISTINCT {} FROM {editions} WHERE (",
        Edition::select_list(Some(editions))
    ));
    let mut i = query.columns.iter().peekable();
    while let Some(column) = i.next() {
        builder
            .push(format!("{editions}.{column} = "))
            .push_bind(query.value.clone());
        if i.peek().is_some() {
            builder.push(" OR ");
        }
    }
    builder.push(")");
    if let Some(predicate) = scope.predicate() {
        builder.push(" AND ");
        predicate.push_sql(&mut builder);
    }
    builder.push(format!(" ORDER BY {editions}.id"));
    push_limit(&mut builder, scope);
    builder
}

fn text_sql(query: &TextQuery, scope: &Scope) -> QueryBuilder<'static, Postgres> {
    let editions = Edition::TABLE_NAME;
    let mut builder = QueryBuilder::new(format!(
        "SELECT {}, rank FROM (SELECT {}, ts_rank({editions}.search_vector, search_query.query) \
         AS rank FROM {editions}, (SELECT ",
        Edition::select_list(None),
        Edition::select_list(Some(editions)),
    ));
    let mut i = SEARCH_CONFIGS.iter().peekable();
    while let Some(config) = i.next() {
        builder
            .push(format!("plainto_tsquery('{config}', "))
            .push_bind(query.text.clone())
            .push(")");
        if i.peek().is_some() {
            builder.push(" || ");
        }
    }
    builder.push(format!(
        " AS query) AS search_query WHERE {editions}.search_vector @@ search_query.query"
    ));
    if let Some(predicate) = scope.predicate() {
        builder.push(" AND ");
        predicate.push_sql(&mut builder);
    }
    builder
        .push(") AS ranked WHERE rank > ")
        .push_bind(query.min_confidence)
        .push(" ORDER BY rank DESC, id");
    push_limit(&mut builder, scope);
    builder
}

fn push_limit(builder: &mut QueryBuilder<'static, Postgres>, scope: &Scope) {
    if let Some(limit) = scope.limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        search::filter::Filter,
        traits::DeduplicationFields,
        types::id::{UserId, WorkId},
    };

    fn isbn_query() -> IdentifierQuery {
        IdentifierQuery {
            value:   "0747532699".into(),
            columns: vec!["isbn_10", "isbn_13"],
        }
    }

    #[test]
    fn identifier_sql_ors_columns() {
        let builder = identifier_sql(&isbn_query(), &Scope::default());
        let sql = builder.sql();
        assert!(sql.starts_with("SELECT DISTINCT editions.id, editions.remote_id, "));
        assert!(sql.ends_with(
            " FROM editions WHERE (editions.isbn_10 = $1 OR editions.isbn_13 = $2) \
             ORDER BY editions.id"
        ));
    }

    #[test]
    fn identifier_sql_covers_every_deduplication_field() {
        let query = IdentifierQuery {
            value:   "x".into(),
            columns: Edition::DEDUPLICATION_FIELDS.to_vec(),
        };
        let builder = identifier_sql(&query, &Scope::default());
        let sql = builder.sql();
        for (n, column) in Edition::DEDUPLICATION_FIELDS.iter().enumerate() {
            assert!(
                sql.contains(&format!("editions.{column} = ${}", n + 1)),
                "{column} missing from {sql}"
            );
        }
        assert_eq!(
            sql.matches(" OR ").count(),
            Edition::DEDUPLICATION_FIELDS.len() - 1
        );
    }

    #[test]
    fn identifier_sql_scope_and_limit() {
        let scope = Scope {
            start:   Some(Filter::InWork(WorkId(4))),
            filters: vec![Filter::ShelvedBy(UserId(1))],
            limit:   Some(1),
        };
        let builder = identifier_sql(&isbn_query(), &scope);
        assert!(builder.sql().ends_with(
            "(editions.isbn_10 = $1 OR editions.isbn_13 = $2) AND \
             ((editions.parent_work_id = $3) AND (EXISTS (SELECT 1 FROM shelfbooks WHERE \
             shelfbooks.book_id = editions.id AND shelfbooks.user_id = $4))) \
             ORDER BY editions.id LIMIT $5"
        ));
    }

    #[test]
    fn text_sql_uses_both_configs() {
        let query = TextQuery {
            text:           "harry potter".into(),
            min_confidence: 0.0,
        };
        let builder = text_sql(&query, &Scope::default());
        let sql = builder.sql();
        assert!(sql.contains(
            "(SELECT plainto_tsquery('simple', $1) || plainto_tsquery('english', $2) AS query) \
             AS search_query WHERE editions.search_vector @@ search_query.query"
        ));
        assert!(sql.contains("ts_rank(editions.search_vector, search_query.query) AS rank"));
        assert!(sql.ends_with(") AS ranked WHERE rank > $3 ORDER BY rank DESC, id"));
    }

    #[test]
    fn text_sql_scope_before_threshold() {
        let query = TextQuery {
            text:           "dune".into(),
            min_confidence: 0.1,
        };
        let scope = Scope {
            filters: vec![Filter::HasCover],
            limit: Some(1),
            ..Scope::default()
        };
        let builder = text_sql(&query, &scope);
        assert!(builder.sql().ends_with(
            "search_query.query AND (editions.cover IS NOT NULL AND editions.cover <> '')) \
             AS ranked WHERE rank > $3 ORDER BY rank DESC, id LIMIT $4"
        ));
    }
}
