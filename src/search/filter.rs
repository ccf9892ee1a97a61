use sqlx::{Postgres, QueryBuilder};

use crate::{
    traits::*,
    types::{
        edition::Edition,
        id::{UserId, WorkId},
        shelf_book::ShelfBook,
    },
};

/// Predicate on editions, used to scope a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// On one of the user's shelves.
    ShelvedBy(UserId),
    InWork(WorkId),
    HasCover,
    All(Vec<Filter>),
    Any(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn and(self, other: Filter) -> Filter {
        match self {
            Filter::All(mut filters) => {
                filters.push(other);
                Filter::All(filters)
            }
            filter => Filter::All(vec![filter, other]),
        }
    }

    pub fn or(self, other: Filter) -> Filter {
        match self {
            Filter::Any(mut filters) => {
                filters.push(other);
                Filter::Any(filters)
            }
            filter => Filter::Any(vec![filter, other]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Filter {
        Filter::Not(Box::new(self))
    }

    /// Appends this filter as a parenthesized boolean expression over the
    /// `editions` table.
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let editions = Edition::TABLE_NAME;
        match self {
            Filter::ShelvedBy(user) => {
                let shelf_books = ShelfBook::TABLE_NAME;
                builder
                    .push(format!(
                        "(EXISTS (SELECT 1 FROM {shelf_books} WHERE {shelf_books}.book_id = \
                         {editions}.id AND {shelf_books}.user_id = "
                    ))
                    .push_bind(*user)
                    .push("))");
            }
            Filter::InWork(work) => {
                builder
                    .push(format!("({editions}.parent_work_id = "))
                    .push_bind(*work)
                    .push(")");
            }
            Filter::HasCover => {
                builder.push(format!(
                    "({editions}.cover IS NOT NULL AND {editions}.cover <> '')"
                ));
            }
            Filter::All(filters) => push_joined(builder, filters, " AND ", "TRUE"),
            Filter::Any(filters) => push_joined(builder, filters, " OR ", "FALSE"),
            Filter::Not(filter) => {
                builder.push("(NOT ");
                filter.push_sql(builder);
                builder.push(")");
            }
        }
    }
}

fn push_joined(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &[Filter],
    separator: &str,
    empty: &str,
) {
    if filters.is_empty() {
        builder.push(format!("({empty})"));
        return;
    }
    builder.push("(");
    let mut i = filters.iter().peekable();
    while let Some(filter) = i.next() {
        filter.push_sql(builder);
        if i.peek().is_some() {
            builder.push(separator);
        }
    }
    builder.push(")");
}
