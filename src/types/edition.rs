use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, Row};
use std::fmt::Display;

use crate::{traits::*, types::id::WorkId};
use derives::*;

/// One published version of a book.
///
/// The `search_vector` column backing full-text search lives in the table
/// but is never loaded. `rank` is only present on rows that came out of a
/// ranked text search.
#[derive(Default, Debug, Clone, PartialEq, DbTable, DeduplicationFields)]
pub struct Edition {
    pub id:               i32,
    #[deduplication_field]
    pub remote_id:        String,
    pub title:            String,
    pub author_text:      String,
    pub published_date:   Option<DateTime<Utc>>,
    pub cover:            Option<String>,
    pub parent_work_id:   WorkId,
    #[deduplication_field]
    pub isbn_10:          Option<String>,
    #[deduplication_field]
    pub isbn_13:          Option<String>,
    #[deduplication_field]
    pub oclc_number:      Option<String>,
    #[deduplication_field]
    pub asin:             Option<String>,
    #[deduplication_field]
    pub aasin:            Option<String>,
    #[deduplication_field]
    pub isfdb:            Option<String>,
    #[deduplication_field]
    pub openlibrary_key:  Option<String>,
    #[deduplication_field]
    pub inventaire_id:    Option<String>,
    #[deduplication_field]
    pub librarything_key: Option<String>,
    #[deduplication_field]
    pub goodreads_key:    Option<String>,
    #[deduplication_field]
    pub bnf_id:           Option<String>,
    pub rank:             Option<f32>,
}

impl Edition {
    /// Stored columns, i.e. everything but `rank` and the search vector.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "remote_id",
        "title",
        "author_text",
        "published_date",
        "cover",
        "parent_work_id",
        "isbn_10",
        "isbn_13",
        "oclc_number",
        "asin",
        "aasin",
        "isfdb",
        "openlibrary_key",
        "inventaire_id",
        "librarything_key",
        "goodreads_key",
        "bnf_id",
    ];

    /// Comma separated column list, each qualified with `qualifier` if given.
    pub fn select_list(qualifier: Option<&str>) -> String {
        Self::COLUMNS
            .iter()
            .map(|column| match qualifier {
                Some(qualifier) => format!("{qualifier}.{column}"),
                None => column.to_string(),
            })
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// Value of the named identifier column, `None` for unset or unknown columns.
    pub fn identifier(&self, column: &str) -> Option<&str> {
        match column {
            "remote_id" => Some(self.remote_id.as_str()),
            "isbn_10" => self.isbn_10.as_deref(),
            "isbn_13" => self.isbn_13.as_deref(),
            "oclc_number" => self.oclc_number.as_deref(),
            "asin" => self.asin.as_deref(),
            "aasin" => self.aasin.as_deref(),
            "isfdb" => self.isfdb.as_deref(),
            "openlibrary_key" => self.openlibrary_key.as_deref(),
            "inventaire_id" => self.inventaire_id.as_deref(),
            "librarything_key" => self.librarything_key.as_deref(),
            "goodreads_key" => self.goodreads_key.as_deref(),
            "bnf_id" => self.bnf_id.as_deref(),
            _ => None,
        }
    }
}

impl Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.isbn_13, &self.isbn_10) {
            (Some(isbn), _) | (None, Some(isbn)) => {
                write!(f, "{} by {} ({})", self.title, self.author_text, isbn)
            }
            (None, None) => write!(f, "{} by {} ({})", self.title, self.author_text, self.remote_id),
        }
    }
}

impl FromRow<'_, PgRow> for Edition {
    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        let rank = match row.try_get::<Option<f32>, _>("rank") {
            Ok(rank) => rank,
            Err(sqlx::Error::ColumnNotFound(_)) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            id: row.try_get("id")?,
            remote_id: row.try_get("remote_id")?,
            title: row.try_get("title")?,
            author_text: row.try_get("author_text")?,
            published_date: row.try_get("published_date")?,
            cover: row.try_get("cover")?,
            parent_work_id: row.try_get("parent_work_id")?,
            isbn_10: row.try_get("isbn_10")?,
            isbn_13: row.try_get("isbn_13")?,
            oclc_number: row.try_get("oclc_number")?,
            asin: row.try_get("asin")?,
            aasin: row.try_get("aasin")?,
            isfdb: row.try_get("isfdb")?,
            openlibrary_key: row.try_get("openlibrary_key")?,
            inventaire_id: row.try_get("inventaire_id")?,
            librarything_key: row.try_get("librarything_key")?,
            goodreads_key: row.try_get("goodreads_key")?,
            bnf_id: row.try_get("bnf_id")?,
            rank,
        })
    }
}
