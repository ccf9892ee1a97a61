use anyhow::Result;
use tracing::debug;

use super::SearchOptions;
use crate::{
    catalog::{Catalog, IdentifierQuery},
    traits::DeduplicationFields,
    types::{
        edition::Edition,
        isbn::{maybe_isbn, normalize_isbn},
    },
};

/// Identifiers never contain whitespace, titles and author names usually do.
pub fn is_identifier_shaped(query: &str) -> bool {
    !query.is_empty() && !query.contains(char::is_whitespace)
}

/// Lookup value for `query`: normalized if it looks like an ISBN, unchanged
/// otherwise.
pub fn identifier_value(query: &str) -> String {
    if maybe_isbn(query) {
        normalize_isbn(query)
    } else {
        query.to_string()
    }
}

/// Exact match against every deduplication field of [Edition].
pub async fn search_identifiers(
    catalog: &impl Catalog,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<Edition>> {
    let query = IdentifierQuery {
        value:   identifier_value(query),
        columns: Edition::DEDUPLICATION_FIELDS.to_vec(),
    };
    debug!("Searching identifiers for {:?}", query.value);
    catalog
        .find_by_identifier(&query, &options.scope(options.return_first))
        .await
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn shape() {
        assert!(is_identifier_shaped("9780747532699"));
        assert!(is_identifier_shaped("https://example.net/book/1"));
        assert!(!is_identifier_shaped("harry potter"));
        assert!(!is_identifier_shaped("harry\tpotter"));
        assert!(!is_identifier_shaped(""));
    }

    #[test]
    fn value() {
        assert_eq!(identifier_value("747532699"), "0747532699");
        assert_eq!(identifier_value("080442957x"), "080442957X");
        assert_eq!(
            identifier_value("https://example.net/book/1"),
            "https://example.net/book/1"
        );
        assert_eq!(identifier_value("OL123M"), "OL123M");
    }
}
