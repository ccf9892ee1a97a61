use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;

/// Standardized search result, the shape handed to whoever asked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title:      String,
    pub key:        String,
    /// Which connector produced the result. Local results leave it blank.
    #[serde(skip)]
    pub connector:  String,
    pub view_link:  Option<String>,
    pub author:     Option<String>,
    pub year:       Option<i32>,
    pub cover:      Option<String>,
    pub confidence: f32,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title:      title.into(),
            key:        key.into(),
            connector:  String::new(),
            view_link:  None,
            author:     None,
            year:       None,
            cover:      None,
            confidence: 1.0,
        }
    }

    /// Flat JSON object of every field except the connector.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<SearchResult key={:?} title={:?} author={:?} confidence={:?}>",
            self.key, self.title, self.author, self.confidence
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn json_drops_connector() {
        let result = SearchResult {
            connector: "openlibrary".into(),
            author: Some("J.K. Rowling".into()),
            year: Some(1997),
            ..SearchResult::new("Harry Potter", "https://example.net/book/1")
        };
        assert_eq!(
            result.json().unwrap(),
            json!({
                "title": "Harry Potter",
                "key": "https://example.net/book/1",
                "view_link": null,
                "author": "J.K. Rowling",
                "year": 1997,
                "cover": null,
                "confidence": 1.0,
            })
        );
    }

    #[test]
    fn display() {
        let result = SearchResult::new("Dune", "https://example.net/book/2");
        assert_eq!(
            result.to_string(),
            r#"<SearchResult key="https://example.net/book/2" title="Dune" author=None confidence=1.0>"#
        );
    }
}
