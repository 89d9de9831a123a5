//! In-memory search index
//!
//! Matches the query as a case-insensitive substring of the hit title and
//! applies `attribute:value` facet filters, where the attribute may be a
//! dotted path into nested objects and arrays (`design_tags.name:Print`).

use async_trait::async_trait;
use day_common::Hit;
use serde_json::Value;

use super::{HitsPage, SearchError, SearchIndex, SearchRequest};
use crate::pagination::page_window;

/// Fixed list of hits, searched in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    name: String,
    hits: Vec<Hit>,
}

impl InMemoryIndex {
    pub fn new(name: impl Into<String>, hits: Vec<Hit>) -> Self {
        Self {
            name: name.into(),
            hits,
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    fn matches(hit: &Hit, request: &SearchRequest) -> bool {
        let query = request.query.trim().to_lowercase();
        if !query.is_empty() {
            let title_match = hit
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&query));
            if !title_match {
                return false;
            }
        }

        if request.facet_filters.is_empty() {
            return true;
        }

        let Ok(document) = serde_json::to_value(hit) else {
            return false;
        };
        request.facet_filters.iter().all(|filter| {
            match filter.split_once(':') {
                Some((attribute, expected)) => {
                    let path: Vec<&str> = attribute.split('.').collect();
                    facet_matches(&document, &path, expected)
                }
                None => false,
            }
        })
    }
}

/// Whether any value reached by `path` equals `expected`
fn facet_matches(value: &Value, path: &[&str], expected: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| facet_matches(item, path, expected)),
        _ => match path.split_first() {
            Some((head, rest)) => value
                .get(*head)
                .is_some_and(|child| facet_matches(child, rest, expected)),
            None => match value {
                Value::String(s) => s == expected,
                Value::Number(n) => n.to_string() == expected,
                Value::Bool(b) => b.to_string() == expected,
                _ => false,
            },
        },
    }
}

#[async_trait]
impl SearchIndex for InMemoryIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, request: &SearchRequest) -> Result<HitsPage, SearchError> {
        let matched: Vec<&Hit> = self
            .hits
            .iter()
            .filter(|hit| Self::matches(hit, request))
            .collect();

        let window = page_window(matched.len(), request.page, request.hits_per_page);
        Ok(HitsPage {
            hits: matched[window.range].iter().map(|hit| (*hit).clone()).collect(),
            page: window.page,
            nb_pages: window.nb_pages,
            nb_hits: matched.len() as u64,
        })
    }
}
