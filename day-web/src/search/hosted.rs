//! Hosted search index client
//!
//! Queries an Algolia-compatible REST endpoint:
//! `POST {base}/1/indexes/{index}/query` with application id and
//! search-only API key headers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{HitsPage, SearchError, SearchIndex, SearchRequest};

const USER_AGENT: &str = concat!("day-web/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Request body sent to the query endpoint
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryBody<'a> {
    query: &'a str,
    page: u32,
    hits_per_page: u32,
    #[serde(skip_serializing_if = "no_filters")]
    facet_filters: &'a [String],
}

fn no_filters(filters: &&[String]) -> bool {
    filters.is_empty()
}

impl<'a> From<&'a SearchRequest> for QueryBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            query: &request.query,
            page: request.page,
            hits_per_page: request.hits_per_page,
            facet_filters: &request.facet_filters,
        }
    }
}

/// Hosted index client
pub struct HostedSearchIndex {
    http_client: reqwest::Client,
    base_url: String,
    app_id: String,
    api_key: String,
    index_name: String,
}

impl HostedSearchIndex {
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let app_id = app_id.into();
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: format!("https://{}-dsn.algolia.net", app_id.to_lowercase()),
            app_id,
            api_key: api_key.into(),
            index_name: index_name.into(),
        })
    }

    /// Point the client at another host (self-hosted proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn query_url(&self) -> String {
        format!("{}/1/indexes/{}/query", self.base_url, self.index_name)
    }
}

#[async_trait]
impl SearchIndex for HostedSearchIndex {
    fn name(&self) -> &str {
        &self.index_name
    }

    async fn search(&self, request: &SearchRequest) -> Result<HitsPage, SearchError> {
        let url = self.query_url();
        tracing::debug!(
            index = %self.index_name,
            query = %request.query,
            page = request.page,
            "Querying hosted search index"
        );

        let response = self
            .http_client
            .post(&url)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&QueryBody::from(request))
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(SearchError::IndexNotFound(self.index_name.clone()));
        }

        if status == 429 {
            return Err(SearchError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(status.as_u16(), error_text));
        }

        response
            .json::<HitsPage>()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_url() {
        let index = HostedSearchIndex::new("APPID", "key", "events").unwrap();
        assert_eq!(
            index.query_url(),
            "https://appid-dsn.algolia.net/1/indexes/events/query"
        );

        let proxied = index.with_base_url("http://127.0.0.1:9000/");
        assert_eq!(proxied.query_url(), "http://127.0.0.1:9000/1/indexes/events/query");
    }

    #[test]
    fn test_query_body() {
        let request = SearchRequest::new("lecture").for_page(2);
        let body = serde_json::to_value(QueryBody::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({"query": "lecture", "page": 2, "hitsPerPage": 20})
        );

        let filtered = request.with_facet_filters(vec!["type:talk".to_string()]);
        let body = serde_json::to_value(QueryBody::from(&filtered)).unwrap();
        assert_eq!(body["facetFilters"], json!(["type:talk"]));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is not expected to speak HTTP
        let index = HostedSearchIndex::new("app", "key", "events")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let result = index.search(&SearchRequest::new("")).await;
        assert!(matches!(result, Err(SearchError::Network(_))));
    }
}
