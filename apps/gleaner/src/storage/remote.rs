//! # Remote Store
//!
//! Analyses kept in a PostgREST table, as exposed by Supabase at
//! `{url}/rest/v1/{table}`.
//!
//! - Insert: `POST` with `Prefer: return=representation`; the first
//!   returned row is the stored record, with the server-assigned id.
//! - Blank search: newest `RECENT_RECORDS_LIMIT` rows by `created_at`.
//! - Search: two array-containment filters (`cs.{"q"}`) on `topics` and
//!   `keywords`, merged topics first. The query is trimmed, not lowercased.

use crate::config::Settings;
use crate::http::build_client;
use gleaner_core::primitives::RECENT_RECORDS_LIMIT;
use gleaner_core::{AnalysisRecord, GleanerError, NewAnalysis, merge_unique_by_id};
use std::time::Duration;

/// HTTP client for one PostgREST table.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

/// Quote a value as a one-element PostgREST array literal.
fn containment_filter(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("cs.{{\"{}\"}}", escaped)
}

impl RemoteStore {
    /// Create a store for `table` at `base_url`; each call fails after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GleanerError> {
        let base_url: String = base_url.into();
        Ok(Self {
            http: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
        })
    }

    /// Build from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_TABLE`.
    pub fn from_settings(settings: &Settings) -> Result<Self, GleanerError> {
        match (&settings.supabase_url, &settings.supabase_anon_key) {
            (Some(url), Some(key)) => Self::new(
                url.clone(),
                key.clone(),
                settings.supabase_table.clone(),
                settings.http_timeout(),
            ),
            _ => Err(GleanerError::StorageUnavailable(
                "remote store not initialized: set SUPABASE_URL and SUPABASE_ANON_KEY".to_string(),
            )),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Build a request carrying both PostgREST credentials.
    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request, mapping transport failures to `StorageUnavailable`.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, GleanerError> {
        req.send().await.map_err(|e| {
            GleanerError::StorageUnavailable(format!("cannot reach {}: {e}", self.base_url))
        })
    }

    /// Decode a row array.
    async fn rows(resp: reqwest::Response) -> Result<Vec<AnalysisRecord>, GleanerError> {
        resp.json::<Vec<AnalysisRecord>>()
            .await
            .map_err(|e| GleanerError::Serialization(format!("invalid rows: {e}")))
    }

    /// Insert one analysis and return the stored row.
    pub async fn insert(&self, analysis: &NewAnalysis) -> Result<AnalysisRecord, GleanerError> {
        let req = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(analysis);
        let resp = self.send(req).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GleanerError::StorageWriteFailed(format!(
                "insert returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        Self::rows(resp)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GleanerError::StorageWriteFailed("insert returned no rows".to_string()))
    }

    /// Run one filtered select.
    async fn select(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Vec<AnalysisRecord>, GleanerError> {
        let req = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*")])
            .query(filters);
        let resp = self.send(req).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GleanerError::StorageUnavailable(format!(
                "search returned {}: {}",
                status.as_u16(),
                body
            )));
        }
        Self::rows(resp).await
    }

    /// Search by topic or keyword. A blank query lists the newest rows.
    pub async fn search(&self, query: &str) -> Result<Vec<AnalysisRecord>, GleanerError> {
        let q = query.trim();
        if q.is_empty() {
            return self
                .select(&[
                    ("order", "created_at.desc".to_string()),
                    ("limit", RECENT_RECORDS_LIMIT.to_string()),
                ])
                .await;
        }

        let filter = containment_filter(q);
        let topic_filters = [("topics", filter.clone())];
        let keyword_filters = [("keywords", filter)];
        let (by_topic, by_keyword) = tokio::try_join!(
            self.select(&topic_filters),
            self.select(&keyword_filters)
        )?;
        Ok(merge_unique_by_id([by_topic, by_keyword]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_quotes_value() {
        assert_eq!(containment_filter("ai"), r#"cs.{"ai"}"#);
        assert_eq!(
            containment_filter("machine learning"),
            r#"cs.{"machine learning"}"#
        );
        assert_eq!(containment_filter(r#"a"b\c"#), r#"cs.{"a\"b\\c"}"#);
    }

    #[test]
    fn table_url_trims_trailing_slash() {
        let store = RemoteStore::new(
            "https://example.supabase.co/",
            "anon",
            "analyses",
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(
            store.table_url(),
            "https://example.supabase.co/rest/v1/analyses"
        );
    }
}
