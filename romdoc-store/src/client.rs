use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// HTTP client for the PostgREST row store.
///
/// All access is read-only: filtered `GET` requests against table endpoints
/// under `/rest/v1/`, authenticated with the publishable API key.
pub struct StoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Build a client with a 30s request timeout.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    /// The configured schema document URL.
    pub fn schema_url(&self) -> &str {
        &self.config.schema_url
    }

    /// The table endpoint URL, for `source` envelopes.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// Fetch all rows of `table` matching the given query pairs
    /// (`select` projections and `col=eq.value` filters).
    pub async fn rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table);
        log::debug!("GET {table} ({} filters)", query.len());

        let resp = self
            .http
            .get(&url)
            .query(query)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(resp.json().await?)
    }

    /// Fetch the first row of `table` matching the given query pairs, if any.
    pub async fn first<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self.rows(table, query).await?;
        Ok(rows.into_iter().next())
    }

    /// Fetch a plain text document (the schema source). No store auth headers
    /// are attached; the schema lives on a public raw-text endpoint.
    pub async fn fetch_text(&self, url: &str) -> Result<String, StoreError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Build an `isActive = true` equality filter pair.
pub fn active_filter() -> (&'static str, String) {
    ("isActive", "eq.true".to_string())
}

/// Build a `column = value` equality filter pair.
pub fn eq_filter(column: &'static str, value: &str) -> (&'static str, String) {
    (column, format!("eq.{value}"))
}

/// Build a `select` projection pair.
pub fn select(columns: &str) -> (&'static str, String) {
    ("select", columns.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_pairs() {
        assert_eq!(eq_filter("platformId", "p-1"), ("platformId", "eq.p-1".to_string()));
        assert_eq!(active_filter(), ("isActive", "eq.true".to_string()));
        assert_eq!(select("id,name"), ("select", "id,name".to_string()));
    }
}
