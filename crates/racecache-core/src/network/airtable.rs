//! Airtable record source.
//!
//! One list-records request per fetch. Pagination is not followed: only the
//! first page the API returns is cached, and the response's `offset` is
//! ignored.

use crate::config::{AirtableCredentials, AirtableSettings};
use crate::network::client::HttpClient;
use crate::{RaceCacheError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

/// Something that can produce the raw records to cache.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable name of what is being fetched, for logs.
    fn describe(&self) -> String;

    /// Fetch every record, unchanged.
    async fn fetch_records(&self) -> Result<Vec<Value>>;
}

/// Build the list-records URL for a table.
///
/// The base id is embedded as-is; the table name is percent-encoded.
pub fn table_url(api_base_url: &str, base_id: &str, table_name: &str) -> String {
    format!(
        "{}/{}/{}",
        api_base_url.trim_end_matches('/'),
        base_id,
        urlencoding::encode(table_name)
    )
}

/// Extract the `records` array from a list-records response body.
pub fn parse_records(body: &str) -> Result<Vec<Value>> {
    let response: Value = serde_json::from_str(body).map_err(|e| RaceCacheError::Parse {
        message: format!("Invalid JSON in Airtable response: {}", e),
        source: Some(e),
    })?;

    match response.get("records") {
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(_) => Err(RaceCacheError::parse(
            "Airtable response field `records` is not an array",
        )),
        None => Err(RaceCacheError::parse(
            "Airtable response is missing the `records` field",
        )),
    }
}

/// Airtable REST client for a single table.
pub struct AirtableClient {
    http: HttpClient,
    credentials: AirtableCredentials,
    table_name: String,
    url: String,
}

impl AirtableClient {
    /// Create a client from settings.
    ///
    /// Fails with a `Config` error, before any network activity, when a
    /// required value is missing.
    pub fn new(settings: &AirtableSettings) -> Result<Self> {
        let credentials = settings.credentials()?;
        let http = HttpClient::with_timeout(settings.request_timeout)?;
        let url = table_url(
            &settings.api_base_url,
            &credentials.base_id,
            &settings.table_name,
        );

        Ok(Self {
            http,
            credentials,
            table_name: settings.table_name.clone(),
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    fn describe(&self) -> String {
        format!("Airtable table {}", self.table_name)
    }

    async fn fetch_records(&self) -> Result<Vec<Value>> {
        info!("Fetching data from Airtable: {}...", self.table_name);
        let response = self
            .http
            .get_with_bearer(&self.url, &self.credentials.api_key)
            .await?;

        if !response.is_ok() {
            return Err(RaceCacheError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let records = parse_records(&response.body)?;
        debug!("Parsed {} records from {}", records.len(), self.url);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_url_encodes_table_name() {
        assert_eq!(
            table_url("https://api.airtable.com/v0", "appXYZ", "Races"),
            "https://api.airtable.com/v0/appXYZ/Races"
        );
        assert_eq!(
            table_url("https://api.airtable.com/v0/", "appXYZ", "Race Results/2024"),
            "https://api.airtable.com/v0/appXYZ/Race%20Results%2F2024"
        );
    }

    #[test]
    fn test_parse_records_passes_records_through() {
        let body = r#"{"records":[{"id":"rec1","fields":{"Name":"Spring 10k"}}],"offset":"itr"}"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records, vec![json!({"id": "rec1", "fields": {"Name": "Spring 10k"}})]);
    }

    #[test]
    fn test_parse_records_empty_array() {
        assert!(parse_records(r#"{"records":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_records_rejects_bad_bodies() {
        assert!(matches!(
            parse_records("<html>oops</html>"),
            Err(RaceCacheError::Parse { source: Some(_), .. })
        ));
        assert!(matches!(
            parse_records(r#"{"error":"nope"}"#),
            Err(RaceCacheError::Parse { source: None, .. })
        ));
        assert!(matches!(
            parse_records(r#"{"records":{"id":"rec1"}}"#),
            Err(RaceCacheError::Parse { .. })
        ));
    }

    #[test]
    fn test_client_requires_credentials() {
        let settings = AirtableSettings::default();
        assert!(matches!(
            AirtableClient::new(&settings),
            Err(RaceCacheError::Config { .. })
        ));
    }

    #[test]
    fn test_client_url_from_settings() {
        let settings = AirtableSettings {
            api_key: Some("key".into()),
            base_id: Some("appXYZ".into()),
            table_name: "Race Results".into(),
            ..AirtableSettings::default()
        };
        let client = AirtableClient::new(&settings).unwrap();
        assert_eq!(client.url(), "https://api.airtable.com/v0/appXYZ/Race%20Results");
        assert_eq!(client.describe(), "Airtable table Race Results");
    }
}
