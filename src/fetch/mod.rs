//! Grade table loading from the embedded default, a local file, or a URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::grades::GradeTable;
use crate::parser::parse_table;

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Fails on a malformed URL, a transport error, or a non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Resolves a grade table source.
///
/// `None` selects [`GradeTable::smu`]. `http://` and `https://` sources
/// are downloaded, anything else is read from disk.
pub async fn load_table(source: Option<&str>) -> Result<GradeTable> {
    load_table_with(&BasicClient::new(), source).await
}

#[tracing::instrument(skip(client))]
pub async fn load_table_with<C: HttpClient>(client: &C, source: Option<&str>) -> Result<GradeTable> {
    let Some(source) = source else {
        debug!("Using built-in SMU grade table");
        return Ok(GradeTable::smu());
    };

    let bytes = if is_remote(source) {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("failed to download grade table from {source}"))?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read grade table {source}"))?
    };
    debug!(bytes = bytes.len(), "Grade table bytes loaded");

    let table = parse_table(&bytes)?;
    info!(grades = table.len(), "Grade table loaded");
    Ok(table)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::env;
    use std::fs;

    /// Answers every request with a fixed status and body.
    struct StaticClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for StaticClient {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .expect("valid response");
            Ok(reqwest::Response::from(resp))
        }
    }

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[tokio::test]
    async fn test_load_default_table() {
        let table = load_table(None).await.unwrap();
        assert_eq!(table, GradeTable::smu());
    }

    #[tokio::test]
    async fn test_load_table_from_file() {
        let path = temp_path("gpa_calc_test_table.json");
        fs::write(&path, r#"{"P": 4.0, "F": 0.0}"#).unwrap();

        let table = load_table(Some(path.as_str())).await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points("P"), Some(4.0));

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let path = temp_path("gpa_calc_test_missing_table.json");
        let _ = fs::remove_file(&path);

        let err = load_table(Some(path.as_str())).await.unwrap_err();
        assert!(err.to_string().contains("failed to read grade table"));
    }

    #[tokio::test]
    async fn test_load_table_over_http() {
        let client = StaticClient {
            status: 200,
            body: r#"{"HD": 4.0, "P": 2.0}"#,
        };
        let table = load_table_with(&client, Some("https://example.org/grades.json"))
            .await
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points("HD"), Some(4.0));
    }

    #[tokio::test]
    async fn test_load_table_http_not_found() {
        let client = StaticClient {
            status: 404,
            body: "not found",
        };
        let err = load_table_with(&client, Some("http://example.org/missing.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to download grade table"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_fails_on_server_error() {
        let client = StaticClient {
            status: 500,
            body: "",
        };
        assert!(fetch_bytes(&client, "http://example.org/").await.is_err());
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.org/grades.json"));
        assert!(is_remote("https://example.org/grades.json"));
        assert!(!is_remote("httpgrades.json"));
        assert!(!is_remote("https_tables/grades.json"));
        assert!(!is_remote("/tmp/grades.json"));
    }

    #[tokio::test]
    async fn test_local_file_named_like_http() {
        let client = StaticClient {
            status: 500,
            body: "",
        };
        let path = "httpgrades_gpa_calc_test.json";
        fs::write(path, r#"{"A": 4.0}"#).unwrap();

        let result = load_table_with(&client, Some(path)).await;
        fs::remove_file(path).unwrap();

        assert_eq!(result.unwrap().points("A"), Some(4.0));
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_url() {
        assert!(fetch_bytes(&BasicClient::new(), "http://").await.is_err());
    }
}
