//! HTTP client for the liturgy service.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Request};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::liturgy::types::LiturgyDocument;

/// Anything that can produce the liturgy for a calendar date.
///
/// The terminal front-end talks to the service through this trait so the
/// transport can be replaced (tests use an in-memory source).
#[async_trait]
pub trait LiturgySource: Send + Sync {
    /// Fetch the liturgy for `date`. The year is not sent; the service
    /// resolves the liturgical year itself.
    async fn fetch_liturgy(&self, date: NaiveDate) -> Result<LiturgyDocument>;
}

/// Query pairs for a date: zero-padded day of month and 1-indexed month.
pub fn liturgy_query(date: NaiveDate) -> [(&'static str, String); 2] {
    [
        ("dia", format!("{:02}", date.day())),
        ("mes", format!("{:02}", date.month())),
    ]
}

/// Client for the remote liturgy service
#[derive(Clone)]
pub struct LiturgyClient {
    base_url: String,
    client: Client,
}

impl LiturgyClient {
    /// Create a new liturgy client from config
    pub fn new(config: &Config) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(timeout = ?config.request_timeout, "falling back to default HTTP client: {e}");
            Client::default()
        });
        Self {
            base_url: config.api_url.clone(),
            client,
        }
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the single GET request for a date without sending it
    pub fn request(&self, date: NaiveDate) -> Result<Request> {
        let query = liturgy_query(date);
        self.client
            .get(&self.base_url)
            .query(&query[..])
            .build()
            .map_err(|e| Error::Network(format!("Invalid request for {date}: {e}")))
    }
}

#[async_trait]
impl LiturgySource for LiturgyClient {
    async fn fetch_liturgy(&self, date: NaiveDate) -> Result<LiturgyDocument> {
        let request = self.request(date)?;
        let url = request.url().to_string();
        tracing::debug!(%url, "requesting liturgy");

        let resp = self.client
            .execute(request)
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::service_status(
                format!("Request to {url} returned {status}"),
                status.as_u16(),
            ));
        }

        let body = resp.text().await
            .map_err(|e| Error::Network(format!("Reading body from {url} failed: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::parse(format!("Invalid liturgy JSON from {url}: {e}"), Some(&body)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::liturgy::fixtures;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use std::time::Duration;
    use tokio::task::JoinHandle;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client_for(url: &str) -> LiturgyClient {
        let mut config = Config::default();
        config.api_url = url.to_string();
        LiturgyClient::new(&config)
    }

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back the request line that was received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if received.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });
        (format!("http://{addr}/"), handle)
    }

    #[test]
    fn query_is_zero_padded_day_and_month() {
        let [(dia_key, dia), (mes_key, mes)] = liturgy_query(date(2024, 3, 7));
        assert_eq!((dia_key, dia.as_str()), ("dia", "07"));
        assert_eq!((mes_key, mes.as_str()), ("mes", "03"));
    }

    #[test]
    fn christmas_request_targets_day_25_month_12() {
        let client = LiturgyClient::new(&Config::default());
        let request = client.request(date(2024, 12, 25)).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://liturgia.up.railway.app/?dia=25&mes=12"
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn year_is_not_part_of_request() {
        let client = LiturgyClient::new(&Config::default());
        let a = client.request(date(1999, 1, 2)).unwrap();
        let b = client.request(date(2031, 1, 2)).unwrap();
        assert_eq!(a.url(), b.url());
    }

    #[tokio::test]
    async fn fetch_parses_successful_response() {
        let (url, server) = serve_once("200 OK", fixtures::CHRISTMAS_JSON).await;
        let doc = client_for(&url).fetch_liturgy(date(2024, 12, 25)).await.unwrap();
        assert_eq!(doc, fixtures::christmas());
        assert_eq!(server.await.unwrap(), "GET /?dia=25&mes=12 HTTP/1.1");
    }

    #[tokio::test]
    async fn non_success_status_is_service_error() {
        let (url, server) = serve_once("503 Service Unavailable", "").await;
        let err = client_for(&url).fetch_liturgy(date(2024, 6, 1)).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let err = client_for(&url).fetch_liturgy(date(2024, 6, 1)).await.unwrap_err();
        match err {
            Error::Parse { body: Some(body), .. } => assert!(body.contains("oops")),
            other => panic!("expected parse error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}/"))
            .fetch_liturgy(date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn client_keeps_configured_base_url() {
        let client = client_for("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080/");
        let request = client.request(date(2024, 12, 25)).unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/?dia=25&mes=12");
    }

    #[tokio::test]
    async fn configured_timeout_cuts_off_silent_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let mut config = Config::default();
        config.api_url = format!("http://{addr}/");
        config.request_timeout = Some(Duration::from_millis(200));
        let err = LiturgyClient::new(&config)
            .fetch_liturgy(date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {err:?}");
        server.abort();
    }
}
