use crate::error::ApiError;
use crate::responses::decode_page;
use async_trait::async_trait;
use configuration::FetchSettings;
use core_types::BetRecord;

pub mod error;
pub mod pagination;
pub mod query;
pub mod responses;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

// --- Public API ---
pub use pagination::fetch_all_bets;
pub use query::BetsQuery;

/// The abstract interface to a source of resolved bets.
/// The fetcher and the report engine only ever see this trait, allowing the
/// underlying implementation (subgraph or in-memory) to be swapped out.
#[async_trait]
pub trait BetSource: Send + Sync {
    /// Fetches a single page of bets matching `query`.
    async fn fetch_page(&self, query: &BetsQuery) -> Result<Vec<BetRecord>, ApiError>;
}

/// A [`BetSource`] backed by a chain's GraphQL subgraph.
#[derive(Clone)]
pub struct SubgraphClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>, settings: &FetchSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BetSource for SubgraphClient {
    async fn fetch_page(&self, query: &BetsQuery) -> Result<Vec<BetRecord>, ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&query.to_request())
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_page(&text, query.entity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{BetCategory, BetResult, TimeWindow};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one HTTP exchange with a canned reply and returns the client's URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            let reply = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{addr}/subgraphs/name/test")
    }

    /// Drains the request headers and its `Content-Length` body.
    async fn read_request(stream: &mut tokio::net::TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }

    fn live_query() -> BetsQuery {
        BetsQuery {
            category: BetCategory::Live,
            window: TimeWindow::new(1_700_000_000, 1_700_086_400).unwrap(),
            first: 1000,
            skip: 0,
        }
    }

    #[tokio::test]
    async fn non_success_status_keeps_code_and_body() {
        let url = serve_once("502 Bad Gateway", "oops").await;
        let client = SubgraphClient::new(url, &FetchSettings::default()).unwrap();

        let err = client.fetch_page(&live_query()).await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "oops");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_reply_decodes_the_live_page() {
        let url = serve_once(
            "200 OK",
            r#"{"data":{"liveBets":[{"amount":"1","odds":"2","result":"Won"}]}}"#,
        )
        .await;
        let client = SubgraphClient::new(url, &FetchSettings::default()).unwrap();

        let bets = client.fetch_page(&live_query()).await.unwrap();
        assert_eq!(bets, vec![BetRecord::new("1", "2", BetResult::Won)]);
    }
}
