use super::{SearchError, SearchProvider, SearchResult};
use crate::config::BoardConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const SEARCH_PATH: &str = "/api/hltb/search";

/// Talks to the metadata search service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BoardConfig) -> Result<Self, SearchError> {
        Self::new(config.search_url.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

impl SearchProvider for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.endpoint();
        debug!(%url, query, "Searching metadata");

        let response = self.client.get(&url).query(&[("q", query)]).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), query, "Metadata search rejected");
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let results: Vec<SearchResult> = serde_json::from_str(&body)?;
        debug!(count = results.len(), "Metadata search complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned response and hands back the raw request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });
        (base, handle)
    }

    fn client(base: &str) -> HttpSearchClient {
        HttpSearchClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = client("http://localhost:5173/");
        assert_eq!(client.endpoint(), "http://localhost:5173/api/hltb/search");
    }

    #[tokio::test]
    async fn sends_query_and_decodes_results() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":"62941","name":"Hades","imageUrl":"","gameplayMain":79200,"gameplayMainExtra":0,"gameplayCompletionist":0}]"#,
        )
        .await;

        let results = client(&base).search("hades ii").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "62941");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/hltb/search?q=hades+ii "));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _server) =
            serve_once("500 Internal Server Error", r#"{"error":"Failed to search HLTB"}"#).await;
        let err = client(&base).search("hades").await.unwrap_err();
        assert!(matches!(err, SearchError::Status(500)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (base, _server) = serve_once("200 OK", r#"{"results":[]}"#).await;
        let err = client(&base).search("hades").await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client(&base).search("hades").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
