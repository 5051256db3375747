//! HTTP client wrapper - fetches valuations and decodes responses

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use crate::constants::DCF_PATH;
use crate::messages::NetworkResponse;
use crate::models::DcfResponse;

/// Why a lookup did not produce a decodable body
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),
    #[error("connection failed: {0}")]
    Connect(reqwest::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else if e.is_connect() {
            FetchError::Connect(e)
        } else {
            FetchError::Request(e)
        }
    }
}

/// Raw status and body of a finished exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the outbound GET; swapped out in tests
pub trait ValuationTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpReply, FetchError>> + Send + 'a>>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        ReqwestTransport {
            client: create_client(timeout),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ValuationTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpReply, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self.client.get(url).send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            Ok(HttpReply { status, body })
        })
    }
}

/// Compose `<base>/dcf?ticker=<ticker>` with the ticker percent-encoded
pub fn dcf_url(base_url: &str, ticker: &str) -> String {
    format!(
        "{}{}?ticker={}",
        base_url.trim_end_matches('/'),
        DCF_PATH,
        urlencoding::encode(ticker)
    )
}

/// Turn a raw reply into a response body. Non-2xx is a transport failure
/// even when the body carries an `error` field.
pub fn decode_reply(reply: HttpReply) -> Result<DcfResponse, FetchError> {
    if !reply.is_success() {
        return Err(FetchError::Status(reply.status));
    }
    Ok(serde_json::from_str(&reply.body)?)
}

/// Fetch and decode a valuation for `ticker`
pub async fn fetch_valuation<T: ValuationTransport + ?Sized>(
    transport: &T,
    base_url: &str,
    ticker: &str,
) -> Result<DcfResponse, FetchError> {
    let url = dcf_url(base_url, ticker);
    let reply = transport.get(&url).await?;
    decode_reply(reply)
}

/// Run one lookup and package the outcome for the App layer
pub async fn execute_fetch<T: ValuationTransport + ?Sized>(
    transport: &T,
    base_url: &str,
    ticker: &str,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = fetch_valuation(transport, base_url, ticker).await;
    let time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(payload) => NetworkResponse::Completed {
            id: request_id,
            payload,
            time_ms,
        },
        Err(e) => {
            tracing::warn!(id = request_id, ticker, error = %e, "Valuation request failed");
            NetworkResponse::Failed {
                id: request_id,
                message: e.to_string(),
                time_ms,
            }
        }
    }
}

/// Create an HTTP client. No timeout unless one is configured.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Valuation;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Returns a canned reply and remembers requested URLs
    struct CannedTransport {
        reply: Result<HttpReply, String>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn ok(status: u16, body: &str) -> Self {
            CannedTransport {
                reply: Ok(HttpReply {
                    status,
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            CannedTransport {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ValuationTransport for CannedTransport {
        fn get<'a>(
            &'a self,
            url: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<HttpReply, FetchError>> + Send + 'a>> {
            self.seen.lock().unwrap().push(url.to_string());
            let reply = self.reply.clone().map_err(FetchError::Transport);
            Box::pin(async move { reply })
        }
    }

    /// One-shot HTTP server answering with `status` and `body`; yields the request line
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&buf)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_dcf_url_plain_ticker() {
        assert_eq!(
            dcf_url("http://127.0.0.1:8000", "AAPL"),
            "http://127.0.0.1:8000/dcf?ticker=AAPL"
        );
    }

    #[test]
    fn test_dcf_url_encodes_special_characters() {
        assert_eq!(
            dcf_url("http://127.0.0.1:8000/", "BRK.B&x=1"),
            "http://127.0.0.1:8000/dcf?ticker=BRK.B%26x%3D1"
        );
        assert_eq!(
            dcf_url("http://127.0.0.1:8000", "a b"),
            "http://127.0.0.1:8000/dcf?ticker=a%20b"
        );
    }

    #[test]
    fn test_decode_non_success_status() {
        let err = decode_reply(HttpReply {
            status: 404,
            body: r#"{"error":"not here"}"#.into(),
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_reply(HttpReply {
            status: 200,
            body: "<html>oops</html>".into(),
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_valuation_success() {
        let transport = CannedTransport::ok(
            200,
            r#"{"ticker":"AAPL","intrinsicValue":123.456,"currentPrice":150,"wacc":8,"terminalGrowth":2}"#,
        );

        let result = fetch_valuation(&transport, "http://127.0.0.1:8000", "AAPL")
            .await
            .unwrap();

        assert_eq!(
            result,
            DcfResponse::Valuation(Valuation {
                ticker: "AAPL".into(),
                intrinsic_value: 123.456,
                current_price: 150.0,
                wacc: 8.0,
                terminal_growth: 2.0,
            })
        );
        assert_eq!(
            transport.seen.lock().unwrap().as_slice(),
            ["http://127.0.0.1:8000/dcf?ticker=AAPL"]
        );
    }

    #[tokio::test]
    async fn test_fetch_valuation_payload_error() {
        let transport = CannedTransport::ok(200, r#"{"error":"Ticker not found"}"#);
        let result = fetch_valuation(&transport, "http://backend", "NOPE").await.unwrap();
        assert_eq!(
            result,
            DcfResponse::Failure {
                error: "Ticker not found".into()
            }
        );
    }

    #[tokio::test]
    async fn test_execute_fetch_reports_transport_failure() {
        let transport = CannedTransport::failing("network unreachable");
        let response = execute_fetch(&transport, "http://backend", "AAPL", 7).await;
        match response {
            NetworkResponse::Failed { id, message, .. } => {
                assert_eq!(id, 7);
                assert_eq!(message, "network unreachable");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reqwest_transport_round_trip() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"ticker":"BRK.B","intrinsicValue":400,"currentPrice":410.5,"wacc":7.5,"terminalGrowth":2.5}"#,
        )
        .await;

        let transport = ReqwestTransport::default();
        let result = fetch_valuation(&transport, &base, "BRK.B").await.unwrap();

        assert!(matches!(result, DcfResponse::Valuation(ref v) if v.ticker == "BRK.B"));
        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /dcf?ticker=BRK.B HTTP/1.1");
    }

    #[tokio::test]
    async fn test_reqwest_transport_server_error() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;

        let transport = ReqwestTransport::default();
        let err = fetch_valuation(&transport, &base, "AAPL").await.unwrap_err();

        assert!(matches!(err, FetchError::Status(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_configured_timeout_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        // Accept connections and hold them open without answering
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let transport = ReqwestTransport::new(Some(Duration::from_millis(200)));

        let err = fetch_valuation(&transport, &base, "AAPL").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "got {:?}", err);

        let response = execute_fetch(&transport, &base, "AAPL", 4).await;
        assert!(matches!(response, NetworkResponse::Failed { id: 4, .. }));

        server.abort();
    }

    #[tokio::test]
    async fn test_reqwest_transport_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = ReqwestTransport::default();
        let response = execute_fetch(&transport, &base, "AAPL", 1).await;
        assert!(matches!(response, NetworkResponse::Failed { id: 1, .. }));
    }
}
