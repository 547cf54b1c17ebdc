use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use super::loader;
use super::model::Catalog;

const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Anything that can hand back a full catalog in one call.
pub trait CatalogSource {
    /// Human-readable origin, for logs and the status bar.
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<Catalog, FetchError>;
    /// Whether the result should be persisted as a fresh raw snapshot.
    fn is_remote(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Response exceeded {0} bytes")]
    TooLarge(usize),
    #[error("Invalid catalog response: {0}")]
    Decode(String),
    #[error("Reading snapshot failed: {0}")]
    Snapshot(String),
}

impl FetchError {
    /// Whether trying again later could succeed. Nothing retries on its own;
    /// this only classifies the failure for reporting.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { code, .. } => *code == 429 || (500..=599).contains(code),
            FetchError::TooLarge(_) | FetchError::Decode(_) | FetchError::Snapshot(_) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// TAP archive client
// ---------------------------------------------------------------------------

/// Synchronous query against a TAP `sync` endpoint, one request per fetch.
pub struct TapArchive {
    agent: ureq::Agent,
    endpoint: String,
    table: String,
    columns: Vec<String>,
    max_response_bytes: usize,
}

impl TapArchive {
    pub fn new(
        endpoint: impl Into<String>,
        table: impl Into<String>,
        columns: Vec<String>,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
            table: table.into(),
            columns,
            max_response_bytes,
        }
    }

    /// The ADQL statement sent to the archive.
    pub fn query(&self) -> String {
        format!("select {} from {}", self.columns.join(","), self.table)
    }
}

impl CatalogSource for TapArchive {
    fn describe(&self) -> String {
        format!("table '{}' at {}", self.table, self.endpoint)
    }

    fn fetch(&self) -> Result<Catalog, FetchError> {
        let query = self.query();
        log::info!("Querying {}: {query}", self.endpoint);

        let response = match self
            .agent
            .get(&self.endpoint)
            .query("query", &query)
            .query("format", "json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_prefix(response, MAX_ERROR_BODY_BYTES);
                return Err(FetchError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(FetchError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response, self.max_response_bytes)?;
        let catalog =
            loader::parse_json_records(&body).map_err(|e| FetchError::Decode(format!("{e:#}")))?;
        log::info!("Fetched {} records", catalog.len());
        Ok(catalog)
    }
}

/// The first `max_bytes` of an error body, for the error message.
fn read_body_prefix(response: ureq::Response, max_bytes: usize) -> String {
    let mut bytes = Vec::new();
    if let Err(e) = response
        .into_reader()
        .take(max_bytes as u64)
        .read_to_end(&mut bytes)
    {
        return format!("<unreadable body: {e}>");
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, FetchError> {
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited
        .read_to_end(&mut bytes)
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if bytes.len() > max_bytes {
        return Err(FetchError::TooLarge(max_bytes));
    }
    String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// Snapshot source (offline mode)
// ---------------------------------------------------------------------------

/// Re-reads a previously persisted raw snapshot instead of querying.
pub struct SnapshotSource {
    pub path: PathBuf,
}

impl CatalogSource for SnapshotSource {
    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    fn fetch(&self) -> Result<Catalog, FetchError> {
        loader::load_file(&self.path).map_err(|e| FetchError::Snapshot(format!("{e:#}")))
    }

    fn is_remote(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned HTTP response and hand back the request line.
    fn serve_once(response: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let n = stream.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let _ = tx.send(request.lines().next().unwrap_or("").to_string());
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}/TAP/sync"), rx)
    }

    fn archive(endpoint: &str, max_bytes: usize) -> TapArchive {
        TapArchive::new(
            endpoint,
            "ps",
            vec!["pl_name".into(), "pl_orbper".into()],
            Duration::from_secs(5),
            max_bytes,
        )
    }

    #[test]
    fn query_uses_projection_and_table() {
        let a = archive("http://localhost", 1024);
        assert_eq!(a.query(), "select pl_name,pl_orbper from ps");
    }

    #[test]
    fn fetch_parses_json_rows() {
        let body = concat!(
            r#"[{"pl_name":"a","pl_orbper":12.5,"pl_rade":1.0,"pl_masse":null,"#,
            r#""st_mass":1.0,"st_rad":1.0,"st_teff":5700},"#,
            r#"{"pl_name":"b","pl_orbper":null,"pl_rade":null,"pl_masse":null,"#,
            r#""st_mass":null,"st_rad":null,"st_teff":null}]"#,
        );
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, requests) = serve_once(response);
        let catalog = archive(&url, 1 << 20).fetch().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0].orbital_period, Some(12.5));
        assert_eq!(catalog.records[1].orbital_period, None);

        let request_line = requests.recv().unwrap();
        assert!(request_line.contains("format=json"), "{request_line}");
        assert!(
            request_line.contains("from+ps") || request_line.contains("from%20ps"),
            "{request_line}"
        );
    }

    #[test]
    fn server_error_is_retryable_status() {
        let response =
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\n\r\nbusy".to_string();
        let (url, _requests) = serve_once(response);
        let err = archive(&url, 1024).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Status { code: 503, .. }), "{err}");
        assert!(err.is_retryable());
    }

    #[test]
    fn large_error_body_is_truncated_not_replaced() {
        let body = "e".repeat(MAX_ERROR_BODY_BYTES + 100);
        let response = format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, _requests) = serve_once(response);
        let err = archive(&url, 1024).fetch().unwrap_err();
        match err {
            FetchError::Status { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "e".repeat(MAX_ERROR_BODY_BYTES));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn projection_without_required_column_fails_to_decode() {
        let body = r#"[{"pl_name":"a","pl_orbper":12.5}]"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let (url, _requests) = serve_once(response);
        let err = archive(&url, 1 << 20).fetch().unwrap_err();
        assert!(matches!(&err, FetchError::Decode(msg) if msg.contains("pl_rade")), "{err}");
    }

    #[test]
    fn oversized_body_is_rejected() {
        let body = "x".repeat(64);
        let response = format!("HTTP/1.0 200 OK\r\n\r\n{body}");
        let (url, _requests) = serve_once(response);
        let err = archive(&url, 16).fetch().unwrap_err();
        assert!(matches!(err, FetchError::TooLarge(16)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let response = "HTTP/1.1 200 OK\r\nContent-Length: 9\r\n\r\nnot json!".to_string();
        let (url, _requests) = serve_once(response);
        let err = archive(&url, 1024).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = archive(&format!("http://{addr}/"), 1024).fetch().unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn snapshot_source_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(
            &path,
            "pl_name,pl_orbper,pl_rade,pl_masse,st_mass,st_rad,st_teff\nx,1,1,1,1,1,5778\n",
        )
        .unwrap();
        let source = SnapshotSource { path };
        assert!(!source.is_remote());
        assert_eq!(source.fetch().unwrap().len(), 1);

        let missing = SnapshotSource { path: dir.path().join("nope.csv") };
        assert!(matches!(missing.fetch(), Err(FetchError::Snapshot(_))));
    }
}
