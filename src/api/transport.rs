use super::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Path prefix every endpoint lives under
pub const API_BASE: &str = "/api";

/// A request relative to the API root
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below the API root, unencoded
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Unencoded path, used for logging and matching
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Sends a request and hands back the raw response body.
///
/// The body is returned whatever the HTTP status is; the envelope inside
/// decides whether the call succeeded.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<String, ApiError>;
}

/// reqwest-backed transport talking to `{base_url}/api`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_root: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_root: format!("{}{}", base_url.trim_end_matches('/'), API_BASE),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let url = build_url(&self.api_root, &request.segments, &request.query)?;

        tracing::debug!(method = %request.method, path = %request.path(), "sending request");

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

        Ok(body)
    }
}

/// Build a full URL from the API root, path segments and query parameters.
/// Segments and query values are percent-encoded.
pub(crate) fn build_url(
    api_root: &str,
    segments: &[String],
    query: &[(String, String)],
) -> Result<String, ApiError> {
    let mut url = Url::parse(api_root).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(format!("{api_root} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Outcome, StudentApi};

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_build_url_basic() {
        let url = build_url("http://localhost:5000/api", &segs(&["students"]), &[]);
        assert_eq!(url.unwrap(), "http://localhost:5000/api/students");
    }

    #[test]
    fn test_build_url_nested_segments() {
        let url = build_url(
            "http://localhost:5000/api",
            &segs(&["students", "123", "grades"]),
            &[],
        );
        assert_eq!(
            url.unwrap(),
            "http://localhost:5000/api/students/123/grades"
        );
    }

    #[test]
    fn test_build_url_encodes_segments() {
        let url = build_url(
            "http://localhost:5000/api",
            &segs(&["students", "a b/c"]),
            &[],
        );
        assert_eq!(url.unwrap(), "http://localhost:5000/api/students/a%20b%2Fc");
    }

    #[test]
    fn test_build_url_special_chars_in_query() {
        let url = build_url(
            "http://localhost:5000/api",
            &segs(&["students", "search"]),
            &[("name".to_string(), "Ada Love&lace".to_string())],
        );
        assert_eq!(
            url.unwrap(),
            "http://localhost:5000/api/students/search?name=Ada+Love%26lace"
        );
    }

    #[test]
    fn test_build_url_with_trailing_slash_in_root() {
        let url = build_url("http://localhost:5000/api/", &segs(&["undo"]), &[]);
        assert_eq!(url.unwrap(), "http://localhost:5000/api/undo");
    }

    #[test]
    fn test_build_url_invalid_root() {
        let url = build_url("not a valid url", &segs(&["students"]), &[]);
        assert!(matches!(url, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_transport_appends_api_prefix() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(transport.api_root(), "http://localhost:5000/api");
    }

    /// Answer one HTTP request with `status` and `body`, return the server origin
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_an_envelope() {
        let base_url = serve_once(
            "404 Not Found",
            r#"{"success": false, "message": "Student not found"}"#,
        )
        .await;
        let api = StudentApi::new(HttpTransport::new(&base_url));

        let outcome = api.get_student("x").await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Failure {
                message: Some("Student not found".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_without_envelope_is_invalid_response() {
        let base_url = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
        let api = StudentApi::new(HttpTransport::new(&base_url));

        let result = api.get_student("x").await;

        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_request_path_is_unencoded() {
        let request = ApiRequest::get(["students", "search"]).with_query("name", "Ada");
        assert_eq!(request.path(), "/students/search");
        assert_eq!(request.query, vec![("name".to_string(), "Ada".to_string())]);
    }
}
