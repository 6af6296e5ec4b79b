use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::RemoteError;

/// Request/response access to the backend. One attempt per call.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the JSON document served at `endpoint`.
    async fn get(&self, endpoint: &str) -> Result<Value, RemoteError>;

    /// Submit `body` to `endpoint`. Returns the response document, or `None`
    /// when the backend answered with an empty body.
    async fn post(&self, endpoint: &str, body: Value) -> Result<Option<Value>, RemoteError>;
}

/// JSON-over-HTTP backend client.
pub struct HttpRemote {
    client: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn get(&self, endpoint: &str) -> Result<Value, RemoteError> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| RemoteError::unavailable(endpoint, e))?;

        let response = check_status(endpoint, response)?;

        response
            .json::<Value>()
            .await
            .map_err(|e| RemoteError::malformed(endpoint, e))
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Option<Value>, RemoteError> {
        let response = self
            .client
            .post(self.url(endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::unavailable(endpoint, e))?;

        let response = check_status(endpoint, response)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::unavailable(endpoint, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RemoteError::malformed(endpoint, e))
    }
}

fn check_status(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::unavailable(endpoint, format!("status {}", status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let remote = HttpRemote::new("http://localhost:5000/api/");
        assert_eq!(remote.base_url(), "http://localhost:5000/api");
        assert_eq!(remote.url("/users"), "http://localhost:5000/api/users");
    }

    #[tokio::test]
    async fn closed_port_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let remote = HttpRemote::new(format!("http://{}/api", addr));
        let err = remote.get("/users").await.unwrap_err();
        assert!(matches!(err, RemoteError::Unavailable { .. }));
    }
}
