//! JSON client for the `/api/v1` endpoints.
//!
//! Successful bodies are `{ "data": T }`; failures are
//! `{ "error": message, "code": CODE }` and become [`ClientError::Http`].

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: Option<String>,
}

/// Cheap to clone; clones share the connection pool and access token.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: ClientConfig,
    access_token: Arc<RwLock<Option<String>>>,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(http, config))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    pub async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path).await;
        Self::parse_response(request.send().await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        Self::parse_response(request.send().await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).await.json(body);
        Self::parse_response(request.send().await?).await
    }

    /// POST that expects an empty (204) response.
    pub async fn post_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let request = self.request(Method::POST, path).await.json(body);
        Self::check_status(request.send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, path).await;
        Self::check_status(request.send().await?).await
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.api_url(path));
        match self.access_token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_body(status, &bytes)
    }

    async fn check_status(response: Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = response.bytes().await?;
        Err(error_from_body(status, &bytes))
    }
}

/// Decode a response body: `data` on success, [`ClientError::Http`] otherwise.
fn decode_body<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ClientError> {
    if !status.is_success() {
        return Err(error_from_body(status, bytes));
    }
    serde_json::from_slice::<Envelope<T>>(bytes)
        .map(|envelope| envelope.data)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn error_from_body(status: StatusCode, bytes: &[u8]) -> ClientError {
    let (message, code) = match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => (body.error, body.code),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), None),
    };
    ClientError::Http {
        status: status.as_u16(),
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    #[test]
    fn success_unwraps_data() {
        let body = br#"{"data": {"id": 1, "name": "Laptop"}}"#;
        let item: Item = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(
            item,
            Item {
                id: 1,
                name: "Laptop".into(),
            }
        );
    }

    #[test]
    fn error_body_becomes_http_error() {
        let body = br#"{"error": "Asset with id 9 not found", "code": "NOT_FOUND"}"#;
        let err = decode_body::<Item>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert_matches!(
            err,
            ClientError::Http { status: 404, code: Some(ref code), ref message }
                if code == "NOT_FOUND" && message.contains("not found")
        );
    }

    #[test]
    fn non_json_error_keeps_raw_text() {
        let err = decode_body::<Item>(StatusCode::BAD_GATEWAY, b"upstream down").unwrap_err();
        assert_matches!(
            err,
            ClientError::Http { status: 502, code: None, ref message } if message == "upstream down"
        );
    }

    #[test]
    fn missing_envelope_is_decode_error() {
        let err = decode_body::<Item>(StatusCode::OK, br#"{"id": 1, "name": "x"}"#).unwrap_err();
        assert_matches!(err, ClientError::Decode(_));
    }

    #[test]
    fn unauthorized_detection() {
        let body = br#"{"error":"no","code":"UNAUTHORIZED"}"#;
        let err = decode_body::<Item>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(ClientError::NotAuthenticated.is_unauthorized());
    }
}
