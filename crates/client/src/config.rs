use std::time::Duration;

/// Default API base URL for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin without the `/api/v1` prefix, e.g. `http://host:3000`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `ASSETRACK_API_URL` and `ASSETRACK_API_TIMEOUT_SECS`.
    ///
    /// # Panics
    ///
    /// Panics if the timeout is set but not an integer.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ASSETRACK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout_secs: u64 = std::env::var("ASSETRACK_API_TIMEOUT_SECS")
            .map(|v| v.parse().expect("ASSETRACK_API_TIMEOUT_SECS must be an integer"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs))
    }

    /// Full URL for an `/api/v1` path such as `/assets`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// WebSocket URL for an `/api/v1` path (`http` -> `ws`, `https` -> `wss`).
    pub fn ws_url(&self, path: &str) -> String {
        let url = self.api_url(path);
        if let Some(rest) = url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            url
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://api.local/");
        assert_eq!(config.api_url("/assets"), "http://api.local/api/v1/assets");
    }

    #[test]
    fn ws_url_swaps_scheme() {
        assert_eq!(
            ClientConfig::new("http://h:3000").ws_url("/realtime"),
            "ws://h:3000/api/v1/realtime"
        );
        assert_eq!(
            ClientConfig::new("https://h").ws_url("/realtime"),
            "wss://h/api/v1/realtime"
        );
    }

    #[test]
    fn default_timeout() {
        assert_eq!(ClientConfig::default().timeout, Duration::from_secs(30));
    }
}
