use reqwest::blocking::RequestBuilder;

/// Header carrying the API key on every authenticated request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// ApiKey holds the secret sent with each request.
///
/// An empty key means "unauthenticated": the header is omitted entirely
/// rather than sent with an empty value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new ApiKey; surrounding whitespace is dropped
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        ApiKey(key.trim().to_string())
    }

    /// Check whether the key is empty and therefore never sent
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw key value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Attach the `X-API-Key` header to a request when the key is non-empty
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        if self.is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.0)
        }
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        ApiKey::new(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        ApiKey::new(key)
    }
}

impl From<Option<String>> for ApiKey {
    fn from(key: Option<String>) -> Self {
        key.map(ApiKey::new).unwrap_or_default()
    }
}

// Implement Debug manually to avoid exposing the key in logs
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = if self.is_empty() { "<none>" } else { "<redacted>" };
        f.debug_tuple("ApiKey").field(&shown).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apikey_empty() {
        assert!(ApiKey::default().is_empty());
        assert!(ApiKey::new("   ").is_empty());
        assert!(ApiKey::from(None::<String>).is_empty());
    }

    #[test]
    fn test_apikey_trimmed() {
        let key = ApiKey::new(" abc123\n");
        assert_eq!(key.as_str(), "abc123");
        assert!(!key.is_empty());
    }

    #[test]
    fn test_apikey_debug_redacted() {
        let key = ApiKey::new("super-secret");
        let printed = format!("{:?}", key);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_apply_to_request() {
        let client = reqwest::blocking::Client::new();

        let request = ApiKey::new("k1")
            .apply_to_request(client.get("http://localhost/"))
            .build()
            .unwrap();
        assert_eq!(request.headers().get(API_KEY_HEADER).unwrap(), "k1");

        let request = ApiKey::default()
            .apply_to_request(client.get("http://localhost/"))
            .build()
            .unwrap();
        assert!(request.headers().get(API_KEY_HEADER).is_none());
    }
}
