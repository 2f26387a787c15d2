use serde_json::Value;

/// An entity is an opaque JSON document; only its `id` is ever inspected.
pub type Entity = Value;

/// Query parameters in insertion order; keys may repeat.
pub type QueryParams = Vec<(String, String)>;

/// Response holds a successful (2xx) HTTP exchange as raw bytes.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
    /// Filename suggested by a `Content-Disposition` header
    pub filename: Option<String>,
}

impl Response {
    /// Create a response from its parts
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Response {
            status,
            body,
            filename: None,
        }
    }

    /// Check whether the server answered with no content (204 or a blank body)
    pub fn is_no_content(&self) -> bool {
        self.status == 204 || self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response and return its body
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Apply unmarshals the response body into the provided type
    pub fn apply<T>(&self) -> Result<T, crate::error::RestError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(|e| e.into())
    }

    /// Decode the body as an entity; an empty body yields `Value::Null`
    pub fn entity(&self) -> Result<Entity, crate::error::RestError> {
        if self.is_no_content() {
            return Ok(Value::Null);
        }
        self.apply()
    }
}

/// Extract the filename from a `Content-Disposition` header value.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Read the `id` of an entity.
pub fn entity_id(entity: &Entity) -> Option<&str> {
    entity.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_no_content() {
        assert!(Response::new(204, Vec::new()).is_no_content());
        assert!(Response::new(200, Vec::new()).is_no_content());
        assert!(Response::new(200, b" \n".to_vec()).is_no_content());
        assert!(!Response::new(200, b"{}".to_vec()).is_no_content());
    }

    #[test]
    fn test_response_apply() {
        let response = Response::new(200, br#"{"id":"abc","name":"test"}"#.to_vec());
        let entity = response.entity().unwrap();
        assert_eq!(entity_id(&entity), Some("abc"));
        assert_eq!(entity["name"], "test");
    }

    #[test]
    fn test_response_entity_empty() {
        let response = Response::new(204, Vec::new());
        assert_eq!(response.entity().unwrap(), Value::Null);
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="export-2024.zip""#),
            Some("export-2024.zip".to_string())
        );
        assert_eq!(
            parse_content_disposition("attachment; filename=backup.zip"),
            Some("backup.zip".to_string())
        );
        assert_eq!(parse_content_disposition("attachment"), None);
    }
}
