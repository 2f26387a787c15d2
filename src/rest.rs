use crate::apikey::ApiKey;
use crate::client::{create_rest_client, create_transfer_client, Config};
use crate::error::{RestError, Result};
use crate::response::{parse_content_disposition, QueryParams, Response};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Request body; a request carries at most one.
#[derive(Debug, Clone)]
pub enum Body {
    /// JSON document sent with `Content-Type: application/json`
    Json(Value),
    /// Multipart form with a single file attachment
    File {
        field: String,
        file_name: String,
        content: Vec<u8>,
    },
}

/// Options composed onto a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters; repeated keys are sent repeatedly
    pub query: QueryParams,
    /// Optional body
    pub body: Option<Body>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    pub fn queries<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Send a JSON body, replacing any previous body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Attach a file as multipart form data, replacing any previous body
    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.body = Some(Body::File {
            field: field.into(),
            file_name: file_name.into(),
            content,
        });
        self
    }
}

/// Client bound to one base URL and an optional API key.
///
/// Clients are immutable; [`RestClient::sub_client`] derives a new client
/// for a nested path that shares the key and the connection pool.
#[derive(Debug, Clone)]
pub struct RestClient {
    /// HTTP client for entity requests
    http: Client,
    /// HTTP client for export/import
    transfer: Client,
    /// Base URL without a trailing slash
    base_url: String,
    /// API key, possibly empty
    api_key: ApiKey,
}

impl RestClient {
    /// Create a new client for the given base URL and API key
    pub fn new(base_url: &str, api_key: impl Into<ApiKey>) -> Result<Self> {
        Self::with_config(Config::new(base_url).with_api_key(api_key))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Url::parse(&config.base_url)?;
        Ok(RestClient {
            http: create_rest_client(&config)?,
            transfer: create_transfer_client(&config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Base URL of this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API key of this client
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Derive a client for `{base}/{segment}` with the same API key
    pub fn sub_client(&self, segment: &str) -> RestClient {
        let segment = segment.trim_matches('/');
        let base_url = if segment.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, segment)
        };
        RestClient {
            base_url,
            ..self.clone()
        }
    }

    /// Derive a client for the same base URL that never sends the API key
    pub fn anonymous(&self) -> RestClient {
        RestClient {
            api_key: ApiKey::default(),
            ..self.clone()
        }
    }

    /// Full URL for a path relative to the base URL
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Execute a request and return the raw response
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the base URL; empty targets the base URL
    /// * `options` - Query parameters and body
    ///
    /// # Errors
    /// Any non-2xx status becomes [`RestError::Http`] with the body preserved;
    /// transport failures become [`RestError::Http`] with status 500.
    pub fn execute(&self, method: Method, path: &str, options: RequestOptions) -> Result<Response> {
        self.send(&self.http, method, path, options)
    }

    /// Execute a request on the transfer client (longer timeout)
    pub(crate) fn execute_transfer(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        self.send(&self.transfer, method, path, options)
    }

    fn send(&self, http: &Client, method: Method, path: &str, options: RequestOptions) -> Result<Response> {
        let mut url = Url::parse(&self.url_for(path))?;
        if !options.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &options.query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = self
            .api_key
            .apply_to_request(http.request(method.clone(), url.as_str()));

        match options.body {
            Some(Body::Json(value)) => {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(serde_json::to_vec(&value)?);
            }
            Some(Body::File {
                field,
                file_name,
                content,
            }) => {
                let part = Part::bytes(content)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")
                    .map_err(|e| RestError::RequestBuild(e.to_string()))?;
                request = request.multipart(Form::new().part(field, part));
            }
            None => {}
        }

        let start = Instant::now();
        let http_response = request.send().map_err(|e| {
            if e.is_builder() {
                return RestError::RequestBuild(e.to_string());
            }
            warn!(%method, %url, error = %e, "request failed before a response was received");
            RestError::transport(e)
        })?;
        let status = http_response.status();

        let filename = http_response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_disposition);

        let body = http_response.bytes().map_err(RestError::transport)?;

        debug!(
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        if !status.is_success() {
            return Err(RestError::http(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
                None,
            ));
        }

        Ok(Response {
            status: status.as_u16(),
            body: body.to_vec(),
            filename,
        })
    }
}
