/*
[INPUT]:  HTTP configuration (base URLs, timeouts), optional API credentials,
          (verb, path, payload) triples from the resource groups
[OUTPUT]: ApiResponse<T> envelopes; never an error past this boundary
[POS]:    HTTP layer - core client and request dispatcher
[UPDATE]: When adding connection options or changing dispatch/normalization rules
*/

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::auth::canonical_value;
use crate::http::instruction::{self, HttpMethod};
use crate::http::{ApiError, ApiResponse, BpxError, RequestSigner, Result};

/// Base URLs for the Backpack API
pub const DEFAULT_HTTP_URL: &str = "https://api.backpack.exchange";
pub const DEFAULT_WS_URL: &str = "wss://ws.backpack.exchange";

const JSON_CONTENT_TYPE: &str = "application/json";
const DECODE_ERROR_CODE: &str = "DECODE_ERROR";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub http_url: String,
    pub ws_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_url: DEFAULT_HTTP_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// API key pair for authenticated requests
#[derive(Clone)]
pub struct Credentials {
    /// Base64 verifying key, sent verbatim as `X-API-Key`
    pub api_key: String,
    /// Base64 secret; the first 32 decoded bytes are the Ed25519 seed
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Main HTTP client for the Backpack API
#[derive(Debug, Clone)]
pub struct BpxClient {
    http_client: Client,
    base_url: Url,
    ws_url: Url,
    signer: Option<RequestSigner>,
}

impl BpxClient {
    /// Create a public (unauthenticated) client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a public client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(&config.http_url)?;
        let ws_url = Url::parse(&config.ws_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BpxError::Config(format!("http_url must be http(s): {base_url}")));
        }
        if !matches!(ws_url.scheme(), "ws" | "wss") {
            return Err(BpxError::Config(format!("ws_url must be ws(s): {ws_url}")));
        }

        Ok(Self {
            http_client,
            base_url,
            ws_url,
            signer: None,
        })
    }

    /// Create an authenticated client; fails fast on undecodable key material
    pub fn with_credentials(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_credentials(credentials)?;
        Ok(client)
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<()> {
        self.signer = Some(RequestSigner::new(
            credentials.api_key,
            &credentials.api_secret,
        )?);
        Ok(())
    }

    /// Request signer, if credentials are configured
    pub fn signer(&self) -> Option<&RequestSigner> {
        self.signer.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn ws_url(&self) -> &Url {
        &self.ws_url
    }

    /// Dispatch a call and decode the successful body into `T`.
    ///
    /// Failures of any kind come back inside the envelope. A 200 body that does not match
    /// `T` keeps its status and carries a `DECODE_ERROR` with no data, so `is_success` alone
    /// does not guarantee `data`; use [`ApiResponse::into_result`] to get both checks.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
    ) -> ApiResponse<T> {
        let raw = self.execute_raw(method, path, payload).await;
        decode_data(raw)
    }

    /// Dispatch a call with a serializable payload
    pub async fn execute_with<T, P>(&self, method: HttpMethod, path: &str, payload: &P) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        match serde_json::to_value(payload) {
            Ok(value) => self.execute(method, path, Some(value)).await,
            Err(err) => {
                warn!(%method, path, error = %err, "request payload serialization failed");
                ApiResponse::transport_failure(BpxError::Serialization(err).to_string())
            }
        }
    }

    /// Dispatch a call and return the untyped body.
    ///
    /// A declared-JSON body that fails to parse degrades to `{}`; a body without a JSON
    /// content type is returned as a string.
    pub async fn execute_raw(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<Value>,
    ) -> ApiResponse<Value> {
        let target = request_target(method, path, payload.as_ref());

        let url = match endpoint_url(&self.base_url, &target) {
            Ok(url) => url,
            Err(err) => {
                warn!(%method, target = %target, error = %err, "invalid request url");
                return ApiResponse::transport_failure(BpxError::UrlParse(err).to_string());
            }
        };

        let instruction = instruction::resolve(method, path);
        let mut builder = self.http_client.request(method.into(), url.clone());

        if let Some(instruction) = instruction {
            let Some(signer) = &self.signer else {
                let err = BpxError::MissingCredentials(instruction.to_string());
                warn!(%method, path, instruction, "signed endpoint called without credentials");
                return ApiResponse::failure(500, ApiError::new(err.code(), err.to_string()));
            };

            let empty = Value::Object(Map::new());
            let headers = signer.sign_http_request(instruction, payload.as_ref().unwrap_or(&empty));
            for (name, value) in headers.iter() {
                builder = builder.header(name, value);
            }
        }

        if method != HttpMethod::Get {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
            if let Some(body) = &payload {
                builder = builder.body(body.to_string());
            }
        }

        debug!(
            %method,
            %url,
            instruction = instruction.unwrap_or("-"),
            signed = instruction.is_some(),
            "http request"
        );

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, error = %err, "http transport failure");
                return ApiResponse::transport_failure(err.to_string());
            }
        };

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                warn!(%method, %url, status, error = %err, "http body read failure");
                return ApiResponse::transport_failure(err.to_string());
            }
        };

        let body = if is_json {
            serde_json::from_str(&text).unwrap_or_else(|err| {
                debug!(%url, status, error = %err, "json body failed to parse; using empty object");
                Value::Object(Map::new())
            })
        } else {
            Value::String(text)
        };

        debug!(%method, %url, status, json = is_json, "http response");

        if !(200..300).contains(&status) {
            return ApiResponse::failure(status, ApiError::from_body(&body));
        }

        ApiResponse::success(status, body)
    }
}

/// Append `target` to the base URL, keeping any path prefix the base carries
fn endpoint_url(base: &Url, target: &str) -> std::result::Result<Url, url::ParseError> {
    Url::parse(&format!("{}{target}", base.as_str().trim_end_matches('/')))
}

/// Path plus query string for GET payloads; other verbs carry the payload as a body
fn request_target(method: HttpMethod, path: &str, payload: Option<&Value>) -> String {
    let Some(Value::Object(fields)) = payload.filter(|_| method == HttpMethod::Get) else {
        return path.to_string();
    };

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        if let Some(value) = canonical_value(value) {
            query.append_pair(key, &value);
        }
    }
    let query = query.finish();

    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{query}")
}

fn decode_data<T: DeserializeOwned>(raw: ApiResponse<Value>) -> ApiResponse<T> {
    let ApiResponse {
        status_code,
        data,
        error,
    } = raw;

    match data {
        Some(value) => match serde_json::from_value(value) {
            Ok(data) => ApiResponse::success(status_code, data),
            Err(err) => {
                debug!(status_code, error = %err, "response body does not match expected type");
                ApiResponse::failure(status_code, ApiError::new(DECODE_ERROR_CODE, err.to_string()))
            }
        },
        None => ApiResponse {
            status_code,
            data: None,
            error,
        },
    }
}
