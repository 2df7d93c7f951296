//! Accela API client.
//!
//! Low-level HTTP client that handles the routing headers and raw requests.
//! Resource operations are implemented via traits on model types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AccelaError, Result};

const DEFAULT_API_URL: &str = "https://apis.accela.com/v4";
const USER_AGENT: &str = concat!("accela/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const NO_QUERY: &[(&str, &str)] = &[];

/// Header selecting the agency (tenant) a request is routed to.
pub const AGENCY_HEADER: &str = "x-accela-agency";

/// Header selecting the agency deployment (e.g. `PROD`, `TEST`).
pub const ENVIRONMENT_HEADER: &str = "x-accela-environment";

/// Connection settings for an [`AccelaClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Access token sent verbatim in the `Authorization` header.
    pub token: String,
    /// Agency name, e.g. `CHARLOTTE`.
    pub agency: String,
    /// Environment name, e.g. `PROD`.
    pub environment: String,
    /// API base URL including the version prefix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("agency", &self.agency)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the public Accela API.
    pub fn new(
        token: impl Into<String>,
        agency: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            agency: agency.into(),
            environment: environment.into(),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// Uses `ACCELA_ACCESS_TOKEN`, `ACCELA_AGENCY` and `ACCELA_ENVIRONMENT`,
    /// and optionally `ACCELA_API_URL` (defaults to `https://apis.accela.com/v4`).
    ///
    /// # Errors
    ///
    /// Returns [`AccelaError::ConfigMissing`] naming the first unset variable.
    pub fn from_env() -> Result<Self> {
        let config = Self::new(
            required_var("ACCELA_ACCESS_TOKEN")?,
            required_var("ACCELA_AGENCY")?,
            required_var("ACCELA_ENVIRONMENT")?,
        );

        Ok(match env::var("ACCELA_API_URL") {
            Ok(url) => config.with_base_url(url),
            Err(_) => config,
        })
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| AccelaError::ConfigMissing(format!("{name} environment variable not set")))
}

/// Validated header values, fixed at construction.
struct Credentials {
    token: HeaderValue,
    agency: HeaderValue,
    environment: HeaderValue,
    agency_name: String,
    environment_name: String,
}

impl Credentials {
    fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut token = header_value("token", &config.token)?;
        token.set_sensitive(true);

        Ok(Self {
            token,
            agency: header_value("agency", &config.agency)?,
            environment: header_value("environment", &config.environment)?,
            agency_name: config.agency.clone(),
            environment_name: config.environment.clone(),
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| AccelaError::ConfigInvalid(format!("{name} is not a valid header value")))
}

/// Low-level Accela API client.
///
/// Carries the routing headers and issues GET requests. Resource-specific
/// operations are implemented via the `Get`, `List`, and `Download` traits on
/// model types.
///
/// This struct is cheaply cloneable; clones share the connection pool and the
/// immutable credentials, which is what paginated results hold on to.
///
/// # Example
///
/// ```no_run
/// use accela::{AccelaClient, ClientConfig};
///
/// # fn example() -> accela::Result<()> {
/// // Create from environment variables
/// let client = AccelaClient::from_env()?;
///
/// // Or configure manually
/// let client = AccelaClient::new(ClientConfig::new("token", "CHARLOTTE", "PROD"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccelaClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
}

impl std::fmt::Debug for AccelaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccelaClient")
            .field("base_url", &self.base_url.as_str())
            .field("agency", &self.credentials.agency_name)
            .field("environment", &self.credentials.environment_name)
            .finish_non_exhaustive()
    }
}

impl AccelaClient {
    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or a credential cannot be
    /// sent as a header.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with / so relative joins keep the version prefix
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str)?;
        let credentials = Credentials::from_config(&config)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(AccelaError::Transport)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(credentials),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Agency this client routes to.
    pub fn agency(&self) -> &str {
        &self.credentials.agency_name
    }

    /// Environment this client routes to.
    pub fn environment(&self) -> &str {
        &self.credentials.environment_name
    }

    /// Headers sent with every request.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, self.credentials.token.clone());
        headers.insert(
            HeaderName::from_static(AGENCY_HEADER),
            self.credentials.agency.clone(),
        );
        headers.insert(
            HeaderName::from_static(ENVIRONMENT_HEADER),
            self.credentials.environment.clone(),
        );
        headers
    }

    /// Issue a request and decode the JSON body.
    ///
    /// Only `GET` is served; any other method fails before touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns [`AccelaError::UnsupportedOperation`] for non-GET methods, and
    /// the same errors as [`AccelaClient::get_json`] otherwise.
    pub async fn request<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
    ) -> Result<Value> {
        if method != Method::GET {
            return Err(AccelaError::UnsupportedOperation(format!(
                "{method} {path}: only GET requests are supported"
            )));
        }
        self.get_json(path, query).await
    }

    /// Make a GET request with query parameters and decode the JSON body.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value> {
        let response = self.send(path, query).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body)
            .map_err(|e| AccelaError::decode("response body", e.to_string()))
    }

    /// Make a GET request and hand back the unread response.
    ///
    /// Used for binary payloads that must not be JSON-decoded.
    #[tracing::instrument(skip(self))]
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        self.send(path, NO_QUERY).await
    }

    async fn send<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .headers(self.headers())
            .query(query)
            .send()
            .await
            .map_err(AccelaError::Transport)?;

        Self::check_response(path, response).await
    }

    /// Check response status and convert errors.
    async fn check_response(path: &str, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AccelaError::NotFound {
                path: path.to_string(),
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(AccelaError::Api {
            status_code: status.as_u16(),
            message,
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) if !b.is_empty() => b,
            _ => return format!("HTTP {status}"),
        };

        // Accela error bodies carry `code` and `message`
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body
    }
}
