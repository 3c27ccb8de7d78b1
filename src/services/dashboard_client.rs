//! HTTP client for the dashboard backend.
//!
//! One `reqwest::Client` with a cookie jar is shared by the login, logout and
//! autocomplete calls, so the session cookie set by a login is sent with every
//! later request.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use url::Url;

use super::{AlertSearchBackend, SearchKind};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Alert, Credentials, SessionInfo};

const AUTHENTICATE_PATH: &str = "auth/authenticate";
const LOGOUT_PATH: &str = "auth/logout";

/// Content type sent with the login payload
const LOGIN_CONTENT_TYPE: &str = "Application/Json";

/// Passes 2xx responses through, returns the status otherwise
pub fn check_status(response: Response) -> Result<Response, StatusCode> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(response.status())
    }
}

/// Dashboard backend client
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    /// Creates a client for the backend configured in `config`
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .cookie_store(true)
            .build()?;

        let mut base_url = config.dashboard_url.clone();
        // Relative joins must keep any path prefix of the base URL
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Autocomplete URL for `term`, with the term URL-encoded
    pub fn search_url(&self, kind: SearchKind, term: &str) -> AppResult<Url> {
        let mut url = self.endpoint(kind.path())?;
        url.query_pairs_mut().append_pair(kind.query_key(), term);
        Ok(url)
    }

    /// Exchanges credentials for a cookie-backed session
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<SessionInfo> {
        let url = self.endpoint(AUTHENTICATE_PATH)?;
        let body = serde_json::to_vec(credentials)
            .map_err(|e| AppError::Internal(format!("Failed to serialize credentials: {}", e)))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, LOGIN_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let response = check_status(response).map_err(|status| {
            log::warn!("Login rejected for user {}: HTTP {}", credentials.username, status);
            AppError::AuthenticationFailed {
                status: status.as_u16(),
            }
        })?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(SessionInfo(serde_json::Value::Null));
        }

        serde_json::from_str(&text)
            .map_err(|e| AppError::Internal(format!("Invalid login response: {}", e)))
    }

    /// Ends the backend session; the response status is not checked
    pub async fn logout(&self) -> AppResult<()> {
        let url = self.endpoint(LOGOUT_PATH)?;
        let response = self.client.get(url).send().await?;
        log::debug!("Logout returned HTTP {}", response.status());
        Ok(())
    }
}

#[async_trait]
impl AlertSearchBackend for DashboardClient {
    async fn search(&self, kind: SearchKind, term: &str) -> AppResult<Vec<Alert>> {
        let url = self.search_url(kind, term)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            let error_msg = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                "Connection failed".to_string()
            } else {
                format!("Request failed: {}", e)
            };
            AppError::SearchRequestFailed(error_msg)
        })?;

        let response = check_status(response)
            .map_err(|status| AppError::SearchRequestFailed(format!("HTTP {}", status.as_u16())))?;

        response
            .json::<Vec<Alert>>()
            .await
            .map_err(|e| AppError::SearchRequestFailed(format!("Invalid response body: {}", e)))
    }
}
