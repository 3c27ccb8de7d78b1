use std::env;
use std::time::Duration;

use url::Url;

/// Default delay before a search request is issued
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 600;

/// Default number of alerts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default session cookie lifetime after a successful login (7 days)
pub const DEFAULT_SESSION_COOKIE_EXPIRATION_SECS: u64 = 604_800;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub dashboard_url: Url,
    pub http: HttpConfig,
    pub list: ListConfig,
    pub session: SessionConfig,
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
}

/// Alert list behavior
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Quiet period before a search request is sent
    pub search_debounce: Duration,
    /// Alerts per page
    pub page_size: usize,
}

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie lifetime applied after a successful login
    pub cookie_expiration: Duration,
    /// Optional login used by the command-line front end
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = env::var("DASHBOARD_URL").map_err(|_| ConfigError::MissingDashboardUrl)?;
        let dashboard_url = Url::parse(&raw_url).map_err(|_| ConfigError::InvalidDashboardUrl)?;

        Ok(Self {
            dashboard_url,
            http: HttpConfig::from_env(),
            list: ListConfig::from_env(),
            session: SessionConfig::from_env(),
        })
    }

    /// Configuration with defaults for the given backend
    pub fn with_url(dashboard_url: Url) -> Self {
        Self {
            dashboard_url,
            http: HttpConfig::default(),
            list: ListConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl HttpConfig {
    /// Load HTTP settings from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl ListConfig {
    /// Load alert list settings from environment variables
    pub fn from_env() -> Self {
        let page_size = env::var("PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size: &usize| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            search_debounce: Duration::from_millis(
                env::var("SEARCH_DEBOUNCE_MS")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE_MS.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            ),
            page_size,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SessionConfig {
    /// Load session settings from environment variables
    pub fn from_env() -> Self {
        Self {
            cookie_expiration: Duration::from_secs(
                env::var("SESSION_COOKIE_EXPIRATION_SECS")
                    .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE_EXPIRATION_SECS.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_SESSION_COOKIE_EXPIRATION_SECS),
            ),
            username: env::var("DASHBOARD_USERNAME").ok(),
            password: env::var("DASHBOARD_PASSWORD").ok(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_expiration: Duration::from_secs(DEFAULT_SESSION_COOKIE_EXPIRATION_SECS),
            username: None,
            password: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingDashboardUrl,
    InvalidDashboardUrl,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingDashboardUrl => {
                write!(f, "DASHBOARD_URL environment variable is required")
            }
            ConfigError::InvalidDashboardUrl => write!(f, "DASHBOARD_URL must be a valid URL"),
        }
    }
}

impl std::error::Error for ConfigError {}
