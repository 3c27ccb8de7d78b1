use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::SessionInfo;

/// Client-side session state
///
/// Holds the payload of the last successful login and the cookie lifetime
/// the authenticator requested for it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    data: Option<SessionInfo>,
    cookie_expiration: Option<Duration>,
    authenticated_at: Option<DateTime<Utc>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lifetime of the session cookie
    pub fn set_cookie_expiration(&mut self, expiration: Duration) {
        self.cookie_expiration = Some(expiration);
    }

    pub fn cookie_expiration(&self) -> Option<Duration> {
        self.cookie_expiration
    }

    /// Store login payload
    pub fn set_authenticated(&mut self, data: SessionInfo) {
        self.data = Some(data);
        self.authenticated_at = Some(Utc::now());
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&SessionInfo> {
        self.data.as_ref()
    }

    /// When the session cookie runs out, if both login time and lifetime are known
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let authenticated_at = self.authenticated_at?;
        let expiration = chrono::Duration::from_std(self.cookie_expiration?).ok()?;
        authenticated_at.checked_add_signed(expiration)
    }

    /// Clear session data (logout)
    ///
    /// The cookie lifetime setting is kept for the next login.
    pub fn clear(&mut self) {
        self.data = None;
        self.authenticated_at = None;
    }
}
