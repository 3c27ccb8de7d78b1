//! Credential authenticator for the dashboard session.
//!
//! The authenticator talks to the backend; `Session` owns the client-side
//! store and applies the base behavior around each authenticator call.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::session::SessionStore;
use crate::error::AppResult;
use crate::models::{Credentials, SessionInfo};
use crate::services::DashboardClient;

/// Trait for session authenticators
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a session
    ///
    /// May adjust cookie settings on `store` as a side effect.
    async fn authenticate(
        &self,
        credentials: &Credentials,
        store: &mut SessionStore,
    ) -> AppResult<SessionInfo>;

    /// Check a previously stored session
    async fn restore(&self, data: Option<&SessionInfo>) -> AppResult<()>;

    /// Tear down the backend side of the session
    async fn invalidate(&self) -> AppResult<()>;
}

/// Authenticator backed by the dashboard's username/password endpoint
pub struct CredentialsAuthenticator {
    client: Arc<DashboardClient>,
    cookie_expiration: Duration,
}

impl CredentialsAuthenticator {
    pub fn new(client: Arc<DashboardClient>, cookie_expiration: Duration) -> Self {
        Self {
            client,
            cookie_expiration,
        }
    }
}

#[async_trait]
impl Authenticator for CredentialsAuthenticator {
    async fn authenticate(
        &self,
        credentials: &Credentials,
        store: &mut SessionStore,
    ) -> AppResult<SessionInfo> {
        let info = self.client.authenticate(credentials).await?;
        store.set_cookie_expiration(self.cookie_expiration);
        log::info!("User {} authenticated", credentials.username);
        Ok(info)
    }

    async fn restore(&self, _data: Option<&SessionInfo>) -> AppResult<()> {
        // The backend cookie is trusted as-is
        Ok(())
    }

    async fn invalidate(&self) -> AppResult<()> {
        self.client.logout().await
    }
}

/// Authenticated session: an authenticator plus the client-side store
pub struct Session<A> {
    authenticator: A,
    store: SessionStore,
}

impl<A: Authenticator> Session<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            store: SessionStore::new(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Log in and keep the returned session payload
    pub async fn authenticate(&mut self, credentials: &Credentials) -> AppResult<&SessionInfo> {
        let info = self
            .authenticator
            .authenticate(credentials, &mut self.store)
            .await?;
        self.store.set_authenticated(info);
        self.store
            .data()
            .ok_or_else(|| crate::error::AppError::Internal("Session data missing".to_string()))
    }

    pub async fn restore(&mut self) -> AppResult<()> {
        self.authenticator.restore(self.store.data()).await
    }

    /// Log out; local data is cleared once the backend call returns
    pub async fn invalidate(&mut self) -> AppResult<()> {
        self.authenticator.invalidate().await?;
        self.store.clear();
        log::info!("Session invalidated");
        Ok(())
    }
}
