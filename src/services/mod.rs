//! Backend access for the alert list and the session authenticator.

pub mod dashboard_client;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Alert;

pub use dashboard_client::{check_status, DashboardClient};

// =============================================================================
// Search Kinds
// =============================================================================

/// Autocomplete lookups offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    FunctionName,
    ApplicationName,
    DatasetName,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [
        SearchKind::FunctionName,
        SearchKind::ApplicationName,
        SearchKind::DatasetName,
    ];

    /// Endpoint path relative to the backend base URL
    pub fn path(&self) -> &'static str {
        match self {
            SearchKind::FunctionName => "data/autocomplete/functionByName",
            SearchKind::ApplicationName => "data/autocomplete/functionByAppname",
            SearchKind::DatasetName => "data/autocomplete/functionByAlertName",
        }
    }

    /// Query parameter carrying the search term
    pub fn query_key(&self) -> &'static str {
        match self {
            SearchKind::FunctionName => "name",
            SearchKind::ApplicationName => "appname",
            SearchKind::DatasetName => "alertName",
        }
    }

    /// Whether a search of this kind resets the page and shows the loading state
    pub fn tracks_loading(&self) -> bool {
        matches!(self, SearchKind::ApplicationName | SearchKind::DatasetName)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            SearchKind::FunctionName => 0,
            SearchKind::ApplicationName => 1,
            SearchKind::DatasetName => 2,
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::FunctionName => write!(f, "function_name"),
            SearchKind::ApplicationName => write!(f, "application_name"),
            SearchKind::DatasetName => write!(f, "dataset_name"),
        }
    }
}

// =============================================================================
// Search Backend Trait
// =============================================================================

/// Source of autocomplete results for the alert list
///
/// `DashboardClient` is the production implementation.
#[async_trait]
pub trait AlertSearchBackend: Send + Sync {
    /// Alerts matching `term` for the given lookup
    async fn search(&self, kind: SearchKind, term: &str) -> AppResult<Vec<Alert>>;
}
