//! Alert records and the reference data used to annotate them.
//!
//! Alerts come from the backend model or from the autocomplete endpoints.
//! Fields other than the ones the list logic needs are kept verbatim so a
//! record can be passed back to the rendering layer untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Alert
// =============================================================================

/// A monitoring rule record displayed in the alert list
///
/// `id` and `function_name` are optional on the wire. A record missing them
/// still lists, it just sorts first and never matches a subscriber group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Backend fields the list does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Alert {
    pub fn new(id: i64, function_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            function_name: Some(function_name.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Subscriber Groups
// =============================================================================

/// Email recipients configuration of a subscriber group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    #[serde(default)]
    pub function_ids: Vec<i64>,
}

/// Named subscriber group tied to a set of alert (function) ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberGroupConfig {
    pub name: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub email_config: Option<EmailConfig>,
}

impl SubscriberGroupConfig {
    /// Function ids covered by this group, empty without an email config
    pub fn function_ids(&self) -> &[i64] {
        self.email_config
            .as_ref()
            .map(|config| config.function_ids.as_slice())
            .unwrap_or(&[])
    }
}

/// Application entry offered as a filter choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub application: String,
}

// =============================================================================
// Dashboard Model
// =============================================================================

/// Data handed to the alert list by the loading layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardModel {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub subscriber_groups: Vec<SubscriberGroupConfig>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

// =============================================================================
// Filters
// =============================================================================

/// Filter category that narrows the list by application name
pub const APPLICATIONS_FILTER: &str = "Applications";

/// A filter chosen in the filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFilter {
    pub category: String,
    pub value: String,
}

impl SelectedFilter {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}
