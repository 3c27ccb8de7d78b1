use std::str::FromStr;

use crate::error::AppError;
use crate::models::Alert;

// =============================================================================
// Search Mode
// =============================================================================

/// What the search box looks up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    AllAlerts,
    Alerts,
    SubscriberGroups,
    Applications,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::AllAlerts,
        SearchMode::Alerts,
        SearchMode::SubscriberGroups,
        SearchMode::Applications,
    ];

    /// Label shown in the mode picker and carried by `selectedSearchMode`
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::AllAlerts => "All Alerts",
            SearchMode::Alerts => "Alerts",
            SearchMode::SubscriberGroups => "Subscriber Groups",
            SearchMode::Applications => "Applications",
        }
    }
}

impl FromStr for SearchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown search mode: {}", s)))
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Sort Mode
// =============================================================================

/// Ordering of the alert list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Ascending by id
    EditedFirst,
    /// Descending by id
    EditedLast,
    /// Ascending by function name
    AToZ,
    /// Descending by function name
    ZToA,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::EditedFirst,
        SortMode::EditedLast,
        SortMode::AToZ,
        SortMode::ZToA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::EditedFirst => "Edited:first",
            SortMode::EditedLast => "Edited:last",
            SortMode::AToZ => "A to Z",
            SortMode::ZToA => "Z to A",
        }
    }

    /// Parses a sort label; unknown labels mean "keep backend order"
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == label)
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Search State
// =============================================================================

/// Mutable state of one alert list
#[derive(Debug, Clone)]
pub struct SearchState {
    pub selected_search_mode: SearchMode,
    /// `None` keeps the order the alerts arrived in
    pub selected_sort_mode: Option<SortMode>,
    pub selected_alerts: Vec<Alert>,
    /// 1-indexed, not clamped by the pager
    pub current_page: i64,
    pub page_size: usize,
    pub is_loading: bool,
    pub results_active: bool,
    /// Alert highlighted through the `alertId` query parameter
    pub alert_id: Option<i64>,
    /// Bumped whenever `selected_alerts` is replaced
    pub revision: u64,
}

impl SearchState {
    pub fn new(alerts: Vec<Alert>, page_size: usize) -> Self {
        Self {
            selected_search_mode: SearchMode::AllAlerts,
            selected_sort_mode: Some(SortMode::EditedLast),
            selected_alerts: alerts,
            current_page: 1,
            page_size,
            is_loading: false,
            results_active: false,
            alert_id: None,
            revision: 0,
        }
    }

    /// Swaps in a new result list
    pub fn replace_alerts(&mut self, alerts: Vec<Alert>) {
        self.selected_alerts = alerts;
        self.revision += 1;
    }
}
