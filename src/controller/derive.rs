//! Pure derivations from the search state to what the list displays.
//!
//! Source alerts are never modified: every step returns new records.

use super::state::{SearchMode, SearchState, SortMode};
use crate::models::{Alert, SubscriberGroupConfig};
use crate::pagination;

/// Sorted copy of `alerts`
///
/// Sorting is stable. The descending modes reverse the ascending order, so
/// ties come out in reverse arrival order there. `None` keeps the input order.
pub fn sort_alerts(alerts: &[Alert], mode: Option<SortMode>) -> Vec<Alert> {
    let mut sorted = alerts.to_vec();
    match mode {
        Some(SortMode::EditedFirst) => sorted.sort_by(|a, b| a.id.cmp(&b.id)),
        Some(SortMode::EditedLast) => {
            sorted.sort_by(|a, b| a.id.cmp(&b.id));
            sorted.reverse();
        }
        Some(SortMode::AToZ) => sorted.sort_by(|a, b| a.function_name.cmp(&b.function_name)),
        Some(SortMode::ZToA) => {
            sorted.sort_by(|a, b| a.function_name.cmp(&b.function_name));
            sorted.reverse();
        }
        None => {}
    }
    sorted
}

/// Stamps subscriber group and application onto matching alerts
///
/// Groups are applied in order, so the last group listing an alert wins.
/// Only the first alert carrying a given id is annotated.
pub fn enrich_alerts(mut alerts: Vec<Alert>, groups: &[SubscriberGroupConfig]) -> Vec<Alert> {
    for group in groups {
        for function_id in group.function_ids() {
            if let Some(alert) = alerts.iter_mut().find(|a| a.id == Some(*function_id)) {
                alert.application = Some(group.application.clone());
                alert.group = Some(group.name.clone());
            }
        }
    }
    alerts
}

/// Sort then enrich
pub fn arrange_alerts(
    alerts: &[Alert],
    mode: Option<SortMode>,
    groups: &[SubscriberGroupConfig],
) -> Vec<Alert> {
    enrich_alerts(sort_alerts(alerts, mode), groups)
}

/// Everything needed to render one page of the list
#[derive(Debug, Clone, PartialEq)]
pub struct AlertListView {
    /// Alerts on the current page, sorted and enriched
    pub alerts: Vec<Alert>,
    pub total_count: usize,
    pub current_page: i64,
    pub pages_num: usize,
    /// Page links for the pager widget, empty when there is nothing to page
    pub view_pages: Vec<i64>,
    pub search_mode: SearchMode,
    pub sort_mode: Option<SortMode>,
    pub is_loading: bool,
    pub results_active: bool,
}

impl AlertListView {
    /// Builds the view from already arranged alerts
    pub fn from_arranged(state: &SearchState, arranged: &[Alert]) -> Self {
        let pages_num = pagination::pages_num(state.selected_alerts.len(), state.page_size);
        let page = pagination::page_slice(arranged, state.current_page, state.page_size);

        Self {
            alerts: page.to_vec(),
            total_count: state.selected_alerts.len(),
            current_page: state.current_page,
            pages_num,
            view_pages: pagination::view_pages(state.current_page, pages_num, state.page_size),
            search_mode: state.selected_search_mode,
            sort_mode: state.selected_sort_mode,
            is_loading: state.is_loading,
            results_active: state.results_active,
        }
    }
}

/// Full derivation without any caching
pub fn derive_view(state: &SearchState, groups: &[SubscriberGroupConfig]) -> AlertListView {
    let arranged = arrange_alerts(&state.selected_alerts, state.selected_sort_mode, groups);
    AlertListView::from_arranged(state, &arranged)
}
