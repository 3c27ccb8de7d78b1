//! Alert list controller.
//!
//! Holds the currently selected alerts and derives the visible page from
//! them. Searches go through a per-kind debounce gate; a response is only
//! applied if no newer search of the same kind started after it.

pub mod debounce;
pub mod derive;
pub mod query;
pub mod state;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::ListConfig;
use crate::error::AppResult;
use crate::models::{Alert, DashboardModel, SelectedFilter, APPLICATIONS_FILTER};
use crate::pagination::PageTarget;
use crate::services::{AlertSearchBackend, SearchKind};

pub use debounce::{Debouncer, Ticket};
pub use derive::{arrange_alerts, derive_view, enrich_alerts, sort_alerts, AlertListView};
pub use query::QueryParams;
pub use state::{SearchMode, SearchState, SortMode};

/// How a search call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the selected alerts
    Applied { count: usize },
    /// A newer call arrived during the debounce delay, no request was sent
    Superseded,
    /// The response arrived after a newer search started and was dropped
    Stale,
}

/// Arranged (sorted + enriched) alerts for one list revision and sort mode
struct ArrangedCache {
    revision: u64,
    sort_mode: Option<SortMode>,
    alerts: Arc<Vec<Alert>>,
}

struct Inner {
    state: SearchState,
    cache: Option<ArrangedCache>,
}

/// Controller behind the alert list page
pub struct AlertListController<B> {
    backend: Arc<B>,
    model: DashboardModel,
    debouncers: [Debouncer; 3],
    inner: Mutex<Inner>,
}

impl<B: AlertSearchBackend> AlertListController<B> {
    /// Creates a controller showing every alert of `model`
    pub fn new(backend: Arc<B>, model: DashboardModel, config: &ListConfig) -> Self {
        let state = SearchState::new(model.alerts.clone(), config.page_size);
        let debouncers = [
            Debouncer::new(config.search_debounce),
            Debouncer::new(config.search_debounce),
            Debouncer::new(config.search_debounce),
        ];

        Self {
            backend,
            model,
            debouncers,
            inner: Mutex::new(Inner { state, cache: None }),
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    // =========================================================================
    // Derived view
    // =========================================================================

    /// Current page of the list
    ///
    /// The sorted and enriched list is reused until the selected alerts or
    /// the sort mode change.
    pub async fn view(&self) -> AlertListView {
        let mut inner = self.inner.lock().await;
        let revision = inner.state.revision;
        let sort_mode = inner.state.selected_sort_mode;

        let cached = inner
            .cache
            .as_ref()
            .filter(|cache| cache.revision == revision && cache.sort_mode == sort_mode)
            .map(|cache| cache.alerts.clone());

        let arranged = match cached {
            Some(alerts) => alerts,
            None => {
                let alerts = Arc::new(arrange_alerts(
                    &inner.state.selected_alerts,
                    sort_mode,
                    &self.model.subscriber_groups,
                ));
                inner.cache = Some(ArrangedCache {
                    revision,
                    sort_mode,
                    alerts: alerts.clone(),
                });
                alerts
            }
        };

        AlertListView::from_arranged(&inner.state, &arranged)
    }

    /// Application names for the filter bar, sorted and deduplicated
    pub fn application_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .model
            .applications
            .iter()
            .map(|app| app.application.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Subscriber group names for the filter bar, sorted and deduplicated
    ///
    /// Groups without a name are left out.
    pub fn subscriber_group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .model
            .subscriber_groups
            .iter()
            .filter(|group| !group.name.is_empty())
            .map(|group| group.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Alert selected through the `alertId` query parameter, if listed
    pub async fn selected_alert(&self) -> Option<Alert> {
        let inner = self.inner.lock().await;
        let alert_id = inner.state.alert_id?;
        inner
            .state
            .selected_alerts
            .iter()
            .find(|alert| alert.id == Some(alert_id))
            .cloned()
    }

    // =========================================================================
    // Searches
    // =========================================================================

    pub async fn search_by_function_name(&self, term: &str) -> AppResult<SearchOutcome> {
        self.search(SearchKind::FunctionName, term).await
    }

    pub async fn search_by_application_name(&self, term: &str) -> AppResult<SearchOutcome> {
        self.search(SearchKind::ApplicationName, term).await
    }

    pub async fn search_by_dataset_name(&self, term: &str) -> AppResult<SearchOutcome> {
        self.search(SearchKind::DatasetName, term).await
    }

    /// Debounced autocomplete search
    ///
    /// Application and dataset searches show the loading state while the
    /// request runs and go back to page 1 once the debounce delay has passed,
    /// before the request is sent.
    pub async fn search(&self, kind: SearchKind, term: &str) -> AppResult<SearchOutcome> {
        let debouncer = &self.debouncers[kind.index()];

        let Some(ticket) = debouncer.wait().await else {
            log::debug!("Search {} for {:?} superseded", kind, term);
            return Ok(SearchOutcome::Superseded);
        };

        if kind.tracks_loading() {
            let mut inner = self.inner.lock().await;
            inner.state.is_loading = true;
            inner.state.current_page = 1;
        }

        log::debug!("Searching alerts by {} for {:?}", kind, term);
        let result = self.backend.search(kind, term).await;

        let mut inner = self.inner.lock().await;
        if !debouncer.is_current(ticket) {
            // The newer search owns the loading flag now
            log::debug!("Dropping stale {} results for {:?}", kind, term);
            return Ok(SearchOutcome::Stale);
        }

        if kind.tracks_loading() {
            inner.state.is_loading = false;
        }

        match result {
            Ok(alerts) => {
                let count = alerts.len();
                inner.state.replace_alerts(alerts);
                log::info!("Search by {} for {:?} returned {} alerts", kind, term, count);
                Ok(SearchOutcome::Applied { count })
            }
            Err(e) => {
                log::error!("Search by {} for {:?} failed: {}", kind, term, e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Mode, filter, sort and pager actions
    // =========================================================================

    /// Switches the search mode; "All Alerts" shows the whole model again
    pub async fn on_search_mode_change(&self, mode: SearchMode) {
        let mut inner = self.inner.lock().await;
        if mode == SearchMode::AllAlerts {
            inner.state.replace_alerts(self.model.alerts.clone());
            inner.state.results_active = true;
        }
        inner.state.selected_search_mode = mode;
    }

    /// Shows the single alert picked from the type-ahead
    ///
    /// Does nothing when no alert was picked.
    pub async fn on_alert_change(&self, alert: Option<Alert>) {
        let Some(alert) = alert else {
            return;
        };
        log::debug!("Alert {:?} picked from type-ahead", alert.id);
        let mut inner = self.inner.lock().await;
        inner.state.replace_alerts(vec![alert]);
        inner.state.results_active = true;
    }

    /// Applies the filter bar selection
    ///
    /// Only the "Applications" category is acted on: the first such filter
    /// switches to the Applications mode and runs an application search, the
    /// rest are ignored. Returns `None` when no filter triggered a search.
    pub async fn user_did_select_filter(
        &self,
        filters: &[SelectedFilter],
    ) -> AppResult<Option<SearchOutcome>> {
        self.on_search_mode_change(SearchMode::AllAlerts).await;

        for filter in filters {
            if filter.category == APPLICATIONS_FILTER {
                self.on_search_mode_change(SearchMode::Applications).await;
                let outcome = self.search_by_application_name(&filter.value).await?;
                return Ok(Some(outcome));
            }
            log::debug!("Filter category {} is not supported", filter.category);
        }

        Ok(None)
    }

    /// Sets the sort order from its label; unknown labels keep backend order
    pub async fn on_sort_mode_change(&self, label: &str) {
        let mode = SortMode::parse(label);
        if mode.is_none() {
            log::debug!("Unrecognized sort mode {:?}, keeping list order", label);
        }
        self.inner.lock().await.state.selected_sort_mode = mode;
    }

    /// Moves the pager and returns the new page number
    ///
    /// The result is not clamped to the available pages.
    pub async fn on_pagination_click(&self, target: PageTarget) -> i64 {
        let mut inner = self.inner.lock().await;
        let page = target.resolve(inner.state.current_page);
        let pages_num =
            crate::pagination::pages_num(inner.state.selected_alerts.len(), inner.state.page_size);
        if page < 1 || page as usize > pages_num {
            log::warn!("Page {} is outside 1..={}", page, pages_num);
        }
        inner.state.current_page = page;
        page
    }

    // =========================================================================
    // Query parameters
    // =========================================================================

    pub async fn query_params(&self) -> QueryParams {
        let inner = self.inner.lock().await;
        QueryParams {
            selected_search_mode: Some(inner.state.selected_search_mode.as_str().to_string()),
            alert_id: inner.state.alert_id,
        }
    }

    /// Restores mode and selected alert from the URL
    pub async fn apply_query_params(&self, params: &QueryParams) {
        if let Some(raw_mode) = &params.selected_search_mode {
            match raw_mode.parse::<SearchMode>() {
                Ok(mode) => self.on_search_mode_change(mode).await,
                Err(e) => log::warn!("Ignoring query parameter: {}", e),
            }
        }
        self.inner.lock().await.state.alert_id = params.alert_id;
    }
}
