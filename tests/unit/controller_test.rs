//! Unit tests for the alert list controller
//!
//! Uses a scripted search backend and paused tokio time, so debounce
//! windows are exact.

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

use alertdesk::controller::{AlertListController, QueryParams, SearchMode, SearchOutcome, SortMode};
use alertdesk::error::AppError;
use alertdesk::models::{Alert, SelectedFilter};
use alertdesk::pagination::PageTarget;
use alertdesk::services::SearchKind;

use crate::common::{dashboard_model, list_config, numbered_alerts, subscriber_group, FakeBackend};

fn controller(backend: FakeBackend) -> (Arc<FakeBackend>, AlertListController<FakeBackend>) {
    let backend = Arc::new(backend);
    let controller = AlertListController::new(backend.clone(), dashboard_model(), &list_config());
    (backend, controller)
}

fn ids(alerts: &[Alert]) -> Vec<i64> {
    alerts.iter().filter_map(|a| a.id).collect()
}

// =============================================================================
// Initial View
// =============================================================================

#[tokio::test]
async fn test_initial_view_shows_most_recently_edited_first() {
    let (_, controller) = controller(FakeBackend::new());

    let view = controller.view().await;

    assert_eq!(view.total_count, 25);
    assert_eq!(view.pages_num, 3);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.sort_mode, Some(SortMode::EditedLast));
    assert_eq!(ids(&view.alerts), (16..=25).rev().collect::<Vec<_>>());
    assert_eq!(view.view_pages, vec![1, 2, 3]);
    assert_eq!(view.search_mode, SearchMode::AllAlerts);
    assert!(!view.results_active);
    assert!(!view.is_loading);
}

#[tokio::test]
async fn test_view_enriches_with_subscriber_groups() {
    let (_, controller) = controller(FakeBackend::new());
    controller.on_sort_mode_change("Edited:first").await;

    let view = controller.view().await;

    assert_eq!(view.alerts[0].group.as_deref(), Some("Checkout Oncall"));
    assert_eq!(view.alerts[0].application.as_deref(), Some("checkout"));
    // alert 3 is in both groups, the later one wins
    assert_eq!(view.alerts[2].group.as_deref(), Some("Search Oncall"));
    assert_eq!(view.alerts[2].application.as_deref(), Some("search"));
    assert_eq!(view.alerts[4].group, None);

    // the model itself is not annotated
    assert_eq!(controller.model().alerts[0].group, None);
}

// =============================================================================
// Sorting
// =============================================================================

#[rstest]
#[case("Edited:first", vec![1, 2, 3])]
#[case("Edited:last", vec![25, 24, 23])]
#[case("A to Z", vec![1, 2, 3])]
#[case("Z to A", vec![25, 24, 23])]
#[case("Most recent", vec![1, 2, 3])]
#[tokio::test]
async fn test_sort_mode_orders_view(#[case] label: &str, #[case] first_three: Vec<i64>) {
    let (_, controller) = controller(FakeBackend::new());

    controller.on_sort_mode_change(label).await;
    let view = controller.view().await;

    assert_eq!(ids(&view.alerts[..3]), first_three);
    assert_eq!(view.sort_mode, SortMode::parse(label));
}

#[tokio::test]
async fn test_sort_change_after_cached_view() {
    let (_, controller) = controller(FakeBackend::new());
    controller.on_sort_mode_change("Edited:first").await;

    let before = controller.view().await;
    controller.on_sort_mode_change("Edited:last").await;
    controller.on_pagination_click(PageTarget::Page(2)).await;
    let after = controller.view().await;

    assert_eq!(before.alerts[0].id, Some(1));
    assert_eq!(ids(&after.alerts), (6..=15).rev().collect::<Vec<_>>());
    // enrichment follows the alert, not the position
    assert_eq!(after.alerts[3].id, Some(12));
    assert_eq!(after.alerts[3].group.as_deref(), Some("Search Oncall"));
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_pagination_next_and_previous() {
    let (_, controller) = controller(FakeBackend::new());

    assert_eq!(controller.on_pagination_click(PageTarget::Page(2)).await, 2);
    assert_eq!(controller.on_pagination_click(PageTarget::Next).await, 3);
    assert_eq!(controller.on_pagination_click(PageTarget::Previous).await, 2);
    assert_eq!(controller.on_pagination_click(PageTarget::Previous).await, 1);

    let view = controller.view().await;
    assert_eq!(ids(&view.alerts), (16..=25).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pagination_second_page_slice() {
    let (_, controller) = controller(FakeBackend::new());

    controller.on_sort_mode_change("Edited:first").await;
    controller.on_pagination_click(PageTarget::Page(2)).await;
    let view = controller.view().await;

    assert_eq!(ids(&view.alerts), (11..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pagination_is_not_clamped() {
    let (_, controller) = controller(FakeBackend::new());

    assert_eq!(controller.on_pagination_click(PageTarget::Previous).await, 0);
    let view = controller.view().await;
    assert_eq!(view.current_page, 0);
    assert!(view.alerts.is_empty());

    assert_eq!(controller.on_pagination_click(PageTarget::Page(7)).await, 7);
    assert!(controller.view().await.alerts.is_empty());
}

#[tokio::test]
async fn test_extreme_page_targets_render_empty_pages() {
    let (_, controller) = controller(FakeBackend::new());

    controller.on_pagination_click(PageTarget::Page(i64::MIN)).await;
    assert_eq!(controller.on_pagination_click(PageTarget::Previous).await, i64::MIN);
    let view = controller.view().await;
    assert!(view.alerts.is_empty());
    assert_eq!(view.view_pages, vec![1, 2, 3]);

    controller.on_pagination_click(PageTarget::Page(i64::MAX)).await;
    assert_eq!(controller.on_pagination_click(PageTarget::Next).await, i64::MAX);
    let view = controller.view().await;
    assert!(view.alerts.is_empty());
    assert_eq!(view.view_pages, vec![1, 2, 3]);
}

// =============================================================================
// Searches
// =============================================================================

#[rstest]
#[case(SearchKind::ApplicationName)]
#[case(SearchKind::DatasetName)]
#[tokio::test(start_paused = true)]
async fn test_search_replaces_alerts_and_resets_page(#[case] kind: SearchKind) {
    let backend = FakeBackend::new().with_results("pay", vec![Alert::new(40, "payments")]);
    let (backend, controller) = controller(backend);
    controller.on_pagination_click(PageTarget::Page(3)).await;

    let outcome = controller.search(kind, "pay").await.unwrap();

    assert_eq!(outcome, SearchOutcome::Applied { count: 1 });
    assert_eq!(backend.calls(), vec![(kind, "pay".to_string())]);

    let state = controller.snapshot().await;
    assert_eq!(ids(&state.selected_alerts), vec![40]);
    assert_eq!(state.current_page, 1);
    assert!(!state.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_function_search_keeps_current_page() {
    let backend = FakeBackend::new()
        .with_results("orders", numbered_alerts(30))
        .with_delay("orders", Duration::from_secs(1));
    let (_, controller) = controller(backend);
    controller.on_pagination_click(PageTarget::Page(3)).await;

    let (result, loading_during) =
        tokio::join!(controller.search_by_function_name("orders"), async {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            controller.snapshot().await.is_loading
        });
    result.unwrap();

    assert!(!loading_during);
    let state = controller.snapshot().await;
    assert_eq!(state.selected_alerts.len(), 30);
    assert_eq!(state.current_page, 3);
}

#[tokio::test(start_paused = true)]
async fn test_searches_within_debounce_window_send_one_request() {
    let backend = FakeBackend::new()
        .with_results("pa", vec![Alert::new(1, "pa")])
        .with_results("pay", vec![Alert::new(2, "pay")]);
    let (backend, controller) = controller(backend);

    let (first, second) = tokio::join!(controller.search_by_function_name("pa"), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        controller.search_by_function_name("pay").await
    });

    assert_eq!(first.unwrap(), SearchOutcome::Superseded);
    assert_eq!(second.unwrap(), SearchOutcome::Applied { count: 1 });
    assert_eq!(backend.calls(), vec![(SearchKind::FunctionName, "pay".to_string())]);
    assert_eq!(ids(&controller.snapshot().await.selected_alerts), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_searches_outside_debounce_window_both_run() {
    let (backend, controller) = controller(FakeBackend::new());

    controller.search_by_function_name("a").await.unwrap();
    controller.search_by_function_name("ab").await.unwrap();

    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_different_kinds_debounce_independently() {
    let (backend, controller) = controller(FakeBackend::new());

    let (by_name, by_app) = tokio::join!(
        controller.search_by_function_name("a"),
        controller.search_by_application_name("b"),
    );

    assert!(matches!(by_name.unwrap(), SearchOutcome::Applied { .. }));
    assert!(matches!(by_app.unwrap(), SearchOutcome::Applied { .. }));
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let backend = FakeBackend::new()
        .with_results("slow", vec![Alert::new(1, "slow")])
        .with_delay("slow", Duration::from_secs(2))
        .with_results("fast", vec![Alert::new(2, "fast")]);
    let (backend, controller) = controller(backend);

    let (slow, fast) = tokio::join!(controller.search_by_dataset_name("slow"), async {
        // the slow request is in flight by now
        tokio::time::sleep(Duration::from_millis(1000)).await;
        controller.search_by_dataset_name("fast").await
    });

    assert_eq!(fast.unwrap(), SearchOutcome::Applied { count: 1 });
    assert_eq!(slow.unwrap(), SearchOutcome::Stale);
    assert_eq!(backend.calls().len(), 2);
    assert_eq!(ids(&controller.snapshot().await.selected_alerts), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_is_set_while_request_runs() {
    let backend = FakeBackend::new().with_delay("x", Duration::from_secs(1));
    let (_, controller) = controller(backend);

    let (_, loading_during) = tokio::join!(controller.search_by_application_name("x"), async {
        tokio::time::sleep(Duration::from_millis(800)).await;
        controller.snapshot().await.is_loading
    });

    assert!(loading_during);
    assert!(!controller.snapshot().await.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_dataset_search_shows_loading_and_first_page_before_response() {
    let backend = FakeBackend::new().with_delay("orders", Duration::from_secs(1));
    let (_, controller) = controller(backend);
    controller.on_pagination_click(PageTarget::Page(3)).await;

    let (_, during) = tokio::join!(controller.search_by_dataset_name("orders"), async {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        controller.snapshot().await
    });

    assert!(during.is_loading);
    assert_eq!(during.current_page, 1);
    // the list is only replaced once the response arrives
    assert_eq!(during.selected_alerts.len(), 25);
    assert!(!controller.snapshot().await.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_failed_search_reports_error_and_clears_loading() {
    let (_, controller) = controller(FakeBackend::new().failing());
    controller.on_pagination_click(PageTarget::Page(2)).await;

    let err = controller.search_by_application_name("x").await.unwrap_err();

    assert!(matches!(err, AppError::SearchRequestFailed(_)));
    let state = controller.snapshot().await;
    assert!(!state.is_loading);
    assert_eq!(state.selected_alerts.len(), 25);
    // the page was reset before the request went out
    assert_eq!(state.current_page, 1);
}

// =============================================================================
// Mode and Filter Actions
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_all_alerts_mode_restores_model_list() {
    let backend = FakeBackend::new().with_results("x", vec![Alert::new(99, "x")]);
    let (_, controller) = controller(backend);
    controller.on_search_mode_change(SearchMode::Alerts).await;
    controller.search_by_function_name("x").await.unwrap();
    assert_eq!(controller.snapshot().await.selected_alerts.len(), 1);

    controller.on_search_mode_change(SearchMode::AllAlerts).await;

    let state = controller.snapshot().await;
    assert_eq!(state.selected_search_mode, SearchMode::AllAlerts);
    assert_eq!(ids(&state.selected_alerts), (1..=25).collect::<Vec<_>>());
    assert!(state.results_active);
}

#[tokio::test]
async fn test_other_mode_keeps_current_list() {
    let (_, controller) = controller(FakeBackend::new());

    controller.on_search_mode_change(SearchMode::SubscriberGroups).await;

    let state = controller.snapshot().await;
    assert_eq!(state.selected_search_mode, SearchMode::SubscriberGroups);
    assert_eq!(state.selected_alerts.len(), 25);
    assert!(!state.results_active);
}

#[tokio::test(start_paused = true)]
async fn test_applications_filter_runs_application_search() {
    let backend = FakeBackend::new().with_results("checkout", vec![Alert::new(1, "a")]);
    let (backend, controller) = controller(backend);
    controller.on_search_mode_change(SearchMode::Alerts).await;

    let outcome = controller
        .user_did_select_filter(&[
            SelectedFilter::new("Metrics", "page_views"),
            SelectedFilter::new("Applications", "checkout"),
            SelectedFilter::new("Applications", "search"),
        ])
        .await
        .unwrap();

    assert_eq!(outcome, Some(SearchOutcome::Applied { count: 1 }));
    assert_eq!(
        backend.calls(),
        vec![(SearchKind::ApplicationName, "checkout".to_string())]
    );
    let state = controller.snapshot().await;
    assert_eq!(state.selected_search_mode, SearchMode::Applications);
    assert!(state.results_active);
}

#[tokio::test(start_paused = true)]
async fn test_unhandled_filter_categories_do_nothing() {
    let (backend, controller) = controller(FakeBackend::new());

    let outcome = controller
        .user_did_select_filter(&[SelectedFilter::new("Owners", "me")])
        .await
        .unwrap();

    assert_eq!(outcome, None);
    assert!(backend.calls().is_empty());
    let state = controller.snapshot().await;
    assert_eq!(state.selected_alerts.len(), 25);
    assert_eq!(state.selected_search_mode, SearchMode::AllAlerts);
}

#[tokio::test]
async fn test_alert_change_shows_only_the_picked_alert() {
    let (_, controller) = controller(FakeBackend::new());
    controller.on_pagination_click(PageTarget::Page(2)).await;

    controller.on_alert_change(Some(Alert::new(7, "checkout_latency"))).await;

    let state = controller.snapshot().await;
    assert_eq!(ids(&state.selected_alerts), vec![7]);
    assert!(state.results_active);
}

#[tokio::test]
async fn test_alert_change_without_alert_is_ignored() {
    let (_, controller) = controller(FakeBackend::new());

    controller.on_alert_change(None).await;

    let state = controller.snapshot().await;
    assert_eq!(state.selected_alerts.len(), 25);
    assert_eq!(state.revision, 0);
    assert!(!state.results_active);
}

#[tokio::test]
async fn test_application_names_are_sorted_and_unique() {
    let (_, controller) = controller(FakeBackend::new());

    assert_eq!(
        controller.application_names(),
        vec!["ads".to_string(), "checkout".to_string(), "search".to_string()]
    );
}

#[tokio::test]
async fn test_subscriber_group_names_are_sorted_unique_and_named() {
    let mut model = dashboard_model();
    model.subscriber_groups.push(subscriber_group("Checkout Oncall", "checkout", &[4]));
    model.subscriber_groups.push(subscriber_group("", "ads", &[5]));
    model.subscriber_groups.push(subscriber_group("Ads Oncall", "ads", &[6]));
    let controller = AlertListController::new(Arc::new(FakeBackend::new()), model, &list_config());

    assert_eq!(
        controller.subscriber_group_names(),
        vec![
            "Ads Oncall".to_string(),
            "Checkout Oncall".to_string(),
            "Search Oncall".to_string()
        ]
    );
}

// =============================================================================
// Query Parameters
// =============================================================================

#[tokio::test]
async fn test_apply_query_params() {
    let (_, controller) = controller(FakeBackend::new());

    controller
        .apply_query_params(&QueryParams::from_query(
            "selectedSearchMode=Subscriber+Groups&alertId=12",
        ))
        .await;

    let selected = controller.selected_alert().await.unwrap();
    assert_eq!(selected.id, Some(12));

    let params = controller.query_params().await;
    assert_eq!(params.selected_search_mode.as_deref(), Some("Subscriber Groups"));
    assert_eq!(params.to_query(), "selectedSearchMode=Subscriber+Groups&alertId=12");
}

#[tokio::test]
async fn test_applications_query_mode_is_accepted() {
    let (_, controller) = controller(FakeBackend::new());

    controller
        .apply_query_params(&QueryParams::from_query("selectedSearchMode=Applications"))
        .await;

    assert_eq!(
        controller.snapshot().await.selected_search_mode,
        SearchMode::Applications
    );
}

#[tokio::test]
async fn test_unknown_query_mode_is_ignored() {
    let (_, controller) = controller(FakeBackend::new());

    controller
        .apply_query_params(&QueryParams::from_query("selectedSearchMode=Everything&alertId=404"))
        .await;

    assert_eq!(
        controller.snapshot().await.selected_search_mode,
        SearchMode::AllAlerts
    );
    assert!(controller.selected_alert().await.is_none());
}
