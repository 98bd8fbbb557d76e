use coinscope::application::listing::{
    LISTING_FAILURE_MESSAGE, ListingController, ListingSettings, PageOutcome,
};
use coinscope::domain::market::{ClientOrder, CoinSummary, LoadStatus, ServerOrder, SortMode};
use coinscope::domain::ports::{ChangeWindow, ListCoinsQuery, MarketDataService};
use coinscope::infrastructure::mock::MockMarketDataService;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn controller(mock: &MockMarketDataService) -> ListingController {
    ListingController::new(
        Arc::new(mock.clone()),
        ListingSettings::default(),
        ServerOrder::MarketCapDesc,
    )
}

fn ids(coins: &[CoinSummary]) -> Vec<String> {
    coins.iter().map(|c| c.id.clone()).collect()
}

#[tokio::test]
async fn test_scroll_appends_second_page() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);

    assert_eq!(listing.mount().await, Some(PageOutcome::Applied));
    assert_eq!(listing.state().items().len(), 50);
    assert!(listing.state().has_more());

    assert_eq!(listing.load_next_page(false).await, Some(PageOutcome::Applied));
    assert_eq!(listing.state().items().len(), 100);
    assert_eq!(listing.state().page_cursor(), 3);
    assert_eq!(listing.state().load_status(), LoadStatus::Ready);

    // Accumulation preserves API order across pages
    let expected: Vec<String> = mock.universe()[..100].iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids(listing.state().items()), expected);
}

#[tokio::test]
async fn test_listing_runs_dry_on_empty_page() {
    init_tracing();
    let mock = MockMarketDataService::with_coins(MockMarketDataService::generate_universe(60, 3));
    let mut listing = controller(&mock);

    listing.mount().await;
    listing.load_next_page(false).await;
    assert_eq!(listing.state().items().len(), 60);
    assert!(listing.state().has_more());

    listing.load_next_page(false).await;
    assert_eq!(listing.state().items().len(), 60);
    assert!(!listing.state().has_more());

    // Further scrolling does not hit the API
    let calls = mock.list_calls();
    assert_eq!(listing.load_next_page(false).await, None);
    assert_eq!(mock.list_calls(), calls);
}

#[tokio::test]
async fn test_server_sort_change_replaces_accumulation() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);

    listing.mount().await;
    listing.load_next_page(false).await;
    listing.load_next_page(false).await;
    assert_eq!(listing.state().items().len(), 150);

    listing
        .set_sort_mode(SortMode::Server(ServerOrder::VolumeDesc))
        .await;

    let items = listing.state().items();
    assert_eq!(items.len(), 50);
    assert_eq!(listing.state().page_cursor(), 2);
    assert!(items.windows(2).all(|w| w[0].total_volume >= w[1].total_volume));

    let direct = mock
        .list_coins(ListCoinsQuery {
            currency: "usd".to_string(),
            order_by: ServerOrder::VolumeDesc,
            page: 1,
            page_size: 50,
            include_sparkline: true,
            change_windows: vec![ChangeWindow::Day],
        })
        .await
        .unwrap();
    assert_eq!(ids(items), ids(&direct));
}

#[tokio::test]
async fn test_client_sort_reorders_without_fetching() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);
    listing.mount().await;

    let calls = mock.list_calls();
    let before = listing.state().items().to_vec();

    assert_eq!(
        listing
            .set_sort_mode(SortMode::Client(ClientOrder::PriceAsc))
            .await,
        None
    );
    assert_eq!(mock.list_calls(), calls);
    assert_eq!(listing.state().items(), before.as_slice());

    let view = listing.snapshot().view;
    assert!(view.windows(2).all(|w| w[0].current_price <= w[1].current_price));

    // Scrolling keeps fetching with the last server order
    listing.load_next_page(false).await;
    assert_eq!(listing.state().items().len(), 100);
    assert_eq!(listing.state().server_order(), ServerOrder::MarketCapDesc);
}

#[tokio::test]
async fn test_missing_changes_sort_last() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);
    listing.mount().await;
    while listing.load_next_page(false).await.is_some() {}
    assert_eq!(listing.state().items().len(), mock.universe().len());

    for order in [ClientOrder::Change24hDesc, ClientOrder::Change24hAsc] {
        listing.set_sort_mode(SortMode::Client(order)).await;
        let view = listing.snapshot().view;
        let first_missing = view
            .iter()
            .position(|c| c.price_change_percent_24h.is_none())
            .expect("mock universe has coins without a 24h change");
        assert!(view[first_missing..]
            .iter()
            .all(|c| c.price_change_percent_24h.is_none()));
    }
}

#[tokio::test]
async fn test_transport_failure_keeps_items() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);
    listing.mount().await;
    let before = listing.state().items().to_vec();

    mock.fail_next_list_calls(1);
    listing.load_next_page(false).await;

    let snapshot = listing.snapshot();
    assert_eq!(snapshot.load_status, LoadStatus::Failed);
    assert_eq!(snapshot.last_error.as_deref(), Some(LISTING_FAILURE_MESSAGE));
    assert_eq!(listing.state().items(), before.as_slice());
    assert_eq!(listing.state().page_cursor(), 2);

    // Scrolling does not re-request the failed page
    let calls = mock.list_calls();
    assert_eq!(listing.load_next_page(false).await, None);
    assert_eq!(mock.list_calls(), calls);

    // Manual retry resumes at the same page
    assert_eq!(listing.retry().await, Some(PageOutcome::Applied));
    assert_eq!(listing.state().items().len(), 100);
    assert_eq!(listing.snapshot().last_error, None);
}

#[tokio::test]
async fn test_search_filters_accumulated_items() {
    init_tracing();
    let mock = MockMarketDataService::new();
    let mut listing = controller(&mock);
    listing.mount().await;

    listing.set_search_term("COIN");
    let view = listing.snapshot().view;
    assert!(!view.is_empty());
    assert!(view.iter().all(|c| {
        c.name.to_lowercase().contains("coin") || c.symbol.to_lowercase().contains("coin")
    }));

    listing.set_search_term("");
    assert_eq!(listing.snapshot().view.len(), 50);
}
