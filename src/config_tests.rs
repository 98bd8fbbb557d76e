use crate::config::{Config, Mode};
use crate::domain::market::ServerOrder;
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn set(key: &str, value: &str) {
    // SAFETY: every test touching the environment holds ENV_LOCK
    unsafe { env::set_var(key, value) };
}

fn clear(keys: &[&str]) {
    for key in keys {
        // SAFETY: every test touching the environment holds ENV_LOCK
        unsafe { env::remove_var(key) };
    }
}

const KEYS: &[&str] = &[
    "MODE",
    "COINGECKO_BASE_URL",
    "COINGECKO_API_KEY",
    "VS_CURRENCY",
    "LISTING_PAGE_SIZE",
    "LISTING_DEFAULT_SORT",
    "SEARCH_DEBOUNCE_MS",
    "LISTING_DEDUPE_IDS",
    "HIGHLIGHTS_LIST_LEN",
];

#[test]
fn test_config_from_env_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear(KEYS);

    let config = Config::from_env().expect("Should parse with defaults");
    assert_eq!(config.mode, Mode::Live);
    assert_eq!(config.coingecko.vs_currency, "usd");
    assert_eq!(config.listing.page_size, 50);
    assert_eq!(config.listing.default_sort, ServerOrder::MarketCapDesc);
    assert_eq!(config.listing.search_debounce, Duration::from_millis(300));
    assert_eq!(config.highlights.list_len, 10);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear(KEYS);

    set("MODE", "mock");
    set("COINGECKO_BASE_URL", "http://localhost:8080/api/v3/");
    set("COINGECKO_API_KEY", "CG-demo");
    set("VS_CURRENCY", "EUR");
    set("LISTING_PAGE_SIZE", "25");
    set("LISTING_DEFAULT_SORT", "volume_desc");
    set("SEARCH_DEBOUNCE_MS", "150");

    let config = Config::from_env().unwrap();
    assert_eq!(config.mode, Mode::Mock);
    assert_eq!(config.coingecko.base_url, "http://localhost:8080/api/v3");
    assert_eq!(config.coingecko.api_key.as_deref(), Some("CG-demo"));
    assert_eq!(config.coingecko.vs_currency, "eur");
    assert_eq!(config.listing.page_size, 25);
    assert_eq!(config.listing.default_sort, ServerOrder::VolumeDesc);
    assert_eq!(config.listing.search_debounce, Duration::from_millis(150));

    clear(KEYS);
}

#[test]
fn test_client_ordered_default_sort_rejected() {
    let _guard = get_env_lock().lock().unwrap();
    clear(KEYS);

    set("LISTING_DEFAULT_SORT", "current_price_desc");
    let result = Config::from_env();
    assert!(result.is_err());

    clear(KEYS);
}

#[test]
fn test_invalid_page_size_rejected() {
    let _guard = get_env_lock().lock().unwrap();
    clear(KEYS);

    set("LISTING_PAGE_SIZE", "0");
    assert!(Config::from_env().is_err());

    set("LISTING_PAGE_SIZE", "fifty");
    assert!(Config::from_env().is_err());

    clear(KEYS);
}

#[test]
fn test_invalid_base_url_rejected() {
    let _guard = get_env_lock().lock().unwrap();
    clear(KEYS);

    set("COINGECKO_BASE_URL", "not a url");
    assert!(Config::from_env().is_err());

    clear(KEYS);
}
