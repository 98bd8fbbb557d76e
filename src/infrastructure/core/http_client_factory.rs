use crate::config::CoinGeckoConfig;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client used for every market data request.
    ///
    /// Failed requests are surfaced as-is: no retry layer is installed.
    pub fn create_client(config: &CoinGeckoConfig) -> Client {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Client::builder()
            .default_headers(headers)
            .user_agent(concat!("coinscope/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
