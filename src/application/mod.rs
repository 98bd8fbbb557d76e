// Coin listing: pagination, search, sorting
pub mod listing;

// Home page ranked lists
pub mod highlights;

pub mod loadable;
pub mod search_debounce;

// UI orchestration
pub mod client;
pub mod market_app;
