use crate::domain::market::{CoinSummary, SortMode};

/// Coins whose name or symbol contains `search_term` (already lowercase)
pub fn filter<'a>(items: &'a [CoinSummary], search_term: &str) -> Vec<&'a CoinSummary> {
    items
        .iter()
        .filter(|coin| coin.matches_search(search_term))
        .collect()
}

/// Stable sort for client-ordered modes; server-ordered modes keep API order.
pub fn sort(coins: &mut [&CoinSummary], sort_mode: SortMode) {
    if let SortMode::Client(order) = sort_mode {
        coins.sort_by(|a, b| a.compare_by(b, order));
    }
}

pub fn derive_view<'a>(
    items: &'a [CoinSummary],
    search_term: &str,
    sort_mode: SortMode,
) -> Vec<&'a CoinSummary> {
    let mut view = filter(items, search_term);
    sort(&mut view, sort_mode);
    view
}
