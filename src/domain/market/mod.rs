// Market data domain
pub mod coin;
pub mod coin_detail;
pub mod global_summary;
pub mod load_status;
pub mod sort_mode;

pub use coin::CoinSummary;
pub use coin_detail::CoinDetail;
pub use global_summary::GlobalSummary;
pub use load_status::LoadStatus;
pub use sort_mode::{ClientOrder, ServerOrder, SortMode};
