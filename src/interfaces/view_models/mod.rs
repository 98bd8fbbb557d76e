pub mod coin_row_view_model;
pub mod format;
pub mod header_view_model;

pub use coin_row_view_model::CoinRowViewModel;
pub use header_view_model::HeaderViewModel;
