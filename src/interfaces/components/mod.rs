pub mod card;
pub mod metrics;
pub mod sparkline;
