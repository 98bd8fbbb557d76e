pub mod coingecko;
pub mod core;
pub mod factory;
pub mod mock;

pub use factory::ServiceFactory;
