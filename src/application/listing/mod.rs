pub mod controller;
pub mod state;
pub mod view;

pub use controller::ListingController;
pub use state::{
    LISTING_FAILURE_MESSAGE, ListingSettings, ListingSnapshot, ListingState, PageOutcome,
    PageRequest,
};
