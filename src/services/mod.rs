//! Services layer - the search widget's behavior

pub mod debounce;
pub mod search_controller;
pub mod search_state;

pub use debounce::Debouncer;
pub use search_controller::{SearchController, SearchSettings};
pub use search_state::{LookupRequest, SearchEvent, SearchState};
