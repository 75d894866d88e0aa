//! Weather panel: a terminal client for the weather server.
//!
//! The crate mirrors a small search panel: a city query fans out into two
//! concurrent fetches (current conditions and 5-day forecast), joined
//! all-or-nothing, and the results are formatted into a [`panel::Panel`]
//! view-model. The last successfully searched city is persisted and
//! replayed on the next start.

pub mod api;
pub mod controller;
pub mod panel;
pub mod store;

pub use api::{ApiClient, FetchError};
pub use controller::{Controller, SearchOutcome, SearchState};
pub use panel::Panel;
pub use store::{FileLastCityStore, LastCityStore, MemoryLastCityStore};
