use tracing::{error, info};

use crate::api::ApiClient;
use crate::panel::Panel;
use crate::store::LastCityStore;

/// Where the panel is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Result of one `search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank input: no state change, no request issued
    Ignored,
    Success,
    Failed,
}

/// Orchestrates one search cycle: input validation, the concurrent fetch
/// pair, rendering, and the last-city write.
///
/// `search` takes `&mut self`, so a single controller cannot interleave two
/// searches; new input waits for the previous cycle to finish.
pub struct Controller<S: LastCityStore> {
    api: ApiClient,
    store: S,
    state: SearchState,
    panel: Panel,
}

impl<S: LastCityStore> Controller<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        Self {
            api,
            store,
            state: SearchState::Idle,
            panel: Panel::new(),
        }
    }

    /// City to replay on startup, if a previous session persisted one.
    pub fn startup_city(&self) -> Option<String> {
        self.store.load()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Synchronous phase of a search: validate the input and enter the
    /// loading state before any request goes out. Returns the trimmed city,
    /// or `None` for blank input (which changes nothing).
    pub fn begin_search(&mut self, city: &str) -> Option<String> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        self.state = SearchState::Loading;
        self.panel.show_loading();
        Some(city.to_string())
    }

    /// Run one full search cycle.
    ///
    /// Both fetches are issued concurrently and joined all-or-nothing: the
    /// first failure wins and any sibling success is discarded. The loading
    /// indicator is cleared on every exit path.
    pub async fn search(&mut self, city: &str) -> SearchOutcome {
        let Some(city) = self.begin_search(city) else {
            return SearchOutcome::Ignored;
        };

        let result = tokio::try_join!(self.api.current_weather(&city), self.api.forecast(&city));

        self.panel.hide_loading();

        match result {
            Ok((current, entries)) => {
                self.panel.show_current(&current);
                self.panel.show_forecast(&entries);
                // Persist the canonical name from the response, not the raw input
                self.store.save(&current.name);
                info!(city = %current.name, "Search succeeded");
                self.state = SearchState::Success;
                SearchOutcome::Success
            }
            Err(e) => {
                error!(city = %city, error = %e.detail(), "Search failed");
                self.panel.show_error();
                self.state = SearchState::Failed;
                SearchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLastCityStore;

    fn controller() -> Controller<MemoryLastCityStore> {
        Controller::new(
            ApiClient::new("http://127.0.0.1:1"),
            MemoryLastCityStore::new(),
        )
    }

    #[test]
    fn begin_search_enters_loading_synchronously() {
        let mut c = controller();
        let city = c.begin_search("  Paris  ");

        assert_eq!(city.as_deref(), Some("Paris"));
        assert_eq!(c.state(), SearchState::Loading);
        assert!(c.panel().loading_visible);
        assert!(!c.panel().weather_visible);
        assert!(!c.panel().error_visible);
    }

    #[test]
    fn begin_search_rejects_blank_input_without_state_change() {
        let mut c = controller();

        assert_eq!(c.begin_search(""), None);
        assert_eq!(c.begin_search("   \t"), None);
        assert_eq!(c.state(), SearchState::Idle);
        assert!(!c.panel().loading_visible);
    }

    #[tokio::test]
    async fn blank_search_is_ignored() {
        let mut c = controller();
        assert_eq!(c.search("   ").await, SearchOutcome::Ignored);
        assert_eq!(c.state(), SearchState::Idle);
    }

    #[tokio::test]
    async fn unreachable_server_fails_with_hidden_loading() {
        let mut c = controller();
        let outcome = c.search("Paris").await;

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(c.state(), SearchState::Failed);
        assert!(!c.panel().loading_visible);
        assert!(c.panel().error_visible);
        assert!(!c.panel().weather_visible);
    }
}
