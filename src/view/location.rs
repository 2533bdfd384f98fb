use reqwest::Url;

use crate::error::ListingError;
use crate::models::PageState;

/// Placeholder origin used to parse browser-relative locations.
const LOCAL_ORIGIN: &str = "http://localhost";

/// The browser-visible address of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse a path with optional query, e.g. `/ideas?page=2&size=20`.
    pub fn parse(path_and_query: &str) -> Result<Self, ListingError> {
        let base = Url::parse(LOCAL_ORIGIN)
            .map_err(|e| ListingError::InvalidUrl(e.to_string()))?;
        let url = base
            .join(path_and_query.trim())
            .map_err(|e| ListingError::InvalidUrl(format!("{path_and_query}: {e}")))?;

        Ok(Self { url })
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn state(&self) -> PageState {
        PageState::from_query_pairs(self.url.query_pairs())
    }

    /// Same path, query rewritten to exactly mirror `state`.
    pub fn with_state(&self, state: &PageState) -> Self {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .extend_pairs(state.query_pairs());

        Self { url }
    }

    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }
}

/// How a state change is written to browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Overwrite the current entry; the back button skips pager clicks.
    Replace,
    Push,
}

/// Minimal in-memory browser history.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    mode: HistoryMode,
}

impl History {
    pub fn new(initial: Location, mode: HistoryMode) -> Self {
        Self {
            entries: vec![initial],
            mode,
        }
    }

    pub fn current(&self) -> &Location {
        // `entries` is created non-empty and only ever grows or has its tail replaced.
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `location` without a full navigation.
    pub fn record(&mut self, location: Location) {
        if *self.current() == location {
            return;
        }
        match self.mode {
            HistoryMode::Replace => {
                let last = self.entries.len() - 1;
                self.entries[last] = location;
            }
            HistoryMode::Push => self.entries.push(location),
        }
    }
}
