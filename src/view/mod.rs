pub mod location;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::ListingError;
use crate::models::ideas::IdeasPage;
use crate::models::{PageSize, PageState, SortOrder};
use crate::pagination::{self, PageMarker};
use location::{History, HistoryMode, Location};

/// User interactions the listing reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GoToPage(u32),
    PreviousPage,
    NextPage,
    SetSize(PageSize),
    SetSort(SortOrder),
    /// Re-request the current key. The only retry path after a failure.
    Reload,
}

/// A fetch the driver must perform. `key` is also how the result finds its way
/// back through [`ListingView::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: PageState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready(Arc<IdeasPage>),
    Failed(ListingError),
}

/// One button in the rendered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerEntry {
    pub marker: PageMarker,
    pub active: bool,
    pub enabled: bool,
}

/// Query state, URL mirror and latest result of the ideas listing.
///
/// All mutation happens through [`dispatch`](Self::dispatch) and
/// [`complete`](Self::complete); the view never performs I/O itself.
#[derive(Debug, Clone)]
pub struct ListingView {
    state: PageState,
    status: ViewStatus,
    history: History,
    sibling_count: u32,
}

impl ListingView {
    /// Initialise from a browser location and normalise it in place.
    pub fn from_location(path_and_query: &str, sibling_count: u32) -> Result<Self, ListingError> {
        let location = Location::parse(path_and_query)?;
        let state = location.state();
        let mut history = History::new(location.clone(), HistoryMode::Replace);
        history.record(location.with_state(&state));

        info!("Listing initialised at {}", history.current().path_and_query());

        Ok(Self {
            state,
            status: ViewStatus::Idle,
            history,
            sibling_count,
        })
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The page currently on screen, if any.
    pub fn page(&self) -> Option<&IdeasPage> {
        match &self.status {
            ViewStatus::Ready(page) => Some(page.as_ref()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ViewStatus::Loading)
    }

    /// Kick off the initial load for whatever the URL asked for.
    pub fn start(&mut self) -> FetchRequest {
        self.status = ViewStatus::Loading;
        FetchRequest { key: self.state }
    }

    /// Apply a user action. Returns the fetch to issue, or `None` when the
    /// action changed nothing.
    pub fn dispatch(&mut self, action: Action) -> Option<FetchRequest> {
        let next = match action {
            Action::GoToPage(page) => PageState {
                page: page.max(1),
                ..self.state
            },
            Action::PreviousPage => PageState {
                page: self.state.page.saturating_sub(1).max(1),
                ..self.state
            },
            Action::NextPage => PageState {
                page: self.state.page.saturating_add(1),
                ..self.state
            },
            Action::SetSize(size) => PageState { size, ..self.state },
            Action::SetSort(sort) => PageState { sort, ..self.state },
            Action::Reload => return Some(self.start()),
        };

        if next == self.state {
            debug!("{action:?} left the listing unchanged");
            return None;
        }

        self.state = next;
        let location = self.history.current().with_state(&next);
        self.history.record(location);
        debug!(
            "{action:?} moved listing to {}",
            self.history.current().path_and_query()
        );

        Some(self.start())
    }

    /// Deliver a finished fetch. Results for any key other than the current
    /// one are dropped, whatever order they arrive in.
    pub fn complete(
        &mut self,
        key: PageState,
        result: Result<Arc<IdeasPage>, ListingError>,
    ) -> bool {
        if key != self.state {
            debug!("Discarding stale response for {key:?}");
            return false;
        }

        self.status = match result {
            Ok(page) => ViewStatus::Ready(page),
            Err(e) => {
                warn!("Listing fetch failed: {e}");
                ViewStatus::Failed(e)
            }
        };
        true
    }

    pub fn previous_enabled(&self) -> bool {
        self.state.page > 1
    }

    /// Pager buttons for the page on screen; empty until a page has loaded.
    pub fn pager(&self) -> Vec<PagerEntry> {
        let Some(page) = self.page() else {
            return Vec::new();
        };

        pagination::build_pagination_control(
            page.meta.current_page,
            page.meta.last_page,
            self.sibling_count,
        )
        .into_iter()
        .map(|marker| PagerEntry {
            marker,
            active: marker == PageMarker::Page(self.state.page),
            enabled: marker != PageMarker::Ellipsis,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::PageMeta;

    fn page_for(state: PageState, total: u64) -> Arc<IdeasPage> {
        let per_page = state.size.get();
        let last_page = (total.div_ceil(u64::from(per_page)) as u32).max(1);
        Arc::new(IdeasPage {
            items: Vec::new(),
            meta: PageMeta {
                current_page: state.page,
                last_page,
                per_page,
                from: None,
                to: None,
                total,
            },
        })
    }

    fn view(location: &str) -> ListingView {
        ListingView::from_location(location, 1).unwrap()
    }

    #[test]
    fn initial_state_comes_from_the_url() {
        let v = view("/ideas?page=3&size=20&sort=published_at");
        assert_eq!(
            v.state(),
            PageState {
                page: 3,
                size: PageSize::Twenty,
                sort: SortOrder::Oldest,
            }
        );
        assert_eq!(v.status(), &ViewStatus::Idle);
    }

    #[test]
    fn bare_location_is_normalised_immediately() {
        let v = view("/ideas");
        assert_eq!(
            v.location().path_and_query(),
            "/ideas?page=1&size=10&sort=-published_at"
        );
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn every_change_rewrites_the_url_and_requests_a_fetch() {
        let mut v = view("/ideas");

        let req = v.dispatch(Action::SetSize(PageSize::Fifty)).unwrap();
        assert_eq!(req.key.size, PageSize::Fifty);
        assert!(v.is_loading());
        assert_eq!(
            v.location().path_and_query(),
            "/ideas?page=1&size=50&sort=-published_at"
        );

        let req = v.dispatch(Action::SetSort(SortOrder::Oldest)).unwrap();
        assert_eq!(req.key.sort, SortOrder::Oldest);

        let req = v.dispatch(Action::GoToPage(4)).unwrap();
        assert_eq!(req.key.page, 4);
        assert_eq!(
            v.location().path_and_query(),
            "/ideas?page=4&size=50&sort=published_at"
        );
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn previous_is_a_no_op_on_the_first_page() {
        let mut v = view("/ideas");
        assert!(!v.previous_enabled());
        assert_eq!(v.dispatch(Action::PreviousPage), None);
        assert_eq!(v.state().page, 1);
    }

    #[test]
    fn previous_and_next_step_by_one() {
        let mut v = view("/ideas?page=3");
        assert_eq!(v.dispatch(Action::NextPage).unwrap().key.page, 4);
        assert_eq!(v.dispatch(Action::PreviousPage).unwrap().key.page, 3);
        assert!(v.previous_enabled());
    }

    #[test]
    fn unchanged_state_does_not_refetch() {
        let mut v = view("/ideas?page=2");
        assert_eq!(v.dispatch(Action::GoToPage(2)), None);
        assert_eq!(v.dispatch(Action::SetSize(PageSize::Ten)), None);
        assert_eq!(v.dispatch(Action::SetSort(SortOrder::Newest)), None);
    }

    #[test]
    fn reload_requests_the_current_key() {
        let mut v = view("/ideas?page=2");
        let req = v.dispatch(Action::Reload).unwrap();
        assert_eq!(req.key, v.state());
        assert!(v.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut v = view("/ideas");
        let first = v.start().key;
        let second = v.dispatch(Action::GoToPage(2)).unwrap().key;

        assert!(v.complete(second, Ok(page_for(second, 25))));
        assert!(!v.complete(first, Ok(page_for(first, 25))));

        assert_eq!(v.page().unwrap().meta.current_page, 2);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut v = view("/ideas");
        let first = v.start().key;
        v.dispatch(Action::GoToPage(2));

        assert!(!v.complete(first, Ok(page_for(first, 25))));
        assert!(v.is_loading());
    }

    #[test]
    fn failure_is_surfaced() {
        let mut v = view("/ideas");
        let key = v.start().key;
        v.complete(key, Err(ListingError::FetchFailed { status: 503 }));
        assert_eq!(
            v.status(),
            &ViewStatus::Failed(ListingError::FetchFailed { status: 503 })
        );
        assert!(v.pager().is_empty());
    }

    #[test]
    fn pager_marks_the_active_page() {
        let mut v = view("/ideas?page=2");
        let key = v.start().key;
        v.complete(key, Ok(page_for(key, 25)));

        let pager = v.pager();
        let labels: Vec<String> = pager.iter().map(|e| e.marker.to_string()).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert_eq!(
            pager.iter().filter(|e| e.active).map(|e| e.marker).collect::<Vec<_>>(),
            vec![PageMarker::Page(2)]
        );
    }

    #[test]
    fn ellipsis_is_not_clickable() {
        let mut v = view("/ideas");
        let key = v.start().key;
        v.complete(key, Ok(page_for(key, 100)));

        let pager = v.pager();
        let ellipsis = pager
            .iter()
            .find(|e| e.marker == PageMarker::Ellipsis)
            .unwrap();
        assert!(!ellipsis.enabled);
        assert!(pager.iter().filter(|e| e.marker != PageMarker::Ellipsis).all(|e| e.enabled));
    }
}
