use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cache::CachedSource;
use crate::client::IdeasSource;
use crate::error::ListingError;
use crate::models::ideas::IdeasPage;
use crate::models::{PageSize, PageState, SortOrder};
use crate::view::{Action, FetchRequest, ListingView};

/// A fetch that finished, tagged with the key it was issued for.
#[derive(Debug)]
pub struct Loaded {
    pub key: PageState,
    pub result: Result<Arc<IdeasPage>, ListingError>,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    Quit,
}

impl Input {
    /// `n`, `p`, a page number (or `g <n>`), `s <size>`, `o newest|oldest`,
    /// `r` to reload and `q` to quit.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or("Empty command")?;
        let arg = words.next();

        let action = match (command, arg) {
            ("q" | "quit", None) => return Ok(Input::Quit),
            ("n" | "next", None) => Action::NextPage,
            ("p" | "prev", None) => Action::PreviousPage,
            ("r" | "reload", None) => Action::Reload,
            ("g" | "page", Some(n)) => Action::GoToPage(parse_page(n)?),
            ("s" | "size", Some(n)) => {
                let size = n
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid size '{n}': {e}"))
                    .and_then(PageSize::try_from)?;
                Action::SetSize(size)
            }
            ("o" | "sort", Some("newest")) => Action::SetSort(SortOrder::Newest),
            ("o" | "sort", Some("oldest")) => Action::SetSort(SortOrder::Oldest),
            (n, None) if n.chars().all(|c| c.is_ascii_digit()) => Action::GoToPage(parse_page(n)?),
            _ => return Err(format!("Unknown command: {}", line.trim())),
        };

        Ok(Input::Action(action))
    }
}

fn parse_page(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(0) => Err("Pages start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid page '{raw}': {e}")),
    }
}

/// Drives a [`ListingView`] from user actions and finished fetches.
///
/// The view is only touched from the task running the session. Fetches run as
/// spawned tasks and report back over a channel; the view decides whether a
/// result still matters.
pub struct ListingSession<S> {
    source: Arc<CachedSource<S>>,
    view: ListingView,
    loaded_tx: mpsc::UnboundedSender<Loaded>,
    loaded_rx: mpsc::UnboundedReceiver<Loaded>,
}

impl<S: IdeasSource + 'static> ListingSession<S> {
    pub fn new(source: Arc<CachedSource<S>>, view: ListingView) -> Self {
        let (loaded_tx, loaded_rx) = mpsc::unbounded_channel();
        Self {
            source,
            view,
            loaded_tx,
            loaded_rx,
        }
    }

    pub fn view(&self) -> &ListingView {
        &self.view
    }

    fn issue(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.loaded_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_shared(&request.key).await;
            // The receiver lives as long as the session.
            let _ = tx.send(Loaded {
                key: request.key,
                result,
            });
        });
    }

    /// Issue the initial load.
    pub fn start(&mut self) {
        let request = self.view.start();
        self.issue(request);
    }

    /// Apply `action`; returns whether it led to a new fetch.
    pub async fn handle_action(&mut self, action: Action) -> bool {
        let Some(request) = self.view.dispatch(action) else {
            return false;
        };
        if action == Action::Reload {
            self.source.invalidate(&request.key).await;
        }
        self.issue(request);
        true
    }

    /// Wait for the next finished fetch and apply it. Returns whether it
    /// changed what is on screen.
    pub async fn next_completion(&mut self) -> bool {
        match self.loaded_rx.recv().await {
            Some(loaded) => self.view.complete(loaded.key, loaded.result),
            None => false,
        }
    }

    /// Run until `actions` closes, calling `on_render` whenever the view changes.
    pub async fn run<F>(
        mut self,
        mut actions: mpsc::UnboundedReceiver<Action>,
        mut on_render: F,
    ) -> ListingView
    where
        F: FnMut(&ListingView),
    {
        self.start();
        on_render(&self.view);

        loop {
            tokio::select! {
                action = actions.recv() => {
                    let Some(action) = action else {
                        info!("Input closed, leaving listing");
                        break;
                    };
                    if self.handle_action(action).await {
                        on_render(&self.view);
                    }
                }
                Some(loaded) = self.loaded_rx.recv() => {
                    if self.view.complete(loaded.key, loaded.result) {
                        on_render(&self.view);
                    } else {
                        debug!("Ignored completion for {:?}", loaded.key);
                    }
                }
            }
        }

        self.view
    }
}
