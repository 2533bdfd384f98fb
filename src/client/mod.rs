use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ListingError;
use crate::models::PageState;
use crate::models::api::PaginatedResponse;
use crate::models::ideas::{IdeaData, IdeasPage};

/// Embedded image variants requested with every listing call.
const APPENDED_FIELDS: [&str; 2] = ["small_image", "medium_image"];

/// Anything that can produce a page of ideas for a given state.
#[async_trait]
pub trait IdeasSource: Send + Sync {
    async fn fetch_page(&self, state: &PageState) -> Result<IdeasPage, ListingError>;
}

/// HTTP client for the remote ideas endpoint.
#[derive(Clone)]
pub struct IdeasClient {
    client: reqwest::Client,
    api_url: Url,
}

impl IdeasClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ListingError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| ListingError::InvalidUrl(format!("{api_url}: {e}")))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, api_url })
    }

    /// Full request URL for `state`, e.g.
    /// `...?page[number]=2&page[size]=10&sort=-published_at&append[]=small_image&append[]=medium_image`.
    pub fn api_url_for(&self, state: &PageState) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page[number]", &state.page.to_string())
                .append_pair("page[size]", &state.size.to_string())
                .append_pair("sort", state.sort.as_param());
            for field in APPENDED_FIELDS {
                query.append_pair("append[]", field);
            }
        }
        url
    }
}

#[async_trait]
impl IdeasSource for IdeasClient {
    async fn fetch_page(&self, state: &PageState) -> Result<IdeasPage, ListingError> {
        let url = self.api_url_for(state);
        debug!("Fetching ideas from {url}");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Ideas request for {state:?} failed: HTTP {status}");
            return Err(ListingError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: PaginatedResponse<Vec<IdeaData>> = serde_json::from_slice(&body)?;

        Ok(IdeasPage::from(parsed))
    }
}
