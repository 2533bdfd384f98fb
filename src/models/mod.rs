pub mod api;
pub mod ideas;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Page sizes offered by the "Show per page" selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            other => Err(format!("Unsupported page size: {other}")),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Ordering by publish date, as understood by the API's `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "-published_at")]
    Newest,
    #[serde(rename = "published_at")]
    Oldest,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Newest => "-published_at",
            SortOrder::Oldest => "published_at",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        match param {
            "-published_at" => Some(SortOrder::Newest),
            "published_at" => Some(SortOrder::Oldest),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
        }
    }
}

/// The `(page, size, sort)` triple behind the listing.
///
/// Doubles as the request and cache key: two equal states always map to the
/// same upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageState {
    pub page: u32,
    pub size: PageSize,
    pub sort: SortOrder,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
            sort: SortOrder::default(),
        }
    }
}

impl PageState {
    /// Read `page`, `size` and `sort` from URL query pairs.
    ///
    /// Anything missing or unusable falls back to its default; unknown keys
    /// are ignored. When a key repeats, the last value wins.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    {
        let mut state = PageState::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "page" => {
                    state.page = value
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|p| *p >= 1)
                        .unwrap_or(1);
                }
                "size" => {
                    state.size = value
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .and_then(|s| PageSize::try_from(s).ok())
                        .unwrap_or_default();
                }
                "sort" => {
                    state.sort = SortOrder::from_param(value.trim()).unwrap_or_default();
                }
                _ => {}
            }
        }
        state
    }

    /// Query pairs in the order they are written back to the URL.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.as_param().to_string()),
        ]
    }
}
