use serde::{Deserialize, Serialize};

/// Envelope of every paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: T,
    #[serde(default)]
    pub links: PageLinks,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Position of a page within the full result set.
///
/// `from` and `to` are absent when the requested page is past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
    pub total: u64,
}

impl PageMeta {
    /// 1-based index of the first item on this page, or 0 when it is empty.
    pub fn first_index(&self) -> u64 {
        if let Some(from) = self.from {
            return from;
        }
        let start = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page) + 1;
        if start > self.total { 0 } else { start }
    }

    /// 1-based index of the last item on this page, or 0 when it is empty.
    pub fn last_index(&self) -> u64 {
        if let Some(to) = self.to {
            return to;
        }
        match self.first_index() {
            0 => 0,
            start => (start + u64::from(self.per_page) - 1).min(self.total),
        }
    }

    /// "Showing 11 - 20 of 25"
    pub fn showing_label(&self) -> String {
        format!(
            "Showing {} - {} of {}",
            self.first_index(),
            self.last_index(),
            self.total
        )
    }
}
