use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::api::{PageMeta, PaginatedResponse};

/// An idea exactly as the API returns it.
///
/// Only `id` and `title` are required; every other field degrades to `None`
/// so a single odd record never fails the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaData {
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_image")]
    pub small_image: Option<ImageData>,
    #[serde(default, deserialize_with = "lenient_image")]
    pub medium_image: Option<ImageData>,
}

/// An embedded image, present when requested through `append[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub url: String,
}

/// What a listing card needs to render one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: u64,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
}

impl From<IdeaData> for Idea {
    fn from(data: IdeaData) -> Self {
        let thumbnail_url = data
            .small_image
            .map(|img| img.url)
            .or_else(|| data.medium_image.map(|img| img.url))
            .filter(|url| !url.trim().is_empty());

        Self {
            id: data.id,
            title: data.title,
            published_at: data.published_at,
            thumbnail_url,
        }
    }
}

/// One fetched page of ideas. Never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeasPage {
    pub items: Vec<Idea>,
    pub meta: PageMeta,
}

impl From<PaginatedResponse<Vec<IdeaData>>> for IdeasPage {
    fn from(response: PaginatedResponse<Vec<IdeaData>>) -> Self {
        Self {
            items: response.data.into_iter().map(Idea::from).collect(),
            meta: response.meta,
        }
    }
}

impl IdeasPage {
    pub fn showing_label(&self) -> String {
        self.meta.showing_label()
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse_published_at))
}

fn lenient_image<'de, D>(deserializer: D) -> Result<Option<ImageData>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Accepts RFC 3339 as well as the `YYYY-MM-DD HH:MM:SS` and plain date
/// shapes the API has been seen to emit. Naive values are taken as UTC.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
