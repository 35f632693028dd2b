//! News stories

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::extract::{envelope, first_array, matches_query, text, text_or};

const IMAGE_BASE: &str = "https://www.cricbuzz.com/a/img/v1/600x400/i1";
const STORY_BASE: &str = "https://www.cricbuzz.com/cricket-news";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsStory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub source: String,
    /// Epoch milliseconds or provider text, as received
    pub published_at: Option<String>,
    pub url: String,
}

impl NewsStory {
    /// Read a story, unwrapping the `story` wrapper when present
    pub fn from_value(value: &Value) -> Option<Self> {
        let story = value.get("story").filter(|s| s.is_object()).unwrap_or(value);
        let title = text(story, &["title", "hline"])?;
        let id = text_or(story, &["id"], "");

        let image_url = text(story, &["imageUrl"]).or_else(|| {
            text(story, &["imageId"]).map(|image| format!("{}/{}.jpg", IMAGE_BASE, image))
        });

        Some(Self {
            url: text(story, &["url"]).unwrap_or_else(|| format!("{}/{}", STORY_BASE, id)),
            id,
            title,
            description: text_or(story, &["description", "intro"], ""),
            image_url,
            source: text_or(story, &["source"], "Cricbuzz"),
            published_at: text(story, &["publishedAt", "pubTime"]),
        })
    }

    /// Publication time when the provider sent epoch milliseconds
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        let millis = raw.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}

/// Stories from a news payload, filtered by title or description, capped at `limit`.
///
/// Ad slots and other entries without a title are skipped.
pub fn news(body: &Value, query: Option<&str>, limit: Option<usize>) -> Vec<NewsStory> {
    let body = envelope(body);
    let raw = match &body {
        Value::Array(items) => items.clone(),
        other => first_array(other, &["storyList", "stories", "news", "list"]),
    };

    raw.iter()
        .filter_map(NewsStory::from_value)
        .filter(|s| matches_query(&[&s.title, &s.description], query))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
