//! News display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::models::news::NewsStory;

/// News display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NewsDisplay {
    #[tabled(rename = "PUBLISHED")]
    pub published: String,

    #[tabled(rename = "HEADLINE")]
    pub title: String,

    #[tabled(rename = "SOURCE")]
    pub source: String,

    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&NewsStory> for NewsDisplay {
    fn from(story: &NewsStory) -> Self {
        let published = story
            .published()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .or_else(|| story.published_at.clone())
            .unwrap_or_else(|| "--".to_string());

        Self {
            published,
            title: truncate_string(&story.title, 60),
            source: story.source.clone(),
            url: story.url.clone(),
        }
    }
}
