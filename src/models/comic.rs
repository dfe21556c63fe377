use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog-facing comic row as stored in `comics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComicSummary {
    pub id: i32,
    pub title: String,
    pub thumbnail_url: String,
}

/// Denormalized display row for a single comic.
///
/// Pure data carrier; no validation is applied to any field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comic {
    pub comic_id: i32,
    pub comic_author: String,
    pub comic_issue: i32,
    pub comic_title: String,
    pub comic_series: String,
}

impl Comic {
    pub fn new(
        comic_id: i32,
        comic_author: impl Into<String>,
        comic_issue: i32,
        comic_title: impl Into<String>,
        comic_series: impl Into<String>,
    ) -> Self {
        Self {
            comic_id,
            comic_author: comic_author.into(),
            comic_issue,
            comic_title: comic_title.into(),
            comic_series: comic_series.into(),
        }
    }
}
