//! Comic records as delivered by the external comics catalog.
//!
//! The catalog speaks camelCase JSON and identifies creators by resource URI
//! (`.../v1/public/creators/{id}`). Creator ids and names are derived here so
//! the persistence layer only ever sees already-parsed fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Comic, Creator};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogComic {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub issue_number: f64,
    #[serde(default)]
    pub series: Option<CatalogSeries>,
    pub thumbnail: CatalogImage,
    #[serde(default)]
    pub creators: CreatorList,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogImage {
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogSeries {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatorList {
    #[serde(default)]
    pub items: Vec<CreatorReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatorReference {
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl CatalogComic {
    /// Full image URL: `path + "." + extension`.
    pub fn thumbnail_url(&self) -> String {
        format!("{}.{}", self.thumbnail.path, self.thumbnail.extension)
    }

    /// Flatten into the display row shown to clients.
    pub fn to_display(&self) -> Comic {
        let author = self
            .creators
            .items
            .iter()
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let series = self
            .series
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        Comic::new(
            self.id,
            author,
            self.issue_number as i32,
            self.title.clone(),
            series,
        )
    }
}

impl CreatorReference {
    /// Numeric id from the last path segment of the resource URI.
    ///
    /// `None` when the URI is missing or its last segment is not an integer.
    pub fn creator_id(&self) -> Option<i32> {
        let uri = self.resource_uri.as_deref()?;
        let last_segment = uri.rsplit('/').next()?;
        last_segment.trim().parse().ok()
    }

    /// Resolve into a storable creator, or `None` if the id can't be derived.
    pub fn to_creator(&self) -> Option<Creator> {
        let id = self.creator_id()?;
        let (first_name, last_name) = split_display_name(&self.name);

        Some(Creator {
            id,
            first_name,
            last_name,
            thumbnail_url: String::new(),
        })
    }
}

/// Split a display name into `(first, last)`.
///
/// First is the text before the first space, last is the text after the
/// last space. A name without any space yields two empty strings.
pub fn split_display_name(name: &str) -> (String, String) {
    let name = name.trim();
    match (name.find(' '), name.rfind(' ')) {
        (Some(first), Some(last)) => (name[..first].to_string(), name[last + 1..].to_string()),
        _ => (String::new(), String::new()),
    }
}
