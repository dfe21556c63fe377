use serde::{Deserialize, Serialize};

use super::ComicSummary;

/// A named, user-owned grouping of catalog comics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// Ordered by comic id; loaded through `comics_collections`
    pub comics: Vec<ComicSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    pub name: String,
}

/// Case-insensitive name search over collections, one page at a time.
#[derive(Debug, Clone)]
pub struct CollectionSearch {
    pub name: String,
    pub limit: u64,
    /// Zero-based page index
    pub page: u64,
}
