use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::models::CollectionSearch;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Case-insensitive substring of the collection name
    pub name: Option<String>,
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    /// Zero-based page index
    #[param(default = 0, minimum = 0)]
    pub page: Option<i64>,
}

impl SearchParams {
    pub fn to_search(&self) -> CollectionSearch {
        CollectionSearch {
            name: self.name.clone().unwrap_or_default(),
            limit: self.limit.unwrap_or(20).clamp(1, 100) as u64,
            page: self.page.unwrap_or(0).max(0) as u64,
        }
    }
}

/// Reject blank values and values longer than `max_len` characters
pub fn validate_required(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
