use serde::{Deserialize, Serialize};

/// Comic creator row as stored in `creators`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub thumbnail_url: String,
}
