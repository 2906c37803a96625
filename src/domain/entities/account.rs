use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the platform account the bot runs as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub screen_name: String,
    pub description: String,
    pub friend_count: u64,
    pub created_at: DateTime<Utc>,
    pub verified: bool,
    pub url: String,
}
