use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a post. Anything returned to callers goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post as the record store keeps it, including internal-only columns.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Insertion order, breaks ties between equal `created_at` values.
    pub seq: u64,
}

impl From<PostRecord> for Post {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            text: record.text,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Data for a new row. The store fills in `id` when it is `None`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: Option<String>,
    pub title: String,
    pub text: String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub text: Option<String>,
}
