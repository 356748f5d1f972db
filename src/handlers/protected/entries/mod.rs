pub mod collection;
pub mod record;

use serde::Deserialize;

use crate::database::models::NewEntry;

// Re-export handler functions for use in routing
pub use collection::get as entries_get;
pub use collection::post as entries_post;
pub use record::delete as entry_delete;
pub use record::get as entry_get;
pub use record::put as entry_put;

/// Body for create and update. Unknown keys (`user`, `created_on`) are ignored:
/// ownership and creation time are always server-assigned.
#[derive(Debug, Deserialize)]
pub struct EntryPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub entry_topics: Vec<i64>,
}

impl From<EntryPayload> for NewEntry {
    fn from(payload: EntryPayload) -> Self {
        NewEntry {
            title: payload.title,
            body: payload.body,
            topic_ids: payload.entry_topics,
        }
    }
}
