use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::topic::Topic;
use crate::database::manager::DatabaseError;

pub const ENTRY_TITLE_MAX_CHARS: usize = 500;

/// Entry row joined with the owning user's public profile columns.
/// The owner columns are null when the entry has no owner.
#[derive(Debug, Clone, FromRow)]
pub struct EntryRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_on: DateTime<Utc>,
    pub owner_first_name: Option<String>,
    pub owner_last_name: Option<String>,
    pub owner_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOwner {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// An entry with its owner and attached topics resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub owner: Option<EntryOwner>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_on: DateTime<Utc>,
    pub topics: Vec<Topic>,
}

impl Entry {
    pub fn from_row(row: EntryRow, topics: Vec<Topic>) -> Self {
        let owner = match (row.user_id, row.owner_first_name, row.owner_last_name, row.owner_email) {
            (Some(_), Some(first_name), Some(last_name), Some(email)) => Some(EntryOwner {
                first_name,
                last_name,
                email,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            user_id: row.user_id,
            owner,
            title: row.title,
            body: row.body,
            created_on: row.created_on,
            topics,
        }
    }
}

/// Create and full-replace update input
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic_ids: Vec<i64>,
}

impl NewEntry {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if let Some(title) = &self.title {
            if title.chars().count() > ENTRY_TITLE_MAX_CHARS {
                return Err(DatabaseError::Validation(format!(
                    "Entry title must be at most {} characters",
                    ENTRY_TITLE_MAX_CHARS
                )));
            }
        }
        Ok(())
    }

    /// Topic ids with duplicates removed, first occurrence kept
    pub fn distinct_topic_ids(&self) -> Vec<i64> {
        let mut seen = Vec::with_capacity(self.topic_ids.len());
        for id in &self.topic_ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: Option<i64>) -> EntryRow {
        EntryRow {
            id: 1,
            user_id,
            title: Some("t".into()),
            body: None,
            created_on: Utc::now(),
            owner_first_name: user_id.map(|_| "Ada".into()),
            owner_last_name: user_id.map(|_| "Lovelace".into()),
            owner_email: user_id.map(|_| "ada@example.com".into()),
        }
    }

    #[test]
    fn ownerless_row_has_no_owner() {
        let entry = Entry::from_row(row(None), vec![]);
        assert!(entry.owner.is_none());
    }

    #[test]
    fn owned_row_carries_profile() {
        let entry = Entry::from_row(row(Some(3)), vec![]);
        assert_eq!(entry.owner.unwrap().first_name, "Ada");
    }

    #[test]
    fn title_over_limit_is_invalid() {
        let input = NewEntry {
            title: Some("x".repeat(501)),
            ..Default::default()
        };
        assert!(matches!(input.validate(), Err(DatabaseError::Validation(_))));
    }

    #[test]
    fn missing_title_is_valid() {
        assert!(NewEntry::default().validate().is_ok());
    }

    #[test]
    fn duplicate_topic_ids_collapse() {
        let input = NewEntry {
            topic_ids: vec![3, 1, 3, 2, 1],
            ..Default::default()
        };
        assert_eq!(input.distinct_topic_ids(), vec![3, 1, 2]);
    }
}
