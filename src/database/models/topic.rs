use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::manager::DatabaseError;

pub const TOPIC_NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub id: i64,
    /// Owning `CommonplaceUser`; null once the owner is removed
    pub user_id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
}

impl NewTopic {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.name.trim().is_empty() {
            return Err(DatabaseError::Validation("Topic name is required".to_string()));
        }
        if self.name.chars().count() > TOPIC_NAME_MAX_CHARS {
            return Err(DatabaseError::Validation(format!(
                "Topic name must be at most {} characters",
                TOPIC_NAME_MAX_CHARS
            )));
        }
        Ok(())
    }
}
