//! Wire representations returned to clients.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{Entry, EntryOwner, Topic, User};

/// `{id, name}`
#[derive(Debug, Clone, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Topic> for TopicResponse {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.clone(),
        }
    }
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
        }
    }
}

/// Public profile of an entry's owner
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<EntryOwner> for OwnerResponse {
    fn from(owner: EntryOwner) -> Self {
        Self {
            first_name: owner.first_name,
            last_name: owner.last_name,
            email: owner.email,
        }
    }
}

/// `{id, user, title, body, created_on, entry_topics}`. `user` is null for an
/// entry whose owner has been removed.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub id: i64,
    pub user: Option<OwnerResponse>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_on: DateTime<Utc>,
    pub entry_topics: Vec<TopicResponse>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            user: entry.owner.map(OwnerResponse::from),
            title: entry.title,
            body: entry.body,
            created_on: entry.created_on,
            entry_topics: entry.topics.into_iter().map(TopicResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
