pub mod collection;
pub mod record;

use serde::Deserialize;

use crate::database::models::NewTopic;

pub use collection::get as topics_get;
pub use collection::post as topics_post;
pub use record::delete as topic_delete;
pub use record::get as topic_get;
pub use record::put as topic_put;

#[derive(Debug, Deserialize)]
pub struct TopicPayload {
    #[serde(default)]
    pub name: String,
}

impl From<TopicPayload> for NewTopic {
    fn from(payload: TopicPayload) -> Self {
        NewTopic { name: payload.name }
    }
}
