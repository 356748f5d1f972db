use sqlx::SqlitePool;
use tracing::info;

use crate::auth::Caller;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewTopic, Topic};

pub struct TopicRepository {
    pool: SqlitePool,
}

impl TopicRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, caller: &Caller, input: NewTopic) -> Result<Topic, DatabaseError> {
        input.validate()?;

        let topic = sqlx::query_as::<_, Topic>("INSERT INTO topics (user_id, name) VALUES (?, ?) RETURNING id, user_id, name")
            .bind(caller.commonplace_user_id)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await?;

        info!("Topic {} created by '{}'", topic.id, caller.username);
        Ok(topic)
    }

    /// Any caller may read any topic
    pub async fn find(&self, id: i64) -> Result<Topic, DatabaseError> {
        sqlx::query_as::<_, Topic>("SELECT id, user_id, name FROM topics WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Topic", id))
    }

    /// Every topic, regardless of owner
    pub async fn list(&self) -> Result<Vec<Topic>, DatabaseError> {
        let topics = sqlx::query_as::<_, Topic>("SELECT id, user_id, name FROM topics ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    /// Rename the topic and reassign it to the caller.
    /// A missing topic is reported before anything wrong with the body.
    pub async fn update(&self, caller: &Caller, id: i64, input: NewTopic) -> Result<(), DatabaseError> {
        self.find(id).await?;
        input.validate()?;

        let result = sqlx::query("UPDATE topics SET name = ?, user_id = ? WHERE id = ?")
            .bind(&input.name)
            .bind(caller.commonplace_user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Topic", id));
        }
        Ok(())
    }

    /// Removes the topic; its entry links go with it
    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Topic", id));
        }
        info!("Topic {} deleted", id);
        Ok(())
    }
}
