use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::auth::Caller;
use crate::database::manager::DatabaseError;
use crate::database::models::{Entry, EntryRow, NewEntry, Topic};
use crate::filter::{EntryFilter, SubstringMatch};

const ENTRY_SELECT: &str = "SELECT e.id, e.user_id, e.title, e.body, e.created_on,
        u.first_name AS owner_first_name,
        u.last_name AS owner_last_name,
        u.email AS owner_email
    FROM entries e
    LEFT JOIN commonplace_users cu ON cu.id = e.user_id
    LEFT JOIN users u ON u.id = cu.user_id";

/// A topic attached to a particular entry
#[derive(Debug, FromRow)]
struct EntryTopicRow {
    entry_id: i64,
    id: i64,
    user_id: Option<i64>,
    name: String,
}

pub struct EntryRepository {
    pool: SqlitePool,
}

impl EntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an entry owned by the caller and link its topics
    pub async fn create(&self, caller: &Caller, input: NewEntry) -> Result<Entry, DatabaseError> {
        input.validate()?;
        let topic_ids = input.distinct_topic_ids();

        let mut tx = self.pool.begin().await?;
        ensure_topics_exist(&mut tx, &topic_ids).await?;

        let id = sqlx::query("INSERT INTO entries (user_id, title, body, created_on) VALUES (?, ?, ?, ?)")
            .bind(caller.commonplace_user_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        replace_topics(&mut tx, id, &topic_ids).await?;
        tx.commit().await?;

        info!("Entry {} created by '{}' with {} topic(s)", id, caller.username, topic_ids.len());
        self.find(id).await
    }

    /// Any caller may read any entry by id
    pub async fn find(&self, id: i64) -> Result<Entry, DatabaseError> {
        let row = sqlx::query_as::<_, EntryRow>(&format!("{} WHERE e.id = ?", ENTRY_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Entry", id))?;

        let topics = sqlx::query_as::<_, Topic>(
            "SELECT t.id, t.user_id, t.name
             FROM topics t
             JOIN entry_topics et ON et.topic_id = t.id
             WHERE et.entry_id = ?
             ORDER BY t.id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Entry::from_row(row, topics))
    }

    /// Entries owned by the caller, optionally narrowed by the substring filter
    pub async fn list_for_owner(&self, caller: &Caller, filter: &EntryFilter) -> Result<Vec<Entry>, DatabaseError> {
        let substring = filter.substring_match();

        let mut sql = format!("{} WHERE e.user_id = ?", ENTRY_SELECT);
        if substring.is_some() {
            sql.push_str(" AND ");
            sql.push_str(SubstringMatch::SQL);
        }
        sql.push_str(" ORDER BY e.id");

        let mut query = sqlx::query_as::<_, EntryRow>(&sql).bind(caller.commonplace_user_id);
        if let Some(m) = &substring {
            query = query.bind(m.title).bind(m.body);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let links = sqlx::query_as::<_, EntryTopicRow>(
            "SELECT et.entry_id, t.id, t.user_id, t.name
             FROM entry_topics et
             JOIN topics t ON t.id = et.topic_id
             JOIN entries e ON e.id = et.entry_id
             WHERE e.user_id = ?
             ORDER BY t.id",
        )
        .bind(caller.commonplace_user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut topics_by_entry: HashMap<i64, Vec<Topic>> = HashMap::new();
        for link in links {
            topics_by_entry.entry(link.entry_id).or_default().push(Topic {
                id: link.id,
                user_id: link.user_id,
                name: link.name,
            });
        }

        debug!("Listing {} entries for '{}'", rows.len(), caller.username);
        Ok(rows
            .into_iter()
            .map(|row| {
                let topics = topics_by_entry.remove(&row.id).unwrap_or_default();
                Entry::from_row(row, topics)
            })
            .collect())
    }

    /// Full replace of title, body and topics; the caller becomes the owner.
    /// `created_on` is never written here.
    pub async fn update(&self, caller: &Caller, id: i64, input: NewEntry) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // A missing entry is reported before anything wrong with the body
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM entries WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DatabaseError::not_found("Entry", id));
        }

        input.validate()?;
        let topic_ids = input.distinct_topic_ids();
        ensure_topics_exist(&mut tx, &topic_ids).await?;

        let result = sqlx::query("UPDATE entries SET title = ?, body = ?, user_id = ? WHERE id = ?")
            .bind(&input.title)
            .bind(&input.body)
            .bind(caller.commonplace_user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Entry", id));
        }

        replace_topics(&mut tx, id, &topic_ids).await?;
        tx.commit().await?;

        info!("Entry {} updated by '{}'", id, caller.username);
        Ok(())
    }

    /// Removes the entry; its topic links go with it
    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Entry", id));
        }
        info!("Entry {} deleted", id);
        Ok(())
    }
}

async fn ensure_topics_exist(conn: &mut SqliteConnection, topic_ids: &[i64]) -> Result<(), DatabaseError> {
    for topic_id in topic_ids {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM topics WHERE id = ?")
            .bind(topic_id)
            .fetch_optional(&mut *conn)
            .await?;
        if found.is_none() {
            return Err(DatabaseError::Validation(format!("Topic {} does not exist", topic_id)));
        }
    }
    Ok(())
}

/// Set-replace the entry's topic links: drop every existing link, insert the new set
async fn replace_topics(conn: &mut SqliteConnection, entry_id: i64, topic_ids: &[i64]) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM entry_topics WHERE entry_id = ?")
        .bind(entry_id)
        .execute(&mut *conn)
        .await?;

    for topic_id in topic_ids {
        sqlx::query("INSERT INTO entry_topics (entry_id, topic_id) VALUES (?, ?)")
            .bind(entry_id)
            .bind(topic_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
