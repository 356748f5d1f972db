use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::Caller;
use crate::database::manager::DatabaseError;
use crate::database::models::{CommonplaceUser, NewUser, User};

const USER_COLUMNS: &str = "id, username, password, first_name, last_name, email, date_joined";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the identity and its profile record in one transaction
    pub async fn register(&self, new_user: NewUser) -> Result<(User, CommonplaceUser), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(&new_user.username)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(DatabaseError::Conflict(format!(
                "Username '{}' is already registered",
                new_user.username
            )));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, first_name, last_name, email, date_joined)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Conflict(format!(
                "Username '{}' is already registered",
                new_user.username
            )),
            other => DatabaseError::Sqlx(other),
        })?;

        let profile = sqlx::query_as::<_, CommonplaceUser>(
            "INSERT INTO commonplace_users (user_id) VALUES (?) RETURNING id, user_id",
        )
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Registered user '{}' (id {})", user.username, user.id);
        Ok((user, profile))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", user_id))
    }

    /// Resolve the identity and profile a token refers to.
    /// `None` when the user or its profile no longer exists.
    pub async fn find_caller(&self, user_id: i64) -> Result<Option<Caller>, DatabaseError> {
        let caller = sqlx::query_as::<_, Caller>(
            "SELECT u.id AS user_id, cu.id AS commonplace_user_id, u.username
             FROM users u
             JOIN commonplace_users cu ON cu.user_id = u.id
             WHERE u.id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(caller)
    }
}
