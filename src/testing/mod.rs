//! Fixtures for in-crate tests: a migrated in-memory database and helpers
//! that register users and resolve them into callers.

use sqlx::SqlitePool;

use crate::auth::Caller;
use crate::config::DatabaseConfig;
use crate::database::models::NewUser;
use crate::database::repository::UserRepository;
use crate::database::DatabaseManager;

pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
        };
        let pool = DatabaseManager::connect(&config).await.expect("in-memory pool");
        DatabaseManager::migrate(&pool).await.expect("migrations");
        Self { pool }
    }

    /// Register `username` and return the caller it authenticates as
    pub async fn create_caller(&self, username: &str) -> Caller {
        let repo = UserRepository::new(self.pool.clone());
        let (user, _) = repo.register(new_user(username)).await.expect("register");
        repo.find_caller(user.id).await.expect("lookup").expect("caller exists")
    }
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        first_name: "First".to_string(),
        last_name: "Last".to_string(),
        email: format!("{}@example.com", username),
    }
}
