use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Application profile linked 1:1 to a `User`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommonplaceUser {
    pub id: i64,
    pub user_id: i64,
}
