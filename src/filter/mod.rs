//! Query-string filtering for entry listings.
//!
//! Listing is always restricted to the caller's own entries. On top of that a
//! substring predicate applies only when both `title` and `body` are present,
//! and it matches entries whose title contains `title` OR whose body contains
//! `body`. Supplying just one of the two parameters filters nothing.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFilter {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// The active substring predicate, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringMatch<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl EntryFilter {
    pub fn substring_match(&self) -> Option<SubstringMatch<'_>> {
        match (self.title.as_deref(), self.body.as_deref()) {
            (Some(title), Some(body)) => Some(SubstringMatch { title, body }),
            _ => None,
        }
    }
}

impl SubstringMatch<'_> {
    /// SQL fragment for the predicate, binding `title` then `body`.
    /// `instr` keeps containment case-sensitive where `LIKE` would not be.
    pub const SQL: &'static str = "(instr(e.title, ?) > 0 OR instr(e.body, ?) > 0)";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    fn filter(title: Option<&str>, body: Option<&str>) -> EntryFilter {
        EntryFilter {
            title: title.map(String::from),
            body: body.map(String::from),
        }
    }

    #[test]
    fn requires_both_parameters() {
        assert!(filter(None, None).substring_match().is_none());
        assert!(filter(Some("foo"), None).substring_match().is_none());
        assert!(filter(None, Some("bar")).substring_match().is_none());
        assert!(filter(Some("foo"), Some("bar")).substring_match().is_some());
    }

    /// Titles of the unowned entries matching the predicate
    async fn matching(pool: &sqlx::SqlitePool, m: &SubstringMatch<'_>) -> Vec<String> {
        sqlx::query_scalar(&format!("SELECT e.title FROM entries e WHERE {} ORDER BY e.id", SubstringMatch::SQL))
            .bind(m.title)
            .bind(m.body)
            .fetch_all(pool)
            .await
            .unwrap()
    }

    async fn seed(pool: &sqlx::SqlitePool, rows: &[(&str, Option<&str>)]) {
        for (title, body) in rows {
            sqlx::query("INSERT INTO entries (title, body, created_on) VALUES (?, ?, ?)")
                .bind(title)
                .bind(body)
                .bind(chrono::Utc::now())
                .execute(pool)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn either_field_is_enough() {
        let ctx = TestContext::new().await;
        seed(
            &ctx.pool,
            &[
                ("a foo title", Some("nothing")),
                ("nothing", Some("a bar body")),
                ("neither", Some("nothing")),
                ("no body", None),
            ],
        )
        .await;

        let f = filter(Some("foo"), Some("bar"));
        let found = matching(&ctx.pool, &f.substring_match().unwrap()).await;
        assert_eq!(found, vec!["a foo title", "nothing"]);
    }

    #[tokio::test]
    async fn containment_is_case_sensitive() {
        let ctx = TestContext::new().await;
        seed(&ctx.pool, &[("FOO", Some("BAR")), ("foo", Some("bar"))]).await;

        let f = filter(Some("foo"), Some("bar"));
        assert_eq!(matching(&ctx.pool, &f.substring_match().unwrap()).await, vec!["foo"]);
    }
}
