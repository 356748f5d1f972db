#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use commonplace_api::config::AppConfig;
use commonplace_api::database::DatabaseManager;
use commonplace_api::{app, AppState};

/// A server instance with its own in-memory database
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Register a user and return its bearer token
    pub async fn register(&self, username: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({
                "username": username,
                "password": "thisisapassword",
                "first_name": "First Name",
                "last_name": "Last Name",
                "email": format!("{}@example.com", username),
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["token"].as_str().map(String::from).context("register response without token")
    }

    pub async fn create_topic(&self, token: &str, name: &str) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/topics"))
            .bearer_auth(token)
            .json(&json!({ "name": name }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create topic failed: {}", res.status());
        let body = res.json::<Value>().await?;
        body["id"].as_i64().context("topic without id")
    }

    pub async fn create_entry(&self, token: &str, title: &str, body: &str, topics: &[i64]) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/entries"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "body": body, "entry_topics": topics }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create entry failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }
}

/// Start the full router on a free port against a fresh in-memory database
pub async fn spawn_server() -> Result<TestServer> {
    let mut config = AppConfig::development();
    config.database.url = "sqlite::memory:".to_string();
    config.api.enable_request_logging = false;

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let router = app(AppState::new(pool, config));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
