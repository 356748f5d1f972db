mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_returns_created_with_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let token = server.register("email@gmail.com").await?;
    assert!(!token.is_empty());
    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_username() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("ada").await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({"username": "ada", "password": "another"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn register_requires_password() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/register"))
        .json(&json!({"username": "ada"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn login_with_registered_credentials() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("ada").await?;

    let res = server
        .client
        .post(server.url("/login"))
        .json(&json!({"username": "ada", "password": "thisisapassword"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let token = res.json::<Value>().await?["token"].as_str().unwrap_or_default().to_string();
    let whoami = server.client.get(server.url("/whoami")).bearer_auth(&token).send().await?;
    assert_eq!(whoami.status(), StatusCode::OK);

    let profile = whoami.json::<Value>().await?;
    assert_eq!(profile["username"], "ada");
    assert_eq!(profile["first_name"], "First Name");
    assert!(profile.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("ada").await?;

    for payload in [
        json!({"username": "ada", "password": "wrong"}),
        json!({"username": "nobody", "password": "thisisapassword"}),
    ] {
        let res = server.client.post(server.url("/login")).json(&payload).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let missing = server.client.get(server.url("/entries")).send().await?;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = server
        .client
        .get(server.url("/topics"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let body = garbage.json::<Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn legacy_token_scheme_is_accepted() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.register("ada").await?;

    let res = server
        .client
        .get(server.url("/entries"))
        .header("Authorization", format!("Token {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
