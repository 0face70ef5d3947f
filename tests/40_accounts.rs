mod common;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use shop_api_rust::auth::reset::ResetToken;
use shop_api_rust::database::models::Customer;

#[tokio::test]
async fn customer_self_service() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (email, token) = common::register_customer(server, "first-password").await?;

    // duplicate registration
    let res = client
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({ "email": email, "fullname": "Again", "password": "x", "shippingAddress": "y" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "email already exists");

    // profile never exposes the password
    let me: Value = client
        .get(server.url("/api/v1/auth/me"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me["data"]["email"], email);
    assert!(me["data"].get("password").is_none());

    // update details
    let res = client
        .put(server.url("/api/v1/auth/update-details"))
        .bearer_auth(&token)
        .json(&json!({ "phone": "0123456789", "shippingAddress": "2 Side Street" }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["phone"], "0123456789");
    assert_eq!(body["data"]["shippingAddress"], "2 Side Street");

    // wrong login
    let res = client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "email": email, "password": "nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "email or password is incorrect");

    // change password
    let res = client
        .put(server.url("/api/v1/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "currentPassword": "wrong", "newPassword": "second-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "current password is incorrect");

    let res = client
        .put(server.url("/api/v1/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "currentPassword": "first-password", "newPassword": "second-password" }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "success": true, "message": "password has been updated" }));

    common::login(server, "/api/v1/auth/login", &email, "second-password").await?;

    // forgot password answers the same for unknown addresses
    for address in [email.as_str(), "nobody@shop.test"] {
        let res = client
            .post(server.url("/api/v1/auth/forgot-password"))
            .json(&json!({ "email": address }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .post(server.url("/api/v1/auth/reset-password/not-a-real-token"))
        .json(&json!({ "password": "third-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admin_management() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let root = common::superadmin_token(server).await?;

    // invalid role
    let res = client
        .post(server.url("/api/v1/admins"))
        .bearer_auth(&root)
        .json(&json!({ "username": "mod", "email": "mod@shop.test", "password": "pw", "role": "OWNER" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "role type is not valid");
    assert_eq!(body["error"]["detail"][0]["code"], "invalidRole");

    // create a moderator; password is not echoed
    let email = format!("{}@shop.test", common::unique("mod"));
    let res = client
        .post(server.url("/api/v1/admins"))
        .bearer_auth(&root)
        .json(&json!({ "username": "mod", "email": email, "password": "moderator-pw", "role": "MODERATOR" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    let moderator_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["role"], "MODERATOR");
    assert!(body["data"].get("password").is_none());

    // a moderator is an admin but not a superadmin
    let moderator = common::login(server, "/api/v1/admins/login", &email, "moderator-pw").await?;
    let me: Value = client
        .get(server.url("/api/v1/admins/me"))
        .bearer_auth(&moderator)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me["data"]["role"], "MODERATOR");

    let res = client.get(server.url("/api/v1/admins")).bearer_auth(&moderator).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client.get(server.url("/api/v1/customers")).bearer_auth(&moderator).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // self update returns the narrow projection
    let res = client
        .put(server.url("/api/v1/admins"))
        .bearer_auth(&moderator)
        .json(&json!({ "username": "moderator" }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["username"], "moderator");
    assert!(body["data"].get("role").is_none());

    // superadmin promotes, then deletes
    let res = client
        .put(server.url(&format!("/api/v1/admins/{}", moderator_id)))
        .bearer_auth(&root)
        .json(&json!({ "role": "ADMIN" }))
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["role"], "ADMIN");

    let res = client
        .delete(server.url(&format!("/api/v1/admins/{}", moderator_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // the deleted admin's token no longer works
    let res = client.get(server.url("/api/v1/admins/me")).bearer_auth(&moderator).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn reset_password_with_a_stored_token() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let pool = common::database().await?;
    let client = reqwest::Client::new();
    let (email, _) = common::register_customer(server, "forgotten-password").await?;
    let customer = Customer::find_by_email(&pool, &email).await?.context("customer was registered")?;

    // expired token
    let stale = ResetToken::generate();
    Customer::set_reset_token(&pool, customer.id, &stale.hash, Utc::now() - Duration::minutes(1)).await?;
    let res = client
        .post(server.url(&format!("/api/v1/auth/reset-password/{}", stale.token)))
        .json(&json!({ "password": "new-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "reset token is invalid or has expired");

    // valid token resets once and logs the customer in
    let fresh = ResetToken::generate();
    Customer::set_reset_token(&pool, customer.id, &fresh.hash, fresh.expires_at).await?;
    let reset_url = server.url(&format!("/api/v1/auth/reset-password/{}", fresh.token));

    let res = client.post(&reset_url).json(&json!({ "password": "new-password" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("reset returns a token")?;
    let me: Value = client
        .get(server.url("/api/v1/auth/me"))
        .bearer_auth(token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(me["data"]["email"], email);

    common::login(server, "/api/v1/auth/login", &email, "new-password").await?;
    let res = client
        .post(server.url("/api/v1/auth/login"))
        .json(&json!({ "email": email, "password": "forgotten-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.post(&reset_url).json(&json!({ "password": "again" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admins_manage_customers() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let root = common::superadmin_token(server).await?;
    let (email, customer_token) = common::register_customer(server, "customer-password").await?;

    // customer tokens cannot reach the admin listing
    let res = client.get(server.url("/api/v1/customers")).bearer_auth(&customer_token).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let list: Value = client
        .get(server.url("/api/v1/customers"))
        .bearer_auth(&root)
        .send()
        .await?
        .json()
        .await?;
    let rows = list["data"].as_array().context("customer list is an array")?;
    assert_eq!(list["count"], rows.len());
    assert!(rows.iter().all(|row| row.get("password").is_none()));
    let customer_id = rows
        .iter()
        .find(|row| row["email"] == email.as_str())
        .and_then(|row| row["id"].as_i64())
        .context("registered customer is listed")?;

    let res = client
        .get(server.url(&format!("/api/v1/customers/{}", customer_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["email"], email);
    assert!(body["data"].get("password").is_none());

    let res = client
        .delete(server.url(&format!("/api/v1/customers/{}", customer_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(server.url(&format!("/api/v1/customers/{}", customer_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(server.url(&format!("/api/v1/customers/{}", customer_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "record to delete does not exist.");
    Ok(())
}

#[tokio::test]
async fn superadmin_cannot_delete_itself() -> Result<()> {
    if !common::database_configured() {
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let root = common::superadmin_token(server).await?;

    let me: Value = client
        .get(server.url("/api/v1/admins/me"))
        .bearer_auth(&root)
        .send()
        .await?
        .json()
        .await?;
    let own_id = me["data"]["id"].as_i64().context("me has an id")?;

    let res = client
        .delete(server.url(&format!("/api/v1/admins/{}", own_id)))
        .bearer_auth(&root)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"]["message"], "you cannot delete your own account");

    let res = client.get(server.url("/api/v1/admins/me")).bearer_auth(&root).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
