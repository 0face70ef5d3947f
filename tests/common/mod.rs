#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use shop_api_rust::database::DatabaseManager;
use sqlx::PgPool;
use uuid::Uuid;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Mutex<Child>,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_shop-api-rust"));
        cmd.env("API_PORT", port.to_string())
            .env("API_PUBLIC_URL", &base_url)
            .env("DATABASE_RUN_MIGRATIONS", "true")
            .env_remove("SMTP_HOST")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child: Mutex::new(child) })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Database-backed tests only run when DATABASE_URL is available.
pub fn database_configured() -> bool {
    let _ = dotenvy::dotenv();
    let configured = std::env::var("DATABASE_URL").is_ok();
    if !configured {
        eprintln!("DATABASE_URL not set, skipping database-backed test");
    }
    configured
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(20)).await?;
    Ok(server)
}

/// Direct pool for seeding state the HTTP API cannot reach, such as reset tokens.
pub async fn database() -> Result<PgPool> {
    Ok(DatabaseManager::connect().await?)
}

/// Unique suffix so repeated runs against the same database do not collide.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

/// Seed a SUPERADMIN with the CLI and log in as it.
pub async fn superadmin_token(server: &TestServer) -> Result<String> {
    let email = format!("{}@shop.test", unique("root"));
    let password = "superadmin-password";

    let status = Command::new(env!("CARGO_BIN_EXE_shopctl"))
        .args(["admin", "create", "--username", "root", "--email", &email, "--password", password])
        .args(["--role", "SUPERADMIN"])
        .stdout(Stdio::null())
        .status()
        .context("failed to run shopctl")?;
    anyhow::ensure!(status.success(), "shopctl admin create failed");

    login(server, "/api/v1/admins/login", &email, password).await
}

pub async fn login(server: &TestServer, path: &str, email: &str, password: &str) -> Result<String> {
    let body: Value = reqwest::Client::new()
        .post(server.url(path))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    body["token"].as_str().map(str::to_string).context("login response has no token")
}

/// Register a customer and return (email, token).
pub async fn register_customer(server: &TestServer, password: &str) -> Result<(String, String)> {
    let email = format!("{}@shop.test", unique("jane"));
    let res = reqwest::Client::new()
        .post(server.url("/api/v1/auth/register"))
        .json(&json!({
            "email": email,
            "fullname": "Jane Doe",
            "password": password,
            "shippingAddress": "1 Main Street",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "register returned {}", res.status());
    let body: Value = res.json().await?;
    let token = body["token"].as_str().context("register response has no token")?.to_string();
    Ok((email, token))
}
