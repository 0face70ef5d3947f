use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;

pub async fn handle(url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = url.unwrap_or_else(|| config::config().api.public_url.clone());
    let health_url = format!("{}/health", base.trim_end_matches('/'));

    let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
    let started = Instant::now();
    let response = match client.get(&health_url).send().await {
        Ok(response) => response,
        Err(e) => {
            output_error(output_format, &format!("{} is unreachable: {}", health_url, e))?;
            anyhow::bail!("server unreachable");
        }
    };

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        output_success(
            output_format,
            &format!("{} is up ({} ms)", base, elapsed_ms),
            Some(json!({ "status": status.as_u16(), "elapsedMs": elapsed_ms, "health": body })),
        )
    } else {
        output_error(output_format, &format!("{} answered {}: {}", health_url, status, body))?;
        anyhow::bail!("server unhealthy")
    }
}
