use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::auth::password::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::{Admin, NewAdmin};
use crate::database::DatabaseManager;
use crate::validate::{normalize_email, AdminRole};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin account (use --role SUPERADMIN to bootstrap)")]
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "ADMIN", help = "SUPERADMIN, ADMIN or MODERATOR")]
        role: String,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Create { username, email, password, role } => {
            let role = AdminRole::parse(&role).map_err(|e| anyhow::anyhow!("{}", e))?;
            let email = normalize_email(&email).map_err(|e| anyhow::anyhow!("{}", e))?;
            let admin = NewAdmin {
                username,
                email,
                password_hash: hash_password(&password)?,
                role,
            };

            let pool = DatabaseManager::connect().await?;
            let id = Admin::insert(&pool, &admin)
                .await
                .with_context(|| format!("failed to create admin {}", admin.email))?;
            pool.close().await;

            output_success(
                output_format,
                &format!("Created {} {}", role, admin.email),
                Some(json!({ "id": id, "username": admin.username, "email": admin.email, "role": role })),
            )
        }
    }
}
