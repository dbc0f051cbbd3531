//! User provisioning for the incident reporting service.
//!
//! ```bash
//! incidents-admin create-user alice 's3cret-pass'
//! incidents-admin create-user bob 'another-pass' --staff
//! incidents-admin set-staff alice --revoke
//! incidents-admin deactivate bob
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use incidents_api::auth::password::{
    hash_password, validate_password_strength, MIN_PASSWORD_LENGTH,
};
use incidents_db::models::user::CreateUser;
use incidents_db::repositories::UserRepo;
use incidents_db::DbPool;

#[derive(Parser)]
#[command(name = "incidents-admin")]
#[command(about = "Incident reporting user administration", long_about = None)]
#[command(version)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        #[arg(value_name = "USERNAME")]
        username: String,

        #[arg(value_name = "PASSWORD")]
        password: String,

        /// Grant staff privileges (internal comments, administration)
        #[arg(long)]
        staff: bool,
    },

    /// Grant or revoke staff privileges
    SetStaff {
        #[arg(value_name = "USERNAME")]
        username: String,

        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },

    /// Deactivate an account so it can no longer log in
    Deactivate {
        #[arg(value_name = "USERNAME")]
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "incidents_admin=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = incidents_db::create_pool(&cli.database_url)
        .await
        .context("Failed to connect to database")?;
    incidents_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Commands::CreateUser {
            username,
            password,
            staff,
        } => create_user(&pool, username, &password, staff).await,
        Commands::SetStaff { username, revoke } => set_staff(&pool, &username, !revoke).await,
        Commands::Deactivate { username } => deactivate(&pool, &username).await,
    }
}

async fn create_user(
    pool: &DbPool,
    username: String,
    password: &str,
    is_staff: bool,
) -> anyhow::Result<()> {
    let username = username.trim().to_string();
    if username.is_empty() {
        bail!("Username must not be blank");
    }
    if let Err(msg) = validate_password_strength(password, MIN_PASSWORD_LENGTH) {
        bail!(msg);
    }
    if UserRepo::find_by_username(pool, &username).await?.is_some() {
        bail!("User '{username}' already exists");
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("Password hashing failed: {e}"))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username,
            password_hash,
            is_staff,
        },
    )
    .await
    .context("Failed to create user")?;

    tracing::info!(user_id = user.id, username = %user.username, is_staff, "User created");
    println!("Created user '{}' (id {})", user.username, user.id);
    Ok(())
}

async fn set_staff(pool: &DbPool, username: &str, is_staff: bool) -> anyhow::Result<()> {
    let user = UserRepo::find_by_username(pool, username)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;

    UserRepo::set_staff(pool, user.id, is_staff)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;

    tracing::info!(user_id = user.id, username, is_staff, "Staff flag updated");
    println!("'{username}' staff = {is_staff}");
    Ok(())
}

async fn deactivate(pool: &DbPool, username: &str) -> anyhow::Result<()> {
    let user = UserRepo::find_by_username(pool, username)
        .await?
        .with_context(|| format!("No user named '{username}'"))?;

    if UserRepo::deactivate(pool, user.id).await? {
        tracing::info!(user_id = user.id, username, "User deactivated");
        println!("Deactivated '{username}'");
    } else {
        println!("'{username}' was already inactive");
    }
    Ok(())
}
