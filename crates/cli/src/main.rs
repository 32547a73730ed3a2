//! Tamarind CLI - migrations, seed data, and admin account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! tamarind-cli migrate storefront
//! tamarind-cli migrate admin
//! tamarind-cli migrate all
//!
//! # Seed the menu catalog (no-op if items already exist)
//! tamarind-cli seed
//!
//! # Create an admin account (prompts nothing; password via flag or env)
//! tamarind-cli admin create -e ops@example.com -n "Ops" -p "a strong password"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use tamarind_core::AdminRole;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "tamarind-cli")]
#[command(version, about = "Tamarind CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the menu catalog with the standard items
    Seed,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Login username (defaults to the email's local part)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (falls back to the ADMIN_PASSWORD environment variable)
        #[arg(short, long)]
        password: Option<String>,

        /// Admin role (`admin` or `super_admin`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                username,
                password,
                role,
            } => {
                let role: AdminRole = role
                    .parse()
                    .map_err(|_| CliError::InvalidArgument("role must be admin or super_admin"))?;
                let password = password
                    .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
                    .ok_or(CliError::InvalidArgument(
                        "provide --password or set ADMIN_PASSWORD",
                    ))?;

                commands::admin::create_account(commands::admin::CreateAccount {
                    email: &email,
                    name: &name,
                    username: username.as_deref(),
                    password: &password,
                    role,
                })
                .await?;
            }
        },
    }
    Ok(())
}
