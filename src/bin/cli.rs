use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use ecam::cli::{create_admin, delete_person};
use ecam_config::{DatabaseConfig, ServerConfig};
use ecam_core::BcryptHasher;
use ecam_db::{SqlitePool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "ecam-cli")]
#[command(about = "ECAM CLI - Administrative tools for the ECAM API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete a person and every role they hold
    DeletePerson {
        /// Email address of the person
        #[arg(short = 'e', long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::Migrate => {
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::DeletePerson { email } => handle_delete_person(&pool, &email).await,
    }
}

fn prompt(label: &str, allow_empty: bool) -> anyhow::Result<String> {
    Input::new()
        .with_prompt(label)
        .allow_empty(allow_empty)
        .interact_text()
        .with_context(|| format!("Failed to read {}", label.to_lowercase()))
}

async fn handle_create_admin(
    pool: &SqlitePool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let first_name = match first_name {
        Some(value) => value,
        None => prompt("First name", true)?,
    };
    let last_name = match last_name {
        Some(value) => value,
        None => prompt("Last name", true)?,
    };
    let email = match email {
        Some(value) => value,
        None => prompt("Email address", false)?,
    };
    let password = match password {
        Some(value) => value,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let hasher = Arc::new(BcryptHasher::new(ServerConfig::from_env().bcrypt_cost));

    match create_admin(pool, hasher, first_name, last_name, email, password).await {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {} {}", admin.first_name, admin.last_name);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_delete_person(pool: &SqlitePool, email: &str) -> anyhow::Result<()> {
    if delete_person(pool, email).await? {
        println!("\n✅ Deleted {} and all of their roles", email);
    } else {
        eprintln!("\n❌ No person registered with {}", email);
        std::process::exit(1);
    }
    Ok(())
}
