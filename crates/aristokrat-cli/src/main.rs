use anyhow::{Context, bail};
use aristokrat_cli::seeder::{self, ResidentSeedConfig};
use aristokrat_core::hash_password;
use aristokrat_core::password::MIN_PASSWORD_LENGTH;
use aristokrat_db::{PgPool, init_db_pool};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "aristokrat-cli")]
#[command(about = "Aristokrat CLI - Administrative tools for the Aristokrat API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address (optional)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a house with its entrances, apartments and resident accounts
    SeedResidents {
        /// House number
        #[arg(long, default_value = "1")]
        house: i32,

        /// Reset passwords of existing resident accounts
        #[arg(long)]
        reset_passwords: bool,

        /// Reset address, car number and phone of existing profiles
        #[arg(long)]
        reset_profiles: bool,

        /// Use the cheapest bcrypt cost (development data only)
        #[arg(long)]
        fast_hash: bool,
    },
    /// Create every missing door, lift, gate and parking device
    SeedDevices,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = init_db_pool().await?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&pool, username, email, password).await,
        Commands::SeedResidents {
            house,
            reset_passwords,
            reset_profiles,
            fast_hash,
        } => {
            let config = ResidentSeedConfig {
                house,
                reset_passwords,
                reset_profiles,
                fast_hash,
            };
            seeder::seed_residents(&pool, config).await.map(|_| ())
        }
        Commands::SeedDevices => seeder::seed_devices(&pool).await.map(|_| ()),
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("Failed to read username")?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        bail!("Username must not be empty");
    }

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    let email = email.unwrap_or_default();
    create_admin(pool, &username, email.trim(), &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Username: {}", username);
    Ok(())
}

async fn create_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let user_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, password_hash, is_active, is_admin)
         VALUES ($1, $2, $3, TRUE, TRUE)
         ON CONFLICT (username) DO NOTHING
         RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .fetch_optional(db)
    .await?;

    match user_id {
        Some(id) => Ok(id),
        None => bail!("User '{username}' already exists"),
    }
}
