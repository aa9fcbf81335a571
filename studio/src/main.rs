use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use studio::{
    AdminRole, Credentials, FileStore, LockoutConfig, RecordId, RecordKind, RequestStatus,
    SlotKind, StudioBuilder,
};
use tracing::Level;

/// Command line interface for the studio admin console
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long, env = "STUDIO_DB_URL", default_value = "sqlite://studio.db")]
    db_url: String,

    /// File holding the login lockout state between runs
    #[arg(long, env = "STUDIO_STATE_FILE", default_value = ".studio-lockout.json")]
    state_file: PathBuf,

    /// Failed logins before the console locks
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Lock length in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(1..))]
    lock_seconds: i64,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(clap::Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print version information
    Version,
    /// Print the payment summary as JSON
    Summary,
    /// List bookings and rentals with a review status (Pending, Confirmed, Declined)
    Requests {
        status: RequestStatus,
        /// Only rows whose email, name or kind contains this text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Confirm a booking or rental request
    Confirm { kind: RecordKind, id: i64 },
    /// Decline a booking or rental request
    Decline { kind: RecordKind, id: i64 },
    /// List unbooked slots of one kind (dance, private, rental)
    Slots { kind: SlotKind },
    /// Create an admin account; the password is read from STUDIO_PASSWORD
    CreateAdmin {
        email: String,
        username: String,
        #[arg(long, default_value = "Admin")]
        role: AdminRole,
        #[arg(long, env = "STUDIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in as an admin; the password is read from STUDIO_PASSWORD
    Login {
        identifier: String,
        #[arg(long, env = "STUDIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Version = cli.command {
        println!("Studio v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let lock_duration = chrono::Duration::try_seconds(cli.lock_seconds)
        .ok_or_else(|| format!("--lock-seconds {} is out of range", cli.lock_seconds))?;
    let lockout = LockoutConfig::new(cli.max_attempts, lock_duration);
    let studio = StudioBuilder::new()
        .with_sqlite(&cli.db_url)
        .await?
        .with_lockout_config(lockout)
        .build()
        .await?;

    match cli.command {
        Commands::Version => {}
        Commands::Migrate => {
            println!("Running migrations...");
            studio.migrate().await?;
        }
        Commands::Summary => {
            let summary = studio.payment_summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Requests { status, search } => {
            let requests = studio.search_requests(status, &search).await?;
            println!("{}", serde_json::to_string_pretty(&requests)?);
        }
        Commands::Confirm { kind, id } => {
            let record = studio.confirm_request(kind, Some(RecordId::new(id))).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Decline { kind, id } => {
            let record = studio.decline_request(kind, Some(RecordId::new(id))).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Slots { kind } => {
            let slots = studio.available_slots(kind).await?;
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::CreateAdmin {
            email,
            username,
            role,
            password,
        } => {
            let account = studio
                .create_admin(&email, &username, &password, role)
                .await?;
            println!("Created {} ({})", account.id, account.role);
        }
        Commands::Login {
            identifier,
            password,
        } => {
            let mut login = studio.login_service(FileStore::new(&cli.state_file));
            let admin = login
                .login(&Credentials::new(&identifier, &password))
                .await?;
            println!(
                "Signed in as {} ({}), landing on {:?}",
                admin.user_id,
                admin.role,
                admin.landing()
            );
        }
    }

    Ok(())
}
