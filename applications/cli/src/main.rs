/// CivicLink - report and track civic issues from the terminal
use civiclink_cli::{App, AppConfig, CliError, DashboardArgs, ReportArgs};
use civiclink_core::{Category, Status};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "civiclink")]
#[command(about = "Report and track civic issues", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "CIVICLINK_PASSWORD")]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "CIVICLINK_PASSWORD")]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List complaints with stats
    Dashboard {
        /// Only complaints reported by you
        #[arg(long)]
        mine: bool,
        /// Match title, description or location
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<Status>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Report a new issue
    Report {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// roads, water, electricity, parks, waste or other
        #[arg(long)]
        category: String,
        #[arg(short, long)]
        location: String,
        /// LOW, MEDIUM or HIGH (default MEDIUM)
        #[arg(short, long)]
        priority: Option<String>,
        /// Image to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Change a complaint's status
    Status { id: String, status: Status },
    /// Upvote a complaint
    Upvote { id: String },
    /// Show one complaint
    Show { id: String },
    /// Check that the backend is reachable
    Ping,
    /// Load the backend's sample complaints
    Populate,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civiclink=info,civiclink_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(CliError::LoginRequired(_)) = e.downcast_ref::<CliError>() {
                eprintln!("{}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let app = App::connect(config).await?;

    let output = match cli.command {
        Commands::Login { email, password } => app.login(&email, &password).await?,
        Commands::Signup {
            email,
            password,
            full_name,
            phone,
        } => {
            app.signup(&email, &password, &full_name, phone.as_deref())
                .await?
        }
        Commands::Logout => app.logout().await?,
        Commands::Whoami => app.whoami().await?,
        Commands::Dashboard {
            mine,
            search,
            status,
            category,
        } => {
            app.dashboard(DashboardArgs {
                mine,
                search,
                status,
                category,
            })
            .await?
        }
        Commands::Report {
            title,
            description,
            category,
            location,
            priority,
            photo,
        } => {
            app.report(ReportArgs {
                title,
                description,
                category,
                location,
                priority,
                photo,
            })
            .await?
        }
        Commands::Status { id, status } => app.set_status(&id, status).await?,
        Commands::Upvote { id } => app.upvote(&id).await?,
        Commands::Show { id } => app.show(&id).await?,
        Commands::Ping => app.ping().await?,
        Commands::Populate => app.populate().await?,
    };

    Ok(output)
}
