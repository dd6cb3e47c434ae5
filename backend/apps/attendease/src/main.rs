//! AttendEase Terminal Entry Point
//!
//! Uses `anyhow` for startup errors; application-level errors are
//! `kernel::error::AppError` and are printed with their suggested action.

mod commands;
mod config;
mod input;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use auth::application::SignInMode;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kernel::error::app_error::AppError;

use crate::commands::App;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "attendease")]
#[command(about = "Proof-of-presence attendance with short-lived QR codes", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the signed-in identity (overrides ATTENDEASE_SESSION_PATH)
    #[arg(long, global = true)]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an institutional e-mail address
    SignIn {
        /// faculty@iiitp.ac.in or 123456789@cse.iiitp.ac.in
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account (same rules as sign-in)
    Register {
        email: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the signed-in identity
    SignOut,

    /// Show the signed-in identity
    Whoami,

    /// Show a session QR code (faculty)
    Issue {
        /// Course code, e.g. CS301
        #[arg(short, long)]
        class: Option<String>,
    },

    /// Scan a session QR code (students)
    Scan,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout belongs to the UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendease=info,attendance=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app) => commands::print_error(app),
                None => {
                    tracing::error!(error = %e, "Fatal error");
                    eprintln!("Error: {e:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.session_dir {
        config.session_dir = dir;
    }
    tracing::debug!(session_dir = %config.session_dir.display(), "Configuration loaded");

    let app = App::new(config);
    match cli.command {
        Commands::SignIn { email, password } => app.sign_in(email, password, SignInMode::SignIn).await,
        Commands::Register { email, password } => {
            app.sign_in(email, password, SignInMode::Register).await
        }
        Commands::SignOut => app.sign_out().await,
        Commands::Whoami => app.whoami().await,
        Commands::Issue { class } => app.issue(class).await,
        Commands::Scan => app.scan().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_issue() {
        let cli = Cli::try_parse_from(["attendease", "issue", "--class", "CS301"]).unwrap();
        assert!(matches!(cli.command, Commands::Issue { class: Some(ref c) } if c == "CS301"));
    }

    #[test]
    fn test_parse_sign_in_with_global_dir() {
        let cli = Cli::try_parse_from([
            "attendease",
            "sign-in",
            "prof@iiitp.ac.in",
            "-p",
            "secret1",
            "--session-dir",
            "/tmp/ae",
        ])
        .unwrap();
        assert_eq!(cli.session_dir, Some(PathBuf::from("/tmp/ae")));
        assert!(matches!(cli.command, Commands::SignIn { .. }));
    }
}
