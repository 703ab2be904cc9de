//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use gatekey_core::config::Config;
use gatekey_core::session::SessionStore;
use gatekey_tui::Route;

mod commands;

#[derive(Parser)]
#[command(name = "gatekey")]
#[command(version)]
#[command(about = "Terminal client for the Akil authentication API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the sign-in screen
    Signin,
    /// Open the account creation screen
    Signup,
    /// Open the email verification screen
    Verify {
        /// Address the verification code was sent to
        #[arg(long)]
        email: String,
    },
    /// Print the current session state
    Status,
    /// Remove the persisted session
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Guard must outlive the dispatch so buffered log lines flush on exit.
    let _log_guard = gatekey_core::logging::init().context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let store = SessionStore::new();

    // default to the home screen
    let Some(command) = cli.command else {
        return gatekey_tui::run(config, store, Route::Home).await;
    };

    match command {
        Commands::Signin => gatekey_tui::run(config, store, Route::SignIn).await,
        Commands::Signup => gatekey_tui::run(config, store, Route::SignUp).await,
        Commands::Verify { email } => {
            gatekey_tui::run(config, store, Route::VerifyEmail { email }).await
        }

        Commands::Status => commands::session::status(&store),
        Commands::Logout => commands::session::logout(&store),

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
