//! pomoterm - Pomodoro timer for the terminal.
//!
//! ```text
//! main() -> Config::load() -> build_session() -> tui::run | headless::run
//!                                                   |
//!                                                   v
//!                                   runtime::run (single consumer)
//! ```

use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod tui;

use commands::SessionArgs;
use logging::LogTarget;

#[derive(Parser)]
#[command(name = "pomoterm", version, about = "Pomodoro timer for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer (default)
    Run,
    /// Drive the timer from stdin and print events as JSON lines
    Headless(commands::headless::HeadlessArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            logging::init(LogTarget::File);
            tui::run(&cli.session).await
        }
        Commands::Headless(args) => {
            logging::init(LogTarget::Stderr);
            commands::headless::run(&cli.session, args).await
        }
        Commands::Config { action } => {
            logging::init(LogTarget::Stderr);
            commands::config::run(action)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
