use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use statusctl::models::Status;
use std::io;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "statusctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Toggle a GitHub-hosted status.json and announce the change", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the published status to on or off
    Set {
        /// New status
        #[arg(value_enum)]
        status: Status,

        /// Short cause recorded and shown in the notification
        reason: Option<String>,

        /// Extra note; the stored message is only replaced when this is supplied
        message: Option<String>,
    },

    /// Show the currently published status record
    Show,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    // Credentials may live in a local .env; absence is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Set {
            status,
            reason,
            message,
        } => {
            println!(
                "{}",
                format!("🔄 Setting status to '{}'...", status).cyan()
            );
            let ok = statusctl::cli::set::run(
                status,
                reason.as_deref().unwrap_or(""),
                message.as_deref(),
            );
            if ok {
                println!("{}", "🎉 Status update successful!".green());
            } else {
                println!("{}", "💥 Status update failed!".red());
            }
            ok
        }

        Commands::Show => statusctl::cli::show::run(),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "statusctl", &mut io::stdout());
            true
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
