use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wisdom_infrastructure::{ConfigService, WisdomPaths};

mod app;
mod commands;
mod logging;
mod notifier;

use app::App;

#[derive(Parser)]
#[command(name = "wisdom")]
#[command(about = "Jornada de Sabedoria - 31 days through Proverbs", long_about = None)]
struct Cli {
    /// Keep config and data under this directory instead of the user profile
    #[arg(long, global = true, env = "WISDOM_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the content for a day (defaults to the current day)
    Show {
        #[arg(long)]
        day: Option<i64>,
    },
    /// Move to the next day
    Next,
    /// Move to the previous day
    Prev,
    /// Jump to a day
    Goto { day: i64 },
    /// Mark a day complete, or un-mark it
    Complete {
        #[arg(long)]
        day: Option<i64>,
    },
    /// Add a day to favorites, or remove it
    Favorite {
        #[arg(long)]
        day: Option<i64>,
    },
    /// List favorite days
    Favorites,
    /// Read and write journal entries
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Switch between light and dark theme
    Theme,
    /// Configure the daily reminder
    Notify {
        #[command(subcommand)]
        action: NotifyAction,
    },
    /// Set your name and finish onboarding
    Onboard { name: String },
    /// Manage your own API credential
    Credential {
        #[command(subcommand)]
        action: CredentialAction,
    },
    /// Show progress and settings
    Status,
    /// Erase progress (and optionally cached content)
    Reset {
        /// Also delete every cached day
        #[arg(long)]
        content: bool,
    },
    /// Run the reminder scheduler in the foreground
    Watch,
}

#[derive(Subcommand)]
enum JournalAction {
    /// Write the entry for a day; empty text deletes it
    Write {
        #[arg(long)]
        day: Option<i64>,
        text: Vec<String>,
    },
    /// Print the entry for a day
    Show {
        #[arg(long)]
        day: Option<i64>,
    },
    /// List all entries, newest day first
    List,
}

#[derive(Subcommand)]
enum NotifyAction {
    /// Turn reminders on
    On {
        /// Reminder time, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Grant permission without asking
        #[arg(long)]
        yes: bool,
    },
    /// Turn reminders off
    Off,
}

#[derive(Subcommand)]
enum CredentialAction {
    Set { key: String },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = WisdomPaths::new(cli.home.as_deref());
    let config = ConfigService::new(&paths)?.get_config();

    let log_dir = match cli.command {
        Commands::Watch => Some(paths.logs_dir()?),
        _ => None,
    };
    let _guard = logging::init(&config.logging, log_dir.as_deref())?;

    let app = App::bootstrap(&paths, config)?;

    match cli.command {
        Commands::Show { day } => commands::content::show(&app, day).await?,
        Commands::Next => commands::journey::advance(&app),
        Commands::Prev => commands::journey::retreat(&app),
        Commands::Goto { day } => commands::journey::goto(&app, day)?,
        Commands::Complete { day } => commands::journey::complete(&app, day)?,
        Commands::Favorite { day } => commands::journey::favorite(&app, day)?,
        Commands::Favorites => commands::journey::favorites(&app),
        Commands::Journal { action } => match action {
            JournalAction::Write { day, text } => {
                commands::journal::write(&app, day, &text.join(" "))?
            }
            JournalAction::Show { day } => commands::journal::show(&app, day)?,
            JournalAction::List => commands::journal::list(&app),
        },
        Commands::Theme => commands::settings::toggle_theme(&app),
        Commands::Notify { action } => match action {
            NotifyAction::On { time, yes } => {
                commands::settings::notify_on(&app, time.as_deref(), yes).await?
            }
            NotifyAction::Off => commands::settings::notify_off(&app),
        },
        Commands::Onboard { name } => commands::settings::onboard(&app, &name)?,
        Commands::Credential { action } => match action {
            CredentialAction::Set { key } => commands::settings::set_credential(&app, Some(&key)),
            CredentialAction::Clear => commands::settings::set_credential(&app, None),
        },
        Commands::Status => commands::journey::status(&app),
        Commands::Reset { content } => commands::settings::reset(&app, content)?,
        Commands::Watch => commands::watch::run(&app).await?,
    }

    Ok(())
}
