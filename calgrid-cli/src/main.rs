mod commands;
mod context;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "View and manage your calgrid calendar from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the calendar service
    Login,
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Render the calendar grid
    View {
        /// Grid to render
        #[arg(value_enum)]
        mode: Option<ViewMode>,

        /// Date inside the period to show (defaults to today)
        date: Option<String>,
    },
    /// List events as an agenda
    Events {
        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create an event
    New {
        title: Option<String>,

        /// Start date/time (e.g. "2025-03-20T15:00", "2025-03-20" or "tomorrow 3pm")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long)]
        end: Option<String>,

        /// Duration instead of an end (e.g. "1h", "90m", "2days")
        #[arg(short, long)]
        duration: Option<String>,

        /// Timezone the times are given in (defaults to the system timezone)
        #[arg(long)]
        timezone: Option<String>,

        /// Repeat the event
        #[arg(long, value_enum)]
        every: Option<FrequencyArg>,

        /// Repeat every N periods
        #[arg(long, default_value_t = 1)]
        interval: u32,

        /// Last date the repetition may land on (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },
    /// Edit an event's fields
    Edit { id: String },
    /// Move an event to a new start (and optionally a new end)
    Move {
        id: String,

        /// New start date/time
        start: String,

        /// New end date/time; omitted means a zero-duration drop at the start
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show or set the note for a day
    Note {
        /// Day the note belongs to (YYYY-MM-DD or fuzzy, e.g. "tomorrow")
        date: String,

        /// Note text; omitted opens a prompt, empty text removes the note
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login => commands::login::run().await,
        Commands::Logout => commands::logout::run(),
        Commands::Whoami => commands::whoami::run(),
        Commands::View { mode, date } => commands::view::run(mode, date.as_deref()).await,
        Commands::Events { from, to } => {
            commands::events::run(from.as_deref(), to.as_deref()).await
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            timezone,
            every,
            interval,
            until,
        } => {
            commands::new::run(commands::new::NewArgs {
                title,
                start,
                end,
                duration,
                timezone,
                every,
                interval,
                until,
            })
            .await
        }
        Commands::Edit { id } => commands::edit::run(&id).await,
        Commands::Move { id, start, end } => {
            commands::reschedule::run(&id, &start, end.as_deref()).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&id, yes).await,
        Commands::Note { date, text } => commands::note::run(&date, text.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("calgrid_core=warn,calgrid_cli=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
