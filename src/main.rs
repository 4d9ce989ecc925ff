mod commands;
mod prompt;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rollcall_core::{
    AppendNew, AttendanceStatus, ConflictResolver, EventLog, KeepExisting, RollcallConfig,
    Session,
};
use tracing_subscriber::EnvFilter;

use prompt::PromptResolver;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Reconcile member attendance against scheduled events in a Notion workspace")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events from the events database, oldest first
    Events {
        /// Fetch at most this many events
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List workspace members and the counters on their attendance sheets
    Members {
        /// Fetch at most this many members
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Create an attendance sheet for a member
    Provision {
        /// Notion user id
        member_id: String,
    },
    /// Record attendance outcomes for one member
    Update {
        /// Notion user id
        member_id: String,

        /// Outcome to record, as <event-id>=<status> (e.g. "abc123=Late")
        #[arg(short, long = "log", value_parser = parse_event_log, required = true)]
        logs: Vec<EventLog>,

        /// How to settle a new row that disagrees with one already in the table
        #[arg(long, value_enum, default_value_t = OnConflict::Prompt)]
        on_conflict: OnConflict,
    },
    /// Rebuild attendance for every member from the people marked on event pages
    Sync {
        /// Only reconcile this member
        #[arg(short, long)]
        member: Option<String>,

        /// Record an unexcused absence for members not marked on an event
        #[arg(long)]
        mark_unexcused: bool,

        #[arg(long, value_enum, default_value_t = OnConflict::Prompt)]
        on_conflict: OnConflict,
    },
    /// List members with no recorded outcome for an event
    Unexcused {
        /// Event page id
        event_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OnConflict {
    /// Ask for each conflicting row
    Prompt,
    /// Keep the row already in the table
    Keep,
    /// Append the new row next to the old one
    Append,
}

impl OnConflict {
    fn resolver(self) -> Box<dyn ConflictResolver> {
        match self {
            OnConflict::Prompt => Box::new(PromptResolver),
            OnConflict::Keep => Box::new(KeepExisting),
            OnConflict::Append => Box::new(AppendNew),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RollcallConfig::load()?;
    let mut session = Session::new(config);

    match cli.command {
        Commands::Events { limit } => commands::events::run(&session, limit).await,
        Commands::Members { limit } => commands::members::run(&mut session, limit).await,
        Commands::Provision { member_id } => {
            commands::provision::run(&mut session, &member_id).await
        }
        Commands::Update {
            member_id,
            logs,
            on_conflict,
        } => {
            let mut resolver = on_conflict.resolver();
            commands::update::run(&mut session, &member_id, &logs, resolver.as_mut()).await
        }
        Commands::Sync {
            member,
            mark_unexcused,
            on_conflict,
        } => {
            let mut resolver = on_conflict.resolver();
            commands::sync::run(&mut session, member.as_deref(), mark_unexcused, resolver.as_mut())
                .await
        }
        Commands::Unexcused { event_id } => commands::unexcused::run(&mut session, &event_id).await,
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "rollcall=debug,rollcall_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_event_log(arg: &str) -> Result<EventLog, String> {
    let (event_id, status) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <event-id>=<status>, got '{arg}'"))?;

    let event_id = event_id.trim();
    if event_id.is_empty() {
        return Err(format!("missing event id in '{arg}'"));
    }

    let status: AttendanceStatus = status.trim().parse().map_err(|e| {
        let labels: Vec<_> = AttendanceStatus::ALL.iter().map(|s| s.label()).collect();
        format!("{e} (expected one of: {})", labels.join(", "))
    })?;

    Ok(EventLog::new(event_id, status))
}
