mod commands;
mod context;
mod render;

use std::path::PathBuf;

use almanac_core::constants::DEFAULT_RESULT_CAP;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use context::Context;

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "Ask when recurring events happen, on any calendar")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Config file (default: ~/.config/almanac/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Calendar definition file, overriding the config
    #[arg(long, global = true)]
    pub calendar: Option<PathBuf>,

    /// Events file, overriding the config
    #[arg(long, global = true)]
    pub events: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Does an event occur on a date?
    Occurs {
        event: String,

        /// Date as YEAR-MONTH-DAY (month 1-based)
        date: String,
    },
    /// List an event's occurrences in a date range
    Range {
        event: String,

        /// First day of the range (YEAR-MONTH-DAY)
        #[arg(long)]
        from: String,

        /// Last day of the range, inclusive (YEAR-MONTH-DAY)
        #[arg(long)]
        to: String,

        /// Maximum number of occurrences to list
        #[arg(long, default_value_t = DEFAULT_RESULT_CAP)]
        cap: usize,
    },
    /// How many times an event has occurred up to a date
    Ordinal {
        event: String,

        /// Date as YEAR-MONTH-DAY (month 1-based)
        date: String,
    },
    /// The first occurrence after a date
    Next {
        event: String,

        /// Date as YEAR-MONTH-DAY (month 1-based)
        date: String,
    },
    /// Every event's occurrences in a date range, by day
    Agenda {
        /// First day of the range (YEAR-MONTH-DAY)
        #[arg(long)]
        from: String,

        /// Last day of the range, inclusive (YEAR-MONTH-DAY)
        #[arg(long)]
        to: String,

        /// Maximum occurrences listed per event
        #[arg(long, default_value_t = DEFAULT_RESULT_CAP)]
        cap: usize,
    },
    /// Precompute a random event's occurrences for storage
    CacheRandom {
        event: String,

        /// Last day to precompute (YEAR-MONTH-DAY)
        #[arg(long)]
        until: String,

        /// Store the result in the events file instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Validate every event in the events file
    Check,
    /// Show the files almanac reads
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let global = &cli.global;
    match cli.command {
        Commands::Config => commands::config::run(global),
        Commands::Occurs { event, date } => {
            let ctx = Context::load(global)?;
            commands::occurs::run(&ctx, &event, &date)
        }
        Commands::Range {
            event,
            from,
            to,
            cap,
        } => {
            let ctx = Context::load(global)?;
            commands::range::run(&ctx, &event, &from, &to, cap)
        }
        Commands::Ordinal { event, date } => {
            let ctx = Context::load(global)?;
            commands::ordinal::run(&ctx, &event, &date)
        }
        Commands::Next { event, date } => {
            let ctx = Context::load(global)?;
            commands::next::run(&ctx, &event, &date)
        }
        Commands::Agenda { from, to, cap } => {
            let ctx = Context::load(global)?;
            commands::agenda::run(&ctx, &from, &to, cap)
        }
        Commands::CacheRandom {
            event,
            until,
            write,
        } => {
            let mut ctx = Context::load(global)?;
            commands::cache_random::run(&mut ctx, &event, &until, write)
        }
        Commands::Check => {
            let ctx = Context::load(global)?;
            commands::check::run(&ctx)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "almanac_core=warn,almanac=warn",
        1 => "almanac_core=debug,almanac=debug",
        _ => "almanac_core=trace,almanac=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
