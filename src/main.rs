use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wanderly::search::SearchForm;
use wanderly::wallet::WalletFilter;
use wanderly::{commands, export_kind, BookingKind, DocumentType, EntityKind, Settings};

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Travel planner data layer over seeded in-memory collections
#[derive(Parser, Debug)]
#[command(name = "wanderly", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip the simulated repository delays
    #[arg(long, global = true)]
    no_latency: bool,

    /// Directory with fixture CSVs to seed from instead of the bundled ones
    #[arg(long, global = true, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upcoming and recent trips, plus documents expiring soon
    Dashboard,
    /// List documents, optionally filtered, with per-type counts
    Wallet(WalletArgs),
    /// Run a mock travel search and optionally book one of the offers
    Search(SearchArgs),
    /// Write one collection as CSV to stdout
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
    },
}

#[derive(Args, Debug)]
struct WalletArgs {
    /// Only show documents of this type
    #[arg(long = "type", value_name = "TYPE")]
    kind: Option<DocumentType>,

    /// Case-insensitive text over name, type and description
    #[arg(short, long, default_value = "")]
    query: String,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    from: String,

    /// Destination; hotel searches need none
    #[arg(long)]
    to: Option<String>,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    #[arg(long, value_enum, default_value_t = SearchKind::Flights)]
    kind: SearchKind,

    /// Book the offer with this id
    #[arg(long, value_name = "N")]
    book: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SearchKind {
    Flights,
    Hotels,
    Cars,
}

impl From<SearchKind> for BookingKind {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Flights => BookingKind::Flights,
            SearchKind::Hotels => BookingKind::Hotels,
            SearchKind::Cars => BookingKind::Cars,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportKind {
    Trips,
    Bookings,
    Documents,
    Expenses,
    Users,
}

impl From<ExportKind> for EntityKind {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Trips => EntityKind::Trip,
            ExportKind::Bookings => EntityKind::Booking,
            ExportKind::Documents => EntityKind::Document,
            ExportKind::Expenses => EntityKind::Expense,
            ExportKind::Users => EntityKind::User,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!("command failed: {err}");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    // stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if cli.no_latency {
        settings.simulate_latency = false;
    }
    if let Some(dir) = cli.fixtures {
        settings.fixtures_dir = Some(dir);
    }
    tracing::debug!(?settings, "settings loaded");

    let store = settings.build_store().await?;
    let out = io::stdout();
    match cli.command {
        Commands::Dashboard => commands::dashboard(&store, out).await?,
        Commands::Wallet(args) => {
            let filter = WalletFilter {
                kind: args.kind,
                query: args.query,
            };
            commands::wallet(&store, &filter, out).await?
        }
        Commands::Search(args) => {
            let form = SearchForm {
                from: args.from,
                to: args.to.unwrap_or_default(),
                depart_date: Some(args.date),
                ..Default::default()
            };
            commands::search(&store, args.kind.into(), &form, args.book, out).await?;
        }
        Commands::Export { kind } => export_kind(&store, kind.into(), out).await?,
    }
    Ok(())
}
