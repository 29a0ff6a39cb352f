use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinding_cli::output::OutputFormat;
use wayfinding_cli::source::GraphSource;

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-floor indoor routing utilities")]
struct Cli {
    /// JSON building plan (falls back to WAYFINDING_PLAN).
    #[arg(long, global = true, conflicts_with = "snapshot")]
    plan: Option<PathBuf>,

    /// Binary graph snapshot (falls back to WAYFINDING_SNAPSHOT).
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two doors.
    Route {
        /// Starting door.
        #[arg(long = "from")]
        from: String,
        /// Destination door.
        #[arg(long = "to")]
        to: String,
        /// Only use elevators and same-level doors between floors.
        #[arg(long)]
        accessible: bool,
        /// Corner rounding radius for the drawn route (0 keeps corners sharp).
        #[arg(long)]
        radius: Option<f64>,
        /// Skip drawing the route geometry.
        #[arg(long, conflicts_with = "radius")]
        no_drawing: bool,
    },
    /// Report paths and doors that cannot be reached from a door.
    Check {
        /// Door to explore from.
        #[arg(long = "from")]
        from: String,
        /// Only use elevators and same-level doors between floors.
        #[arg(long)]
        accessible: bool,
    },
    /// List every door identifier.
    Doors,
    /// Show floor, segment, door and portal counts.
    Stats,
    /// Write a binary snapshot of the built graph.
    Snapshot {
        /// Destination file.
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = GraphSource::resolve(cli.plan.as_deref(), cli.snapshot.as_deref())?;
    let graph = source.load()?;

    match cli.command {
        Command::Route {
            from,
            to,
            accessible,
            radius,
            no_drawing,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                accessible,
                radius,
                no_drawing,
            };
            commands::route::handle_route_command(&graph, &args, cli.format)
        }
        Command::Check { from, accessible } => {
            commands::check::handle_check_command(&graph, &from, accessible, cli.format)
        }
        Command::Doors => commands::doors::handle_doors_command(&graph, cli.format),
        Command::Stats => commands::stats::handle_stats_command(&graph, cli.format),
        Command::Snapshot { output } => {
            commands::snapshot::handle_snapshot_command(&graph, &output, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
