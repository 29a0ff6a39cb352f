// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments and dispatches here.

pub mod check;
pub mod doors;
pub mod route;
pub mod snapshot;
pub mod stats;
