//! Command-line argument definitions for connector binaries.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Command-line interface shared by every Sluice connector binary.
#[derive(Parser, Debug)]
#[command(
    name = "sluice",
    version,
    about = "Runs a data connector and streams protocol messages to stdout",
    disable_help_subcommand = true,
    subcommand_required = true
)]
pub(crate) struct Cli {
    /// The connector operation to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Connector operations exposed on the command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Prints the connector specification.
    Spec,
    /// Checks that the connector can reach its source.
    Check {
        /// Path to the connector configuration JSON file.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        config: Utf8PathBuf,
    },
    /// Lists the streams the source offers.
    Discover {
        /// Path to the connector configuration JSON file.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        config: Utf8PathBuf,
    },
    /// Reads records for the configured catalog.
    Read {
        /// Path to the connector configuration JSON file.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        config: Utf8PathBuf,
        /// Path to the configured catalog JSON file.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        catalog: Utf8PathBuf,
        /// Path to a state JSON file to resume from.
        #[arg(long, value_name = "PATH", value_parser = non_empty_path)]
        state: Option<Utf8PathBuf>,
    },
}

fn non_empty_path(raw: &str) -> Result<Utf8PathBuf, String> {
    if raw.trim().is_empty() {
        return Err(String::from("a path must be provided"));
    }
    Ok(Utf8PathBuf::from(raw))
}
