//! Command-line interface for the Cartaz recommendation engine.
#![forbid(unsafe_code)]

use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use thiserror::Error;

mod recommend;

pub(crate) const ARG_RECOMMEND_REQUEST: &str = "request";
pub(crate) const ARG_RECOMMEND_CATALOG: &str = "catalog";
pub(crate) const ENV_RECOMMEND_REQUEST: &str = "CARTAZ_CMDS_RECOMMEND_REQUEST_PATH";

/// Run the Cartaz CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging, or the
/// requested command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => recommend::run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cartaz",
    about = "Event recommendation utilities for the Cartaz engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank upcoming events for one user against a catalog database.
    Recommend(recommend::RecommendArgs),
}

/// Errors emitted by the Cartaz CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        /// Name of the option holding the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// Opening the JSON request file failed.
    #[error("failed to open recommend request at {path}")]
    OpenRequest {
        /// Path to the request file.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the JSON request file failed.
    #[error("failed to parse recommend request at {path}")]
    ParseRequest {
        /// Path to the request file.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded request failed validation.
    #[error("recommend request at {path} is invalid")]
    InvalidRequest {
        /// Path to the request file.
        path: Utf8PathBuf,
        /// Source error from the engine.
        #[source]
        source: cartaz_core::RecommendError,
    },
    /// Opening the catalog database failed.
    #[error(transparent)]
    OpenCatalog(#[from] cartaz_core::SqliteCatalogError),
    /// Serving the recommendation request failed.
    #[error("failed to produce recommendations")]
    Recommend {
        /// Source error from the engine.
        #[source]
        source: cartaz_core::RecommendError,
    },
    /// Serialising the response to JSON failed.
    #[error("failed to serialise recommendations")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Writing the response to the output stream failed.
    #[error("failed to write recommendations")]
    WriteOutput(#[source] std::io::Error),
}

#[cfg(test)]
mod tests;
