//! Recommend command implementation for the Cartaz CLI.

use std::fs::File;
use std::io::{BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use cartaz_core::{RecommendRequest, RecommendResponse, Recommender, SqliteCatalog};
use cartaz_recommender::RuleRecommender;
use cartaz_scorer::RuleScorer;

use crate::{ARG_RECOMMEND_CATALOG, ARG_RECOMMEND_REQUEST, CliError, ENV_RECOMMEND_REQUEST};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank upcoming events for one user. The request itself is \
                 provided as a JSON-encoded RecommendRequest; the catalog is \
                 the ticketing backend's SQLite database. Paths can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Rank upcoming events for one user"
)]
#[ortho_config(prefix = "CARTAZ")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing a RecommendRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the catalog SQLite database (`cartaz.db`).
    #[arg(long = ARG_RECOMMEND_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the catalog SQLite database.
    pub(crate) catalog: Utf8PathBuf,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_RECOMMEND_REQUEST)?;
        Self::require_existing(&self.catalog, ARG_RECOMMEND_CATALOG)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        if path.as_std_path().is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        let catalog = args
            .catalog
            .unwrap_or_else(|| Utf8PathBuf::from("cartaz.db"));
        Ok(Self {
            request_path,
            catalog,
        })
    }
}

/// Builds a recommender instance for the current invocation.
pub(super) trait RecommenderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn Recommender>, CliError>;
}

pub(super) struct DefaultRecommenderBuilder;

impl RecommenderBuilder for DefaultRecommenderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn Recommender>, CliError> {
        let catalog = Arc::new(SqliteCatalog::open(config.catalog.as_std_path())?);
        Ok(Box::new(RuleRecommender::new(
            Arc::clone(&catalog),
            Arc::clone(&catalog),
            catalog,
            RuleScorer::new(),
        )))
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRecommenderBuilder;
    run_recommend_with(args, &builder, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn RecommenderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    serve(&config, builder, writer)
}

pub(crate) fn serve(
    config: &RecommendConfig,
    builder: &dyn RecommenderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let request = load_recommend_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let recommender = builder.build(config)?;
    let response = recommender
        .recommend(&request)
        .map_err(|source| CliError::Recommend { source })?;
    write_recommend_response(writer, &response)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RecommendRequest`] from disk.
pub(crate) fn load_recommend_request(path: &Utf8Path) -> Result<RecommendRequest, CliError> {
    let file = File::open(path.as_std_path()).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_recommend_response(
    writer: &mut dyn Write,
    response: &RecommendResponse,
) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
