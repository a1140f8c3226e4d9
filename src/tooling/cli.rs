//! CLI Tooling
//!
//! Command-line front end over [`IndexService`]. Each invocation loads
//! config, builds the index when the command needs it, and returns the
//! command's output as a string.
//!
//! `show` only needs a locator, so a missing data root is reported by the
//! commands that read the data directory rather than at startup.

use crate::config::{missing_root_error, ConfigLoader, IndexerConfig};
use crate::error::ApiError;
use crate::index::{BuildReport, IndexService};
use crate::tooling::format::{
    format_build_text, format_entries_text, format_entry_text, format_status_text,
    format_worlds_text,
};
use crate::triple::encode_entry;
use crate::types::{ActorIndexEntry, ActorLocator};
use crate::world;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

/// Actor index over virtual-tabletop world data
#[derive(Parser, Debug)]
#[command(name = "vtt-index")]
#[command(about = "Find actors across virtual-tabletop worlds by name")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data root of the tabletop application (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show data availability and index state
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List discovered worlds
    Worlds {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Build the actor index and report counts
    Build {
        /// Scan worlds concurrently
        #[arg(long)]
        concurrent: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Build the index and look up an actor by name
    Search {
        query: String,
        /// Return every match instead of the best one
        #[arg(long)]
        all: bool,
        /// Output format (text, triple, or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Re-open an actor record by locator and print it
    Show { locator: String },
}

/// CLI context holding loaded config and the index service
pub struct CliContext {
    config: IndexerConfig,
    /// None when no data root is configured
    service: Option<IndexService>,
}

impl CliContext {
    /// Load config (file, environment, then command-line overrides) and create the service.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(root) = &cli.root {
            config.data.root = Some(root.clone());
        }
        config.logging = config.logging.with_overrides(
            cli.log_level.clone(),
            cli.log_format.clone(),
            cli.log_output.clone(),
            cli.log_file.clone(),
        );
        Self::with_config(config)
    }

    pub fn with_config(config: IndexerConfig) -> Result<Self, ApiError> {
        let service = match config.data.root {
            Some(_) => Some(IndexService::from_config(&config)?),
            None => None,
        };
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// The index service, or a config error when no data root is set.
    pub fn service(&self) -> Result<&IndexService, ApiError> {
        self.service.as_ref().ok_or_else(missing_root_error)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Status { format } => {
                let service = self.service()?;
                let mut status = service.status();
                if status.available {
                    match world::discover(service.paths()) {
                        Ok(catalog) => status.world_count = catalog.worlds.len(),
                        Err(e) => debug!(error = %e, "World count unavailable"),
                    }
                }
                if format == "json" {
                    return to_json(&status);
                }
                Ok(format_status_text(&status))
            }
            Commands::Worlds { format } => {
                let service = self.service()?;
                if !service.is_available() {
                    return Ok(unavailable_message(service));
                }
                let catalog = world::discover(service.paths())?;
                if format == "json" {
                    return to_json(&json!({
                        "worlds": catalog.worlds,
                        "failures": catalog.failures,
                    }));
                }
                Ok(format_worlds_text(&catalog.worlds, &catalog.failures))
            }
            Commands::Build { concurrent, format } => {
                let service = self.service()?;
                if !service.is_available() {
                    return Ok(unavailable_message(service));
                }
                let report = self.build(service, *concurrent)?;
                if format == "json" {
                    return to_json(&json!({
                        "entry_count": report.entries.len(),
                        "world_count": report.worlds.len(),
                        "failures": report.failures,
                        "built_at": report.built_at,
                        "duration_ms": report.duration_ms,
                        "installed": report.installed,
                    }));
                }
                Ok(format_build_text(&report))
            }
            Commands::Search { query, all, format } => {
                let service = self.service()?;
                if !service.is_available() {
                    return Ok(unavailable_message(service));
                }
                self.build(service, false)?;
                let hits: Vec<ActorIndexEntry> = if *all {
                    service.search_actors(query)
                } else {
                    service.search_actor(query).into_iter().collect()
                };
                info!(query = %query, hits = hits.len(), "Actor search");
                format_hits(query, &hits, *all, format)
            }
            Commands::Show { locator } => {
                let locator: ActorLocator = locator.parse()?;
                let doc = locator.open()?;
                to_json(&doc)
            }
        }
    }

    fn build(&self, service: &IndexService, concurrent: bool) -> Result<BuildReport, ApiError> {
        if concurrent || self.config.scan.concurrent {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(service.build_index_concurrent())
        } else {
            service.build_index()
        }
    }
}

fn unavailable_message(service: &IndexService) -> String {
    format!(
        "Data directory is not available: {}",
        service.paths().root().display()
    )
}

fn format_hits(
    query: &str,
    hits: &[ActorIndexEntry],
    all: bool,
    format: &str,
) -> Result<String, ApiError> {
    match format {
        "json" => to_json(&json!({ "query": query, "results": hits })),
        "triple" => {
            let lines = hits
                .iter()
                .map(encode_entry)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        _ => match hits {
            [] => Ok(format!("No actor matching '{}'", query)),
            [single] if !all => Ok(format_entry_text(single)),
            many => Ok(format_entries_text(many)),
        },
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
