//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the accela binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::ClientConfig;
use crate::error::{AccelaError, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Accela API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "accela", about = "Accela Construct API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and pagination to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Access token sent in the Authorization header.
    #[arg(long, global = true, env = "ACCELA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Agency name (e.g. CHARLOTTE).
    #[arg(long, global = true, env = "ACCELA_AGENCY")]
    pub agency: Option<String>,

    /// Agency environment (e.g. PROD).
    #[arg(long, global = true, env = "ACCELA_ENVIRONMENT")]
    pub environment: Option<String>,

    /// API base URL.
    #[arg(long, global = true, env = "ACCELA_API_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Client configuration from the connection flags.
    ///
    /// # Errors
    ///
    /// Returns [`AccelaError::ConfigMissing`] naming the variable behind the
    /// first missing flag.
    pub fn client_config(&self) -> Result<ClientConfig> {
        fn required(value: &Option<String>, var: &str) -> Result<String> {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AccelaError::ConfigMissing(format!("{var} environment variable not set"))
                })
        }

        let mut config = ClientConfig::new(
            required(&self.token, "ACCELA_ACCESS_TOKEN")?,
            required(&self.agency, "ACCELA_AGENCY")?,
            required(&self.environment, "ACCELA_ENVIRONMENT")?,
        );
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        Ok(config)
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: GetEntity,

        /// The record ID or numeric document ID.
        id: String,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        #[command(flatten)]
        args: ListArgs,
    },

    /// Download a document's file.
    Download {
        /// The numeric document ID.
        id: u64,

        /// Where to write the file (defaults to the document's file name).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Pagination and filter flags for `list`.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Number of items per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Offset of the first item.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Fetch every page starting at the offset.
    #[arg(long, default_value = "false")]
    pub all: bool,

    /// Record ID (required for addresses, parcels and documents).
    #[arg(long)]
    pub record: Option<String>,

    /// Module name (records filter; required for record-types).
    #[arg(long)]
    pub module: Option<String>,

    /// Record type filter for records.
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// Only records opened on or after this date (YYYY-MM-DD).
    #[arg(long)]
    pub opened_after: Option<NaiveDate>,

    /// Only primary (Y) or non-primary (N) addresses.
    #[arg(long, value_parser = parse_yes_no)]
    pub primary: Option<bool>,

    /// Comma-separated API field names to return (addresses, parcels).
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Agency name filter for agencies; agency to inspect for environments.
    #[arg(long)]
    pub name: Option<String>,
}

fn parse_yes_no(value: &str) -> std::result::Result<bool, String> {
    match value {
        "Y" | "y" => Ok(true),
        "N" | "n" => Ok(false),
        other => Err(format!("expected Y or N, got '{other}'")),
    }
}

/// Entity types that can be fetched individually.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum GetEntity {
    /// A record (permit, license, case).
    #[value(alias = "records")]
    Record,
    /// A document's metadata.
    #[value(alias = "documents")]
    Document,
}

/// Entity types that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "record")]
    Records,
    /// Addresses of a record.
    #[value(alias = "address")]
    Addresses,
    /// Parcels of a record.
    #[value(alias = "parcel")]
    Parcels,
    /// Documents attached to a record.
    #[value(alias = "document")]
    Documents,
    #[value(alias = "module")]
    Modules,
    /// Record types of a module.
    #[value(alias = "record-type")]
    RecordTypes,
    #[value(alias = "agency")]
    Agencies,
    /// Environments of an agency.
    #[value(alias = "environment")]
    Environments,
}
