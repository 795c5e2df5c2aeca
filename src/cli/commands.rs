//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for a remote resource collection
#[derive(Parser, Debug)]
#[command(name = "resource-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service endpoint (overrides the config file)
    #[arg(long, global = true, env = "RESOURCE_CLIENT_BASE_URL")]
    pub base_url: Option<String>,

    /// Collection path segment (overrides the config file)
    #[arg(long, global = true)]
    pub collection: Option<String>,

    /// `api-version` query value (overrides the config file)
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Caller request id sent as `client-request-id`
    #[arg(long, global = true)]
    pub client_request_id: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a resource
    Add {
        /// Fingerprint algorithm
        #[arg(long, default_value = "sha1")]
        algorithm: String,

        /// Fingerprint of the payload
        #[arg(long)]
        fingerprint: String,

        /// Payload file (raw bytes, base64-encoded on upload)
        #[arg(long)]
        file: PathBuf,

        /// Payload encoding
        #[arg(long, value_enum)]
        kind: Option<PayloadKind>,

        /// Payload password (pfx only)
        #[arg(long, env = "RESOURCE_CLIENT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show one resource
    Get {
        algorithm: String,
        fingerprint: String,

        /// Attributes to return
        #[arg(long)]
        select: Option<String>,
    },

    /// Start deleting a resource
    Delete {
        algorithm: String,
        fingerprint: String,
    },

    /// Abort a pending or failed deletion
    CancelDeletion {
        algorithm: String,
        fingerprint: String,
    },

    /// List resources
    List {
        /// Server-side filter expression
        #[arg(long)]
        filter: Option<String>,

        /// Attributes to return
        #[arg(long)]
        select: Option<String>,

        /// Page size
        #[arg(long)]
        max_results: Option<u32>,

        /// Follow cursors and print every resource instead of the first page
        #[arg(long)]
        all: bool,
    },

    /// Fetch the page named by a cursor
    ListNext { cursor: String },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Payload encoding for `add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PayloadKind {
    Pfx,
    Cer,
}
