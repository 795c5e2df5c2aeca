//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PayloadKind};
use crate::client::{GetOptions, ListOptions, RequestOptions, ResourceClient};
use crate::config::ClientConfig;
use crate::model::{ResourceAddSpec, ResourceFormat};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::time::Duration;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = config
            .build_client()
            .context("Failed to build client")?;
        let options = self.request_options();

        match &self.cli.command {
            Commands::Add {
                algorithm,
                fingerprint,
                file,
                kind,
                password,
            } => {
                let payload = fs::read(file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let mut spec = ResourceAddSpec::from_bytes(algorithm, fingerprint, &payload);
                if let Some(kind) = kind {
                    spec = spec.with_format(match kind {
                        PayloadKind::Pfx => ResourceFormat::Pfx,
                        PayloadKind::Cer => ResourceFormat::Cer,
                    });
                }
                if let Some(password) = password {
                    spec = spec.with_password(password);
                }
                let outcome = client.add(spec, Some(&options))?;
                info!("added {}={}", algorithm, fingerprint);
                self.emit(&outcome.metadata)
            }
            Commands::Get {
                algorithm,
                fingerprint,
                select,
            } => {
                let mut get = GetOptions::new().request(options);
                get.select = select.clone();
                let outcome = client.get(algorithm, fingerprint, Some(&get))?;
                self.emit(&outcome)
            }
            Commands::Delete {
                algorithm,
                fingerprint,
            } => {
                let outcome = client.delete(algorithm, fingerprint, Some(&options))?;
                info!("deletion of {}={} accepted", algorithm, fingerprint);
                self.emit(&outcome.metadata)
            }
            Commands::CancelDeletion {
                algorithm,
                fingerprint,
            } => {
                let outcome = client.cancel_deletion(algorithm, fingerprint, Some(&options))?;
                self.emit(&outcome.metadata)
            }
            Commands::List {
                filter,
                select,
                max_results,
                all,
            } => {
                let list = ListOptions {
                    filter: filter.clone(),
                    select: select.clone(),
                    max_results: *max_results,
                    request: options,
                };
                if *all {
                    self.list_all(&client, &list)
                } else {
                    let outcome = client.list(Some(&list))?;
                    self.emit(&outcome)
                }
            }
            Commands::ListNext { cursor } => {
                let outcome = client.list_next(cursor, Some(&options))?;
                self.emit(&outcome)
            }
        }
    }

    /// Config file (if any) with command-line overrides applied
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.base_url) {
            (Some(path), _) => ClientConfig::from_file(path)?,
            (None, Some(url)) => ClientConfig::new(url.clone()),
            (None, None) => bail!("No endpoint given (use --config or --base-url)"),
        };

        if let Some(url) = &self.cli.base_url {
            config.base_url = url.clone();
        }
        if let Some(collection) = &self.cli.collection {
            config.collection = collection.clone();
        }
        if let Some(version) = &self.cli.api_version {
            config.api_version = Some(version.clone());
        }

        config.validate()?;
        debug!("using endpoint {}", config.base_url);
        Ok(config)
    }

    /// Per-request options from global flags
    pub fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        if let Some(secs) = self.cli.timeout {
            options = options.timeout(Duration::from_secs(secs));
        }
        if let Some(id) = &self.cli.client_request_id {
            options = options
                .client_request_id(id.clone())
                .return_client_request_id(true);
        }
        options
    }

    fn list_all(&self, client: &ResourceClient, options: &ListOptions) -> Result<()> {
        let mut pager = client.iter(Some(options));
        let mut count = 0usize;
        for resource in pager.by_ref() {
            let resource = resource.with_context(|| format!("Listing stopped after {count} resources"))?;
            self.emit(&resource)?;
            count += 1;
        }
        info!(
            "listed {} resources across {} pages",
            count,
            pager.pages_fetched()
        );
        Ok(())
    }

    /// Print a value to stdout
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
