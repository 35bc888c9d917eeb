use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use artifact_locator::commands::{describe_chain, resolve_coordinates};
use artifact_locator::{init_logging, ChainedResolver, LocatorConfig, LocatorResult};

/// Locate dependency artifacts on the local filesystem.
#[derive(Debug, Parser)]
#[command(name = "artifact-locator", version)]
struct Cli {
    /// JSON settings file, applied before environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resolve without network access.
    #[arg(long, global = true)]
    offline: bool,

    /// Mapping resource used as the offline resolver.
    #[arg(long, global = true)]
    deps_properties: Option<PathBuf>,

    /// Base directory for convention-based resolution.
    #[arg(long, global = true)]
    dependency_dir: Option<PathBuf>,

    /// Directory searched for the override mapping (repeatable).
    #[arg(long = "resource-path", global = true)]
    resource_path: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve coordinates and print a JSON report.
    Resolve {
        /// `group:name:version[:classifier][@type]`
        #[arg(required = true)]
        coordinates: Vec<String>,

        /// Return every known variant instead of the primary artifact.
        #[arg(long)]
        all: bool,

        /// Extra classifier to resolve alongside each artifact (repeatable).
        #[arg(long = "classifier")]
        classifiers: Vec<String>,
    },
    /// Print the assembled resolver chain.
    Chain,
}

impl Cli {
    fn locator_config(&self) -> LocatorResult<LocatorConfig> {
        let base = match &self.config {
            Some(path) => LocatorConfig::load(path)?,
            None => LocatorConfig::default(),
        };
        let mut config = base.with_vars(std::env::vars())?;

        if self.offline {
            config.offline = true;
        }
        if let Some(path) = &self.deps_properties {
            config.deps_properties = Some(path.clone());
        }
        if let Some(dir) = &self.dependency_dir {
            config.dependency_dir = dir.clone();
        }
        if !self.resource_path.is_empty() {
            config.resource_path = self.resource_path.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let resolver = match cli
        .locator_config()
        .and_then(ChainedResolver::from_config)
    {
        Ok(resolver) => resolver,
        Err(e) => {
            error!("Could not set up resolver chain: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Resolve {
            coordinates,
            all,
            classifiers,
        } => {
            let reports = resolve_coordinates(&resolver, &coordinates, all, &classifiers).await;
            if !print_json(&reports) {
                return ExitCode::FAILURE;
            }
            if reports.iter().all(|r| r.is_resolved()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Chain => {
            if print_json(&describe_chain(&resolver)) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            error!("Could not serialize report: {}", e);
            false
        }
    }
}
