//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::client::{detect_provider_name, Client, SchemaSource};
use crate::config::SourceOptions;
use crate::error::SchemaError;
use crate::render::OutputFormat;

/// Top-level command line: schema source flags plus a subcommand.
#[derive(Debug, Parser)]
#[command(name = "tfschema")]
#[command(about = "Show resource and data source schemas of providers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Where schemas are read from.
    #[command(flatten)]
    pub source: SourceArgs,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags selecting the schema source, shared by every subcommand.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Read schemas from a `terraform providers schema -json` document
    #[arg(long, global = true, env = "TFSCHEMA_SCHEMA_FILE")]
    pub schema_file: Option<PathBuf>,

    /// Terraform executable used to fetch schemas
    #[arg(long, global = true, env = "TFSCHEMA_TERRAFORM_BIN", default_value = "terraform")]
    pub terraform_bin: PathBuf,

    /// Initialized terraform working directory
    #[arg(long, global = true, env = "TFSCHEMA_WORKING_DIR", default_value = ".")]
    pub working_dir: PathBuf,

    /// Seconds to wait for terraform
    #[arg(long, global = true, env = "TFSCHEMA_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,
}

impl SourceArgs {
    /// Convert the flags into [`SourceOptions`].
    pub fn options(&self) -> SourceOptions {
        let mut options = SourceOptions::new()
            .with_terraform_bin(&self.terraform_bin)
            .with_working_dir(&self.working_dir)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(path) = &self.schema_file {
            options = options.with_schema_file(path);
        }
        options
    }
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect the provider configuration
    Provider {
        /// What to do with the provider.
        #[command(subcommand)]
        command: ProviderCommand,
    },

    /// Inspect resource types
    Resource {
        /// What to do with resource types.
        #[command(subcommand)]
        command: SchemaCommand,
    },

    /// Inspect data sources
    Data {
        /// What to do with data sources.
        #[command(subcommand)]
        command: SchemaCommand,
    },
}

/// Subcommands of `provider`.
#[derive(Debug, Subcommand)]
pub enum ProviderCommand {
    /// Show the type definition of a provider
    Show {
        /// Provider address or short name, e.g. `aws`
        provider: String,

        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Subcommands of `resource` and `data`.
#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// List names defined by a provider
    List {
        /// Provider address or short name, e.g. `aws`
        provider: String,
    },

    /// Show the type definition of one entry
    Show {
        /// Resource type or data source name, e.g. `aws_instance`
        name: String,

        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Run a parsed command line and return what should be printed.
pub async fn run(cli: Cli) -> Result<String, SchemaError> {
    let source = cli.source.options().into_source();
    execute(&cli.command, source.as_ref()).await
}

/// Execute `command` against `source`.
///
/// The output format is checked before anything is fetched, so an unknown
/// format never causes terraform to run.
pub async fn execute<S>(command: &Commands, source: &S) -> Result<String, SchemaError>
where
    S: SchemaSource + ?Sized,
{
    match command {
        Commands::Provider {
            command: ProviderCommand::Show { provider, format },
        } => {
            let format: OutputFormat = format.parse()?;
            let client = Client::connect(source, provider).await?;
            format.render(&client.provider_schema())
        },
        Commands::Resource { command } => match command {
            SchemaCommand::List { provider } => {
                let client = Client::connect(source, provider).await?;
                Ok(client.resources().join("\n"))
            },
            SchemaCommand::Show { name, format } => {
                let format: OutputFormat = format.parse()?;
                let client = Client::connect(source, detect_provider_name(name)?).await?;
                debug!(resource = %name, %format, "Rendering resource schema");
                format.render(&client.resource_schema(name)?)
            },
        },
        Commands::Data { command } => match command {
            SchemaCommand::List { provider } => {
                let client = Client::connect(source, provider).await?;
                Ok(client.data_sources().join("\n"))
            },
            SchemaCommand::Show { name, format } => {
                let format: OutputFormat = format.parse()?;
                let client = Client::connect(source, detect_provider_name(name)?).await?;
                debug!(data_source = %name, %format, "Rendering data source schema");
                format.render(&client.data_source_schema(name)?)
            },
        },
    }
}
