//! Fetching provider schemas.
//!
//! A [`SchemaSource`] produces a [`ProviderSchemas`] document; a [`Client`]
//! holds one snapshot of it for a single provider and hands out [`Block`]
//! trees for that provider's resources and data sources.
//!
//! # Example
//!
//! ```ignore
//! use tfschema::client::{Client, SchemaFile};
//!
//! let source = SchemaFile::new("schema.json");
//! let client = Client::connect(&source, "aws").await?;
//! let block = client.resource_schema("aws_instance")?;
//! println!("{}", block.format_table()?);
//! ```

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::block::Block;
use crate::error::SchemaError;
use crate::schema::{ProviderSchema, ProviderSchemas};

/// Something that can produce a provider schema document.
///
/// Each call to [`SchemaSource::load`] is a fresh fetch; callers that need a
/// stable view should hold on to the result (see [`Client`]).
#[async_trait::async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the schema document.
    async fn load(&self) -> Result<ProviderSchemas, SchemaError>;
}

#[async_trait::async_trait]
impl<S: SchemaSource + ?Sized> SchemaSource for Box<S> {
    async fn load(&self) -> Result<ProviderSchemas, SchemaError> {
        (**self).load().await
    }
}

/// A schema document stored in a JSON file.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    path: PathBuf,
}

impl SchemaFile {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SchemaSource for SchemaFile {
    async fn load(&self) -> Result<ProviderSchemas, SchemaError> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        debug!(path = %self.path.display(), bytes = json.len(), "Read schema document");
        Ok(ProviderSchemas::from_json(&json)?)
    }
}

/// Runs `terraform providers schema -json` in an initialized working
/// directory and parses its output.
#[derive(Debug, Clone)]
pub struct TerraformCommand {
    program: PathBuf,
    working_dir: PathBuf,
    timeout: Duration,
}

impl TerraformCommand {
    /// Default time allowed for the command to finish.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a source running `program` in `working_dir`.
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the time allowed for the command to finish.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait::async_trait]
impl SchemaSource for TerraformCommand {
    async fn load(&self) -> Result<ProviderSchemas, SchemaError> {
        info!(
            program = %self.program.display(),
            dir = %self.working_dir.display(),
            "Running providers schema command"
        );

        let child = Command::new(&self.program)
            .args(["providers", "schema", "-json"])
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SchemaError::Source(format!("failed to run {}: {}", self.program.display(), e))
            })?;

        // Dropping the future on timeout kills the child.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(timeout = ?self.timeout, "Schema command timed out");
                return Err(SchemaError::Timeout(self.timeout));
            },
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SchemaError::Source(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        debug!(bytes = output.stdout.len(), "Schema command finished");
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// One provider's schema, fetched once from a [`SchemaSource`].
#[derive(Debug, Clone)]
pub struct Client {
    address: String,
    schema: ProviderSchema,
}

impl Client {
    /// Load the document from `source` and select `provider`.
    ///
    /// `provider` is either a full provider address or its last segment
    /// (`aws` for `registry.terraform.io/hashicorp/aws`).
    #[instrument(skip(source))]
    pub async fn connect<S>(source: &S, provider: &str) -> Result<Self, SchemaError>
    where
        S: SchemaSource + ?Sized,
    {
        let mut schemas = source.load().await?;
        let address = schemas
            .find(provider)
            .map(|(address, _)| address.to_string())
            .ok_or_else(|| SchemaError::UnknownProvider(provider.to_string()))?;
        let schema = schemas
            .provider_schemas
            .remove(&address)
            .ok_or_else(|| SchemaError::UnknownProvider(provider.to_string()))?;

        debug!(
            address = %address,
            resources = schema.resource_schemas.len(),
            data_sources = schema.data_source_schemas.len(),
            "Selected provider"
        );
        Ok(Self { address, schema })
    }

    /// Create a client around an already loaded provider schema.
    pub fn from_schema(address: impl Into<String>, schema: ProviderSchema) -> Self {
        Self {
            address: address.into(),
            schema,
        }
    }

    /// The address of the selected provider.
    pub fn provider_name(&self) -> &str {
        &self.address
    }

    /// The schema of the provider configuration block.
    pub fn provider_schema(&self) -> Block {
        Block::new(&self.schema.provider.block)
    }

    /// The schema of a resource type.
    pub fn resource_schema(&self, name: &str) -> Result<Block, SchemaError> {
        self.schema
            .resource_schemas
            .get(name)
            .map(|s| Block::new(&s.block))
            .ok_or_else(|| SchemaError::UnknownResource(name.to_string()))
    }

    /// The schema of a data source.
    pub fn data_source_schema(&self, name: &str) -> Result<Block, SchemaError> {
        self.schema
            .data_source_schemas
            .get(name)
            .map(|s| Block::new(&s.block))
            .ok_or_else(|| SchemaError::UnknownDataSource(name.to_string()))
    }

    /// Resource type names, sorted.
    pub fn resources(&self) -> Vec<&str> {
        self.schema.resource_schemas.keys().map(String::as_str).collect()
    }

    /// Data source names, sorted.
    pub fn data_sources(&self) -> Vec<&str> {
        self.schema
            .data_source_schemas
            .keys()
            .map(String::as_str)
            .collect()
    }
}

/// Derive the provider name from a resource or data source name.
///
/// `aws_instance` belongs to `aws`. Everything before the first `_` is the
/// provider name, so `aws_` also yields `aws`; a name with no `_`, or with
/// nothing before it, is rejected.
pub fn detect_provider_name(name: &str) -> Result<&str, SchemaError> {
    match name.split_once('_') {
        Some((provider, _)) if !provider.is_empty() => Ok(provider),
        _ => Err(SchemaError::InvalidName(name.to_string())),
    }
}
