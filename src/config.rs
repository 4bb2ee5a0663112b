//! Where schemas come from.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::{SchemaFile, SchemaSource, TerraformCommand};

/// Options selecting and configuring the schema source.
///
/// A schema file, when given, takes precedence over running terraform.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Read the schema document from this file instead of running terraform.
    pub schema_file: Option<PathBuf>,
    /// The terraform executable.
    /// Default: `terraform`.
    pub terraform_bin: PathBuf,
    /// Directory in which terraform is run. It must already be initialized.
    /// Default: the current directory.
    pub working_dir: PathBuf,
    /// Time allowed for terraform to print the schema.
    /// Default: 60 seconds.
    pub timeout: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            schema_file: None,
            terraform_bin: PathBuf::from("terraform"),
            working_dir: PathBuf::from("."),
            timeout: TerraformCommand::DEFAULT_TIMEOUT,
        }
    }
}

impl SourceOptions {
    /// Create new source options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read schemas from a file.
    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = Some(path.into());
        self
    }

    /// Set the terraform executable.
    pub fn with_terraform_bin(mut self, program: impl Into<PathBuf>) -> Self {
        self.terraform_bin = program.into();
        self
    }

    /// Set the terraform working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Set the terraform timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configured source.
    pub fn into_source(self) -> Box<dyn SchemaSource> {
        match self.schema_file {
            Some(path) => Box::new(SchemaFile::new(path)),
            None => Box::new(
                TerraformCommand::new(self.terraform_bin, self.working_dir)
                    .with_timeout(self.timeout),
            ),
        }
    }
}
