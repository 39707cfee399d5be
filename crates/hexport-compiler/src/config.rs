//! Migrator configuration.

use serde::Deserialize;

use crate::codegen::RenderOptions;
use crate::diagnostic::MigrationError;
use crate::frontend::is_supported_language;

/// How a batch of units is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum ExecutionMode {
    /// One unit after another on the calling thread.
    #[default]
    Sequential,
    /// A dedicated worker pool; `None` lets rayon pick the size.
    Parallel {
        #[serde(default)]
        workers: Option<usize>,
    },
}

/// Configuration for the migration pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigratorConfig {
    /// Source language (default: "scala").
    pub language: String,

    pub execution: ExecutionMode,

    /// Render units whose validation produced errors.
    pub render_invalid: bool,

    pub render: RenderOptions,
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            language: "scala".to_string(),
            execution: ExecutionMode::Sequential,
            render_invalid: false,
            render: RenderOptions::default(),
        }
    }
}

impl MigratorConfig {
    /// Parses a JSON configuration; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, MigrationError> {
        let config: MigratorConfig =
            serde_json::from_str(json).map_err(|e| MigrationError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MigrationError> {
        if !is_supported_language(&self.language) {
            return Err(MigrationError::UnsupportedLanguage {
                language: self.language.clone(),
            });
        }
        if self.render.indent.is_empty() {
            return Err(MigrationError::config("render.indent must not be empty"));
        }
        if let ExecutionMode::Parallel { workers: Some(0) } = self.execution {
            return Err(MigrationError::config("execution.workers must be at least 1"));
        }
        Ok(())
    }
}
