//! # hexport compiler
//!
//! This crate translates the ports-and-adapters subset of a Scala code base
//! (value wrappers, case-class aggregates, sealed hierarchies, contracts and
//! the services wiring them) into equivalent Kotlin, keeping the layering
//! intact. Source languages plug in through a frontend trait.
//!
//! ## Supported Languages
//!
//! - Scala (default), Kotlin output
//!
//! ## Architecture
//!
//! ```text
//! Source Code (Scala)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  tree-sitter parsing
//! │ (src → AST)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │      IR      │  Language-agnostic representation
//! │  (AST → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Architecture rules: errors block, warnings advise
//! │     (IR)     │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  One Kotlin declaration per entity
//! │ (IR → .kt)   │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hexport_compiler::{Migrator, MigratorConfig, SourceUnit};
//!
//! let migrator = Migrator::new(MigratorConfig::default())?;
//! let report = migrator.translate(&SourceUnit::new(
//!     "UserId.scala",
//!     "case class UserId(value: String) extends AnyVal",
//! ))?;
//!
//! for entity in &report.rendered {
//!     println!("{}", entity.text);
//! }
//! ```

pub mod classify;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod validate;

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

pub use codegen::{render, render_with, RenderOptions};
pub use config::{ExecutionMode, MigratorConfig};
pub use diagnostic::{MigrationError, ParseError};
pub use frontend::scala::to_ir::convert;
pub use frontend::{create_frontend, Frontend};
pub use ir::ConversionOutput;
pub use validate::{validate, validate_outputs, ValidationResult};

/// One compilation unit held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub source: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Kotlin text for one IR entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntity {
    pub name: String,
    pub text: String,
}

/// Result of running one unit through the pipeline.
#[derive(Debug, Clone)]
pub struct UnitReport {
    pub output: ConversionOutput,
    pub validation: ValidationResult,
    /// Empty when `blocked`.
    pub rendered: Vec<RenderedEntity>,
    /// Validation errors stopped rendering.
    pub blocked: bool,
}

/// A unit that could not be parsed.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub path: PathBuf,
    pub error: ParseError,
}

/// Result of a batch. Units and failures each keep input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub units: Vec<UnitReport>,
    pub failures: Vec<UnitFailure>,
    /// Merged validation of every converted unit.
    pub validation: ValidationResult,
}

impl BatchReport {
    /// Every unit converted and none has validation errors.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.validation.is_valid()
    }

    pub fn blocked_units(&self) -> impl Iterator<Item = &UnitReport> {
        self.units.iter().filter(|u| u.blocked)
    }
}

/// The main migrator struct that orchestrates the pipeline.
pub struct Migrator {
    config: MigratorConfig,
}

impl Migrator {
    /// Creates a migrator, rejecting an invalid configuration.
    pub fn new(config: MigratorConfig) -> Result<Self, MigrationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// Runs one unit through parse, convert, validate and render.
    ///
    /// Under the default policy a unit with validation errors is reported as
    /// blocked and nothing is rendered for it.
    pub fn translate(&self, unit: &SourceUnit) -> Result<UnitReport, MigrationError> {
        let mut frontend = create_frontend(&self.config.language)?;
        Ok(self.process(frontend.as_mut(), unit)?)
    }

    /// Runs a batch of units.
    ///
    /// A unit that fails to parse is recorded in [`BatchReport::failures`] and
    /// never aborts the batch. Only setting up the frontend or the worker
    /// pool fails the call.
    pub fn translate_batch(&self, units: &[SourceUnit]) -> Result<BatchReport, MigrationError> {
        let results: Vec<Result<UnitReport, ParseError>> = match self.config.execution {
            ExecutionMode::Sequential => {
                let mut frontend = create_frontend(&self.config.language)?;
                units
                    .iter()
                    .map(|unit| self.process(frontend.as_mut(), unit))
                    .collect()
            }
            ExecutionMode::Parallel { workers } => {
                let mut builder = rayon::ThreadPoolBuilder::new();
                if let Some(workers) = workers {
                    builder = builder.num_threads(workers);
                }
                let pool = builder.build().map_err(|e| MigrationError::ThreadPool {
                    message: e.to_string(),
                })?;
                debug!(workers = pool.current_num_threads(), units = units.len(), "starting worker pool");

                // One parser per worker; tree-sitter parsers are not shared.
                pool.install(|| {
                    units
                        .par_iter()
                        .map_init(
                            || match create_frontend(&self.config.language) {
                                Ok(frontend) => Some(frontend),
                                Err(error) => {
                                    warn!(error = %error, "worker frontend unavailable");
                                    None
                                }
                            },
                            |frontend, unit| match frontend {
                                Some(frontend) => self.process(frontend.as_mut(), unit),
                                None => Err(ParseError::ParserInitFailed),
                            },
                        )
                        .collect()
                })
            }
        };

        let mut report = BatchReport::default();
        for (unit, result) in units.iter().zip(results) {
            match result {
                Ok(unit_report) => report.units.push(unit_report),
                Err(error) => {
                    warn!(path = %unit.path.display(), error = %error, "unit skipped");
                    report.failures.push(UnitFailure {
                        path: unit.path.clone(),
                        error,
                    });
                }
            }
        }
        report.validation = report.units.iter().map(|u| u.validation.clone()).sum();

        info!(
            units = units.len(),
            converted = report.units.len(),
            failed = report.failures.len(),
            blocked = report.blocked_units().count(),
            errors = report.validation.errors.len(),
            warnings = report.validation.warnings.len(),
            "batch complete"
        );

        Ok(report)
    }

    fn process(&self, frontend: &mut dyn Frontend, unit: &SourceUnit) -> Result<UnitReport, ParseError> {
        let output = frontend.translate(&unit.source, &unit.path)?;
        let validation = validate(&output.domain_models, &output.interfaces);

        for issue in &validation.warnings {
            debug!(unit = %output.unit, "{}", issue);
        }

        let blocked = !validation.is_valid() && !self.config.render_invalid;
        let rendered = if blocked {
            for issue in &validation.errors {
                warn!(unit = %output.unit, "{}", issue);
            }
            Vec::new()
        } else {
            output
                .entities()
                .into_iter()
                .map(|entity| RenderedEntity {
                    name: entity.name().to_string(),
                    text: render_with(entity, &self.config.render),
                })
                .collect()
        };

        info!(
            unit = %output.unit,
            entities = output.entities().len(),
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            blocked,
            "unit translated"
        );

        Ok(UnitReport {
            output,
            validation,
            rendered,
            blocked,
        })
    }
}
