//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Conversion-time failures.
///
/// Raised only for input the underlying parser could not make sense of.
/// Recognized-but-unsupported constructs never produce a `ParseError`; they
/// degrade to lenient fallbacks in the IR instead.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to initialize parser")]
    #[diagnostic(code(hexport::parse::init_failed))]
    ParserInitFailed,

    #[error("Failed to parse file: {}", path.display())]
    #[diagnostic(code(hexport::parse::parse_failed))]
    ParseFailed {
        path: PathBuf,
    },

    #[error("Syntax error in {}:{line}:{column} near `{snippet}`", path.display())]
    #[diagnostic(
        code(hexport::parse::syntax_error),
        help("Only syntactically valid Scala sources can be converted. Fix the source and retry.")
    )]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        snippet: String,
    },
}

impl ParseError {
    /// Best-effort `(line, column)` of the failure, 1-based.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Errors raised by the pipeline driver around the core transform.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum MigrationError {
    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(hexport::config::invalid),
        help("Check the migrator configuration; unknown fields fall back to defaults.")
    )]
    InvalidConfig {
        message: String,
    },

    #[error("Failed to start worker pool: {message}")]
    #[diagnostic(code(hexport::config::thread_pool))]
    ThreadPool {
        message: String,
    },

    // =========================================================================
    // Frontend Errors
    // =========================================================================
    #[error("Unsupported language: {language}")]
    #[diagnostic(
        code(hexport::frontend::unsupported_language),
        help("Supported source languages: scala")
    )]
    UnsupportedLanguage {
        language: String,
    },
}

impl MigrationError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
