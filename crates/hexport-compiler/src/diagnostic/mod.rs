//! Diagnostic types for error reporting.

mod error;
mod span;

pub use error::{MigrationError, ParseError};
pub use span::Span;
