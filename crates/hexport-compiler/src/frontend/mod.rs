//! Language frontends for parsing source code into IR.
//!
//! Each frontend is responsible for:
//! 1. Parsing source text in its language into a [`SyntaxTree`]
//! 2. Converting that tree to the common IR
//!
//! Validation and code generation only ever see the IR, so a new source
//! language plugs in here without touching them.

pub mod scala;

use std::path::Path;

use crate::diagnostic::{MigrationError, ParseError};
use crate::ir::ConversionOutput;

pub use scala::ast::SyntaxTree;

/// Trait for language frontends.
pub trait Frontend: Send {
    /// Returns the language name (e.g., "scala").
    fn language(&self) -> &str;

    /// Returns file extensions this frontend handles (e.g., ["scala", "sc"]).
    fn extensions(&self) -> &[&str];

    /// Parses one compilation unit.
    fn parse(&mut self, source: &str, path: &Path) -> Result<SyntaxTree, ParseError>;

    /// Converts a parsed unit to IR.
    fn convert(&self, tree: &SyntaxTree, unit_id: &str) -> Result<ConversionOutput, ParseError>;

    /// Parses and converts one unit, identified by its path.
    fn translate(&mut self, source: &str, path: &Path) -> Result<ConversionOutput, ParseError> {
        let tree = self.parse(source, path)?;
        self.convert(&tree, &path.to_string_lossy())
    }
}

/// Creates a frontend for the given language.
pub fn create_frontend(language: &str) -> Result<Box<dyn Frontend>, MigrationError> {
    match language {
        "scala" | "sc" => Ok(Box::new(scala::ScalaFrontend::new()?)),
        _ => Err(MigrationError::UnsupportedLanguage {
            language: language.to_string(),
        }),
    }
}

/// Whether [`create_frontend`] accepts `language`.
pub fn is_supported_language(language: &str) -> bool {
    matches!(language, "scala" | "sc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_scala_frontend() {
        let frontend = create_frontend("scala").unwrap();
        assert_eq!(frontend.language(), "scala");
        assert!(frontend.extensions().contains(&"scala"));
    }

    #[test]
    fn rejects_unknown_language() {
        let err = create_frontend("cobol").err().unwrap();
        assert!(matches!(err, MigrationError::UnsupportedLanguage { ref language } if language == "cobol"));
    }
}
