//! Scala frontend.

pub mod ast;
pub mod parser;
pub mod to_ir;
pub mod types;

use std::path::Path;

use crate::diagnostic::ParseError;
use crate::ir::ConversionOutput;
use super::Frontend;
use ast::SyntaxTree;
use parser::ScalaParser;

/// Scala frontend implementation.
pub struct ScalaFrontend {
    parser: ScalaParser,
}

impl ScalaFrontend {
    /// Creates a new Scala frontend.
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            parser: ScalaParser::new()?,
        })
    }
}

impl Frontend for ScalaFrontend {
    fn language(&self) -> &str {
        "scala"
    }

    fn extensions(&self) -> &[&str] {
        &["scala", "sc"]
    }

    fn parse(&mut self, source: &str, path: &Path) -> Result<SyntaxTree, ParseError> {
        self.parser.parse(source, path)
    }

    fn convert(&self, tree: &SyntaxTree, unit_id: &str) -> Result<ConversionOutput, ParseError> {
        to_ir::convert(tree, unit_id)
    }
}
