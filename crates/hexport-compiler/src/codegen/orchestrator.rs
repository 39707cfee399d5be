//! Orchestrator code generation for Kotlin.

use crate::ir::OrchestratorIR;
use super::kotlin_types::{escape_identifier, to_kotlin_type};
use super::{class_body, parameter_block, supertypes, RenderOptions};

/// Renders an orchestrator as a class taking its collaborators through the
/// constructor: ports first, then everything else, each group in declaration
/// order.
pub(super) fn render_orchestrator(orchestrator: &OrchestratorIR, options: &RenderOptions) -> String {
    let params: Vec<String> = orchestrator
        .constructor_order()
        .map(|dep| format!("private val {}: {}", escape_identifier(&dep.name), to_kotlin_type(&dep.typ)))
        .collect();

    let mut output = format!("class {}", escape_identifier(&orchestrator.name));
    if !params.is_empty() {
        output.push_str(&parameter_block(&params, options));
    }
    output.push_str(&supertypes(&orchestrator.implements));
    output.push_str(&class_body(&orchestrator.methods, false, options));
    output
}
