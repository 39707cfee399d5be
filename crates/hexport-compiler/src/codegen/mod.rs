//! Kotlin code generation from IR.
//!
//! One text blob per IR entity. Method bodies are placeholders: structure is
//! carried over, logic is never inferred. Rendering never fails; types the
//! renderer has no idiom for are emitted as their best-effort literal.
//! Assembling several blobs into files is left to the caller.

mod adapter;
mod domain;
mod interface;
mod kotlin_types;
mod orchestrator;

pub use kotlin_types::{escape_identifier, to_kotlin_type};

use serde::Deserialize;

use crate::ir::{ConversionOutput, IrEntity, Method};

/// Layout knobs for generated Kotlin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// One indentation level.
    pub indent: String,
    /// Statement used as the body of every generated method.
    pub stub_body: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            stub_body: "TODO(\"Not yet implemented\")".to_string(),
        }
    }
}

/// Renders one IR entity as Kotlin with default options.
pub fn render<'a>(entity: impl Into<IrEntity<'a>>) -> String {
    render_with(entity, &RenderOptions::default())
}

/// Renders one IR entity as Kotlin.
pub fn render_with<'a>(entity: impl Into<IrEntity<'a>>, options: &RenderOptions) -> String {
    match entity.into() {
        IrEntity::Domain(model) => domain::render_domain_model(model, options),
        IrEntity::Interface(interface) => interface::render_interface(interface, options),
        IrEntity::Orchestrator(orchestrator) => orchestrator::render_orchestrator(orchestrator, options),
        IrEntity::Adapter(adapter) => adapter::render_adapter(adapter, options),
    }
}

/// Renders every entity of a unit under its package header.
pub fn render_unit(output: &ConversionOutput, options: &RenderOptions) -> String {
    let mut file = String::new();
    if !output.namespace.is_empty() {
        let segments: Vec<String> = output.namespace.split('.').map(escape_identifier).collect();
        file.push_str(&format!("package {}\n\n", segments.join(".")));
    }
    let blobs: Vec<String> = output
        .entities()
        .into_iter()
        .map(|entity| render_with(entity, options))
        .collect();
    file.push_str(&blobs.join("\n"));
    file
}

/// `(\n    a,\n    b,\n)` with trailing commas, or `()` when empty.
fn parameter_block(params: &[String], options: &RenderOptions) -> String {
    if params.is_empty() {
        return "()".to_string();
    }
    let mut block = String::from("(\n");
    for param in params {
        block.push_str(&format!("{}{},\n", options.indent, param));
    }
    block.push(')');
    block
}

/// A method with a placeholder body, indented one level.
fn method_stub(method: &Method, force_override: bool, options: &RenderOptions) -> String {
    let indent = &options.indent;
    format!(
        "{indent}{} {{\n{indent}{indent}{}\n{indent}}}\n",
        kotlin_types::method_signature(method, force_override),
        options.stub_body,
    )
}

/// `: A, B` for a list of supertypes, or nothing.
fn supertypes(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = names
        .iter()
        .map(|name| to_kotlin_type(&crate::ir::Type::named(name.clone())))
        .collect();
    format!(" : {}", rendered.join(", "))
}

/// Stub methods as a class body, or nothing when there are none.
fn class_body(methods: &[Method], force_override: bool, options: &RenderOptions) -> String {
    if methods.is_empty() {
        return "\n".to_string();
    }
    let stubs: Vec<String> = methods
        .iter()
        .map(|m| method_stub(m, force_override, options))
        .collect();
    format!(" {{\n{}}}\n", stubs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DomainModel, ImmutableValue, PrimitiveKind, Property, Type};

    #[test]
    fn render_accepts_any_entity_reference() {
        let model = DomainModel::ImmutableValue(ImmutableValue {
            name: "UserId".to_string(),
            namespace: "com.acme".to_string(),
            properties: vec![Property::new("value", Type::Primitive(PrimitiveKind::String))],
        });
        assert_eq!(render(&model), "@JvmInline\nvalue class UserId(val value: String)\n");
    }

    #[test]
    fn unit_gets_package_header() {
        let mut output = ConversionOutput::new("u", "com.acme.in");
        output.domain_models.push(DomainModel::ImmutableValue(ImmutableValue {
            name: "UserId".to_string(),
            namespace: "com.acme.in".to_string(),
            properties: vec![Property::new("value", Type::Primitive(PrimitiveKind::String))],
        }));
        let file = render_unit(&output, &RenderOptions::default());
        assert!(file.starts_with("package com.acme.`in`\n\n@JvmInline\n"));
    }

    #[test]
    fn custom_indent_and_stub() {
        let options = RenderOptions {
            indent: "  ".to_string(),
            stub_body: "error(\"unmigrated\")".to_string(),
        };
        let method = Method {
            name: "run".to_string(),
            type_parameters: vec![],
            parameters: vec![],
            return_type: Type::Primitive(PrimitiveKind::Unit),
            is_asynchronous: false,
            is_override: false,
        };
        assert_eq!(
            method_stub(&method, false, &options),
            "  fun run() {\n    error(\"unmigrated\")\n  }\n"
        );
    }
}
