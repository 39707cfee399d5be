//! Interface (port) rendering.

use crate::ir::Interface;
use super::kotlin_types::{escape_identifier, method_signature, type_parameters, where_clause};
use super::{supertypes, RenderOptions};

/// Renders a contract: abstract signatures only.
pub(super) fn render_interface(interface: &Interface, options: &RenderOptions) -> String {
    let mut output = format!(
        "interface {}{}{}{}",
        escape_identifier(&interface.name),
        type_parameters(&interface.type_parameters),
        supertypes(&interface.super_interfaces),
        where_clause(&interface.type_parameters),
    );

    if interface.methods.is_empty() {
        output.push('\n');
        return output;
    }

    output.push_str(" {\n");
    for method in &interface.methods {
        output.push_str(&format!("{}{}\n", options.indent, method_signature(method, false)));
    }
    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{InterfaceKind, Method, ParameterIR, PrimitiveKind, Type};

    fn method(name: &str, params: Vec<ParameterIR>, return_type: Type, is_asynchronous: bool) -> Method {
        Method {
            name: name.to_string(),
            type_parameters: vec![],
            parameters: params,
            return_type,
            is_asynchronous,
            is_override: false,
        }
    }

    #[test]
    fn renders_suspend_and_plain_methods() {
        let interface = Interface {
            name: "UserRepository".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            methods: vec![
                method(
                    "m",
                    vec![ParameterIR::new("x", Type::named("T"))],
                    Type::Primitive(PrimitiveKind::Unit),
                    true,
                ),
                method(
                    "find",
                    vec![ParameterIR::new("id", Type::named("UserId"))],
                    Type::nullable(Type::named("User")),
                    false,
                ),
            ],
            super_interfaces: vec!["com.acme.Repository".to_string()],
            kind: InterfaceKind::Repository,
        };
        assert_eq!(
            render_interface(&interface, &RenderOptions::default()),
            "interface UserRepository : Repository {\n    suspend fun m(x: T)\n    fun find(id: UserId): User?\n}\n"
        );
    }

    #[test]
    fn empty_interface_has_no_body() {
        let interface = Interface {
            name: "Marker".to_string(),
            namespace: String::new(),
            type_parameters: vec![Type::type_parameter("F")],
            methods: vec![],
            super_interfaces: vec![],
            kind: InterfaceKind::Generic,
        };
        assert_eq!(render_interface(&interface, &RenderOptions::default()), "interface Marker<F>\n");
    }
}
