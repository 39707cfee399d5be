//! Infrastructure adapter rendering.

use crate::ir::InfrastructureAdapter;
use super::kotlin_types::{escape_identifier, to_kotlin_type};
use super::{class_body, parameter_block, supertypes, RenderOptions};

/// Renders an adapter as a class implementing its contract. Infrastructure
/// handles precede other collaborators and every method overrides.
pub(super) fn render_adapter(adapter: &InfrastructureAdapter, options: &RenderOptions) -> String {
    let params: Vec<String> = adapter
        .infra_dependencies
        .iter()
        .map(|dep| (&dep.name, &dep.typ))
        .chain(adapter.other_dependencies.iter().map(|dep| (&dep.name, &dep.typ)))
        .map(|(name, typ)| format!("private val {}: {}", escape_identifier(name), to_kotlin_type(typ)))
        .collect();

    let mut output = format!("class {}", escape_identifier(&adapter.name));
    if !params.is_empty() {
        output.push_str(&parameter_block(&params, options));
    }
    output.push_str(&supertypes(std::slice::from_ref(&adapter.implements)));
    output.push_str(&class_body(&adapter.methods, true, options));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{InfraDependency, InfraKind, Method, OrchestratorDependency, ParameterIR, PrimitiveKind, Type};

    #[test]
    fn infra_dependencies_first_and_methods_override() {
        let adapter = InfrastructureAdapter {
            name: "PostgresUserRepository".to_string(),
            namespace: String::new(),
            implements: "UserRepository".to_string(),
            infra_dependencies: vec![InfraDependency {
                name: "xa".to_string(),
                typ: Type::generic("Transactor", vec![Type::named("IO")]),
                kind: InfraKind::Database,
            }],
            other_dependencies: vec![OrchestratorDependency {
                name: "clock".to_string(),
                typ: Type::named("Clock"),
            }],
            methods: vec![Method {
                name: "save".to_string(),
                type_parameters: vec![],
                parameters: vec![ParameterIR::new("user", Type::named("User"))],
                return_type: Type::Primitive(PrimitiveKind::Unit),
                is_asynchronous: true,
                is_override: false,
            }],
        };

        let rendered = render_adapter(&adapter, &RenderOptions::default());
        assert!(rendered.starts_with(
            "class PostgresUserRepository(\n    private val xa: Transactor<IO>,\n    private val clock: Clock,\n) : UserRepository {\n"
        ));
        assert!(rendered.contains("    override suspend fun save(user: User) {\n"));
    }

    #[test]
    fn adapter_without_dependencies() {
        let adapter = InfrastructureAdapter {
            name: "InMemoryClock".to_string(),
            namespace: String::new(),
            implements: "ClockPort".to_string(),
            infra_dependencies: vec![],
            other_dependencies: vec![],
            methods: vec![],
        };
        assert_eq!(
            render_adapter(&adapter, &RenderOptions::default()),
            "class InMemoryClock : ClockPort\n"
        );
    }
}
