//! Convert the Scala syntax tree to language-agnostic IR.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::classify::{
    infra_kind, interface_kind, is_orchestrator_name, is_port_type_name, is_unboxed_annotation,
    is_unboxed_supertype,
};
use crate::diagnostic::ParseError;
use crate::ir::{
    leaf_name, ClosedHierarchy, ConversionOutput, DomainModel, Entity, Enumeration, ImmutableValue,
    InfraDependency, InfrastructureAdapter, Interface, Method, OrchestratorDependency,
    OrchestratorIR, ParameterIR, PrimitiveKind, Property, Subtype, Type, Visibility,
};
use super::ast::*;
use super::types::{convert_type, convert_type_params, unwrap_effect, TypeScope};

/// Converts one parsed compilation unit to IR.
///
/// Fails only when the parser flagged malformed syntax; every recognized
/// declaration shape converts leniently. Declarations that match no
/// classification are skipped.
pub fn convert(tree: &SyntaxTree, unit_id: &str) -> Result<ConversionOutput, ParseError> {
    if let Some(error) = tree.syntax_errors.first() {
        return Err(ParseError::Syntax {
            path: tree.path.clone(),
            line: error.span.line(),
            column: error.span.column(),
            snippet: error.text.clone(),
        });
    }

    let namespace = tree.packages.join(".");
    let mut output = ConversionOutput::new(unit_id, namespace.clone());
    let decls = collect_declarations(tree);

    // Pass 1: every closed hierarchy gets a slot at its declaration index.
    let mut slots: Vec<Option<DomainModel>> = vec![None; decls.len()];
    let mut hierarchy_index: HashMap<&str, usize> = HashMap::new();
    for (i, decl) in decls.iter().enumerate() {
        if is_hierarchy_root(decl) {
            hierarchy_index.entry(decl.name.as_str()).or_insert(i);
            let scope = TypeScope::new().with(&decl.type_parameters);
            slots[i] = Some(DomainModel::ClosedHierarchy(ClosedHierarchy {
                name: decl.name.clone(),
                namespace: namespace.clone(),
                type_parameters: convert_type_params(&decl.type_parameters, &scope),
                subtypes: Vec::new(),
            }));
        } else if decl.kind == DeclKind::Enum {
            slots[i] = Some(convert_enum(decl, &namespace));
        }
    }

    // Pass 2: one scan groups each case declaration under the first
    // hierarchy its extends clause names.
    let mut consumed = vec![false; decls.len()];
    for (i, decl) in decls.iter().enumerate() {
        if !is_case_aggregate(decl) {
            continue;
        }
        let root = decl.extends.iter().find_map(|node| match node {
            TypeNode::Reference { name, arguments } => hierarchy_index
                .get(leaf_name(name))
                .map(|&root| (root, arguments.as_slice())),
            _ => None,
        });
        if let Some((root, arguments)) = root {
            if let Some(DomainModel::ClosedHierarchy(hierarchy)) = slots[root].as_mut() {
                hierarchy.subtypes.push(convert_subtype(decl, arguments));
                consumed[i] = true;
            }
        }
    }

    for (i, decl) in decls.iter().enumerate() {
        if let Some(model) = slots[i].take() {
            output.domain_models.push(model);
        } else if consumed[i] {
            continue;
        } else if is_case_aggregate(decl) {
            output.domain_models.push(convert_aggregate(decl, &namespace));
        } else if is_interface_shape(decl) {
            output.interfaces.push(convert_interface(decl, &namespace));
        }
    }

    let interface_names: HashSet<&str> = output.interfaces.iter().map(|i| i.name.as_str()).collect();
    let mut orchestrators = Vec::new();
    let mut adapters = Vec::new();
    for decl in decls.iter().filter(|d| is_concrete_class(d)) {
        if is_orchestrator(decl) {
            orchestrators.push(convert_orchestrator(decl, &namespace, &interface_names));
        } else if let Some(implemented) = implemented_contract(decl, &interface_names) {
            adapters.push(convert_adapter(decl, &namespace, implemented));
        } else {
            debug!(unit = unit_id, class = %decl.name, "class matches no classification");
        }
    }
    output.orchestrators = orchestrators;
    output.adapters = adapters;

    debug!(
        unit = unit_id,
        namespace = %output.namespace,
        domain_models = output.domain_models.len(),
        interfaces = output.interfaces.len(),
        orchestrators = output.orchestrators.len(),
        adapters = output.adapters.len(),
        "converted unit"
    );

    Ok(output)
}

/// Top-level declarations in source order, each followed by the members of
/// its companion object.
fn collect_declarations(tree: &SyntaxTree) -> Vec<&Declaration> {
    let companions: HashSet<&str> = tree
        .declarations
        .iter()
        .filter(|d| d.kind != DeclKind::Object)
        .map(|d| d.name.as_str())
        .collect();

    let mut decls = Vec::new();
    for decl in &tree.declarations {
        decls.push(decl);
        if decl.kind == DeclKind::Object && !decl.is_case() && companions.contains(decl.name.as_str()) {
            decls.extend(decl.nested());
        }
    }
    decls
}

fn is_hierarchy_root(decl: &Declaration) -> bool {
    decl.is_sealed() && matches!(decl.kind, DeclKind::Trait | DeclKind::Class) && !decl.is_case()
}

fn is_case_aggregate(decl: &Declaration) -> bool {
    decl.is_case() && matches!(decl.kind, DeclKind::Class | DeclKind::Object)
}

/// A non-sealed trait declaring only abstract methods.
fn is_interface_shape(decl: &Declaration) -> bool {
    decl.kind == DeclKind::Trait
        && !decl.is_sealed()
        && decl
            .members
            .iter()
            .all(|m| matches!(m, Member::Method(method) if !method.has_body))
}

fn is_concrete_class(decl: &Declaration) -> bool {
    decl.kind == DeclKind::Class && !decl.is_case() && !decl.is_sealed() && !decl.modifiers.is_abstract
}

fn is_orchestrator(decl: &Declaration) -> bool {
    is_orchestrator_name(&decl.name) && !decl.primary_parameters().is_empty()
}

fn is_unboxed(decl: &Declaration) -> bool {
    decl.extends
        .iter()
        .filter_map(TypeNode::reference_name)
        .any(is_unboxed_supertype)
        || decl.annotations.iter().any(|a| is_unboxed_annotation(a))
}

fn convert_aggregate(decl: &Declaration, namespace: &str) -> DomainModel {
    let scope = TypeScope::new().with(&decl.type_parameters);
    let ctor = convert_properties(decl.primary_parameters(), &scope);

    if is_unboxed(decl) {
        return DomainModel::ImmutableValue(ImmutableValue {
            name: decl.name.clone(),
            namespace: namespace.to_string(),
            properties: ctor,
        });
    }

    let body: Vec<Property> = decl
        .values()
        .filter_map(|value| {
            let type_node = value.type_node.as_ref()?;
            Some(Property {
                name: value.name.clone(),
                typ: convert_type(type_node, &scope),
                mutable: value.binding == Binding::Var,
                visibility: visibility(&value.modifiers),
            })
        })
        .collect();

    let (properties, constructor_parameters) = if body.is_empty() {
        (ctor, None)
    } else {
        let mut properties = ctor.clone();
        properties.extend(body);
        (properties, Some(ctor))
    };

    DomainModel::Entity(Entity {
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        type_parameters: convert_type_params(&decl.type_parameters, &scope),
        properties,
        constructor_parameters,
    })
}

/// `supertype_arguments` are the arguments the case applies to its
/// hierarchy in the extends clause.
fn convert_subtype(decl: &Declaration, supertype_arguments: &[TypeNode]) -> Subtype {
    let scope = TypeScope::new().with(&decl.type_parameters);
    Subtype {
        name: decl.name.clone(),
        type_parameters: convert_type_params(&decl.type_parameters, &scope),
        properties: convert_properties(decl.primary_parameters(), &scope),
        supertype_arguments: supertype_arguments.iter().map(|a| convert_type(a, &scope)).collect(),
        singleton: decl.kind == DeclKind::Object,
    }
}

/// Scala 3 enums: payload-free cases only make an enumeration, any
/// parameterised case makes a closed hierarchy.
///
/// Cases of a generic enum inherit its parameters: a parameterised case is
/// generic over all of them, a simple case applies `Nothing` to each.
fn convert_enum(decl: &Declaration, namespace: &str) -> DomainModel {
    if decl.enum_cases.iter().all(EnumCase::is_simple) {
        return DomainModel::Enumeration(Enumeration {
            name: decl.name.clone(),
            namespace: namespace.to_string(),
            values: decl.enum_cases.iter().map(|c| c.name.clone()).collect(),
        });
    }

    let scope = TypeScope::new().with(&decl.type_parameters);
    let usages: Vec<Type> = decl
        .type_parameters
        .iter()
        .map(|p| Type::type_parameter(p.name.clone()))
        .collect();
    let subtypes = decl
        .enum_cases
        .iter()
        .map(|case| {
            let (type_parameters, supertype_arguments) = if case.is_simple() {
                (Vec::new(), vec![Type::Primitive(PrimitiveKind::Nothing); usages.len()])
            } else {
                (usages.clone(), usages.clone())
            };
            Subtype {
                name: case.name.clone(),
                type_parameters,
                properties: case
                    .parameter_lists
                    .first()
                    .map(|list| convert_properties(&list.parameters, &scope))
                    .unwrap_or_default(),
                supertype_arguments,
                singleton: case.is_simple(),
            }
        })
        .collect();

    DomainModel::ClosedHierarchy(ClosedHierarchy {
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        type_parameters: convert_type_params(&decl.type_parameters, &scope),
        subtypes,
    })
}

fn convert_interface(decl: &Declaration, namespace: &str) -> Interface {
    let scope = TypeScope::new().with(&decl.type_parameters);
    Interface {
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        type_parameters: convert_type_params(&decl.type_parameters, &scope),
        methods: decl.methods().map(|m| convert_method(m, &scope)).collect(),
        super_interfaces: extended_names(decl),
        kind: interface_kind(&decl.name),
    }
}

fn convert_orchestrator(
    decl: &Declaration,
    namespace: &str,
    interface_names: &HashSet<&str>,
) -> OrchestratorIR {
    let scope = TypeScope::new().with(&decl.type_parameters);
    let mut port_dependencies = Vec::new();
    let mut other_dependencies = Vec::new();

    for param in decl.primary_parameters() {
        let dependency = convert_dependency(param, &scope);
        if is_port_dependency(param, interface_names) {
            port_dependencies.push(dependency);
        } else {
            other_dependencies.push(dependency);
        }
    }

    OrchestratorIR {
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        port_dependencies,
        other_dependencies,
        implements: extended_names(decl),
        methods: class_methods(decl, &scope),
    }
}

fn is_port_dependency(param: &Parameter, interface_names: &HashSet<&str>) -> bool {
    param
        .type_node
        .as_ref()
        .and_then(TypeNode::reference_name)
        .is_some_and(|name| is_port_type_name(name) || interface_names.contains(leaf_name(name)))
}

/// The first extended type that is a contract of this unit or follows the
/// contract naming convention.
fn implemented_contract<'a>(decl: &'a Declaration, interface_names: &HashSet<&str>) -> Option<&'a str> {
    decl.extends
        .iter()
        .filter_map(TypeNode::reference_name)
        .find(|name| interface_names.contains(leaf_name(name)) || is_port_type_name(name))
}

fn convert_adapter(decl: &Declaration, namespace: &str, implemented: &str) -> InfrastructureAdapter {
    let scope = TypeScope::new().with(&decl.type_parameters);
    let mut infra_dependencies = Vec::new();
    let mut other_dependencies = Vec::new();

    for param in decl.primary_parameters() {
        let kind = param
            .type_node
            .as_ref()
            .and_then(TypeNode::reference_name)
            .and_then(infra_kind);
        let dependency = convert_dependency(param, &scope);
        match kind {
            Some(kind) => infra_dependencies.push(InfraDependency {
                name: dependency.name,
                typ: dependency.typ,
                kind,
            }),
            None => other_dependencies.push(dependency),
        }
    }

    InfrastructureAdapter {
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        implements: implemented.to_string(),
        infra_dependencies,
        other_dependencies,
        methods: class_methods(decl, &scope),
    }
}

/// Non-private methods of a concrete class. Auxiliary constructors are not
/// methods.
fn class_methods(decl: &Declaration, scope: &TypeScope) -> Vec<Method> {
    decl.methods()
        .filter(|m| !m.modifiers.private && m.name != "this")
        .map(|m| convert_method(m, scope))
        .collect()
}

/// Converts a method signature.
///
/// Only the first parameter list is kept; a leading `implicit`/`using` list
/// contributes nothing. A missing return type is `Unit` on an abstract
/// declaration and `Any` on a definition whose result is inferred.
fn convert_method(method: &MethodDecl, scope: &TypeScope) -> Method {
    let scope = scope.with(&method.type_parameters);

    let parameters = method
        .parameter_lists
        .first()
        .filter(|list| !list.implicit)
        .map(|list| {
            list.parameters
                .iter()
                .map(|p| ParameterIR::new(p.name.clone(), parameter_type(p, &scope)))
                .collect()
        })
        .unwrap_or_default();

    let (return_type, is_asynchronous) = match &method.return_type {
        Some(node) => unwrap_effect(node, &scope),
        None if method.has_body => (Type::Primitive(PrimitiveKind::Any), false),
        None => (Type::Primitive(PrimitiveKind::Unit), false),
    };

    Method {
        name: method.name.clone(),
        type_parameters: convert_type_params(&method.type_parameters, &scope),
        parameters,
        return_type,
        is_asynchronous,
        is_override: method.modifiers.is_override,
    }
}

fn convert_properties(params: &[Parameter], scope: &TypeScope) -> Vec<Property> {
    params
        .iter()
        .map(|p| Property {
            name: p.name.clone(),
            typ: parameter_type(p, scope),
            mutable: p.binding == Some(Binding::Var),
            visibility: visibility(&p.modifiers),
        })
        .collect()
}

fn convert_dependency(param: &Parameter, scope: &TypeScope) -> OrchestratorDependency {
    OrchestratorDependency {
        name: param.name.clone(),
        typ: parameter_type(param, scope),
    }
}

/// An untyped parameter converts to an empty name, which validation rejects.
fn parameter_type(param: &Parameter, scope: &TypeScope) -> Type {
    param
        .type_node
        .as_ref()
        .map(|t| convert_type(t, scope))
        .unwrap_or_else(|| Type::named(""))
}

fn visibility(modifiers: &Modifiers) -> Visibility {
    if modifiers.private {
        Visibility::Private
    } else if modifiers.protected {
        Visibility::Protected
    } else {
        Visibility::Public
    }
}

fn extended_names(decl: &Declaration) -> Vec<String> {
    decl.extends
        .iter()
        .filter_map(|t| match t {
            TypeNode::Reference { name, .. } => Some(name.clone()),
            TypeNode::Raw(text) => Some(text.clone()),
            _ => None,
        })
        .filter(|name| !is_unboxed_supertype(name) && name != "Product" && name != "Serializable")
        .collect()
}
