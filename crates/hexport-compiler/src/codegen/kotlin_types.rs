//! Kotlin type generation from IR types.

use crate::ir::{is_type_path, leaf_name, Method, PrimitiveKind, Type, Variance};

/// Kotlin hard keywords; these need back-quotes when used as identifiers.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Converts an IR type to a Kotlin type string.
pub fn to_kotlin_type(typ: &Type) -> String {
    match typ {
        Type::Primitive(kind) => primitive(*kind).to_string(),
        Type::Named { name, arguments } => {
            let base = kotlin_name(name);
            if arguments.is_empty() {
                base
            } else {
                format!("{}<{}>", base, type_list(arguments))
            }
        }
        Type::Nullable(inner) => match inner.as_ref() {
            // Kotlin has a single level of nullability.
            Type::Nullable(_) => to_kotlin_type(inner),
            Type::Function { .. } => format!("({})?", to_kotlin_type(inner)),
            _ => format!("{}?", to_kotlin_type(inner)),
        },
        Type::List(element) => format!("List<{}>", to_kotlin_type(element)),
        Type::Set(element) => format!("Set<{}>", to_kotlin_type(element)),
        Type::Map { key, value } => {
            format!("Map<{}, {}>", to_kotlin_type(key), to_kotlin_type(value))
        }
        Type::Function { parameters, result } => {
            format!("({}) -> {}", type_list(parameters), to_kotlin_type(result))
        }
        Type::TypeParameter { name, .. } => escape_identifier(name),
    }
}

fn primitive(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "String",
        PrimitiveKind::Int => "Int",
        PrimitiveKind::Long => "Long",
        PrimitiveKind::Short => "Short",
        PrimitiveKind::Byte => "Byte",
        PrimitiveKind::Double => "Double",
        PrimitiveKind::Float => "Float",
        PrimitiveKind::Boolean => "Boolean",
        PrimitiveKind::Char => "Char",
        PrimitiveKind::Unit => "Unit",
        PrimitiveKind::BigDecimal => "BigDecimal",
        PrimitiveKind::BigInt => "BigInteger",
        PrimitiveKind::Any => "Any",
        PrimitiveKind::Nothing => "Nothing",
    }
}

/// The bare name of a named type.
///
/// Qualification is dropped; imports are resolved after rendering. Text that
/// is not a plain dotted path (tuples, compound types) is emitted verbatim.
fn kotlin_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return "Any".to_string();
    }
    if is_type_path(name) {
        leaf_name(name).to_string()
    } else {
        name.to_string()
    }
}

fn type_list(types: &[Type]) -> String {
    types.iter().map(to_kotlin_type).collect::<Vec<_>>().join(", ")
}

/// Renders a declared type-parameter list (`<out A : Entity, B>`), or nothing.
pub fn type_parameters(params: &[Type]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|param| match param {
            Type::TypeParameter { name, bounds, variance } => {
                let prefix = match variance {
                    Variance::Invariant => "",
                    Variance::Covariant => "out ",
                    Variance::Contravariant => "in ",
                };
                match bounds.as_slice() {
                    [bound] => format!("{}{} : {}", prefix, escape_identifier(name), to_kotlin_type(bound)),
                    _ => format!("{}{}", prefix, escape_identifier(name)),
                }
            }
            other => to_kotlin_type(other),
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

/// `where` clause for parameters with several bounds, or nothing.
pub fn where_clause(params: &[Type]) -> String {
    let constraints: Vec<String> = params
        .iter()
        .filter_map(|param| match param {
            Type::TypeParameter { name, bounds, .. } if bounds.len() > 1 => Some(
                bounds
                    .iter()
                    .map(|b| format!("{} : {}", escape_identifier(name), to_kotlin_type(b)))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        })
        .collect();
    if constraints.is_empty() {
        String::new()
    } else {
        format!(" where {}", constraints.join(", "))
    }
}

/// Back-quotes identifiers Kotlin would otherwise reject.
pub fn escape_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain && !KOTLIN_KEYWORDS.contains(&name) {
        name.to_string()
    } else {
        format!("`{}`", name)
    }
}

/// Renders a method header without body: `suspend fun <T> name(a: A): R`.
///
/// Asynchronous methods use `suspend` instead of a wrapper type and a `Unit`
/// result is left implicit.
pub fn method_signature(method: &Method, force_override: bool) -> String {
    let mut signature = String::new();
    if method.is_override || force_override {
        signature.push_str("override ");
    }
    if method.is_asynchronous {
        signature.push_str("suspend ");
    }
    signature.push_str("fun ");

    let type_params = type_parameters(&method.type_parameters);
    if !type_params.is_empty() {
        signature.push_str(&type_params);
        signature.push(' ');
    }

    let params: Vec<String> = method
        .parameters
        .iter()
        .map(|p| format!("{}: {}", escape_identifier(&p.name), to_kotlin_type(&p.typ)))
        .collect();
    signature.push_str(&format!("{}({})", escape_identifier(&method.name), params.join(", ")));

    if !method.return_type.is_unit() {
        signature.push_str(&format!(": {}", to_kotlin_type(&method.return_type)));
    }
    signature.push_str(&where_clause(&method.type_parameters));
    signature
}
