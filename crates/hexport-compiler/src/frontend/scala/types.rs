//! Scala type references to IR types.
//!
//! The mapping is total: anything not recognized becomes a `Named` type
//! carrying the source text, so conversion never aborts on novel syntax and
//! the result stays human-reviewable.

use std::collections::HashSet;

use crate::classify::is_effect_type;
use crate::ir::{PrimitiveKind, Type};
use super::ast::{TypeNode, TypeParam};

const LIST_TYPES: &[&str] = &[
    "List",
    "Seq",
    "Vector",
    "IndexedSeq",
    "Iterable",
    "Array",
    "NonEmptyList",
    "NonEmptyVector",
    "NonEmptySeq",
    "Chain",
    "NonEmptyChain",
];

const SET_TYPES: &[&str] = &["Set", "SortedSet", "NonEmptySet"];

const MAP_TYPES: &[&str] = &["Map", "SortedMap", "NonEmptyMap"];

const OPTION_TYPES: &[&str] = &["Option", "Some"];

/// Qualifiers that still denote a built-in type.
const STD_PREFIXES: &[&str] = &["scala.", "scala.math.", "scala.Predef.", "java.lang.", "Predef."];

/// Type parameter names visible at a given point.
#[derive(Debug, Clone, Default)]
pub struct TypeScope {
    names: HashSet<String>,
}

impl TypeScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A child scope that also binds `params`.
    pub fn with(&self, params: &[TypeParam]) -> Self {
        let mut names = self.names.clone();
        names.extend(params.iter().map(|p| p.name.clone()));
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Converts a source type reference to an IR type.
///
/// Type parameter usages carry no bounds; bounds are recorded once on the
/// declaring list (see [`convert_type_params`]).
pub fn convert_type(node: &TypeNode, scope: &TypeScope) -> Type {
    match node {
        TypeNode::Reference { name, arguments } => convert_reference(name, arguments, scope),
        TypeNode::Function { parameters, result } => Type::function(
            parameters.iter().map(|p| convert_type(p, scope)).collect(),
            convert_type(result, scope),
        ),
        TypeNode::ByName(inner) => Type::function(Vec::new(), convert_type(inner, scope)),
        TypeNode::Repeated(inner) => Type::list(convert_type(inner, scope)),
        TypeNode::Raw(text) => Type::named(text.clone()),
    }
}

fn convert_reference(name: &str, arguments: &[TypeNode], scope: &TypeScope) -> Type {
    if arguments.is_empty() && scope.contains(name) {
        return Type::type_parameter(name);
    }

    if arguments.is_empty() {
        if let Some(kind) = primitive_kind(name) {
            return Type::Primitive(kind);
        }
    }

    let base = std_name(name);
    let args: Vec<Type> = arguments.iter().map(|a| convert_type(a, scope)).collect();

    match args.len() {
        1 if OPTION_TYPES.contains(&base) => Type::nullable(only(args)),
        1 if LIST_TYPES.contains(&base) => Type::list(only(args)),
        1 if SET_TYPES.contains(&base) => Type::set(only(args)),
        2 if MAP_TYPES.contains(&base) => {
            let mut args = args.into_iter();
            match (args.next(), args.next()) {
                (Some(key), Some(value)) => Type::map(key, value),
                _ => Type::named(name),
            }
        }
        _ => Type::generic(name, args),
    }
}

fn only(mut args: Vec<Type>) -> Type {
    args.pop().unwrap_or_else(|| Type::Primitive(PrimitiveKind::Any))
}

/// Strips standard-library qualification (`scala.Predef.String` -> `String`).
fn std_name(name: &str) -> &str {
    STD_PREFIXES
        .iter()
        .filter_map(|prefix| name.strip_prefix(prefix))
        .find(|rest| !rest.contains('.'))
        .unwrap_or(name)
}

/// Maps a built-in scalar name to its kind.
pub fn primitive_kind(name: &str) -> Option<PrimitiveKind> {
    let kind = match std_name(name) {
        "String" => PrimitiveKind::String,
        "Int" | "Integer" => PrimitiveKind::Int,
        "Long" => PrimitiveKind::Long,
        "Short" => PrimitiveKind::Short,
        "Byte" => PrimitiveKind::Byte,
        "Double" => PrimitiveKind::Double,
        "Float" => PrimitiveKind::Float,
        "Boolean" => PrimitiveKind::Boolean,
        "Char" | "Character" => PrimitiveKind::Char,
        "Unit" => PrimitiveKind::Unit,
        "BigDecimal" => PrimitiveKind::BigDecimal,
        "BigInt" => PrimitiveKind::BigInt,
        "Any" | "AnyVal" | "AnyRef" | "Object" => PrimitiveKind::Any,
        "Nothing" => PrimitiveKind::Nothing,
        _ => return None,
    };
    Some(kind)
}

/// Converts a method return type, stripping one effect wrapper.
///
/// Returns the converted type and whether a wrapper was removed. Only the
/// outermost wrapper is stripped: `IO[Future[A]]` yields `Future[A]`. The
/// payload of a multi-argument effect (`ZIO[R, E, A]`) is its last argument.
pub fn unwrap_effect(node: &TypeNode, scope: &TypeScope) -> (Type, bool) {
    if let TypeNode::Reference { name, arguments } = node {
        if is_effect_type(name) {
            if let Some(payload) = arguments.last() {
                return (convert_type(payload, scope), true);
            }
        }
    }
    (convert_type(node, scope), false)
}

/// Converts a declared type-parameter list to `TypeParameter` types with
/// their bounds.
pub fn convert_type_params(params: &[TypeParam], scope: &TypeScope) -> Vec<Type> {
    params
        .iter()
        .map(|p| Type::TypeParameter {
            name: p.name.clone(),
            bounds: p.bounds.iter().map(|b| convert_type(b, scope)).collect(),
            variance: p.variance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Variance;

    fn r(name: &str) -> TypeNode {
        TypeNode::reference(name)
    }

    fn g(name: &str, args: Vec<TypeNode>) -> TypeNode {
        TypeNode::generic(name, args)
    }

    #[test]
    fn maps_primitives() {
        let scope = TypeScope::new();
        assert_eq!(convert_type(&r("String"), &scope), Type::Primitive(PrimitiveKind::String));
        assert_eq!(convert_type(&r("scala.Int"), &scope), Type::Primitive(PrimitiveKind::Int));
        assert_eq!(convert_type(&r("java.lang.String"), &scope), Type::Primitive(PrimitiveKind::String));
        assert_eq!(convert_type(&r("Unit"), &scope), Type::Primitive(PrimitiveKind::Unit));
    }

    #[test]
    fn maps_option_and_collections() {
        let scope = TypeScope::new();
        assert_eq!(
            convert_type(&g("Option", vec![r("UserId")]), &scope),
            Type::nullable(Type::named("UserId"))
        );
        assert_eq!(
            convert_type(&g("Vector", vec![r("Int")]), &scope),
            Type::list(Type::Primitive(PrimitiveKind::Int))
        );
        assert_eq!(
            convert_type(&g("Set", vec![r("Tag")]), &scope),
            Type::set(Type::named("Tag"))
        );
        assert_eq!(
            convert_type(&g("Map", vec![r("String"), g("List", vec![r("Long")])]), &scope),
            Type::map(
                Type::Primitive(PrimitiveKind::String),
                Type::list(Type::Primitive(PrimitiveKind::Long))
            )
        );
    }

    #[test]
    fn nested_nullable_composes_structurally() {
        let scope = TypeScope::new();
        let node = g("Option", vec![g("List", vec![g("Option", vec![r("Int")])])]);
        assert_eq!(
            convert_type(&node, &scope),
            Type::nullable(Type::list(Type::nullable(Type::Primitive(PrimitiveKind::Int))))
        );
    }

    #[test]
    fn unknown_shapes_fall_back_to_named() {
        let scope = TypeScope::new();
        assert_eq!(
            convert_type(&TypeNode::Raw("(Int, String)".to_string()), &scope),
            Type::named("(Int, String)")
        );
        assert_eq!(
            convert_type(&g("Either", vec![r("Error"), r("User")]), &scope),
            Type::generic("Either", vec![Type::named("Error"), Type::named("User")])
        );
        assert_eq!(
            convert_type(&g("Option", vec![r("A"), r("B")]), &scope),
            Type::generic("Option", vec![Type::named("A"), Type::named("B")])
        );
    }

    #[test]
    fn functions_and_by_name() {
        let scope = TypeScope::new();
        let f = TypeNode::Function {
            parameters: vec![r("Int"), r("String")],
            result: Box::new(r("Boolean")),
        };
        assert_eq!(
            convert_type(&f, &scope),
            Type::function(
                vec![Type::Primitive(PrimitiveKind::Int), Type::Primitive(PrimitiveKind::String)],
                Type::Primitive(PrimitiveKind::Boolean)
            )
        );
        assert_eq!(
            convert_type(&TypeNode::ByName(Box::new(r("Int"))), &scope),
            Type::function(vec![], Type::Primitive(PrimitiveKind::Int))
        );
        assert_eq!(
            convert_type(&TypeNode::Repeated(Box::new(r("Tag"))), &scope),
            Type::list(Type::named("Tag"))
        );
    }

    #[test]
    fn scoped_names_become_type_parameters() {
        let params = vec![TypeParam {
            name: "A".to_string(),
            bounds: vec![r("Entity")],
            variance: Variance::Covariant,
        }];
        let scope = TypeScope::new().with(&params);
        assert_eq!(convert_type(&r("A"), &scope), Type::type_parameter("A"));
        assert_eq!(
            convert_type_params(&params, &scope),
            vec![Type::TypeParameter {
                name: "A".to_string(),
                bounds: vec![Type::named("Entity")],
                variance: Variance::Covariant,
            }]
        );
    }

    #[test]
    fn unwraps_exactly_one_effect_layer() {
        let scope = TypeScope::new();

        let (typ, is_async) = unwrap_effect(&g("IO", vec![r("Unit")]), &scope);
        assert!(is_async);
        assert_eq!(typ, Type::Primitive(PrimitiveKind::Unit));

        let (typ, is_async) = unwrap_effect(&g("IO", vec![g("Future", vec![r("Int")])]), &scope);
        assert!(is_async);
        assert_eq!(typ, Type::generic("Future", vec![Type::Primitive(PrimitiveKind::Int)]));

        let (typ, is_async) = unwrap_effect(&g("ZIO", vec![r("Any"), r("Throwable"), r("User")]), &scope);
        assert!(is_async);
        assert_eq!(typ, Type::named("User"));

        let (typ, is_async) = unwrap_effect(&g("Option", vec![r("User")]), &scope);
        assert!(!is_async);
        assert_eq!(typ, Type::nullable(Type::named("User")));
    }

    #[test]
    fn effect_in_argument_position_stays_wrapped() {
        let scope = TypeScope::new();
        let typ = convert_type(&g("IO", vec![r("Unit")]), &scope);
        assert_eq!(typ, Type::generic("IO", vec![Type::Primitive(PrimitiveKind::Unit)]));
    }
}
