//! The closed set of types shared across the IR.

use std::fmt;

use serde::Serialize;

/// Built-in scalar kinds that map one-to-one between source and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PrimitiveKind {
    String,
    Int,
    Long,
    Short,
    Byte,
    Double,
    Float,
    Boolean,
    Char,
    Unit,
    BigDecimal,
    BigInt,
    Any,
    Nothing,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::String,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Short,
        PrimitiveKind::Byte,
        PrimitiveKind::Double,
        PrimitiveKind::Float,
        PrimitiveKind::Boolean,
        PrimitiveKind::Char,
        PrimitiveKind::Unit,
        PrimitiveKind::BigDecimal,
        PrimitiveKind::BigInt,
        PrimitiveKind::Any,
        PrimitiveKind::Nothing,
    ];

    /// Canonical (source-side) spelling of the kind.
    pub fn name(self) -> &'static str {
        match self {
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
            PrimitiveKind::BigInt => "BigInt",
            PrimitiveKind::Any => "Any",
            PrimitiveKind::Nothing => "Nothing",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration-site variance of a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    #[default]
    Invariant,
    /// `+A`
    Covariant,
    /// `-A`
    Contravariant,
}

/// A type in the IR.
///
/// Nullability is structural (`Nullable` wraps the inner type) so nested
/// nullable/container compositions need no special cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Primitive(PrimitiveKind),

    /// Reference to a user or library type. `name` may be qualified
    /// (`java.time.Instant`) or, for constructs the converter does not
    /// model, the raw source text.
    Named {
        name: String,
        arguments: Vec<Type>,
    },

    Nullable(Box<Type>),

    List(Box<Type>),

    Set(Box<Type>),

    Map {
        key: Box<Type>,
        value: Box<Type>,
    },

    Function {
        parameters: Vec<Type>,
        result: Box<Type>,
    },

    /// A type parameter. `bounds` and `variance` are only set on the
    /// declaring list; usages carry neither.
    TypeParameter {
        name: String,
        bounds: Vec<Type>,
        variance: Variance,
    },
}

impl Type {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }

    /// A named type without type arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<Type>) -> Self {
        Type::Named {
            name: name.into(),
            arguments,
        }
    }

    pub fn nullable(inner: Type) -> Self {
        Type::Nullable(Box::new(inner))
    }

    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn set(element: Type) -> Self {
        Type::Set(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn function(parameters: Vec<Type>, result: Type) -> Self {
        Type::Function {
            parameters,
            result: Box::new(result),
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        Type::TypeParameter {
            name: name.into(),
            bounds: Vec::new(),
            variance: Variance::Invariant,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveKind::Unit))
    }

    /// Direct child types, in declaration order.
    pub fn children(&self) -> Vec<&Type> {
        match self {
            Type::Primitive(_) => Vec::new(),
            Type::Named { arguments, .. } => arguments.iter().collect(),
            Type::Nullable(inner) | Type::List(inner) | Type::Set(inner) => vec![inner.as_ref()],
            Type::Map { key, value } => vec![key.as_ref(), value.as_ref()],
            Type::Function { parameters, result } => {
                let mut children: Vec<&Type> = parameters.iter().collect();
                children.push(result.as_ref());
                children
            }
            Type::TypeParameter { bounds, .. } => bounds.iter().collect(),
        }
    }
}

/// Last segment of a dotted path (`java.time.Instant` -> `Instant`).
pub fn leaf_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// A plain dotted path, as opposed to raw text kept for tuples, compound or
/// structural types.
pub fn is_type_path(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_name_strips_namespace() {
        assert_eq!(leaf_name("java.time.Instant"), "Instant");
        assert_eq!(leaf_name("UserId"), "UserId");
        assert_eq!(leaf_name(""), "");
    }

    #[test]
    fn raw_text_is_not_a_path() {
        assert!(is_type_path("java.time.Instant"));
        assert!(is_type_path("Outer$Inner"));
        assert!(!is_type_path("(Int, String)"));
        assert!(!is_type_path("A with B"));
        assert!(!is_type_path(""));
    }

    #[test]
    fn children_cover_every_container() {
        let map = Type::map(Type::primitive(PrimitiveKind::String), Type::list(Type::named("User")));
        assert_eq!(map.children().len(), 2);

        let func = Type::function(
            vec![Type::primitive(PrimitiveKind::Int), Type::primitive(PrimitiveKind::Long)],
            Type::primitive(PrimitiveKind::Boolean),
        );
        assert_eq!(func.children().len(), 3);

        assert!(Type::primitive(PrimitiveKind::Unit).children().is_empty());
        assert!(Type::primitive(PrimitiveKind::Unit).is_unit());
    }
}
