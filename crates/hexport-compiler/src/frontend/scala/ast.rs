//! Scala syntax tree consumed by the converter.
//!
//! This is deliberately shallow: declarations, signatures and type references.
//! Expression bodies are never needed and are not represented.

use std::path::PathBuf;

use crate::diagnostic::Span;
use crate::ir::Variance;

/// A parsed compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub path: PathBuf,
    /// Package clauses in source order (`package a.b; package c`).
    pub packages: Vec<String>,
    pub imports: Vec<ImportDecl>,
    pub declarations: Vec<Declaration>,
    /// Locations the parser could not recognize.
    pub syntax_errors: Vec<SyntaxErrorNode>,
}

impl SyntaxTree {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            packages: Vec::new(),
            imports: Vec::new(),
            declarations: Vec::new(),
            syntax_errors: Vec::new(),
        }
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Import expression text without the keyword (`cats.effect.IO`).
    pub path: String,
    pub span: Span,
}

/// A region tree-sitter marked as erroneous or missing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxErrorNode {
    pub span: Span,
    pub text: String,
}

/// Which keyword introduced a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Trait,
    Object,
    Enum,
}

/// Modifiers that matter for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub case: bool,
    pub sealed: bool,
    pub is_abstract: bool,
    pub is_override: bool,
    pub private: bool,
    pub protected: bool,
}

/// A class, trait, object or enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    pub modifiers: Modifiers,
    /// Annotation names without the `@` (`newtype`).
    pub annotations: Vec<String>,
    pub type_parameters: Vec<TypeParam>,
    /// Constructor parameter lists, in source order.
    pub parameter_lists: Vec<ParameterList>,
    /// Types named in the `extends ... with ...` clause.
    pub extends: Vec<TypeNode>,
    pub members: Vec<Member>,
    /// Cases of a Scala 3 `enum`.
    pub enum_cases: Vec<EnumCase>,
    pub span: Span,
}

impl Declaration {
    pub fn is_case(&self) -> bool {
        self.modifiers.case
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers.sealed
    }

    /// First constructor parameter list, if any.
    pub fn primary_parameters(&self) -> &[Parameter] {
        self.parameter_lists
            .first()
            .map(|list| list.parameters.as_slice())
            .unwrap_or(&[])
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &ValueDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Value(value) => Some(value),
            _ => None,
        })
    }

    pub fn nested(&self) -> impl Iterator<Item = &Declaration> {
        self.members.iter().filter_map(|m| match m {
            Member::Nested(decl) => Some(decl),
            _ => None,
        })
    }
}

/// A declared type parameter (`+A <: Entity`, `F[_]`).
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    /// Upper and context bounds.
    pub bounds: Vec<TypeNode>,
    pub variance: Variance,
}

/// One parenthesised parameter list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterList {
    /// Introduced by `implicit` or `using`.
    pub implicit: bool,
    pub parameters: Vec<Parameter>,
}

/// A parameter (constructor or method).
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_node: Option<TypeNode>,
    pub binding: Option<Binding>,
    pub modifiers: Modifiers,
}

/// `val` / `var` on a class parameter or body member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Val,
    Var,
}

/// A body member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Method(MethodDecl),
    Value(ValueDecl),
    Nested(Declaration),
}

/// A `def`, abstract or concrete.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<TypeParam>,
    pub parameter_lists: Vec<ParameterList>,
    pub return_type: Option<TypeNode>,
    /// `false` for abstract declarations.
    pub has_body: bool,
    pub span: Span,
}

/// A `val` / `var` member.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDecl {
    pub name: String,
    pub binding: Binding,
    pub modifiers: Modifiers,
    pub type_node: Option<TypeNode>,
}

/// A case of a Scala 3 enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    pub name: String,
    /// Empty for simple cases (`case Red`).
    pub parameter_lists: Vec<ParameterList>,
}

impl EnumCase {
    pub fn is_simple(&self) -> bool {
        self.parameter_lists.is_empty()
    }
}

/// Type reference AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// `Name` or `pkg.Name`, with optional `[A, B]` arguments.
    Reference {
        name: String,
        arguments: Vec<TypeNode>,
    },

    /// `A => B`, `(A, B) => C`
    Function {
        parameters: Vec<TypeNode>,
        result: Box<TypeNode>,
    },

    /// `=> T`
    ByName(Box<TypeNode>),

    /// `T*`
    Repeated(Box<TypeNode>),

    /// Anything else, kept as source text.
    Raw(String),
}

impl TypeNode {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeNode>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            arguments,
        }
    }

    /// The referenced name, for references only.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            TypeNode::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}
