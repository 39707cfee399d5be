//! Interface (port) intermediate representation.

use serde::Serialize;

use super::{ParameterIR, Type};

/// IR representation of an abstract contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Name of the contract (e.g., "UserRepository").
    pub name: String,

    pub namespace: String,

    /// Type parameters declared on the contract.
    pub type_parameters: Vec<Type>,

    /// Abstract method signatures, in declaration order.
    pub methods: Vec<Method>,

    /// Names of extended contracts.
    pub super_interfaces: Vec<String>,

    /// Role inferred from the naming convention.
    pub kind: InterfaceKind,
}

/// Architectural role of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceKind {
    Generic,
    Repository,
    Service,
    UseCase,
    EventHandler,
}

/// A method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,

    pub type_parameters: Vec<Type>,

    /// Parameters of the first source parameter list.
    pub parameters: Vec<ParameterIR>,

    /// Return type with any effect wrapper already stripped.
    pub return_type: Type,

    /// The source return type was an effect wrapper.
    pub is_asynchronous: bool,

    /// Declared with `override` in the source.
    pub is_override: bool,
}
