//! Orchestrator intermediate representation.

use serde::Serialize;

use super::{Method, Type};

/// IR representation of an orchestrator (an application service wiring
/// ports together).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestratorIR {
    /// Name of the orchestrator.
    pub name: String,

    pub namespace: String,

    /// Constructor parameters typed by a contract (port).
    pub port_dependencies: Vec<OrchestratorDependency>,

    /// Every other constructor parameter.
    pub other_dependencies: Vec<OrchestratorDependency>,

    /// Names of extended types.
    pub implements: Vec<String>,

    /// Public methods.
    pub methods: Vec<Method>,
}

impl OrchestratorIR {
    /// Constructor parameters in rendering order: ports first, then others.
    pub fn constructor_order(&self) -> impl Iterator<Item = &OrchestratorDependency> {
        self.port_dependencies.iter().chain(self.other_dependencies.iter())
    }
}

/// A dependency of an orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestratorDependency {
    /// Name of the dependency parameter.
    pub name: String,

    /// Declared type of the dependency.
    pub typ: Type,
}
