//! Infrastructure adapter intermediate representation.

use serde::Serialize;

use super::{Method, OrchestratorDependency, Type};

/// A concrete implementation of an interface bound to external infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfrastructureAdapter {
    pub name: String,

    pub namespace: String,

    /// Name of the implemented interface.
    pub implements: String,

    pub infra_dependencies: Vec<InfraDependency>,

    pub other_dependencies: Vec<OrchestratorDependency>,

    pub methods: Vec<Method>,
}

/// A constructor parameter bound to a piece of infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfraDependency {
    pub name: String,
    pub typ: Type,
    pub kind: InfraKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InfraKind {
    Database,
    Queue,
    Http,
    Other,
}

impl InfraKind {
    pub fn label(self) -> &'static str {
        match self {
            InfraKind::Database => "database",
            InfraKind::Queue => "queue",
            InfraKind::Http => "http",
            InfraKind::Other => "other",
        }
    }
}
