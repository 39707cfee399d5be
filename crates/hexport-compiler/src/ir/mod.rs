//! Language-agnostic intermediate representation.
//!
//! This IR is produced by language frontends and consumed by the validator and
//! the code generator. It represents the architectural concepts (domain models,
//! ports, orchestrators, adapters) in a way that's independent of both the
//! source and the target language.

mod adapter;
mod domain;
mod interface;
mod orchestrator;
mod types;

pub use adapter::{InfraDependency, InfraKind, InfrastructureAdapter};
pub use domain::{ClosedHierarchy, DomainModel, Entity, Enumeration, ImmutableValue, Subtype};
pub use interface::{Interface, InterfaceKind, Method};
pub use orchestrator::{OrchestratorDependency, OrchestratorIR};
pub use types::{is_type_path, leaf_name, PrimitiveKind, Type, Variance};

use serde::Serialize;

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// A field of a domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub typ: Type,
    pub mutable: bool,
    pub visibility: Visibility,
}

impl Property {
    /// An immutable public property.
    pub fn new(name: impl Into<String>, typ: Type) -> Self {
        Self {
            name: name.into(),
            typ,
            mutable: false,
            visibility: Visibility::Public,
        }
    }
}

/// A parameter to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterIR {
    pub name: String,
    pub typ: Type,
}

impl ParameterIR {
    pub fn new(name: impl Into<String>, typ: Type) -> Self {
        Self {
            name: name.into(),
            typ,
        }
    }
}

/// Everything the converter produced for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOutput {
    /// Identifier of the unit (usually its path).
    pub unit: String,
    /// Namespace stamped on every entity of the unit.
    pub namespace: String,
    pub domain_models: Vec<DomainModel>,
    pub interfaces: Vec<Interface>,
    pub orchestrators: Vec<OrchestratorIR>,
    pub adapters: Vec<InfrastructureAdapter>,
}

impl ConversionOutput {
    pub fn new(unit: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            namespace: namespace.into(),
            domain_models: Vec::new(),
            interfaces: Vec::new(),
            orchestrators: Vec::new(),
            adapters: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domain_models.is_empty()
            && self.interfaces.is_empty()
            && self.orchestrators.is_empty()
            && self.adapters.is_empty()
    }

    /// Every entity of the unit, in output order (models, interfaces,
    /// orchestrators, adapters).
    pub fn entities(&self) -> Vec<IrEntity<'_>> {
        let mut entities: Vec<IrEntity<'_>> = Vec::new();
        entities.extend(self.domain_models.iter().map(IrEntity::Domain));
        entities.extend(self.interfaces.iter().map(IrEntity::Interface));
        entities.extend(self.orchestrators.iter().map(IrEntity::Orchestrator));
        entities.extend(self.adapters.iter().map(IrEntity::Adapter));
        entities
    }
}

/// A borrowed view of any renderable IR entity.
#[derive(Debug, Clone, Copy)]
pub enum IrEntity<'a> {
    Domain(&'a DomainModel),
    Interface(&'a Interface),
    Orchestrator(&'a OrchestratorIR),
    Adapter(&'a InfrastructureAdapter),
}

impl<'a> IrEntity<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            IrEntity::Domain(m) => m.name(),
            IrEntity::Interface(i) => &i.name,
            IrEntity::Orchestrator(o) => &o.name,
            IrEntity::Adapter(a) => &a.name,
        }
    }
}

impl<'a> From<&'a DomainModel> for IrEntity<'a> {
    fn from(model: &'a DomainModel) -> Self {
        IrEntity::Domain(model)
    }
}

impl<'a> From<&'a Interface> for IrEntity<'a> {
    fn from(interface: &'a Interface) -> Self {
        IrEntity::Interface(interface)
    }
}

impl<'a> From<&'a OrchestratorIR> for IrEntity<'a> {
    fn from(orchestrator: &'a OrchestratorIR) -> Self {
        IrEntity::Orchestrator(orchestrator)
    }
}

impl<'a> From<&'a InfrastructureAdapter> for IrEntity<'a> {
    fn from(adapter: &'a InfrastructureAdapter) -> Self {
        IrEntity::Adapter(adapter)
    }
}
