//! Domain model intermediate representation.

use serde::Serialize;

use super::{Property, Type};

/// IR representation of a domain model declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum DomainModel {
    ImmutableValue(ImmutableValue),
    Entity(Entity),
    ClosedHierarchy(ClosedHierarchy),
    Enumeration(Enumeration),
}

impl DomainModel {
    pub fn name(&self) -> &str {
        match self {
            DomainModel::ImmutableValue(v) => &v.name,
            DomainModel::Entity(e) => &e.name,
            DomainModel::ClosedHierarchy(h) => &h.name,
            DomainModel::Enumeration(e) => &e.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            DomainModel::ImmutableValue(v) => &v.namespace,
            DomainModel::Entity(e) => &e.namespace,
            DomainModel::ClosedHierarchy(h) => &h.namespace,
            DomainModel::Enumeration(e) => &e.namespace,
        }
    }

    /// Short label used in diagnostics.
    pub fn kind_label(&self) -> &'static str {
        match self {
            DomainModel::ImmutableValue(_) => "value",
            DomainModel::Entity(_) => "entity",
            DomainModel::ClosedHierarchy(_) => "hierarchy",
            DomainModel::Enumeration(_) => "enumeration",
        }
    }

    /// Every type name this model introduces, including hierarchy subtypes.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = vec![self.name()];
        if let DomainModel::ClosedHierarchy(h) = self {
            names.extend(h.subtypes.iter().map(|s| s.name.as_str()));
        }
        names
    }
}

/// A single-field wrapper around another type (a newtype).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImmutableValue {
    pub name: String,
    pub namespace: String,
    pub properties: Vec<Property>,
}

/// A record-like aggregate without wrapper semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub name: String,
    pub namespace: String,
    /// Type parameters declared on the aggregate (`TypeParameter` variants).
    pub type_parameters: Vec<Type>,
    /// Constructor fields followed by typed body members.
    pub properties: Vec<Property>,
    /// Set only when the constructor list differs from `properties`.
    pub constructor_parameters: Option<Vec<Property>>,
}

impl Entity {
    /// Properties that are not constructor parameters.
    pub fn body_properties(&self) -> Vec<&Property> {
        match &self.constructor_parameters {
            None => Vec::new(),
            Some(ctor) => self
                .properties
                .iter()
                .filter(|p| !ctor.iter().any(|c| c.name == p.name))
                .collect(),
        }
    }

    /// The properties that appear in the primary constructor.
    pub fn constructor(&self) -> &[Property] {
        self.constructor_parameters.as_deref().unwrap_or(&self.properties)
    }
}

/// A closed, explicitly enumerated set of variants under one supertype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedHierarchy {
    pub name: String,
    pub namespace: String,
    /// Declared on the supertype, with variance.
    pub type_parameters: Vec<Type>,
    pub subtypes: Vec<Subtype>,
}

/// One case of a closed hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtype {
    pub name: String,
    pub type_parameters: Vec<Type>,
    pub properties: Vec<Property>,
    /// Arguments applied to the supertype (`Ok[A] extends Result[A]` -> `[A]`).
    pub supertype_arguments: Vec<Type>,
    /// Declared as a singleton (`case object`) rather than a record.
    pub singleton: bool,
}

/// A closed set of payload-free values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub name: String,
    pub namespace: String,
    pub values: Vec<String>,
}
