//! Type well-formedness.
//!
//! The only malformed type is a named type with an empty name; every
//! container delegates to the types it holds.

use crate::ir::{DomainModel, Interface, Method, Property, Type};
use super::result::{Findings, Rule};

pub(super) fn validate_model_types(model: &DomainModel, findings: &mut Findings) {
    match model {
        DomainModel::ImmutableValue(value) => validate_properties(&value.name, &value.properties, findings),
        DomainModel::Entity(entity) => {
            for param in &entity.type_parameters {
                validate_type(param, &entity.name, "type parameter", findings);
            }
            validate_properties(&entity.name, &entity.properties, findings);
        }
        DomainModel::ClosedHierarchy(hierarchy) => {
            for subtype in &hierarchy.subtypes {
                let subject = format!("{}.{}", hierarchy.name, subtype.name);
                validate_properties(&subject, &subtype.properties, findings);
            }
        }
        DomainModel::Enumeration(_) => {}
    }
}

pub(super) fn validate_interface_types(interface: &Interface, findings: &mut Findings) {
    for param in &interface.type_parameters {
        validate_type(param, &interface.name, "type parameter", findings);
    }
    for method in &interface.methods {
        validate_method(&interface.name, method, findings);
    }
}

fn validate_properties(subject: &str, properties: &[Property], findings: &mut Findings) {
    for property in properties {
        let context = format!("property `{}`", property.name);
        validate_type(&property.typ, subject, &context, findings);
    }
}

fn validate_method(subject: &str, method: &Method, findings: &mut Findings) {
    for param in &method.parameters {
        let context = format!("parameter `{}` of `{}`", param.name, method.name);
        validate_type(&param.typ, subject, &context, findings);
    }
    let context = format!("return type of `{}`", method.name);
    validate_type(&method.return_type, subject, &context, findings);
}

/// Reports each empty name once per occurrence.
fn validate_type(typ: &Type, subject: &str, context: &str, findings: &mut Findings) {
    match typ {
        Type::Named { name, .. } if name.trim().is_empty() => {
            findings.error(
                Rule::EmptyTypeName,
                subject,
                format!("{} has a named type with an empty name", context),
            );
        }
        _ => {}
    }
    for child in typ.children() {
        validate_type(child, subject, context, findings);
    }
}
