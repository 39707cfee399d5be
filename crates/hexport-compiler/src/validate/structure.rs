//! Structure validation for domain models and interfaces.
//!
//! Checks that each entity has the shape its kind promises: wrappers wrap
//! exactly one field, hierarchies and enumerations are non-empty and free of
//! duplicate cases, contracts declare each method once. Across a set, every
//! model and interface name is declared once.

use std::collections::BTreeMap;

use crate::classify::has_conventional_interface_suffix;
use crate::ir::{DomainModel, Interface};
use super::result::{Findings, Rule};

/// Validates the structure of one domain model.
pub(super) fn validate_model(model: &DomainModel, findings: &mut Findings) {
    match model {
        DomainModel::ImmutableValue(value) => match value.properties.len() {
            0 => findings.error(Rule::EmptyValue, &value.name, "value wrapper has no field"),
            1 => {}
            n => findings.warning(
                Rule::WideValue,
                &value.name,
                format!("value wrapper has {} fields; it is probably an entity", n),
            ),
        },
        DomainModel::Entity(entity) => {
            if entity.properties.is_empty() {
                findings.warning(Rule::EmptyEntity, &entity.name, "entity has no properties");
            }
        }
        DomainModel::ClosedHierarchy(hierarchy) => {
            if hierarchy.subtypes.is_empty() {
                findings.error(
                    Rule::EmptyHierarchy,
                    &hierarchy.name,
                    "closed hierarchy has no subtypes",
                );
            }
            for (name, count) in duplicates(hierarchy.subtypes.iter().map(|s| s.name.as_str())) {
                findings.error(
                    Rule::DuplicateSubtype,
                    &hierarchy.name,
                    format!("subtype `{}` is declared {} times", name, count),
                );
            }
        }
        DomainModel::Enumeration(enumeration) => {
            if enumeration.values.is_empty() {
                findings.error(
                    Rule::EmptyEnumeration,
                    &enumeration.name,
                    "enumeration has no values",
                );
            }
            for (name, count) in duplicates(enumeration.values.iter().map(String::as_str)) {
                findings.error(
                    Rule::DuplicateEnumValue,
                    &enumeration.name,
                    format!("value `{}` is declared {} times", name, count),
                );
            }
        }
    }
}

/// Validates the structure of one interface.
pub(super) fn validate_interface(interface: &Interface, findings: &mut Findings) {
    if interface.methods.is_empty() {
        findings.warning(Rule::EmptyInterface, &interface.name, "interface declares no methods");
    }

    for (name, count) in duplicates(interface.methods.iter().map(|m| m.name.as_str())) {
        findings.error(
            Rule::DuplicateMethod,
            &interface.name,
            format!("method `{}` is declared {} times", name, count),
        );
    }

    if !has_conventional_interface_suffix(&interface.name) {
        findings.warning(
            Rule::InterfaceNaming,
            &interface.name,
            "interface name has no conventional role suffix (Repository, Service, Port, ...)",
        );
    }
}

/// Reports each name shared by several models or interfaces once, listing
/// the kinds that claim it.
pub(super) fn validate_declarations(
    models: &[DomainModel],
    interfaces: &[Interface],
    findings: &mut Findings,
) {
    let declared: Vec<(&str, &str)> = models
        .iter()
        .map(|m| (m.name(), m.kind_label()))
        .chain(interfaces.iter().map(|i| (i.name.as_str(), "interface")))
        .collect();

    for (name, count) in duplicates(declared.iter().map(|(name, _)| *name)) {
        let kinds: Vec<&str> = declared
            .iter()
            .filter(|(other, _)| *other == name)
            .map(|(_, kind)| *kind)
            .collect();
        findings.error(
            Rule::DuplicateDeclaration,
            name,
            format!("declared {} times ({})", count, kinds.join(", ")),
        );
    }
}

/// Names occurring more than once, with their counts.
fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    counts.into_iter().filter(|(_, count)| *count > 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        ClosedHierarchy, Entity, Enumeration, ImmutableValue, InterfaceKind, Method, PrimitiveKind,
        Property, Subtype, Type,
    };

    fn check_model(model: DomainModel) -> crate::validate::ValidationResult {
        let mut findings = Findings::default();
        validate_model(&model, &mut findings);
        findings.finish()
    }

    fn check_interface(interface: Interface) -> crate::validate::ValidationResult {
        let mut findings = Findings::default();
        validate_interface(&interface, &mut findings);
        findings.finish()
    }

    fn string_prop(name: &str) -> Property {
        Property::new(name, Type::Primitive(PrimitiveKind::String))
    }

    fn method(name: &str) -> Method {
        Method {
            name: name.to_string(),
            type_parameters: vec![],
            parameters: vec![],
            return_type: Type::Primitive(PrimitiveKind::Unit),
            is_asynchronous: false,
            is_override: false,
        }
    }

    fn interface(name: &str, methods: Vec<Method>) -> Interface {
        Interface {
            name: name.to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            methods,
            super_interfaces: vec![],
            kind: InterfaceKind::Generic,
        }
    }

    #[test]
    fn value_field_counts() {
        let value = |properties| {
            DomainModel::ImmutableValue(ImmutableValue {
                name: "UserId".to_string(),
                namespace: String::new(),
                properties,
            })
        };

        assert!(check_model(value(vec![string_prop("value")])).is_empty());

        let empty = check_model(value(vec![]));
        assert_eq!(empty.errors[0].rule, Rule::EmptyValue);

        let wide = check_model(value(vec![string_prop("a"), string_prop("b")]));
        assert!(wide.is_valid());
        assert_eq!(wide.warnings[0].rule, Rule::WideValue);
    }

    #[test]
    fn empty_entity_is_only_a_warning() {
        let result = check_model(DomainModel::Entity(Entity {
            name: "Marker".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            properties: vec![],
            constructor_parameters: None,
        }));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn empty_hierarchy_yields_exactly_one_error() {
        let result = check_model(DomainModel::ClosedHierarchy(ClosedHierarchy {
            name: "Shape".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            subtypes: vec![],
        }));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].subject, "Shape");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicate_subtypes_and_values() {
        let subtype = |name: &str| Subtype {
            name: name.to_string(),
            type_parameters: vec![],
            properties: vec![],
            supertype_arguments: vec![],
            singleton: true,
        };
        let result = check_model(DomainModel::ClosedHierarchy(ClosedHierarchy {
            name: "Status".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            subtypes: vec![subtype("Active"), subtype("Active"), subtype("Closed")],
        }));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("`Active`"));

        let result = check_model(DomainModel::Enumeration(Enumeration {
            name: "Color".to_string(),
            namespace: String::new(),
            values: vec!["Red".to_string(), "Red".to_string(), "Blue".to_string(), "Blue".to_string()],
        }));
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn duplicate_method_reported_once_per_name() {
        let result = check_interface(interface("UserRepository", vec![method("save"), method("save")]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule, Rule::DuplicateMethod);
        assert!(result.errors[0].message.contains("`save`"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicate_declarations_reported_once_per_name() {
        let order = DomainModel::Entity(Entity {
            name: "Order".to_string(),
            namespace: String::new(),
            type_parameters: vec![],
            properties: vec![string_prop("id")],
            constructor_parameters: None,
        });
        let mut findings = Findings::default();
        validate_declarations(
            &[order.clone(), order],
            &[interface("Order", vec![method("find")]), interface("OrderRepository", vec![])],
            &mut findings,
        );
        let result = findings.finish();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule, Rule::DuplicateDeclaration);
        assert_eq!(result.errors[0].subject, "Order");
        assert_eq!(result.errors[0].message, "declared 3 times (entity, entity, interface)");
    }

    #[test]
    fn interface_warnings() {
        let result = check_interface(interface("Clock", vec![]));
        assert!(result.is_valid());
        let rules: Vec<_> = result.warnings.iter().map(|w| w.rule).collect();
        assert_eq!(rules, vec![Rule::EmptyInterface, Rule::InterfaceNaming]);
    }
}
