//! Cross-reference pass over contract signatures.
//!
//! Advisory only: a contract mentioning a type that no domain model of the
//! validated set declares is worth a look, but may well be a library type.

use std::collections::{BTreeSet, HashSet};

use crate::ir::{is_type_path, leaf_name, DomainModel, Interface, PrimitiveKind, Type};
use super::result::{Findings, Rule};

/// Library and platform type names accepted without a declaration.
///
/// Hard-coded for the Scala to Kotlin pair; not configurable per target.
pub const COMMON_TYPE_NAMES: &[&str] = &[
    "Option",
    "Some",
    "List",
    "Seq",
    "Vector",
    "Set",
    "Map",
    "Either",
    "Try",
    "Throwable",
    "Exception",
    "UUID",
    "Instant",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "ZonedDateTime",
    "OffsetDateTime",
    "Duration",
    "FiniteDuration",
    "URI",
    "URL",
    "Array",
    "NonEmptyList",
    "Stream",
];

pub(super) fn validate_references(
    models: &[DomainModel],
    interfaces: &[Interface],
    findings: &mut Findings,
) {
    let known: HashSet<&str> = models
        .iter()
        .flat_map(DomainModel::declared_names)
        .chain(PrimitiveKind::ALL.iter().map(|k| k.name()))
        .chain(COMMON_TYPE_NAMES.iter().copied())
        .collect();

    for interface in interfaces {
        let mut referenced = BTreeSet::new();
        for method in &interface.methods {
            // Higher-kinded parameters applied to arguments (`F[Int]`) convert
            // to named types, so bound names are dropped here.
            let bound: HashSet<&str> = type_parameter_names(&interface.type_parameters)
                .chain(type_parameter_names(&method.type_parameters))
                .collect();
            let mut names = BTreeSet::new();
            for param in &method.parameters {
                collect_names(&param.typ, &mut names);
            }
            collect_names(&method.return_type, &mut names);
            referenced.extend(names.into_iter().filter(|n| !bound.contains(n)));
        }

        for name in referenced.into_iter().filter(|n| !known.contains(n)) {
            findings.warning(
                Rule::UnknownType,
                &interface.name,
                format!("references `{}`, which is neither a domain model nor a common type", name),
            );
        }
    }
}

fn type_parameter_names(params: &[Type]) -> impl Iterator<Item = &str> {
    params.iter().filter_map(|param| match param {
        Type::TypeParameter { name, .. } => Some(name.as_str()),
        _ => None,
    })
}

/// Leaf names of every named type in `typ`. Raw source text is skipped.
fn collect_names<'a>(typ: &'a Type, names: &mut BTreeSet<&'a str>) {
    if let Type::Named { name, .. } = typ {
        if is_type_path(name) {
            names.insert(leaf_name(name));
        }
    }
    // Type parameters and their bounds are resolved by the declaring scope.
    if matches!(typ, Type::TypeParameter { .. }) {
        return;
    }
    for child in typ.children() {
        collect_names(child, names);
    }
}
