//! Validation of the IR against architecture rules.
//!
//! Validation never fails: findings are data. Errors block rendering under
//! the default policy, warnings never do.

mod references;
mod result;
mod structure;
mod wellformed;

pub use references::COMMON_TYPE_NAMES;
pub use result::{Issue, Rule, ValidationResult};

use tracing::debug;

use crate::ir::{ConversionOutput, DomainModel, Interface};
use result::Findings;

/// Validates a set of domain models and interfaces.
///
/// Per-entity rules and type well-formedness are local to each entity.
/// Duplicate names and cross-references are resolved within the given set
/// only, so `validate(A) + validate(B) == validate(A ++ B)` holds for sets
/// that neither share names nor reference each other's types.
pub fn validate(models: &[DomainModel], interfaces: &[Interface]) -> ValidationResult {
    let mut findings = Findings::default();

    for model in models {
        structure::validate_model(model, &mut findings);
        wellformed::validate_model_types(model, &mut findings);
    }

    for interface in interfaces {
        structure::validate_interface(interface, &mut findings);
        wellformed::validate_interface_types(interface, &mut findings);
    }

    structure::validate_declarations(models, interfaces, &mut findings);
    references::validate_references(models, interfaces, &mut findings);

    let result = findings.finish();
    debug!(
        models = models.len(),
        interfaces = interfaces.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated"
    );
    result
}

/// Validates each unit on its own and merges the results.
pub fn validate_outputs(outputs: &[ConversionOutput]) -> ValidationResult {
    outputs
        .iter()
        .map(|output| validate(&output.domain_models, &output.interfaces))
        .sum()
}
