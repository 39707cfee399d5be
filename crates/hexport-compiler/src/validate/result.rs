//! Validation findings and their monoid.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Architecture rule that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// A value wrapper without a field.
    EmptyValue,
    /// A value wrapper with more than one field.
    WideValue,
    EmptyEntity,
    EmptyHierarchy,
    DuplicateSubtype,
    EmptyEnumeration,
    DuplicateEnumValue,
    EmptyInterface,
    DuplicateMethod,
    /// Interface name without a conventional role suffix.
    InterfaceNaming,
    /// A named type whose name is empty.
    EmptyTypeName,
    /// A type referenced by a contract that nothing declares.
    UnknownType,
    /// Two domain models or interfaces of one set share a name.
    DuplicateDeclaration,
}

impl Rule {
    pub fn code(self) -> &'static str {
        match self {
            Rule::EmptyValue => "empty-value",
            Rule::WideValue => "wide-value",
            Rule::EmptyEntity => "empty-entity",
            Rule::EmptyHierarchy => "empty-hierarchy",
            Rule::DuplicateSubtype => "duplicate-subtype",
            Rule::EmptyEnumeration => "empty-enumeration",
            Rule::DuplicateEnumValue => "duplicate-enum-value",
            Rule::EmptyInterface => "empty-interface",
            Rule::DuplicateMethod => "duplicate-method",
            Rule::InterfaceNaming => "interface-naming",
            Rule::EmptyTypeName => "empty-type-name",
            Rule::UnknownType => "unknown-type",
            Rule::DuplicateDeclaration => "duplicate-declaration",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One finding about one IR entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Issue {
    pub rule: Rule,
    /// Name of the offending entity.
    pub subject: String,
    pub message: String,
}

impl Issue {
    pub fn new(rule: Rule, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.subject, self.message)
    }
}

/// Blocking errors and advisory warnings.
///
/// Forms a monoid with [`ValidationResult::empty`] as identity and
/// [`merge`](ValidationResult::merge) (also `+`) as the operation. Both lists
/// are kept sorted, so merging is commutative as well as associative and the
/// order in which per-unit results are combined never shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// The identity element.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_issues(mut errors: Vec<Issue>, mut warnings: Vec<Issue>) -> Self {
        errors.sort();
        warnings.sort();
        Self { errors, warnings }
    }

    /// No blocking errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        Self::from_issues(self.errors, self.warnings)
    }

    /// Issues produced by `rule`, errors first.
    pub fn by_rule(&self, rule: Rule) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |issue| issue.rule == rule)
    }
}

impl Add for ValidationResult {
    type Output = ValidationResult;

    fn add(self, other: ValidationResult) -> ValidationResult {
        self.merge(other)
    }
}

impl AddAssign for ValidationResult {
    fn add_assign(&mut self, other: ValidationResult) {
        let current = std::mem::take(self);
        *self = current.merge(other);
    }
}

impl Sum for ValidationResult {
    fn sum<I: Iterator<Item = ValidationResult>>(iter: I) -> Self {
        iter.fold(ValidationResult::empty(), ValidationResult::merge)
    }
}

/// Accumulates issues while the rules run.
#[derive(Debug, Default)]
pub(super) struct Findings {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Findings {
    pub(super) fn error(&mut self, rule: Rule, subject: &str, message: impl Into<String>) {
        self.errors.push(Issue::new(rule, subject, message));
    }

    pub(super) fn warning(&mut self, rule: Rule, subject: &str, message: impl Into<String>) {
        self.warnings.push(Issue::new(rule, subject, message));
    }

    pub(super) fn finish(self) -> ValidationResult {
        ValidationResult::from_issues(self.errors, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(subject: &str) -> ValidationResult {
        ValidationResult::from_issues(vec![Issue::new(Rule::EmptyHierarchy, subject, "no subtypes")], vec![])
    }

    fn warning(subject: &str) -> ValidationResult {
        ValidationResult::from_issues(vec![], vec![Issue::new(Rule::EmptyInterface, subject, "no methods")])
    }

    #[test]
    fn empty_is_identity() {
        let a = error("Shape") + warning("AuditPort");
        assert_eq!(a.clone() + ValidationResult::empty(), a);
        assert_eq!(ValidationResult::empty() + a.clone(), a);
    }

    #[test]
    fn merge_is_associative_and_commutative() {
        let a = error("Shape");
        let b = warning("AuditPort");
        let c = error("Event") + warning("Clock");

        assert_eq!((a.clone() + b.clone()) + c.clone(), a.clone() + (b.clone() + c.clone()));
        assert_eq!(a.clone() + b.clone(), b.clone() + a.clone());
        assert_eq!(
            vec![c.clone(), a.clone(), b.clone()].into_iter().sum::<ValidationResult>(),
            a + b + c
        );
    }

    #[test]
    fn validity_is_conjunction() {
        assert!(warning("AuditPort").is_valid());
        assert!(!(warning("AuditPort") + error("Shape")).is_valid());
        assert!(ValidationResult::empty().is_valid());
    }

    #[test]
    fn add_assign_merges() {
        let mut acc = ValidationResult::empty();
        acc += warning("B");
        acc += warning("A");
        let subjects: Vec<_> = acc.warnings.iter().map(|i| i.subject.as_str()).collect();
        assert_eq!(subjects, vec!["A", "B"]);
    }

    #[test]
    fn issue_display() {
        let issue = Issue::new(Rule::DuplicateMethod, "UserRepository", "method `save` is declared 2 times");
        assert_eq!(
            issue.to_string(),
            "[duplicate-method] UserRepository: method `save` is declared 2 times"
        );
    }
}
