//! Naming-convention heuristics.
//!
//! Classification (interface vs. orchestrator vs. adapter, value vs. entity,
//! port detection, async detection) is static pattern matching on names, not
//! semantic resolution. Every convention lives here so the tree walking in the
//! frontend and the rules in the validator never hard-code one.

use crate::ir::{leaf_name, InfraKind, InterfaceKind};

/// Type constructors treated as effect/async wrappers.
pub const EFFECT_WRAPPERS: &[&str] = &["IO", "UIO", "URIO", "RIO", "Task", "ZIO", "Future", "F"];

/// Any type name ending with this suffix is also treated as an effect.
pub const EFFECT_SUFFIX: &str = "IO";

/// Supertypes marking a single-field unboxed wrapper.
pub const UNBOXED_SUPERTYPES: &[&str] = &["AnyVal"];

/// Annotations marking a single-field unboxed wrapper.
pub const UNBOXED_ANNOTATIONS: &[&str] = &["newtype", "unboxed"];

/// Class name suffixes of application services.
pub const ORCHESTRATOR_SUFFIXES: &[&str] = &[
    "Service",
    "UseCase",
    "Orchestrator",
    "Interactor",
    "Workflow",
    "Handler",
    "Coordinator",
    "Saga",
];

/// Type name suffixes of contracts a class can depend on.
pub const PORT_SUFFIXES: &[&str] = &[
    "Repository",
    "Repo",
    "Port",
    "Gateway",
    "Service",
    "UseCase",
    "Publisher",
    "Provider",
    "Store",
    "Client",
    "Algebra",
    "Handler",
];

/// Interface name suffixes accepted without a naming warning.
pub const INTERFACE_SUFFIXES: &[&str] = &[
    "Repository",
    "Repo",
    "Service",
    "UseCase",
    "Handler",
    "Listener",
    "Subscriber",
    "Port",
    "Gateway",
    "Publisher",
    "Provider",
    "Store",
    "Client",
    "Algebra",
];

const DATABASE_KEYWORDS: &[&str] = &[
    "Transactor",
    "DataSource",
    "Database",
    "Session",
    "Connection",
    "ConnectionPool",
    "Db",
];

const QUEUE_KEYWORDS: &[&str] = &["Producer", "Consumer", "Queue", "Topic", "Kafka"];

const HTTP_KEYWORDS: &[&str] = &["HttpClient", "Backend", "SttpBackend", "WSClient", "Http", "RestClient"];

const OTHER_INFRA_KEYWORDS: &[&str] = &["Cache", "Redis", "Storage", "Bucket", "S3", "Blob"];

/// Whether a type name denotes an effect wrapper.
///
/// Intentionally approximate: a fixed name set plus a suffix match. Renamed
/// wrappers (type aliases) are not recognized.
pub fn is_effect_type(name: &str) -> bool {
    let leaf = leaf_name(name);
    EFFECT_WRAPPERS.contains(&leaf) || (leaf.len() > EFFECT_SUFFIX.len() && leaf.ends_with(EFFECT_SUFFIX))
}

pub fn is_unboxed_supertype(name: &str) -> bool {
    UNBOXED_SUPERTYPES.contains(&leaf_name(name))
}

pub fn is_unboxed_annotation(name: &str) -> bool {
    UNBOXED_ANNOTATIONS.contains(&leaf_name(name))
}

pub fn is_orchestrator_name(name: &str) -> bool {
    has_suffix(name, ORCHESTRATOR_SUFFIXES)
}

/// Whether a dependency type name follows the contract naming convention.
pub fn is_port_type_name(name: &str) -> bool {
    has_suffix(leaf_name(name), PORT_SUFFIXES)
}

pub fn has_conventional_interface_suffix(name: &str) -> bool {
    has_suffix(name, INTERFACE_SUFFIXES)
}

/// Role of an interface, from its name.
pub fn interface_kind(name: &str) -> InterfaceKind {
    if name.ends_with("Repository") || name.ends_with("Repo") {
        InterfaceKind::Repository
    } else if name.ends_with("UseCase") {
        InterfaceKind::UseCase
    } else if name.ends_with("Handler") || name.ends_with("Listener") || name.ends_with("Subscriber") {
        InterfaceKind::EventHandler
    } else if name.ends_with("Service") {
        InterfaceKind::Service
    } else {
        InterfaceKind::Generic
    }
}

/// Infrastructure kind of a dependency type, if it looks like infrastructure.
pub fn infra_kind(type_name: &str) -> Option<InfraKind> {
    let leaf = leaf_name(type_name);
    let matches = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| leaf.ends_with(k) || leaf.starts_with(k))
    };

    if matches(DATABASE_KEYWORDS) {
        Some(InfraKind::Database)
    } else if matches(QUEUE_KEYWORDS) {
        Some(InfraKind::Queue)
    } else if matches(HTTP_KEYWORDS) {
        Some(InfraKind::Http)
    } else if matches(OTHER_INFRA_KEYWORDS) {
        Some(InfraKind::Other)
    } else {
        None
    }
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("IO", true)]
    #[case("cats.effect.IO", true)]
    #[case("Future", true)]
    #[case("ZIO", true)]
    #[case("ConnectionIO", true)]
    #[case("DBIO", true)]
    #[case("F", true)]
    #[case("Option", false)]
    #[case("Ratio", false)]
    #[case("List", false)]
    fn effect_detection(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_effect_type(name), expected);
    }

    #[rstest]
    #[case("UserRepository", InterfaceKind::Repository)]
    #[case("OrderRepo", InterfaceKind::Repository)]
    #[case("PlaceOrderUseCase", InterfaceKind::UseCase)]
    #[case("OrderPlacedHandler", InterfaceKind::EventHandler)]
    #[case("PaymentService", InterfaceKind::Service)]
    #[case("Clock", InterfaceKind::Generic)]
    fn interface_kinds(#[case] name: &str, #[case] expected: InterfaceKind) {
        assert_eq!(interface_kind(name), expected);
    }

    #[rstest]
    #[case("Transactor", Some(InfraKind::Database))]
    #[case("HikariDataSource", Some(InfraKind::Database))]
    #[case("KafkaProducer", Some(InfraKind::Queue))]
    #[case("SttpBackend", Some(InfraKind::Http))]
    #[case("HttpClient", Some(InfraKind::Http))]
    #[case("RedisClient", Some(InfraKind::Other))]
    #[case("Clock", None)]
    #[case("UserRepository", None)]
    fn infra_kinds(#[case] name: &str, #[case] expected: Option<InfraKind>) {
        assert_eq!(infra_kind(name), expected);
    }

    #[test]
    fn port_names_use_leaf_segment() {
        assert!(is_port_type_name("com.acme.UserRepository"));
        assert!(is_port_type_name("PaymentGateway"));
        assert!(!is_port_type_name("Clock"));
        assert!(!is_port_type_name("Repository.Config"));
    }

    #[test]
    fn orchestrator_suffixes() {
        assert!(is_orchestrator_name("RegisterUserService"));
        assert!(is_orchestrator_name("CheckoutWorkflow"));
        assert!(!is_orchestrator_name("PostgresUserRepository"));
    }
}
