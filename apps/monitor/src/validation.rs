use std::sync::LazyLock;

use regex::Regex;

use crate::registry::ServerRecord;

/// Loose domain match. Unanchored: any substring of the form
/// `label.tld` is enough, trailing path-like characters are tolerated.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_\+.~#?&/=]*)",
    )
    .expect("domain pattern is a valid regex")
});

/// Strict dotted quad, each octet 0-255
static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("ipv4 pattern is a valid regex")
});

/// Validation results with specific error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(msg.into()) }
    }
}

/// Per-field outcome of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCheck {
    pub name: ValidationResult,
    pub host: ValidationResult,
}

impl RegistrationCheck {
    pub fn is_valid(&self) -> bool {
        self.name.is_valid && self.host.is_valid
    }
}

/// Validate a server name against the existing registry.
///
/// Uniqueness is an exact, case-sensitive comparison; no trimming.
pub fn validate_server_name(name: &str, existing: &[ServerRecord]) -> ValidationResult {
    if name.is_empty() {
        return ValidationResult::err("Name cannot be empty");
    }

    if existing.iter().any(|server| server.name == name) {
        return ValidationResult::err(format!("A server named '{name}' already exists"));
    }

    ValidationResult::ok()
}

/// Validate a server host: a domain name or a strict IPv4 literal
pub fn validate_server_host(host: &str) -> ValidationResult {
    if host.is_empty() {
        return ValidationResult::err("Host cannot be empty");
    }

    if is_ipv4_literal(host) || is_domain_like(host) {
        ValidationResult::ok()
    } else {
        ValidationResult::err("Host must be a domain name or an IPv4 address")
    }
}

/// Run both predicates; both fields are always evaluated so the form can
/// flag each one independently.
pub fn validate_registration(
    name: &str,
    host: &str,
    existing: &[ServerRecord],
) -> RegistrationCheck {
    RegistrationCheck {
        name: validate_server_name(name, existing),
        host: validate_server_host(host),
    }
}

pub fn is_ipv4_literal(host: &str) -> bool {
    IPV4_REGEX.is_match(host)
}

pub fn is_domain_like(host: &str) -> bool {
    DOMAIN_REGEX.is_match(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> Vec<ServerRecord> {
        names.iter().map(|n| ServerRecord::new(*n, "example.com")).collect()
    }

    #[test]
    fn test_name_validation() {
        let existing = registry(&["web"]);

        assert!(validate_server_name("db", &existing).is_valid);
        assert!(validate_server_name("Web", &existing).is_valid); // case-sensitive
        assert!(validate_server_name(" web", &existing).is_valid); // no trimming

        assert!(!validate_server_name("", &existing).is_valid);
        assert!(!validate_server_name("web", &existing).is_valid);
    }

    #[test]
    fn test_duplicate_name_message() {
        let result = validate_server_name("web", &registry(&["web"]));
        assert_eq!(result.error.as_deref(), Some("A server named 'web' already exists"));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_domain_hosts() {
        assert!(validate_server_host("example.com").is_valid);
        assert!(validate_server_host("sub.example.co.uk").is_valid);
        assert!(validate_server_host("my-host.internal.io").is_valid);
        assert!(validate_server_host("example.com/status?x=1").is_valid);
        assert!(validate_server_host("example.com:8080").is_valid);
    }

    #[test]
    fn test_ipv4_hosts() {
        assert!(is_ipv4_literal("10.0.0.5"));
        assert!(is_ipv4_literal("255.255.255.255"));
        assert!(is_ipv4_literal("0.0.0.0"));
        assert!(is_ipv4_literal("01.002.3.4"));

        assert!(!is_ipv4_literal("256.1.1.1"));
        assert!(!is_ipv4_literal("1.2.3"));
        assert!(!is_ipv4_literal("1.2.3.4.5"));
        assert!(!is_ipv4_literal(" 1.2.3.4"));
    }

    #[test]
    fn test_rejected_hosts() {
        assert!(!validate_server_host("").is_valid);
        assert!(!validate_server_host("not a host!!").is_valid);
        assert!(!validate_server_host("localhost").is_valid);
        assert!(!validate_server_host("example.").is_valid);
        assert!(!validate_server_host("example.abcdefgh").is_valid);
    }

    #[test]
    fn test_out_of_range_ip_still_passes_as_domain_shape() {
        // Falls through to the loose domain pattern: "999.1.1" has a dot and a
        // numeric "tld".
        assert!(!is_ipv4_literal("999.1.1.1"));
        assert!(validate_server_host("999.1.1.1").is_valid);
    }

    #[test]
    fn test_registration_reports_both_fields() {
        let existing = registry(&["web"]);

        let check = validate_registration("web", "not a host!!", &existing);
        assert!(!check.is_valid());
        assert!(!check.name.is_valid);
        assert!(!check.host.is_valid);

        let check = validate_registration("db", "10.0.0.5", &existing);
        assert!(check.is_valid());
    }
}
