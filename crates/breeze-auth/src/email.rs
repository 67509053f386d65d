//! Email address pattern used by the login and signup forms.

use std::sync::LazyLock;

use regex::Regex;

// local@domain.tld with a bounded local part and at least one dotted label
static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .map_err(|e| tracing::error!("Invalid email pattern: {}", e))
    .ok()
});

/// Returns true if `email` looks like a standard address.
///
/// The check is purely syntactic; surrounding whitespace is not trimmed.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "user@example.com",
            "first.last@mail.example.org",
            "name+tag@domain.io",
            "a_b%c-d@sub-domain.co",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "not-an-email",
            "missing-domain@",
            "@example.com",
            "user@localhost",
            "user@-example.com",
            "user name@example.com",
            " user@example.com",
            "user@example..com",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }
}
