//! Client-side password policy.

/// Characters that satisfy the "special character" rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>?/`~";

/// Minimum password length, in characters.
pub const MIN_LENGTH: usize = 8;

/// Number of rules in the policy.
pub const RULE_COUNT: usize = 5;

/// Returns the descriptions of every rule `password` does not meet.
///
/// An empty result means the password satisfies the whole policy.
pub fn check_password(password: &str) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if password.chars().count() < MIN_LENGTH {
        missing.push("at least 8 characters");
    }
    if !password.chars().any(char::is_uppercase) {
        missing.push("one uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        missing.push("one lowercase letter");
    }
    // Any script's decimal digits count, e.g. Persian ۱ or Arabic-Indic ١
    if !password.chars().any(char::is_numeric) {
        missing.push("one digit");
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        missing.push("one special character");
    }
    missing
}

/// Strength classification shown under the signup password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Classify a password from its unmet rules.
    pub fn of(password: &str) -> Self {
        let missing = check_password(password).len();
        if missing == 0 {
            Self::Strong
        } else if met_fraction(missing) >= 0.6 {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

/// Fraction of rules met, in `0.0..=1.0`, for the strength meter.
pub fn strength_fraction(password: &str) -> f32 {
    met_fraction(check_password(password).len())
}

fn met_fraction(missing: usize) -> f32 {
    let met = RULE_COUNT.saturating_sub(missing);
    (met as f32 / RULE_COUNT as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_password_has_no_missing_rules() {
        assert!(check_password("Abcdef1!").is_empty());
        assert_eq!(PasswordStrength::of("Abcdef1!"), PasswordStrength::Strong);
    }

    #[test]
    fn reports_each_missing_rule() {
        let cases: &[(&str, &[&str])] = &[
            ("Abcdef1", &["at least 8 characters", "one special character"]),
            ("abcdefg1!", &["one uppercase letter"]),
            ("ABCDEFG1!", &["one lowercase letter"]),
            ("Abcdefgh!", &["one digit"]),
            ("Abcdefgh1", &["one special character"]),
            ("Abcdefg\u{06F1}!", &[]),
            ("Abcdefg\u{0661}!", &[]),
            (
                "",
                &[
                    "at least 8 characters",
                    "one uppercase letter",
                    "one lowercase letter",
                    "one digit",
                    "one special character",
                ],
            ),
        ];

        for (password, expected) in cases {
            assert_eq!(&check_password(password), expected, "password {:?}", password);
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Seven multi-byte characters are still too short.
        assert!(check_password("Äbcdé1!").contains(&"at least 8 characters"));
        assert!(check_password("Äbcdéf1!").is_empty());
    }

    #[test]
    fn backslash_is_not_a_special_character() {
        assert_eq!(check_password("Abcdefg1\\"), vec!["one special character"]);
    }

    #[test]
    fn strength_labels_follow_met_fraction() {
        let cases = [
            ("Abcdef1!", PasswordStrength::Strong),
            // 4 of 5 met
            ("Abcdefg1", PasswordStrength::Medium),
            // 3 of 5 met
            ("abcdefg1", PasswordStrength::Medium),
            // 2 of 5 met
            ("abcdefgh", PasswordStrength::Weak),
            // 1 of 5 met
            ("abc", PasswordStrength::Weak),
            ("", PasswordStrength::Weak),
        ];

        for (password, expected) in cases {
            assert_eq!(PasswordStrength::of(password), expected, "password {:?}", password);
        }
    }

    #[test]
    fn strength_fraction_matches_rules_met() {
        assert_eq!(strength_fraction("Abcdef1!"), 1.0);
        assert_eq!(strength_fraction("abcdefg1"), 0.6);
        assert_eq!(strength_fraction(""), 0.0);
    }

    #[test]
    fn labels() {
        assert_eq!(PasswordStrength::Weak.label(), "Weak");
        assert_eq!(PasswordStrength::Medium.label(), "Medium");
        assert_eq!(PasswordStrength::Strong.label(), "Strong");
    }
}
