use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slugs of insights and case studies
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "scaling-ops-2024", "pricing", "a-b-c"
    /// - Invalid: "-pricing", "pricing-", "pricing--2024", "Pricing", "pricing_2024"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Six ASCII digits
    pub static ref VERIFICATION_CODE_REGEX: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("scaling-ops-2024"));
        assert!(SLUG_REGEX.is_match("pricing"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("abc123"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-pricing")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("pricing-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("pricing--2024")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Pricing")); // uppercase
        assert!(!SLUG_REGEX.is_match("pricing_2024")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("my post")); // space
    }

    #[test]
    fn test_username_regex() {
        assert!(USERNAME_REGEX.is_match("alice"));
        assert!(USERNAME_REGEX.is_match("_admin"));
        assert!(!USERNAME_REGEX.is_match("1alice"));
        assert!(!USERNAME_REGEX.is_match("alice smith"));
    }

    #[test]
    fn test_verification_code_regex() {
        assert!(VERIFICATION_CODE_REGEX.is_match("004213"));
        assert!(!VERIFICATION_CODE_REGEX.is_match("12345"));
        assert!(!VERIFICATION_CODE_REGEX.is_match("12345a"));
        assert!(!VERIFICATION_CODE_REGEX.is_match("1234567"));
    }
}
