//! Input validation shared by the session and the interactive shell.

use farelog_error::{FareError, Result};
use farelog_types::limits::MAX_NAME_BYTES;

/// Whether `name` is an acceptable passenger name: alphabetic
/// characters and interior spaces only, at least one non-space
/// character, no leading whitespace, and short enough for the fixed
/// record field.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    if name.len() > MAX_NAME_BYTES {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        None => return false,
        Some(first) if first.is_whitespace() => return false,
        Some(first) if first != ' ' && !first.is_alphabetic() => return false,
        Some(_) => {}
    }
    if !name.chars().all(|c| c == ' ' || c.is_alphabetic()) {
        return false;
    }
    name.chars().any(|c| c != ' ')
}

/// Validate a passenger name, passing it through unchanged so callers
/// can chain into the record field.
pub fn validate_name(name: &str) -> Result<&str> {
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(FareError::InvalidName {
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_spaced_names() {
        assert!(is_valid_name("Asha"));
        assert!(is_valid_name("Ravi Kumar"));
        assert!(is_valid_name("A"));
    }

    #[test]
    fn rejects_empty_and_space_only() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
    }

    #[test]
    fn rejects_leading_space_and_digits() {
        assert!(!is_valid_name(" Asha"));
        assert!(!is_valid_name("Asha2"));
        assert!(!is_valid_name("R@vi"));
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(MAX_NAME_BYTES + 1);
        assert!(!is_valid_name(&long));
        assert!(is_valid_name(&"a".repeat(MAX_NAME_BYTES)));
    }

    #[test]
    fn validate_reports_user_error() {
        let err = validate_name("123").unwrap_err();
        assert!(err.is_user_error());
    }
}
