use std::fmt::Display;

use crate::error::ValidationError;

/// Check `value` against a fixed allow-list.
///
/// The error names `label`, the allow-list comma-joined in declared order,
/// and the offending value.
pub fn validate_enum<V>(value: &V, allowed: &[V], label: &str) -> Result<(), ValidationError>
where
    V: PartialEq + Display,
{
    if allowed.iter().any(|candidate| candidate == value) {
        return Ok(());
    }
    Err(invalid_value(label, allowed, value))
}

pub(super) fn invalid_value<V, A>(label: &str, allowed: &[A], actual: &V) -> ValidationError
where
    V: Display + ?Sized,
    A: Display,
{
    ValidationError::InvalidValue {
        label: label.to_owned(),
        expected: join(allowed),
        actual: actual.to_string(),
    }
}

fn join<A: Display>(allowed: &[A]) -> String {
    allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_listed_values() {
        assert!(validate_enum(&1, &[0, 1, 2], "Verbosity").is_ok());
        assert!(
            validate_enum(&"bech32", &["legacy", "p2sh-segwit", "bech32"], "Address type").is_ok()
        );
    }

    #[test]
    fn rejects_integer_outside_list() {
        let err = validate_enum(&4, &[0, 1, 2], "Verbosity").expect_err("4 is not allowed");
        assert_eq!(
            err.to_string(),
            "Verbosity has invalid value. Expected values are: 0,1,2, actual: 4"
        );
    }

    #[test]
    fn string_match_is_case_sensitive() {
        let err = validate_enum(&"economical", &["UNSET", "ECONOMICAL", "CONSERVATIVE"], "Mode")
            .expect_err("lowercase must be rejected");
        assert_eq!(
            err.to_string(),
            "Mode has invalid value. Expected values are: UNSET,ECONOMICAL,CONSERVATIVE, actual: economical"
        );
    }
}
