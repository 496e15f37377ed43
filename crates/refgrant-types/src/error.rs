//! Unified error code interface.
//!
//! Every refgrant error type implements [`ErrorCode`] so that callers
//! embedding the engine can route failures programmatically (form
//! validation messages, retry decisions, monitoring) without matching
//! on concrete enum variants across crates.

/// Machine-readable error metadata.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, e.g. `"STORE_UNAVAILABLE"`
/// - **Prefixed by concern**: `SETTINGS_*`, `STORE_*`, `LOADER_*`
/// - **Stable**: a code is an API contract and never changes once shipped
///
/// # Recoverability
///
/// Recoverable means a retry or a user action can succeed without a
/// code or configuration change: a store outage is recoverable, an
/// unsupported target kind is not.
///
/// # Example
///
/// ```
/// use refgrant_types::ErrorCode;
///
/// #[derive(Debug)]
/// enum DemoError {
///     Unavailable,
///     BadKind,
/// }
///
/// impl ErrorCode for DemoError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::Unavailable => "DEMO_UNAVAILABLE",
///             Self::BadKind => "DEMO_BAD_KIND",
///         }
///     }
///
///     fn is_recoverable(&self) -> bool {
///         matches!(self, Self::Unavailable)
///     }
/// }
///
/// assert_eq!(DemoError::BadKind.code(), "DEMO_BAD_KIND");
/// assert!(!DemoError::BadKind.is_recoverable());
/// ```
pub trait ErrorCode {
    /// Returns the stable machine-readable code.
    fn code(&self) -> &'static str;

    /// Returns whether a retry or user action can succeed.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that every error's code is well-formed and carries the
/// expected prefix. Intended for tests covering all variants of an
/// error enum.
///
/// # Panics
///
/// Panics with a descriptive message on the first violation.
///
/// # Example
///
/// ```
/// use refgrant_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum DemoError { A, B }
///
/// impl ErrorCode for DemoError {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "DEMO_A",
///             Self::B => "DEMO_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[DemoError::A, DemoError::B], "DEMO_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        let code = err.code();
        assert!(!code.is_empty(), "error code must not be empty");
        assert!(
            code.starts_with(expected_prefix),
            "error code '{code}' must start with prefix '{expected_prefix}'"
        );
        assert!(
            is_upper_snake_case(code),
            "error code '{code}' must be UPPER_SNAKE_CASE"
        );
    }
}

/// Checks UPPER_SNAKE_CASE: uppercase ASCII, digits and single
/// underscores, with no leading/trailing underscore.
fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl ErrorCode for TestError {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "TEST_TRANSIENT",
                Self::Permanent => "TEST_PERMANENT",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn trait_reports_code_and_recoverability() {
        assert_eq!(TestError::Transient.code(), "TEST_TRANSIENT");
        assert!(TestError::Transient.is_recoverable());
        assert!(!TestError::Permanent.is_recoverable());
    }

    #[test]
    fn assert_error_codes_accepts_valid_codes() {
        assert_error_codes(&[TestError::Transient, TestError::Permanent], "TEST_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn assert_error_codes_rejects_wrong_prefix() {
        assert_error_codes(&[TestError::Transient], "OTHER_");
    }

    #[test]
    fn upper_snake_case_rules() {
        assert!(is_upper_snake_case("STORE_UNAVAILABLE"));
        assert!(is_upper_snake_case("A_B_2"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("store_unavailable"));
        assert!(!is_upper_snake_case("_STORE"));
        assert!(!is_upper_snake_case("STORE_"));
        assert!(!is_upper_snake_case("STORE__X"));
    }
}
