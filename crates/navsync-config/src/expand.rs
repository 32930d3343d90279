//! Environment variable expansion for manifest path values.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a path value.
///
/// Values without a `${` sequence are returned unchanged, so bare `$VAR`
/// in a plain path is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVSYNC_TEST_SITE_DIR", "site");
        }
        let result = expand_env("${NAVSYNC_TEST_SITE_DIR}/mkdocs.yml", "navsync.mkdocs").unwrap();
        assert_eq!(result, "site/mkdocs.yml");
        unsafe {
            std::env::remove_var("NAVSYNC_TEST_SITE_DIR");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVSYNC_TEST_UNSET_CONFIG");
        }
        let result =
            expand_env("${NAVSYNC_TEST_UNSET_CONFIG:-docgen.json}", "navsync.config").unwrap();
        assert_eq!(result, "docgen.json");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVSYNC_TEST_MISSING");
        }
        let err = expand_env("${NAVSYNC_TEST_MISSING}", "navsync.mkdocs").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NAVSYNC_TEST_MISSING"));
        assert!(err.to_string().contains("navsync.mkdocs"));
    }

    #[test]
    fn test_plain_path_unchanged() {
        let result = expand_env("docs/$weird/mkdocs.yml", "navsync.mkdocs").unwrap();
        assert_eq!(result, "docs/$weird/mkdocs.yml");
    }
}
