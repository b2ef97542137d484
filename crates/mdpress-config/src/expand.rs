//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}` (errors if unset) and `${VAR:-default}` (falls back
//! to the default when unset).

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// `field` names the config field for error messages.
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] if a `${VAR}` reference without a
/// default names an unset variable, or if a reference is unterminated.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unterminated ${ reference".to_owned(),
            });
        };
        let reference = &after[..end];

        let expanded = match reference.split_once(":-") {
            Some((name, default)) => std::env::var(name).unwrap_or_else(|_| default.to_owned()),
            None => std::env::var(reference).map_err(|_| ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{reference}}} not set"),
            })?,
        };
        result.push_str(&expanded);
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(expand_env("plain text", "f").unwrap(), "plain text");
    }

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPRESS_EXPAND_TEST", "value");
        }
        assert_eq!(
            expand_env("${MDPRESS_EXPAND_TEST}", "f").unwrap(),
            "value"
        );
        unsafe {
            std::env::remove_var("MDPRESS_EXPAND_TEST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${MDPRESS_UNSET_VAR_X:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_missing_var_errors() {
        let err = expand_env("${MDPRESS_UNSET_VAR_Y}", "server.host").unwrap_err();
        assert!(err.to_string().contains("MDPRESS_UNSET_VAR_Y"));
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_unterminated_reference_errors() {
        let err = expand_env("${OOPS", "f").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_expansion_inside_text() {
        assert_eq!(
            expand_env("http://${HOST_VAR_Z:-localhost}:3000", "f").unwrap(),
            "http://localhost:3000"
        );
    }
}
