use secrecy::SecretString;
use thiserror::Error;

/// An environment variable required by the application is not set (or is blank).
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Values consisting only of whitespace are treated as missing, since an empty
/// API key is never what the caller wants to send upstream.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Same as [`get_env_var`], but wraps the value so it is never printed by `Debug`.
pub fn get_secret_env_var(name: &str) -> Result<SecretString, MissingEnvVarError> {
    get_env_var(name).map(|v| SecretString::new(v.into()))
}

/// Reads an optional environment variable, falling back to `default` when unset or blank.
pub fn env_var_or(name: &str, default: &str) -> String {
    get_env_var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    // env mutation is process-global, hence #[serial]
    #[test]
    #[serial]
    fn reads_present_variable() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_VAR", "abc") };
        assert_eq!(get_env_var("SHARED_UTILS_TEST_VAR").unwrap(), "abc");
        let secret = get_secret_env_var("SHARED_UTILS_TEST_VAR").unwrap();
        assert_eq!(secret.expose_secret(), "abc");
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_VAR") };
    }

    #[test]
    #[serial]
    fn blank_variable_counts_as_missing() {
        unsafe { std::env::set_var("SHARED_UTILS_BLANK_VAR", "   ") };
        let err = get_env_var("SHARED_UTILS_BLANK_VAR").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_BLANK_VAR");
        assert!(err.to_string().contains("SHARED_UTILS_BLANK_VAR"));
        unsafe { std::env::remove_var("SHARED_UTILS_BLANK_VAR") };
    }

    #[test]
    #[serial]
    fn fallback_is_used_when_unset() {
        unsafe { std::env::remove_var("SHARED_UTILS_UNSET_VAR") };
        assert_eq!(env_var_or("SHARED_UTILS_UNSET_VAR", "dflt"), "dflt");
    }
}
