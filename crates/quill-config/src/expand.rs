//! Environment variable expansion for configuration strings.

use std::convert::Infallible;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// Bare `$VAR` is left untouched, so shell-style paths and URLs containing
/// a dollar sign pass through unchanged. An unset variable without a
/// default is an error naming both the variable and the config field.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut unset = Vec::new();
    let lookup = |var: &str| -> Result<Option<String>, Infallible> {
        let found = std::env::var(var).ok();
        if found.is_none() {
            unset.push(var.to_owned());
        }
        Ok(found)
    };
    let expanded = shellexpand::env_with_context(value, lookup)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })?
        .into_owned();

    // Unset references without a default are left verbatim by the expander.
    if let Some(var) = unset
        .iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}
