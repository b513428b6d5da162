use crate::error::AppError;
use std::path::Path;

/// Validates a base URL for one of the remote APIs.
///
/// The URL must be non-empty and carry an explicit `http://` or `https://`
/// scheme; `label` names the setting in the error message.
pub fn validate_base_url(label: &str, url: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::config_error(format!("{label} cannot be empty")));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{label} must start with http:// or https:// (got '{url}')"
        )));
    }

    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - Both API base URLs must be valid http(s) URLs
/// - The HTTP timeout must be at least one second
/// - A configured league id cannot be blank
/// - If a log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(
    sleeper_api_base: &str,
    llm_api_base: &str,
    league_id: &Option<String>,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    validate_base_url("Sleeper API base", sleeper_api_base)?;
    validate_base_url("LLM API base", llm_api_base)?;

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(id) = league_id
        && id.trim().is_empty()
    {
        return Err(AppError::config_error("League id cannot be empty"));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
