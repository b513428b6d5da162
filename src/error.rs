use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Payload errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    // LLM output that does not fit the expected records
    #[error("Completion response does not match the {schema} schema: {message}")]
    SchemaMismatch { schema: String, message: String },

    #[error("Missing API key: set the {var} environment variable")]
    MissingApiKey { var: String },

    #[error("Week file not found: {path}")]
    WeekFileNotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a schema mismatch error for a completion payload
    pub fn schema_mismatch(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create a missing API key error for the given environment variable
    pub fn missing_api_key(var: impl Into<String>) -> Self {
        Self::MissingApiKey { var: var.into() }
    }

    /// Create a week file not found error
    pub fn week_file_not_found(path: impl Into<String>) -> Self {
        Self::WeekFileNotFound { path: path.into() }
    }

    /// Check if the error came from talking to a remote API (status, transport or payload)
    pub fn is_remote_fetch(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::ApiNotFound { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiRateLimit { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiMalformedJson { .. }
                | AppError::ApiUnexpectedStructure { .. }
                | AppError::ApiNoData { .. }
        )
    }

    /// Check if the error is a completion payload that failed validation
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, AppError::SchemaMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/league/1/users");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/league/1/users"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_client_error_helper() {
        let error = AppError::api_client_error(401, "Unauthorized", "https://api.example.com");
        assert!(matches!(error, AppError::ApiClientError { status: 401, .. }));
        assert_eq!(
            error.to_string(),
            "API client error (401): Unauthorized (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too many requests", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too many requests (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_network_helpers() {
        let timeout = AppError::network_timeout("https://api.example.com");
        assert_eq!(
            timeout.to_string(),
            "Network timeout while fetching data from: https://api.example.com"
        );

        let connection = AppError::network_connection("https://api.example.com", "refused");
        assert_eq!(
            connection.to_string(),
            "Connection failed to: https://api.example.com - refused"
        );
    }

    #[test]
    fn test_schema_mismatch_helper() {
        let error = AppError::schema_mismatch("power rankings", "missing field `summary`");
        assert!(error.is_schema_mismatch());
        assert!(!error.is_remote_fetch());
        assert_eq!(
            error.to_string(),
            "Completion response does not match the power rankings schema: missing field `summary`"
        );
    }

    #[test]
    fn test_missing_api_key_helper() {
        let error = AppError::missing_api_key("OPENAI_API_KEY");
        assert_eq!(
            error.to_string(),
            "Missing API key: set the OPENAI_API_KEY environment variable"
        );
    }

    #[test]
    fn test_week_file_not_found_helper() {
        let error = AppError::week_file_not_found("docs/data/2025/week3/power_rankings.json");
        assert!(matches!(error, AppError::WeekFileNotFound { .. }));
        assert!(error.to_string().contains("week3/power_rankings.json"));
    }

    #[test]
    fn test_is_remote_fetch_classification() {
        let remote_errors = vec![
            AppError::api_not_found("u"),
            AppError::api_server_error(500, "m", "u"),
            AppError::api_client_error(400, "m", "u"),
            AppError::api_rate_limit("m", "u"),
            AppError::network_timeout("u"),
            AppError::network_connection("u", "m"),
            AppError::api_malformed_json("m", "u"),
            AppError::api_unexpected_structure("m", "u"),
            AppError::api_no_data("m", "u"),
        ];
        for error in remote_errors {
            assert!(error.is_remote_fetch(), "{error:?} should be a remote fetch error");
        }

        let local_errors = vec![
            AppError::config_error("bad"),
            AppError::schema_mismatch("s", "m"),
            AppError::week_file_not_found("p"),
            AppError::Io(std::io::Error::other("disk")),
        ];
        for error in local_errors {
            assert!(!error.is_remote_fetch(), "{error:?} should not be a remote fetch error");
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert!(app_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::Json(_)));
        assert!(app_error.to_string().starts_with("Failed to parse JSON"));
    }
}
