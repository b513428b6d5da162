use serial_test::serial;
use sleeper_site::config::Config;
use sleeper_site::constants::env_vars;
use sleeper_site::error::AppError;
use sleeper_site::http::create_http_client_with_timeout;
use sleeper_site::narrative::LlmClient;

/// Test that narrative commands fail before any request without an API key
#[test]
#[serial]
fn test_missing_api_key() {
    let saved = std::env::var(env_vars::LLM_API_KEY).ok();
    unsafe {
        std::env::remove_var(env_vars::LLM_API_KEY);
    }

    let http = create_http_client_with_timeout(5).unwrap();
    let result = LlmClient::from_config(&Config::default(), http.clone());
    assert!(matches!(result, Err(AppError::MissingApiKey { .. })));

    unsafe {
        std::env::set_var(env_vars::LLM_API_KEY, "sk-test");
    }
    assert!(LlmClient::from_config(&Config::default(), http).is_ok());

    unsafe {
        match saved {
            Some(value) => std::env::set_var(env_vars::LLM_API_KEY, value),
            None => std::env::remove_var(env_vars::LLM_API_KEY),
        }
    }
}
