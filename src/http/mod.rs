pub mod fetch_utils;
pub mod http_client;

pub use fetch_utils::{get_json, get_text, post_json};
pub use http_client::create_http_client_with_timeout;
