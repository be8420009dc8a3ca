use std::env;

/// Configuration read from the environment at startup. The API key is
/// the only secret; everything else has a default. The persona system
/// message is compiled into the chat core and is deliberately not
/// configurable.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname =
            env::var("PARLEY_LLM_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key = env::var("OPENAI_API_KEY").expect("Missing env var OPENAI_API_KEY");
        let openai_model = env::var("PARLEY_LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
        }
    }
}
