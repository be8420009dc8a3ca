use std::collections::HashMap;

use crate::chat::Transcript;
use crate::core::AppConfig;

pub struct AppState {
    // Chat sessions keyed by session ID. Sessions live in memory for
    // the lifetime of the process and are independent of each other.
    pub sessions: HashMap<String, Transcript>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }
}
