// opti-week/client/src/config.rs
use crate::error_handler::ClientError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const MAX_BODY_BYTES_VAR: &str = "API_MAX_BODY_BYTES";
// Largest response body read into memory (64 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

// Un id doit rester un seul segment de chemin: tout sauf '-', '_' et '~' est encodé
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    max_body_bytes: usize,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Reads `API_BASE_URL` and `API_MAX_BODY_BYTES`, falling back to the
    /// local service and the default body limit.
    pub fn from_env() -> Self {
        ApiConfig::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        log::debug!("Planner API base URL: {}", base_url);

        let max_body_bytes = match lookup(MAX_BODY_BYTES_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) => limit,
                Err(e) => {
                    log::warn!(
                        "Ignoring {}='{}': {}, using {} bytes.",
                        MAX_BODY_BYTES_VAR,
                        raw,
                        e,
                        DEFAULT_MAX_BODY_BYTES
                    );
                    DEFAULT_MAX_BODY_BYTES
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        ApiConfig::new(base_url).with_max_body_bytes(max_body_bytes)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// URL of one scheduled task. The id is percent-encoded as a single
    /// path segment; an empty id is rejected.
    pub fn scheduled_task_url(&self, id: &str) -> Result<String, ClientError> {
        if id.is_empty() {
            log::warn!("Refusing to build a scheduled task URL with an empty id");
            return Err(ClientError::InvalidRequest(
                "Scheduled task id cannot be empty.".to_string(),
            ));
        }
        Ok(format!(
            "{}/scheduled-tasks/{}",
            self.base_url,
            utf8_percent_encode(id, PATH_SEGMENT)
        ))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_BASE_URL)
    }
}
