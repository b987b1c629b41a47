//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_dialog_idle_secs() -> u64 {
    30 * 60
}

const fn default_max_dialog_sessions() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for handling one request, outbound calls included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// A Variant B dialog untouched for this long is dropped.
    #[serde(default = "default_dialog_idle_secs")]
    pub dialog_idle_secs: u64,

    /// Upper bound on live dialogs; the least recently used one goes first.
    #[serde(default = "default_max_dialog_sessions")]
    pub max_dialog_sessions: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            dialog_idle_secs: default_dialog_idle_secs(),
            max_dialog_sessions: default_max_dialog_sessions(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
