//! TOML file configuration structures.
//!
//! These structs directly map to the `hookseal.toml` file format.

use serde::{Deserialize, Serialize};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Webhook verification section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Secret shared with the webhook sender.
    #[serde(default)]
    pub secret: Option<String>,
    /// Reject payloads that arrive without a signature header.
    #[serde(default = "default_require_signature")]
    pub require_signature: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            require_signature: default_require_signature(),
        }
    }
}

fn default_require_signature() -> bool {
    true
}
