//! Shared webhook secret.

use std::fmt;

/// The secret shared out-of-band with a webhook sender.
///
/// The bytes are only reachable through [`as_bytes`](Self::as_bytes);
/// `Debug` output is redacted and there is no `Display` or `Serialize`.
#[derive(Clone)]
pub struct WebhookSecret {
    secret: Box<[u8]>,
}

impl WebhookSecret {
    /// Wrap raw secret bytes.
    pub fn new(secret: impl Into<Box<[u8]>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret key bytes for HMAC signing.
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl From<&str> for WebhookSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for WebhookSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<Vec<u8>> for WebhookSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for WebhookSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
