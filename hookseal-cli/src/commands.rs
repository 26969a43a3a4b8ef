//! `verify` and `sign` subcommands.

use crate::config::{ConfigError, LoadedConfig};
use anyhow::bail;
use hookseal_sdk::{Event, WebhookError, construct_event, generate_header};
use std::io::Read;
use std::path::Path;

/// Read a payload verbatim from `path`, or from stdin when `path` is `-`.
pub fn read_payload(path: &Path) -> std::io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut payload = Vec::new();
        std::io::stdin().lock().read_to_end(&mut payload)?;
        Ok(payload)
    } else {
        std::fs::read(path)
    }
}

/// Verify `payload` against `header` and decode it.
pub fn verify(
    payload: &[u8],
    header: Option<&str>,
    config: &LoadedConfig,
) -> anyhow::Result<Event> {
    if header.is_none() && config.require_signature {
        bail!("signature header required (pass --header or set require_signature = false)");
    }

    construct_event(payload, header, config.secret.as_ref()).map_err(|e| {
        match &e {
            WebhookError::SignatureVerification { sig_header, .. } => {
                tracing::error!(%sig_header, "No valid signature found for payload");
            }
            other => tracing::error!(error = %other, "Failed to construct event"),
        }
        e.into()
    })
}

/// Produce a signature header for `payload`.
pub fn sign(payload: &[u8], config: &LoadedConfig) -> Result<String, ConfigError> {
    Ok(generate_header(payload, config.require_secret()?))
}
