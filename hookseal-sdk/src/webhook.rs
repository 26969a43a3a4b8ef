//! Turning a received webhook into an [`Event`].
//!
//! [`construct_event`] decodes the payload and, when a signature header is
//! supplied, checks it with [`verify_header`] before handing the event back.

use serde_json::Value;

use crate::objects::event::Event;
use crate::secret::WebhookSecret;
use crate::signature::verify_header;

/// Errors produced while constructing an event from a webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The payload is not a JSON object.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The call was set up incorrectly, e.g. a header without a secret.
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    /// No signature in the header matched the payload.
    ///
    /// Carries the header and payload for the caller's diagnostics. The
    /// secret and the expected signatures are never included.
    #[error("no valid signature found in signature header")]
    SignatureVerification {
        sig_header: String,
        http_body: String,
        json_body: Value,
    },
}

/// Decode a webhook payload into an [`Event`], verifying its signature
/// header when one is given.
///
/// * `payload` – the raw request body, exactly as received.
/// * `sig_header` – value of the signature header, or `None` to skip
///   verification (for channels authenticated some other way).
/// * `secret` – the secret shared with the sender; required whenever
///   `sig_header` is present.
///
/// # Example
///
/// ```
/// use hookseal_sdk::{WebhookSecret, construct_event, generate_header};
///
/// let payload = r#"{"id":"evt_test_webhook","object":"event"}"#;
/// let secret = WebhookSecret::from("hunter2");
/// let header = generate_header(payload, &secret);
///
/// let event = construct_event(payload, Some(&header), Some(&secret)).unwrap();
/// assert_eq!(event.id(), Some("evt_test_webhook"));
/// ```
pub fn construct_event(
    payload: impl AsRef<[u8]>,
    sig_header: Option<&str>,
    secret: Option<&WebhookSecret>,
) -> Result<Event, WebhookError> {
    let payload = payload.as_ref();

    let json_body: Value = serde_json::from_slice(payload).map_err(WebhookError::MalformedPayload)?;
    let Value::Object(values) = &json_body else {
        return Err(WebhookError::MalformedPayload(serde::de::Error::custom(
            "expected a JSON object",
        )));
    };
    let event = Event::construct_from(values.clone());

    let Some(sig_header) = sig_header else {
        tracing::debug!(event_id = ?event.id(), "No signature header, skipping verification");
        return Ok(event);
    };

    let Some(secret) = secret else {
        return Err(WebhookError::Configuration(
            "secret required to verify signatures",
        ));
    };

    if !verify_header(payload, sig_header, secret) {
        tracing::warn!(
            event_id = ?event.id(),
            header_len = sig_header.len(),
            "Webhook signature verification failed"
        );
        return Err(WebhookError::SignatureVerification {
            sig_header: sig_header.to_owned(),
            http_body: String::from_utf8_lossy(payload).into_owned(),
            json_body,
        });
    }

    tracing::debug!(event_id = ?event.id(), "Webhook signature verified");
    Ok(event)
}
