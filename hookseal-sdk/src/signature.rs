//! Signature schemes and header verification for inbound webhooks.
//!
//! A sender signs the raw request body and attaches one or more signatures
//! in a single header:
//!
//! ```text
//! Hookseal-Signature: v1={hex},v1={hex},v0={hex}
//! ```
//!
//! Every entry names the scheme it was computed with. The same scheme may
//! appear several times (one entry per active secret while the sender
//! rotates keys), and entries naming schemes unknown to this crate are
//! ignored rather than rejected.
//!
//! Currently registered schemes:
//!
//! * **`v1`**: `hex(HMAC-SHA256(payload, secret))`, lowercase.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::secret::WebhookSecret;

/// Conventional header name carrying webhook signatures.
pub const SIGNATURE_HEADER: &str = "Hookseal-Signature";

// ---------------------------------------------------------------------------
// Scheme registry
// ---------------------------------------------------------------------------

/// A signature scheme this crate knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// HMAC-SHA256 over the raw payload bytes, lowercase hex.
    V1,
}

impl Scheme {
    /// Every registered scheme, in the order expected signatures are
    /// computed.
    pub const ALL: &'static [Scheme] = &[Scheme::V1];

    /// Look up a scheme by its header identifier (e.g. `"v1"`).
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "v1" => Some(Self::V1),
            _ => None,
        }
    }

    /// The identifier used for this scheme in signature headers.
    pub const fn id(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }

    /// Compute this scheme's signature of `payload` under `secret`.
    pub fn compute(self, payload: &[u8], secret: &WebhookSecret) -> String {
        match self {
            Self::V1 => hmac_sha256_hex(payload, secret.as_bytes()),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn hmac_sha256_hex(payload: &[u8], key: &[u8]) -> String {
    let tag = ring::hmac::sign(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
        payload,
    );
    hex::encode(tag.as_ref())
}

// ---------------------------------------------------------------------------
// Expected signatures
// ---------------------------------------------------------------------------

/// The signature every registered scheme expects for one payload.
#[derive(Clone, PartialEq, Eq)]
pub struct ExpectedSignatures {
    signatures: Vec<(Scheme, String)>,
}

impl ExpectedSignatures {
    /// The expected hex signature for `scheme`.
    pub fn get(&self, scheme: Scheme) -> Option<&str> {
        self.signatures
            .iter()
            .find(|(s, _)| *s == scheme)
            .map(|(_, sig)| sig.as_str())
    }

    /// Iterate over `(scheme, hex_signature)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Scheme, &str)> {
        self.signatures.iter().map(|(s, sig)| (*s, sig.as_str()))
    }
}

impl fmt::Debug for ExpectedSignatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.signatures.iter().map(|(s, _)| (s.id(), "[REDACTED]")))
            .finish()
    }
}

/// Compute the expected signature of `payload` for every registered scheme.
///
/// The payload must be the exact bytes received; re-serialized JSON will
/// not verify.
pub fn compute_expected_signatures(
    payload: impl AsRef<[u8]>,
    secret: &WebhookSecret,
) -> ExpectedSignatures {
    let payload = payload.as_ref();
    let signatures = Scheme::ALL
        .iter()
        .map(|scheme| (*scheme, scheme.compute(payload, secret)))
        .collect();
    ExpectedSignatures { signatures }
}

// ---------------------------------------------------------------------------
// Header parsing / verification
// ---------------------------------------------------------------------------

/// Split a signature header into `(scheme, signature)` pairs, in header
/// order.
///
/// Entries are separated by `,` plus optional whitespace, and each entry is
/// split on its first `=`. An entry without `=` yields `(entry, "")`.
/// Nothing here is rejected; a malformed entry simply never matches.
pub fn split_header(header: &str) -> Vec<(&str, &str)> {
    header
        .split(',')
        .enumerate()
        .map(|(i, token)| {
            if i == 0 {
                token
            } else {
                token.trim_start_matches(|c: char| c.is_ascii_whitespace())
            }
        })
        .filter(|token| !token.is_empty())
        .map(|token| token.split_once('=').unwrap_or((token, "")))
        .collect()
}

/// Compare two byte strings in constant time.
///
/// Running time depends on the input lengths only, never on the position
/// of the first differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Verify a signature header for `payload`.
///
/// Returns `true` if at least one entry names a registered scheme and
/// carries that scheme's expected signature. Expected signatures for all
/// registered schemes are computed before any entry is inspected.
pub fn verify_header(payload: impl AsRef<[u8]>, header: &str, secret: &WebhookSecret) -> bool {
    let expected = compute_expected_signatures(payload, secret);

    for (scheme_id, signature) in split_header(header) {
        let Some(scheme) = Scheme::from_id(scheme_id) else {
            tracing::debug!(scheme = scheme_id, "Ignoring unknown signature scheme");
            continue;
        };
        let Some(expected_sig) = expected.get(scheme) else {
            continue;
        };
        if constant_time_eq(expected_sig.as_bytes(), signature.as_bytes()) {
            return true;
        }
    }

    false
}

/// Build a signature header for `payload` carrying one entry per
/// registered scheme.
///
/// This is the sender side of [`verify_header`], handy for tests and for
/// replaying captured payloads.
pub fn generate_header(payload: impl AsRef<[u8]>, secret: &WebhookSecret) -> String {
    compute_expected_signatures(payload, secret)
        .iter()
        .map(|(scheme, sig)| format!("{scheme}={sig}"))
        .collect::<Vec<_>>()
        .join(",")
}
