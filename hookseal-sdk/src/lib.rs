//! Hookseal SDK: verify and decode signed webhooks.
//!
//! The [`signature`] module implements the header protocol
//! (`v1={hex}[,v1={hex}...]`) and [`webhook::construct_event`] turns a raw
//! payload plus optional header into a typed [`Event`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod objects;
pub mod secret;
pub mod signature;
pub mod webhook;

pub use objects::event::Event;
pub use secret::WebhookSecret;
pub use signature::{Scheme, generate_header, verify_header};
pub use webhook::{WebhookError, construct_event};
