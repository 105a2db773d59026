//! An out-of-the-box chat widget over a hosted AI assistant.
//!
//! The crate includes a CLI front end for chatting in the terminal. And
//! you can also use it as a library to drive the widget state machine
//! from your own host apps.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod setup;

pub use setup::{API_KEY_VAR, ConfigError, MODEL_NAME, create_session};

/// Re-exports of [`sitechat_core`] crate.
pub mod core {
    pub use sitechat_core::*;
}
