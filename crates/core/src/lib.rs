//! Core logic including the session manager and the conversation view
//! state that the rendering layer consumes.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat_client;
mod session;
pub mod transcript;
mod widget;

pub use chat_client::ChatClient;
pub use session::{Session, SessionBuilder};
pub use widget::{
    ChatWidget, FALLBACK_REPLY, GREETING, OFFLINE_BANNER, SubmitOutcome,
};
