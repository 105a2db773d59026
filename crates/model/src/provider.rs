use std::error::Error;

use crate::error::ErrorKind;
use crate::request::{ChatReply, ChatRequest};

/// The error type for a chat provider.
pub trait ProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a chat provider, which is an entry for sending
/// a conversation to the backend and obtaining the assistant's reply.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime. Dialogue
/// history belongs to the session layer and is replayed in full with
/// every request.
pub trait ChatProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ProviderError;

    /// Sends a request to the backend and resolves to the reply.
    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
