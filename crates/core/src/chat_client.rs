use std::pin::Pin;
use std::sync::Arc;

use sitechat_model::{ChatProvider, ChatReply, ChatRequest, ProviderError};
use tracing::Instrument;

type SendRequestResult = Result<ChatReply, Box<dyn ProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ChatRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a chat provider that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct ChatClient {
    handler_fn: HandlerFn,
}

impl ChatClient {
    /// Creates a new `ChatClient` wrapping the given provider.
    #[inline]
    pub fn new<P: ChatProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ChatClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    let reply = match fut.await {
                        Ok(reply) => reply,
                        Err(err) => {
                            error!("got an error: {err:?}");
                            return Err(Box::new(err)
                                as Box<dyn ProviderError>);
                        }
                    };
                    trace!("finished a request");
                    Ok(reply)
                }
                .instrument(trace_span!("chat client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the reply.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Nothing is observed from the response
    /// when this operation is cancelled.
    #[inline]
    pub async fn send_request(
        &self,
        req: ChatRequest,
    ) -> Result<ChatReply, Box<dyn ProviderError>> {
        (self.handler_fn)(req).await
    }
}

#[cfg(test)]
mod tests {
    use sitechat_model::{ChatMessage, ErrorKind};
    use sitechat_test_model::{ScriptedTurn, TestChatProvider};

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestChatProvider::default();
        provider.add_turn(ScriptedTurn::reply("How are you?"));

        let chat_client = ChatClient::new(provider);

        for _ in 0..3 {
            let reply = chat_client
                .send_request(ChatRequest {
                    messages: vec![ChatMessage::User("Hi".to_owned())],
                })
                .await
                .unwrap();
            assert_eq!(reply.text, "How are you?");
        }
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut provider = TestChatProvider::default();
        provider.add_turn(ScriptedTurn::fail(ErrorKind::RateLimitExceeded));

        let chat_client = ChatClient::new(provider);
        let err = chat_client
            .send_request(ChatRequest {
                messages: vec![ChatMessage::User("Hi".to_owned())],
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
    }
}
