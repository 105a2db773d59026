use sitechat_model::{
    ChatMessage, ChatProvider, ChatRequest, ProviderError,
};

use crate::chat_client::ChatClient;

/// [`Session`] builder.
pub struct SessionBuilder {
    chat_client: ChatClient,
    system_instruction: Option<String>,
}

impl SessionBuilder {
    /// Creates a new builder with the specified chat provider.
    #[inline]
    pub fn with_provider<P: ChatProvider + 'static>(provider: P) -> Self {
        Self {
            chat_client: ChatClient::new(provider),
            system_instruction: None,
        }
    }

    /// Sets the system instruction that scopes the assistant's behavior.
    #[inline]
    pub fn with_system_instruction<S: Into<String>>(
        mut self,
        instruction: S,
    ) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Builds the session.
    ///
    /// This is a local operation; no network call is performed until the
    /// first [`Session::send`]. Every call builds a session with its own
    /// independent history.
    #[inline]
    pub fn build(self) -> Session {
        let mut history = Vec::new();
        if let Some(instruction) = self.system_instruction {
            history.push(ChatMessage::System(instruction));
        }
        Session {
            chat_client: self.chat_client,
            history,
        }
    }
}

/// A single ongoing dialogue with the chat backend.
///
/// The session owns the accumulated dialogue history and never exposes
/// it; callers interact with the dialogue only through [`Session::send`].
pub struct Session {
    chat_client: ChatClient,
    history: Vec<ChatMessage>,
}

impl Session {
    /// Submits a user utterance and resolves to the assistant's reply.
    ///
    /// On success the history is extended with the new turn, so each call
    /// is contextualized by all prior turns in this session. On failure
    /// the pending user message is rolled back and the history is left
    /// exactly as it was before the call.
    ///
    /// The `&mut` receiver keeps at most one `send` in flight per
    /// session.
    pub async fn send(
        &mut self,
        text: &str,
    ) -> Result<String, Box<dyn ProviderError>> {
        self.history.push(ChatMessage::User(text.to_owned()));

        let req = ChatRequest {
            messages: self.history.clone(),
        };
        match self.chat_client.send_request(req).await {
            Ok(reply) => {
                self.history
                    .push(ChatMessage::Assistant(reply.text.clone()));
                Ok(reply.text)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }

    /// Returns the number of non-system turns recorded so far.
    #[inline]
    pub fn turns(&self) -> usize {
        self.history
            .iter()
            .filter(|msg| !matches!(msg, ChatMessage::System(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use sitechat_model::ErrorKind;
    use sitechat_test_model::{ScriptedTurn, TestChatProvider};

    use super::*;

    fn scripted_session(provider: TestChatProvider) -> Session {
        SessionBuilder::with_provider(provider)
            .with_system_instruction("Be helpful")
            .build()
    }

    #[tokio::test]
    async fn test_send_extends_history() {
        let mut provider = TestChatProvider::default();
        provider.add_turn(ScriptedTurn::reply("Hello!"));
        provider.add_turn(ScriptedTurn::reply("We use public data."));

        let mut session = scripted_session(provider);
        assert_eq!(session.turns(), 0);

        let reply = session.send("Hi").await.unwrap();
        assert_eq!(reply, "Hello!");
        assert_eq!(session.turns(), 2);

        let reply = session.send("What data do you use?").await.unwrap();
        assert_eq!(reply, "We use public data.");
        assert_eq!(session.turns(), 4);
    }

    #[tokio::test]
    async fn test_failure_rolls_back_history() {
        let mut provider = TestChatProvider::default();
        provider.add_turn(ScriptedTurn::reply("Hello!"));
        provider.fail_next_request(ErrorKind::RateLimitExceeded);

        let mut session = scripted_session(provider);

        let err = session.send("Hi").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
        assert_eq!(session.turns(), 0);

        // The failed turn is not replayed; resending works as if the
        // failure never happened.
        let reply = session.send("Hi").await.unwrap();
        assert_eq!(reply, "Hello!");
        assert_eq!(session.turns(), 2);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let mut provider = TestChatProvider::default();
        provider.add_turn(ScriptedTurn::reply("Hello!"));

        let mut first = scripted_session(provider.clone());
        let second = scripted_session(provider);

        first.send("Hi").await.unwrap();
        assert_eq!(first.turns(), 2);
        assert_eq!(second.turns(), 0);
    }
}
