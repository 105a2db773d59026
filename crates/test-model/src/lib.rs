//! A local fake chat backend for testing purpose.

mod turn;

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sitechat_model::{
    ChatMessage, ChatProvider, ChatReply, ChatRequest, ErrorKind,
    ProviderError,
};
use tokio::time::sleep;

pub use turn::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake chat backend for testing purpose.
///
/// Before sending requests, you need to setup the conversation script,
/// which is how the backend should respond to each assistant turn. The
/// turn is selected by counting the user messages in your request, so
/// replaying a longer history advances the script. If there are no
/// enough turns in the script, an error will be returned.
///
/// # Note
///
/// This type is not optimized for production use, the whole script is
/// cloned into every request. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestChatProvider {
    script: Vec<ScriptedTurn>,
    delay: Option<Duration>,
    injected_failure: Arc<Mutex<Option<ErrorKind>>>,
}

impl TestChatProvider {
    /// Appends a turn to the conversation script.
    #[inline]
    pub fn add_turn(&mut self, turn: ScriptedTurn) {
        self.script.push(turn);
    }

    /// Delays every response by the given duration.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Makes the next request fail with the given error kind, regardless
    /// of the script. The request that consumed the failure does not
    /// advance the script, so resending works.
    #[inline]
    pub fn fail_next_request(&self, kind: ErrorKind) {
        *self.injected_failure.lock().unwrap() = Some(kind);
    }
}

impl ChatProvider for TestChatProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let user_turns = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, ChatMessage::User(_)))
            .count();
        let turn = user_turns
            .checked_sub(1)
            .and_then(|idx| self.script.get(idx).cloned());
        let delay = self.delay;
        let injected = self.injected_failure.lock().unwrap().take();

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }

            if let Some(kind) = injected {
                return Err(Error {
                    message: "injected failure",
                    kind,
                });
            }

            match turn {
                Some(ScriptedTurn::Reply(text)) => Ok(ChatReply { text }),
                Some(ScriptedTurn::Fail(kind)) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough turns",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}
