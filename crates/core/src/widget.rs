
use std::fmt::Display;

use sitechat_model::ProviderError;

use crate::session::Session;
use crate::transcript::{Message, Sender, Transcript};

/// The greeting seeded into the transcript when the widget mounts.
pub const GREETING: &str = "Hello! I'm an AI assistant. I can help explain \
    how this website works. What would you like to know?";

/// Fixed reply appended in place of the assistant's reply when a backend
/// call fails.
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't process your \
    request right now. Please try again.";

/// Persistent banner shown when the session could not be created.
pub const OFFLINE_BANNER: &str = "Sorry, I couldn't connect to the AI. \
    Please check your API key and try again later.";

/// The result of a [`ChatWidget::submit`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    /// The submission was a no-op: empty text, a request already in
    /// flight, or no session.
    Ignored,
    /// The assistant replied and the reply was appended.
    Replied,
    /// The backend call failed; the fallback reply was appended and the
    /// banner was set.
    Fallback,
}

/// The conversation view state: transcript, busy flag, and error banner.
///
/// All mutation goes through the transition functions below, so the state
/// a rendering layer observes between events is always consistent. The
/// widget owns the session exclusively; at most one submission is in
/// flight at a time, gated by the busy flag.
pub struct ChatWidget {
    session: Option<Session>,
    transcript: Transcript,
    busy: bool,
    banner: Option<String>,
    next_msg_id: u64,
}

impl ChatWidget {
    /// Mounts the widget with the result of creating a session.
    ///
    /// On success the transcript is seeded with the greeting. On failure
    /// the widget comes up without a session and with a persistent
    /// banner; every later submission is a no-op until a new widget is
    /// mounted.
    pub fn mount<E: Display>(outcome: Result<Session, E>) -> Self {
        let mut widget = Self {
            session: None,
            transcript: Transcript::default(),
            busy: false,
            banner: None,
            next_msg_id: 1,
        };
        match outcome {
            Ok(session) => {
                widget.session = Some(session);
                widget.append(Sender::Bot, GREETING.to_owned());
            }
            Err(err) => {
                error!("failed to initialize chat session: {err}");
                widget.banner = Some(OFFLINE_BANNER.to_owned());
            }
        }
        widget
    }

    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns `true` while a submission is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the current error banner, if any.
    #[inline]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Returns `true` if the widget has a usable session.
    #[inline]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Transition: accepts or ignores a submission.
    ///
    /// Returns `false` and mutates nothing if the trimmed text is empty,
    /// a submission is already in flight, or there is no session.
    /// Otherwise the user message is appended optimistically, any prior
    /// banner is cleared, and the busy flag is raised.
    pub fn begin_send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() || self.busy || self.session.is_none() {
            return false;
        }

        self.banner = None;
        self.busy = true;
        self.append(Sender::User, text.to_owned());
        true
    }

    /// Transition: applies the result of the in-flight submission.
    ///
    /// Appends the assistant's reply on success, or the fixed fallback
    /// reply plus an error banner on failure. The busy flag is cleared
    /// in both cases.
    pub fn complete_send(
        &mut self,
        result: Result<String, Box<dyn ProviderError>>,
    ) -> SubmitOutcome {
        debug_assert!(self.busy, "no submission is in flight");

        let outcome = match result {
            Ok(reply) => {
                self.append(Sender::Bot, reply);
                SubmitOutcome::Replied
            }
            Err(err) => {
                self.banner =
                    Some(format!("Sorry, I ran into an issue: {err}"));
                self.append(Sender::Bot, FALLBACK_REPLY.to_owned());
                SubmitOutcome::Fallback
            }
        };
        self.busy = false;
        outcome
    }

    /// Submits a user utterance: accepts it, forwards it through the
    /// session, and applies the result.
    ///
    /// The `&mut` receiver suspends only this control path while the
    /// request is in flight; an event loop driving the widget stays
    /// responsive.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if !self.begin_send(text) {
            return SubmitOutcome::Ignored;
        }

        let session = self
            .session
            .as_mut()
            .expect("session was checked by begin_send");
        let result = session.send(text).await;
        self.complete_send(result)
    }

    fn append(&mut self, sender: Sender, text: String) {
        let prefix = match sender {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        let id = format!("{prefix}-{}", self.next_msg_id);
        self.next_msg_id += 1;
        self.transcript.messages.push(Message { id, sender, text });
    }
}
