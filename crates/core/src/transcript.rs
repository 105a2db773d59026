//! Transcript-related types.

/// Who authored a displayed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The assistant.
    Bot,
}

/// A single displayed message.
///
/// Messages are immutable once created; the transcript only ever appends
/// new ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    pub(crate) id: String,
    pub(crate) sender: Sender,
    pub(crate) text: String,
}

impl Message {
    /// Returns the unique identifier of this message.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns who authored this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the text content of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The ordered list of displayed messages for one conversation.
///
/// The transcript is append-only and held entirely in memory; insertion
/// order is meaningful and preserved.
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    pub(crate) messages: Vec<Message>,
}

impl Transcript {
    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the transcript has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the messages in insertion order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
