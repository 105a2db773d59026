/// A request to be sent to the chat provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatRequest {
    /// The input messages, in conversation order.
    pub messages: Vec<ChatMessage>,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ChatMessage {
    /// Returns the text content of this message.
    #[inline]
    pub fn text(&self) -> &str {
        match self {
            ChatMessage::System(text)
            | ChatMessage::User(text)
            | ChatMessage::Assistant(text) => text,
        }
    }
}

/// A completed reply from the provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub text: String,
}
