use sitechat_model::ErrorKind;

/// The scripted outcome for one assistant turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScriptedTurn {
    /// The request succeeds with the given reply text.
    Reply(String),
    /// The request fails with an error of the given kind.
    Fail(ErrorKind),
}

impl ScriptedTurn {
    /// Creates a successful turn with the specified reply text.
    #[inline]
    pub fn reply(text: impl Into<String>) -> Self {
        ScriptedTurn::Reply(text.into())
    }

    /// Creates a failing turn of the specified error kind.
    #[inline]
    pub fn fail(kind: ErrorKind) -> Self {
        ScriptedTurn::Fail(kind)
    }
}
