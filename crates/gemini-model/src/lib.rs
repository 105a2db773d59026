//! A chat provider for the Google Gemini API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, StatusCode, header};
use sitechat_model::{
    ChatProvider, ChatReply, ChatRequest, ErrorKind, ProviderError,
};

pub use config::{GeminiConfig, GeminiConfigBuilder};

/// Error type for [`GeminiProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

/// Gemini chat provider.
///
/// The underlying `generateContent` API is stateless, so the full
/// conversation history in the request is what provides continuation.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider` with the given configuration.
    #[inline]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ChatProvider for GeminiProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let body = proto::create_request(req);
        let resp_fut = self
            .client
            .post(format!(
                "{}/{}:generateContent",
                self.config.base_url, self.config.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send();

        let config = Arc::clone(&self.config);
        async move {
            debug!(model = %config.model, "sending request");

            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(format!("{err}"), ErrorKind::Other));
                }
            };

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(Error::new(
                    "the backend is rate limited",
                    ErrorKind::RateLimitExceeded,
                ));
            }
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(Error::new(
                    format!("HTTP {status}: {text}"),
                    ErrorKind::Other,
                ));
            }

            let decoded: proto::GenerateContentResponse =
                match resp.json().await {
                    Ok(decoded) => decoded,
                    Err(err) => {
                        return Err(Error::new(
                            format!("{err}"),
                            ErrorKind::Other,
                        ));
                    }
                };

            proto::extract_reply(decoded)
        }
    }
}
