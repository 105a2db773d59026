use serde::{Deserialize, Serialize};
use sitechat_model::{ChatMessage, ChatReply, ChatRequest, ErrorKind};

use crate::Error;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

// -----------
// Conversions
// -----------

/// Builds the request body from a provider-neutral request.
///
/// System messages are not part of the `contents` turns for this API, the
/// first one becomes the `systemInstruction` field instead.
pub fn create_request(req: &ChatRequest) -> GenerateContentRequest {
    let mut contents = Vec::new();
    let mut system_instruction = None;

    for msg in &req.messages {
        let (role, text) = match msg {
            ChatMessage::System(text) => {
                if system_instruction.is_none() {
                    system_instruction = Some(Content {
                        role: None,
                        parts: vec![Part { text: text.clone() }],
                    });
                }
                continue;
            }
            ChatMessage::User(text) => ("user", text),
            ChatMessage::Assistant(text) => ("model", text),
        };
        contents.push(Content {
            role: Some(role.to_owned()),
            parts: vec![Part { text: text.clone() }],
        });
    }

    GenerateContentRequest {
        contents,
        system_instruction,
    }
}

/// Extracts the reply text from a decoded response body.
pub fn extract_reply(
    resp: GenerateContentResponse,
) -> Result<ChatReply, Error> {
    let block_reason = resp
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref());
    if let Some(reason) = block_reason {
        return Err(Error::new(
            format!("prompt was blocked: {reason}"),
            ErrorKind::Moderated,
        ));
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(Error::new(
            "no candidates in response",
            ErrorKind::Other,
        ));
    };

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(Error::new(
            "response was blocked for safety reasons",
            ErrorKind::Moderated,
        ));
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    Ok(ChatReply { text })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sitechat_model::ProviderError;

    use super::*;

    #[test]
    fn test_create_request() {
        let req = ChatRequest {
            messages: vec![
                ChatMessage::System("Be helpful".to_owned()),
                ChatMessage::User("Hi".to_owned()),
                ChatMessage::Assistant("Hello!".to_owned()),
                ChatMessage::User("How does this site work?".to_owned()),
            ],
        };
        let body = serde_json::to_value(create_request(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "Hi" }] },
                    { "role": "model", "parts": [{ "text": "Hello!" }] },
                    {
                        "role": "user",
                        "parts": [{ "text": "How does this site work?" }]
                    },
                ],
                "systemInstruction": {
                    "parts": [{ "text": "Be helpful" }]
                }
            })
        );
    }

    #[test]
    fn test_create_request_without_system_message() {
        let req = ChatRequest {
            messages: vec![ChatMessage::User("Hi".to_owned())],
        };
        let body = serde_json::to_value(create_request(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "Hi" }] },
                ]
            })
        );
    }

    #[test]
    fn test_extract_reply() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Glad you " }, { "text": "asked!" }]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        let reply = extract_reply(resp).unwrap();
        assert_eq!(reply.text, "Glad you asked!");
    }

    #[test]
    fn test_extract_reply_blocked_prompt() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = extract_reply(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
    }

    #[test]
    fn test_extract_reply_safety_finish() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        let err = extract_reply(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
    }

    #[test]
    fn test_extract_reply_no_candidates() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({})).unwrap();
        let err = extract_reply(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
