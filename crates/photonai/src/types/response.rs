//! Chat completion response types

use serde::{Deserialize, Serialize};

use super::chat::{ChatMessage, Role};

/// Complete response of a single-shot chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Unique identifier of the completion
    pub id: String,

    /// Object type (`chat.completion`)
    pub object: String,

    /// Creation time, seconds since the Unix epoch
    pub created: i64,

    /// Model that produced the completion
    pub model: String,

    /// Generated choices
    pub choices: Vec<Choice>,

    /// Token accounting, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

/// One generated choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Position in the choice list
    pub index: u32,

    /// Generated message
    pub message: ChatMessage,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage of a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens generated
    #[serde(default)]
    pub completion_tokens: u32,

    /// Sum of both
    pub total_tokens: u32,
}

/// One event of a streamed chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStreamResponse {
    /// Identifier shared by all events of one completion
    pub id: String,

    /// Object type (`chat.completion.chunk`)
    pub object: String,

    /// Creation time, seconds since the Unix epoch
    pub created: i64,

    /// Model that produced the completion
    pub model: String,

    /// Partial choices carried by this event
    pub choices: Vec<DeltaChoice>,
}

impl ChatStreamResponse {
    /// Text carried by this event, concatenated across choices.
    pub fn content(&self) -> String {
        self.choices
            .iter()
            .filter_map(|choice| choice.delta.content.as_deref())
            .collect()
    }

    /// Finish reason of the first choice that reports one.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices
            .iter()
            .find_map(|choice| choice.finish_reason.as_deref())
    }
}

/// Partial choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaChoice {
    /// Position in the choice list
    pub index: u32,

    /// Increment of the message
    pub delta: DeltaMessage,

    /// Set on the last event of the choice
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Increment of a message; the role only appears on the first event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeltaMessage {
    /// Role of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Text fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
