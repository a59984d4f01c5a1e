//! Chat completion request types
//!
//! See <https://platform.openai.com/docs/api-reference/chat/create>.

use derive_builder::Builder;
use photonai_protocol::{AiModel, AiRequest, RequestBody, RequestMethod, TextRequestBody};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Endpoint path of the chat completion operation.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Author of a chat message.
///
/// Roles the API adds later (`developer`, `function`, ...) are carried
/// verbatim in [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Instructions that steer the assistant
    System,
    /// End-user input
    User,
    /// Model output
    Assistant,
    /// Output of a tool call
    Tool,
    /// Any role not listed above
    Other(String),
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        match name {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author
    pub role: Role,

    /// Text content
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Body of a chat completion request.
///
/// Defaults match the API documentation, except `stream`, which is on by
/// default. Bodies are values: [`apply`](Self::apply) and the `with_*`
/// setters consume a body and return a modified copy.
///
/// ```
/// use photonai::{ChatCompletionBody, ChatMessage};
///
/// let body = ChatCompletionBody::new("gpt-4", vec![ChatMessage::user("Hello")])
///     .apply(|body| {
///         body.stream = false;
///         body.temperature = 0.2;
///     });
/// assert!(!body.stream);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct ChatCompletionBody {
    /// Model to use
    #[builder(default)]
    pub model: AiModel,

    /// Conversation so far, in order
    pub messages: Vec<ChatMessage>,

    /// Deliver the response as a server-sent event stream
    #[builder(default = "true")]
    pub stream: bool,

    /// Sampling temperature between 0 and 2
    #[builder(default = "1.0")]
    pub temperature: f64,

    /// Nucleus sampling probability mass
    #[builder(default = "1.0")]
    pub top_p: f64,

    /// Number of choices to generate
    #[builder(default = "1")]
    pub n: u32,

    /// Sequences where generation stops
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub stop: Vec<String>,

    /// Upper bound on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub max_tokens: Option<u32>,

    /// Penalty for tokens already present, between -2 and 2
    #[builder(default)]
    pub presence_penalty: f64,

    /// Penalty proportional to token frequency, between -2 and 2
    #[builder(default)]
    pub frequency_penalty: f64,

    /// Bias added to the logits of specific token ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub logit_bias: Option<BTreeMap<String, f64>>,

    /// Stable identifier of the end user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub user: Option<String>,
}

impl ChatCompletionBody {
    /// Create a body for `model` with default sampling parameters.
    pub fn new(model: impl Into<AiModel>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
            temperature: 1.0,
            top_p: 1.0,
            n: 1,
            stop: Vec::new(),
            max_tokens: None,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            logit_bias: None,
            user: None,
        }
    }

    /// Create a body for the default model from a single exchange.
    ///
    /// The system message, when given, comes first and the assistant
    /// message, when given, comes last.
    pub fn from_messages(
        user_message: impl Into<String>,
        system_message: Option<String>,
        assistant_message: Option<String>,
    ) -> Self {
        let mut messages = vec![ChatMessage::user(user_message)];

        if let Some(system) = system_message {
            messages.insert(0, ChatMessage::system(system));
        }

        if let Some(assistant) = assistant_message {
            messages.push(ChatMessage::assistant(assistant));
        }

        Self::new(AiModel::default(), messages)
    }

    /// Start building a body.
    pub fn builder() -> ChatCompletionBodyBuilder {
        ChatCompletionBodyBuilder::default()
    }

    /// Return a copy with `block` applied.
    pub fn apply(mut self, block: impl FnOnce(&mut Self)) -> Self {
        block(&mut self);
        self
    }

    /// Set the model.
    pub fn with_model(self, model: impl Into<AiModel>) -> Self {
        self.apply(|body| body.model = model.into())
    }

    /// Set the stream flag.
    pub fn with_stream(self, stream: bool) -> Self {
        self.apply(|body| body.stream = stream)
    }

    /// Set the sampling temperature.
    pub fn with_temperature(self, temperature: f64) -> Self {
        self.apply(|body| body.temperature = temperature)
    }

    /// Set the nucleus sampling mass.
    pub fn with_top_p(self, top_p: f64) -> Self {
        self.apply(|body| body.top_p = top_p)
    }

    /// Set the number of choices.
    pub fn with_n(self, n: u32) -> Self {
        self.apply(|body| body.n = n)
    }

    /// Set the stop sequences.
    pub fn with_stop(self, stop: Vec<String>) -> Self {
        self.apply(|body| body.stop = stop)
    }

    /// Set the token limit.
    pub fn with_max_tokens(self, max_tokens: u32) -> Self {
        self.apply(|body| body.max_tokens = Some(max_tokens))
    }

    /// Set the presence penalty.
    pub fn with_presence_penalty(self, penalty: f64) -> Self {
        self.apply(|body| body.presence_penalty = penalty)
    }

    /// Set the frequency penalty.
    pub fn with_frequency_penalty(self, penalty: f64) -> Self {
        self.apply(|body| body.frequency_penalty = penalty)
    }

    /// Set the logit bias map.
    pub fn with_logit_bias(self, logit_bias: BTreeMap<String, f64>) -> Self {
        self.apply(|body| body.logit_bias = Some(logit_bias))
    }

    /// Set the end-user identifier.
    pub fn with_user(self, user: impl Into<String>) -> Self {
        self.apply(|body| body.user = Some(user.into()))
    }
}

impl RequestBody for ChatCompletionBody {}

impl TextRequestBody for ChatCompletionBody {
    fn model(&self) -> &AiModel {
        &self.model
    }
}

/// A chat completion request.
///
/// Whether it has to be streamed is decided by the body's `stream` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    body: ChatCompletionBody,
}

impl ChatCompletionRequest {
    /// Wrap a body.
    pub fn new(body: ChatCompletionBody) -> Self {
        Self { body }
    }

    /// Unwrap the body, e.g. to derive a follow-up request.
    pub fn into_body(self) -> ChatCompletionBody {
        self.body
    }
}

impl From<ChatCompletionBody> for ChatCompletionRequest {
    fn from(body: ChatCompletionBody) -> Self {
        Self::new(body)
    }
}

impl AiRequest for ChatCompletionRequest {
    type Body = ChatCompletionBody;

    fn body(&self) -> &ChatCompletionBody {
        &self.body
    }

    fn path(&self) -> &str {
        CHAT_COMPLETIONS_PATH
    }

    fn method(&self) -> RequestMethod {
        RequestMethod::Post
    }

    fn stream_mode(&self) -> bool {
        self.body.stream
    }
}
