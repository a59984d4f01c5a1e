//! Type definitions for the chat completion API

pub mod chat;
pub mod response;

pub use chat::{
    CHAT_COMPLETIONS_PATH, ChatCompletionBody, ChatCompletionBodyBuilder,
    ChatCompletionBodyBuilderError, ChatCompletionRequest, ChatMessage, Role,
};
pub use response::{
    ChatCompletionResponse, ChatStreamResponse, Choice, DeltaChoice, DeltaMessage, Usage,
};

pub use photonai_protocol::AiModel;
