//! Single-shot chat completion.
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run --example chat -- "What is Rust?"
//! ```

use photonai::{ChatCompletionBody, ChatCompletionRequest, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "trace")]
    photonai::init_tracing();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Say hello in one sentence.".to_string());

    let client = Client::from_env()?;
    let body = ChatCompletionBody::from_messages(
        prompt,
        Some("You are a concise assistant.".to_string()),
        None,
    )
    .with_stream(false);

    let response = client
        .chat_completion()
        .request(&ChatCompletionRequest::new(body))
        .await?;

    println!("{}", response.content().unwrap_or_default());
    if let Some(usage) = response.usage {
        println!(
            "\n[{} prompt + {} completion tokens]",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    Ok(())
}
