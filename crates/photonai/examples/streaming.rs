//! Streaming chat completion with Ctrl-C cancellation.
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run --example streaming --features trace -- "Tell me a story"
//! ```

use futures::StreamExt;
use photonai::{CancellationToken, ChatCompletionBody, ChatCompletionRequest, Client};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "trace")]
    photonai::init_tracing();

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Tell me a short story about a lighthouse.".to_string());

    let client = Client::from_env()?;
    let request = ChatCompletionRequest::new(ChatCompletionBody::from_messages(prompt, None, None));

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut stream = client
        .chat_completion()
        .stream_with(&request, |event| event.content())
        .with_cancellation(token);

    let mut stdout = std::io::stdout();
    while let Some(fragment) = stream.next().await {
        write!(stdout, "{}", fragment?)?;
        stdout.flush()?;
    }

    if stream.is_cancelled() {
        println!("\n[cancelled after {} events]", stream.delivered());
    } else {
        println!();
    }

    Ok(())
}
