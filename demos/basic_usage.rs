//! Basic usage of the chat-completion sampler.

use web_sampler::{CompletionSampler, Message, SamplerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up OPENAI_API_KEY from a .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing for fallback/retry diagnostics
    tracing_subscriber::fmt::init();

    let config = SamplerConfig::default()
        .with_model("gpt-5")
        .with_system_message("You are a careful research assistant.")
        .with_max_tokens(1024);

    let sampler = CompletionSampler::new(config)?;

    let question = "Who won the most recent Tour de France, and by what margin?";
    println!("❓ {}\n", question);

    let response = sampler.complete(&[Message::user(question)]).await;

    println!("💬 {}", response.response_text);
    if let Some(usage) = &response.response_metadata.usage {
        println!("\n📊 Tokens: {} in, {} out", usage.prompt_tokens, usage.completion_tokens);
    }

    Ok(())
}
