//! Sampling through the Responses endpoint with reasoning summaries.

use web_sampler::{Message, ResponsesSampler, SamplerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = SamplerConfig::default().with_model("gpt-5");
    let sampler = ResponsesSampler::new(config)?;

    let response = sampler
        .complete(&[Message::user("Summarize today's top science news.")])
        .await;

    println!("💬 {}", response.response_text);

    Ok(())
}
