//! Stream the same question from every provider with a key in the environment.
//!
//! Reads `OPENAI_API_KEY`, `DEEPSEEK_API_KEY` and `GEMINI_API_KEY` (plus an
//! optional `.env` file) and skips providers without one.
//!
//! ```bash
//! RUST_LOG=unified_llm=debug cargo run --example streaming_chat
//! ```

use futures_util::StreamExt;
use std::io::Write;
use tracing_subscriber::EnvFilter;
use unified_llm::{AIClient, AIModel, Configuration, Error, Prompt, ProviderType};

fn model_for(client: &AIClient, provider_type: ProviderType) -> AIModel {
    client
        .default_model(provider_type)
        .unwrap_or_else(|| match provider_type {
            ProviderType::OpenAI => AIModel::gpt_4o_mini(),
            ProviderType::DeepSeek => AIModel::deepseek_chat(),
            ProviderType::GoogleGemini => AIModel::gemini_flash(),
        })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = AIClient::new(Configuration::from_env()?)?;
    let prompt = Prompt::system("Answer in two sentences or fewer.")
        .with_user("Why do streaming APIs send data in chunks?");

    for provider_type in client.configuration().configured_providers() {
        let model = model_for(&client, provider_type);
        println!("\n=== {model} ===");

        let mut stream = match client.stream_text(&model, prompt.messages(), None).await {
            Ok(stream) => stream,
            Err(e) => {
                println!("Request failed: {e}");
                continue;
            }
        };

        let mut chunks = 0;
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(chunk) => {
                    chunks += 1;
                    print!("{}", chunk.text_delta);
                    std::io::stdout().flush().ok();
                }
                Err(e) => {
                    println!("\nStream failed: {e}");
                    break;
                }
            }
        }
        println!("\n[{chunks} chunks]");
    }

    Ok(())
}
