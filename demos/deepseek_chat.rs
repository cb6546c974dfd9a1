//! Ask DeepSeek for a joke, first as a single response and then streamed.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=your_api_key_here
//! cargo run --example deepseek_chat
//! ```

use futures_util::StreamExt;
use std::io::Write;
use tracing_subscriber::EnvFilter;
use unified_llm::{
    AIClient, AIModel, Configuration, Error, Prompt, ProviderType, RequestOptions,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("DEEPSEEK_API_KEY").unwrap_or_else(|_| {
        println!("Note: DEEPSEEK_API_KEY not set, using placeholder (API calls will fail)");
        "placeholder-key".to_string()
    });

    let client = AIClient::new(Configuration::new().with_api_key(ProviderType::DeepSeek, api_key))?;
    let model = AIModel::deepseek_chat();
    let prompt = Prompt::system("You are a helpful and concise assistant.")
        .with_user("Tell me a short joke about async programming.");
    let options = RequestOptions::new().temperature(0.7).max_tokens(100);

    println!("=== {model} ===");
    match client
        .complete(&model, prompt.messages(), Some(options))
        .await
    {
        Ok(response) => {
            println!("{}", response.content);
            if let Some(usage) = response.usage {
                println!("[tokens: {:?}]", usage.total_tokens);
            }
        }
        Err(e) => println!("Request failed: {e}"),
    }

    println!("\n=== Streaming ===");
    let mut stream = match client
        .stream_text(&model, prompt.messages(), Some(options))
        .await
    {
        Ok(stream) => stream,
        Err(e) => {
            println!("Request failed: {e}");
            return Ok(());
        }
    };

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                print!("{}", chunk.text_delta);
                std::io::stdout().flush().ok();
                if let Some(reason) = chunk.finish_reason {
                    println!("\n[finished: {reason}]");
                }
            }
            Err(e) => {
                println!("\nStream failed: {e}");
                break;
            }
        }
    }

    Ok(())
}
