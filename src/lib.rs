//! One client for several hosted chat completion providers.
//!
//! OpenAI, DeepSeek and Google Gemini are all reached through their
//! OpenAI-compatible `/chat/completions` APIs. Responses can be taken whole
//! ([`AIClient::generate_text`]) or as a stream of text deltas
//! ([`AIClient::stream_text`]).

pub mod accumulator;
pub mod client;
pub mod error;
pub mod factory;
pub mod provider;
pub mod providers;
pub mod response;
pub mod sse_stream;
pub mod streaming;
pub mod types;

// Re-export core types for easy usage
pub use client::AIClient;
pub use error::{Error, Result};
pub use factory::{AIModel, Configuration, ProviderFactory, ProviderType};
pub use provider::{LLMProvider, Provider};
pub use providers::*;
pub use response::*;
pub use streaming::parse_chunk_stream;
pub use types::*;
