//! Provider implementations for different LLM services.

pub mod compatible;
pub mod deepseek;
pub mod gemini;
pub mod openai;

// Re-export commonly used provider types
pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
