use serde::{Deserialize, Serialize};

/// Generation options sent with a request.
///
/// Unset fields are omitted from the request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Merge call-level options over configuration defaults.
    ///
    /// Returns `None` when neither side is set. Otherwise each field takes the
    /// call value when present and falls back to the default.
    pub fn merge(
        call: Option<&RequestOptions>,
        defaults: Option<&RequestOptions>,
    ) -> Option<RequestOptions> {
        if call.is_none() && defaults.is_none() {
            return None;
        }

        let mut merged = defaults.copied().unwrap_or_default();
        if let Some(call) = call {
            merged.temperature = call.temperature.or(merged.temperature);
            merged.max_tokens = call.max_tokens.or(merged.max_tokens);
            merged.top_p = call.top_p.or(merged.top_p);
        }
        Some(merged)
    }
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}
