//! The shared client behind every provider adapter.

pub mod client;
pub mod types;

pub use client::{default_http_client, CompatibleClient, STREAM_ERROR_BODY_LIMIT};
