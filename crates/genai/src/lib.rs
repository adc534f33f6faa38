//! Generative-text client for one-line document summaries.
//!
//! Wraps a `generateContent`-style REST endpoint with a fixed prompt
//! template and fixed decoding constants. One attempt per call: any
//! transport, status, safety-block, or decoding failure propagates to the
//! caller, which makes the whole request fail.

mod client;
mod error;
mod prompt;
mod wire;

pub use client::{GenAiClient, Summarizer, MAX_OUTPUT_TOKENS, TEMPERATURE, TOP_P};
pub use error::GenAiError;
pub use prompt::summary_prompt;
