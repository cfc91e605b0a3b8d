//! Helpers for turning free-form model output into typed values.

mod parser;
mod response;

pub use parser::{parse_llm_json, parse_with_fallback, LlmParseError};
pub use response::LlmResponse;
