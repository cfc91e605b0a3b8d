use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::LlmResponse;

lazy_static! {
    /// Comma directly before a closing brace or bracket
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// `"a" + "b"` style concatenation that some models emit inside JSON
    static ref STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

#[derive(Debug, Error, PartialEq)]
pub enum LlmParseError {
    #[error("No JSON object found in model output")]
    NoJson,

    #[error("Model output could not be repaired into the expected shape: {0}")]
    Unrepairable(String),
}

/// Body of the first fenced code block, if any. The language tag line is skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Locates the JSON object in a model reply.
///
/// Fenced blocks win over bare text; otherwise the span from the first `{` to
/// the last `}` is taken.
pub fn locate_json(text: &str) -> Result<&str, LlmParseError> {
    let candidate = fenced_block(text).unwrap_or(text).trim();

    let start = candidate.find('{').ok_or(LlmParseError::NoJson)?;
    let end = candidate.rfind('}').ok_or(LlmParseError::NoJson)?;

    if start < end {
        Ok(&candidate[start..=end])
    } else {
        Err(LlmParseError::NoJson)
    }
}

/// Removes the mistakes models make most often: trailing commas and
/// concatenated string literals.
pub fn apply_quick_fixes(json: &str) -> String {
    let merged = STRING_CONCAT_RE.replace_all(json, "");
    TRAILING_COMMA_RE.replace_all(&merged, "$1").into_owned()
}

/// Runs the llm_json repairer, treating a panic inside it as a failed repair
fn deep_repair(json: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    match std::panic::catch_unwind(|| llm_json::repair_json(json, &options)) {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("JSON repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("JSON repair panicked");
            None
        }
    }
}

/// Parses a model reply into `T`, escalating through quick fixes and a full
/// repair before giving up.
pub fn parse_llm_json<T>(text: &str) -> Result<T, LlmParseError>
where
    T: DeserializeOwned,
{
    let json = locate_json(text)?;

    let direct_err = match serde_json::from_str::<T>(json) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    if let Ok(parsed) = serde_json::from_str::<T>(&apply_quick_fixes(json)) {
        tracing::debug!("Model JSON parsed after quick fixes");
        return Ok(parsed);
    }

    if let Some(parsed) = deep_repair(json).and_then(|r| serde_json::from_str::<T>(&r).ok()) {
        tracing::debug!("Model JSON parsed after llm_json repair");
        return Ok(parsed);
    }

    Err(LlmParseError::Unrepairable(direct_err.to_string()))
}

/// Parses into an `LlmResponse`, returning a marked fallback value instead of
/// an error so callers can branch on `is_success()`.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    parse_llm_json::<T>(text).unwrap_or_else(|e| {
        tracing::warn!("Model output unusable, using fallback: {}", e);
        let mut fallback = T::default();
        fallback.mark_as_fallback(e.to_string());
        fallback
    })
}
