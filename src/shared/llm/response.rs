use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// A structured model reply that can degrade to a marked default.
///
/// The schema of the implementing type is rendered into prompts so the model
/// knows the exact shape expected back.
pub trait LlmResponse: DeserializeOwned + Default + JsonSchema {
    fn mark_as_fallback(&mut self, error_message: String);

    fn is_success(&self) -> bool;

    fn json_schema_string() -> String {
        let schema = SchemaGenerator::default().into_root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
