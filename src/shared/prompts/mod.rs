//! Prompt templates for the AI collaborators.
//!
//! Templates live in `templates/prompts/` and use Jinja2 syntax.

pub mod engine;

pub use engine::{render_template, TemplateError};

use minijinja::context;

/// System prompt asking for a summary and short notes in the given JSON schema
pub fn render_summarize_prompt(json_schema: &str) -> Result<String, TemplateError> {
    render_template(
        "enrichment/summarize.jinja",
        context! { json_schema => json_schema },
    )
}

/// System prompt that grounds the assistant in a single document
pub fn render_answer_prompt(document_text: &str) -> Result<String, TemplateError> {
    render_template(
        "assistant/answer.jinja",
        context! { document_text => document_text },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_embeds_schema() {
        let prompt = render_summarize_prompt(r#"{"type": "object"}"#).unwrap();
        assert!(prompt.contains(r#"{"type": "object"}"#));
    }

    #[test]
    fn test_answer_prompt_embeds_document() {
        let prompt = render_answer_prompt("Dijkstra relaxes edges greedily.").unwrap();
        assert!(prompt.contains("Dijkstra relaxes edges greedily."));
    }
}
