//! Jinja prompt templates.
//!
//! Templates ship inside the binary and can be overridden at runtime by files
//! of the same relative name under `templates/prompts/`.

use minijinja::Environment;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Override directory relative to the working directory
const TEMPLATE_DIR: &str = "templates/prompts";

const BUILTIN_TEMPLATES: [(&str, &str); 2] = [
    (
        "enrichment/summarize.jinja",
        include_str!("../../../templates/prompts/enrichment/summarize.jinja"),
    ),
    (
        "assistant/answer.jinja",
        include_str!("../../../templates/prompts/assistant/answer.jinja"),
    ),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in BUILTIN_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Built-in template {} is invalid: {}", name, e);
        }
    }

    let override_dir = Path::new(TEMPLATE_DIR);
    if override_dir.is_dir() {
        load_overrides(&mut env, override_dir, override_dir);
    }

    env
}

/// Recursively registers every `.jinja` file, replacing built-ins of the same name
fn load_overrides(env: &mut Environment<'static>, base: &Path, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            load_overrides(env, base, &path);
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "jinja") {
            continue;
        }

        let (Ok(relative), Ok(source)) = (path.strip_prefix(base), std::fs::read_to_string(&path))
        else {
            continue;
        };
        let name = relative.to_string_lossy().replace('\\', "/");

        // Templates live for the whole process, so leaking them is fine
        let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
        let static_source: &'static str = Box::leak(source.into_boxed_str());

        match env.add_template(static_name, static_source) {
            Ok(()) => tracing::debug!("Loaded prompt override: {}", name),
            Err(e) => tracing::warn!("Failed to load prompt override {}: {}", name, e),
        }
    }
}

fn environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Renders `template_name` (relative to `templates/prompts/`) with any serializable context
pub fn render_template<C: Serialize>(template_name: &str, ctx: C) -> Result<String, TemplateError> {
    let template = environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
