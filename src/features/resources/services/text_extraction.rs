//! Turns stored file bytes into the text that enrichment and Q&A work from.
//!
//! Only text formats are decoded; other formats get a descriptive placeholder
//! so approved resources never carry empty content.

use crate::features::resources::models::mime_essence;

const PDF: &str = "application/pdf";

/// Extracts text from a stored file
pub fn extract_text(file_name: &str, content_type: &str, bytes: &[u8]) -> String {
    let mime = mime_essence(content_type);

    if mime == PDF {
        return format!(
            "[Text from PDF: {}] - This is a placeholder. Full text extraction requires a dedicated PDF parser.",
            file_name
        );
    }

    if mime.starts_with("image/") {
        return format!("[Image file: {}] - No text content available.", file_name);
    }

    if mime.starts_with("text/") {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        return format!("[Empty text file: {}] - No text content available.", file_name);
    }

    format!(
        "[File: {} ({})] - Text extraction is not supported for this format.",
        file_name, mime
    )
}
