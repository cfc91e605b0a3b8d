/// File received with an upload request, before it reaches the blob store
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Normalized MIME type of the upload
    pub fn mime_type(&self) -> String {
        mime_essence(&self.content_type)
    }

    /// Blob path for this file: `resources/{uploader}/{millis}-{name}`
    pub fn blob_path(&self, uploader_id: &str, millis: i64) -> String {
        format!(
            "resources/{}/{}-{}",
            sanitize_segment(uploader_id),
            millis,
            sanitize_segment(&self.name)
        )
    }
}

/// Lower-cased MIME type without parameters: `Text/Plain; charset=UTF-8` is `text/plain`
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Keeps a value usable as one path segment
fn sanitize_segment(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "file".to_string()
    } else {
        cleaned
    }
}
