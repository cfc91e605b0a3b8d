use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for catalog values (university, department, subject names)
    /// Must start with a letter or digit; may contain spaces and common punctuation
    /// - Valid: "City College", "Signals and Systems", "C++ Programming", "St. Mary's (North)"
    /// - Invalid: " Leading space", "-dash", "<script>", "a\tb"
    pub static ref CATALOG_VALUE_REGEX: Regex =
        Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} .,&'()+/:-]*$").unwrap();
}

/// Collapses runs of whitespace and trims the ends
pub fn normalize_catalog_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
