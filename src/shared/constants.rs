// =============================================================================
// RESOURCE PLACEHOLDERS
// =============================================================================

/// Summary stored on a freshly uploaded resource
pub const SUMMARY_PENDING_APPROVAL: &str = "Summary will be generated upon approval.";

/// Short notes stored on a freshly uploaded resource
pub const NOTES_PENDING_APPROVAL: &str = "Notes will be generated upon approval.";

/// Summary stored while an enrichment job is running
pub const SUMMARY_GENERATING: &str = "Summary is being generated...";

/// Short notes stored while an enrichment job is running
pub const NOTES_GENERATING: &str = "Notes are being generated...";

/// Summary written when enrichment fails or times out
pub const SUMMARY_FAILED: &str = "AI summary generation failed.";

/// Short notes written when enrichment fails or times out
pub const NOTES_FAILED: &str = "AI note generation failed.";

/// Number of title tokens kept as tags
pub const MAX_DERIVED_TAGS: usize = 3;

// =============================================================================
// CATALOG DEFAULTS
// =============================================================================

pub const SEMESTERS: [&str; 4] = ["1st", "2nd", "3rd", "4th"];

pub const DEFAULT_UNIVERSITIES: [&str; 2] = ["University of Technology", "City College"];

pub const DEFAULT_DEPARTMENTS: [&str; 2] = ["Computer Science", "Electrical Engineering"];

pub const DEFAULT_SUBJECTS: [(&str, &[&str]); 2] = [
    (
        "Computer Science",
        &["Introduction to Programming", "Data Structures", "Algorithms"],
    ),
    (
        "Electrical Engineering",
        &["Circuit Theory", "Digital Logic Design", "Signals and Systems"],
    ),
];

// =============================================================================
// ASSISTANT
// =============================================================================

pub const MAX_QUESTION_LENGTH: u64 = 1000;

/// Message surfaced when the question-answering call fails
pub const ASSISTANT_FAILURE_MESSAGE: &str = "Failed to get answer from AI.";

// =============================================================================
// UPLOADS
// =============================================================================

/// MIME types accepted for resource files
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "text/markdown",
    "image/jpeg",
    "image/png",
    "image/webp",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];
