//! Error types for the extractor.
//!
//! A returned error aborts the run before any output file is written.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The root element is not a plenary protocol.
    #[error("Unsupported document: root element <{root}> is not a plenary protocol")]
    UnsupportedDocument { root: String },

    /// Missing required XML attribute.
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { attribute: String, element: String },

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Invalid session date.
    #[error("Invalid session date: '{0}'. Expected DD.MM.YYYY (e.g., 15.03.2021)")]
    InvalidDate(String),

    /// A speaker introduction lacks a first or last name.
    #[error("Incomplete speaker identity in speech {rid}: missing <{field}>")]
    IncompleteSpeaker { rid: String, field: String },

    /// Neither parliamentary group nor role is present for a speaker.
    #[error("Missing affiliation in speech {rid}: neither <fraktion> nor <rolle_lang> present")]
    MissingAffiliation { rid: String },

    /// A speech in the session body has no table-of-contents entry.
    #[error("Speech {rid} appears in the session body but not in the table of contents")]
    UnmatchedSpeech { rid: String },

    /// The same speech id is referenced by more than one agenda entry.
    #[error("Speech id {rid} is referenced more than once in the table of contents")]
    DuplicateSpeechId { rid: String },

    /// The output file already carries short titles.
    #[error("Titles already shortened in {}", .path.display())]
    TitlesAlreadyShortened { path: PathBuf },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON (de)serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExtractorError::InvalidDate("2021-03-15".to_string());
        assert!(err.to_string().contains("2021-03-15"));
        assert!(err.to_string().contains("DD.MM.YYYY"));
    }

    #[test]
    fn test_missing_attribute_display() {
        let err = ExtractorError::MissingAttribute {
            attribute: "sitzung-datum".to_string(),
            element: "dbtplenarprotokoll".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required attribute 'sitzung-datum' on <dbtplenarprotokoll>"
        );
    }

    #[test]
    fn test_titles_already_shortened_display() {
        let err = ExtractorError::TitlesAlreadyShortened {
            path: PathBuf::from("plenar/19001.json"),
        };
        assert_eq!(err.to_string(), "Titles already shortened in plenar/19001.json");
    }
}
