//! Configuration constants, session date conversion and the extraction policy.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::error::{ExtractorError, Result};

/// Root element of a Bundestag plenary protocol.
pub const ROOT_TAG: &str = "dbtplenarprotokoll";

/// Root attribute carrying the session date (`DD.MM.YYYY`).
pub const SESSION_DATE_ATTR: &str = "sitzung-datum";

/// Table of contents.
pub const TOC_TAG: &str = "inhaltsverzeichnis";
/// Agenda item block inside the table of contents.
pub const BLOCK_TAG: &str = "ivz-block";
/// Title of an agenda item block.
pub const BLOCK_TITLE_TAG: &str = "ivz-block-titel";
/// Entry of a block (sub-title, speaker line, linkage marker).
pub const ENTRY_TAG: &str = "ivz-eintrag";
/// Cross-reference from an entry to a speech.
pub const XREF_TAG: &str = "xref";
/// Attribute of a cross-reference holding the speech id.
pub const RID_ATTR: &str = "rid";

/// Session body.
pub const BODY_TAG: &str = "sitzungsverlauf";
/// Topic grouping inside the session body.
pub const TOPIC_TAG: &str = "tagesordnungspunkt";
/// A single speech.
pub const SPEECH_TAG: &str = "rede";
/// Attribute of a speech holding its id.
pub const SPEECH_ID_ATTR: &str = "id";

/// Speaker identity container.
pub const SPEAKER_TAG: &str = "redner";
/// Honorific title (e.g. "Dr.").
pub const HONORIFIC_TAG: &str = "titel";
/// First name.
pub const FIRST_NAME_TAG: &str = "vorname";
/// Last name.
pub const LAST_NAME_TAG: &str = "nachname";
/// Parliamentary group.
pub const GROUP_TAG: &str = "fraktion";
/// Long form of a government or presidium role.
pub const ROLE_TAG: &str = "rolle_lang";
/// Paragraph class attribute.
pub const CLASS_ATTR: &str = "klasse";
/// Class value of a speaker introduction paragraph.
pub const SPEAKER_CLASS: &str = "redner";

/// Sole content of a table-of-contents entry announcing a joint debate.
pub const JOINT_DEBATE_PHRASE: &str = "in Verbindung mit";

/// Connector between the titles of jointly debated agenda items.
pub const TITLE_CONNECTOR: &str = " in Verbindung mit ";

/// Words opening a document-type prefix in agenda titles.
pub const PREFIX_START_WORDS: [&str; 5] = [
    "Antrag",
    "Beschlussempfehlung",
    "Unterrichtung",
    "Aktuelle",
    "Wahlvorschlag",
];

/// Word closing a document-type prefix (besides a colon-terminated token).
pub const PREFIX_STOP_WORD: &str = "zum";

/// Environment variable selecting the speaker placement.
pub const ENV_SPEAKER_PLACEMENT: &str = "PLENAR_SPEAKER_PLACEMENT";
/// Environment variable toggling honorific titles in speaker names.
pub const ENV_INCLUDE_HONORIFIC: &str = "PLENAR_INCLUDE_HONORIFIC";
/// Environment variable selecting the unmatched speech policy.
pub const ENV_UNMATCHED_SPEECHES: &str = "PLENAR_UNMATCHED_SPEECHES";
/// Environment variable selecting the duplicate speech id policy.
pub const ENV_DUPLICATE_SPEECH_IDS: &str = "PLENAR_DUPLICATE_SPEECH_IDS";

/// Session date pattern: DD.MM.YYYY.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SESSION_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").expect("valid regex"));

/// Convert a session date from `DD.MM.YYYY` to `YYYY-MM-DD`.
///
/// # Examples
/// ```
/// use plenar_extractor::config::convert_session_date;
///
/// assert_eq!(convert_session_date("15.03.2021").unwrap(), "2021-03-15");
/// assert!(convert_session_date("2021-03-15").is_err());
/// assert!(convert_session_date("31.02.2021").is_err()); // No such day
/// ```
pub fn convert_session_date(date_str: &str) -> Result<String> {
    let invalid = || ExtractorError::InvalidDate(date_str.to_string());

    let caps = SESSION_DATE_PATTERN.captures(date_str.trim()).ok_or_else(invalid)?;
    let iso = format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]);

    // Reject impossible calendar dates
    chrono::NaiveDate::parse_from_str(&iso, "%Y-%m-%d").map_err(|_| invalid())?;

    Ok(iso)
}

/// Where speaker annotations go in the assembled speech text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SpeakerPlacement {
    /// `"<name> (<affiliation>): "` at every speaker introduction, in stream order.
    #[default]
    Inline,
    /// A single annotation for the speech's own speaker, ahead of the text.
    Prefix,
}

/// What to do with a body speech that has no registry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedSpeechPolicy {
    /// Create a record with an empty title.
    #[default]
    Placeholder,
    /// Abort the run.
    Error,
}

/// What to do when a speech id is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateIdPolicy {
    /// Last write wins.
    #[default]
    Overwrite,
    /// Abort the run.
    Error,
}

/// Parameters of a single extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub speaker_placement: SpeakerPlacement,
    /// Include the honorific title (e.g. "Dr.") in speaker names.
    pub include_honorific: bool,
    pub unmatched: UnmatchedSpeechPolicy,
    pub duplicates: DuplicateIdPolicy,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            speaker_placement: SpeakerPlacement::Inline,
            include_honorific: true,
            unmatched: UnmatchedSpeechPolicy::Placeholder,
            duplicates: DuplicateIdPolicy::Overwrite,
        }
    }
}

impl ExtractionPolicy {
    /// Build a policy from `PLENAR_*` environment variables, defaulting unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a policy from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut policy = Self::default();

        if let Some(value) = lookup(ENV_SPEAKER_PLACEMENT) {
            policy.speaker_placement = match value.to_lowercase().as_str() {
                "inline" => SpeakerPlacement::Inline,
                "prefix" => SpeakerPlacement::Prefix,
                _ => return Err(invalid_value(ENV_SPEAKER_PLACEMENT, &value)),
            };
        }

        if let Some(value) = lookup(ENV_INCLUDE_HONORIFIC) {
            policy.include_honorific = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid_value(ENV_INCLUDE_HONORIFIC, &value)),
            };
        }

        if let Some(value) = lookup(ENV_UNMATCHED_SPEECHES) {
            policy.unmatched = match value.to_lowercase().as_str() {
                "placeholder" => UnmatchedSpeechPolicy::Placeholder,
                "error" => UnmatchedSpeechPolicy::Error,
                _ => return Err(invalid_value(ENV_UNMATCHED_SPEECHES, &value)),
            };
        }

        if let Some(value) = lookup(ENV_DUPLICATE_SPEECH_IDS) {
            policy.duplicates = match value.to_lowercase().as_str() {
                "overwrite" => DuplicateIdPolicy::Overwrite,
                "error" => DuplicateIdPolicy::Error,
                _ => return Err(invalid_value(ENV_DUPLICATE_SPEECH_IDS, &value)),
            };
        }

        Ok(policy)
    }

    /// Treat registry/body mismatches and duplicate ids as errors.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.unmatched = UnmatchedSpeechPolicy::Error;
        self.duplicates = DuplicateIdPolicy::Error;
        self
    }

    #[must_use]
    pub fn with_speaker_placement(mut self, placement: SpeakerPlacement) -> Self {
        self.speaker_placement = placement;
        self
    }
}

fn invalid_value(key: &str, value: &str) -> ExtractorError {
    ExtractorError::Config(format!("invalid value '{value}' for {key}"))
}
