//! Core data types for the extractor.

use roxmltree::NodeId;
use serde::{Deserialize, Serialize};

/// One extracted speech.
///
/// Created by the registry with only `title` and `date` set, then filled in
/// place by the body pass. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRecord {
    /// Full display title of the agenda group.
    pub title: String,

    /// Shortened title, present only after the title shortener ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_short: Option<String>,

    /// Speaker name.
    pub speaker: String,

    /// Parliamentary group or role of the speaker.
    pub affiliation: String,

    /// Session date (`YYYY-MM-DD`).
    pub date: String,

    /// Full speech text.
    pub text: String,
}

impl SpeechRecord {
    /// Create a skeleton record with empty speaker fields.
    ///
    /// # Arguments
    /// * `title` - Full agenda group title (empty for untitled speeches)
    /// * `date` - Session date in `YYYY-MM-DD` form
    ///
    /// # Returns
    /// A record without short title, speaker, affiliation or text
    #[must_use]
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_short: None,
            speaker: String::new(),
            affiliation: String::new(),
            date: date.into(),
            text: String::new(),
        }
    }
}

/// One table-of-contents block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaItem {
    /// Handle of the `ivz-block` node in the parsed document.
    pub node: NodeId,

    /// Block title, e.g. "Tagesordnungspunkt 3:".
    pub title: String,

    /// Text of sub-entries that are pure sub-points.
    pub subtitles: Vec<String>,

    /// Whether any entry of this block nests a speech cross-reference.
    pub carries_speech: bool,
}

/// Agenda items debated jointly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgendaGroup {
    pub items: Vec<AgendaItem>,
}

impl AgendaGroup {
    /// Create a group from its member items.
    ///
    /// # Arguments
    /// * `items` - Jointly debated items, in table-of-contents order
    #[must_use]
    pub fn new(items: Vec<AgendaItem>) -> Self {
        Self { items }
    }
}
