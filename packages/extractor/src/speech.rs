//! Session body extraction.
//!
//! Walks every `rede` under every `tagesordnungspunkt` of the session body,
//! reads speaker identity and assembles the speech text, then fills the
//! matching registry record in place.

use roxmltree::Node;

use crate::config::{
    ExtractionPolicy, SpeakerPlacement, UnmatchedSpeechPolicy, CLASS_ATTR, FIRST_NAME_TAG,
    GROUP_TAG, HONORIFIC_TAG, LAST_NAME_TAG, ROLE_TAG, SPEAKER_CLASS, SPEAKER_TAG,
    SPEECH_ID_ATTR, SPEECH_TAG, TOPIC_TAG,
};
use crate::error::{ExtractorError, Result};
use crate::registry::{Insertion, SpeechRegistry};
use crate::types::SpeechRecord;
use crate::xml::{direct_text, element_children, find_children, find_descendant, get_attribute, get_text};

/// Name and affiliation of a speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerIdentity {
    pub name: String,
    pub affiliation: String,
}

impl SpeakerIdentity {
    /// Read the identity fields nested anywhere under `scope`.
    ///
    /// First and last name are required, the honorific is optional. The
    /// parliamentary group wins over the role.
    pub fn read(scope: Node<'_, '_>, rid: &str, include_honorific: bool) -> Result<Self> {
        let field = |tag: &str| find_descendant(scope, tag).map(get_text);
        let required = |tag: &str| {
            field(tag).ok_or_else(|| ExtractorError::IncompleteSpeaker {
                rid: rid.to_string(),
                field: tag.to_string(),
            })
        };

        let first_name = required(FIRST_NAME_TAG)?;
        let last_name = required(LAST_NAME_TAG)?;

        let mut parts = Vec::with_capacity(3);
        if include_honorific {
            if let Some(honorific) = field(HONORIFIC_TAG).filter(|t| !t.is_empty()) {
                parts.push(honorific);
            }
        }
        parts.push(first_name);
        parts.push(last_name);

        let affiliation = field(GROUP_TAG)
            .or_else(|| field(ROLE_TAG))
            .ok_or_else(|| ExtractorError::MissingAffiliation {
                rid: rid.to_string(),
            })?;

        Ok(Self {
            name: parts.join(" "),
            affiliation,
        })
    }

    /// `"<name> (<affiliation>): "`
    #[must_use]
    pub fn annotation(&self) -> String {
        format!("{} ({}): ", self.name, self.affiliation)
    }
}

/// Annotation for a speaker introduced inside another speech.
///
/// Missing name parts are left out and a missing affiliation shortens the
/// annotation to `"<name>: "`. Returns `None` when no name part is present.
pub fn introduction_annotation(scope: Node<'_, '_>, include_honorific: bool) -> Option<String> {
    let field = |tag: &str| {
        find_descendant(scope, tag)
            .map(get_text)
            .filter(|t| !t.is_empty())
    };

    let honorific = if include_honorific {
        field(HONORIFIC_TAG)
    } else {
        None
    };
    let name = [honorific, field(FIRST_NAME_TAG), field(LAST_NAME_TAG)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return None;
    }

    Some(match field(GROUP_TAG).or_else(|| field(ROLE_TAG)) {
        Some(affiliation) => format!("{name} ({affiliation}): "),
        None => format!("{name}: "),
    })
}

/// Identity scope of a node: its first `redner` descendant, or the node itself.
fn identity_scope<'a, 'input>(node: Node<'a, 'input>) -> Node<'a, 'input> {
    find_descendant(node, SPEAKER_TAG).unwrap_or(node)
}

/// Whether a speech child introduces a speaker.
fn is_speaker_intro(node: Node<'_, '_>) -> bool {
    get_attribute(node, CLASS_ATTR) == Some(SPEAKER_CLASS)
}

/// Fields extracted from one speech node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSpeech {
    pub rid: String,
    pub speaker: String,
    pub affiliation: String,
    pub text: String,
}

/// Collect speech nodes under every topic of the session body, in document order.
pub fn collect_speeches<'a, 'input>(body: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    find_children(body, TOPIC_TAG)
        .flat_map(|topic| find_children(topic, SPEECH_TAG))
        .collect()
}

/// Assemble the text of a speech node.
///
/// Every child's leading text is appended followed by a space. With
/// [`SpeakerPlacement::Inline`] each speaker introduction splices in its own
/// annotation at that position; with [`SpeakerPlacement::Prefix`] only the
/// speech's own speaker is annotated, ahead of the text. Introductions of
/// other speakers never fail the speech.
#[must_use]
pub fn assemble_text(
    speech: Node<'_, '_>,
    own: &SpeakerIdentity,
    rid: &str,
    policy: &ExtractionPolicy,
) -> String {
    let mut text = String::new();

    if policy.speaker_placement == SpeakerPlacement::Prefix {
        text.push_str(&own.annotation());
    }

    for child in element_children(speech) {
        if let Some(t) = direct_text(child) {
            text.push_str(t);
            text.push(' ');
        }

        if policy.speaker_placement == SpeakerPlacement::Inline && is_speaker_intro(child) {
            match introduction_annotation(identity_scope(child), policy.include_honorific) {
                Some(annotation) => text.push_str(&annotation),
                None => tracing::debug!(rid, "speaker introduction without name"),
            }
        }
    }

    text.replace('\n', " ").replace('\t', "")
}

/// Extract id, speaker, affiliation and text from one speech node.
pub fn extract_speech(speech: Node<'_, '_>, policy: &ExtractionPolicy) -> Result<ExtractedSpeech> {
    let rid = get_attribute(speech, SPEECH_ID_ATTR).ok_or_else(|| {
        ExtractorError::MissingAttribute {
            attribute: SPEECH_ID_ATTR.to_string(),
            element: SPEECH_TAG.to_string(),
        }
    })?;

    let own = SpeakerIdentity::read(identity_scope(speech), rid, policy.include_honorific)?;
    let text = assemble_text(speech, &own, rid, policy);

    Ok(ExtractedSpeech {
        rid: rid.to_string(),
        speaker: own.name,
        affiliation: own.affiliation,
        text,
    })
}

/// Counters of a body pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Speech nodes processed.
    pub speeches: usize,
    /// Records created for speeches missing from the registry.
    pub placeholders: usize,
}

/// Fill registry records from the speeches of the session body.
pub fn fill_registry(
    registry: &mut SpeechRegistry,
    body: Node<'_, '_>,
    date: &str,
    policy: &ExtractionPolicy,
) -> Result<FillStats> {
    let mut stats = FillStats::default();

    for node in collect_speeches(body) {
        let speech = extract_speech(node, policy)?;
        stats.speeches += 1;

        if !registry.contains(&speech.rid) {
            if policy.unmatched == UnmatchedSpeechPolicy::Error {
                return Err(ExtractorError::UnmatchedSpeech { rid: speech.rid });
            }
            tracing::warn!(rid = %speech.rid, "speech not in table of contents; creating untitled record");
            if registry.insert(&speech.rid, SpeechRecord::new("", date))? == Insertion::Created {
                stats.placeholders += 1;
            }
        }

        if let Some(record) = registry.get_mut(&speech.rid) {
            record.speaker = speech.speaker;
            record.affiliation = speech.affiliation;
            record.text = speech.text;
        }
    }

    tracing::debug!(
        speeches = stats.speeches,
        placeholders = stats.placeholders,
        "filled speech records"
    );

    Ok(stats)
}
