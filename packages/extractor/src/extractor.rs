//! Extraction pipeline tying the passes together.

use crate::agenda::index_agenda;
use crate::config::ExtractionPolicy;
use crate::error::Result;
use crate::protocol::{parse_document, SessionProtocol};
use crate::registry::{build_registry, SpeechRegistry};
use crate::shortener::shorten_records;
use crate::speech::fill_registry;
use crate::types::SpeechRecord;

/// Records of one protocol plus counters for reporting.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<SpeechRecord>,
    pub summary: ExtractionSummary,
}

/// Counters of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Session date in `YYYY-MM-DD` form.
    pub date: String,
    /// Agenda groups found in the table of contents.
    pub groups: usize,
    /// Speech nodes in the session body.
    pub speeches: usize,
    /// Records created for speeches missing from the table of contents.
    pub placeholders: usize,
    /// Registry entries replaced by a later entry with the same id.
    pub overwritten: usize,
}

/// Extract speech records from protocol XML.
///
/// Any error aborts the whole run; no partial result is returned.
pub fn extract_protocol(xml: &str, policy: &ExtractionPolicy) -> Result<Extraction> {
    let doc = parse_document(xml)?;
    let protocol = SessionProtocol::locate(&doc)?;

    let groups = protocol
        .toc()
        .map(|toc| index_agenda(&doc, toc))
        .unwrap_or_default();

    let mut registry: SpeechRegistry =
        build_registry(&doc, &groups, protocol.date(), policy.duplicates)?;
    let stats = fill_registry(&mut registry, protocol.body(), protocol.date(), policy)?;

    let summary = ExtractionSummary {
        date: protocol.date().to_string(),
        groups: groups.len(),
        speeches: stats.speeches,
        placeholders: stats.placeholders,
        overwritten: registry.overwritten(),
    };

    tracing::info!(
        date = %summary.date,
        groups = summary.groups,
        records = registry.len(),
        "extracted protocol"
    );

    Ok(Extraction {
        records: registry.into_records(),
        summary,
    })
}

/// Extract speech records and fill in their short titles.
pub fn extract_protocol_with_titles(xml: &str, policy: &ExtractionPolicy) -> Result<Extraction> {
    let mut extraction = extract_protocol(xml, policy)?;
    shorten_records(&mut extraction.records);
    Ok(extraction)
}
