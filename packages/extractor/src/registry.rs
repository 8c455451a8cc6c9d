//! Speech registry: skeleton records keyed by speech id.
//!
//! Records are stored in insertion order in a `Vec` with a side index from
//! `rid` to position, so output order follows the table of contents and
//! records can be mutated in place by the body pass.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::config::{DuplicateIdPolicy, ENTRY_TAG, RID_ATTR, XREF_TAG};
use crate::error::{ExtractorError, Result};
use crate::types::{AgendaGroup, SpeechRecord};
use crate::xml::{element_children, find_children, find_descendants, get_attribute};

/// Outcome of inserting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The id was new.
    Created,
    /// An existing record with the same id was replaced.
    Replaced,
}

/// Speech records keyed by `rid`, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct SpeechRegistry {
    records: Vec<SpeechRecord>,
    index: HashMap<String, usize>,
    duplicates: DuplicateIdPolicy,
    overwritten: usize,
}

impl SpeechRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(duplicates: DuplicateIdPolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Insert a record under `rid`.
    ///
    /// An existing record keeps its position and is replaced (last write
    /// wins), unless the policy forbids duplicates.
    pub fn insert(&mut self, rid: &str, record: SpeechRecord) -> Result<Insertion> {
        if let Some(&pos) = self.index.get(rid) {
            if self.duplicates == DuplicateIdPolicy::Error {
                return Err(ExtractorError::DuplicateSpeechId {
                    rid: rid.to_string(),
                });
            }
            tracing::warn!(rid, previous = %self.records[pos].title, "overwriting duplicate speech id");
            self.records[pos] = record;
            self.overwritten += 1;
            return Ok(Insertion::Replaced);
        }

        self.index.insert(rid.to_string(), self.records.len());
        self.records.push(record);
        Ok(Insertion::Created)
    }

    /// Get the record for `rid`.
    #[must_use]
    pub fn get(&self, rid: &str) -> Option<&SpeechRecord> {
        self.index.get(rid).map(|&pos| &self.records[pos])
    }

    /// Get the record for `rid` for in-place mutation.
    pub fn get_mut(&mut self, rid: &str) -> Option<&mut SpeechRecord> {
        self.index.get(rid).map(|&pos| &mut self.records[pos])
    }

    #[must_use]
    pub fn contains(&self, rid: &str) -> bool {
        self.index.contains_key(rid)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records replaced by a later insertion with the same id.
    #[must_use]
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    /// Records in registry order.
    pub fn records(&self) -> &[SpeechRecord] {
        &self.records
    }

    /// Take ownership of the records, in registry order.
    #[must_use]
    pub fn into_records(self) -> Vec<SpeechRecord> {
        self.records
    }
}

/// Whether an entry lists a speaker with speech references.
///
/// Speaker entries have at least two children (speaker line and
/// cross-reference), and the speaker line itself wraps exactly one element.
pub fn is_speech_list_entry(entry: Node<'_, '_>) -> bool {
    let children: Vec<Node<'_, '_>> = element_children(entry).collect();
    children.len() >= 2 && element_children(children[0]).count() == 1
}

/// Speech ids referenced by one agenda block's speech-list entries.
pub fn speech_ids<'a>(block: Node<'a, '_>) -> Vec<&'a str> {
    let mut rids = Vec::new();
    for entry in find_children(block, ENTRY_TAG).filter(|e| is_speech_list_entry(*e)) {
        for xref in find_descendants(entry, XREF_TAG) {
            match get_attribute(xref, RID_ATTR) {
                Some(rid) => rids.push(rid),
                None => tracing::warn!("skipping cross-reference without rid"),
            }
        }
    }
    rids
}

/// Create skeleton records for every speech referenced by the agenda groups.
///
/// Each record carries the group's long title and the session date.
pub fn build_registry(
    doc: &Document<'_>,
    groups: &[AgendaGroup],
    date: &str,
    duplicates: DuplicateIdPolicy,
) -> Result<SpeechRegistry> {
    let mut registry = SpeechRegistry::new(duplicates);

    for group in groups {
        let title = group.long_title();
        let mut count = 0;

        for item in &group.items {
            let Some(block) = doc.get_node(item.node) else {
                continue;
            };
            for rid in speech_ids(block) {
                registry.insert(rid, SpeechRecord::new(title.as_str(), date))?;
                count += 1;
            }
        }

        tracing::debug!(title = %group.short_title(), speeches = count, "registered agenda group");
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::index_agenda;

    const TOC: &str = r#"<inhaltsverzeichnis>
  <ivz-block>
    <ivz-block-titel>Tagesordnungspunkt 1:</ivz-block-titel>
    <ivz-eintrag><ivz-eintrag-inhalt>Haushalt</ivz-eintrag-inhalt></ivz-eintrag>
    <ivz-eintrag>
      <ivz-eintrag-inhalt><redner id="11"><name/></redner>Anna Beispiel (SPD)</ivz-eintrag-inhalt>
      <xref rid="ID1"/>
      <xref rid="ID2"/>
    </ivz-eintrag>
  </ivz-block>
  <ivz-eintrag><ivz-eintrag-inhalt>in Verbindung mit</ivz-eintrag-inhalt></ivz-eintrag>
  <ivz-block>
    <ivz-block-titel>Zusatzpunkt 1:</ivz-block-titel>
    <ivz-eintrag><ivz-eintrag-inhalt>Steuern</ivz-eintrag-inhalt></ivz-eintrag>
    <ivz-eintrag>
      <ivz-eintrag-inhalt><redner id="12"><name/></redner>Bernd Muster (FDP)</ivz-eintrag-inhalt>
      <xref rid="ID3"/>
    </ivz-eintrag>
  </ivz-block>
  <ivz-block>
    <ivz-block-titel>Tagesordnungspunkt 2:</ivz-block-titel>
    <ivz-eintrag>
      <ivz-eintrag-inhalt><redner id="13"><name/></redner>Clara Probe (CDU/CSU)</ivz-eintrag-inhalt>
      <xref rid="ID2"/>
    </ivz-eintrag>
  </ivz-block>
</inhaltsverzeichnis>"#;

    #[test]
    fn test_speech_list_entry_shape() {
        let xml = r#"<b>
            <ivz-eintrag><ivz-eintrag-inhalt>Haushalt</ivz-eintrag-inhalt></ivz-eintrag>
            <ivz-eintrag><ivz-eintrag-inhalt><redner/>Anna</ivz-eintrag-inhalt><xref rid="1"/></ivz-eintrag>
            <ivz-eintrag><ivz-eintrag-inhalt>Anna</ivz-eintrag-inhalt><xref rid="2"/></ivz-eintrag>
        </b>"#;
        let doc = Document::parse(xml).unwrap();
        let shapes: Vec<bool> = find_children(doc.root_element(), "ivz-eintrag")
            .map(is_speech_list_entry)
            .collect();
        assert_eq!(shapes, vec![false, true, false]);
    }

    #[test]
    fn test_build_registry_titles_and_dates() {
        let doc = Document::parse(TOC).unwrap();
        let groups = index_agenda(&doc, doc.root_element());
        let registry =
            build_registry(&doc, &groups, "2021-03-15", DuplicateIdPolicy::Overwrite).unwrap();

        let joint = "Tagesordnungspunkt 1: Haushalt in Verbindung mit Zusatzpunkt 1: Steuern";
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("ID1").unwrap().title, joint);
        assert_eq!(registry.get("ID3").unwrap().title, joint);
        assert_eq!(registry.get("ID1").unwrap().date, "2021-03-15");
    }

    #[test]
    fn test_duplicate_rid_last_write_wins() {
        let doc = Document::parse(TOC).unwrap();
        let groups = index_agenda(&doc, doc.root_element());
        let registry =
            build_registry(&doc, &groups, "2021-03-15", DuplicateIdPolicy::Overwrite).unwrap();

        assert_eq!(registry.get("ID2").unwrap().title, "Tagesordnungspunkt 2:");
        assert_eq!(registry.overwritten(), 1);

        // Replaced record keeps its original position
        let order: Vec<&str> = registry.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order[1], "Tagesordnungspunkt 2:");
    }

    #[test]
    fn test_duplicate_rid_strict_policy() {
        let doc = Document::parse(TOC).unwrap();
        let groups = index_agenda(&doc, doc.root_element());
        let err = build_registry(&doc, &groups, "2021-03-15", DuplicateIdPolicy::Error).unwrap_err();
        assert!(matches!(err, ExtractorError::DuplicateSpeechId { rid } if rid == "ID2"));
    }

    #[test]
    fn test_insert_and_mutate_in_place() {
        let mut registry = SpeechRegistry::new(DuplicateIdPolicy::Overwrite);
        assert!(registry.is_empty());
        assert_eq!(
            registry.insert("ID1", SpeechRecord::new("T", "D")).unwrap(),
            Insertion::Created
        );
        assert_eq!(
            registry.insert("ID1", SpeechRecord::new("U", "D")).unwrap(),
            Insertion::Replaced
        );

        registry.get_mut("ID1").unwrap().speaker = "Anna Beispiel".to_string();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ID1"));
        assert_eq!(registry.get("ID1").unwrap().title, "U");
        assert_eq!(registry.get("ID1").unwrap().speaker, "Anna Beispiel");
    }
}
