//! Table-of-contents indexing.
//!
//! The table of contents lists agenda item blocks, each with a title, plain
//! sub-point entries and speaker entries pointing at speeches in the session
//! body. Blocks separated by an `in Verbindung mit` entry are debated jointly
//! and end up in the same [`AgendaGroup`].

use roxmltree::{Document, Node, NodeId};

use crate::config::{BLOCK_TAG, BLOCK_TITLE_TAG, ENTRY_TAG, JOINT_DEBATE_PHRASE, RID_ATTR, XREF_TAG};
use crate::types::{AgendaGroup, AgendaItem};
use crate::xml::{
    element_children, find_child, find_children, find_descendants, get_attribute, get_text,
    has_tag,
};

/// Classification of a direct child of the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocEntry {
    /// An agenda item block whose title ends with `:`.
    Block(NodeId),
    /// An entry announcing that the previous block is debated jointly with the next.
    LinkageMarker,
    /// Anything else.
    PlainEntry,
}

/// Classify a single table-of-contents child.
pub fn classify(node: Node<'_, '_>) -> TocEntry {
    if has_tag(node, BLOCK_TAG) {
        let is_agenda_item = find_child(node, BLOCK_TITLE_TAG)
            .map(get_text)
            .is_some_and(|title| title.ends_with(':'));
        if is_agenda_item {
            return TocEntry::Block(node.id());
        }
    } else if has_tag(node, ENTRY_TAG) {
        let is_marker = element_children(node)
            .next()
            .is_some_and(|first| get_text(first) == JOINT_DEBATE_PHRASE);
        if is_marker {
            return TocEntry::LinkageMarker;
        }
    }
    TocEntry::PlainEntry
}

/// Classify every element child of the table of contents, in document order.
pub fn classify_toc(toc: Node<'_, '_>) -> Vec<TocEntry> {
    element_children(toc).map(classify).collect()
}

/// Whether an entry nests at least one cross-reference with a speech id.
fn has_speech_reference(entry: Node<'_, '_>) -> bool {
    find_descendants(entry, XREF_TAG).any(|xref| get_attribute(xref, RID_ATTR).is_some())
}

/// Read an agenda item from its `ivz-block` node.
///
/// Returns `None` if the block has no title.
pub fn read_agenda_item(block: Node<'_, '_>) -> Option<AgendaItem> {
    let title = get_text(find_child(block, BLOCK_TITLE_TAG)?);

    let mut subtitles = Vec::new();
    let mut carries_speech = false;

    for entry in find_children(block, ENTRY_TAG) {
        let mut children = element_children(entry);
        if let (Some(only), None) = (children.next(), children.next()) {
            let text = get_text(only);
            if !text.is_empty() {
                subtitles.push(text);
            }
        }
        carries_speech |= has_speech_reference(entry);
    }

    Some(AgendaItem {
        node: block.id(),
        title,
        subtitles,
        carries_speech,
    })
}

/// Group classified entries into jointly debated agenda groups.
///
/// A block followed by a linkage marker joins the pending group. A block
/// that is not followed by a marker closes the pending group if it carries a
/// speech reference and is dropped otherwise. Plain entries are transparent
/// when looking for the following marker.
pub fn group_agenda_items(doc: &Document<'_>, entries: &[TocEntry]) -> Vec<AgendaGroup> {
    let significant: Vec<TocEntry> = entries
        .iter()
        .copied()
        .filter(|entry| *entry != TocEntry::PlainEntry)
        .collect();

    let mut groups = Vec::new();
    let mut pending: Vec<AgendaItem> = Vec::new();

    for (idx, entry) in significant.iter().enumerate() {
        let TocEntry::Block(id) = *entry else {
            continue;
        };
        let Some(item) = doc.get_node(id).and_then(read_agenda_item) else {
            continue;
        };

        let linked = significant.get(idx + 1) == Some(&TocEntry::LinkageMarker);

        if linked {
            tracing::debug!(title = %item.title, "linking agenda item with the next one");
            pending.push(item);
        } else if item.carries_speech {
            pending.push(item);
            groups.push(AgendaGroup::new(std::mem::take(&mut pending)));
        } else {
            tracing::debug!(title = %item.title, "dropping agenda item without speeches");
        }
    }

    if !pending.is_empty() {
        tracing::debug!(
            count = pending.len(),
            "discarding linked agenda items not closed by a speech-bearing item"
        );
    }

    groups
}

/// Index the table of contents into agenda groups, in document order.
pub fn index_agenda(doc: &Document<'_>, toc: Node<'_, '_>) -> Vec<AgendaGroup> {
    let entries = classify_toc(toc);
    let groups = group_agenda_items(doc, &entries);
    tracing::debug!(
        entries = entries.len(),
        groups = groups.len(),
        "indexed table of contents"
    );
    groups
}
