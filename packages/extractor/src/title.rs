//! Display titles for agenda items and groups.

use crate::config::TITLE_CONNECTOR;
use crate::types::{AgendaGroup, AgendaItem};

/// Build the title of one agenda item: block title followed by its sub-points.
///
/// # Examples
/// ```
/// use plenar_extractor::title::item_title;
/// use plenar_extractor::types::AgendaItem;
/// # let doc = roxmltree::Document::parse("<ivz-block/>").unwrap();
///
/// let item = AgendaItem {
///     node: doc.root_element().id(),
///     title: "Tagesordnungspunkt 1:".to_string(),
///     subtitles: vec!["Antrag der Fraktion: Klimaschutz".to_string()],
///     carries_speech: true,
/// };
/// assert_eq!(item_title(&item), "Tagesordnungspunkt 1: Antrag der Fraktion: Klimaschutz");
/// ```
#[must_use]
pub fn item_title(item: &AgendaItem) -> String {
    let mut title = item.title.clone();
    for subtitle in &item.subtitles {
        title.push(' ');
        title.push_str(subtitle);
    }
    title
}

impl AgendaGroup {
    /// Built title of the first member item.
    #[must_use]
    pub fn short_title(&self) -> String {
        self.items.first().map(item_title).unwrap_or_default()
    }

    /// Built titles of all member items joined by `" in Verbindung mit "`.
    #[must_use]
    pub fn long_title(&self) -> String {
        self.items
            .iter()
            .map(item_title)
            .collect::<Vec<_>>()
            .join(TITLE_CONNECTOR)
    }
}
