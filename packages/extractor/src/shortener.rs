//! Title shortening heuristic.
//!
//! Agenda titles read like "Tagesordnungspunkt 3: Antrag der Fraktion der
//! FDP: Digitale Verwaltung aa) Gesetzentwurf ...". The shortener drops the
//! category label, strips document-type prefixes and re-assembles the
//! sub-items marked with `aa)`, `bb)` bullets. Lossy, display only.

use crate::config::{PREFIX_START_WORDS, PREFIX_STOP_WORD};
use crate::types::SpeechRecord;

const NO_BREAK_SPACE: char = '\u{a0}';

/// Byte spans of whitespace-separated tokens.
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }

    spans
}

/// Drop everything up to and including the first token ending in `:`.
///
/// Returns the input unchanged if no token ends in `:`.
///
/// # Examples
/// ```
/// use plenar_extractor::shortener::remove_category;
///
/// assert_eq!(remove_category("Antrag der Fraktion: Thema"), "Thema");
/// assert_eq!(remove_category("Fragestunde"), "Fragestunde");
/// ```
#[must_use]
pub fn remove_category(title: &str) -> &str {
    token_spans(title)
        .into_iter()
        .find(|&(start, end)| title[start..end].ends_with(':'))
        .map_or(title, |(_, end)| title[end..].trim_start())
}

/// Delete a document-type prefix such as "Antrag der Fraktion der SPD:".
///
/// The prefix runs from the first start word through the next token that
/// ends in `:` or is `zum`. The text on both sides is joined without a
/// separator. Without a start word, or without a closing token, the input
/// is returned unchanged.
///
/// # Examples
/// ```
/// use plenar_extractor::shortener::remove_prefix;
///
/// assert_eq!(
///     remove_prefix("Antrag der Fraktion zum Klimaschutz: Inhalt"),
///     "Klimaschutz: Inhalt"
/// );
/// assert_eq!(remove_prefix("Haushaltsgesetz 2021"), "Haushaltsgesetz 2021");
/// ```
#[must_use]
pub fn remove_prefix(text: &str) -> String {
    let spans = token_spans(text);
    let token = |idx: usize| &text[spans[idx].0..spans[idx].1];

    let Some(first) = (0..spans.len()).find(|&i| PREFIX_START_WORDS.contains(&token(i))) else {
        return text.to_string();
    };
    let Some(last) = (first + 1..spans.len())
        .find(|&i| token(i).ends_with(':') || token(i) == PREFIX_STOP_WORD)
    else {
        return text.to_string();
    };

    let before = text[..spans[first].0].trim_end();
    let after = text[spans[last].1..].trim_start();
    format!("{before}{after}")
}

/// Whether a token is a sub-item bullet like `aa)` or `bb)`.
fn is_bullet_marker(token: &str) -> bool {
    let Some(body) = token.strip_suffix(')') else {
        return false;
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    body.chars().count() >= 2 && chars.all(|c| c == first)
}

/// Split content into segments at sub-item bullets.
///
/// Each bullet starts a new segment; segments closed by a bullet have
/// non-breaking spaces replaced by plain spaces. Empty segments are dropped.
///
/// # Examples
/// ```
/// use plenar_extractor::shortener::assemble_subtitles;
///
/// assert_eq!(
///     assemble_subtitles("Punkt eins aa) Punkt zwei"),
///     vec!["Punkt eins".to_string(), "aa) Punkt zwei".to_string()]
/// );
/// ```
#[must_use]
pub fn assemble_subtitles(content: &str) -> Vec<String> {
    let tokens: Vec<&str> = content.split(' ').collect();
    let mut segments = Vec::new();
    let mut start = 0;

    for (idx, token) in tokens.iter().enumerate() {
        if is_bullet_marker(token) {
            segments.push(tokens[start..idx].join(" ").replace(NO_BREAK_SPACE, " "));
            start = idx;
        }
    }
    segments.push(tokens[start..].join(" "));

    segments.retain(|segment| !segment.trim().is_empty());
    segments
}

/// Shorten a full agenda title for display.
///
/// # Examples
/// ```
/// use plenar_extractor::shortener::shorten;
///
/// assert_eq!(
///     shorten("Tagesordnungspunkt 3: Antrag der Fraktion der FDP: Digitale Verwaltung"),
///     "Digitale Verwaltung"
/// );
/// ```
#[must_use]
pub fn shorten(title: &str) -> String {
    let content = remove_prefix(remove_category(title));

    assemble_subtitles(&content)
        .iter()
        .map(|segment| remove_prefix(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Set `title_short` on every record.
pub fn shorten_records(records: &mut [SpeechRecord]) {
    for record in records {
        record.title_short = Some(shorten(&record.title));
    }
}
