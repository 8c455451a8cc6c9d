//! Plenary protocol document boundary.
//!
//! Locates the parts of a protocol the extraction passes work on and
//! converts the session date.

use roxmltree::{Document, Node, ParsingOptions};

use crate::config::{convert_session_date, BODY_TAG, ROOT_TAG, SESSION_DATE_ATTR, TOC_TAG};
use crate::error::{ExtractorError, Result};
use crate::xml::{find_child, find_descendant, get_attribute, get_tag_name};

/// Parse protocol XML.
///
/// Published protocols carry a `<!DOCTYPE dbtplenarprotokoll ...>`
/// declaration, so DTDs are allowed.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// The parts of a parsed protocol used by the extraction passes.
#[derive(Debug, Clone)]
pub struct SessionProtocol<'a, 'input> {
    /// Session date in `YYYY-MM-DD` form.
    date: String,
    toc: Option<Node<'a, 'input>>,
    body: Node<'a, 'input>,
}

impl<'a, 'input> SessionProtocol<'a, 'input> {
    /// Locate table of contents and session body, converting the session date.
    pub fn locate(doc: &'a Document<'input>) -> Result<Self> {
        let root = doc.root_element();
        let root_tag = get_tag_name(root);
        if root_tag != ROOT_TAG {
            return Err(ExtractorError::UnsupportedDocument {
                root: root_tag.to_string(),
            });
        }

        let raw_date =
            get_attribute(root, SESSION_DATE_ATTR).ok_or_else(|| ExtractorError::MissingAttribute {
                attribute: SESSION_DATE_ATTR.to_string(),
                element: ROOT_TAG.to_string(),
            })?;
        let date = convert_session_date(raw_date)?;

        let toc = find_descendant(root, TOC_TAG);
        if toc.is_none() {
            tracing::warn!("protocol has no table of contents; all speeches will be unmatched");
        }

        let body = find_child(root, BODY_TAG).ok_or_else(|| ExtractorError::MissingElement {
            element: BODY_TAG.to_string(),
            context: ROOT_TAG.to_string(),
        })?;

        Ok(Self {
            date,
            toc,
            body,
        })
    }

    /// Session date in `YYYY-MM-DD` form.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The `inhaltsverzeichnis` element, if present.
    #[must_use]
    pub fn toc(&self) -> Option<Node<'a, 'input>> {
        self.toc
    }

    /// The `sitzungsverlauf` element.
    #[must_use]
    pub fn body(&self) -> Node<'a, 'input> {
        self.body
    }
}
