//! Plenar Extractor - Split German Bundestag plenary protocols into speeches.
//!
//! This crate reads the XML protocol of a Bundestag session (19th electoral
//! term format), resolves which agenda item each speech belongs to and
//! writes one JSON record per speech with title, speaker, affiliation, date
//! and text. A separate pass derives short display titles.
//!
//! # Example
//!
//! ```
//! use plenar_extractor::config;
//! use plenar_extractor::shorten;
//!
//! assert_eq!(config::convert_session_date("04.03.2021").unwrap(), "2021-03-04");
//! assert_eq!(
//!     shorten("Tagesordnungspunkt 3: Antrag der Fraktion der FDP: Digitale Verwaltung"),
//!     "Digitale Verwaltung"
//! );
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Element names, heuristics constants, date conversion and extraction policy
//! - [`types`]: Core data types (SpeechRecord, AgendaItem, AgendaGroup)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML utilities
//! - [`protocol`]: Document parsing and location of date, contents and body
//! - [`agenda`]: Table-of-contents indexing into agenda groups
//! - [`title`]: Agenda item and group titles
//! - [`registry`]: Ordered speech registry seeded from the agenda
//! - [`speech`]: Speaker identity and speech text extraction
//! - [`shortener`]: Short title heuristic
//! - [`extractor`]: End-to-end extraction of one protocol
//! - [`output`]: JSON output and title shortening of output files
//! - [`cli`]: Command-line interfaces

pub mod agenda;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod output;
pub mod protocol;
pub mod registry;
pub mod shortener;
pub mod speech;
pub mod title;
pub mod types;
pub mod xml;

// Re-export main functions
pub use extractor::{extract_protocol, extract_protocol_with_titles, Extraction};
pub use shortener::shorten;

// Re-export commonly used items
pub use config::{convert_session_date, ExtractionPolicy, SpeakerPlacement};
pub use error::{ExtractorError, Result};
pub use types::SpeechRecord;
