//! JSON output of speech record collections.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ExtractorError, Result};
use crate::shortener::shorten_records;
use crate::types::SpeechRecord;

/// Output path for a protocol: the input path with a `.json` extension.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use plenar_extractor::output::output_path_for;
///
/// assert_eq!(
///     output_path_for(Path::new("protokolle/19215.xml")),
///     Path::new("protokolle/19215.json")
/// );
/// ```
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("json")
}

/// Serialize records as an indented JSON array.
///
/// Non-ASCII characters are written as-is, nesting is indented by one space.
pub fn to_json(records: &[SpeechRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    records.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| {
        ExtractorError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Temporary sibling of `path`: the full file name with `.tmp` appended.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replace `path` with `data` through a temporary sibling.
///
/// The temporary file is removed again if the rename fails.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, data)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Write records to `path`.
///
/// The collection is serialized completely before the file is touched.
pub fn save_records(path: &Path, records: &[SpeechRecord]) -> Result<()> {
    let json = to_json(records)?;
    atomic_write(path, json.as_bytes())?;
    tracing::debug!(path = %path.display(), records = records.len(), "saved records");
    Ok(())
}

/// Read a previously written record collection.
pub fn load_records(path: &Path) -> Result<Vec<SpeechRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Add short titles to every record of an output file.
///
/// Refuses, leaving the file untouched, if any record already has a short
/// title. Returns the number of records updated.
pub fn shorten_file(path: &Path) -> Result<usize> {
    let mut records = load_records(path)?;

    if records.iter().any(|r| r.title_short.is_some()) {
        return Err(ExtractorError::TitlesAlreadyShortened {
            path: path.to_path_buf(),
        });
    }

    shorten_records(&mut records);
    save_records(path, &records)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<SpeechRecord> {
        let mut record = SpeechRecord::new(
            "Tagesordnungspunkt 2: Antrag der Fraktion: Gebäudeenergie",
            "2021-03-04",
        );
        record.speaker = "Jörg Müller".to_string();
        record.affiliation = "CDU/CSU".to_string();
        record.text = "Jörg Müller (CDU/CSU): Grüß Gott! ".to_string();
        vec![record]
    }

    #[test]
    fn test_to_json_format() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(
            json,
            "[\n {\n  \"title\": \"Tagesordnungspunkt 2: Antrag der Fraktion: Gebäudeenergie\",\n  \
             \"speaker\": \"Jörg Müller\",\n  \"affiliation\": \"CDU/CSU\",\n  \
             \"date\": \"2021-03-04\",\n  \"text\": \"Jörg Müller (CDU/CSU): Grüß Gott! \"\n }\n]"
        );
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("19215.json");

        save_records(&path, &sample()).unwrap();
        assert!(!dir.path().join("19215.json.tmp").exists());
        assert_eq!(load_records(&path).unwrap(), sample());
    }

    #[test]
    fn test_save_keeps_same_stem_neighbours() {
        let dir = TempDir::new().unwrap();
        let neighbour = dir.path().join("19215.tmp");
        fs::write(&neighbour, "<dbtplenarprotokoll/>").unwrap();

        save_records(&dir.path().join("19215.json"), &sample()).unwrap();
        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "<dbtplenarprotokoll/>");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory at the target path makes the rename fail.
        let target = dir.path().join("19215.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inhalt"), "x").unwrap();

        assert!(matches!(
            save_records(&target, &sample()),
            Err(ExtractorError::Io(_))
        ));
        assert!(!dir.path().join("19215.json.tmp").exists());
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        assert_eq!(
            temp_path(Path::new("out/19215.json")),
            PathBuf::from("out/19215.json.tmp")
        );
    }

    #[test]
    fn test_shorten_file_then_refuse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("19215.json");
        save_records(&path, &sample()).unwrap();

        assert_eq!(shorten_file(&path).unwrap(), 1);
        let records = load_records(&path).unwrap();
        assert_eq!(records[0].title_short.as_deref(), Some("Gebäudeenergie"));

        let before = fs::read(&path).unwrap();
        let err = shorten_file(&path).unwrap_err();
        assert!(matches!(err, ExtractorError::TitlesAlreadyShortened { .. }));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_load_records_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_records(&path), Err(ExtractorError::Json(_))));
    }
}
