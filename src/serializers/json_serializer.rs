// src/serializers/json_serializer.rs
//
// JSON catalog files
//
// Written as a pretty-printed array of flat objects with fixed key order.
// Read with a brace-depth scanner so one broken object only costs that
// object: every chunk is then decoded on its own.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use super::load_errors::{LoadErrors, RecordCollector, RecordFailure};
use super::{check_load_path, EntrySerializer, FileFormat};
use crate::domain::{parse_rating, DomainError, Entry, EntryFields, ViewStatus};
use crate::error::{AppError, AppResult};

const KEY_TITLE: &str = "title";
const KEY_CREATOR: &str = "creator";
const KEY_RELEASE_YEAR: &str = "releaseYear";
const KEY_CATEGORY: &str = "category";
const KEY_RATING: &str = "rating";
const KEY_VIEW_STATUS: &str = "viewStatus";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

/// Piece of the top-level array found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    /// Balanced `{ ... }`
    Object(String),
    /// Anything else: stray braces, unclosed objects, bare values
    Malformed(String),
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, entries: &[Entry]) -> AppResult<String> {
        let mut out = String::from("[\n");
        for (index, entry) in entries.iter().enumerate() {
            out.push_str("  {\n");
            push_string_member(&mut out, KEY_TITLE, entry.title())?;
            push_string_member(&mut out, KEY_CREATOR, entry.creator())?;
            push_string_member(&mut out, KEY_RELEASE_YEAR, entry.release_year())?;
            push_string_member(&mut out, KEY_CATEGORY, entry.category())?;
            // numeric, not the display string
            out.push_str(&format!("    \"{KEY_RATING}\": {},\n", entry.rating()));
            out.push_str(&format!(
                "    \"{KEY_VIEW_STATUS}\": \"{}\"\n",
                entry.view_status().name()
            ));
            out.push_str("  }");
            if index + 1 < entries.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("]\n");
        Ok(out)
    }

    pub fn decode(&self, content: &str) -> AppResult<Vec<Entry>> {
        let trimmed = content.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| AppError::InvalidLoad(LoadErrors::single("file is not a JSON array")))?;

        let mut collector = RecordCollector::new();
        for (index, chunk) in split_objects(inner).into_iter().enumerate() {
            let position = format!("Entry #{}", index + 1);
            let parsed = match chunk {
                Chunk::Object(text) => parse_object(&text),
                Chunk::Malformed(text) => {
                    log::debug!("{position}: unbalanced object text: {text}");
                    Err(RecordFailure::malformed(FileFormat::Json))
                }
            };
            collector.accept(&position, parsed);
        }

        collector.finish()
    }
}

impl EntrySerializer for JsonSerializer {
    fn format(&self) -> FileFormat {
        FileFormat::Json
    }

    fn save(&self, entries: &[Entry], path: &Path) -> AppResult<()> {
        let encoded = self.encode(entries)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(encoded.as_bytes())?;
        writer.flush()?;
        log::info!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> AppResult<Vec<Entry>> {
        check_load_path(path, FileFormat::Json)?;
        let content = fs::read_to_string(path)?;
        let entries = self.decode(&content)?;
        log::info!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}

fn push_string_member(out: &mut String, key: &str, value: &str) -> AppResult<()> {
    let escaped = serde_json::to_string(value)?;
    out.push_str(&format!("    \"{key}\": {escaped},\n"));
    Ok(())
}

/// Split the inside of the top-level array into object chunks.
///
/// Braces inside string literals are ignored. Entry objects are flat, so a
/// `{` met while already inside an object means the previous one was never
/// closed: it becomes a malformed chunk and a new object starts.
fn split_objects(inner: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut garbage = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for c in inner.chars() {
        if depth == 0 {
            match c {
                '{' => {
                    flush_garbage(&mut chunks, &mut garbage);
                    depth = 1;
                    current.push(c);
                }
                ',' => flush_garbage(&mut chunks, &mut garbage),
                c if c.is_whitespace() && garbage.is_empty() => {}
                _ => garbage.push(c),
            }
            continue;
        }

        if in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '{' => {
                chunks.push(Chunk::Malformed(std::mem::take(&mut current)));
                current.push(c);
            }
            '}' => {
                current.push(c);
                depth -= 1;
                if depth == 0 {
                    chunks.push(Chunk::Object(std::mem::take(&mut current)));
                }
            }
            _ => current.push(c),
        }
    }

    if depth > 0 {
        chunks.push(Chunk::Malformed(current));
    }
    flush_garbage(&mut chunks, &mut garbage);
    chunks
}

fn flush_garbage(chunks: &mut Vec<Chunk>, garbage: &mut String) {
    if !garbage.trim().is_empty() {
        chunks.push(Chunk::Malformed(garbage.trim().to_string()));
    }
    garbage.clear();
}

/// Decode one isolated object. Key order is free, unknown keys are ignored.
fn parse_object(text: &str) -> Result<Entry, RecordFailure> {
    let object: Map<String, Value> =
        serde_json::from_str(text).map_err(|_| RecordFailure::malformed(FileFormat::Json))?;

    let title = text_member(&object, KEY_TITLE)?;
    let creator = text_member(&object, KEY_CREATOR)?;
    let release_year = text_member(&object, KEY_RELEASE_YEAR)?;
    let category = text_member(&object, KEY_CATEGORY)?;

    let rating = rating_member(&object).map_err(|e| RecordFailure::invalid(&title, e))?;
    // an absent status reads as "to watch"
    let view_status = match object.get(KEY_VIEW_STATUS) {
        None | Some(Value::Null) => Some(ViewStatus::ToWatch),
        Some(Value::String(value)) => {
            Some(ViewStatus::parse(value).map_err(|e| RecordFailure::invalid(&title, e))?)
        }
        Some(other) => {
            return Err(RecordFailure::invalid(
                &title,
                DomainError::UnknownViewStatus {
                    value: other.to_string(),
                },
            ))
        }
    };

    Entry::from_fields(EntryFields {
        title: title.clone(),
        creator,
        release_year,
        category,
        rating,
        view_status,
    })
    .map_err(|e| RecordFailure::invalid(&title, e))
}

/// String members; a missing key reads as empty and fails validation later
fn text_member(object: &Map<String, Value>, key: &str) -> Result<String, RecordFailure> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(_) => Err(RecordFailure::malformed(FileFormat::Json)),
    }
}

/// Numbers are taken as-is, strings follow the CSV rules, missing means unrated
fn rating_member(object: &Map<String, Value>) -> Result<i64, DomainError> {
    match object.get(KEY_RATING) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number.as_i64().ok_or_else(|| DomainError::InvalidRating {
            value: number.to_string(),
        }),
        Some(Value::String(value)) => parse_rating(value).map(i64::from),
        Some(other) => Err(DomainError::InvalidRating {
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(title: &str, rating: i64, status: ViewStatus) -> Entry {
        Entry::new(title, "Someone", "2001", "Drama", rating, status).unwrap()
    }

    fn load_errors(result: AppResult<Vec<Entry>>) -> Vec<String> {
        match result {
            Err(AppError::InvalidLoad(errors)) => errors.lines().to_vec(),
            other => panic!("expected InvalidLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_format() {
        let json = JsonSerializer::new()
            .encode(&[entry("Heat", 0, ViewStatus::Watching)])
            .unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"title\": \"Heat\",\n    \"creator\": \"Someone\",\n    \
             \"releaseYear\": \"2001\",\n    \"category\": \"Drama\",\n    \
             \"rating\": 0,\n    \"viewStatus\": \"WATCHING\"\n  }\n]\n"
        );
    }

    #[test]
    fn test_encode_is_valid_json() {
        let entries = vec![
            entry("Quote \" and \\ slash", 3, ViewStatus::Watched),
            entry("Braces {}", 5, ViewStatus::ToWatch),
        ];
        let json = JsonSerializer::new().encode(&entries).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["title"], "Quote \" and \\ slash");
        assert_eq!(value[1]["rating"], 5);
        assert_eq!(value[1]["viewStatus"], "TO_WATCH");
    }

    #[test]
    fn test_save_then_load_preserves_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.json");
        let entries = vec![
            entry("Braces {in} title", 3, ViewStatus::Watched),
            entry("Line\nBreak, \"quoted\"", 0, ViewStatus::ToWatch),
            entry("Heat", 5, ViewStatus::Watching),
        ];

        let serializer = JsonSerializer::new();
        serializer.save(&entries, &path).unwrap();
        let loaded = serializer.load(&path).unwrap();

        assert_eq!(loaded.len(), entries.len());
        for (a, b) in loaded.iter().zip(&entries) {
            assert!(a.same_fields(b), "{a} != {b}");
        }
    }

    #[test]
    fn test_empty_array() {
        let serializer = JsonSerializer::new();
        let encoded = serializer.encode(&[]).unwrap();
        assert_eq!(encoded, "[\n]\n");
        assert!(serializer.decode(&encoded).unwrap().is_empty());
        assert!(serializer.decode("  [ ]  ").unwrap().is_empty());
    }

    #[test]
    fn test_any_key_order_and_whitespace() {
        let content = r#"[{"viewStatus":"Watched","rating":"unrated","category":"Noir",
            "releaseYear":"1941","creator":"Huston","title":"The Maltese Falcon","extra":true}]"#;
        let entries = JsonSerializer::new().decode(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title(), "The Maltese Falcon");
        assert_eq!(entries[0].rating(), 0);
        assert_eq!(entries[0].view_status(), ViewStatus::Watched);
    }

    #[test]
    fn test_broken_object_only_fails_itself() {
        let content = r#"[
            {"title": "A", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 1, "viewStatus": "WATCHED"},
            {"title": "B", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 1,
            {"title": "C", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 1, "viewStatus": "WATCHED"}
        ]"#;
        let lines = load_errors(JsonSerializer::new().decode(content));
        assert_eq!(lines, vec!["Entry #2: malformed JSON record"]);
    }

    #[test]
    fn test_stray_closing_brace_is_its_own_failure() {
        let content = r#"[
            {"title": "A", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 1, "viewStatus": "WATCHED"}},
            {"title": "B", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 1, "viewStatus": "WATCHED"}
        ]"#;
        let lines = load_errors(JsonSerializer::new().decode(content));
        assert_eq!(lines, vec!["Entry #2: malformed JSON record"]);
    }

    #[test]
    fn test_invalid_and_duplicate_objects() {
        let content = r#"[
            {"title": "Film 1", "creator": "X", "releaseYear": "1234", "category": "C", "rating": 2, "viewStatus": "TO_WATCH"},
            {"title": "film 1", "creator": "x", "releaseYear": "1234", "category": "D", "rating": 4, "viewStatus": "WATCHED"},
            {"title": "Late", "creator": "X", "releaseYear": "20000", "category": "C", "rating": 2, "viewStatus": "TO_WATCH"},
            {"title": "Starry", "creator": "X", "releaseYear": "2000", "category": "C", "rating": 6, "viewStatus": "TO_WATCH"},
            {"creator": "X", "releaseYear": "2000", "category": "C", "rating": 1, "viewStatus": "TO_WATCH"}
        ]"#;
        let lines = load_errors(JsonSerializer::new().decode(content));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Entry #2 (film 1): entry already present");
        assert!(lines[1].starts_with("Entry #3 (Late): invalid or incomplete data"));
        assert!(lines[2].starts_with("Entry #4 (Starry): invalid or incomplete data"));
        assert!(lines[3].starts_with("Entry #5 (missing title): invalid or incomplete data"));
    }

    #[test]
    fn test_absent_status_and_rating_take_defaults() {
        let content = r#"[
            {"title": "No Status", "creator": "X", "releaseYear": "2000", "category": "C"}
        ]"#;
        let entries = JsonSerializer::new().decode(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].view_status(), ViewStatus::ToWatch);
        assert_eq!(entries[0].rating(), 0);
    }

    #[test]
    fn test_not_an_array() {
        let lines = load_errors(JsonSerializer::new().decode(r#"{"title": "A"}"#));
        assert_eq!(lines, vec!["file is not a JSON array"]);
    }

    #[test]
    fn test_split_objects_ignores_braces_in_strings() {
        let chunks = split_objects(r#"{"title": "a } b { c"}, {"title": "\"}"}"#);
        assert_eq!(
            chunks,
            vec![
                Chunk::Object(r#"{"title": "a } b { c"}"#.to_string()),
                Chunk::Object(r#"{"title": "\"}"}"#.to_string()),
            ]
        );
    }
}
