// src/serializers/csv_serializer.rs
//
// CSV catalog files
//
// - Header row always written, always skipped on read
// - Exactly six fields per data row
// - RFC 4180 quoting: fields with a comma, quote or line break are quoted,
//   embedded quotes are doubled
// - Rows are numbered by physical line, header = row 1

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::load_errors::{RecordCollector, RecordFailure};
use super::{check_load_path, EntrySerializer, FileFormat};
use crate::domain::{parse_rating, Entry, EntryFields, ViewStatus};
use crate::error::AppResult;

pub const CSV_HEADER: &str = "title,creator,releaseYear,category,rating,viewStatus";
const FIELD_COUNT: usize = 6;
const SEPARATOR: char = ',';
const QUOTE: char = '"';

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSerializer;

/// One logical record and the line it starts on
#[derive(Debug, PartialEq, Eq)]
struct CsvRecord {
    line: usize,
    fields: Option<Vec<String>>,
}

impl CsvSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Encode the whole catalog, header included
    pub fn encode(&self, entries: &[Entry]) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + entries.len() * 64);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for entry in entries {
            let row = [
                escape_field(entry.title()),
                escape_field(entry.creator()),
                escape_field(entry.release_year()),
                escape_field(entry.category()),
                escape_field(&entry.rating_display()),
                entry.view_status().name().to_string(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Decode file content; the header is skipped without validation
    pub fn decode(&self, content: &str) -> AppResult<Vec<Entry>> {
        let mut collector = RecordCollector::new();

        for record in split_records(content).into_iter().skip(1) {
            let position = format!("Row {}", record.line);
            let parsed = match record.fields {
                Some(fields) => parse_entry(fields),
                None => Err(RecordFailure::malformed(FileFormat::Csv)),
            };
            collector.accept(&position, parsed);
        }

        collector.finish()
    }
}

impl EntrySerializer for CsvSerializer {
    fn format(&self) -> FileFormat {
        FileFormat::Csv
    }

    fn save(&self, entries: &[Entry], path: &Path) -> AppResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.encode(entries).as_bytes())?;
        writer.flush()?;
        log::info!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> AppResult<Vec<Entry>> {
        check_load_path(path, FileFormat::Csv)?;
        let content = fs::read_to_string(path)?;
        let entries = self.decode(&content)?;
        log::info!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }
}

/// Quote a field only when it needs it
fn escape_field(field: &str) -> String {
    let needs_quotes = field.contains(&[SEPARATOR, QUOTE, '\n', '\r'][..]);
    if needs_quotes {
        format!("{QUOTE}{}{QUOTE}", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}

/// Split content into records.
///
/// A line break inside quotes belongs to the field, so a record may span
/// several physical lines. Blank lines are skipped but still counted.
/// A record whose quotes never close is returned without fields, and
/// scanning resumes on the physical line after the one it started on.
fn split_records(content: &str) -> Vec<CsvRecord> {
    let mut records = Vec::new();
    let mut offset = 0;
    let mut line = 1;

    while let Some((start_line, start_offset)) =
        scan_records(&content[offset..], line, &mut records)
    {
        records.push(CsvRecord {
            line: start_line,
            fields: None,
        });
        let from = offset + start_offset;
        match content[from..].find('\n') {
            Some(pos) => {
                offset = from + pos + 1;
                line = start_line + 1;
            }
            None => break,
        }
    }

    records
}

/// Scan `chunk`, whose first line is `first_line`, until the end or an
/// unterminated quote. Returns the line and offset where that record started.
fn scan_records(
    chunk: &str,
    first_line: usize,
    records: &mut Vec<CsvRecord>,
) -> Option<(usize, usize)> {
    let mut line = first_line;
    let mut start_line = first_line;
    let mut start_offset = 0;
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = chunk.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            QUOTE if in_quotes && matches!(chars.peek(), Some(&(_, QUOTE))) => {
                field.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => fields.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && matches!(chars.peek(), Some(&(_, '\n'))) => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                push_record(records, start_line, std::mem::take(&mut fields));
                line += 1;
                start_line = line;
                start_offset = idx + 1;
            }
            '\n' => {
                field.push(c);
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Some((start_line, start_offset));
    }
    if !fields.is_empty() || !field.is_empty() {
        fields.push(field);
        push_record(records, start_line, fields);
    }
    None
}

fn push_record(records: &mut Vec<CsvRecord>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields.first().is_some_and(|f| f.trim().is_empty());
    if blank && !records.is_empty() {
        return;
    }
    records.push(CsvRecord {
        line,
        fields: Some(fields),
    });
}

fn parse_entry(fields: Vec<String>) -> Result<Entry, RecordFailure> {
    let [title, creator, release_year, category, rating, view_status]: [String; FIELD_COUNT] =
        fields
            .try_into()
            .map_err(|_| RecordFailure::malformed(FileFormat::Csv))?;

    let rating = parse_rating(&rating).map_err(|e| RecordFailure::invalid(&title, e))?;
    let view_status =
        ViewStatus::parse(&view_status).map_err(|e| RecordFailure::invalid(&title, e))?;

    Entry::from_fields(EntryFields {
        title: title.clone(),
        creator,
        release_year,
        category,
        rating: i64::from(rating),
        view_status: Some(view_status),
    })
    .map_err(|e| RecordFailure::invalid(&title, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::tempdir;

    fn entry(title: &str, creator: &str, year: &str, rating: i64, status: ViewStatus) -> Entry {
        Entry::new(title, creator, year, "Drama", rating, status).unwrap()
    }

    fn load_errors(result: AppResult<Vec<Entry>>) -> Vec<String> {
        match result {
            Err(AppError::InvalidLoad(errors)) => errors.lines().to_vec(),
            other => panic!("expected InvalidLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_format() {
        let entries = vec![
            entry("Il Padrino", "F. Coppola", "1972", 5, ViewStatus::Watched),
            entry("Interstellar", "C. Nolan", "2014", 0, ViewStatus::ToWatch),
        ];
        let csv = CsvSerializer::new().encode(&entries);
        assert_eq!(
            csv,
            "title,creator,releaseYear,category,rating,viewStatus\n\
             Il Padrino,F. Coppola,1972,Drama,5,WATCHED\n\
             Interstellar,C. Nolan,2014,Drama,unrated,TO_WATCH\n"
        );
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_split_records_handles_quotes() {
        let records = split_records("h\n\"a,b\",\"x\"\"y\",c\n\n\"multi\nline\",z\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].line, 2);
        assert_eq!(
            records[1].fields.as_deref(),
            Some(&["a,b".to_string(), "x\"y".to_string(), "c".to_string()][..])
        );
        assert_eq!(records[2].line, 4);
        assert_eq!(
            records[2].fields.as_deref(),
            Some(&["multi\nline".to_string(), "z".to_string()][..])
        );
    }

    #[test]
    fn test_save_then_load_preserves_everything() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.csv");
        let entries = vec![
            entry("Me, Myself \"and\" Irene", "Farrelly", "2000", 2, ViewStatus::Watching),
            entry("Line\nBreak", "Someone", "1990", 0, ViewStatus::ToWatch),
            entry("Heat", "Mann", "1995", 5, ViewStatus::Watched),
        ];

        let serializer = CsvSerializer::new();
        serializer.save(&entries, &path).unwrap();
        let loaded = serializer.load(&path).unwrap();

        assert_eq!(loaded.len(), entries.len());
        for (a, b) in loaded.iter().zip(&entries) {
            assert!(a.same_fields(b), "{a} != {b}");
        }
    }

    #[test]
    fn test_duplicate_rows_reject_file() {
        let content = "title,creator,releaseYear,category,rating,viewStatus\n\
                       Film 1,Regista 1,1234,Drama,3,WATCHED\n\
                       Film 1,Regista 1,1234,Drama,3,WATCHED\n";
        let lines = load_errors(CsvSerializer::new().decode(content));
        assert_eq!(lines, vec!["Row 3 (Film 1): entry already present"]);
    }

    #[test]
    fn test_every_bad_row_is_reported() {
        let content = "title,creator,releaseYear,category,rating,viewStatus\n\
                       Good,Someone,2000,Drama,3,WATCHED\n\
                       Short,row\n\
                       \n\
                       Bad Year,Someone,20x0,Drama,3,WATCHED\n\
                       ,Someone,2000,Drama,3,WATCHED\n\
                       Bad Rating,Someone,2000,Drama,9,WATCHED\n\
                       Bad Status,Someone,2000,Drama,3,SEEN\n";
        let lines = load_errors(CsvSerializer::new().decode(content));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Row 3: malformed CSV record");
        assert!(lines[1].starts_with("Row 5 (Bad Year): invalid or incomplete data"));
        assert!(lines[2].starts_with("Row 6 (missing title): invalid or incomplete data"));
        assert!(lines[3].starts_with("Row 7 (Bad Rating): invalid or incomplete data"));
        assert!(lines[4].starts_with("Row 8 (Bad Status): invalid or incomplete data"));
    }

    #[test]
    fn test_lenient_rating_and_status_values() {
        let content = "header\n\
                       A,X,2000,Drama,Unrated,to watch\n\
                       B,X,2001,Drama,0,watching\n\
                       C,X,2002,Drama, 4 ,Watched\n";
        let entries = CsvSerializer::new().decode(content).unwrap();
        assert_eq!(entries[0].rating(), 0);
        assert_eq!(entries[0].view_status(), ViewStatus::ToWatch);
        assert_eq!(entries[1].view_status(), ViewStatus::Watching);
        assert_eq!(entries[2].rating(), 4);
    }

    #[test]
    fn test_unterminated_quote_is_malformed() {
        let content = "header\nGood,X,2000,Drama,1,WATCHED\n\"Open,X,2000,Drama,1,WATCHED\n";
        let lines = load_errors(CsvSerializer::new().decode(content));
        assert_eq!(lines, vec!["Row 3: malformed CSV record"]);
    }

    #[test]
    fn test_unterminated_quote_does_not_swallow_later_rows() {
        let content = "title,creator,releaseYear,category,rating,viewStatus\n\
                       \"Open,X,2000,Drama,1,WATCHED\n\
                       Good,X,2001,Drama,1,WATCHED\n\
                       Bad Year,X,20x0,Drama,3,WATCHED\n";
        let lines = load_errors(CsvSerializer::new().decode(content));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Row 2: malformed CSV record");
        assert!(lines[1].starts_with("Row 4 (Bad Year): invalid or incomplete data"));
    }

    #[test]
    fn test_rows_after_unterminated_quote_are_still_read() {
        let records = split_records("h\n\"open,a\nB,b\n\nC,c");
        assert_eq!(records.len(), 4);
        assert_eq!(records[1], CsvRecord { line: 2, fields: None });
        assert_eq!(records[2].line, 3);
        assert_eq!(
            records[2].fields.as_deref(),
            Some(&["B".to_string(), "b".to_string()][..])
        );
        assert_eq!(records[3].line, 5);
        assert_eq!(
            records[3].fields.as_deref(),
            Some(&["C".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn test_header_only_and_empty_files_load_empty() {
        let serializer = CsvSerializer::new();
        assert!(serializer.decode(CSV_HEADER).unwrap().is_empty());
        assert!(serializer.decode("").unwrap().is_empty());
    }

    #[test]
    fn test_windows_line_endings() {
        let content = "header\r\nA,X,2000,Drama,1,WATCHED\r\nB,X,2000,Drama,2,WATCHED\r\n";
        let entries = CsvSerializer::new().decode(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].view_status(), ViewStatus::Watched);
    }

    #[test]
    fn test_load_checks_path_first() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("films.tar.csv");
        std::fs::write(&bad, CSV_HEADER).unwrap();
        assert!(matches!(
            CsvSerializer::new().load(&bad),
            Err(AppError::InvalidExtension { .. })
        ));
        assert!(matches!(
            CsvSerializer::new().load(&dir.path().join("absent.csv")),
            Err(AppError::FileNotFound { .. })
        ));
    }
}
