//! Load raw headline rows from a CSV export.
//!
//! The first row is a header and is skipped. Column 0 is the record id and
//! column 1 the headline; extra columns are ignored.

use std::fs::File;
use std::path::Path;

use crate::error::InputError;
use crate::model::NewRecord;

/// Read every row of `path` into [`NewRecord`]s.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be opened,
/// [`InputError::Csv`] if it is not valid CSV, and
/// [`InputError::InvalidRow`] for a row with fewer than two columns or an
/// empty record id.
pub fn read_headlines_csv(path: &Path) -> Result<Vec<NewRecord>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_headlines(file, path)
}

fn parse_headlines<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<NewRecord>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let (Some(record_id), Some(text)) = (record.get(0), record.get(1)) else {
            return Err(InputError::InvalidRow {
                path: path.to_path_buf(),
                line,
                reason: format!("expected 2 columns, found {}", record.len()),
            });
        };

        let record_id = record_id.trim();
        if record_id.is_empty() {
            return Err(InputError::InvalidRow {
                path: path.to_path_buf(),
                line,
                reason: "empty record id".to_string(),
            });
        }

        rows.push(NewRecord {
            record_id: record_id.to_string(),
            text: text.to_string(),
        });
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "parsed headline CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(body: &str) -> Result<Vec<NewRecord>, InputError> {
        parse_headlines(body.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn skips_header_and_maps_columns() {
        let rows = parse("id,headline\n1,Apple unveils new phone\n2,\"Markets fall, again\"\n")
            .unwrap();
        assert_eq!(
            rows,
            vec![
                NewRecord {
                    record_id: "1".to_string(),
                    text: "Apple unveils new phone".to_string(),
                },
                NewRecord {
                    record_id: "2".to_string(),
                    text: "Markets fall, again".to_string(),
                },
            ]
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = parse("id,headline,source\n7,Rain in Spain,wire\n").unwrap();
        assert_eq!(rows[0].record_id, "7");
        assert_eq!(rows[0].text, "Rain in Spain");
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(parse("id,headline\n").unwrap().is_empty());
    }

    #[test]
    fn short_row_reports_its_line() {
        let err = parse("id,headline\n1,ok\n2\n").unwrap_err();
        assert!(
            matches!(err, InputError::InvalidRow { line: 3, .. }),
            "expected InvalidRow on line 3, got: {err:?}"
        );
    }

    #[test]
    fn blank_record_id_is_rejected() {
        let err = parse("id,headline\n  ,orphan headline\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidRow { ref reason, .. } if reason == "empty record id"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_headlines_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "headlineId,headline").unwrap();
        writeln!(file, "a-1,Microsoft launches cloud tool").unwrap();
        let rows = read_headlines_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record_id, "a-1");
    }
}
