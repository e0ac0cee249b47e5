use super::{decode_utf8, Inspector};
use crate::metadata::{FileDescriptor, FileSummary, TabularDescriptor};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Number of data rows (after the header) included in the preview.
pub const PREVIEW_ROWS: usize = 5;

/// Parses one logical line (possibly spanning physical lines inside quotes)
/// as a single record.
fn parse_record(text: &str, line: usize) -> Result<Vec<String>, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut fields = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ValidationError::MalformedDocument {
            message: e.to_string(),
            line: line + e.position().map(|p| p.line() as usize).unwrap_or(1) - 1,
            column: 1,
        })?;
        fields.extend(record.iter().map(str::to_string));
    }
    Ok(fields)
}

/// CSV inspector. Every line is a row, blank lines included as empty rows;
/// the first row is the header and rows may have differing field counts.
pub struct TabularInspector;

impl Inspector for TabularInspector {
    type Decoded = Vec<Vec<String>>;

    fn decode(&self, upload: &Upload) -> Result<Vec<Vec<String>>, ValidationError> {
        let text = decode_utf8(upload, "CSV")?;

        let mut rows = Vec::new();
        let mut pending = String::new();
        let mut record_line = 0;
        for (index, line) in text.lines().enumerate() {
            if pending.is_empty() {
                record_line = index + 1;
                if line.is_empty() {
                    rows.push(Vec::new());
                    continue;
                }
            } else {
                pending.push('\n');
            }
            pending.push_str(line);
            // An odd quote count means a quoted field continues on the next line.
            if pending.matches('"').count() % 2 == 0 {
                rows.push(parse_record(&pending, record_line)?);
                pending.clear();
            }
        }
        if !pending.is_empty() {
            rows.push(parse_record(&pending, record_line)?);
        }
        Ok(rows)
    }

    fn summarize(&self, upload: &Upload, rows: Vec<Vec<String>>) -> FileDescriptor {
        let columns = rows.first().cloned().unwrap_or_default();
        let preview_rows = rows.iter().skip(1).take(PREVIEW_ROWS).cloned().collect();

        FileDescriptor::Tabular(TabularDescriptor {
            summary: FileSummary::of(upload),
            total_rows: rows.len(),
            total_columns: columns.len(),
            columns,
            preview_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect(text: &[u8]) -> Result<TabularDescriptor, ValidationError> {
        let upload = Upload::new("data.csv", Some("text/csv".to_string()), text.to_vec());
        match TabularInspector.inspect(&upload)? {
            FileDescriptor::Tabular(descriptor) => Ok(descriptor),
            other => panic!("unexpected descriptor: {:?}", other),
        }
    }

    #[test]
    fn test_header_and_row_counts() {
        let descriptor = inspect(b"name,age,city\nana,31,lima\nbo,25,oslo\n").unwrap();
        assert_eq!(descriptor.columns, vec!["name", "age", "city"]);
        assert_eq!(descriptor.total_columns, 3);
        assert_eq!(descriptor.total_rows, 3);
        assert_eq!(
            descriptor.preview_rows,
            vec![vec!["ana", "31", "lima"], vec!["bo", "25", "oslo"]]
        );
    }

    #[test]
    fn test_preview_is_bounded_and_excludes_header() {
        let mut text = String::from("id,value\n");
        for i in 0..12 {
            text.push_str(&format!("{},{}\n", i, i * 10));
        }
        let descriptor = inspect(text.as_bytes()).unwrap();
        assert_eq!(descriptor.total_rows, 13);
        assert_eq!(descriptor.preview_rows.len(), PREVIEW_ROWS);
        assert_eq!(descriptor.preview_rows[0], vec!["0", "0"]);
        assert!(descriptor
            .preview_rows
            .iter()
            .all(|row| row != &descriptor.columns));
    }

    #[test]
    fn test_header_only() {
        let descriptor = inspect(b"a,b,c").unwrap();
        assert_eq!(descriptor.total_rows, 1);
        assert!(descriptor.preview_rows.is_empty());
    }

    #[test]
    fn test_empty_file() {
        let descriptor = inspect(b"").unwrap();
        assert_eq!(descriptor.total_rows, 0);
        assert_eq!(descriptor.total_columns, 0);
        assert!(descriptor.columns.is_empty());
    }

    #[test]
    fn test_quoted_fields_and_ragged_rows() {
        let descriptor = inspect(b"title,notes\n\"Hello, world\",\"multi\nline\"\nshort\n").unwrap();
        assert_eq!(descriptor.total_rows, 3);
        assert_eq!(descriptor.preview_rows[0], vec!["Hello, world", "multi\nline"]);
        assert_eq!(descriptor.preview_rows[1], vec!["short"]);
    }

    #[test]
    fn test_blank_lines_are_empty_rows() {
        let descriptor = inspect(b"h1,h2\n\n1,2\n\n3,4").unwrap();
        assert_eq!(descriptor.total_rows, 5);
        assert_eq!(descriptor.columns, vec!["h1", "h2"]);
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            descriptor.preview_rows,
            vec![
                empty.clone(),
                vec!["1".to_string(), "2".to_string()],
                empty,
                vec!["3".to_string(), "4".to_string()],
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let descriptor = inspect(b"a,b\r\n1,2\r\n\r\n").unwrap();
        assert_eq!(descriptor.total_rows, 3);
        assert_eq!(descriptor.preview_rows[0], vec!["1", "2"]);
        assert!(descriptor.preview_rows[1].is_empty());
    }

    #[test]
    fn test_non_utf8_is_encoding_error() {
        let err = inspect(b"name\n\xff\xfe\xfa\n").unwrap_err();
        assert!(matches!(err, ValidationError::EncodingError(_)));
    }
}
