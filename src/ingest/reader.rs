use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use csv::{ByteRecordsIntoIter, ReaderBuilder};
use tracing::{debug, warn};

use crate::errors::TdError;

use super::row::TraceRow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DEFAULT_DELIMITER: u8 = b';';

fn skip_bom<R: BufRead>(mut reader: R) -> Result<R, TdError> {
    let has_bom = reader.fill_buf()?.starts_with(UTF8_BOM);
    if has_bom {
        reader.consume(UTF8_BOM.len());
    }
    Ok(reader)
}

/// Lazy row stream over a delimited export.
///
/// The header is read when the reader is built; afterwards iteration never
/// fails. Short records yield empty values for the missing columns and
/// undecodable bytes are replaced rather than rejected.
pub struct RowReader<R: Read> {
    headers: Vec<String>,
    records: ByteRecordsIntoIter<R>,
    line: u64,
}

impl RowReader<BufReader<File>> {
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self, TdError> {
        if !path.exists() {
            return Err(TdError::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), delimiter)
    }
}

impl<R: BufRead> RowReader<R> {
    pub fn from_reader(reader: R, delimiter: u8) -> Result<Self, TdError> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(skip_bom(reader)?);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| TdError::MalformedInput(format!("Header row could not be read: {}", e)))?
            .iter()
            .map(|column| column.to_string())
            .collect();

        if headers.iter().all(|column| column.trim().is_empty()) {
            return Err(TdError::MalformedInput(
                "Header row is missing".to_string(),
            ));
        }
        debug!(columns = headers.len(), "read header row");

        Ok(Self {
            headers,
            records: csv_reader.into_byte_records(),
            line: 1,
        })
    }
}

impl<R: Read> RowReader<R> {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = TraceRow;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => {
                self.line += 1;
                let fields: HashMap<String, String> = self
                    .headers
                    .iter()
                    .zip(record.iter())
                    .map(|(column, value)| {
                        (column.clone(), String::from_utf8_lossy(value).into_owned())
                    })
                    .collect();
                if fields.len() < self.headers.len() {
                    debug!(line = self.line, "record shorter than header");
                }
                Some(TraceRow::new(fields))
            }
            Err(e) => {
                // Only I/O failures reach here with a flexible reader; the
                // underlying stream is not trustworthy after that.
                warn!(line = self.line, error = %e, "stopped reading input");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::ingest::row::{PARENT_KEY, REQUIREMENT_KEY, TEST_KEY, TEST_STATUS};
    use pretty_assertions::assert_eq;

    fn reader(input: &[u8]) -> Result<RowReader<Cursor<Vec<u8>>>, TdError> {
        RowReader::from_reader(Cursor::new(input.to_vec()), DEFAULT_DELIMITER)
    }

    #[test]
    fn reads_rows_with_bom() {
        let input = "\u{feff}Parent Requirement Key;Requirement Key;Test Key\nEPIC-1; STORY-1 ;TEST-1\n";
        let rows: Vec<TraceRow> = reader(input.as_bytes()).unwrap().collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(PARENT_KEY), "EPIC-1");
        assert_eq!(rows[0].get(REQUIREMENT_KEY), "STORY-1");
        assert_eq!(rows[0].get(TEST_KEY), "TEST-1");
    }

    #[test]
    fn short_records_default_to_empty() {
        let input = b"Requirement Key;Test Key;Test Status\nSTORY-1\nSTORY-2;TEST-2;PASS;extra\n";
        let rows: Vec<TraceRow> = reader(input).unwrap().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(TEST_KEY), "");
        assert_eq!(rows[0].get(TEST_STATUS), "");
        assert_eq!(rows[1].get(TEST_STATUS), "PASS");
    }

    #[test]
    fn quoted_fields_keep_delimiter() {
        let input = b"Requirement Key;Requirement Summary\nSTORY-1;\"Login; logout\"\n";
        let rows: Vec<TraceRow> = reader(input).unwrap().collect();
        assert_eq!(rows[0].get("Requirement Summary"), "Login; logout");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let input = b"Requirement Key;Test Summary\nSTORY-1;caf\xE9\n";
        let rows: Vec<TraceRow> = reader(input).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(REQUIREMENT_KEY), "STORY-1");
        assert!(rows[0].get("Test Summary").starts_with("caf"));
    }

    #[test]
    fn missing_header_is_malformed() {
        assert!(matches!(reader(b""), Err(TdError::MalformedInput(_))));
        assert!(matches!(reader(b";;\n"), Err(TdError::MalformedInput(_))));
        assert!(matches!(
            reader(b"Requirement\xFF Key;Test Key\n"),
            Err(TdError::MalformedInput(_))
        ));
    }

    #[test]
    fn header_only_yields_no_rows() {
        let reader = reader(b"Requirement Key;Test Key\n").unwrap();
        assert_eq!(reader.headers().len(), 2);
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn custom_delimiter() {
        let input = b"Requirement Key,Test Key\nSTORY-1,TEST-1\n";
        let rows: Vec<TraceRow> = RowReader::from_reader(Cursor::new(input.to_vec()), b',')
            .unwrap()
            .collect();
        assert_eq!(rows[0].get(TEST_KEY), "TEST-1");
    }

    #[test]
    fn from_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Requirement Key;Test Key").unwrap();
        writeln!(temp_file, "STORY-1;TEST-1").unwrap();

        let rows: Vec<TraceRow> = RowReader::from_path(temp_file.path(), DEFAULT_DELIMITER)
            .unwrap()
            .collect();
        assert_eq!(rows.len(), 1);

        let missing = temp_file.path().with_extension("missing");
        assert!(matches!(
            RowReader::from_path(&missing, DEFAULT_DELIMITER),
            Err(TdError::InputNotFound(path)) if path == missing
        ));
    }
}
