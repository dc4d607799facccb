//! Streaming CSV decoding into raw `name`/`age`/`city` rows.

use crate::error::IngestError;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use std::io::Read;

/// Columns every upload must provide, in any order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "age", "city"];

/// One data row as read from the file. Fields the row does not reach are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub name: Option<String>,
    pub age: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    name: usize,
    age: usize,
    city: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, IngestError> {
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(IngestError::MissingColumn(column))
        };
        let [name, age, city] = REQUIRED_COLUMNS;
        Ok(Self {
            name: position(name)?,
            age: position(age)?,
            city: position(city)?,
        })
    }

    fn extract(&self, record: &StringRecord) -> RawRow {
        let field = |idx: usize| record.get(idx).map(str::to_string);
        RawRow {
            name: field(self.name),
            age: field(self.age),
            city: field(self.city),
        }
    }
}

/// Lazy, single-pass reader over the rows of a CSV stream.
///
/// The header is read and checked by [`RowReader::new`]; rows are then decoded
/// one at a time as the iterator is driven. Framing, UTF-8 and I/O failures
/// are yielded as `Err` and end ingestion.
pub struct RowReader<R> {
    records: StringRecordsIntoIter<R>,
    columns: ColumnIndex,
}

impl<R: Read> RowReader<R> {
    pub fn new(source: R) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            // Short rows are a validation problem, not a framing one.
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(source);

        let columns = ColumnIndex::resolve(reader.headers()?)?;
        Ok(Self {
            records: reader.into_records(),
            columns,
        })
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<RawRow, csv::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.columns;
        self.records
            .next()
            .map(|record| record.map(|record| columns.extract(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<RawRow> {
        RowReader::new(input.as_bytes())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn row(name: &str, age: &str, city: &str) -> RawRow {
        RawRow {
            name: Some(name.to_string()),
            age: Some(age.to_string()),
            city: Some(city.to_string()),
        }
    }

    #[test]
    fn reads_rows_in_order() {
        let parsed = rows("name,age,city\nAna,30,Lima\nLeo,25,Quito\n");
        assert_eq!(parsed, vec![row("Ana", "30", "Lima"), row("Leo", "25", "Quito")]);
    }

    #[test]
    fn header_order_does_not_matter() {
        let parsed = rows("city, age ,name\r\nLima,30,Ana\r\n");
        assert_eq!(parsed, vec![row("Ana", "30", "Lima")]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let parsed = rows("id,name,age,city,email\n1,Ana,30,Lima,ana@example.com\n");
        assert_eq!(parsed, vec![row("Ana", "30", "Lima")]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let parsed = rows("name,age,city\n\"Pérez, Ana\",30,\"Lima\"\n");
        assert_eq!(parsed, vec![row("Pérez, Ana", "30", "Lima")]);
    }

    #[test]
    fn short_rows_report_missing_fields() {
        let parsed = rows("name,age,city\nAna,30\n");
        assert_eq!(
            parsed,
            vec![RawRow {
                name: Some("Ana".to_string()),
                age: Some("30".to_string()),
                city: None,
            }]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let parsed = rows("name,age,city\nAna,30,Lima\n\nLeo,25,Quito\n");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(rows("name,age,city\n").is_empty());
    }

    #[test]
    fn missing_column_is_rejected_up_front() {
        let result = RowReader::new("name,city\nAna,Lima\n".as_bytes());
        assert!(matches!(result, Err(IngestError::MissingColumn("age"))));
    }

    #[test]
    fn empty_input_has_no_usable_header() {
        let result = RowReader::new("".as_bytes());
        assert!(matches!(
            result,
            Err(IngestError::MissingColumn(_)) | Err(IngestError::StreamMalformed(_))
        ));
    }

    #[test]
    fn invalid_utf8_is_a_stream_error() {
        let mut input = b"name,age,city\nAna,30,".to_vec();
        input.extend_from_slice(&[0xff, 0xfe]);
        input.push(b'\n');

        let mut reader = RowReader::new(input.as_slice()).unwrap();
        assert!(reader.next().unwrap().is_err());
    }
}
