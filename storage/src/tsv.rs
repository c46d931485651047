use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use std::rc::Rc;

use crate::error::StatsLoadError;

/// Iterator over the rows of a headerless, tab-separated statistics source,
/// checking that every row has the expected number of columns.
pub struct TsvRows<R: Read> {
    source_name: Rc<str>,
    columns: usize,
    records: StringRecordsIntoIter<R>,
}

/// One parsed row, remembering the source and line it came from.
#[derive(Debug)]
pub struct TsvRow {
    pub line: u64,
    source_name: Rc<str>,
    record: StringRecord,
}

impl<R: Read> TsvRows<R> {
    pub fn new(reader: R, source_name: &str, columns: usize) -> Self {
        let records = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader)
            .into_records();
        TsvRows {
            source_name: source_name.into(),
            columns,
            records,
        }
    }
}

impl<R: Read> Iterator for TsvRows<R> {
    type Item = Result<TsvRow, StatsLoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => {
                    let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                    return Some(Err(StatsLoadError::parse(&self.source_name, line, err)));
                }
            };
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            if record.len() != self.columns {
                return Some(Err(StatsLoadError::parse(
                    &self.source_name,
                    line,
                    format!(
                        "expected {} tab-separated columns, found {}",
                        self.columns,
                        record.len()
                    ),
                )));
            }
            return Some(Ok(TsvRow {
                line,
                source_name: Rc::clone(&self.source_name),
                record,
            }));
        }
    }
}

impl TsvRow {
    /// Text of the column at `index`.
    pub fn field(&self, index: usize) -> &str {
        &self.record[index]
    }

    /// Parse the column at `index` as a non-negative count.
    pub fn count(&self, index: usize) -> Result<u64, StatsLoadError> {
        let raw = self.field(index).trim();
        raw.parse::<u64>().map_err(|_| {
            StatsLoadError::parse(
                &*self.source_name,
                self.line,
                format!("invalid count `{}`", raw),
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rows(input: &str, columns: usize) -> Vec<Result<TsvRow, StatsLoadError>> {
        TsvRows::new(input.as_bytes(), "test", columns).collect()
    }

    #[test]
    fn test_rows_carry_line_numbers() {
        let rows = rows("a\tb\t1\nc\td\t2\n", 3);
        let rows = rows.into_iter().map(|r| r.unwrap()).collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[1].field(1), "d");
    }

    #[test]
    fn test_quotes_are_kept_verbatim() {
        let rows = rows("\"big\" apple\tNew_York_City\t3\n", 3);
        let row = rows.into_iter().next().unwrap().unwrap();
        assert_eq!(row.field(0), "\"big\" apple");
    }

    #[test]
    fn test_wrong_column_count_names_the_line() {
        let rows = rows("a\tb\t1\nc\t2\n", 3);
        assert!(rows[0].is_ok());
        match &rows[1] {
            Err(StatsLoadError::Parse { line, .. }) => assert_eq!(*line, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_count_rejects_non_numeric() {
        let row = rows("a\tb\tmany\n", 3).into_iter().next().unwrap().unwrap();
        match row.count(2) {
            Err(StatsLoadError::Parse {
                source_name, line, ..
            }) => {
                assert_eq!(source_name, "test");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        let row = rows("a\tb\t-4\n", 3).into_iter().next().unwrap().unwrap();
        assert!(row.count(2).is_err());
        let row = rows("a\tb\t 7 \n", 3).into_iter().next().unwrap().unwrap();
        assert_eq!(row.count(2).unwrap(), 7);
    }
}
