use std::mem;

/// An untyped table straight from the CSV text: header names and rows of
/// cells, every row padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Error type for CSV parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    #[error("no columns to parse: the file is empty")]
    NoColumns,
    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: expected {expected} fields, saw {found}")]
    TooManyFields {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// The cell at (`row`, `col`), or None when it is empty.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Append a column whose cell in each row is computed from that row.
    pub fn push_column(&mut self, name: &str, mut cell_for: impl FnMut(&[String]) -> String) {
        for row in &mut self.rows {
            let value = cell_for(row);
            row.push(value);
        }
        self.columns.push(name.to_string());
    }
}

/// A record as split from the source, with the line it started on (1-based).
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Parse CSV text with a header row.
///
/// Fields may be quoted with `"`, with `""` standing for a literal quote;
/// quoted fields may span lines. Blank lines are skipped, a leading BOM is
/// ignored, and short rows are padded with empty cells.
pub fn parse_csv(source: &str) -> Result<RawTable, CsvError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut records = split_records(source)?.into_iter();

    let header = records.next().ok_or(CsvError::NoColumns)?;
    let columns = dedupe_columns(header.fields);

    let width = columns.len();
    let mut rows = Vec::new();
    for record in records {
        let mut fields = record.fields;
        if fields.len() > width {
            return Err(CsvError::TooManyFields {
                line: record.line,
                expected: width,
                found: fields.len(),
            });
        }
        fields.resize(width, String::new());
        rows.push(fields);
    }

    Ok(RawTable { columns, rows })
}

/// Rename repeated header names to `name.1`, `name.2`, ... so the first
/// occurrence keeps its name and the rest stay addressable.
fn dedupe_columns(header: Vec<String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(header.len());
    for name in &header {
        if name.is_empty() || !columns.contains(name) {
            columns.push(name.clone());
            continue;
        }
        let mut n = 1;
        let mut renamed = format!("{}.{}", name, n);
        while columns.contains(&renamed) || header.contains(&renamed) {
            n += 1;
            renamed = format!("{}.{}", name, n);
        }
        columns.push(renamed);
    }
    columns
}

fn split_records(source: &str) -> Result<Vec<Record>, CsvError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();

    let mut in_quotes = false;
    // Whether the current field opened with a quote
    let mut field_quoted = false;
    // Whether any field of the current record was quoted
    let mut record_quoted = false;

    let mut line = 1;
    let mut record_line = 1;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_quoted => {
                in_quotes = true;
                field_quoted = true;
                record_quoted = true;
            }
            ',' => {
                fields.push(mem::take(&mut field));
                field_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                fields.push(mem::take(&mut field));
                let blank = !record_quoted && fields.len() == 1 && fields[0].is_empty();
                if !blank {
                    records.push(Record {
                        line: record_line,
                        fields: mem::take(&mut fields),
                    });
                }
                fields.clear();
                field_quoted = false;
                record_quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: record_line });
    }
    if !field.is_empty() || !fields.is_empty() || record_quoted {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
