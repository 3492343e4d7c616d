use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::io::migrate::run_migrations;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::field::{Column, FieldError, FieldKind, parse_count, parse_flag, parse_text};
use crate::model::guest::GuestRecord;
use crate::model::table::GuestTable;
use crate::parse::{CsvError, RawTable, parse_csv, serialize_table};

/// Error type for guest list I/O
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError { path: PathBuf, source: CsvError },
    #[error("{path}: record {record}, column \"{column}\": {source}")]
    InvalidValue {
        path: PathBuf,
        record: usize,
        column: Column,
        source: FieldError,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The CSV file a guest list lives in.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the data file (and its lock and recovery log).
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Load the guest list, migrating older layouts. A missing file is an
    /// empty list.
    pub fn load(&self) -> Result<GuestTable, StoreError> {
        self.load_with_report().map(|(table, _)| table)
    }

    /// Like [`Store::load`], also returning the migration steps that changed
    /// the data on the way in.
    pub fn load_with_report(&self) -> Result<(GuestTable, Vec<&'static str>), StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok((GuestTable::default(), Vec::new()));
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let mut raw = parse_csv(&text).map_err(|e| StoreError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;
        let applied = run_migrations(&mut raw);
        let table = project(&raw).map_err(|(record, column, source)| StoreError::InvalidValue {
            path: self.path.clone(),
            record,
            column,
            source,
        })?;
        Ok((table, applied))
    }

    /// Overwrite the data file with the full table. On failure the content
    /// that could not be written is kept in the recovery log.
    pub fn save(&self, table: &GuestTable) -> Result<(), StoreError> {
        let content = serialize_table(table);
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            recovery::log_recovery(
                self.dir(),
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Write,
                    description: "guest list write failed".to_string(),
                    fields: vec![
                        ("Target".to_string(), self.path.display().to_string()),
                        ("Error".to_string(), e.to_string()),
                    ],
                    body: content,
                },
            );
            return Err(StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }
}

/// The table as a downloadable CSV, byte-for-byte what [`Store::save`] writes.
pub fn export_csv(table: &GuestTable) -> Vec<u8> {
    serialize_table(table).into_bytes()
}

/// Type every row of a migrated raw table, keeping only canonical columns.
/// Errors carry the 1-based record number and the offending column.
fn project(raw: &RawTable) -> Result<GuestTable, (usize, Column, FieldError)> {
    let indices: Vec<(Column, Option<usize>)> = Column::ALL
        .iter()
        .map(|&c| (c, raw.column_index(c.header())))
        .collect();

    let mut guests = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        let mut guest = GuestRecord::default();
        for &(column, idx) in &indices {
            let cell = idx.and_then(|i| raw.cell(row, i));
            set_field(&mut guest, column, cell).map_err(|e| (row + 1, column, e))?;
        }
        guests.push(guest);
    }
    Ok(GuestTable::new(guests))
}

fn set_field(guest: &mut GuestRecord, column: Column, cell: Option<&str>) -> Result<(), FieldError> {
    match column.kind() {
        FieldKind::Text => {
            let value = parse_text(cell);
            match column {
                Column::Name => guest.name = value,
                Column::Category => guest.category = value,
                Column::City => guest.city = value,
                Column::Mobile => guest.mobile = value,
                Column::Event => guest.event = value,
                _ => guest.notes = value,
            }
        }
        FieldKind::Count => {
            if column == Column::Headcount {
                guest.headcount = parse_count(cell, 1)?;
            } else {
                guest.rooms_required = parse_count(cell, 0)?;
            }
        }
        FieldKind::Flag => guest.invite_given = parse_flag(cell, false)?,
    }
    Ok(())
}
