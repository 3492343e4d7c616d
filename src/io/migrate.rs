use crate::model::field::{Column, LEGACY_ACCOMMODATION, parse_flag};
use crate::parse::RawTable;

/// A schema migration step applied to freshly parsed data.
///
/// Steps run in order, once per load. Each returns whether it changed the
/// table and must leave an already-migrated table untouched.
pub struct Migration {
    pub name: &'static str,
    pub apply: fn(&mut RawTable) -> bool,
}

/// All migration steps, in the order they run.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "legacy-accommodation",
        apply: rooms_from_accommodation,
    },
    Migration {
        name: "complete-columns",
        apply: complete_columns,
    },
];

/// Run every step and return the names of those that changed something.
pub fn run_migrations(raw: &mut RawTable) -> Vec<&'static str> {
    MIGRATIONS
        .iter()
        .filter_map(|m| (m.apply)(raw).then_some(m.name))
        .collect()
}

/// Older lists recorded a yes/no "Accommodation Needed". Translate it into a
/// room count: one room when it was set, none otherwise.
fn rooms_from_accommodation(raw: &mut RawTable) -> bool {
    let rooms = Column::RoomsRequired.header();
    let Some(legacy) = raw.column_index(LEGACY_ACCOMMODATION) else {
        return false;
    };
    if raw.has_column(rooms) {
        return false;
    }
    raw.push_column(rooms, |row| {
        let needed = matches!(parse_flag(Some(&row[legacy]), false), Ok(true));
        let count = if needed { "1" } else { "0" };
        count.to_string()
    });
    true
}

/// Add every canonical column the file lacks, filled with its default.
fn complete_columns(raw: &mut RawTable) -> bool {
    let mut changed = false;
    for col in Column::ALL {
        if !raw.has_column(col.header()) {
            raw.push_column(col.header(), |_| col.default_cell().to_string());
            changed = true;
        }
    }
    changed
}
