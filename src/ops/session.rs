use crate::io::{Store, StoreError, export_csv};
use crate::model::config::GuestRules;
use crate::model::table::GuestTable;
use crate::ops::guest_ops::{GuestError, NewGuest, is_valid_name, validate_new_guest};

/// The working state of one planning session: the store and the guest list
/// loaded from it. Every mutation is written through to disk immediately.
#[derive(Debug)]
pub struct Session {
    store: Store,
    table: GuestTable,
    migrations: Vec<&'static str>,
}

impl Session {
    /// Load the guest list behind `store`.
    pub fn open(store: Store) -> Result<Self, StoreError> {
        let (table, migrations) = store.load_with_report()?;
        Ok(Session {
            store,
            table,
            migrations,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn table(&self) -> &GuestTable {
        &self.table
    }

    /// Migration steps that changed the data when it was loaded.
    pub fn migrations(&self) -> &[&'static str] {
        &self.migrations
    }

    /// Default, validate, append and save a guest from the add form.
    ///
    /// A guest without a name is dropped silently, whatever else it holds,
    /// and `Ok(None)` returned; otherwise the new 0-based index.
    pub fn add_guest(
        &mut self,
        guest: NewGuest,
        rules: &GuestRules,
    ) -> Result<Option<usize>, GuestError> {
        if !is_valid_name(&guest.name) {
            return Ok(None);
        }
        let record = guest.into_record(rules);
        validate_new_guest(&record, rules)?;

        self.table.push(record);
        if let Err(e) = self.store.save(&self.table) {
            self.table.guests.pop();
            return Err(e.into());
        }
        Ok(Some(self.table.len() - 1))
    }

    /// Replace the whole list, as when rows were edited or deleted in
    /// place. Saves only when something changed; returns whether it did.
    pub fn update_table(&mut self, table: GuestTable) -> Result<bool, StoreError> {
        if table == self.table {
            return Ok(false);
        }
        self.store.save(&table)?;
        self.table = table;
        Ok(true)
    }

    /// The list as CSV bytes for download.
    pub fn export(&self) -> Vec<u8> {
        export_csv(&self.table)
    }
}
