use serde::Serialize;

use super::field::{Column, canonical_headers};
use super::guest::GuestRecord;

/// The whole guest list, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestTable {
    pub guests: Vec<GuestRecord>,
}

impl GuestTable {
    pub fn new(guests: Vec<GuestRecord>) -> Self {
        GuestTable { guests }
    }

    /// The column set every table carries, whether or not it has rows.
    pub fn columns(&self) -> Vec<&'static str> {
        canonical_headers()
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    pub fn push(&mut self, guest: GuestRecord) {
        self.guests.push(guest);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuestRecord> {
        self.guests.iter()
    }

    /// One row of serialized cells in canonical column order.
    pub fn row_cells(guest: &GuestRecord) -> Vec<String> {
        Column::ALL.iter().map(|c| c.cell(guest)).collect()
    }
}

impl<'a> IntoIterator for &'a GuestTable {
    type Item = &'a GuestRecord;
    type IntoIter = std::slice::Iter<'a, GuestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.guests.iter()
    }
}

impl FromIterator<GuestRecord> for GuestTable {
    fn from_iter<I: IntoIterator<Item = GuestRecord>>(iter: I) -> Self {
        GuestTable {
            guests: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_has_canonical_columns() {
        let table = GuestTable::default();
        assert!(table.is_empty());
        assert_eq!(
            table.columns(),
            vec![
                "Name",
                "Category",
                "City",
                "Mobile",
                "Event",
                "Headcount",
                "Rooms Required",
                "Invite Given",
                "Notes",
            ]
        );
    }

    #[test]
    fn row_cells_follow_column_order() {
        let mut g = GuestRecord::named("Lakshmi");
        g.city = "Madurai".into();
        g.headcount = 3;
        g.invite_given = true;
        assert_eq!(
            GuestTable::row_cells(&g),
            vec!["Lakshmi", "", "Madurai", "", "", "3", "0", "True", ""]
        );
    }
}
