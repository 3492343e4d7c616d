use std::sync::LazyLock;

use regex::Regex;

use crate::io::StoreError;
use crate::model::config::GuestRules;
use crate::model::guest::GuestRecord;
use crate::model::table::GuestTable;

static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+]*$").expect("mobile pattern is valid"));

/// Error type for guest list edits
#[derive(Debug, thiserror::Error)]
pub enum GuestError {
    #[error("row {row} does not exist (the list has {len} guests)")]
    RowOutOfRange { row: usize, len: usize },
    #[error("unknown category \"{value}\" (choose from: {allowed})")]
    InvalidCategory { value: String, allowed: String },
    #[error("unknown event \"{value}\" (choose from: {allowed})")]
    InvalidEvent { value: String, allowed: String },
    #[error("mobile number \"{0}\" may only contain digits and +")]
    InvalidMobile(String),
    #[error("headcount must be at least 1")]
    ZeroHeadcount,
    #[error("guest name cannot be empty")]
    EmptyName,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Whether a name is usable for a new record.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn check_category(value: &str, rules: &GuestRules) -> Result<(), GuestError> {
    if rules.categories.iter().any(|c| c == value) {
        Ok(())
    } else {
        Err(GuestError::InvalidCategory {
            value: value.to_string(),
            allowed: rules.categories.join(", "),
        })
    }
}

pub fn check_event(value: &str, rules: &GuestRules) -> Result<(), GuestError> {
    if rules.events.iter().any(|e| e == value) {
        Ok(())
    } else {
        Err(GuestError::InvalidEvent {
            value: value.to_string(),
            allowed: rules.events.join(", "),
        })
    }
}

pub fn check_mobile(value: &str) -> Result<(), GuestError> {
    if MOBILE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(GuestError::InvalidMobile(value.to_string()))
    }
}

/// Validate a record about to be added through the form.
/// An empty name is not checked here; the session drops such records
/// before validating.
pub fn validate_new_guest(guest: &GuestRecord, rules: &GuestRules) -> Result<(), GuestError> {
    check_category(&guest.category, rules)?;
    check_event(&guest.event, rules)?;
    check_mobile(&guest.mobile)?;
    if guest.headcount == 0 {
        return Err(GuestError::ZeroHeadcount);
    }
    Ok(())
}

/// A guest as entered in the add form. Category and event fall back to the
/// first configured choice when left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub name: String,
    pub category: Option<String>,
    pub city: String,
    pub mobile: String,
    pub event: Option<String>,
    pub headcount: u32,
    pub rooms_required: u32,
    pub invite_given: bool,
    pub notes: String,
}

impl NewGuest {
    pub fn named(name: impl Into<String>) -> Self {
        NewGuest {
            name: name.into(),
            category: None,
            city: String::new(),
            mobile: String::new(),
            event: None,
            headcount: 1,
            rooms_required: 0,
            invite_given: false,
            notes: String::new(),
        }
    }

    /// Fill in the defaulted fields, producing the record to store.
    pub fn into_record(self, rules: &GuestRules) -> GuestRecord {
        GuestRecord {
            name: self.name,
            category: self
                .category
                .or_else(|| rules.categories.first().cloned())
                .unwrap_or_default(),
            city: self.city,
            mobile: self.mobile,
            event: self
                .event
                .or_else(|| rules.events.first().cloned())
                .unwrap_or_default(),
            headcount: self.headcount,
            rooms_required: self.rooms_required,
            invite_given: self.invite_given,
            notes: self.notes,
        }
    }
}

/// A partial update to one row; `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct GuestEdit {
    pub name: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub mobile: Option<String>,
    pub event: Option<String>,
    pub headcount: Option<u32>,
    pub rooms_required: Option<u32>,
    pub invite_given: Option<bool>,
    pub notes: Option<String>,
}

impl GuestEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.city.is_none()
            && self.mobile.is_none()
            && self.event.is_none()
            && self.headcount.is_none()
            && self.rooms_required.is_none()
            && self.invite_given.is_none()
            && self.notes.is_none()
    }
}

/// Convert a 1-based row number into an index, checking bounds.
fn row_index(table: &GuestTable, row: usize) -> Result<usize, GuestError> {
    if row == 0 || row > table.len() {
        return Err(GuestError::RowOutOfRange {
            row,
            len: table.len(),
        });
    }
    Ok(row - 1)
}

/// Apply `edit` to the 1-based `row`, returning the edited table.
/// Only the fields being changed are validated, so older rows with
/// out-of-list values can still be touched up one field at a time.
pub fn apply_edit(
    table: &GuestTable,
    row: usize,
    edit: GuestEdit,
    rules: &GuestRules,
) -> Result<GuestTable, GuestError> {
    let idx = row_index(table, row)?;
    let mut next = table.clone();
    let guest = &mut next.guests[idx];

    if let Some(name) = edit.name {
        if !is_valid_name(&name) {
            return Err(GuestError::EmptyName);
        }
        guest.name = name;
    }
    if let Some(category) = edit.category {
        check_category(&category, rules)?;
        guest.category = category;
    }
    if let Some(city) = edit.city {
        guest.city = city;
    }
    if let Some(mobile) = edit.mobile {
        check_mobile(&mobile)?;
        guest.mobile = mobile;
    }
    if let Some(event) = edit.event {
        check_event(&event, rules)?;
        guest.event = event;
    }
    if let Some(headcount) = edit.headcount {
        if headcount == 0 {
            return Err(GuestError::ZeroHeadcount);
        }
        guest.headcount = headcount;
    }
    if let Some(rooms) = edit.rooms_required {
        guest.rooms_required = rooms;
    }
    if let Some(invited) = edit.invite_given {
        guest.invite_given = invited;
    }
    if let Some(notes) = edit.notes {
        guest.notes = notes;
    }

    Ok(next)
}

/// Mark the given 1-based rows as invited.
pub fn mark_invited(table: &GuestTable, rows: &[usize]) -> Result<GuestTable, GuestError> {
    let mut next = table.clone();
    for &row in rows {
        let idx = row_index(table, row)?;
        next.guests[idx].invite_given = true;
    }
    Ok(next)
}

/// Remove the given 1-based rows. Returns the remaining table and the
/// removed records with their original row numbers, in row order.
pub fn remove_rows(
    table: &GuestTable,
    rows: &[usize],
) -> Result<(GuestTable, Vec<(usize, GuestRecord)>), GuestError> {
    for &row in rows {
        row_index(table, row)?;
    }

    let mut kept = Vec::with_capacity(table.len());
    let mut removed = Vec::new();
    for (i, guest) in table.iter().enumerate() {
        if rows.contains(&(i + 1)) {
            removed.push((i + 1, guest.clone()));
        } else {
            kept.push(guest.clone());
        }
    }
    Ok((GuestTable::new(kept), removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> GuestRules {
        GuestRules::default()
    }

    fn valid_guest() -> GuestRecord {
        GuestRecord {
            name: "Asha".into(),
            category: "Family".into(),
            event: "Reception".into(),
            mobile: "+9198765".into(),
            ..Default::default()
        }
    }

    fn table() -> GuestTable {
        GuestTable::new(vec![
            GuestRecord::named("Asha"),
            GuestRecord::named("Bala"),
            GuestRecord::named("Chitra"),
        ])
    }

    #[test]
    fn new_guest_takes_first_configured_choices() {
        let rules = GuestRules {
            categories: vec!["College".into(), "Family".into()],
            events: vec!["Both".into()],
        };
        let g = NewGuest::named("Asha").into_record(&rules);
        assert_eq!(g.category, "College");
        assert_eq!(g.event, "Both");
        assert_eq!(g.headcount, 1);

        let mut explicit = NewGuest::named("Bala");
        explicit.category = Some("Family".into());
        assert_eq!(explicit.into_record(&rules).category, "Family");
    }

    #[test]
    fn valid_new_guest_passes() {
        assert!(validate_new_guest(&valid_guest(), &rules()).is_ok());
    }

    #[test]
    fn rejects_unknown_category_and_event() {
        let mut g = valid_guest();
        g.category = "Cousins".into();
        assert!(matches!(
            validate_new_guest(&g, &rules()),
            Err(GuestError::InvalidCategory { .. })
        ));

        let mut g = valid_guest();
        g.event = "Sangeet".into();
        assert!(matches!(
            validate_new_guest(&g, &rules()),
            Err(GuestError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn mobile_allows_digits_and_plus_only() {
        assert!(check_mobile("").is_ok());
        assert!(check_mobile("+91 98765").is_err());
        assert!(check_mobile("98765-43210").is_err());
        assert!(check_mobile("+919876543210").is_ok());
    }

    #[test]
    fn zero_headcount_rejected() {
        let mut g = valid_guest();
        g.headcount = 0;
        assert!(matches!(
            validate_new_guest(&g, &rules()),
            Err(GuestError::ZeroHeadcount)
        ));
    }

    #[test]
    fn blank_names_are_invalid() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(is_valid_name("Asha"));
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let edit = GuestEdit {
            city: Some("Salem".into()),
            headcount: Some(3),
            ..Default::default()
        };
        let next = apply_edit(&table(), 2, edit, &rules()).unwrap();
        assert_eq!(next.guests[1].city, "Salem");
        assert_eq!(next.guests[1].headcount, 3);
        assert_eq!(next.guests[1].name, "Bala");
        assert_eq!(next.guests[0], GuestRecord::named("Asha"));
    }

    #[test]
    fn edit_validates_changed_fields() {
        let edit = GuestEdit {
            mobile: Some("call me".into()),
            ..Default::default()
        };
        assert!(matches!(
            apply_edit(&table(), 1, edit, &rules()),
            Err(GuestError::InvalidMobile(_))
        ));

        let edit = GuestEdit {
            name: Some(" ".into()),
            ..Default::default()
        };
        assert!(matches!(
            apply_edit(&table(), 1, edit, &rules()),
            Err(GuestError::EmptyName)
        ));
    }

    #[test]
    fn edit_out_of_range() {
        for row in [0, 4] {
            assert!(matches!(
                apply_edit(&table(), row, GuestEdit::default(), &rules()),
                Err(GuestError::RowOutOfRange { len: 3, .. })
            ));
        }
    }

    #[test]
    fn mark_invited_sets_flags() {
        let next = mark_invited(&table(), &[1, 3]).unwrap();
        let flags: Vec<bool> = next.iter().map(|g| g.invite_given).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn remove_rows_returns_removed() {
        let (kept, removed) = remove_rows(&table(), &[3, 1]).unwrap();
        let names: Vec<&str> = kept.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Bala"]);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].0, 1);
        assert_eq!(removed[0].1.name, "Asha");
        assert_eq!(removed[1].0, 3);
    }

    #[test]
    fn remove_rows_checks_every_row_first() {
        assert!(matches!(
            remove_rows(&table(), &[1, 9]),
            Err(GuestError::RowOutOfRange { row: 9, .. })
        ));
    }
}
