use std::fmt;

use super::guest::GuestRecord;

/// Header of the boolean column older guest lists used instead of a room count.
pub const LEGACY_ACCOMMODATION: &str = "Accommodation Needed";

/// The nine canonical columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Category,
    City,
    Mobile,
    Event,
    Headcount,
    RoomsRequired,
    InviteGiven,
    Notes,
}

/// How a column's cells are typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Count,
    Flag,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Name,
        Column::Category,
        Column::City,
        Column::Mobile,
        Column::Event,
        Column::Headcount,
        Column::RoomsRequired,
        Column::InviteGiven,
        Column::Notes,
    ];

    /// The header text used in the CSV file
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Category => "Category",
            Column::City => "City",
            Column::Mobile => "Mobile",
            Column::Event => "Event",
            Column::Headcount => "Headcount",
            Column::RoomsRequired => "Rooms Required",
            Column::InviteGiven => "Invite Given",
            Column::Notes => "Notes",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Column::Headcount | Column::RoomsRequired => FieldKind::Count,
            Column::InviteGiven => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    /// The cell text written when a column is missing entirely.
    pub fn default_cell(self) -> &'static str {
        match self {
            Column::Headcount => "1",
            Column::RoomsRequired => "0",
            Column::InviteGiven => format_flag(false),
            _ => "",
        }
    }

    /// The serialized cell for this column of `guest`.
    pub fn cell(self, guest: &GuestRecord) -> String {
        match self {
            Column::Name => guest.name.clone(),
            Column::Category => guest.category.clone(),
            Column::City => guest.city.clone(),
            Column::Mobile => guest.mobile.clone(),
            Column::Event => guest.event.clone(),
            Column::Headcount => guest.headcount.to_string(),
            Column::RoomsRequired => guest.rooms_required.to_string(),
            Column::InviteGiven => format_flag(guest.invite_given).to_string(),
            Column::Notes => guest.notes.clone(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The canonical header row
pub fn canonical_headers() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.header()).collect()
}

/// A cell that is present but cannot be read as its column's type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("expected a whole number, found \"{0}\"")]
    NotACount(String),
    #[error("expected True or False, found \"{0}\"")]
    NotAFlag(String),
}

/// Text cells: missing becomes the empty string, anything else is kept as-is.
pub fn parse_text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

/// Count cells: missing or blank becomes `default`. Accepts plain digits and
/// the float form a spreadsheet leaves behind (`"3.0"`).
pub fn parse_count(raw: Option<&str>, default: u32) -> Result<u32, FieldError> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(v) => v,
    };
    if let Ok(n) = value.parse::<u32>() {
        return Ok(n);
    }
    if let Some((whole, frac)) = value.split_once('.')
        && !whole.is_empty()
        && frac.chars().all(|c| c == '0')
        && let Ok(n) = whole.parse::<u32>()
    {
        return Ok(n);
    }
    Err(FieldError::NotACount(value.to_string()))
}

/// Flag cells: missing or blank becomes `default`.
pub fn parse_flag(raw: Option<&str>, default: bool) -> Result<bool, FieldError> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(v) => v,
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FieldError::NotAFlag(value.to_string())),
    }
}

pub fn format_flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip() {
        for col in Column::ALL {
            assert_eq!(Column::from_header(col.header()), Some(col));
        }
        assert_eq!(Column::from_header(LEGACY_ACCOMMODATION), None);
        assert_eq!(Column::from_header("name"), None);
    }

    #[test]
    fn count_defaults_and_parses() {
        assert_eq!(parse_count(None, 1), Ok(1));
        assert_eq!(parse_count(Some(""), 0), Ok(0));
        assert_eq!(parse_count(Some(" 4 "), 1), Ok(4));
        assert_eq!(parse_count(Some("3.0"), 1), Ok(3));
        assert_eq!(
            parse_count(Some("2.5"), 1),
            Err(FieldError::NotACount("2.5".into()))
        );
        assert_eq!(
            parse_count(Some("-1"), 1),
            Err(FieldError::NotACount("-1".into()))
        );
        assert_eq!(
            parse_count(Some("many"), 1),
            Err(FieldError::NotACount("many".into()))
        );
    }

    #[test]
    fn flag_defaults_and_parses() {
        assert_eq!(parse_flag(None, false), Ok(false));
        assert_eq!(parse_flag(Some("True"), false), Ok(true));
        assert_eq!(parse_flag(Some("FALSE"), true), Ok(false));
        assert_eq!(parse_flag(Some("1"), false), Ok(true));
        assert_eq!(
            parse_flag(Some("maybe"), false),
            Err(FieldError::NotAFlag("maybe".into()))
        );
    }

    #[test]
    fn text_keeps_value() {
        assert_eq!(parse_text(None), "");
        assert_eq!(parse_text(Some(" Chennai ")), " Chennai ");
    }

    #[test]
    fn default_cells_parse_to_defaults() {
        assert_eq!(parse_count(Some(Column::Headcount.default_cell()), 0), Ok(1));
        assert_eq!(
            parse_count(Some(Column::RoomsRequired.default_cell()), 9),
            Ok(0)
        );
        assert_eq!(
            parse_flag(Some(Column::InviteGiven.default_cell()), true),
            Ok(false)
        );
    }
}
