use crate::model::field::canonical_headers;
use crate::model::table::GuestTable;

/// Serialize a guest table as CSV: canonical header, one line per guest,
/// `\n` line endings, no index column.
pub fn serialize_table(table: &GuestTable) -> String {
    let mut out = String::new();
    push_line(&mut out, canonical_headers());
    for guest in table {
        push_line(&mut out, GuestTable::row_cells(guest));
    }
    out
}

/// Serialize a single record under the canonical header. Used when a row
/// needs to be kept somewhere outside the guest list.
pub fn serialize_record(guest: &crate::model::guest::GuestRecord) -> String {
    let mut out = String::new();
    push_line(&mut out, canonical_headers());
    push_line(&mut out, GuestTable::row_cells(guest));
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: impl IntoIterator<Item = S>) {
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, cell.as_ref());
    }
    out.push('\n');
}

/// Quote only when the field would otherwise be misread.
fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::guest::GuestRecord;
    use crate::parse::csv_reader::parse_csv;

    fn sample() -> GuestTable {
        let mut asha = GuestRecord::named("Asha");
        asha.category = "Family".into();
        asha.city = "Chennai".into();
        asha.mobile = "+919876543210".into();
        asha.event = "Both".into();
        asha.headcount = 4;
        asha.rooms_required = 1;
        asha.invite_given = true;

        let mut iyer = GuestRecord::named("Iyer, K.");
        iyer.category = "Office".into();
        iyer.event = "Wedding (Mugurtham)".into();
        iyer.notes = "said \"maybe\"".into();

        GuestTable::new(vec![asha, iyer])
    }

    #[test]
    fn serializes_canonical_layout() {
        insta::assert_snapshot!(serialize_table(&sample()), @r#"
        Name,Category,City,Mobile,Event,Headcount,Rooms Required,Invite Given,Notes
        Asha,Family,Chennai,+919876543210,Both,4,1,True,
        "Iyer, K.",Office,,,Wedding (Mugurtham),1,0,False,"said ""maybe"""
        "#);
    }

    #[test]
    fn empty_table_is_header_only() {
        assert_eq!(
            serialize_table(&GuestTable::default()),
            "Name,Category,City,Mobile,Event,Headcount,Rooms Required,Invite Given,Notes\n"
        );
    }

    #[test]
    fn multiline_notes_survive_reparse() {
        let mut g = GuestRecord::named("Bala");
        g.notes = "line one\r\nline two".into();
        let text = serialize_table(&GuestTable::new(vec![g]));
        let raw = parse_csv(&text).unwrap();
        assert_eq!(raw.rows.len(), 1);
        assert_eq!(raw.rows[0][8], "line one\r\nline two");
    }

    #[test]
    fn record_is_header_plus_row() {
        let text = serialize_record(&GuestRecord::named("Chitra"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("Chitra,,,,,1,0,False,\n"));
    }
}
