use indexmap::IndexMap;
use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::field::format_flag;
use crate::model::guest::{GuestRecord, RoomRequest};
use crate::ops::aggregate::Summary;
use crate::util::unicode::{display_width, flatten_lines, pad_to_width};

/// Widest a text column may grow in human output.
const MAX_COLUMN_WIDTH: usize = 24;

/// Cells in the longest chart bar.
const BAR_WIDTH: usize = 30;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct GuestRowJson<'a> {
    pub row: usize,
    #[serde(flatten)]
    pub guest: &'a GuestRecord,
}

#[derive(Serialize)]
pub struct CityTotalJson {
    pub city: String,
    pub headcount: u64,
}

#[derive(Serialize)]
pub struct StatsJson {
    #[serde(flatten)]
    pub summary: Summary,
    pub by_city: Vec<CityTotalJson>,
    pub by_category: IndexMap<String, u64>,
}

#[derive(Serialize)]
pub struct CateringJson {
    pub reception_plates: u64,
    pub wedding_plates: u64,
}

#[derive(Serialize)]
pub struct RoomsJson {
    pub total_rooms: u64,
    pub guests: Vec<RoomRequest>,
}

#[derive(Serialize)]
pub struct ExportJson {
    pub path: String,
    pub media_type: &'static str,
    pub guests: usize,
    pub bytes: usize,
}

#[derive(Serialize)]
pub struct RecoveryEntryJson {
    pub timestamp: String,
    pub category: String,
    pub description: String,
    pub fields: IndexMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
}

pub fn recovery_entry_to_json(entry: &RecoveryEntry) -> RecoveryEntryJson {
    RecoveryEntryJson {
        timestamp: entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        category: entry.category.to_string(),
        description: entry.description.clone(),
        fields: entry.fields.iter().cloned().collect(),
        body: entry.body.clone(),
    }
}

pub fn city_totals_to_json(totals: &[(String, u64)]) -> Vec<CityTotalJson> {
    totals
        .iter()
        .map(|(city, headcount)| CityTotalJson {
            city: city.clone(),
            headcount: *headcount,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Lay out rows under a header, each column as wide as its widest cell
/// (capped), separated by two spaces. Trailing padding is trimmed.
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell).min(MAX_COLUMN_WIDTH));
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(header.to_vec())];
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Guest rows for `wp list`, numbered from 1 in list order.
pub fn format_guest_list(rows: &[(usize, &GuestRecord)]) -> Vec<String> {
    let header = [
        "#", "Name", "Category", "City", "Mobile", "Event", "Pax", "Rooms", "Sent?", "Notes",
    ];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|(row, g)| {
            vec![
                row.to_string(),
                g.name.clone(),
                g.category.clone(),
                g.city.clone(),
                g.mobile.clone(),
                g.event.clone(),
                g.headcount.to_string(),
                g.rooms_required.to_string(),
                format_flag(g.invite_given).to_string(),
                flatten_lines(&g.notes),
            ]
        })
        .collect();
    format_table(&header, &cells)
}

/// A horizontal bar chart: label, bar scaled to the largest value, value.
pub fn format_bar_chart(entries: &[(String, u64)]) -> Vec<String> {
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let label_w = entries
        .iter()
        .map(|(label, _)| display_width(display_label(label)).min(MAX_COLUMN_WIDTH))
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(label, value)| {
            let len = if max == 0 {
                0
            } else {
                // round up so every non-zero value gets at least one cell
                (*value as usize * BAR_WIDTH).div_ceil(max as usize)
            };
            format!(
                "{}  {} {}",
                pad_to_width(display_label(label), label_w),
                "\u{2588}".repeat(len),
                value
            )
        })
        .collect()
}

fn display_label(label: &str) -> &str {
    if label.is_empty() { "(none)" } else { label }
}

pub fn format_summary(summary: &Summary) -> Vec<String> {
    vec![
        format!("Total guests (pax): {}", summary.total_pax),
        format!("Families:           {}", summary.families),
        format!("Invites sent:       {}", summary.invites_sent),
        format!("Pending:            {}", summary.pending),
    ]
}

pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}: {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for body_line in entry.body.lines() {
        lines.push(format!("    {}", body_line));
    }
    lines
}

pub fn format_rooms(rooms: &[RoomRequest]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rooms
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.city.clone(),
                r.rooms_required.to_string(),
                r.mobile.clone(),
            ]
        })
        .collect();
    format_table(&["Name", "City", "Rooms", "Mobile"], &cells)
}
