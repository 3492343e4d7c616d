//! Derived views of the guest list for dashboards.
//!
//! Every function recomputes from the table it is given; guest lists are
//! small enough that nothing is cached.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::guest::RoomRequest;
use crate::model::table::GuestTable;

/// Total number of people across all records.
pub fn total_pax(table: &GuestTable) -> u64 {
    table.iter().map(|g| u64::from(g.headcount)).sum()
}

/// Number of records, each being one family or party regardless of size.
pub fn family_count(table: &GuestTable) -> usize {
    table.len()
}

pub fn invites_sent(table: &GuestTable) -> usize {
    table.iter().filter(|g| g.invite_given).count()
}

pub fn pending(table: &GuestTable) -> usize {
    table.iter().filter(|g| !g.invite_given).count()
}

/// Headcount per city, largest first. An empty city is its own bucket;
/// cities with equal totals keep the order they first appear in.
pub fn by_city(table: &GuestTable) -> Vec<(String, u64)> {
    let mut totals: IndexMap<String, u64> = IndexMap::new();
    for g in table {
        *totals.entry(g.city.clone()).or_default() += u64::from(g.headcount);
    }
    let mut sorted: Vec<(String, u64)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Headcount per category, in first-seen order.
pub fn by_category(table: &GuestTable) -> IndexMap<String, u64> {
    let mut totals = IndexMap::new();
    for g in table {
        *totals.entry(g.category.clone()).or_default() += u64::from(g.headcount);
    }
    totals
}

/// Plates for the reception: everyone attending the reception or both events.
pub fn reception_plates(table: &GuestTable) -> u64 {
    table
        .iter()
        .filter(|g| g.attends_reception())
        .map(|g| u64::from(g.headcount))
        .sum()
}

/// Plates for the wedding breakfast. A record attending both events is
/// counted in full here and in [`reception_plates`].
pub fn wedding_plates(table: &GuestTable) -> u64 {
    table
        .iter()
        .filter(|g| g.attends_wedding())
        .map(|g| u64::from(g.headcount))
        .sum()
}

pub fn total_rooms(table: &GuestTable) -> u64 {
    table.iter().map(|g| u64::from(g.rooms_required)).sum()
}

/// Records that need at least one room, in list order.
pub fn rooms_needed(table: &GuestTable) -> Vec<RoomRequest> {
    table
        .iter()
        .filter(|g| g.rooms_required > 0)
        .map(RoomRequest::from)
        .collect()
}

/// The headline numbers shown at the top of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_pax: u64,
    pub families: usize,
    pub invites_sent: usize,
    pub pending: usize,
}

pub fn summary(table: &GuestTable) -> Summary {
    Summary {
        total_pax: total_pax(table),
        families: family_count(table),
        invites_sent: invites_sent(table),
        pending: pending(table),
    }
}
