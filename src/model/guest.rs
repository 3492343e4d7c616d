use serde::{Deserialize, Serialize};

/// Guest categories offered at the input boundary. Storage accepts any text.
pub const CATEGORIES: [&str; 6] = ["Family", "Friend", "Office", "Neighbors", "VIP", "Others"];

pub const EVENT_RECEPTION: &str = "Reception";
pub const EVENT_WEDDING: &str = "Wedding (Mugurtham)";
pub const EVENT_BOTH: &str = "Both";

/// Events offered at the input boundary. Storage accepts any text.
pub const EVENTS: [&str; 3] = [EVENT_RECEPTION, EVENT_WEDDING, EVENT_BOTH];

/// One guest party: a named household or group and its logistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub name: String,
    pub category: String,
    pub city: String,
    pub mobile: String,
    pub event: String,
    /// Number of people this record stands for
    pub headcount: u32,
    pub rooms_required: u32,
    pub invite_given: bool,
    pub notes: String,
}

impl Default for GuestRecord {
    fn default() -> Self {
        GuestRecord {
            name: String::new(),
            category: String::new(),
            city: String::new(),
            mobile: String::new(),
            event: String::new(),
            headcount: 1,
            rooms_required: 0,
            invite_given: false,
            notes: String::new(),
        }
    }
}

impl GuestRecord {
    /// A record with the given name and every other field at its default.
    pub fn named(name: impl Into<String>) -> Self {
        GuestRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attends_reception(&self) -> bool {
        self.event == EVENT_RECEPTION || self.event == EVENT_BOTH
    }

    pub fn attends_wedding(&self) -> bool {
        self.event == EVENT_WEDDING || self.event == EVENT_BOTH
    }
}

/// The slice of a record shown on the accommodation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRequest {
    pub name: String,
    pub city: String,
    pub rooms_required: u32,
    pub mobile: String,
}

impl From<&GuestRecord> for RoomRequest {
    fn from(guest: &GuestRecord) -> Self {
        RoomRequest {
            name: guest.name.clone(),
            city: guest.city.clone(),
            rooms_required: guest.rooms_required,
            mobile: guest.mobile.clone(),
        }
    }
}
