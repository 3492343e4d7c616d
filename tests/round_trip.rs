use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wedding_planner::io::{Store, export_csv};
use wedding_planner::model::{GuestRules, GuestTable};
use wedding_planner::ops::guest_ops::NewGuest;
use wedding_planner::ops::{Session, aggregate};

fn fixture_path(fixture_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_name)
}

/// Helper: copy a fixture into a temp dir and open a store on the copy
fn store_from_fixture(tmp: &TempDir, fixture_name: &str) -> Store {
    let target = tmp.path().join("guest_list.csv");
    fs::copy(fixture_path(fixture_name), &target)
        .unwrap_or_else(|e| panic!("Could not copy fixture {}: {}", fixture_name, e));
    Store::new(target)
}

/// Helper: load a fixture, save it back, and assert byte-for-byte equality
fn assert_store_round_trip(fixture_name: &str) {
    let tmp = TempDir::new().unwrap();
    let store = store_from_fixture(&tmp, fixture_name);
    let source = fs::read_to_string(store.path()).unwrap();

    let table = store.load().unwrap();
    store.save(&table).unwrap();
    let output = fs::read_to_string(store.path()).unwrap();

    assert_eq!(
        output, source,
        "Round-trip failed for fixture: {}",
        fixture_name
    );
}

#[test]
fn round_trip_canonical_guest_list() {
    assert_store_round_trip("guest_list.csv");
}

#[test]
fn canonical_list_loads_quoted_cells() {
    let tmp = TempDir::new().unwrap();
    let table = store_from_fixture(&tmp, "guest_list.csv").load().unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.guests[0].notes, "arriving a day early, needs pickup");
    assert_eq!(table.guests[2].notes, "said \"maybe\" on the phone");
    assert_eq!(table.guests[3].notes, "veg only\nno onion, no garlic");
    assert_eq!(table.guests[3].city, "");
}

#[test]
fn export_is_the_saved_file() {
    let tmp = TempDir::new().unwrap();
    let store = store_from_fixture(&tmp, "guest_list.csv");
    let table = store.load().unwrap();
    assert_eq!(export_csv(&table), fs::read(fixture_path("guest_list.csv")).unwrap());
}

#[test]
fn legacy_list_migrates_and_rewrites_canonically() {
    let tmp = TempDir::new().unwrap();
    let store = store_from_fixture(&tmp, "legacy_accommodation.csv");

    let (table, applied) = store.load_with_report().unwrap();
    assert_eq!(applied, vec!["legacy-accommodation", "complete-columns"]);
    let rooms: Vec<u32> = table.iter().map(|g| g.rooms_required).collect();
    assert_eq!(rooms, vec![1, 0, 0]);

    store.save(&table).unwrap();
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "Name,Category,City,Mobile,Event,Headcount,Rooms Required,Invite Given,Notes\n\
         Asha,,Coimbatore,,,5,1,True,\n\
         Kumar,,Chennai,,,2,0,False,\n\
         Meena,,Madurai,,,1,0,False,\n"
    );

    // A second load finds nothing left to migrate
    let (again, applied) = store.load_with_report().unwrap();
    assert!(applied.is_empty());
    assert_eq!(again, table);
}

#[test]
fn hand_edited_list_is_normalized() {
    let tmp = TempDir::new().unwrap();
    let store = store_from_fixture(&tmp, "hand_edited.csv");
    let table = store.load().unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.guests[0].name, "Asha");
    assert_eq!(table.guests[0].headcount, 4);
    assert!(table.guests[0].invite_given);
    assert_eq!(table.guests[1].headcount, 1);
    assert!(!table.guests[1].invite_given);
    assert_eq!(table.guests[1].notes, "late");

    store.save(&table).unwrap();
    let written = fs::read_to_string(store.path()).unwrap();
    assert!(!written.starts_with('\u{feff}'));
    assert!(!written.contains('\r'));
    assert!(written.ends_with("Kumar,,,,,1,0,False,late\n"));
}

#[test]
fn session_edits_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let store = store_from_fixture(&tmp, "guest_list.csv");

    let mut session = Session::open(store.clone()).unwrap();
    let mut guest = NewGuest::named("Lakshmi");
    guest.city = "Chennai".into();
    guest.headcount = 3;
    assert_eq!(
        session.add_guest(guest, &GuestRules::default()).unwrap(),
        Some(4)
    );

    let mut next = session.table().clone();
    next.guests[1].invite_given = true;
    assert!(session.update_table(next).unwrap());

    let reopened = Session::open(store).unwrap();
    assert_eq!(reopened.table(), session.table());
    assert_eq!(reopened.table().guests[4].name, "Lakshmi");
    assert!(reopened.table().guests[1].invite_given);
}

#[test]
fn aggregates_over_fixture() {
    let tmp = TempDir::new().unwrap();
    let table = store_from_fixture(&tmp, "guest_list.csv").load().unwrap();

    assert_eq!(aggregate::total_pax(&table), 11);
    assert_eq!(aggregate::family_count(&table), 4);
    assert_eq!(aggregate::invites_sent(&table) + aggregate::pending(&table), 4);

    let city_sum: u64 = aggregate::by_city(&table).iter().map(|(_, n)| n).sum();
    let category_sum: u64 = aggregate::by_category(&table).values().sum();
    assert_eq!(city_sum, 11);
    assert_eq!(category_sum, 11);

    // "Both" guests are counted at each event
    assert_eq!(aggregate::reception_plates(&table), 5 + 2 + 3);
    assert_eq!(aggregate::wedding_plates(&table), 5 + 1 + 3);

    let rooms = aggregate::rooms_needed(&table);
    assert_eq!(aggregate::total_rooms(&table), 3);
    assert_eq!(
        rooms.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["Asha & family", "Rajan Uncle"]
    );
}

#[test]
fn empty_table_saves_header_only() {
    let tmp = TempDir::new().unwrap();
    let store = Store::new(tmp.path().join("guest_list.csv"));
    store.save(&GuestTable::default()).unwrap();

    let reloaded = store.load().unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(aggregate::total_pax(&reloaded), 0);
    assert!(aggregate::by_city(&reloaded).is_empty());
}
