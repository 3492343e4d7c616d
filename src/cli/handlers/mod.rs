mod init;
pub use init::cmd_init;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::FileLock;
use crate::io::recovery;
use crate::io::{Store, StoreError};
use crate::model::config::{EXPORT_MEDIA_TYPE, PlannerConfig};
use crate::model::guest::GuestRecord;
use crate::ops::guest_ops::{self, GuestEdit, NewGuest};
use crate::ops::{Session, aggregate};
use crate::parse::serialize_record;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = planner_dir(cli.dir.as_deref())?;

    match cli.command {
        // Init runs before there is any config to read
        Commands::Init(args) => cmd_init(&dir, args),

        // Read commands
        Commands::List(args) => cmd_list(&dir, args, json),
        Commands::Stats => cmd_stats(&dir, json),
        Commands::Catering => cmd_catering(&dir, json),
        Commands::Rooms => cmd_rooms(&dir, json),
        Commands::Export(args) => cmd_export(&dir, args, json),
        Commands::Recovery(args) => cmd_recovery(&dir, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&dir, args, json),
        Commands::Edit(args) => cmd_edit(&dir, args),
        Commands::Invite(args) => cmd_invite(&dir, args),
        Commands::Delete(args) => cmd_delete(&dir, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The planner directory: `-C` if given, else the working directory.
fn planner_dir(override_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match override_dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

/// Config plus the store it points at.
struct Planner {
    config: PlannerConfig,
    store: Store,
}

fn load_planner(dir: &Path) -> Result<Planner, config_io::ConfigError> {
    let config = config_io::read_config(dir)?;
    let store = Store::new(dir.join(&config.store.file));
    Ok(Planner { config, store })
}

fn open_session(store: &Store) -> Result<Session, StoreError> {
    let session = Session::open(store.clone())?;
    if !session.migrations().is_empty() {
        eprintln!(
            "note: {} uses an older layout ({}); it is rewritten on the next change",
            store.path().display(),
            session.migrations().join(", ")
        );
    }
    Ok(session)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let session = open_session(&planner.store)?;

    let rows: Vec<(usize, &GuestRecord)> = session
        .table()
        .iter()
        .enumerate()
        .map(|(i, g)| (i + 1, g))
        .filter(|(_, g)| !args.pending || !g.invite_given)
        .filter(|(_, g)| args.city.as_deref().is_none_or(|c| g.city == c))
        .filter(|(_, g)| args.category.as_deref().is_none_or(|c| g.category == c))
        .collect();

    if json {
        let out: Vec<GuestRowJson> = rows
            .iter()
            .map(|(row, guest)| GuestRowJson {
                row: *row,
                guest: *guest,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if session.table().is_empty() {
        println!("No guests yet. Add one with: wp add <name>");
    } else if rows.is_empty() {
        println!("No matching guests.");
    } else {
        print_lines(format_guest_list(&rows));
    }
    Ok(())
}

fn cmd_stats(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let session = open_session(&planner.store)?;
    let table = session.table();

    let summary = aggregate::summary(table);
    let cities = aggregate::by_city(table);
    let categories = aggregate::by_category(table);

    if json {
        let out = StatsJson {
            summary,
            by_city: city_totals_to_json(&cities),
            by_category: categories,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("Start adding guests with: wp add <name>");
        return Ok(());
    }

    print_lines(format_summary(&summary));
    println!();
    println!("Guests by city");
    print_lines(format_bar_chart(&cities));
    println!();
    println!("Category split");
    let categories: Vec<(String, u64)> = categories.into_iter().collect();
    print_lines(format_bar_chart(&categories));
    Ok(())
}

fn cmd_catering(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let session = open_session(&planner.store)?;
    let out = CateringJson {
        reception_plates: aggregate::reception_plates(session.table()),
        wedding_plates: aggregate::wedding_plates(session.table()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Reception plates:  {}", out.reception_plates);
        println!("Wedding breakfast: {}", out.wedding_plates);
    }
    Ok(())
}

fn cmd_rooms(dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let session = open_session(&planner.store)?;
    let out = RoomsJson {
        total_rooms: aggregate::total_rooms(session.table()),
        guests: aggregate::rooms_needed(session.table()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Total rooms to book: {}", out.total_rooms);
        if out.guests.is_empty() {
            println!("No rooms needed yet.");
        } else {
            println!();
            print_lines(format_rooms(&out.guests));
        }
    }
    Ok(())
}

fn cmd_export(dir: &Path, args: ExportArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let session = open_session(&planner.store)?;
    let bytes = session.export();

    if args.output.as_deref() == Some("-") {
        std::io::stdout().write_all(&bytes)?;
        return Ok(());
    }

    let path = match args.output {
        Some(p) => PathBuf::from(p),
        None => dir.join(&planner.config.export.file_name),
    };
    recovery::atomic_write(&path, &bytes)
        .map_err(|e| format!("could not write {}: {}", path.display(), e))?;

    if json {
        let out = ExportJson {
            path: path.display().to_string(),
            media_type: EXPORT_MEDIA_TYPE,
            guests: session.table().len(),
            bytes: bytes.len(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "Exported {} guests to {}",
            session.table().len(),
            path.display()
        );
    }
    Ok(())
}

fn cmd_recovery(
    dir: &Path,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let entries = recovery::read_recovery_entries(planner.store.dir(), Some(args.limit));

    if json {
        let out: Vec<RecoveryEntryJson> = entries.iter().map(recovery_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if entries.is_empty() {
        println!("Recovery log is empty.");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_lines(format_recovery_entry(entry));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let _lock = FileLock::acquire_default(planner.store.path())?;
    let mut session = open_session(&planner.store)?;

    let guest = NewGuest {
        name: args.name,
        category: args.category,
        city: args.city,
        mobile: args.mobile,
        event: args.event,
        headcount: args.pax,
        rooms_required: args.rooms,
        invite_given: args.invited,
        notes: args.note,
    };

    // A blank name is dropped without complaint, like an unsubmitted form
    let Some(index) = session.add_guest(guest, &planner.config.guests)? else {
        return Ok(());
    };

    let added = &session.table().guests[index];
    if json {
        let out = GuestRowJson {
            row: index + 1,
            guest: added,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Added {} (row {})", added.name, index + 1);
    }
    Ok(())
}

fn cmd_edit(dir: &Path, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let _lock = FileLock::acquire_default(planner.store.path())?;
    let mut session = open_session(&planner.store)?;

    let edit = GuestEdit {
        name: args.name,
        category: args.category,
        city: args.city,
        mobile: args.mobile,
        event: args.event,
        headcount: args.pax,
        rooms_required: args.rooms,
        invite_given: args.invited,
        notes: args.note,
    };
    if edit.is_empty() {
        return Err("nothing to change (see wp edit --help)".into());
    }

    let next = guest_ops::apply_edit(session.table(), args.row, edit, &planner.config.guests)?;
    if session.update_table(next)? {
        println!("Updated row {}", args.row);
    } else {
        println!("Row {} already had those values", args.row);
    }
    Ok(())
}

fn cmd_invite(dir: &Path, args: RowsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let _lock = FileLock::acquire_default(planner.store.path())?;
    let mut session = open_session(&planner.store)?;

    let next = guest_ops::mark_invited(session.table(), &args.rows)?;
    session.update_table(next)?;
    for row in &args.rows {
        println!("Invited {}", session.table().guests[row - 1].name);
    }
    Ok(())
}

fn cmd_delete(dir: &Path, args: RowsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let planner = load_planner(dir)?;
    let _lock = FileLock::acquire_default(planner.store.path())?;
    let mut session = open_session(&planner.store)?;

    let (next, removed) = guest_ops::remove_rows(session.table(), &args.rows)?;
    session.update_table(next)?;

    for (row, guest) in &removed {
        recovery::log_guest_deletion(
            planner.store.dir(),
            *row,
            &guest.name,
            &serialize_record(guest),
        );
        println!("Deleted row {}: {}", row, guest.name);
    }
    Ok(())
}
