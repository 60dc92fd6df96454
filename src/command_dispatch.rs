//! Purpose: Hold top-level CLI command dispatch for `roster`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every store command opens the store once and renders one outcome.
//! Invariants: An empty listing is informational and exits 0.

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    store_path: &Path,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "roster", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            println!("roster {}", env!("CARGO_PKG_VERSION"));
            Ok(RunOutcome::ok())
        }
        Command::Add {
            id,
            name,
            age,
            course,
            json,
        } => {
            let mut store = open_store(store_path, "add", color_mode);
            let record = Record::new(id, name, age, course);
            let status = store.add(record.clone())?;
            report_save(&status, "add", store.path(), color_mode);
            if json {
                emit_json(json!({
                    "added": record_json(&record),
                    "saved": status.is_saved(),
                    "total": store.len(),
                }));
            } else {
                println!("Student added successfully.");
            }
            Ok(RunOutcome::ok())
        }
        Command::Remove { id, json } => {
            let mut store = open_store(store_path, "remove", color_mode);
            let removed = store.remove(id)?;
            report_save(&removed.save, "remove", store.path(), color_mode);
            if json {
                emit_json(json!({
                    "removed": record_json(&removed.record),
                    "saved": removed.save.is_saved(),
                    "total": store.len(),
                }));
            } else {
                println!("Student removed successfully.");
            }
            Ok(RunOutcome::ok())
        }
        Command::List { json } => {
            let store = open_store(store_path, "list", color_mode);
            match store.list_all() {
                Ok(listing) if json => emit_json(listing_json(&listing)),
                Ok(listing) => println!("{}", listing.render()),
                Err(err) if err.kind() == ErrorKind::Empty => {
                    if json {
                        emit_json(listing_json(store.records()));
                    } else {
                        println!("No students to display.");
                    }
                }
                Err(err) => return Err(err),
            }
            Ok(RunOutcome::ok())
        }
        Command::Show { id, json } => {
            let store = open_store(store_path, "show", color_mode);
            let record = store.find_one(id)?;
            if json {
                emit_json(record_json(record));
            } else {
                println!("{record}");
            }
            Ok(RunOutcome::ok())
        }
        Command::Menu => {
            let mut store = open_store(store_path, "menu", color_mode);
            let stdin = io::stdin();
            let stdout = io::stdout();
            menu::run_menu(&mut store, &mut stdin.lock(), &mut stdout.lock()).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("menu i/o failed")
                    .with_source(err)
            })?;
            Ok(RunOutcome::ok())
        }
    }
}
