//! Purpose: Interactive numbered menu over a roster store.
//! Exports: `run_menu`.
//! Role: Line-oriented front end for people who prefer prompts to subcommands.
//! Invariants: Bad numeric input re-prompts; it never aborts the loop.
//! Invariants: End of input is treated like choosing Exit.

use std::io::{self, BufRead, Write};

use roster::api::{ErrorKind, Record, SaveStatus, Store};

const MENU: &str = "\n--- Student Management Menu ---
1) Create Student
2) Remove Student
3) Display All Students
4) Display One Student
5) Exit";

const INVALID_NUMBER_PROMPT: &str = "Please enter a valid number: ";

pub(crate) fn run_menu<R, W>(store: &mut Store, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt_number(input, out, "Enter your choice: ")? else {
            return farewell(out);
        };
        match choice {
            1 => {
                let Some(record) = prompt_record(input, out)? else {
                    return farewell(out);
                };
                match store.add(record) {
                    Ok(status) => {
                        report_save(out, &status)?;
                        writeln!(out, "Student added successfully.")?;
                    }
                    Err(err) => match err.id() {
                        Some(id) if err.kind() == ErrorKind::Duplicate => {
                            writeln!(out, "Student with ID {id} already exists.")?;
                        }
                        _ => writeln!(out, "Error: {err}")?,
                    },
                }
            }
            2 => {
                let Some(id) = prompt_number(input, out, "Enter Student ID to remove: ")? else {
                    return farewell(out);
                };
                match store.remove(id) {
                    Ok(removed) => {
                        report_save(out, &removed.save)?;
                        writeln!(out, "Student removed successfully.")?;
                    }
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        writeln!(out, "No student found with ID: {id}")?;
                    }
                    Err(err) => writeln!(out, "Error: {err}")?,
                }
            }
            3 => match store.list_all() {
                Ok(listing) => writeln!(out, "{}", listing.render())?,
                Err(err) if err.kind() == ErrorKind::Empty => {
                    writeln!(out, "No students to display.")?;
                }
                Err(err) => writeln!(out, "Error: {err}")?,
            },
            4 => {
                let Some(id) = prompt_number(input, out, "Enter Student ID to display: ")? else {
                    return farewell(out);
                };
                match store.find_one(id) {
                    Ok(record) => writeln!(out, "{record}")?,
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        writeln!(out, "No student found with ID: {id}")?;
                    }
                    Err(err) => writeln!(out, "Error: {err}")?,
                }
            }
            5 => return farewell(out),
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}

fn farewell<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Exiting... Goodbye!")?;
    out.flush()
}

fn report_save<W: Write>(out: &mut W, status: &SaveStatus) -> io::Result<()> {
    if let Some(err) = status.warning() {
        writeln!(out, "Warning: could not save students: {err}")?;
    }
    Ok(())
}

fn prompt_record<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Record>> {
    let Some(id) = prompt_number(input, out, "Enter ID: ")? else {
        return Ok(None);
    };
    let Some(name) = prompt_text(input, out, "Enter Name: ")? else {
        return Ok(None);
    };
    let Some(age) = prompt_number(input, out, "Enter Age: ")? else {
        return Ok(None);
    };
    let Some(course) = prompt_text(input, out, "Enter Course: ")? else {
        return Ok(None);
    };
    Ok(Some(Record::new(id, name, age, course)))
}

fn prompt_text<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    read_line(input)
}

fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<i32>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if let Ok(value) = line.trim().parse::<i32>() {
            return Ok(Some(value));
        }
        write!(out, "{INVALID_NUMBER_PROMPT}")?;
        out.flush()?;
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::run_menu;
    use roster::api::{Record, Store};
    use std::io::Cursor;

    fn drive(store: &mut Store, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_menu(store, &mut input, &mut out).expect("menu");
        String::from_utf8(out).expect("utf8")
    }

    fn fresh_store(dir: &tempfile::TempDir) -> Store {
        Store::open(dir.path().join("students.json")).store
    }

    #[test]
    fn create_then_display_all() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        let out = drive(&mut store, "1\n1\nAnn Lee\n20\nCS\n3\n5\n");

        assert!(out.contains("Student added successfully."));
        assert!(out.contains("Name   : Ann Lee"));
        assert!(out.contains("Total Students: 1"));
        assert!(out.trim_end().ends_with("Exiting... Goodbye!"));
        assert_eq!(store.records(), &[Record::new(1, "Ann Lee", 20, "CS")]);
    }

    #[test]
    fn duplicate_and_missing_ids_get_distinct_messages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        let out = drive(
            &mut store,
            "1\n1\nAnn\n20\nCS\n1\n1\nBo\n22\nMath\n2\n99\n4\n99\n5\n",
        );

        assert!(out.contains("Student with ID 1 already exists."));
        assert_eq!(out.matches("No student found with ID: 99").count(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_roster_lists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        let out = drive(&mut store, "3\n5\n");
        assert!(out.contains("No students to display."));
    }

    #[test]
    fn non_numeric_input_reprompts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        let out = drive(&mut store, "abc\n1\nx\n7\nCy\nold\n19\nBio\n5\n");

        assert_eq!(out.matches("Please enter a valid number: ").count(), 3);
        assert_eq!(store.find_one(7).expect("find").age(), 19);
    }

    #[test]
    fn unknown_choice_and_eof_exit_cleanly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        let out = drive(&mut store, "9\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.trim_end().ends_with("Exiting... Goodbye!"));
    }

    #[test]
    fn remove_and_show() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = fresh_store(&dir);
        store.add(Record::new(1, "Ann", 20, "CS")).expect("add");
        store.add(Record::new(2, "Bo", 22, "Math")).expect("add");

        let out = drive(&mut store, "4\n2\n2\n1\n5\n");
        assert!(out.contains("Course : Math"));
        assert!(out.contains("Student removed successfully."));
        assert_eq!(store.records(), &[Record::new(2, "Bo", 22, "Math")]);
    }

    #[test]
    fn unsaved_change_prints_warning_and_stays_in_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").expect("write");
        let mut store = Store::open(blocker.join("students.json")).store;

        let out = drive(&mut store, "1
1
Ann
20
CS
5
");
        let warning = out
            .find("Warning: could not save students:")
            .expect("warning line");
        let added = out.find("Student added successfully.").expect("added line");
        assert!(warning < added);
        assert_eq!(store.records(), &[Record::new(1, "Ann", 20, "CS")]);
    }
}
