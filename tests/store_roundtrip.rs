// Library-level persistence checks across independent Store instances.
use roster::api::{ErrorKind, Record, Store};

#[test]
fn reopened_store_matches_original_content_and_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("students.json");

    let mut store = Store::open(&path).store;
    store.add(Record::new(1, "Ann", 20, "CS")).expect("add");
    store.add(Record::new(2, "Bo", 22, "Math")).expect("add");
    let original = store.records().to_vec();
    drop(store);

    let reopened = Store::open(&path);
    assert!(reopened.warning.is_none());
    assert_eq!(reopened.store.records(), original.as_slice());
    assert_eq!(reopened.store.len(), 2);
}

#[test]
fn count_is_recomputed_after_reload() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("students.json");

    let mut store = Store::open(&path).store;
    for id in 1..=4 {
        store.add(Record::new(id, "x", 20, "y")).expect("add");
    }
    store.remove(3).expect("remove");

    let reopened = Store::open(&path).store;
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.list_all().expect("listing").total(), 3);
}

#[test]
fn unreadable_path_warns_instead_of_failing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let opened = Store::open(temp.path());
    let warning = opened.warning.expect("warning");
    assert!(warning.kind().is_persistence());
    assert_eq!(opened.store.list_all().expect_err("empty").kind(), ErrorKind::Empty);
}
