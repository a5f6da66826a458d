// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Migration application is also exercised implicitly by every test that
//! calls `Persistence::new_in_memory()`.

use crate::{Persistence, PersistenceError};

use super::create_test_fields;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.insert_item(&create_test_fields()).unwrap();

    assert_eq!(db1.count_items().unwrap(), 1, "db1 should have 1 item");
    assert_eq!(db2.count_items().unwrap(), 0, "db2 should have 0 items (isolated)");
}

#[test]
fn test_file_database_survives_reopen() {
    let path = std::env::temp_dir().join(format!(
        "item_service_reopen_{}_{}.db",
        std::process::id(),
        line!()
    ));
    let _ = std::fs::remove_file(&path);

    let created_id = {
        let mut db = Persistence::new_with_file(&path).unwrap();
        db.insert_item(&create_test_fields()).unwrap().id
    };

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let item = reopened.get_item(created_id).unwrap();
    assert!(item.is_some(), "item should persist across connections");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
