use staffdesk_core::{EmbeddedSchema, FixedPathResolver, StorageError, StorageManager};

fn open_manager(
    dir: &std::path::Path,
) -> StorageManager<FixedPathResolver, EmbeddedSchema> {
    let mut manager = StorageManager::new(FixedPathResolver::new(dir), EmbeddedSchema);
    manager.handle().unwrap();
    manager
}

fn employee_count(manager: &mut StorageManager<FixedPathResolver, EmbeddedSchema>) -> i64 {
    manager
        .handle()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap()
}

const INSERT_SQL: &str =
    "INSERT INTO employees (uuid, full_name, cpf) VALUES (?1, ?2, ?3);";

#[test]
fn normal_return_commits_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(dir.path());

    let inserted = manager
        .with_transaction(|tx| -> Result<usize, StorageError> {
            let changed = tx.execute(
                INSERT_SQL,
                ["00000000-0000-4000-8000-000000000001", "Ana Souza", "52998224725"],
            )?;
            Ok(changed)
        })
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(employee_count(&mut manager), 1);
}

#[test]
fn failing_unit_of_work_rolls_back_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(dir.path());

    let err = manager
        .with_transaction(|tx| -> Result<(), StorageError> {
            tx.execute(
                INSERT_SQL,
                ["00000000-0000-4000-8000-000000000002", "Bruno Lima", "11144477735"],
            )?;
            // Any failure on the way out must undo the insert above.
            Err(StorageError::NotReady)
        })
        .unwrap_err();

    assert!(matches!(err, StorageError::NotReady));
    assert_eq!(employee_count(&mut manager), 0);
}

#[test]
fn sqlite_failure_inside_unit_of_work_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(dir.path());

    let err = manager
        .with_transaction(|tx| -> Result<(), StorageError> {
            tx.execute(
                INSERT_SQL,
                ["00000000-0000-4000-8000-000000000003", "Carla Dias", "12345678909"],
            )?;
            tx.execute("INSERT INTO no_such_table (id) VALUES (1);", [])?;
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(err, StorageError::Sqlite(_)));
    assert_eq!(employee_count(&mut manager), 0);
}

#[test]
fn sequential_transactions_see_committed_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = open_manager(dir.path());

    manager
        .with_transaction(|tx| -> Result<(), StorageError> {
            tx.execute(
                INSERT_SQL,
                ["00000000-0000-4000-8000-000000000004", "Davi Rocha", "52998224725"],
            )?;
            Ok(())
        })
        .unwrap();

    let seen: i64 = manager
        .with_transaction(|tx| -> Result<i64, StorageError> {
            let count = tx.query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
            Ok(count)
        })
        .unwrap();
    assert_eq!(seen, 1);
}
