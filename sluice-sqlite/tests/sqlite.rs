#[cfg(test)]
mod tests {
    use sluice_core::Driver;
    use sluice_sqlite::SqliteDriver;
    use sluice_tests::{execute_tests, init_logs};
    use std::{fs, path::Path, sync::Mutex};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn sqlite() {
        init_logs();
        const DB_PATH: &str = "../target/debug/tests.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH).unwrap_or_else(|_| {
                panic!("Failed to remove existing test database file {DB_PATH}")
            });
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        let driver = SqliteDriver::new();
        let connection = driver
            .connect(&format!("sqlite://{DB_PATH}?mode=rwc"))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        execute_tests(connection);
    }

    #[test]
    fn sqlite_memory() {
        init_logs();
        let connection = SqliteDriver::new()
            .connect("sqlite://:memory:")
            .expect("Could not open the in-memory database");
        execute_tests(connection);
    }
}
