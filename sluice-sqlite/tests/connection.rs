#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sluice::{
        Connection, ErrorKind, FetchMode, NativeBindType, NativeConnection, NativeStatement, Params,
        Value,
    };
    use sluice_sqlite::{SQLITE_RECONNECT_CODES, SqliteConnection, code_name};
    use sluice_tests::{init_logs, silent_logs};
    use std::{fs, path::Path, sync::Mutex};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .unwrap_or_else(|_| panic!("Failed to remove test database file {DB_PATH}"));
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::open(&format!("sqlite://{DB_PATH}?mode=rwc"))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::open(&format!("sqlite://{DB_PATH}?mode=ro"))
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .unwrap_or_else(|_| panic!("Failed to remove existing test database file {DB_PATH}"));
        silent_logs! {
            let error = SqliteConnection::open(&format!("sqlite://{DB_PATH}?mode=ro"))
                .err()
                .expect("Should not be able to open in read only unexisting database");
            assert_eq!(error.kind(), ErrorKind::Connect);
        }
    }

    #[test]
    fn wrong_url() {
        init_logs();
        silent_logs! {
            assert!(SqliteConnection::open("duckdb://some_value").is_err());
            assert!(SqliteConnection::open("sqlite:/missing_slash").is_err());
        };
    }

    #[test]
    fn reconnect_table() {
        let connection = SqliteConnection::open("sqlite://:memory:").unwrap();
        let classifier = connection.classifier();
        assert_eq!(
            classifier.reconnect_codes().collect::<Vec<_>>(),
            SQLITE_RECONNECT_CODES
        );
        assert!(classifier.is_reconnect(&code_name(libsqlite3_sys::SQLITE_IOERR)));
        assert!(!classifier.is_reconnect(&code_name(libsqlite3_sys::SQLITE_CONSTRAINT)));
        // Extended codes map to their primary code
        assert_eq!(code_name(libsqlite3_sys::SQLITE_IOERR_READ), "SQLITE_IOERR");
    }

    #[test]
    fn multiple_statements_are_refused() {
        init_logs();
        let mut connection = Connection::new(SqliteConnection::open("sqlite://:memory:").unwrap());
        silent_logs! {
            let error = connection
                .prepare("SELECT 1; SELECT 2")
                .err()
                .expect("Two statements cannot be prepared together");
            assert_eq!(error.kind(), ErrorKind::Syntax);
        }
        assert!(connection.prepare("SELECT 1;  ").is_ok());
    }

    #[test]
    fn native_binds() {
        init_logs();
        let mut connection = Connection::new(SqliteConnection::open("sqlite://:memory:").unwrap());
        connection
            .execute(
                indoc! {"
                    CREATE TABLE native (
                        flag INTEGER,
                        data BLOB
                    )
                "},
                &mut Params::new(),
            )
            .unwrap();
        let mut statement = connection
            .native_mut()
            .unwrap()
            .prepare("INSERT INTO native (flag, data) VALUES (:flag, :data)")
            .unwrap();
        assert!(statement.bind(":flag", &Value::Boolean(Some(true)), NativeBindType::Integer, 0).unwrap());
        assert!(!statement.bind(":flag", &Value::Varchar(Some("yes".into())), NativeBindType::Integer, 0).unwrap());
        assert!(!statement.bind(":missing", &Value::Int32(Some(1)), NativeBindType::Integer, 0).unwrap());
        let data = Value::Blob(Some([1, 2, 3, 4].into()));
        assert!(!statement.bind(":data", &data, NativeBindType::LargeObject, 3).unwrap());
        assert!(statement.bind(":data", &data, NativeBindType::LargeObject, 4).unwrap());
        assert!(statement.bind(":data", &data, NativeBindType::LargeObject, 0).unwrap());
        statement.execute().unwrap();
        assert_eq!(statement.row_count(), 1);
        assert_eq!(statement.fetch().unwrap(), None);
        drop(statement);

        let rows = connection
            .fetch_all(
                "SELECT flag, data FROM native",
                &mut Params::new(),
                FetchMode::Positional,
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some(&Value::Int64(Some(1))));
        assert_eq!(rows[0].get(1), Some(&data));
    }

    #[test]
    fn booleans_are_integers() {
        init_logs();
        let mut connection = Connection::new(SqliteConnection::open("sqlite://:memory:").unwrap());
        let rows = connection
            .fetch_all(
                "SELECT :yes AS truthy, :off AS falsy",
                &mut Params::new().with_named("yes", true).with_named("off", false),
                FetchMode::Associative,
            )
            .unwrap();
        assert_eq!(rows[0].get_column("truthy"), Some(&Value::Int64(Some(1))));
        assert_eq!(rows[0].get_column("falsy"), Some(&Value::Int64(Some(0))));
    }

    #[test]
    fn fetch_before_execute() {
        let mut connection = SqliteConnection::open("sqlite://:memory:").unwrap();
        let mut statement = connection.prepare("SELECT 1").unwrap();
        assert!(statement.fetch().is_err());
        statement.execute().unwrap();
        let row = statement.fetch().unwrap().expect("Expected one row");
        assert_eq!(row.values(), [Value::Int64(Some(1))]);
        assert_eq!(statement.fetch().unwrap(), None);
        assert_eq!(statement.fetch().unwrap(), None);
        assert_eq!(statement.row_count(), 0);
    }

    #[test]
    fn returning_counts_affected_rows() {
        init_logs();
        let mut connection = Connection::new(SqliteConnection::open("sqlite://:memory:").unwrap());
        connection
            .execute(
                "CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT NOT NULL)",
                &mut Params::new(),
            )
            .unwrap();
        assert_eq!(
            connection
                .execute(
                    "INSERT INTO tags (label) VALUES ('a'), ('b')",
                    &mut Params::new()
                )
                .unwrap(),
            2
        );

        let mut statement = connection
            .prepare("INSERT INTO tags (label) VALUES ('c'), ('d') RETURNING id")
            .unwrap();
        let mut result = statement.exec().unwrap();
        assert_eq!(result.affected_rows(), 2);
        let rows = result.fetch_all(FetchMode::Positional).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(0), Some(&Value::Int64(Some(3))));
        assert_eq!(rows[1].get(0), Some(&Value::Int64(Some(4))));
        drop(result);
        drop(statement);

        let mut statement = connection
            .prepare("UPDATE tags SET label = 'z' WHERE id > :id RETURNING id")
            .unwrap();
        statement
            .bind(&mut Params::new().with_named("id", 1))
            .unwrap();
        let mut result = statement.exec().unwrap();
        assert_eq!(result.affected_rows(), 3);
        assert_eq!(result.fetch_all(FetchMode::Positional).unwrap().len(), 3);
        drop(result);
        drop(statement);

        let mut statement = connection.prepare("SELECT id FROM tags").unwrap();
        let mut result = statement.exec().unwrap();
        assert_eq!(result.affected_rows(), 0);
        assert_eq!(result.fetch_all(FetchMode::Positional).unwrap().len(), 4);
    }

    #[test]
    fn statement_outlives_connection() {
        init_logs();
        let mut connection = Connection::new(SqliteConnection::open("sqlite://:memory:").unwrap());
        let mut statement = connection.prepare("SELECT 1 + 1").unwrap();
        connection.disconnect();
        assert!(!connection.is_connected());
        let mut result = statement.exec().unwrap();
        let rows = result.fetch_all(FetchMode::Positional).unwrap();
        assert_eq!(rows[0].get(0), Some(&Value::Int64(Some(2))));
    }

    #[test]
    fn ignored_fetch_size() {
        let mut connection = SqliteConnection::open("sqlite://:memory:").unwrap();
        let mut statement = connection.prepare("SELECT 1").unwrap();
        statement.set_fetch_size(100).unwrap();
        statement.execute().unwrap();
        assert!(statement.fetch().unwrap().is_some());
        assert_eq!(statement.fetch().unwrap(), None);
    }
}
