#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sluice::{
        AsValue, Connection, Driver, ErrorKind, FetchMode, Param, ParamType, Params, Row,
    };
    use sluice_sqlite::{SqliteConnection, SqliteDriver};

    fn library() -> Connection<SqliteConnection> {
        let mut connection = SqliteDriver::new()
            .connect("sqlite://:memory:")
            .expect("Could not open the in-memory database");
        connection
            .execute(
                indoc! {"
                    CREATE TABLE books (
                        id INTEGER PRIMARY KEY,
                        title VARCHAR(128) NOT NULL UNIQUE,
                        year INTEGER,
                        price DOUBLE PRECISION,
                        available BOOLEAN NOT NULL,
                        cover BLOB
                    )
                "},
                &mut Params::new(),
            )
            .expect("Failed to create books table");
        connection
    }

    fn add_book(
        connection: &mut Connection<SqliteConnection>,
        title: &str,
        year: Option<i32>,
        price: f64,
        available: bool,
    ) -> i64 {
        let mut statement = connection
            .prepare(indoc! {"
                INSERT INTO books (title, year, price, available)
                VALUES (:title, :year, :price, :available)
                RETURNING id AS _insertedid
            "})
            .expect("Failed to prepare the insert");
        statement
            .bind(
                &mut Params::new()
                    .with_named("title", title)
                    .with_named("year", year)
                    .with_named("price", price)
                    .with_named("available", available)
                    .with(Param::inserted_id()),
            )
            .expect("Failed to bind the book");
        let result = statement.exec().expect("Failed to insert the book");
        result
            .inserted_id_as::<i64>()
            .expect("The id must be an integer")
            .expect("The id must be captured")
    }

    #[test]
    fn catalog() {
        let mut connection = library();
        let first = add_book(&mut connection, "Dune", Some(1965), 9.99, true);
        let second = add_book(&mut connection, "Neuromancer", Some(1984), 7.5, false);
        let third = add_book(&mut connection, "Anonymous notes", None, 1.0, true);
        assert!(first < second && second < third);

        let rows = connection
            .fetch_all(
                "SELECT title, year, price, available FROM books WHERE available = :available ORDER BY id",
                &mut Params::new().with_named("available", true),
                FetchMode::Associative,
            )
            .expect("Failed to select the available books");
        let titles = rows
            .iter()
            .map(|row: &Row| {
                String::try_from_value(row.get_column("title").cloned().unwrap_or_default())
                    .expect("Title must be text")
            })
            .collect::<Vec<_>>();
        assert_eq!(titles, ["Dune", "Anonymous notes"]);
        assert_eq!(
            rows[0].get_column("year").and_then(|v| v.to_i64()),
            Some(1965)
        );
        assert!(rows[1].get_column("year").is_some_and(|v| v.is_null()));
        assert_eq!(
            bool::try_from_value(rows[0].get_column("available").cloned().unwrap_or_default())
                .expect("Available must be a flag"),
            true
        );
        let price = f64::try_from_value(rows[0].get_column("price").cloned().unwrap_or_default())
            .expect("Price must be a number");
        assert!((price - 9.99).abs() < 1e-9);
    }

    #[test]
    fn covers() {
        let mut connection = library();
        let id = add_book(&mut connection, "Foundation", Some(1951), 8.0, true);
        let cover = (0..10_000u32).map(|v| (v % 251) as u8).collect::<Vec<_>>();
        let chunks = cover.chunks(1024).map(<[u8]>::to_vec).collect::<Vec<_>>();
        let affected = connection
            .execute(
                "UPDATE books SET cover = :cover WHERE id = :id",
                &mut Params::new()
                    .with_named(
                        "cover",
                        Param::lazy(chunks)
                            .with_type(ParamType::Blob)
                            .with_size(cover.len()),
                    )
                    .with_named("id", id),
            )
            .expect("Failed to store the cover");
        assert_eq!(affected, 1);
        let rows = connection
            .fetch_all(
                "SELECT cover FROM books WHERE id = :id",
                &mut Params::new().with_named("id", id),
                FetchMode::Positional,
            )
            .expect("Failed to read the cover");
        let stored = Vec::<u8>::try_from_value(rows[0].get(0).cloned().unwrap_or_default())
            .expect("Cover must be binary");
        assert_eq!(stored, cover);

        // Declared size smaller than the payload
        let error = connection
            .execute(
                "UPDATE books SET cover = :cover WHERE id = :id",
                &mut Params::new()
                    .with_named(
                        "cover",
                        Param::new(cover.as_slice())
                            .with_type(ParamType::Blob)
                            .with_size(16),
                    )
                    .with_named("id", id),
            )
            .expect_err("An oversized large object must be refused");
        assert_eq!(error.kind(), ErrorKind::Bind);
        assert!(error.to_string().contains(":cover"));
        assert!(error.to_string().contains("[Blob]"));
    }

    #[test]
    fn restock_in_transaction() {
        let mut connection = library();
        add_book(&mut connection, "Solaris", Some(1961), 6.0, false);
        add_book(&mut connection, "Ubik", Some(1969), 6.5, false);

        connection
            .start_transaction()
            .expect("Failed to begin the transaction");
        let restocked = connection
            .execute(
                "UPDATE books SET available = :available WHERE year < :year",
                &mut Params::new()
                    .with_named("available", true)
                    .with_named("year", 1965),
            )
            .expect("Failed to restock");
        assert_eq!(restocked, 1);
        let error = connection
            .execute(
                "INSERT INTO books (title, available) VALUES (:title, :available)",
                &mut Params::new()
                    .with_named("title", "Solaris")
                    .with_named("available", true),
            )
            .expect_err("Titles are unique");
        assert_eq!(error.kind(), ErrorKind::Execution);
        assert!(!error.is_reconnect());
        connection.rollback().expect("Failed to rollback");

        let rows = connection
            .fetch_all(
                "SELECT COUNT(*) FROM books WHERE available",
                &mut Params::new(),
                FetchMode::Positional,
            )
            .expect("Failed to count the available books");
        assert_eq!(rows[0].get(0).and_then(|v| v.to_i64()), Some(0));
    }
}
