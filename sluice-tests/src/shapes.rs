use indoc::indoc;
use sluice::{AsValue, Connection, FetchMode, NativeConnection, Params, Row, Value};

pub fn shapes<C: NativeConnection>(connection: &mut Connection<C>) {
    connection
        .execute("DROP TABLE IF EXISTS shapes", &mut Params::new())
        .expect("Failed to drop shapes table");
    connection
        .execute(
            indoc! {"
                CREATE TABLE shapes (
                    id INTEGER PRIMARY KEY,
                    label VARCHAR(32) NOT NULL
                )
            "},
            &mut Params::new(),
        )
        .expect("Failed to create shapes table");
    for (id, label) in [(1, "one"), (2, "two")] {
        connection
            .execute(
                "INSERT INTO shapes (id, label) VALUES (:id, :label)",
                &mut Params::new().with_named("id", id).with_named("label", label),
            )
            .expect("Failed to insert into shapes");
    }
    let query = "SELECT id, label FROM shapes ORDER BY id";

    // Associative
    let rows = connection
        .fetch_all(query, &mut Params::new(), FetchMode::Associative)
        .expect("Failed to fetch associative rows");
    assert_eq!(rows.len(), 2);
    let row = &rows[0];
    assert_eq!(row.mode(), FetchMode::Associative);
    assert_eq!(row.names(), ["id", "label"]);
    assert_eq!(
        row.get_column("label").cloned(),
        Some(Value::Varchar(Some("one".into())))
    );
    assert_eq!(row.get(0), None);

    // Positional
    let rows = connection
        .fetch_all(query, &mut Params::new(), FetchMode::Positional)
        .expect("Failed to fetch positional rows");
    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert!(row.names().is_empty());
    assert_eq!(row.get_column("label"), None);
    assert_eq!(i32::try_from_value(row.get(0).cloned().unwrap()).unwrap(), 2);
    assert_eq!(
        row.get(1).cloned(),
        Some(Value::Varchar(Some("two".into())))
    );
    assert_eq!(row.get(2), None);

    // Both
    let rows = connection
        .fetch_all(query, &mut Params::new(), FetchMode::Both)
        .expect("Failed to fetch rows in both shapes");
    let labels = rows
        .iter()
        .map(|row: &Row| {
            assert_eq!(row.get(1), row.get_column("label"));
            String::try_from_value(row.get(1).cloned().unwrap_or_default())
                .expect("The label must be a string")
        })
        .collect::<Vec<_>>();
    assert_eq!(labels, ["one", "two"]);
}
