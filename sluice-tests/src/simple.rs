use indoc::indoc;
use sluice::{AsValue, Connection, FetchMode, NativeConnection, Param, ParamType, Params, Value};

pub fn simple<C: NativeConnection>(connection: &mut Connection<C>) {
    // Setup
    connection
        .execute("DROP TABLE IF EXISTS simple_fields", &mut Params::new())
        .expect("Failed to drop simple_fields table");
    connection
        .execute(
            indoc! {"
                CREATE TABLE simple_fields (
                    alpha INTEGER PRIMARY KEY,
                    bravo VARCHAR(64),
                    charlie DOUBLE PRECISION,
                    delta INTEGER
                )
            "},
            &mut Params::new(),
        )
        .expect("Failed to create simple_fields table");

    // Named parameters
    let affected = connection
        .execute(
            "INSERT INTO simple_fields (alpha, bravo, charlie, delta) VALUES (:alpha, :bravo, :charlie, :delta)",
            &mut Params::new()
                .with_named("alpha", 1)
                .with_named("bravo", "Hello world!")
                .with_named("charlie", 2.5)
                .with_named("delta", None::<i32>),
        )
        .expect("Failed to insert the first row");
    assert_eq!(affected, 1);

    // Named descriptors and explicit types
    let affected = connection
        .execute(
            "INSERT INTO simple_fields (alpha, bravo, charlie, delta) VALUES (:alpha, :bravo, :charlie, :delta)",
            &mut Params::new()
                .with(Param::new(2).with_name("alpha"))
                .with(Param::new("Ciao").with_name("bravo").with_type(ParamType::String))
                .with(Param::new(-0.125).with_name("charlie").with_type(ParamType::Float))
                .with(Param::new("77").with_name("delta").with_type(ParamType::Int)),
        )
        .expect("Failed to insert the second row");
    assert_eq!(affected, 1);

    // Synthesized positional names
    let affected = connection
        .execute(
            "INSERT INTO simple_fields (alpha, bravo, charlie, delta) VALUES (:p1, :p2, :p3, :p4)",
            &mut Params::from_values([
                3i64.as_value(),
                Value::from("Hola"),
                0f64.as_value(),
                9i32.as_value(),
            ]),
        )
        .expect("Failed to insert the third row");
    assert_eq!(affected, 1);

    // Update affects several rows
    let affected = connection
        .execute(
            "UPDATE simple_fields SET delta = :delta WHERE alpha >= :lower",
            &mut Params::new().with_named("delta", 10).with_named("lower", 2),
        )
        .expect("Failed to update simple_fields");
    assert_eq!(affected, 2);

    // Read back
    let rows = connection
        .fetch_all(
            "SELECT alpha, bravo, charlie, delta FROM simple_fields ORDER BY alpha",
            &mut Params::new(),
            FetchMode::Associative,
        )
        .expect("Failed to select simple_fields");
    assert_eq!(rows.len(), 3);
    let column = |row: usize, name: &str| {
        rows[row]
            .get_column(name)
            .cloned()
            .unwrap_or_else(|| panic!("Column {name} is missing from row {row}"))
    };
    assert_eq!(i64::try_from_value(column(0, "alpha")).unwrap(), 1);
    assert_eq!(
        String::try_from_value(column(0, "bravo")).unwrap(),
        "Hello world!"
    );
    assert_eq!(f64::try_from_value(column(0, "charlie")).unwrap(), 2.5);
    assert!(column(0, "delta").is_null());
    assert_eq!(String::try_from_value(column(1, "bravo")).unwrap(), "Ciao");
    assert_eq!(f64::try_from_value(column(1, "charlie")).unwrap(), -0.125);
    assert_eq!(i64::try_from_value(column(1, "delta")).unwrap(), 10);
    assert_eq!(String::try_from_value(column(2, "bravo")).unwrap(), "Hola");
    assert_eq!(i64::try_from_value(column(2, "delta")).unwrap(), 10);

    // Select with a filter
    let rows = connection
        .fetch_all(
            "SELECT bravo FROM simple_fields WHERE alpha = :id",
            &mut Params::new().with_named("id", 3),
            FetchMode::Associative,
        )
        .expect("Failed to select one row");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get_column("bravo").map(|v| v.to_string()),
        Some("Hola".into())
    );

    // Delete
    let affected = connection
        .execute("DELETE FROM simple_fields", &mut Params::new())
        .expect("Failed to clear simple_fields");
    assert_eq!(affected, 3);
    let rows = connection
        .fetch_all(
            "SELECT * FROM simple_fields",
            &mut Params::new(),
            FetchMode::Both,
        )
        .expect("Failed to select the empty table");
    assert!(rows.is_empty());
}
