use sluice::{Connection, ErrorKind, FetchMode, NativeConnection, Params};

pub fn single_pass<C: NativeConnection>(connection: &mut Connection<C>) {
    connection
        .execute("DROP TABLE IF EXISTS single_pass", &mut Params::new())
        .expect("Failed to drop single_pass table");
    connection
        .execute(
            "CREATE TABLE single_pass (amount INTEGER NOT NULL)",
            &mut Params::new(),
        )
        .expect("Failed to create single_pass table");
    for value in 1..=5 {
        connection
            .execute(
                "INSERT INTO single_pass (amount) VALUES (:amount)",
                &mut Params::new().with_named("amount", value),
            )
            .expect("Failed to insert into single_pass");
    }

    let mut statement = connection
        .prepare("SELECT amount FROM single_pass WHERE amount > :min ORDER BY amount")
        .expect("Failed to prepare the select");
    statement.set_fetch_size(2).expect("Failed to set fetch size");
    statement
        .bind(&mut Params::new().with_named("min", 1))
        .expect("Failed to bind min");
    // Ignored, the parameters were already bound
    statement
        .bind(&mut Params::new().with_named("min", 4))
        .expect("A second bind must be a no-op");
    {
        let mut result = statement.exec().expect("Failed to execute the select");
        assert_eq!(result.affected_rows(), 0);
        assert_eq!(result.inserted_id(), None);
        let mut rows = result.rows(FetchMode::Positional);
        let first = rows
            .next()
            .expect("Expected a first row")
            .expect("Failed to fetch the first row");
        assert_eq!(first.get(0).and_then(|v| v.to_i64()), Some(2));
        assert_eq!(rows.count(), 3);
        assert!(result.is_exhausted());
        assert!(result.rows(FetchMode::Associative).next().is_none());
        assert!(result.fetch_all(FetchMode::Both).unwrap().is_empty());
        assert_eq!(result.affected_rows(), 0);
    }

    // Executed once
    let error = match statement.exec() {
        Ok(..) => panic!("A statement cannot be executed twice"),
        Err(e) => e,
    };
    assert_eq!(error.kind(), ErrorKind::Misuse);
    statement.close();
    statement.close();
    assert!(statement.is_closed());
    assert!(statement.bind(&mut Params::new().with(1)).is_err());

    // Closed early
    let mut statement = connection
        .prepare("SELECT amount FROM single_pass ORDER BY amount")
        .expect("Failed to prepare the select");
    let mut result = statement.exec().expect("Failed to execute the select");
    let row = result
        .rows(FetchMode::Positional)
        .next()
        .expect("Expected a row")
        .expect("Failed to fetch a row");
    assert_eq!(row.get(0).and_then(|v| v.to_i64()), Some(1));
    result.close();
    result.close();
    assert!(result.rows(FetchMode::Positional).next().is_none());
}
