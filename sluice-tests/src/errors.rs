use crate::silent_logs;
use indoc::indoc;
use sluice::{
    Connection, Error, ErrorKind, FetchMode, NativeConnection, Param, ParamType, Params,
};

pub fn errors<C: NativeConnection>(connection: &mut Connection<C>) {
    connection
        .execute("DROP TABLE IF EXISTS unique_codes", &mut Params::new())
        .expect("Failed to drop unique_codes table");
    connection
        .execute(
            indoc! {"
                CREATE TABLE unique_codes (
                    code VARCHAR(16) PRIMARY KEY
                )
            "},
            &mut Params::new(),
        )
        .expect("Failed to create unique_codes table");
    connection
        .execute(
            "INSERT INTO unique_codes (code) VALUES (:code)",
            &mut Params::new().with_named("code", "A1"),
        )
        .expect("Failed to insert the first code");

    silent_logs! {
        // Rejected while preparing
        let error = connection
            .prepare("SELEKT * FROM unique_codes")
            .err()
            .expect("A malformed query must not prepare");
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert!(!error.is_reconnect());
        assert!(error.native().is_some());
        assert!(matches!(&error, Error::Syntax { query, .. } if query.starts_with("SELEKT")));

        // Rejected while executing
        let error = connection
            .execute(
                "INSERT INTO unique_codes (code) VALUES (:code)",
                &mut Params::new().with_named("code", "A1"),
            )
            .expect_err("A duplicate key must fail");
        assert_eq!(error.kind(), ErrorKind::Execution);
        assert!(!error.is_reconnect());

        // Unknown placeholder
        let mut statement = connection
            .prepare("INSERT INTO unique_codes (code) VALUES (:code)")
            .expect("Failed to prepare the insert");
        let error = statement
            .bind(&mut Params::new().with_named("missing", "B2"))
            .expect_err("Binding an unknown placeholder must fail");
        assert_eq!(error.kind(), ErrorKind::Bind);
        assert!(matches!(
            &error,
            Error::Bind { name, value, .. } if name == ":missing" && value == "B2"
        ));
        assert!(matches!(statement.exec().err(), Some(Error::Abandoned)));

        // Unsupported explicit type, nothing reaches the client
        let mut statement = connection
            .prepare("INSERT INTO unique_codes (code) VALUES (:code)")
            .expect("Failed to prepare the insert");
        let mut params = Params::new().with_named(
            "code",
            Param::new(b"C3".as_slice()).with_type(ParamType::Binary),
        );
        let error = statement
            .bind(&mut params)
            .expect_err("The binary type must be refused");
        assert!(matches!(error, Error::UnsupportedType(ParamType::Binary)));
        assert!(params.iter().all(|(_, v)| v.as_param().is_some_and(|v| !v.is_bound())));
        assert!(matches!(
            statement.bind(&mut Params::new().with_named("code", "C3")),
            Err(Error::Abandoned)
        ));
        assert!(matches!(statement.exec().err(), Some(Error::Abandoned)));
    }

    // Failures leave the connection usable
    let rows = connection
        .fetch_all(
            "SELECT code FROM unique_codes",
            &mut Params::new(),
            FetchMode::Positional,
        )
        .expect("Failed to select the codes");
    assert_eq!(rows.len(), 1);
}

pub fn disconnected<C: NativeConnection>(mut connection: Connection<C>) {
    connection.disconnect();
    connection.disconnect();
    assert!(!connection.is_connected());
    let error = connection
        .prepare("SELECT 1")
        .err()
        .expect("A disconnected connection cannot prepare");
    assert_eq!(error.kind(), ErrorKind::Misuse);
    assert!(connection.start_transaction().is_err());
    assert!(connection.commit(true).is_err());
    assert!(connection.rollback().is_err());
}
