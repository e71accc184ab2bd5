use anyhow::{Context, Result, ensure};
use indoc::indoc;
use sluice::{AsValue, Connection, FetchMode, NativeConnection, Param, ParamType, Params};

pub fn streaming<C: NativeConnection>(connection: &mut Connection<C>) -> Result<()> {
    connection
        .execute("DROP TABLE IF EXISTS documents", &mut Params::new())
        .context("Failed to drop documents table")?;
    connection
        .execute(
            indoc! {"
                CREATE TABLE documents (
                    id INTEGER PRIMARY KEY,
                    body TEXT,
                    payload BLOB
                )
            "},
            &mut Params::new(),
        )
        .context("Failed to create documents table")?;

    let lines = (0..100).map(|i| format!("line {i}\n")).collect::<Vec<_>>();
    let expected_body = lines.concat();
    let payload = (0..=255u8).cycle().take(4096).collect::<Vec<_>>();
    let chunks = payload.chunks(100).map(<[u8]>::to_vec).collect::<Vec<_>>();
    let mut params = Params::new()
        .with_named("id", 1)
        .with_named("body", Param::lazy(lines).with_type(ParamType::Text))
        .with_named(
            "payload",
            Param::lazy(chunks)
                .with_type(ParamType::Blob)
                .with_size(payload.len()),
        );
    let affected = connection
        .execute(
            "INSERT INTO documents (id, body, payload) VALUES (:id, :body, :payload)",
            &mut params,
        )
        .context("Failed to insert a streamed document")?;
    ensure!(affected == 1, "Expected one inserted document, got {affected}");
    ensure!(
        params
            .iter()
            .filter_map(|(_, v)| v.as_param())
            .all(|v| v.is_bound()),
        "Every descriptor must be marked bound"
    );

    // Null and empty streams
    connection
        .execute(
            "INSERT INTO documents (id, body, payload) VALUES (:id, :body, :payload)",
            &mut Params::new()
                .with_named("id", 2)
                .with_named("body", Param::lazy(Vec::<String>::new()))
                .with_named("payload", Param::null().with_type(ParamType::Blob)),
        )
        .context("Failed to insert an empty document")?;

    let mut rows = connection
        .fetch_all(
            "SELECT body, payload FROM documents ORDER BY id",
            &mut Params::new(),
            FetchMode::Associative,
        )
        .context("Failed to select the documents")?
        .into_iter();
    let row = rows.next().context("Missing the streamed document")?;
    let body = String::try_from_value(row.get_column("body").cloned().unwrap_or_default())?;
    ensure!(body == expected_body, "The streamed body does not match");
    let stored = Vec::<u8>::try_from_value(row.get_column("payload").cloned().unwrap_or_default())?;
    ensure!(stored == payload, "The streamed payload does not match");
    let row = rows.next().context("Missing the empty document")?;
    ensure!(
        String::try_from_value(row.get_column("body").cloned().unwrap_or_default())?.is_empty(),
        "The empty stream must be stored as an empty text"
    );
    ensure!(
        row.get_column("payload").is_some_and(|v| v.is_null()),
        "The null payload must be read back as null"
    );
    Ok(())
}
