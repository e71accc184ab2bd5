use crate::silent_logs;
use anyhow::{Context, Result, ensure};
use indoc::indoc;
use sluice::{Connection, FetchMode, NativeConnection, Param, Params};

pub fn inserted_id<C: NativeConnection>(connection: &mut Connection<C>) -> Result<()> {
    connection
        .execute("DROP TABLE IF EXISTS authors", &mut Params::new())
        .context("Failed to drop authors table")?;
    connection
        .execute(
            indoc! {"
                CREATE TABLE authors (
                    id INTEGER PRIMARY KEY,
                    name VARCHAR(64) NOT NULL
                )
            "},
            &mut Params::new(),
        )
        .context("Failed to create authors table")?;

    let query = "INSERT INTO authors (name) VALUES (:name) RETURNING id AS _insertedid";
    let mut ids = Vec::new();
    for name in ["Ada Lovelace", "Alan Turing", "Grace Hopper"] {
        let mut statement = connection
            .prepare(query)
            .context("Failed to prepare the insert")?;
        statement.bind(
            &mut Params::new()
                .with_named("name", name)
                .with(Param::inserted_id()),
        )?;
        ensure!(statement.has_inserted_id(), "The sink must be recorded");
        let mut result = statement.exec().context("Failed to insert an author")?;
        ensure!(result.affected_rows() == 1, "Expected one inserted author");
        let id = result
            .inserted_id_as::<i64>()?
            .context("The inserted id was not captured")?;
        // Stable across calls
        ensure!(result.inserted_id_as::<i64>()? == Some(id));
        // The row carrying the id is not part of the result rows
        ensure!(result.fetch_all(FetchMode::Associative)?.is_empty());
        ensure!(result.inserted_id_as::<i64>()? == Some(id));
        ids.push(id);
    }
    ensure!(
        ids.windows(2).all(|v| v[0] < v[1]),
        "Generated ids must be increasing: {ids:?}"
    );

    let rows = connection.fetch_all(
        "SELECT id, name FROM authors WHERE name = :name",
        &mut Params::new().with_named("name", "Alan Turing"),
        FetchMode::Associative,
    )?;
    ensure!(rows.len() == 1);
    ensure!(rows[0].get_column("id").and_then(|v| v.to_i64()) == Some(ids[1]));

    // Alias missing, nothing is captured
    silent_logs! {
        let mut statement = connection.prepare(
            "INSERT INTO authors (name) VALUES (:name) RETURNING id",
        )?;
        statement.bind(
            &mut Params::new()
                .with_named("name", "Edsger Dijkstra")
                .with(Param::inserted_id()),
        )?;
        let result = statement.exec()?;
        ensure!(result.inserted_id().is_none());
        ensure!(result.affected_rows() == 1);
    }

    // No sink, nothing is fetched
    let mut statement = connection.prepare(query)?;
    statement.bind(&mut Params::new().with_named("name", "Barbara Liskov"))?;
    let mut result = statement.exec()?;
    ensure!(result.inserted_id().is_none());
    let rows = result.fetch_all(FetchMode::Positional)?;
    ensure!(rows.len() == 1, "The returned row must be yielded");
    ensure!(rows[0].get(0).and_then(|v| v.to_i64()).is_some());
    Ok(())
}
