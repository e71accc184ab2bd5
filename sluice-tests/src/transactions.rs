use anyhow::{Context, Result, ensure};
use sluice::{Connection, FetchMode, NativeConnection, Params};

fn count<C: NativeConnection>(connection: &mut Connection<C>) -> Result<i64> {
    let rows = connection.fetch_all(
        "SELECT COUNT(*) AS total FROM ledger",
        &mut Params::new(),
        FetchMode::Associative,
    )?;
    rows.first()
        .and_then(|v| v.get_column("total"))
        .and_then(|v| v.to_i64())
        .context("The count query returned nothing")
}

pub fn transactions<C: NativeConnection>(connection: &mut Connection<C>) -> Result<()> {
    connection.execute("DROP TABLE IF EXISTS ledger", &mut Params::new())?;
    connection.execute(
        "CREATE TABLE ledger (entry INTEGER NOT NULL)",
        &mut Params::new(),
    )?;

    // Rollback discards
    connection
        .start_transaction()
        .context("Failed to begin the first transaction")?;
    for entry in 0..3 {
        connection.execute(
            "INSERT INTO ledger (entry) VALUES (:entry)",
            &mut Params::new().with_named("entry", entry),
        )?;
    }
    ensure!(count(connection)? == 3, "Uncommitted rows are visible inside the transaction");
    connection.rollback().context("Failed to rollback")?;
    ensure!(count(connection)? == 0, "Rolled back rows must be gone");

    // Commit persists
    connection.start_transaction()?;
    connection.execute(
        "INSERT INTO ledger (entry) VALUES (:entry)",
        &mut Params::new().with_named("entry", 10),
    )?;
    connection.commit(false).context("Failed to commit")?;
    ensure!(count(connection)? == 1, "Committed rows must persist");

    // Autocommit sends nothing, every statement is already durable
    connection.execute(
        "INSERT INTO ledger (entry) VALUES (:entry)",
        &mut Params::new().with_named("entry", 20),
    )?;
    connection.commit(true)?;
    ensure!(count(connection)? == 2);
    Ok(())
}
