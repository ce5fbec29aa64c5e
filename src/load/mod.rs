// src/load/mod.rs
use postgres::types::ToSql;
use postgres::Client;
use tracing::{debug, info};

use crate::error::EtlError;
use crate::normalize::Transaction;

/// Destination table. Must exist before a run; this crate never creates it.
pub const TABLE: &str = "transactions";

/// Rows per bulk insert; each chunk commits independently.
pub const CHUNK_SIZE: usize = 5000;

const COLUMNS: &str = "invoice_no, stock_code, description, quantity, \
                       invoice_date, unit_price, customer_id, country";

/// Replace the contents of the destination table with `rows`.
///
/// The truncate commits as its own unit of work, then each chunk of
/// [`CHUNK_SIZE`] rows commits as its own unit of work, with a progress
/// line on stdout after each. A failing chunk halts the run and leaves the
/// chunks committed before it in place; the next successful run starts
/// from a fresh truncate.
pub fn refresh_table(client: &mut Client, rows: &[Transaction]) -> Result<(), EtlError> {
    client
        .execute(format!("TRUNCATE TABLE {}", TABLE).as_str(), &[])
        .map_err(|source| EtlError::Truncate {
            table: TABLE.to_string(),
            source,
        })?;
    info!(table = TABLE, "truncated destination table");

    for ((start, end), chunk) in chunk_bounds(rows.len()).zip(rows.chunks(CHUNK_SIZE)) {
        let stmt = insert_statement(chunk.len());
        let params = chunk_params(chunk);
        client
            .execute(stmt.as_str(), &params)
            .map_err(|source| EtlError::Insert { start, end, source })?;
        debug!(start, rows = chunk.len(), "chunk committed");
        println!("Inserted rows {} to {}", start, end);
    }
    Ok(())
}

/// Chunk boundaries as reported in progress output. The end index is always
/// `start + CHUNK_SIZE`, even when the final chunk is short: the reported
/// range is the historical output format, not an exact row count.
fn chunk_bounds(total: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..total)
        .step_by(CHUNK_SIZE)
        .map(|start| (start, start + CHUNK_SIZE))
}

/// Multi-row INSERT with 8 positional parameters per row.
fn insert_statement(rows: usize) -> String {
    let mut sql = format!("INSERT INTO {} ({}) VALUES ", TABLE, COLUMNS);
    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for col in 0..8 {
            if col > 0 {
                sql.push_str(", ");
            }
            sql.push('$');
            sql.push_str(&(row * 8 + col + 1).to_string());
        }
        sql.push(')');
    }
    sql
}

fn chunk_params(chunk: &[Transaction]) -> Vec<&(dyn ToSql + Sync)> {
    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(chunk.len() * 8);
    for t in chunk {
        params.push(&t.invoice_no);
        params.push(&t.stock_code);
        params.push(&t.description);
        params.push(&t.quantity);
        params.push(&t.invoice_date);
        params.push(&t.unit_price);
        params.push(&t.customer_id);
        params.push(&t.country);
    }
    params
}
