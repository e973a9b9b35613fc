use crate::errors::Result;
use rusqlite::{params, Connection};

#[derive(Debug)]
pub struct EnrichmentRun {
    pub id: i64,
    pub source_table: String,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub records_processed: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

pub fn start_enrichment_run(conn: &Connection, source_table: &str, now: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO enrichment_runs (source_table, started_at, success) VALUES (?, ?, 0)",
        params![source_table, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn end_enrichment_run(
    conn: &Connection,
    run_id: i64,
    now: i64,
    records: usize,
    success: bool,
    error: Option<String>,
) -> Result<()> {
    conn.execute(
        "UPDATE enrichment_runs SET finished_at = ?, records_processed = ?, success = ?, error_message = ? WHERE id = ?",
        params![now, records as i64, success, error, run_id],
    )?;
    Ok(())
}

pub fn get_recent_runs(conn: &Connection) -> Result<Vec<EnrichmentRun>> {
    let mut stmt = conn.prepare(
        "SELECT id, source_table, started_at, finished_at, records_processed, success, error_message FROM enrichment_runs ORDER BY started_at DESC, id DESC LIMIT 50",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(EnrichmentRun {
            id: row.get(0)?,
            source_table: row.get(1)?,
            started_at: row.get(2)?,
            finished_at: row.get(3)?,
            records_processed: row.get(4)?,
            success: row.get(5)?,
            error_message: row.get(6)?,
        })
    })?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r?);
    }
    Ok(runs)
}
