use crate::db::connection::Database;
use crate::domain::SourceRow;
use crate::errors::{EnrichError, Result};
use rusqlite::{params, Connection};

/// Where the source listings live and which columns hold the inputs.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub table: String,
    pub address_column: String,
    pub link_column: String,
}

impl Default for SourceTable {
    fn default() -> Self {
        Self {
            table: "listings".to_string(),
            address_column: "Address".to_string(),
            link_column: "Details Link".to_string(),
        }
    }
}

/// SQLite identifier quoting, so column names like "Details Link" work.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut columns = Vec::new();
    for r in rows {
        columns.push(r?);
    }
    Ok(columns)
}

/// Fails with a schema violation unless the table and both input columns exist.
pub fn validate_source(conn: &Connection, source: &SourceTable) -> Result<()> {
    let columns = table_columns(conn, &source.table)?;
    if columns.is_empty() {
        return Err(EnrichError::Schema(format!(
            "source table '{}' not found",
            source.table
        )));
    }

    for required in [&source.address_column, &source.link_column] {
        if !columns.iter().any(|c| c == required) {
            return Err(EnrichError::Schema(format!(
                "column '{}' not found in '{}'; available columns: {}",
                required,
                source.table,
                columns.join(", ")
            )));
        }
    }
    Ok(())
}

/// Loads source rows in rowid order, validating the schema first.
pub fn load_source_rows(
    db: &Database,
    source: &SourceTable,
    limit: Option<usize>,
) -> Result<Vec<SourceRow>> {
    db.with_conn(|conn| {
        validate_source(conn, source)?;

        let sql = format!(
            "SELECT rowid, {}, {} FROM {} ORDER BY rowid LIMIT ?1",
            quote_ident(&source.address_column),
            quote_ident(&source.link_column),
            quote_ident(&source.table),
        );
        // SQLite treats a negative LIMIT as unbounded.
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(SourceRow::new(
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::temp_db;

    fn seed(db: &Database, sql: &str) {
        db.with_conn(|conn| {
            conn.execute_batch(sql)?;
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn loads_rows_with_quoted_columns() {
        let (_dir, db) = temp_db();
        seed(
            &db,
            r#"
            CREATE TABLE listings ("Address" TEXT, "Details Link" TEXT, "Price" INTEGER);
            INSERT INTO listings VALUES ('1 Main St, Palo Alto, CA', 'https://example.com/1', 100);
            INSERT INTO listings VALUES ('2 Oak Ave, Fremont, CA', NULL, 200);
            INSERT INTO listings VALUES (NULL, '  ', 300);
            "#,
        );

        let rows = load_source_rows(&db, &SourceTable::default(), None).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].address, "1 Main St, Palo Alto, CA");
        assert_eq!(rows[0].details_link.as_deref(), Some("https://example.com/1"));
        assert_eq!(rows[1].details_link, None);
        assert_eq!(rows[2].address, "");
        assert_eq!(rows[2].details_link, None);
    }

    #[test]
    fn limit_takes_first_rows() {
        let (_dir, db) = temp_db();
        seed(
            &db,
            r#"
            CREATE TABLE listings ("Address" TEXT, "Details Link" TEXT);
            INSERT INTO listings VALUES ('a', NULL), ('b', NULL), ('c', NULL);
            "#,
        );

        let rows = load_source_rows(&db, &SourceTable::default(), Some(2)).unwrap();
        let addresses: Vec<_> = rows.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, ["a", "b"]);
    }

    #[test]
    fn missing_column_is_schema_violation() {
        let (_dir, db) = temp_db();
        seed(&db, r#"CREATE TABLE listings ("Address" TEXT, "Url" TEXT);"#);

        let err = load_source_rows(&db, &SourceTable::default(), None).unwrap_err();
        match err {
            EnrichError::Schema(msg) => {
                assert!(msg.contains("Details Link"));
                assert!(msg.contains("Url"));
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn missing_table_is_schema_violation() {
        let (_dir, db) = temp_db();
        let err = load_source_rows(&db, &SourceTable::default(), None).unwrap_err();
        assert!(matches!(err, EnrichError::Schema(_)));
    }
}
