//! SQL executed against an open connection.
//!
//! All functions take a borrowed [`Connection`] so they can be exercised
//! against in-memory databases; [`super::Database`] wraps them with the
//! open-per-call policy.

use rusqlite::{Connection, Statement, params};

use super::models::{ColumnInfo, QueryRowsResult, Row, SqlValue, TableInfo, TablePage};
use crate::error::DatabaseError;

type Result<T> = std::result::Result<T, DatabaseError>;

/// Smallest page a caller can request.
pub const MIN_PAGE_LIMIT: i64 = 1;
/// Largest page a caller can request.
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Quote an identifier for interpolation into statement text.
///
/// Embedded double quotes are doubled, so any table or column name yields a
/// single well-formed identifier token.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// List user tables (internal `sqlite_` tables excluded), ordered by name.
pub fn list_user_tables(conn: &Connection) -> Result<Vec<TableInfo>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| Ok(TableInfo { name: row.get(0)? }))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tables)
}

/// Column metadata for a table, in declaration order.
pub fn table_columns(conn: &Connection, table_name: &str) -> Result<Vec<ColumnInfo>> {
    let sql = format!("PRAGMA table_info({})", quote_identifier(table_name));
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                cid: row.get(0)?,
                name: row.get(1)?,
                decl_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i64>(5)? != 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}

/// Fetch one page of a table.
///
/// `limit` is clamped to `1..=500` and `offset` to be non-negative. When the
/// offset lies past the last full page it is pulled back to
/// `total_rows - limit`, so an out-of-range request returns the table's tail
/// (offset 999 against 10 rows with limit 4 comes back as offset 6) rather
/// than an empty page at the requested offset.
/// The count is taken before the slice and the two are not read in one
/// transaction.
pub fn get_table_page(
    conn: &Connection,
    table_name: &str,
    limit: i64,
    offset: i64,
) -> Result<TablePage> {
    let safe_limit = limit.clamp(MIN_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let table = quote_identifier(table_name);

    let count_sql = format!("SELECT COUNT(*) FROM {}", table);
    let total_rows: i64 = conn.query_row(&count_sql, [], |row| row.get(0))?;

    let safe_offset = offset.min((total_rows - safe_limit).max(0)).max(0);

    let page_sql = format!("SELECT * FROM {} LIMIT ?1 OFFSET ?2", table);
    let mut stmt = conn.prepare(&page_sql)?;
    let result = collect_rows(&mut stmt, params![safe_limit, safe_offset], 0)?;

    log::debug!(
        "page {} limit={} offset={} total={} fetched={}",
        table_name,
        safe_limit,
        safe_offset,
        total_rows,
        result.rows.len()
    );

    Ok(TablePage {
        total_rows: total_rows as usize,
        offset: safe_offset as usize,
        limit: safe_limit as usize,
        rows: result.rows,
    })
}

/// Run an ad-hoc statement and collect at most `row_cap` rows (0 = no cap).
pub fn query_rows(conn: &Connection, sql: &str, row_cap: usize) -> Result<QueryRowsResult> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::EmptyQuery);
    }

    let mut stmt = conn.prepare(trimmed)?;
    collect_rows(&mut stmt, [], row_cap)
}

fn collect_rows<P: rusqlite::Params>(
    stmt: &mut Statement<'_>,
    params: P,
    row_cap: usize,
) -> Result<QueryRowsResult> {
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows_out = Vec::new();
    let mut truncated = false;
    let mut rows = stmt.query(params)?;

    while let Some(row) = rows.next()? {
        if row_cap > 0 && rows_out.len() >= row_cap {
            truncated = true;
            break;
        }

        let mut record = Row::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            record.insert(name.clone(), SqlValue::from(row.get_ref(i)?));
        }
        rows_out.push(record);
    }

    // Repeated names share one row key, so list them once
    let mut columns: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !columns.contains(&name) {
            columns.push(name);
        }
    }

    Ok(QueryRowsResult {
        columns,
        rows: rows_out,
        truncated,
    })
}
