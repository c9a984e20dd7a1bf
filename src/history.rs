use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::convert::ConversionRequest;
use crate::db;
use crate::format::{format_number, Precision};

/// Number of conversions kept; older ones are dropped on insert.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub category: Category,
    pub value: f64,
    pub source_unit: String,
    pub dest_unit: String,
    pub result: f64,
}

impl HistoryEntry {
    /// `"1 Kilomètre (km) = 1 000 Mètre (m)"`, falling back to unit ids when a
    /// unit has no label.
    pub fn summary(&self) -> String {
        let source = self
            .category
            .label_for(&self.source_unit)
            .unwrap_or(self.source_unit.as_str());
        let dest = self
            .category
            .label_for(&self.dest_unit)
            .unwrap_or(self.dest_unit.as_str());
        format!(
            "{} {} = {} {}",
            format_number(self.value, Precision::Auto),
            source,
            format_number(self.result, Precision::Auto),
            dest
        )
    }
}

fn conversion_error(
    col: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn entry_from_row(row: &Row) -> rusqlite::Result<HistoryEntry> {
    let created_raw: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map_err(|err| conversion_error(1, err))?
        .with_timezone(&Utc);
    let category_raw: String = row.get("category")?;
    let category = Category::from_str(&category_raw).map_err(|err| conversion_error(2, err))?;

    Ok(HistoryEntry {
        id: row.get("id")?,
        created_at,
        category,
        value: row.get("value")?,
        source_unit: row.get("source_unit")?,
        dest_unit: row.get("dest_unit")?,
        result: row.get("result")?,
    })
}

/// Appends a conversion and trims the log to the newest [`HISTORY_LIMIT`]
/// entries, in one transaction.
pub fn add_entry_with_conn(
    conn: &mut Connection,
    request: &ConversionRequest,
    result: f64,
    created_at: DateTime<Utc>,
) -> Result<HistoryEntry> {
    let tx = conn.transaction()?;
    tx.execute(
        r#"
        INSERT INTO conversions (
            created_at, category, value, source_unit, dest_unit, result
        ) VALUES (?, ?, ?, ?, ?, ?)
        "#,
        params![
            created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            request.category.to_string(),
            request.value,
            request.source_unit,
            request.dest_unit,
            result,
        ],
    )?;
    let id = tx.last_insert_rowid();
    let pruned = tx.execute(
        "DELETE FROM conversions WHERE id NOT IN (SELECT id FROM conversions ORDER BY id DESC LIMIT ?)",
        params![HISTORY_LIMIT as i64],
    )?;
    tx.commit()?;
    if pruned > 0 {
        debug!("Pruned {pruned} old history entries");
    }

    Ok(HistoryEntry {
        id,
        created_at,
        category: request.category,
        value: request.value,
        source_unit: request.source_unit.clone(),
        dest_unit: request.dest_unit.clone(),
        result,
    })
}

pub fn add_entry(
    db_path: &Path,
    request: &ConversionRequest,
    result: f64,
) -> Result<HistoryEntry> {
    let mut conn = db::init_db_connection(db_path)?;
    add_entry_with_conn(&mut conn, request, result, Utc::now())
}

/// Newest entries first, at most `limit` of them when given.
pub fn fetch_history(db_path: &Path, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
    let conn = db::init_db_connection(db_path)?;
    // SQLite treats a negative LIMIT as no limit.
    let limit = limit
        .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
        .unwrap_or(-1);
    let mut stmt = conn.prepare("SELECT * FROM conversions ORDER BY id DESC LIMIT ?")?;
    let rows = stmt.query_map(params![limit], entry_from_row)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

pub fn count_entries(db_path: &Path) -> Result<usize> {
    let conn = db::init_db_connection(db_path)?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM conversions", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Removes every entry and returns how many there were.
pub fn clear_history(db_path: &Path) -> Result<usize> {
    let conn = db::init_db_connection(db_path)?;
    let removed = conn.execute("DELETE FROM conversions", [])?;
    Ok(removed)
}
