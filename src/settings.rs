use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::db;
use crate::format::Precision;

const THEME_KEY: &str = "theme";
const PRECISION_KEY: &str = "precision";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Settings {
    pub theme: Theme,
    pub precision: Precision,
}

fn read_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

fn remove_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?", params![key])?;
    Ok(())
}

/// Reads a stored value, falling back to the default when it is missing or
/// does not parse.
fn parse_or_default<T>(conn: &Connection, key: &str) -> Result<T>
where
    T: FromStr + Default,
{
    let Some(raw) = read_setting(conn, key)? else {
        return Ok(T::default());
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => {
            warn!("Ignoring unreadable {key} setting {raw:?}");
            Ok(T::default())
        }
    }
}

pub fn get_theme(db_path: &Path) -> Result<Theme> {
    let conn = db::init_db_connection(db_path)?;
    parse_or_default(&conn, THEME_KEY)
}

pub fn save_theme(db_path: &Path, theme: Theme) -> Result<()> {
    let conn = db::init_db_connection(db_path)?;
    write_setting(&conn, THEME_KEY, &theme.to_string())
}

pub fn get_precision(db_path: &Path) -> Result<Precision> {
    let conn = db::init_db_connection(db_path)?;
    parse_or_default(&conn, PRECISION_KEY)
}

/// Stores a fixed precision; auto is the absence of a stored value.
pub fn save_precision(db_path: &Path, precision: Precision) -> Result<()> {
    let conn = db::init_db_connection(db_path)?;
    match precision {
        Precision::Auto => remove_setting(&conn, PRECISION_KEY),
        Precision::Fixed(_) => write_setting(&conn, PRECISION_KEY, &precision.to_string()),
    }
}

pub fn load_settings(db_path: &Path) -> Result<Settings> {
    let conn = db::init_db_connection(db_path)?;
    Ok(Settings {
        theme: parse_or_default(&conn, THEME_KEY)?,
        precision: parse_or_default(&conn, PRECISION_KEY)?,
    })
}
