use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, error};
use serde::Serialize;

use crate::category::Category;
use crate::convert::{convert, ConversionRequest};
use crate::format::{format_number, Precision};
use crate::history::{self, HistoryEntry};
use crate::input::validate_value;

/// Shown when a conversion cannot be carried out.
pub const CONVERSION_FAILED_DISPLAY: &str = "Erreur de conversion";

pub fn default_db_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".local")
        .join("share")
        .join("unit-converter")
        .join("history.db")
}

pub fn resolve_db_path(db_path: Option<&Path>) -> PathBuf {
    if let Some(path) = db_path {
        return path.to_path_buf();
    }
    if let Ok(env_path) = std::env::var("UNIT_CONVERTER_DB") {
        if let Some(stripped) = env_path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        return PathBuf::from(env_path);
    }
    default_db_path()
}

/// Result of running raw input through validation, conversion and formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing to convert yet.
    Empty,
    Invalid {
        message: String,
    },
    Failed {
        message: String,
    },
    Converted {
        request: ConversionRequest,
        result: f64,
        display: String,
    },
}

impl Outcome {
    /// Text for the result field.
    pub fn display(&self) -> &str {
        match self {
            Outcome::Empty => "",
            Outcome::Invalid { message } | Outcome::Failed { message } => message.as_str(),
            Outcome::Converted { display, .. } => display.as_str(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Invalid { .. } | Outcome::Failed { .. })
    }
}

pub fn calculate(
    raw: Option<&str>,
    category: Category,
    source_unit: &str,
    dest_unit: &str,
    precision: Precision,
) -> Outcome {
    let value = match validate_value(raw) {
        Ok(Some(value)) => value,
        Ok(None) => return Outcome::Empty,
        Err(err) => {
            return Outcome::Invalid {
                message: err.to_string(),
            }
        }
    };

    let request = ConversionRequest::new(value, category, source_unit, dest_unit);
    match convert(&request) {
        Ok(result) => {
            let display = format_number(result, precision);
            debug!("{value} {source_unit} -> {result} {dest_unit} ({category})");
            Outcome::Converted {
                request,
                result,
                display,
            }
        }
        Err(err) => {
            error!("Conversion error ({category}): {err}");
            Outcome::Failed {
                message: CONVERSION_FAILED_DISPLAY.to_string(),
            }
        }
    }
}

/// Stores a successful conversion in the history. Zero values are not worth
/// remembering and are skipped, as are failures.
pub fn record(db_path: &Path, outcome: &Outcome) -> Result<Option<HistoryEntry>> {
    match outcome {
        Outcome::Converted {
            request, result, ..
        } if request.value != 0.0 => {
            let entry = history::add_entry(db_path, request, *result)?;
            debug!("Recorded conversion #{}: {}", entry.id, entry.summary());
            Ok(Some(entry))
        }
        _ => Ok(None),
    }
}
