pub mod calculator;
pub mod category;
pub mod cli;
pub mod convert;
pub mod db;
pub mod format;
pub mod history;
pub mod input;
pub mod settings;
pub mod units;

pub use calculator::{calculate, default_db_path, record, resolve_db_path, Outcome};
pub use category::{Category, CategoryKind, UnitInfo};
pub use convert::{convert, convert_linear, convert_temperature, ConversionError, ConversionRequest};
pub use format::{format_number, Precision, PrecisionError};
pub use history::{HistoryEntry, HISTORY_LIMIT};
pub use input::{validate_value, InputError};
pub use settings::{Settings, Theme};
pub use units::{UnitTable, LENGTH_UNITS, VOLUME_UNITS, WEIGHT_UNITS};
