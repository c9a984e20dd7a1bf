use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use log::{error, warn};
use strum::IntoEnumIterator;

use crate::calculator::{calculate, record, resolve_db_path};
use crate::category::{Category, CategoryKind};
use crate::format::{format_number, Precision};
use crate::history::{self, HistoryEntry};
use crate::settings::{self, Theme};

#[derive(Parser)]
#[command(name = "unit-converter", version)]
#[command(about = "Unit conversion calculator for length, weight, volume and temperature")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a value between two units of one category
    Convert {
        /// Value to convert ('.' as decimal point, trailing text is ignored)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Category: length, weight, volume or temperature (French names accepted)
        #[arg(long, short = 'c', default_value = "length")]
        category: Category,
        /// Source unit id (defaults to the category's first unit)
        #[arg(long = "from")]
        from: Option<String>,
        /// Destination unit id (defaults to the category's second unit)
        #[arg(long = "to")]
        to: Option<String>,
        /// Decimal places or `auto` (defaults to the saved setting)
        #[arg(long, short = 'p')]
        precision: Option<Precision>,
        /// Exchange source and destination units before converting
        #[arg(long)]
        swap: bool,
        /// Do not record the conversion in the history
        #[arg(long = "no-history")]
        no_history: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// Path to SQLite database (or set UNIT_CONVERTER_DB)
        #[arg(long = "db")]
        db_path: Option<PathBuf>,
        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the units of one or every category
    Units {
        /// Only list this category
        #[arg(long, short = 'c')]
        category: Option<Category>,
        /// Path to SQLite database holding the theme (or set UNIT_CONVERTER_DB)
        #[arg(long = "db")]
        db_path: Option<PathBuf>,
    },
    /// Show recent conversions (or clear them)
    History {
        /// Number of conversions to show
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
        /// Delete every recorded conversion
        #[arg(long)]
        clear: bool,
        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
        /// Path to SQLite database (or set UNIT_CONVERTER_DB)
        #[arg(long = "db")]
        db_path: Option<PathBuf>,
        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show or change the saved theme and precision
    Settings {
        /// Set the theme
        #[arg(long, conflicts_with = "toggle_theme")]
        theme: Option<Theme>,
        /// Switch between light and dark
        #[arg(long = "toggle-theme")]
        toggle_theme: bool,
        /// Set the default precision: decimal places or `auto`
        #[arg(long, short = 'p')]
        precision: Option<Precision>,
        /// Print the settings as JSON
        #[arg(long)]
        json: bool,
        /// Path to SQLite database (or set UNIT_CONVERTER_DB)
        #[arg(long = "db")]
        db_path: Option<PathBuf>,
        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn configure_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    let _ = builder.try_init();
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    match cli.command {
        Commands::Convert {
            value,
            category,
            from,
            to,
            precision,
            swap,
            no_history,
            json,
            db_path,
            verbose,
        } => {
            configure_logging(verbose);
            let resolved = resolve_db_path(db_path.as_deref());
            let (default_from, default_to) = category.default_units();
            let mut source = from.unwrap_or_else(|| default_from.to_string());
            let mut dest = to.unwrap_or_else(|| default_to.to_string());
            if swap {
                std::mem::swap(&mut source, &mut dest);
            }
            let precision = match precision {
                Some(precision) => precision,
                None => settings::get_precision(&resolved).unwrap_or_else(|err| {
                    warn!("Could not read saved precision, using auto: {err:#}");
                    Precision::Auto
                }),
            };

            let outcome = calculate(Some(&value), category, &source, &dest, precision);
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.display());
            }
            if !no_history {
                if let Err(err) = record(&resolved, &outcome) {
                    error!("Could not record conversion in history: {err:#}");
                }
            }
            if outcome.is_error() {
                std::process::exit(1);
            }
        }
        Commands::Units { category, db_path } => {
            configure_logging(false);
            let resolved = resolve_db_path(db_path.as_deref());
            let theme = settings::get_theme(&resolved).unwrap_or_else(|err| {
                warn!("Could not read saved theme, using default: {err:#}");
                Theme::default()
            });
            let categories: Vec<Category> = match category {
                Some(category) => vec![category],
                None => Category::iter().collect(),
            };
            for category in categories {
                println!(
                    "\n{} ({category}, base: {})\n{}",
                    category.name(),
                    category.base_unit(),
                    units_table(category, theme)
                );
            }
        }
        Commands::History {
            limit,
            clear,
            json,
            db_path,
            verbose,
        } => {
            configure_logging(verbose);
            let resolved = resolve_db_path(db_path.as_deref());
            if clear {
                let removed = history::clear_history(&resolved)?;
                println!("Historique effacé ({removed} conversions)");
                return Ok(());
            }

            let entries = history::fetch_history(&resolved, Some(limit as usize))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("Aucune conversion dans l'historique");
            } else {
                let theme = settings::get_theme(&resolved)?;
                println!("{}", history_table(&entries, theme));
            }
        }
        Commands::Settings {
            theme,
            toggle_theme,
            precision,
            json,
            db_path,
            verbose,
        } => {
            configure_logging(verbose);
            let resolved = resolve_db_path(db_path.as_deref());
            if let Some(theme) = theme {
                settings::save_theme(&resolved, theme)?;
            } else if toggle_theme {
                let current = settings::get_theme(&resolved)?;
                settings::save_theme(&resolved, current.toggled())?;
            }
            if let Some(precision) = precision {
                settings::save_precision(&resolved, precision)?;
            }

            let current = settings::load_settings(&resolved)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&current)?);
            } else {
                let mut table = themed_table();
                table.set_header(header_cells(&["Field", "Value"], current.theme));
                table.add_row(vec![label_cell("Theme"), value_cell(current.theme)]);
                table.add_row(vec![
                    label_cell("Precision"),
                    value_cell(current.precision),
                ]);
                table.add_row(vec![
                    label_cell("Database"),
                    Cell::new(resolved.display().to_string()),
                ]);
                println!("{table}");
            }
        }
    }
    Ok(())
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}

fn themed_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(labels: &[&str], theme: Theme) -> Vec<Cell> {
    let color = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    labels
        .iter()
        .map(|label| Cell::new(*label).add_attribute(Attribute::Bold).fg(color))
        .collect()
}

fn label_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn value_cell<T: std::fmt::Display>(value: T) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn units_table(category: Category, theme: Theme) -> Table {
    let mut table = themed_table();
    table.set_header(header_cells(&["Unit", "Label", "Factor"], theme));
    for info in category.units() {
        let factor = match category.kind() {
            CategoryKind::Linear(units) => units
                .factor(info.id)
                .map(|factor| format_number(factor, Precision::Fixed(7)))
                .unwrap_or_else(|| "--".to_string()),
            CategoryKind::Temperature => "--".to_string(),
        };
        let id_cell = if info.id == category.base_unit() {
            label_cell(info.id).fg(Color::Green)
        } else {
            label_cell(info.id)
        };
        table.add_row(vec![id_cell, Cell::new(info.label), value_cell(factor)]);
    }
    table
}

fn history_table(entries: &[HistoryEntry], theme: Theme) -> Table {
    let mut table = themed_table();
    table.set_header(header_cells(&["When", "Category", "Conversion"], theme));
    for entry in entries {
        table.add_row(vec![
            Cell::new(format_timestamp(entry.created_at)).fg(Color::Magenta),
            Cell::new(entry.category.name()),
            Cell::new(entry.summary()),
        ]);
    }
    table
}
