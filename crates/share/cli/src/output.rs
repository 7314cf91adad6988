//! Output formatting utilities

use colored::*;
use serde::{Deserialize, Serialize};
use share_engine::{Category, Participant, ShareSession};
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed table format
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Table
    }
}

/// Money for display: truncated toward zero, `,` every three digits.
///
/// Stored amounts keep their full precision; this is display only.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let whole = value.trunc() as i128;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Table row for participant display
#[derive(Debug, Serialize, Tabled)]
struct ParticipantRow {
    #[tabled(rename = "No")]
    row: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Score")]
    score: u32,
    #[tabled(rename = "Estimate")]
    estimate: String,
}

impl ParticipantRow {
    fn new(index: usize, p: &Participant) -> Self {
        Self {
            row: index + 1,
            name: p.name.clone(),
            status: category_label(p.category),
            score: p.score,
            estimate: format_amount(p.estimate),
        }
    }
}

fn category_label(category: Category) -> String {
    match category {
        Category::Allocated => category.as_str().green().to_string(),
        Category::Reserved => category.as_str().yellow().to_string(),
        Category::Manual => category.as_str().cyan().to_string(),
    }
}

/// Serializable view of the whole snapshot
#[derive(Debug, Serialize)]
struct SnapshotView<'a> {
    total_pool: f64,
    remainder: f64,
    reserved_pool: f64,
    manual_pool: f64,
    participants: &'a [Participant],
}

/// Print pool header and roster in the specified format
pub fn print_snapshot(session: &ShareSession, format: OutputFormat) -> CliResult<()> {
    let pool = session.pool();
    match format {
        OutputFormat::Table => {
            println!("{} {}", "Total:".bold(), format_amount(pool.total()));
            println!(
                "Allocated: {}   Reserved: {}   Manual: {}",
                format_amount(pool.remainder()),
                format_amount(pool.reserved()),
                format_amount(pool.manual())
            );
            if session.participants().is_empty() {
                println!("{}", "No participants".dimmed());
            } else {
                let rows: Vec<ParticipantRow> = session
                    .participants()
                    .iter()
                    .enumerate()
                    .map(|(i, p)| ParticipantRow::new(i, p))
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let view = SnapshotView {
                total_pool: pool.total(),
                remainder: pool.remainder(),
                reserved_pool: pool.reserved(),
                manual_pool: pool.manual(),
                participants: session.participants(),
            };
            print_single(&view, format)?;
        }
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(data)?);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
