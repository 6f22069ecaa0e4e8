mod calc;
mod config_cmd;
mod known;
mod mix;

pub use calc::CalcCommand;
pub use config_cmd::ConfigCommand;
pub use known::KnownCommand;
pub use mix::MixCommand;

use abvcalc_core::CalcError;
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Converts a 1-based row number typed by a person into an index.
fn row_index(row: usize) -> Result<usize, String> {
    row.checked_sub(1)
        .ok_or_else(|| "Row numbers start at 1".to_string())
}

/// Reports a bad index as the row number the person typed.
fn row_error(err: CalcError) -> Box<dyn std::error::Error> {
    match err {
        CalcError::IndexOutOfRange { index, len } => {
            format!("No row {} ({} row(s))", index + 1, len).into()
        }
        other => other.into(),
    }
}
