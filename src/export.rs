// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Delimited-text export.
//!
//! The exporter serializes whatever slice it is handed: the caller decides
//! whether that is the current page or the whole filtered result. It never
//! touches the filesystem; [`export_filename`] only suggests a name.
//!
//! Two formats, one writer:
//!
//! - **CSV**: comma-separated, for spreadsheets and scripts.
//! - **TSV**: tab-separated, what the dashboards download as "Excel" (`.xls`).
//!
//! Rows go through the `csv` writer with minimal quoting: cells containing the
//! delimiter, a double quote, CR or LF are wrapped in double quotes with inner
//! quotes doubled. Everything else is written verbatim. Rows end with `\n`,
//! no trailing newline after the last.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::types::{Record, Value};

/// Date format used for temporal cells unless overridden (`dd/mm/yyyy`).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// One exported column: the field it reads and the header it prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: String,
    pub label: String,
}

impl Column {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }

    /// A column whose header is its field name.
    pub fn bare(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            label: field.clone(),
            field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn delimiter(self) -> char {
        match self {
            ExportFormat::Csv => ',',
            ExportFormat::Tsv => '\t',
        }
    }

    /// File extension; TSV goes out as `.xls` so spreadsheets open it directly.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "xls",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Tsv => "application/vnd.ms-excel",
        }
    }
}

/// Which slice the caller is exporting. Only affects the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportScope {
    #[default]
    CurrentPage,
    All,
}

impl ExportScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportScope::CurrentPage => "pagina",
            ExportScope::All => "todos",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// chrono format string for `Value::Date` cells.
    pub date_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }
}

/// Header row plus one row per record, separated by `delimiter`.
///
/// Missing fields export as empty cells.
pub fn to_delimited<R: Record>(records: &[R], columns: &[Column], delimiter: char) -> String {
    write_rows(records, columns, delimiter, DEFAULT_DATE_FORMAT)
}

/// [`to_delimited`] with the format's delimiter and a chosen date format.
pub fn export<R: Record>(records: &[R], columns: &[Column], options: &ExportOptions) -> String {
    write_rows(
        records,
        columns,
        options.format.delimiter(),
        &options.date_format,
    )
}

/// `<prefix>_<pagina|todos>_<YYYY-MM-DD>.<csv|xls>`
pub fn export_filename(
    prefix: &str,
    scope: ExportScope,
    format: ExportFormat,
    date: NaiveDate,
) -> String {
    format!(
        "{}_{}_{}.{}",
        prefix,
        scope.as_str(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn write_rows<R: Record>(
    records: &[R],
    columns: &[Column],
    delimiter: char,
    date_format: &str,
) -> String {
    let delimiter = if delimiter.is_ascii() {
        delimiter as u8
    } else {
        warn!("delimiter {:?} is not ASCII, writing commas instead", delimiter);
        b','
    };
    let date_format = checked_date_format(date_format);

    match write_csv(records, columns, delimiter, date_format) {
        Ok(mut out) => {
            // Rows are terminated; the export itself is not
            if out.last() == Some(&b'\n') {
                out.pop();
            }
            String::from_utf8(out)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
        Err(e) => {
            error!("delimited export failed: {}", e);
            String::new()
        }
    }
}

fn write_csv<R: Record>(
    records: &[R],
    columns: &[Column],
    delimiter: u8,
    date_format: &str,
) -> csv::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| match record.field(&c.field) {
            Some(value) => cell_text(&value, date_format),
            None => String::new(),
        }))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// The caller's date format, or the default when chrono cannot parse it.
fn checked_date_format(date_format: &str) -> &str {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        warn!(
            "invalid date format {:?}, using {:?}",
            date_format, DEFAULT_DATE_FORMAT
        );
        DEFAULT_DATE_FORMAT
    } else {
        date_format
    }
}

fn cell_text(value: &Value, date_format: &str) -> String {
    match value {
        Value::Date(d) => {
            // Parses but can still fail to render, e.g. `%z` on a naive date
            let mut text = String::new();
            if write!(text, "{}", d.format(date_format)).is_err() {
                text.clear();
                let _ = write!(text, "{}", d.format(DEFAULT_DATE_FORMAT));
            }
            text
        }
        other => other.display().into_owned(),
    }
}
