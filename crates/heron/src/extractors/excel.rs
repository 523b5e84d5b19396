//! Spreadsheet extractor using calamine.
//!
//! Every sheet is rendered as `Sheet: <name>` followed by a fixed-width table dump: the
//! first row is the header, later rows are prefixed with a zero-based row index, and
//! each column is right-aligned to a common width. Sheets are separated by a blank line.

use crate::core::batch_mode::run_parser;
use crate::core::mime::{EXCEL_BINARY_MIME_TYPE, EXCEL_MIME_TYPE};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;
use calamine::{Data, Range, Reader};
use std::fmt::Write as FmtWrite;
use std::io::Cursor;

const MISSING_CELL: &str = "NaN";

pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExcelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
    }
}

/// Render every sheet of an `.xlsx` or `.xls` workbook.
pub fn read_workbook_text(content: &[u8], mime_type: &str) -> Result<String> {
    let cursor = Cursor::new(content);

    match mime_type {
        EXCEL_BINARY_MIME_TYPE => {
            let workbook = calamine::Xls::new(cursor)
                .map_err(|e| HeronError::extraction_with_source(format!("Failed to parse XLS: {}", e), e))?;
            process_workbook(workbook)
        }
        _ => {
            let workbook = calamine::Xlsx::new(cursor)
                .map_err(|e| HeronError::extraction_with_source(format!("Failed to parse XLSX: {}", e), e))?;
            process_workbook(workbook)
        }
    }
}

fn process_workbook<RS, R>(mut workbook: R) -> Result<String>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();
    let mut blocks = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| HeronError::extraction(format!("Failed to read sheet '{}': {}", name, e)))?;
        blocks.push(format!("Sheet: {}\n{}", name, render_sheet(&range)));
    }

    Ok(blocks.join("\n\n"))
}

fn render_sheet(range: &Range<Data>) -> String {
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(format_cell_value).collect())
        .collect();

    render_table(&rows)
}

/// Fixed-width dump of a header row plus indexed data rows.
///
/// Header cells left blank become `Unnamed: <column>`; missing data cells render as `NaN`.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return String::new();
    };

    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);

    let header: Vec<String> = (0..column_count)
        .map(|col| match header_row.get(col) {
            Some(cell) if !cell.is_empty() => cell.clone(),
            _ => format!("Unnamed: {}", col),
        })
        .collect();

    let cell = |row: &Vec<String>, col: usize| -> String {
        match row.get(col) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => MISSING_CELL.to_string(),
        }
    };

    let widths: Vec<usize> = (0..column_count)
        .map(|col| {
            let data_width = data_rows
                .iter()
                .map(|row| cell(row, col).chars().count() + 1)
                .max()
                .unwrap_or(0);
            header[col].chars().count().max(data_width)
        })
        .collect();

    let index_width = data_rows.len().saturating_sub(1).to_string().len();
    let index_width = if data_rows.is_empty() { 0 } else { index_width };

    let mut output = String::new();

    let _ = write!(output, "{:index_width$}", "");
    for (col, name) in header.iter().enumerate() {
        let _ = write!(output, " {:>width$}", name, width = widths[col]);
    }

    for (index, row) in data_rows.iter().enumerate() {
        output.push('\n');
        let _ = write!(output, "{:<index_width$}", index);
        for (col, width) in widths.iter().enumerate() {
            let _ = write!(output, " {:>width$}", cell(row, col), width = *width);
        }
    }

    output
}

fn format_cell_value(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format!("{:?}", dt),
        },
        Data::Error(e) => format!("#ERR: {:?}", e),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

#[async_trait]
impl DocumentExtractor for ExcelExtractor {
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let mime_owned = mime_type.to_string();
        let text = run_parser("Spreadsheet extraction", content, move |bytes| {
            read_workbook_text(bytes, &mime_owned)
        })
        .await?;

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[EXCEL_MIME_TYPE, EXCEL_BINARY_MIME_TYPE]
    }
}
