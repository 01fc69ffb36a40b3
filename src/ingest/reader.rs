use super::{ColumnConfig, MissingColumn};
use crate::record::OfficialRecord;
use crate::scoring::ScoringModel;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Extensions read as spreadsheets; anything else is read as CSV
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Records read from a source plus any non-fatal problems found on the way.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<OfficialRecord>,
    pub warnings: Vec<String>,
}

/// Read official records from a data file.
///
/// Spreadsheets (`.xlsx` and friends) are read from their first worksheet;
/// every other file is read as CSV. Both go through the same column rules.
pub fn read_records(path: &Path, columns: &ColumnConfig, model: &ScoringModel) -> Result<IngestReport> {
    if is_workbook(path) {
        return read_workbook(path, columns, model)
            .with_context(|| format!("Failed to read records from {}", path.display()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open data file at {}", path.display()))?;

    read_records_from(file, columns, model)
        .with_context(|| format!("Failed to read records from {}", path.display()))
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Read official records from any CSV source.
///
/// The identifier column is required. Every other column is optional: empty
/// cells become absent values, and cells that do not hold a finite number are
/// treated as absent and reported in the warnings.
pub fn read_records_from<R: Read>(
    source: R,
    columns: &ColumnConfig,
    model: &ScoringModel,
) -> Result<IngestReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut report = IngestReport::default();
    let layout = Layout::from_headers(&headers, columns, model, &mut report.warnings)?;

    for (idx, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = idx + 2;
        match result {
            Ok(row) => {
                let cells: Vec<&str> = row.iter().collect();
                layout.read_row(line, &cells, &mut report);
            }
            Err(e) => report.warnings.push(format!("Row {}: {}", line, e)),
        }
    }

    debug!(
        records = report.records.len(),
        warnings = report.warnings.len(),
        indicator_columns = layout.indicators.len(),
        "read records"
    );

    Ok(report)
}

/// Read official records from the first worksheet of a spreadsheet.
///
/// The first row holds the headers. Blank rows are skipped silently.
pub fn read_workbook(path: &Path, columns: &ColumnConfig, model: &ScoringModel) -> Result<IngestReport> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook at {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook has no worksheets")?
        .context("Failed to read first worksheet")?;

    // Row numbers as shown in the spreadsheet
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();

    let mut report = IngestReport::default();
    let layout = Layout::from_headers(&headers, columns, model, &mut report.warnings)?;

    for (idx, row) in rows.enumerate() {
        let line = first_line + idx + 1;
        let texts: Vec<String> = row.iter().map(cell_text).collect();
        if texts.iter().all(|t| t.is_empty()) {
            continue;
        }
        let cells: Vec<&str> = texts.iter().map(String::as_str).collect();
        layout.read_row(line, &cells, &mut report);
    }

    debug!(
        records = report.records.len(),
        warnings = report.warnings.len(),
        indicator_columns = layout.indicators.len(),
        "read workbook"
    );

    Ok(report)
}

/// Cell content as the text a CSV export would hold. Whole numbers drop the
/// fraction so numeric identifiers read as "101", not "101.0".
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Where each known column sits in the header row.
struct Layout<'a> {
    columns: &'a ColumnConfig,
    id: usize,
    name: Option<usize>,
    role: Option<usize>,
    income: Option<usize>,
    net_worth: Option<usize>,
    indicators: Vec<(&'a str, usize)>,
}

impl<'a> Layout<'a> {
    fn from_headers(
        headers: &[String],
        columns: &'a ColumnConfig,
        model: &'a ScoringModel,
        warnings: &mut Vec<String>,
    ) -> Result<Self, MissingColumn> {
        let headers: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let position = |name: &str| headers.iter().position(|h| *h == name);

        let id = position(&columns.id).ok_or_else(|| MissingColumn {
            column: columns.id.clone(),
        })?;

        let patrimonial = model.patrimonial_indicator();
        if position(patrimonial).is_some() {
            warnings.push(format!(
                "Column '{}' is derived from {} and {}; input values are ignored",
                patrimonial, columns.income, columns.net_worth
            ));
        }

        let indicators = model
            .indicators()
            .iter()
            .filter(|i| i.name != patrimonial)
            .filter_map(|i| position(&i.name).map(|idx| (i.name.as_str(), idx)))
            .collect();

        Ok(Self {
            columns,
            id,
            name: position(&columns.name),
            role: position(&columns.role),
            income: position(&columns.income),
            net_worth: position(&columns.net_worth),
            indicators,
        })
    }

    /// Turn one data row into a record, or skip it with a warning when it has
    /// no identifier.
    fn read_row(&self, line: usize, cells: &[&str], report: &mut IngestReport) {
        let cell = |i: Option<usize>| i.and_then(|i| cells.get(i)).map(|c| c.trim());

        let id = cell(Some(self.id)).unwrap_or("");
        if id.is_empty() {
            report
                .warnings
                .push(format!("Row {}: empty '{}', row skipped", line, self.columns.id));
            return;
        }

        let mut record = OfficialRecord::new(id).with_name(
            cell(self.name).unwrap_or(""),
            cell(self.role).unwrap_or(""),
        );

        let warnings = &mut report.warnings;
        record.income = parse_cell(cell(self.income), &self.columns.income, line, warnings);
        record.net_worth = parse_cell(cell(self.net_worth), &self.columns.net_worth, line, warnings);
        for &(name, i) in &self.indicators {
            if let Some(value) = parse_cell(cell(Some(i)), name, line, warnings) {
                record.set_indicator(name, value);
            }
        }

        report.records.push(record);
    }
}

fn parse_cell(cell: Option<&str>, column: &str, line: usize, warnings: &mut Vec<String>) -> Option<f64> {
    let raw = cell?;
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warnings.push(format!(
                "Row {}: '{}' is not a number in column '{}', treated as missing",
                line, raw, column
            ));
            None
        }
    }
}
