//! CSV ingest and missing-value normalization.
//!
//! This module turns a delimited text file with a header row into a `Dataset`
//! of typed cells. It does not validate anything beyond "can this be read":
//!
//! - every missing-value spelling collapses to one `Value::Null`
//! - numeric-looking cells become `Int` or `Float`, everything else `Text`
//! - a missing file is reported distinctly from any later validation failure

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Dataset, DatasetKind, Value};
use crate::error::AppError;

/// Cell spellings treated as missing, in addition to the empty string.
const NA_TOKENS: [&str; 12] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Open and load the dataset for `kind` at `path`.
pub fn load_dataset(path: &Path, kind: DatasetKind) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::input(format!(
            "CRITICAL: '{}' not found. {}",
            path.display(),
            kind.missing_hint()
        )),
        _ => AppError::input(format!("Failed to open CSV '{}': {e}", path.display())),
    })?;

    let dataset = read_dataset(file)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse CSV from any reader.
pub fn read_dataset<R: Read>(input: R) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?;
    let columns = normalize_headers(headers);
    let width = columns.len();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::input(format!("CSV parse error at line {}: {e}", idx + 2))
        })?;
        // Trailing empty cells past the header are tolerated; data there is not.
        if record.iter().skip(width).any(|cell| !cell.is_empty()) {
            return Err(AppError::input(format!(
                "CSV parse error at line {}: expected {width} fields, saw {}",
                idx + 2,
                record.len()
            )));
        }
        rows.push(record.iter().take(width).map(parse_cell).collect());
    }

    Ok(Dataset::new(columns, rows))
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM;
    // left in place it would hide that column from every schema lookup.
    headers
        .iter()
        .map(|name| name.trim().trim_start_matches('\u{feff}').to_string())
        .collect()
}

/// Type a single trimmed cell.
pub fn parse_cell(s: &str) -> Value {
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return Value::Null;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Value::Int(v);
    }
    if let Ok(v) = s.parse::<f64>() {
        return Value::from(v);
    }
    Value::Text(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cells_are_typed() {
        assert_eq!(parse_cell("44"), Value::Int(44));
        assert_eq!(parse_cell("0.93"), Value::Float(0.93));
        assert_eq!(parse_cell("1e3"), Value::Float(1000.0));
        assert_eq!(parse_cell("RENT"), Value::from("RENT"));
    }

    #[test]
    fn missing_spellings_collapse_to_null() {
        assert!(parse_cell("").is_null());
        for token in NA_TOKENS {
            assert!(parse_cell(token).is_null(), "{token:?} should be null");
        }
    }

    #[test]
    fn reads_header_rows_and_short_lines() {
        let csv = "\u{feff}date, EUR ,GBP\n2023-01-02,0.93,0.82\n2023-01-03,0.94\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.columns(), ["date", "EUR", "GBP"]);
        assert_eq!(ds.len(), 2);
        let row = ds.row(1).unwrap();
        assert_eq!(row.get("EUR"), &Value::Float(0.94));
        assert!(row.get("GBP").is_null());
    }

    #[test]
    fn data_past_the_header_width_is_rejected() {
        let csv = "date,EUR,GBP\n2023-01-02,0.93,0.82\n2023-01-03,0.92,0.85,9.99,oops\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(
            err.to_string(),
            "CSV parse error at line 3: expected 3 fields, saw 5"
        );
    }

    #[test]
    fn trailing_empty_cells_are_dropped() {
        let csv = "date,EUR,GBP\n2023-01-02,0.93,0.82,,\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.row(0).unwrap().get("GBP"), &Value::Float(0.82));
    }

    #[test]
    fn absent_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fx_rates.csv");
        let err = load_dataset(&path, DatasetKind::Fx).unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().starts_with("CRITICAL:"));
        assert!(err.to_string().contains("fx_rates.csv"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country_name,year,gdp_current_usd").unwrap();
        writeln!(file, "Egypt,2015,").unwrap();
        let ds = load_dataset(file.path(), DatasetKind::Economic).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.row(0).unwrap().get("year"), &Value::Int(2015));
    }
}
