use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::dataset::{Dataset, Value};

/// Longest text accepted for analysis; anything beyond is truncated.
pub const MAX_WORDS: usize = 1000;

/// Validates discussion text: rejects empty input, truncates overly long
/// input to [`MAX_WORDS`] words with a warning rather than failing.
pub fn validate_text(text: &str) -> Result<String> {
    if text.trim().is_empty() {
        bail!("discussion text is empty");
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_WORDS {
        warn!(
            "Text is long ({} words) - truncating to {} words for analysis",
            words.len(),
            MAX_WORDS
        );
        return Ok(words[..MAX_WORDS].join(" "));
    }
    Ok(text.to_string())
}

/// Validates a query: must be non-empty after trimming.
pub fn validate_query(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        bail!("query is empty");
    }
    Ok(trimmed.to_string())
}

/// Loads a CSV file into a [`Dataset`]. Cells that parse as f64 become
/// numbers, everything else stays text. At least two columns and one row
/// are required.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open CSV at {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read CSV headers from {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if columns.len() < 2 {
        bail!("CSV needs at least 2 columns, found {}", columns.len());
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read CSV row {}", i + 1))?;
        let row = record.iter().map(parse_cell).collect();
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("CSV has no data rows");
    }

    Ok(Dataset::new(columns, rows))
}

fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    match trimmed.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_is_rejected() {
        assert!(validate_text("").is_err());
        assert!(validate_text("   \n\t").is_err());
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(validate_text("a few words").unwrap(), "a few words");
    }

    #[test]
    fn long_text_is_truncated() {
        let text = "word ".repeat(MAX_WORDS + 50);
        let validated = validate_text(&text).unwrap();
        assert_eq!(validated.split_whitespace().count(), MAX_WORDS);
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(validate_query("  ").is_err());
        assert_eq!(validate_query(" margins? ").unwrap(), "margins?");
    }

    #[test]
    fn csv_loads_with_typed_cells() {
        let file = tempfile_with(
            "Date,Region,Revenue\n2025-10-01,Urban,7000\n2025-10-02,Rural,5000\n",
        );
        let df = load_csv(file.path()).unwrap();
        assert_eq!(df.len(), 2);
        assert_eq!(df.columns(), &["Date", "Region", "Revenue"]);
        assert_eq!(df.numeric_column("Revenue").unwrap(), vec![7000.0, 5000.0]);
        assert_eq!(df.unique_text_values("Region"), vec!["Urban", "Rural"]);
        file.close().unwrap();
    }

    #[test]
    fn csv_with_one_column_is_rejected() {
        let file = tempfile_with("Revenue\n7000\n");
        assert!(load_csv(file.path()).is_err());
        file.close().unwrap();
    }

    #[test]
    fn csv_without_rows_is_rejected() {
        let file = tempfile_with("Region,Revenue\n");
        assert!(load_csv(file.path()).is_err());
        file.close().unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_csv(Path::new("/nonexistent/data.csv")).is_err());
    }

    fn tempfile_with(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
