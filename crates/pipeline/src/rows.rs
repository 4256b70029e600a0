use crate::error::PipelineError;
use crate::model::Row;

/// Parse CSV text into header → value rows.
///
/// A leading UTF-8 BOM is stripped (hosted CSV exports prefix one). The
/// header row is required; cells beyond it map positionally onto the header
/// names. Ragged rows are tolerated: short rows pad missing cells with `""`
/// (hand-edited exports routinely drop trailing fields) and the row-level
/// required-field checks downstream decide their fate. This is a pure text
/// transform — acquiring the CSV (file read, HTTP export) is the caller's
/// concern.
pub fn rows_from_csv(text: &str) -> Result<Vec<Row>, PipelineError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::CsvParse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::CsvParse(e.to_string()))?;
        let mut row = Row::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.push(header.clone(), record.get(i).unwrap_or("").to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}
