//! Row source: decodes the delimited schema description into records

use indexmap::IndexMap;

use crate::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One data row of the input, keyed by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Source line (1-indexed, header is line 1)
    pub line: usize,
    pub fields: IndexMap<String, String>,
}

impl Record {
    /// Field value, empty when the column is missing
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Drop a leading UTF-8 byte-order-mark
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// `;` when the header line contains one, `,` otherwise
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    if header.contains(&b';') {
        b';'
    } else {
        b','
    }
}

/// Decode all records; every cell is kept as untyped text
pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>> {
    let bytes = strip_bom(bytes);
    let delimiter = sniff_delimiter(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(records.len() + 2);

        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), row.get(i).unwrap_or("").to_string()))
            .collect();

        records.push(Record { line, fields });
    }

    tracing::debug!(
        delimiter = %(delimiter as char),
        rows = records.len(),
        "decoded schema input"
    );

    Ok(records)
}
