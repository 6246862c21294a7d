use super::api::ApiResponse;
use super::result::{Payload, UseCaseResult};
use super::ResponseError;
use crate::config::ResponseConfig;
use base64::{engine::general_purpose, Engine as _};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{debug, warn};

const CSV_MIME: &str = "text/csv";

/// Builds CSV and blob download responses from use-case results.
///
/// Defaults (delimiter, base64 encoding, blob MIME type) come from
/// [`ResponseConfig`]; the `*_with` variants override them per call.
#[derive(Debug, Clone, Default)]
pub struct ResultResponseFactory {
    config: ResponseConfig,
}

impl ResultResponseFactory {
    #[must_use]
    pub fn new(config: ResponseConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResponseConfig {
        &self.config
    }

    #[must_use]
    pub fn create_csv_response(&self, result: &UseCaseResult) -> ApiResponse {
        self.create_csv_response_with(result, self.config.base64, self.config.csv_delimiter)
    }

    /// Serializes the payload as CSV with a header row, status 200 and
    /// `Content-Type: text/csv`.
    ///
    /// Each element becomes a row. Nested objects and arrays are flattened
    /// into dotted column names (`address.city`, `tags.0`); the header is
    /// the union of all rows' columns in first-seen order.
    #[must_use]
    pub fn create_csv_response_with(
        &self,
        result: &UseCaseResult,
        base64: bool,
        delimiter: char,
    ) -> ApiResponse {
        let rows: Vec<&Value> = match result.payload() {
            None => Vec::new(),
            Some(Payload::Item(item)) => vec![item],
            Some(Payload::List(items)) | Some(Payload::Paginated { items, .. }) => {
                items.iter().collect()
            }
        };
        let csv = encode_csv(&rows, delimiter);
        debug!(rows = rows.len(), base64, "Rendering CSV response");
        ApiResponse::raw(200, CSV_MIME, encode_body(csv.into_bytes(), base64))
    }

    pub fn create_blob_response(&self, result: &UseCaseResult) -> Result<ApiResponse, ResponseError> {
        self.create_blob_response_with(result, self.config.base64, &self.config.blob_mime)
    }

    /// Sends a textual item as a download. Any other payload is rejected with
    /// [`ResponseError::NotStringable`].
    pub fn create_blob_response_with(
        &self,
        result: &UseCaseResult,
        base64: bool,
        mime: &str,
    ) -> Result<ApiResponse, ResponseError> {
        let Some(Payload::Item(Value::String(text))) = result.payload() else {
            warn!(has_content = result.has_content(), "Blob response requires a textual item");
            return Err(ResponseError::NotStringable);
        };
        Ok(ApiResponse::raw(
            200,
            mime,
            encode_body(text.as_bytes().to_vec(), base64),
        ))
    }
}

fn encode_body(bytes: Vec<u8>, base64: bool) -> Vec<u8> {
    if base64 {
        general_purpose::STANDARD.encode(bytes).into_bytes()
    } else {
        bytes
    }
}

/// CSV text for `rows`, header line first, `\n` line endings. No rows gives
/// an empty string.
#[must_use]
pub fn encode_csv(rows: &[&Value], delimiter: char) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let flattened: Vec<IndexMap<String, String>> = rows
        .iter()
        .map(|row| {
            let mut cells = IndexMap::new();
            match row {
                Value::Object(_) | Value::Array(_) => flatten(row, "", &mut cells),
                scalar => {
                    cells.insert("0".to_string(), cell_text(scalar));
                }
            }
            cells
        })
        .collect();

    let headers: IndexSet<&str> = flattened
        .iter()
        .flat_map(|cells| cells.keys().map(String::as_str))
        .collect();

    let mut out = String::new();
    write_line(&mut out, headers.iter().copied(), delimiter);
    for cells in &flattened {
        write_line(
            &mut out,
            headers
                .iter()
                .map(|h| cells.get(*h).map_or("", String::as_str)),
            delimiter,
        );
    }
    out
}

fn flatten(value: &Value, prefix: &str, cells: &mut IndexMap<String, String>) {
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return,
    };
    for (key, child) in entries {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match child {
            Value::Object(map) if !map.is_empty() => flatten(child, &path, cells),
            Value::Array(items) if !items.is_empty() => flatten(child, &path, cells),
            leaf => {
                cells.insert(path, cell_text(leaf));
            }
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn write_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, delimiter: char) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        let needs_quotes = cell
            .chars()
            .any(|c| c == delimiter || matches!(c, '"' | '\\' | '\n' | '\r' | '\t' | ' '));
        if needs_quotes {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}
