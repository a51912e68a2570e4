//! Spreadsheet visualization query (`gviz/tq`) responses.
//!
//! The endpoint answers with JSON wrapped in a JavaScript callback:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"version":"0.6","status":"ok","table":{...}});
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ModelError;
use crate::number::display_value;

/// Rows of stringified cell values.
pub type Grid = Vec<Vec<String>>;

const WRAPPER_COMMENT: &str = "/*O_o*/";
const WRAPPER_PREFIX: &str = "google.visualization.Query.setResponse(";

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<Value>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Option<Vec<Option<GvizCell>>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    f: Option<Value>,
}

impl GvizCell {
    /// Formatted value wins over the raw one.
    fn text(&self) -> String {
        self.f
            .as_ref()
            .or(self.v.as_ref())
            .map(display_value)
            .unwrap_or_default()
    }
}

/// Pull the JSON object out of the callback wrapper.
///
/// The known `setResponse(...)` wrapper is stripped exactly. Anything else
/// falls back to the span between the first `{` and the last `}`.
pub fn extract_json(text: &str) -> Result<&str, ModelError> {
    let body = text.trim();
    let body = body.strip_prefix(WRAPPER_COMMENT).map(str::trim_start).unwrap_or(body);
    if let Some(inner) = body
        .strip_prefix(WRAPPER_PREFIX)
        .and_then(|rest| rest.trim_end().strip_suffix(';').unwrap_or(rest).trim_end().strip_suffix(')'))
    {
        return Ok(inner);
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(ModelError::Gviz("unexpected response".into())),
    }
}

/// Parse a full endpoint response into a grid, one entry per column declared
/// in `table.cols` for every row.
pub fn parse_gviz_response(text: &str) -> Result<Grid, ModelError> {
    let json = extract_json(text)?;
    let resp: GvizResponse =
        serde_json::from_str(json).map_err(|e| ModelError::Gviz(format!("invalid json: {e}")))?;
    let table = resp.table.ok_or_else(|| {
        ModelError::Gviz(format!("response has no table (status {})", resp.status.as_deref().unwrap_or("unknown")))
    })?;

    let width = table.cols.len();
    Ok(table
        .rows
        .iter()
        .map(|row| {
            (0..width)
                .map(|i| {
                    row.c
                        .as_ref()
                        .and_then(|cells| cells.get(i))
                        .and_then(Option::as_ref)
                        .map(GvizCell::text)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect())
}

/// Resize a grid to exactly `rows × cols`, padding with empty cells.
pub fn pad_grid(grid: &Grid, rows: usize, cols: usize) -> Grid {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| grid.get(r).and_then(|row| row.get(c)).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}
