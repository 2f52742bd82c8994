//! ksqlDB REST response framing.
//!
//! A pull query answered with `application/vnd.ksql.v1+json` is a JSON
//! array: a `header` element carrying the schema, then one `row` element
//! per result row. The server may also append a `finalMessage` or, when
//! the query fails midway, an `errorMessage`.

use serde::Deserialize;
use serde_json::Value;

use crate::client::KsqlError;

/// One element of a `/query` response array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryStreamItem {
    Header(QueryHeader),
    Row(QueryRow),
    FinalMessage(String),
    ErrorMessage(KsqlErrorBody),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHeader {
    #[serde(default)]
    pub query_id: Option<String>,
    /// Column list, e.g. ``"`ID` STRING, `VALUE` STRING"``.
    #[serde(default)]
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRow {
    pub columns: Vec<Value>,
}

/// Error body returned by ksqlDB, either as a non-2xx response or as an
/// `errorMessage` element.
#[derive(Debug, Clone, Deserialize)]
pub struct KsqlErrorBody {
    #[serde(rename = "@type", default)]
    pub error_type: Option<String>,
    pub error_code: i64,
    pub message: String,
}

/// Rows of a completed pull query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub schema: Option<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse the body of a successful `/query` response.
pub fn parse_query_response(body: &str) -> Result<QueryResult, KsqlError> {
    let items: Vec<QueryStreamItem> =
        serde_json::from_str(body).map_err(|e| KsqlError::Decode(e.to_string()))?;

    let mut result = QueryResult::default();
    for item in items {
        match item {
            QueryStreamItem::Header(header) => result.schema = header.schema,
            QueryStreamItem::Row(row) => result.rows.push(row.columns),
            QueryStreamItem::FinalMessage(message) => {
                tracing::debug!(final_message = %message, "ksqlDB query completed");
            }
            QueryStreamItem::ErrorMessage(err) => {
                return Err(KsqlError::Statement {
                    code: err.error_code,
                    message: err.message,
                });
            }
        }
    }
    Ok(result)
}

/// Read a column as text. `NULL` reads as the empty string; numbers and
/// booleans are rendered with their JSON text.
pub fn column_text(row: &[Value], index: usize) -> Result<String, KsqlError> {
    match row.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(KsqlError::Decode(format!(
            "column {index} is not a scalar: {other}"
        ))),
        None => Err(KsqlError::Decode(format!(
            "row has {} columns, expected at least {}",
            row.len(),
            index + 1
        ))),
    }
}
