//! Sketch record queries
//!
//! Sketches are submitted from the site's interactive pages and reviewed by
//! the backend. Rows are returned as loose JSON objects so that columns added
//! to the table show up in responses without code changes.

use crate::Result;
use serde_json::{json, Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, ValueRef};
use tracing::debug;

/// Largest integer a JSON consumer can hold exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Fields for a new sketch row
#[derive(Debug, Clone, Default)]
pub struct NewSketch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
}

/// Parse a sketch id the way the site's route parameters are read
///
/// Leading whitespace and an optional sign are accepted, then as many
/// decimal digits as follow; trailing characters are ignored
/// (`"12abc"` is 12). Returns `None` when no digits lead the string or the
/// value does not fit in an `i64`.
pub fn parse_sketch_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Integer as JSON: a number when exactly representable, else a string
pub fn json_safe_integer(value: i64) -> Value {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        json!(value)
    } else {
        Value::String(value.to_string())
    }
}

/// Convert one row into a column-name keyed JSON object
fn row_to_json(row: &SqliteRow) -> Map<String, Value> {
    let mut object = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = row
            .try_get_raw(i)
            .ok()
            .and_then(|raw| {
                if raw.is_null() {
                    Some(Value::Null)
                } else {
                    row.try_get::<i64, _>(i)
                        .ok()
                        .map(json_safe_integer)
                        .or_else(|| row.try_get::<f64, _>(i).ok().map(|v| json!(v)))
                        .or_else(|| row.try_get::<String, _>(i).ok().map(Value::String))
                }
            })
            .unwrap_or(Value::Null);
        object.insert(column.name().to_string(), value);
    }
    object
}

/// All rows whose id equals `id` (zero or one in practice)
pub async fn fetch_sketch_rows(pool: &SqlitePool, id: i64) -> Result<Vec<Map<String, Value>>> {
    let rows = sqlx::query("SELECT * FROM sketches WHERE id = ?")
        .bind(id)
        .fetch_all(pool)
        .await?;

    debug!(sketch_id = id, rows = rows.len(), "Fetched sketch rows");
    Ok(rows.iter().map(row_to_json).collect())
}

/// Delete the sketch with `id`, returning the number of rows removed
pub async fn delete_sketch(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sketches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    debug!(sketch_id = id, deleted = result.rows_affected(), "Deleted sketch");
    Ok(result.rows_affected())
}

/// Insert a sketch and return its id
pub async fn insert_sketch(pool: &SqlitePool, sketch: &NewSketch) -> Result<i64> {
    let result = sqlx::query("INSERT INTO sketches (title, author, source) VALUES (?, ?, ?)")
        .bind(&sketch.title)
        .bind(&sketch.author)
        .bind(&sketch.source)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
