//! Parameterized query execution for the course-content proxy, with
//! row shaping into JSON by Postgres column type.

use crate::db::connection::DbPool;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{json, Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};

/// Lookup backing `POST /api/context`: course snippets whose content or
/// tags touch the student's question, easiest material first.
const CONTEXT_QUERY: &str = "SELECT * FROM course_content \
     WHERE content_type IN ('topic', 'exercise', 'concept') \
       AND (content ILIKE $1 OR tags @> ARRAY[$2]::text[]) \
     ORDER BY difficulty_level \
     LIMIT 5";

pub async fn run_query(
    pool: &DbPool,
    sql: &str,
    params: &[Value],
) -> Result<Vec<Value>, sqlx::Error> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            Value::Null => query.bind(Option::<String>::None),
            Value::Bool(b) => query.bind(*b),
            Value::Number(n) if n.is_i64() => query.bind(n.as_i64()),
            Value::Number(n) => query.bind(n.as_f64()),
            Value::String(s) => query.bind(s.clone()),
            // Arrays and objects go through as jsonb.
            other => query.bind(other.clone()),
        };
    }

    let rows = query.fetch_all(pool.as_ref()).await?;
    Ok(rows.iter().map(row_to_json).collect())
}

pub async fn course_context(pool: &DbPool, question: &str) -> Result<Vec<Value>, sqlx::Error> {
    let pattern = format!("%{}%", question);
    let tag = question.to_lowercase();

    let rows = sqlx::query(CONTEXT_QUERY)
        .bind(pattern)
        .bind(tag)
        .fetch_all(pool.as_ref())
        .await?;

    Ok(rows.iter().map(row_to_json).collect())
}

fn row_to_json(row: &PgRow) -> Value {
    let mut object = Map::new();
    for column in row.columns() {
        object.insert(
            column.name().to_string(),
            column_value(row, column.ordinal(), column.type_info().name()),
        );
    }
    Value::Object(object)
}

fn column_value(row: &PgRow, idx: usize, type_name: &str) -> Value {
    match type_name {
        "BOOL" => json!(row.try_get::<Option<bool>, _>(idx).ok().flatten()),
        "INT2" => json!(row.try_get::<Option<i16>, _>(idx).ok().flatten()),
        "INT4" => json!(row.try_get::<Option<i32>, _>(idx).ok().flatten()),
        "INT8" => json!(row.try_get::<Option<i64>, _>(idx).ok().flatten()),
        "FLOAT4" => json!(row.try_get::<Option<f32>, _>(idx).ok().flatten()),
        "FLOAT8" => json!(row.try_get::<Option<f64>, _>(idx).ok().flatten()),
        "UUID" => json!(row
            .try_get::<Option<sqlx::types::Uuid>, _>(idx)
            .ok()
            .flatten()
            .map(|u| u.to_string())),
        "TIMESTAMPTZ" => json!(row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .ok()
            .flatten()
            .map(|t| t.to_rfc3339())),
        "TIMESTAMP" => json!(row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .ok()
            .flatten()
            .map(|t| t.to_string())),
        "DATE" => json!(row
            .try_get::<Option<NaiveDate>, _>(idx)
            .ok()
            .flatten()
            .map(|d| d.to_string())),
        "JSON" | "JSONB" => row
            .try_get::<Option<Value>, _>(idx)
            .ok()
            .flatten()
            .unwrap_or(Value::Null),
        "_TEXT" | "_VARCHAR" => json!(row
            .try_get::<Option<Vec<String>>, _>(idx)
            .ok()
            .flatten()),
        // TEXT, VARCHAR, BPCHAR, NAME and anything else that reads as text.
        _ => json!(row.try_get::<Option<String>, _>(idx).ok().flatten()),
    }
}
