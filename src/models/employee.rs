use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// One `employees` row as column name -> value, in the order the server returned the columns.
pub type EmployeeRecord = Map<String, Value>;

/// Form fields submitted to create an employee. Values are stored exactly as sent.
#[derive(Deserialize, Debug)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
}

#[derive(Debug, PartialEq)]
enum ColumnKind {
    Signed,
    Unsigned,
    Boolean,
    Float,
    Double,
    Timestamp,
    Date,
    Time,
    Json,
    Binary,
    Text,
}

impl ColumnKind {
    fn from_type_name(name: &str) -> Self {
        match name {
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" | "YEAR" => ColumnKind::Unsigned,
            "BOOLEAN" => ColumnKind::Boolean,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "TIMESTAMP" | "DATETIME" => ColumnKind::Timestamp,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "JSON" => ColumnKind::Json,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT" => {
                ColumnKind::Binary
            }
            // VARCHAR, CHAR, TEXT, ENUM, SET, DECIMAL and anything newer arrive as text.
            _ => ColumnKind::Text,
        }
    }
}

/// Builds a record from already-decoded column/value pairs, keeping their order.
pub fn record_from_columns<I, K>(columns: I) -> EmployeeRecord
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    columns.into_iter().map(|(name, value)| (name.into(), value)).collect()
}

/// Decodes every column of a row by its server-reported type.
pub fn record_from_row(row: &MySqlRow) -> Result<EmployeeRecord, sqlx::Error> {
    let mut columns = Vec::with_capacity(row.columns().len());

    for column in row.columns() {
        let index = column.ordinal();
        let value = if row.try_get_raw(index)?.is_null() {
            Value::Null
        } else {
            decode_column(row, index, ColumnKind::from_type_name(column.type_info().name()))?
        };
        columns.push((column.name().to_string(), value));
    }

    Ok(record_from_columns(columns))
}

fn decode_column(row: &MySqlRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        // Integer widths vary per column; the decoders read whatever width the server sent.
        ColumnKind::Signed => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        ColumnKind::Unsigned => Value::from(row.try_get_unchecked::<u64, _>(index)?),
        ColumnKind::Boolean => Value::from(row.try_get::<bool, _>(index)?),
        ColumnKind::Float => Value::from(row.try_get::<f32, _>(index)?),
        ColumnKind::Double => Value::from(row.try_get::<f64, _>(index)?),
        ColumnKind::Timestamp => Value::from(
            row.try_get::<DateTime<Utc>, _>(index)?
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ),
        ColumnKind::Date => Value::from(row.try_get::<NaiveDate, _>(index)?.to_string()),
        ColumnKind::Time => Value::from(row.try_get::<NaiveTime, _>(index)?.to_string()),
        ColumnKind::Json => {
            let raw = row.try_get_unchecked::<String, _>(index)?;
            serde_json::from_str(&raw).unwrap_or(Value::String(raw))
        }
        ColumnKind::Binary => {
            let raw = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            Value::from(String::from_utf8_lossy(&raw).into_owned())
        }
        ColumnKind::Text => Value::from(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_column_order_and_value_types() {
        let record = record_from_columns([
            ("id", json!(7)),
            ("name", json!("Alice")),
            ("email", json!("a@x.com")),
            ("role", json!("Engineer")),
            ("department", json!("R&D")),
            ("created_at", json!("2024-03-01T09:30:00Z")),
        ]);

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":7,"name":"Alice","email":"a@x.com","role":"Engineer","department":"R&D","created_at":"2024-03-01T09:30:00Z"}"#
        );
    }

    #[test]
    fn record_carries_extra_columns_and_nulls() {
        let record = record_from_columns([
            ("id", json!(4_000_000_000u64)),
            ("name", json!("Bob")),
            ("department", Value::Null),
            ("zeta_badge", json!("B-12")),
            ("alpha_floor", json!(3)),
        ]);

        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "department", "zeta_badge", "alpha_floor"]);
        assert_eq!(record["id"], json!(4_000_000_000u64));
        assert!(record["department"].is_null());
    }

    #[test]
    fn column_types_pick_a_decoder() {
        assert_eq!(ColumnKind::from_type_name("BIGINT"), ColumnKind::Signed);
        assert_eq!(ColumnKind::from_type_name("INT UNSIGNED"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::from_type_name("BIGINT UNSIGNED"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::from_type_name("BOOLEAN"), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMP"), ColumnKind::Timestamp);
        assert_eq!(ColumnKind::from_type_name("DATETIME"), ColumnKind::Timestamp);
        assert_eq!(ColumnKind::from_type_name("DATE"), ColumnKind::Date);
        assert_eq!(ColumnKind::from_type_name("BLOB"), ColumnKind::Binary);
        assert_eq!(ColumnKind::from_type_name("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("DECIMAL"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("ENUM"), ColumnKind::Text);
    }

    #[test]
    fn blank_form_values_decode_as_empty_strings() {
        let form: NewEmployee =
            serde_json::from_value(json!({ "name": "", "email": "", "role": "Engineer", "department": "" }))
                .unwrap();
        assert_eq!(form.name, "");
        assert_eq!(form.department, "");
    }
}
