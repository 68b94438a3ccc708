//! Pooled PostgreSQL connection as a [`QueryConnection`]
//!
//! Column types are mapped to [`SqlValue`] once per statement, before any
//! row is read. Zone-aware timestamps are expressed as wall-clock time in
//! the hospital's time zone so that they line up with plain `timestamp`
//! columns. Columns of unmapped types are still fetched; a non-null cell
//! only becomes an error if a required column is bound to it.

use crate::core::query::{QueryConnection, ResultSet, SqlValue};
use crate::domain::DatabaseError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tokio_postgres::types::{FromSql, Type};
use tokio_postgres::{NoTls, Row};

/// How a result column is read from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int2,
    Int4,
    Int8,
    Oid,
    Bool,
    Text,
    Timestamp,
    TimestampTz,
    Date,
    Time,
    Float4,
    Float8,
    Json,
    Unsupported,
}

impl CellKind {
    fn for_type(ty: &Type) -> Self {
        if *ty == Type::INT2 {
            CellKind::Int2
        } else if *ty == Type::INT4 {
            CellKind::Int4
        } else if *ty == Type::INT8 {
            CellKind::Int8
        } else if *ty == Type::OID {
            CellKind::Oid
        } else if *ty == Type::BOOL {
            CellKind::Bool
        } else if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
            || *ty == Type::UNKNOWN
        {
            CellKind::Text
        } else if *ty == Type::TIMESTAMP {
            CellKind::Timestamp
        } else if *ty == Type::TIMESTAMPTZ {
            CellKind::TimestampTz
        } else if *ty == Type::DATE {
            CellKind::Date
        } else if *ty == Type::TIME {
            CellKind::Time
        } else if *ty == Type::FLOAT4 {
            CellKind::Float4
        } else if *ty == Type::FLOAT8 {
            CellKind::Float8
        } else if *ty == Type::JSON || *ty == Type::JSONB {
            CellKind::Json
        } else {
            CellKind::Unsupported
        }
    }
}

/// Accepts any column type without decoding it, so nulls can still be told
/// apart from values
struct Opaque;

impl<'a> FromSql<'a> for Opaque {
    fn from_sql(
        _ty: &Type,
        _raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(Opaque)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Wall clock of a zone-aware instant in `location`
fn wall_clock(instant: DateTime<Utc>, location: Tz) -> NaiveDateTime {
    instant.with_timezone(&location).naive_local()
}

fn read_cell(
    row: &Row,
    index: usize,
    kind: CellKind,
    location: Tz,
) -> Result<SqlValue, tokio_postgres::Error> {
    let value = match kind {
        CellKind::Int2 => row
            .try_get::<_, Option<i16>>(index)?
            .map(|v| SqlValue::Integer(v.into())),
        CellKind::Int4 => row
            .try_get::<_, Option<i32>>(index)?
            .map(|v| SqlValue::Integer(v.into())),
        CellKind::Int8 => row.try_get::<_, Option<i64>>(index)?.map(SqlValue::Integer),
        CellKind::Oid => row
            .try_get::<_, Option<u32>>(index)?
            .map(|v| SqlValue::Integer(v.into())),
        CellKind::Bool => row.try_get::<_, Option<bool>>(index)?.map(SqlValue::Boolean),
        CellKind::Text => row.try_get::<_, Option<String>>(index)?.map(SqlValue::Text),
        CellKind::Timestamp => row
            .try_get::<_, Option<NaiveDateTime>>(index)?
            .map(SqlValue::Timestamp),
        CellKind::TimestampTz => row
            .try_get::<_, Option<DateTime<Utc>>>(index)?
            .map(|t| SqlValue::Timestamp(wall_clock(t, location))),
        CellKind::Date => row
            .try_get::<_, Option<NaiveDate>>(index)?
            .map(|d| SqlValue::Timestamp(d.and_time(NaiveTime::MIN))),
        CellKind::Time => row
            .try_get::<_, Option<NaiveTime>>(index)?
            .map(|t| SqlValue::Text(t.format("%H:%M:%S").to_string())),
        CellKind::Float4 => row
            .try_get::<_, Option<f32>>(index)?
            .map(|v| SqlValue::Text(v.to_string())),
        CellKind::Float8 => row
            .try_get::<_, Option<f64>>(index)?
            .map(|v| SqlValue::Text(v.to_string())),
        CellKind::Json => row
            .try_get::<_, Option<serde_json::Value>>(index)?
            .map(|v| SqlValue::Text(v.to_string())),
        CellKind::Unsupported => row.try_get::<_, Option<Opaque>>(index)?.map(|_| {
            SqlValue::Unsupported(row.columns()[index].type_().name().to_string())
        }),
    };
    Ok(value.unwrap_or(SqlValue::Null))
}

fn query_failed(e: tokio_postgres::Error) -> DatabaseError {
    DatabaseError::QueryFailed(e.to_string())
}

/// A connection checked out of the pool for one query
pub struct PgConnection {
    client: deadpool_postgres::Object,
    location: Tz,
}

impl PgConnection {
    pub(crate) fn new(client: deadpool_postgres::Object, location: Tz) -> Self {
        Self { client, location }
    }
}

#[async_trait]
impl QueryConnection for PgConnection {
    async fn fetch(&self, sql: &str) -> Result<ResultSet, DatabaseError> {
        let statement = self.client.prepare(sql).await.map_err(query_failed)?;
        let kinds: Vec<CellKind> = statement
            .columns()
            .iter()
            .map(|c| CellKind::for_type(c.type_()))
            .collect();
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let rows = self
            .client
            .query(&statement, &[])
            .await
            .map_err(query_failed)?;

        let rows = rows
            .iter()
            .map(|row| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(index, kind)| read_cell(row, index, *kind, self.location))
                    .collect::<Result<Vec<SqlValue>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_failed)?;

        tracing::debug!(columns = columns.len(), rows = rows.len(), "Fetched result set");
        Ok(ResultSet { columns, rows })
    }

    fn cancel(&self) {
        let token = self.client.cancel_token();
        tokio::spawn(async move {
            if let Err(e) = token.cancel_query(NoTls).await {
                tracing::warn!(error = %e, "Failed to cancel running query");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Type::INT2, CellKind::Int2)]
    #[test_case(Type::INT8, CellKind::Int8)]
    #[test_case(Type::VARCHAR, CellKind::Text)]
    #[test_case(Type::BPCHAR, CellKind::Text)]
    #[test_case(Type::TIMESTAMPTZ, CellKind::TimestampTz)]
    #[test_case(Type::DATE, CellKind::Date)]
    #[test_case(Type::TIME, CellKind::Time)]
    #[test_case(Type::JSONB, CellKind::Json)]
    fn test_supported_types(ty: Type, expected: CellKind) {
        assert_eq!(CellKind::for_type(&ty), expected);
    }

    #[test_case(Type::NUMERIC)]
    #[test_case(Type::BYTEA)]
    #[test_case(Type::UUID)]
    #[test_case(Type::INTERVAL)]
    fn test_unsupported_types(ty: Type) {
        assert_eq!(CellKind::for_type(&ty), CellKind::Unsupported);
    }

    #[test]
    fn test_opaque_accepts_any_type() {
        assert!(<Opaque as FromSql>::accepts(&Type::NUMERIC));
        assert!(<Opaque as FromSql>::accepts(&Type::UUID));
    }

    #[test_case("2024-01-15T09:30:00Z", "2024-01-15 10:30:00" ; "winter offset")]
    #[test_case("2024-07-15T09:30:00Z", "2024-07-15 11:30:00" ; "summer offset")]
    #[test_case("2024-03-31T00:30:00Z", "2024-03-31 01:30:00" ; "before the spring gap")]
    #[test_case("2024-03-31T01:30:00Z", "2024-03-31 03:30:00" ; "after the spring gap")]
    fn test_wall_clock_in_location(instant: &str, expected: &str) {
        let instant = DateTime::parse_from_rfc3339(instant)
            .unwrap()
            .with_timezone(&Utc);

        let got = wall_clock(instant, chrono_tz::Europe::Amsterdam);

        assert_eq!(got.format("%Y-%m-%d %H:%M:%S").to_string(), expected);
    }
}
