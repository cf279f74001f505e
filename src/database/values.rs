//! Database Value Types
//!
//! `DatabaseValue` is the parameter type bound by the database macros. Every
//! variant is sent to PostgreSQL as text and the generated SQL casts it to the
//! column type, which keeps a single `Encode` implementation for all fields.

use sqlx::postgres::PgArgumentBuffer;
use sqlx::{Encode, Postgres, Type, encode::IsNull, error::BoxDynError};
use std::fmt::{self, Display};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A type-tagged value bound as a query parameter.
///
/// ```ignore
/// let value: DatabaseValue = "hello".into();
/// let value: DatabaseValue = 42i64.into();
/// let value: DatabaseValue = true.into();
/// let value: DatabaseValue = OffsetDateTime::now_utc().into();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseValue {
    /// Text column value
    Text(String),
    /// BIGINT column value
    Int64(i64),
    /// BOOLEAN column value
    Boolean(bool),
    /// TIMESTAMP WITH TIME ZONE column value, sent as RFC 3339
    DateTime(OffsetDateTime),
}

impl DatabaseValue {
    /// SQL expression for this value bound at `$position`, cast to the
    /// column type.
    pub fn placeholder(&self, position: usize) -> String {
        match self {
            DatabaseValue::Text(_) => format!("${}", position),
            DatabaseValue::Int64(_) => format!("CAST(${} AS BIGINT)", position),
            DatabaseValue::Boolean(_) => format!("CAST(${} AS BOOLEAN)", position),
            DatabaseValue::DateTime(_) => {
                format!("CAST(${} AS TIMESTAMP WITH TIME ZONE)", position)
            }
        }
    }
}

impl Display for DatabaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseValue::Text(s) => write!(f, "{}", s),
            DatabaseValue::Int64(i) => write!(f, "{}", i),
            DatabaseValue::Boolean(b) => write!(f, "{}", b),
            DatabaseValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl<'q> Encode<'q, Postgres> for DatabaseValue {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self {
            DatabaseValue::Text(s) => Encode::<Postgres>::encode_by_ref(s, buf),
            DatabaseValue::Int64(i) => Encode::<Postgres>::encode_by_ref(&i.to_string(), buf),
            DatabaseValue::Boolean(b) => Encode::<Postgres>::encode_by_ref(&b.to_string(), buf),
            DatabaseValue::DateTime(dt) => {
                let formatted = dt.format(&Rfc3339)?;
                Encode::<Postgres>::encode_by_ref(&formatted, buf)
            }
        }
    }
}

impl Type<Postgres> for DatabaseValue {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("text")
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        let text_oids = [25, 1043, 1042, 19];
        ty.oid()
            .map(|oid| text_oids.contains(&oid.0))
            .unwrap_or(false)
    }
}

impl From<&str> for DatabaseValue {
    fn from(s: &str) -> Self {
        DatabaseValue::Text(s.to_string())
    }
}

impl From<String> for DatabaseValue {
    fn from(s: String) -> Self {
        DatabaseValue::Text(s)
    }
}

impl From<&'_ String> for DatabaseValue {
    fn from(s: &'_ String) -> Self {
        DatabaseValue::Text(s.clone())
    }
}

impl From<bool> for DatabaseValue {
    fn from(b: bool) -> Self {
        DatabaseValue::Boolean(b)
    }
}

impl From<i64> for DatabaseValue {
    fn from(i: i64) -> Self {
        DatabaseValue::Int64(i)
    }
}

impl From<OffsetDateTime> for DatabaseValue {
    fn from(dt: OffsetDateTime) -> Self {
        DatabaseValue::DateTime(dt)
    }
}
