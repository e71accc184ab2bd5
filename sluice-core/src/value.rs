use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    fmt::{self, Display},
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed scalar flowing in (as a bound parameter) and out (as a row field) of a native
/// client.
///
/// Every variant carries an `Option` so that a typed `NULL` keeps the type it was declared with,
/// while [`Value::Null`] is the untyped null.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    /// True for the untyped null and for every typed variant without a payload.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Uuid(None) => true,
            _ => false,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(..))
    }

    /// Canonical text form of a scalar, `None` for nulls and for binary payloads.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        Some(match self {
            Value::Boolean(Some(v)) => Cow::Borrowed(if *v { "1" } else { "0" }),
            Value::Int8(Some(v)) => v.to_string().into(),
            Value::Int16(Some(v)) => v.to_string().into(),
            Value::Int32(Some(v)) => v.to_string().into(),
            Value::Int64(Some(v)) => v.to_string().into(),
            Value::UInt8(Some(v)) => v.to_string().into(),
            Value::UInt16(Some(v)) => v.to_string().into(),
            Value::UInt32(Some(v)) => v.to_string().into(),
            Value::UInt64(Some(v)) => v.to_string().into(),
            Value::Float32(Some(v)) => v.to_string().into(),
            Value::Float64(Some(v)) => v.to_string().into(),
            Value::Decimal(Some(v)) => v.to_string().into(),
            Value::Varchar(Some(v)) => Cow::Borrowed(v.as_str()),
            Value::Date(Some(v)) => v.to_string().into(),
            Value::Time(Some(v)) => v.to_string().into(),
            Value::Timestamp(Some(v)) => v.to_string().into(),
            Value::TimestampWithTimezone(Some(v)) => v.to_string().into(),
            Value::Uuid(Some(v)) => v.to_string().into(),
            _ => return None,
        })
    }

    /// Integer view used by integer binds: integers, booleans and integer looking text.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Boolean(Some(v)) => Some(*v as i64),
            Value::Int8(Some(v)) => Some(*v as i64),
            Value::Int16(Some(v)) => Some(*v as i64),
            Value::Int32(Some(v)) => Some(*v as i64),
            Value::Int64(Some(v)) => Some(*v),
            Value::UInt8(Some(v)) => Some(*v as i64),
            Value::UInt16(Some(v)) => Some(*v as i64),
            Value::UInt32(Some(v)) => Some(*v as i64),
            Value::UInt64(Some(v)) => i64::try_from(*v).ok(),
            Value::Varchar(Some(v)) => v.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw bytes of the value, text is taken as UTF-8.
    pub fn to_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::Blob(Some(v)) => Some(Cow::Borrowed(v)),
            Value::Varchar(Some(v)) => Some(Cow::Borrowed(v.as_bytes())),
            _ => self.to_text().map(|v| Cow::Owned(v.into_owned().into_bytes())),
        }
    }

    /// Name of the variant, used where the payload must not be dumped.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Decimal(..) => "Decimal",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Date(..) => "Date",
            Value::Time(..) => "Time",
            Value::Timestamp(..) => "Timestamp",
            Value::TimestampWithTimezone(..) => "TimestampWithTimezone",
            Value::Uuid(..) => "Uuid",
        }
    }

    /// Diagnostic rendering: scalars as their string form, nulls as `NULL`, binary as `[Blob]`.
    pub fn render(&self) -> Cow<'_, str> {
        if self.is_null() {
            return Cow::Borrowed("NULL");
        }
        match self.to_text() {
            Some(text) => text,
            None => Cow::Owned(format!("[{}]", self.type_name())),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
