use crate::{Error, Result, Value};
use rust_decimal::Decimal;
use std::any;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between Rust types and the dynamically typed [`Value`].
///
/// `as_value` is used when building parameters, `try_from_value` when reading row fields or the
/// captured inserted identifier back.
///
/// ```rust
/// use sluice_core::{AsValue, Value};
/// let v = 42i64.as_value();
/// assert!(matches!(v, Value::Int64(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The typed `NULL` of this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

pub(crate) fn conversion_error<T>(value: &Value) -> Error {
    Error::Conversion {
        value: value.render().into_owned(),
        target: any::type_name::<T>(),
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(Some(value.into()))
    }
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            #[allow(unreachable_patterns)]
            fn try_from_value(value: Value) -> Result<Self> {
                let wide: Option<i128> = match &value {
                    $destination(Some(v)) => return Ok(*v),
                    Value::Int8(Some(v)) => Some(*v as _),
                    Value::Int16(Some(v)) => Some(*v as _),
                    Value::Int32(Some(v)) => Some(*v as _),
                    Value::Int64(Some(v)) => Some(*v as _),
                    Value::UInt8(Some(v)) => Some(*v as _),
                    Value::UInt16(Some(v)) => Some(*v as _),
                    Value::UInt32(Some(v)) => Some(*v as _),
                    Value::UInt64(Some(v)) => Some(*v as _),
                    Value::Varchar(Some(v)) => v.trim().parse().ok(),
                    _ => None,
                };
                wide.and_then(|v| <$source>::try_from(v).ok())
                    .ok_or_else(|| conversion_error::<Self>(&value))
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat $(if $guard:expr)? => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest $(if $guard)? => $expr_rest,)*
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    Value::UInt64(Some(v)) => Ok(v != 0),
    ref v if v.is_integer() => v.to_i64().map(|v| v != 0).ok_or_else(|| conversion_error::<bool>(v)),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v)) if v as f32 as f64 == v => Ok(v as f32),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as f64),
    ref v if v.is_integer() => v.to_i64().map(|v| v as f64).ok_or_else(|| conversion_error::<f64>(v)),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    ref v if v.is_integer() => v.to_i64().map(Decimal::from).ok_or_else(|| conversion_error::<Decimal>(v)),
    ref v @ Value::Varchar(Some(ref text)) => text.trim().parse().map_err(|_| conversion_error::<Decimal>(v)),
);
impl_as_value!(
    String,
    Value::Varchar,
    ref v if !v.is_null() && !matches!(v, Value::Blob(..)) => {
        Ok(v.to_text().map(|v| v.into_owned()).unwrap_or_default())
    },
);
impl_as_value!(
    Box<[u8]>,
    Value::Blob,
    Value::Varchar(Some(v)) => Ok(v.into_bytes().into()),
);
impl_as_value!(
    Vec<u8>,
    Value::Blob,
    Value::Varchar(Some(v)) => Ok(v.into_bytes()),
);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(
    Uuid,
    Value::Uuid,
    ref v @ Value::Varchar(Some(ref text)) => Uuid::parse_str(text).map_err(|_| conversion_error::<Uuid>(v)),
);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::try_from_value(value).map(Some)
        }
    }
}
