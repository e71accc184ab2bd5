use crate::{Bindable, Error, Param, ParamType, ParamValue, Result, Value};
use std::fmt::{self, Display};

/// Type tag passed to the native bind primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeBindType {
    Integer,
    Boolean,
    String,
    LargeObject,
}

impl Display for NativeBindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NativeBindType::Integer => "integer",
            NativeBindType::Boolean => "boolean",
            NativeBindType::String => "string",
            NativeBindType::LargeObject => "large object",
        })
    }
}

/// Maps parameters to native bind types.
///
/// Native clients without a boolean bind type get `native_boolean = false`: booleans (tagged or
/// inferred) are then bound as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coercion {
    pub native_boolean: bool,
}

impl Default for Coercion {
    fn default() -> Self {
        Self {
            native_boolean: true,
        }
    }
}

impl Coercion {
    pub const fn new(native_boolean: bool) -> Self {
        Self { native_boolean }
    }

    fn boolean(&self) -> NativeBindType {
        if self.native_boolean {
            NativeBindType::Boolean
        } else {
            NativeBindType::Integer
        }
    }

    /// Native type for an explicit tag. `BINARY` is not implemented and never downgraded.
    pub fn coerce_type(&self, param_type: ParamType) -> Result<NativeBindType> {
        Ok(match param_type {
            ParamType::Int => NativeBindType::Integer,
            ParamType::Bool => self.boolean(),
            ParamType::Float | ParamType::String | ParamType::Text => NativeBindType::String,
            ParamType::Blob => NativeBindType::LargeObject,
            ParamType::Binary => return Err(Error::UnsupportedType(param_type)),
        })
    }

    /// Native type inferred from the runtime value.
    pub fn coerce_value(&self, value: &Value) -> NativeBindType {
        match value {
            Value::Boolean(..) => self.boolean(),
            v if v.is_integer() => NativeBindType::Integer,
            _ => NativeBindType::String,
        }
    }

    pub fn coerce_param(&self, param: &Param) -> Result<NativeBindType> {
        if let Some(param_type) = param.param_type() {
            return self.coerce_type(param_type);
        }
        Ok(match param.value() {
            ParamValue::Value(v) => self.coerce_value(v),
            ParamValue::Lazy(..) => NativeBindType::String,
        })
    }

    pub fn coerce(&self, bindable: &Bindable) -> Result<NativeBindType> {
        match bindable {
            Bindable::Raw(v) => Ok(self.coerce_value(v)),
            Bindable::Param(param) => self.coerce_param(param),
        }
    }
}
