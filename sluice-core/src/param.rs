use crate::{AsValue, Value};
use std::{
    fmt::{self, Debug, Display},
    mem,
};

/// Explicit type tag a caller can attach to a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    Bool,
    Float,
    String,
    Text,
    Blob,
    Binary,
}

impl Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamType::Int => "INT",
            ParamType::Bool => "BOOL",
            ParamType::Float => "FLOAT",
            ParamType::String => "STRING",
            ParamType::Text => "TEXT",
            ParamType::Blob => "BLOB",
            ParamType::Binary => "BINARY",
        })
    }
}

/// Lazily produced byte chunks, drained into a single buffer when bound.
pub type Chunks = Box<dyn Iterator<Item = Vec<u8>> + Send>;

/// Payload of a [`Param`].
pub enum ParamValue {
    Value(Value),
    Lazy(Chunks),
}

impl ParamValue {
    /// Materializes a lazy payload in place, leaving a `Value` behind.
    ///
    /// The chunks become `Varchar` when they form valid UTF-8 and `Blob` otherwise.
    pub fn materialize(&mut self) -> &Value {
        if let ParamValue::Lazy(chunks) = self {
            let buffer = mem::replace(chunks, Box::new(std::iter::empty::<Vec<u8>>()))
                .flatten()
                .collect::<Vec<u8>>();
            let value = match String::from_utf8(buffer) {
                Ok(text) => Value::Varchar(Some(text)),
                Err(e) => Value::Blob(Some(e.into_bytes().into())),
            };
            *self = ParamValue::Value(value);
        }
        static NULL: Value = Value::Null;
        match self {
            ParamValue::Value(v) => v,
            ParamValue::Lazy(..) => &NULL,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ParamValue::Value(v) => Some(v),
            ParamValue::Lazy(..) => None,
        }
    }
}

impl Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ParamValue::Lazy(..) => f.write_str("Lazy(..)"),
        }
    }
}

/// Parameter descriptor: a value plus the binding hints the native bind call needs.
///
/// ```rust
/// use sluice_core::{Param, ParamType};
/// let param = Param::new(42).with_name("id").with_type(ParamType::Int);
/// assert_eq!(param.name(), Some("id"));
/// assert!(!param.is_bound());
/// ```
#[derive(Debug)]
pub struct Param {
    value: ParamValue,
    name: Option<String>,
    param_type: Option<ParamType>,
    size: Option<usize>,
    inserted_id: bool,
    bound: bool,
}

impl Param {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::from_param_value(ParamValue::Value(value.into()))
    }

    /// A value produced chunk by chunk.
    pub fn lazy<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        I::IntoIter: Send + 'static,
        C: Into<Vec<u8>> + 'static,
    {
        Self::from_param_value(ParamValue::Lazy(Box::new(
            chunks.into_iter().map(Into::into),
        )))
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    /// Placeholder reserved for the database generated identifier, it is never bound.
    pub fn inserted_id() -> Self {
        let mut result = Self::null();
        result.inserted_id = true;
        result
    }

    fn from_param_value(value: ParamValue) -> Self {
        Self {
            value,
            name: None,
            param_type: None,
            size: None,
            inserted_id: false,
            bound: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = Some(param_type);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ParamValue {
        &mut self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|v| !v.is_empty())
    }

    pub fn param_type(&self) -> Option<ParamType> {
        self.param_type
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn is_inserted_id(&self) -> bool {
        self.inserted_id
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub(crate) fn set_bound(&mut self) {
        self.bound = true;
    }
}

/// Either a bare value or a full descriptor, the two shapes a parameter can take.
#[derive(Debug)]
pub enum Bindable {
    Raw(Value),
    Param(Param),
}

impl Bindable {
    pub fn as_param(&self) -> Option<&Param> {
        match self {
            Bindable::Param(param) => Some(param),
            Bindable::Raw(..) => None,
        }
    }
}

impl<T: AsValue> From<T> for Bindable {
    fn from(value: T) -> Self {
        Bindable::Raw(value.as_value())
    }
}

impl From<Value> for Bindable {
    fn from(value: Value) -> Self {
        Bindable::Raw(value)
    }
}

impl From<&str> for Bindable {
    fn from(value: &str) -> Self {
        Bindable::Raw(value.into())
    }
}

impl From<&[u8]> for Bindable {
    fn from(value: &[u8]) -> Self {
        Bindable::Raw(value.into())
    }
}

impl From<Param> for Bindable {
    fn from(value: Param) -> Self {
        Bindable::Param(value)
    }
}

/// Key of an entry in [`Params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Name(String),
    Index(usize),
}

/// Ordered parameter set, iterated in insertion order when binding.
///
/// ```rust
/// use sluice_core::{Param, Params};
/// let params = Params::new()
///     .with_named("name", "Ada")
///     .with(Param::new(1815).with_name("born"))
///     .with(true);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct Params {
    entries: Vec<(Key, Bindable)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry keyed by its position.
    pub fn push(&mut self, value: impl Into<Bindable>) -> &mut Self {
        let index = self.entries.len();
        self.entries.push((Key::Index(index), value.into()));
        self
    }

    /// Appends an entry keyed by name, the key becomes the placeholder name.
    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<Bindable>) -> &mut Self {
        self.entries.push((Key::Name(name.into()), value.into()));
        self
    }

    pub fn with(mut self, value: impl Into<Bindable>) -> Self {
        self.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Bindable>) -> Self {
        self.push_named(name, value);
        self
    }

    /// Positional parameter set.
    pub fn from_values<B: Into<Bindable>>(values: impl IntoIterator<Item = B>) -> Self {
        let mut result = Params::new();
        for value in values {
            result.push(value);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Key, Bindable)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (Key, Bindable)> {
        self.entries.iter_mut()
    }

    /// Descriptor stored under `name`, either as key or as explicit descriptor name.
    pub fn get(&self, name: &str) -> Option<&Bindable> {
        self.entries
            .iter()
            .find(|(k, v)| match k {
                Key::Name(k) => k == name,
                Key::Index(..) => v.as_param().and_then(Param::name) == Some(name),
            })
            .map(|(_, v)| v)
    }
}

impl<K: Into<String>, B: Into<Bindable>> FromIterator<(K, B)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, B)>>(iter: T) -> Self {
        let mut result = Params::new();
        for (key, value) in iter {
            result.push_named(key, value);
        }
        result
    }
}
