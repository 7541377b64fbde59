use std::fmt::Display;

use crate::{errors::errors::{Error, ErrorImpl}, Position};

/// Declared type of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Integer,
    Real,
    Boolean,
    Char,
    /// `array[low..high] of element`
    Array {
        low: i64,
        high: i64,
        element: Box<DataType>,
    },
}

impl DataType {
    pub fn array(low: i64, high: i64, element: DataType) -> Self {
        DataType::Array { low, high, element: Box::new(element) }
    }

    /// The value a freshly declared variable of this type holds, if the type defines one.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            DataType::Integer => Some(Value::Integer(0)),
            DataType::Real => Some(Value::Real(0.0)),
            DataType::Boolean => Some(Value::Boolean(false)),
            DataType::Char => Some(Value::Char('\0')),
            DataType::Array { low, high, element } => {
                // Empty and unrepresentable ranges have no default.
                let len = high
                    .checked_sub(*low)
                    .and_then(|span| span.checked_add(1))
                    .filter(|&len| len > 0)
                    .and_then(|len| usize::try_from(len).ok())?;
                let item = element.default_value()?;
                let mut items = vec![];
                items.try_reserve_exact(len).ok()?;
                items.resize(len, item);
                Some(Value::Array(ArrayValue::new(*low, items)))
            }
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "integer"),
            DataType::Real => write!(f, "real"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Char => write!(f, "char"),
            DataType::Array { low, high, element } => {
                write!(f, "array[{}..{}] of {}", low, high, element)
            }
        }
    }
}

/// Variant tag of a [`Value`], used to filter value lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Real,
    Boolean,
    Char,
    Array,
}

/// A runtime value held in a scope's value table.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Char(char),
    Array(ArrayValue),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Char(_) => ValueKind::Char,
            Value::Array(_) => ValueKind::Array,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{:?}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Char(value) => write!(f, "{:?}", value),
            Value::Array(array) => {
                write!(f, "[")?;
                for (i, item) in array.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A one-dimensional array; more dimensions nest arrays as items.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    low: i64,
    items: Vec<Value>,
}

impl ArrayValue {
    pub fn new(low: i64, items: Vec<Value>) -> Self {
        ArrayValue { low, items }
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    /// Upper bound; `low - 1` for an empty array.
    pub fn high(&self) -> i64 {
        match i64::try_from(self.items.len()) {
            Ok(0) => self.low.saturating_sub(1),
            Ok(len) => self.low.saturating_add(len - 1),
            Err(_) => i64::MAX,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn slot(&self, accessor: &Value) -> Result<usize, Error> {
        let index = match accessor {
            Value::Integer(index) => *index,
            other => return Err(index_error(format!("array index must be an integer, got {}", other))),
        };
        index
            .checked_sub(self.low)
            .and_then(|offset| usize::try_from(offset).ok())
            .filter(|&slot| slot < self.items.len())
            .ok_or_else(|| {
                index_error(format!("index {} out of bounds {}..{}", index, self.low, self.high()))
            })
    }

    /// Reads the element addressed by `accessors`, one index per dimension.
    pub fn get(&self, accessors: &[Value]) -> Result<&Value, Error> {
        let Some((first, rest)) = accessors.split_first() else {
            return Err(index_error(String::from("no index given")));
        };
        let item = &self.items[self.slot(first)?];
        if rest.is_empty() {
            return Ok(item);
        }
        match item {
            Value::Array(inner) => inner.get(rest),
            _ => Err(index_error(format!("too many indices ({})", accessors.len()))),
        }
    }

    /// Overwrites the element addressed by `accessors` in place.
    pub fn set(&mut self, accessors: &[Value], value: Value) -> Result<(), Error> {
        let Some((first, rest)) = accessors.split_first() else {
            return Err(index_error(String::from("no index given")));
        };
        let slot = self.slot(first)?;
        if rest.is_empty() {
            self.items[slot] = value;
            return Ok(());
        }
        match &mut self.items[slot] {
            Value::Array(inner) => inner.set(rest, value),
            _ => Err(index_error(format!("too many indices ({})", accessors.len()))),
        }
    }
}

fn index_error(message: String) -> Error {
    Error::new(ErrorImpl::IndexError { message }, Position::null())
}
