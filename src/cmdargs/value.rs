use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A value handed to an [`Argument`](super::Argument) for rendering.
///
/// Strings are always single values. Only [`Value::List`] is treated as a
/// multi-value, and only when the descriptor is not marked `single_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Single(String),
    List(Vec<String>),
}

impl Value {
    /// Build a list value from anything displayable.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        Value::List(items.into_iter().map(|item| item.to_string()).collect())
    }

    /// Whether a switch given this value should be emitted.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Single(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Single(s) => f.write_str(s),
            Value::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Single(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Single(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Single(value.clone())
    }
}

macro_rules! scalar_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Single(value.to_string())
                }
            }
        )*
    };
}

scalar_value!(i32, i64, u16, u32, u64, usize, f32, f64);

impl<T: ToString> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::list(value)
    }
}

impl<T: ToString> From<&[T]> for Value {
    fn from(value: &[T]) -> Self {
        Value::List(value.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        Value::list(value)
    }
}

/// Maps render as `K=V` items in key order.
impl From<&BTreeMap<String, String>> for Value {
    fn from(value: &BTreeMap<String, String>) -> Self {
        Value::List(value.iter().map(|(k, v)| format!("{k}={v}")).collect())
    }
}

impl From<&HashMap<String, String>> for Value {
    fn from(value: &HashMap<String, String>) -> Self {
        let sorted: BTreeMap<String, String> =
            value.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Value::from(&sorted)
    }
}
