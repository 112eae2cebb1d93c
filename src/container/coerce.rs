// Coercions applied to container attributes at construction time.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::{Error, Result};

/// An attribute that accepts either one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StrOrList {
    Str(String),
    List(Vec<String>),
}

impl StrOrList {
    /// Lists are joined with a space, strings pass through.
    pub fn joined(self) -> String {
        match self {
            StrOrList::Str(s) => s,
            StrOrList::List(items) => join(&items, " "),
        }
    }

    /// Command words. Strings are split with shell rules, lists pass through.
    pub fn words(self) -> std::result::Result<Vec<String>, shell_words::ParseError> {
        match self {
            StrOrList::Str(s) => shell_words::split(&s),
            StrOrList::List(items) => Ok(items),
        }
    }

    /// Strings are split on `sep` (whitespace when `None`), lists pass through.
    pub fn split(self, sep: Option<&str>) -> Vec<String> {
        match self {
            StrOrList::Str(s) => split(&s, sep),
            StrOrList::List(items) => items,
        }
    }
}

impl From<&str> for StrOrList {
    fn from(value: &str) -> Self {
        StrOrList::Str(value.to_string())
    }
}

impl From<String> for StrOrList {
    fn from(value: String) -> Self {
        StrOrList::Str(value)
    }
}

impl From<Vec<String>> for StrOrList {
    fn from(value: Vec<String>) -> Self {
        StrOrList::List(value)
    }
}

impl From<Vec<&str>> for StrOrList {
    fn from(value: Vec<&str>) -> Self {
        StrOrList::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StrOrList {
    fn from(value: [&str; N]) -> Self {
        StrOrList::List(value.into_iter().map(String::from).collect())
    }
}

/// A mapping given either directly or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Pairs {
    Map(BTreeMap<String, String>),
    List(Vec<String>),
}

impl Pairs {
    /// Turn list entries into a map.
    ///
    /// With `sep` each entry must contain the separator and is split into a
    /// trimmed name and value. Without it every entry becomes a name with an
    /// empty value.
    pub fn into_map(self, sep: Option<char>) -> Result<BTreeMap<String, String>> {
        match self {
            Pairs::Map(map) => Ok(map),
            Pairs::List(items) => dictify_strings(&items, sep),
        }
    }
}

impl From<BTreeMap<String, String>> for Pairs {
    fn from(value: BTreeMap<String, String>) -> Self {
        Pairs::Map(value)
    }
}

impl From<Vec<String>> for Pairs {
    fn from(value: Vec<String>) -> Self {
        Pairs::List(value)
    }
}

impl From<Vec<&str>> for Pairs {
    fn from(value: Vec<&str>) -> Self {
        Pairs::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Pairs {
    fn from(value: [&str; N]) -> Self {
        Pairs::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Pairs {
    fn from(value: [(&str, &str); N]) -> Self {
        Pairs::Map(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A loosely typed scalar such as a UID or a memory limit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

pub fn join(items: &[String], sep: &str) -> String {
    items.join(sep)
}

pub fn split(s: &str, sep: Option<&str>) -> Vec<String> {
    match sep {
        Some(sep) => s.split(sep).map(String::from).collect(),
        None => s.split_whitespace().map(String::from).collect(),
    }
}

pub fn dictify_strings(items: &[String], sep: Option<char>) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for item in items {
        match sep {
            Some(sep) => {
                let (name, value) = item.split_once(sep).ok_or_else(|| {
                    Error::InvalidArgument(format!("expected `name{sep}value`, got `{item}`"))
                })?;
                map.insert(name.trim().to_string(), value.trim().to_string());
            }
            None => {
                map.insert(item.trim().to_string(), String::new());
            }
        }
    }
    Ok(map)
}
