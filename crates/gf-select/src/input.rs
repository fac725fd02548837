//! Selection inputs — named external values requirements are tested against

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single input value (denomination, market code, ...)
///
/// Numeric inputs are whole integers. Monetary values such as denominations
/// are given in minor units (cents), so a 25 cent denomination is `25`, not
/// `0.25`. A decimal string parses as `Text` and never meets a numeric matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Int(i64),
    Text(String),
}

impl InputValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Parse a command-line style value: integers stay integers, anything else
    /// (decimals included) is text
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Text(raw.trim().to_string()))
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for InputValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for InputValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for InputValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<&str> for InputValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for InputValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Lookup of named inputs supplied per selection call
///
/// An unknown hint yields `None`; a requirement over a missing input never
/// matches.
pub trait Inputs {
    fn get(&self, hint: &str) -> Option<&InputValue>;
}

impl Inputs for HashMap<String, InputValue> {
    fn get(&self, hint: &str) -> Option<&InputValue> {
        HashMap::get(self, hint)
    }
}

impl Inputs for BTreeMap<String, InputValue> {
    fn get(&self, hint: &str) -> Option<&InputValue> {
        BTreeMap::get(self, hint)
    }
}

/// Ordered input map with a builder API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputMap {
    values: BTreeMap<String, InputValue>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an input
    pub fn with(mut self, hint: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(hint, value);
        self
    }

    pub fn insert(&mut self, hint: impl Into<String>, value: impl Into<InputValue>) {
        self.values.insert(hint.into(), value.into());
    }

    /// Parse `hint=value` pairs
    pub fn parse_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let mut map = Self::new();
        for pair in pairs {
            let (hint, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected hint=value, got {pair:?}"))?;
            if hint.trim().is_empty() {
                return Err(format!("empty hint in {pair:?}"));
            }
            map.insert(hint.trim(), InputValue::parse(value));
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Inputs for InputMap {
    fn get(&self, hint: &str) -> Option<&InputValue> {
        self.values.get(hint)
    }
}
