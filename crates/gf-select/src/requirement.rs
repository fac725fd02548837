//! Requirements — named predicates over one external input

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{InputValue, Inputs};

/// Predicate applied to an input value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Matcher {
    /// Integer within `min..=max`
    Range { min: i64, max: i64 },
    /// Integer `>= min`
    AtLeast { min: i64 },
    /// Integer `<= max`
    AtMost { max: i64 },
    /// Equal to the value
    Exact { value: InputValue },
    /// Member of the set
    OneOf { values: Vec<InputValue> },
}

impl Matcher {
    pub fn matches(&self, value: &InputValue) -> bool {
        match self {
            Self::Range { min, max } => value.as_int().is_some_and(|v| (*min..=*max).contains(&v)),
            Self::AtLeast { min } => value.as_int().is_some_and(|v| v >= *min),
            Self::AtMost { max } => value.as_int().is_some_and(|v| v <= *max),
            Self::Exact { value: expected } => value == expected,
            Self::OneOf { values } => values.contains(value),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => write!(f, "in [{min}, {max}]"),
            Self::AtLeast { min } => write!(f, ">= {min}"),
            Self::AtMost { max } => write!(f, "<= {max}"),
            Self::Exact { value } => write!(f, "== {value}"),
            Self::OneOf { values } => {
                let list: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "in {{{}}}", list.join(", "))
            }
        }
    }
}

/// A named predicate: which input to read (`hint`) and how to test it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub hint: String,
    pub matcher: Matcher,
}

impl Requirement {
    pub fn new(hint: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            hint: hint.into(),
            matcher,
        }
    }

    /// Inclusive integer range
    pub fn range(hint: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(hint, Matcher::Range { min, max })
    }

    pub fn at_least(hint: impl Into<String>, min: i64) -> Self {
        Self::new(hint, Matcher::AtLeast { min })
    }

    pub fn at_most(hint: impl Into<String>, max: i64) -> Self {
        Self::new(hint, Matcher::AtMost { max })
    }

    pub fn exact(hint: impl Into<String>, value: impl Into<InputValue>) -> Self {
        Self::new(
            hint,
            Matcher::Exact {
                value: value.into(),
            },
        )
    }

    pub fn one_of<V: Into<InputValue>>(
        hint: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(
            hint,
            Matcher::OneOf {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Fetch the input named by `hint` and test it; a missing input never matches
    pub fn is_met<I: Inputs + ?Sized>(&self, inputs: &I) -> bool {
        match inputs.get(&self.hint) {
            Some(value) => self.matcher.matches(value),
            None => {
                log::debug!("requirement {self}: input missing");
                false
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hint, self.matcher)
    }
}
