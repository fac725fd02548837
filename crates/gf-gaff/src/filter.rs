//! Name filters over opaque strip and symbol identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// String matcher used by decision makers to pick strips and symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NameFilter {
    /// Every name
    Any,
    /// Exactly this name
    Exact { name: String },
    /// Names starting with the prefix
    Prefix { prefix: String },
    /// Any name in the list
    OneOf { names: Vec<String> },
    /// Names the inner filter rejects
    Not { filter: Box<NameFilter> },
}

impl NameFilter {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact { name: name.into() }
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix {
            prefix: prefix.into(),
        }
    }

    pub fn one_of<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::OneOf {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn negate(self) -> Self {
        Self::Not {
            filter: Box::new(self),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact { name: expected } => name == expected,
            Self::Prefix { prefix } => name.starts_with(prefix.as_str()),
            Self::OneOf { names } => names.iter().any(|n| n == name),
            Self::Not { filter } => !filter.matches(name),
        }
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact { name } => f.write_str(name),
            Self::Prefix { prefix } => write!(f, "{prefix}*"),
            Self::OneOf { names } => write!(f, "{{{}}}", names.join("|")),
            Self::Not { filter } => write!(f, "!{filter}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matching() {
        assert!(NameFilter::Any.matches("BG_R1"));
        assert!(NameFilter::exact("SCATTER").matches("SCATTER"));
        assert!(!NameFilter::exact("SCATTER").matches("SCATTER2"));
        assert!(NameFilter::prefix("FG_").matches("FG_A_R3"));
        assert!(!NameFilter::prefix("FG_").matches("BG_R3"));
        assert!(NameFilter::one_of(["WILD", "SCATTER"]).matches("WILD"));
        assert!(NameFilter::prefix("JP_").negate().matches("HP1"));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(NameFilter::prefix("BG_").to_string(), "BG_*");
        assert_eq!(NameFilter::one_of(["A", "B"]).to_string(), "{A|B}");
        assert_eq!(NameFilter::exact("WILD").negate().to_string(), "!WILD");
    }

    #[test]
    fn test_filter_serde() {
        let filter: NameFilter =
            serde_json::from_str(r#"{"type": "prefix", "prefix": "BG_"}"#).unwrap();
        assert_eq!(filter, NameFilter::prefix("BG_"));
    }
}
