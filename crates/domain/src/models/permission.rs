//! Role capability lists.
//!
//! Roles store their capabilities as a single comma-delimited string
//! (e.g. `"vendor:read,vendor:write"`). Membership is exact per entry,
//! after trimming surrounding whitespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parsed capability list of a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions(Vec<String>);

impl Permissions {
    /// Builds a capability list from individual entries, skipping blanks.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(Into::into)
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        )
    }

    /// Parses a stored comma-delimited list.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Returns true if `permission` is one of the entries.
    pub fn contains(&self, permission: &str) -> bool {
        let permission = permission.trim();
        self.0.iter().any(|entry| entry == permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl FromStr for Permissions {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_contains() {
        let perms = Permissions::parse("vendor:read, vendor:write,booking:read");
        assert!(perms.contains("vendor:read"));
        assert!(perms.contains("vendor:write"));
        assert!(perms.contains(" booking:read "));
        assert!(!perms.contains("vendor"));
        assert!(!perms.contains("booking:write"));
    }

    #[test]
    fn test_blank_entries_skipped() {
        let perms = Permissions::parse(",, ,vendor:read,");
        assert_eq!(perms.iter().collect::<Vec<_>>(), vec!["vendor:read"]);
        assert!(Permissions::parse("").is_empty());
    }

    #[test]
    fn test_display_joins_without_spaces() {
        let perms = Permissions::new(["a", " b "]);
        assert_eq!(perms.to_string(), "a,b");
    }

    #[test]
    fn test_serde_uses_delimited_string() {
        let perms: Permissions = serde_json::from_str("\"x,y\"").unwrap();
        assert!(perms.contains("y"));
        assert_eq!(serde_json::to_string(&perms).unwrap(), "\"x,y\"");
    }
}
