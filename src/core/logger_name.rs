//! Dotted logger names and their ancestor chain

use super::error::{LoggerError, Result};
use std::fmt;

/// A non-empty, dot-delimited logger name such as `TwitchLib.Api.Helix`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoggerName(String);

impl LoggerName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LoggerError::invalid_name(name, "logger name is empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with the last `.segment` removed, `None` for a single segment
    pub fn parent(&self) -> Option<&str> {
        shorten(&self.0)
    }

    /// Ancestor names, nearest first. Empty prefixes are skipped.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            current: Some(self.0.as_str()),
        }
    }

    /// `"{self}.{label}"`
    pub fn child(&self, label: &str) -> Result<LoggerName> {
        if label.is_empty() {
            return Err(LoggerError::invalid_name(
                format!("{}.", self.0),
                "child label is empty",
            ));
        }
        Ok(Self(format!("{}.{}", self.0, label)))
    }
}

fn shorten(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[..idx])
}

/// Iterator returned by [`LoggerName::ancestors`]
pub struct Ancestors<'a> {
    current: Option<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let next = shorten(self.current?);
            self.current = next;
            match next {
                Some(name) if !name.is_empty() => return Some(name),
                Some(_) => continue,
                None => return None,
            }
        }
    }
}

impl fmt::Display for LoggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LoggerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for LoggerName {
    type Error = LoggerError;

    fn try_from(value: &str) -> Result<Self> {
        LoggerName::new(value)
    }
}

impl TryFrom<String> for LoggerName {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        LoggerName::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert!(LoggerName::new("").is_err());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let name = LoggerName::new("TwitchLib.Api.Helix.Streams").unwrap();
        let ancestors: Vec<&str> = name.ancestors().collect();
        assert_eq!(ancestors, vec!["TwitchLib.Api.Helix", "TwitchLib.Api", "TwitchLib"]);
    }

    #[test]
    fn test_single_segment_has_no_ancestors() {
        let name = LoggerName::new("Root").unwrap();
        assert_eq!(name.parent(), None);
        assert_eq!(name.ancestors().count(), 0);
    }

    #[test]
    fn test_leading_dot_skips_empty_prefix() {
        let name = LoggerName::new(".Hidden.Child").unwrap();
        let ancestors: Vec<&str> = name.ancestors().collect();
        assert_eq!(ancestors, vec![".Hidden"]);
    }

    #[test]
    fn test_child_name() {
        let root = LoggerName::new("Root").unwrap();
        assert_eq!(root.child("Sub").unwrap().as_str(), "Root.Sub");
        assert!(root.child("").is_err());
    }
}
