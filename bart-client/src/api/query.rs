//! Query-string assembly.
//!
//! Every request carries `cmd` and `key` first and `json=y` last. Optional
//! parameters that are `None` are left out entirely.

use std::fmt::Display;

use super::endpoint::Command;

/// An ordered list of query parameters for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    /// Start a query for `command`, authenticated with `key`.
    pub fn new(command: Command, key: &str) -> Self {
        Self {
            pairs: vec![("cmd", command.as_str().to_string()), ("key", key.to_string())],
        }
    }

    /// Add a parameter.
    pub fn push(mut self, name: &'static str, value: impl Display) -> Self {
        self.pairs.push((name, value.to_string()));
        self
    }

    /// Add a parameter only if it has a value.
    pub fn push_opt<V: Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    /// Request a JSON response. Must be the last parameter added.
    pub fn finish(self) -> Self {
        self.push("json", "y")
    }

    /// Value of the first parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `cmd` value.
    pub fn command(&self) -> &str {
        self.get("cmd").unwrap_or_default()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// A copy of this query with every `name` parameter removed.
    pub fn without(&self, name: &str) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(n, _)| *n != name)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_and_key_come_first() {
        let query = Query::new(Command::Etd, "KEY").push("orig", "RICH").finish();
        assert_eq!(
            query.pairs(),
            &[
                ("cmd", "etd".to_string()),
                ("key", "KEY".to_string()),
                ("orig", "RICH".to_string()),
                ("json", "y".to_string()),
            ]
        );
        assert_eq!(query.command(), "etd");
        assert_eq!(query.get("key"), Some("KEY"));
    }

    #[test]
    fn none_is_omitted() {
        let query = Query::new(Command::Routes, "KEY")
            .push_opt("sched", None::<u32>)
            .push_opt("date", Some("today"))
            .finish();

        assert_eq!(query.get("sched"), None);
        assert_eq!(query.get("date"), Some("today"));
        assert!(query.pairs().iter().all(|(_, v)| v != "None"));
    }

    #[test]
    fn without_removes_parameter() {
        let query = Query::new(Command::Arrive, "KEY").push("orig", "ASHB").finish();
        let stripped = query.without("cmd");
        assert_eq!(stripped.get("cmd"), None);
        assert_eq!(stripped.get("orig"), Some("ASHB"));
        assert_eq!(stripped.pairs().len(), query.pairs().len() - 1);
    }
}
