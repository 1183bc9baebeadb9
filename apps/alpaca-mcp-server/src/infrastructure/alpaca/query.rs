//! Query string builder for Alpaca REST requests.

/// Ordered query parameters. Absent optionals are skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    /// Create an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter.
    #[must_use]
    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// Append a parameter when present.
    #[must_use]
    pub fn push_opt<T: ToString>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append a comma-joined list when non-empty.
    #[must_use]
    pub fn push_list(self, key: &'static str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.push(key, values.join(","))
        }
    }

    /// Get the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Borrow the key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Whether no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_optionals() {
        let query = Query::new()
            .push("a", 1)
            .push_opt::<u32>("b", None)
            .push_opt("c", Some("x"));
        assert_eq!(
            query.pairs(),
            &[("a", "1".to_string()), ("c", "x".to_string())]
        );
    }

    #[test]
    fn joins_lists() {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let query = Query::new().push_list("symbols", &symbols);
        assert_eq!(query.get("symbols"), Some("AAPL,MSFT"));
    }

    #[test]
    fn empty_list_is_skipped() {
        let query = Query::new().push_list("symbols", &[]);
        assert!(query.is_empty());
    }
}
