//! Run targets.

use std::fmt;

/// Protocol + host + port identity of the service under test.
///
/// Used as the debounce key and as the prefix for every polled URL. No
/// structural validation happens beyond the parts being present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn new(proto: &str, host: &str, port: &str) -> Self {
        Self(format!("{}://{}:{}", proto, host, port))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full URL for one path of the list.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_format() {
        let target = Target::new("http", "example.com", "80");
        assert_eq!(target.as_str(), "http://example.com:80");
        assert_eq!(target.url_for("/v3/health"), "http://example.com:80/v3/health");
    }

    #[test]
    fn test_targets_differ_by_port() {
        assert_ne!(
            Target::new("http", "example.com", "80"),
            Target::new("http", "example.com", "8080")
        );
    }
}
