use std::fmt;
use std::str::FromStr;

use crate::BzrError;

/// Separator between the two endpoints of a Bazaar revision range
pub const RANGE_DELIMITER: &str = "..";

/// Revision used when a range leaves its upper endpoint open
const CURRENT_REVISION: &str = "-1";

/// A `from..to` revision range. An omitted endpoint means "ancestor" for
/// `from` and "current" for `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RevisionRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RevisionRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Everything after `from` up to the current revision
    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: None,
        }
    }

    /// Changes since the common ancestor with `branch`
    pub fn since_ancestor_of(branch: &str) -> Self {
        Self::since(format!("ancestor:{}", branch))
    }

    /// Changes since the submit branch
    pub fn since_submit() -> Self {
        Self::since("submit:")
    }

    /// The upper endpoint, or the current tip when it was left open
    pub fn to_revision(&self) -> &str {
        self.to.as_deref().unwrap_or(CURRENT_REVISION)
    }
}

impl fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.from.as_deref().unwrap_or(""),
            RANGE_DELIMITER,
            self.to.as_deref().unwrap_or("")
        )
    }
}

impl FromStr for RevisionRange {
    type Err = BzrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once(RANGE_DELIMITER)
            .filter(|(_, to)| !to.contains(RANGE_DELIMITER))
            .ok_or_else(|| BzrError::InvalidRevisionRange(s.to_string()))?;

        let endpoint = |part: &str| (!part.is_empty()).then(|| part.to_string());
        Ok(Self {
            from: endpoint(from),
            to: endpoint(to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_then_parse_keeps_endpoints() {
        let range = RevisionRange::new("123", "456");
        assert_eq!(range.to_string(), "123..456");
        assert_eq!(range.to_string().parse::<RevisionRange>().unwrap(), range);
    }

    #[test]
    fn test_open_endpoints() {
        let range: RevisionRange = "submit:..".parse().unwrap();
        assert_eq!(range.from.as_deref(), Some("submit:"));
        assert_eq!(range.to, None);
        assert_eq!(range.to_revision(), "-1");
        assert_eq!(range, RevisionRange::since_submit());

        let range: RevisionRange = "..42".parse().unwrap();
        assert_eq!(range.from, None);
        assert_eq!(range.to_revision(), "42");
        assert_eq!(range.to_string(), "..42");
    }

    #[test]
    fn test_ancestor_range() {
        let range = RevisionRange::since_ancestor_of("lp:trunk");
        assert_eq!(range.to_string(), "ancestor:lp:trunk..");
    }

    #[test]
    fn test_extra_delimiter_is_rejected() {
        let result = "1..2..3".parse::<RevisionRange>();
        assert!(matches!(result, Err(BzrError::InvalidRevisionRange(s)) if s == "1..2..3"));
    }

    #[test]
    fn test_missing_delimiter_is_rejected() {
        let result = "123".parse::<RevisionRange>();
        assert!(matches!(result, Err(BzrError::InvalidRevisionRange(s)) if s == "123"));
    }
}
