use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt, ops::Deref};

/// The label used for records which don't carry a severity.
pub const UNKNOWN: &str = "UNKNOWN";

/// A normalized severity label.
///
/// Scanners don't agree on the spelling of severities, so labels are free-form. The only
/// guarantee is that the inner value is trimmed, upper-cased and never empty. An empty label
/// becomes [`UNKNOWN`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Severity(String);

impl Severity {
    /// Normalize a raw severity label.
    ///
    /// Normalizing an already normalized label returns the same label.
    pub fn normalize(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            Self::unknown()
        } else {
            Self(label.to_uppercase())
        }
    }

    /// Normalize an optional label, a missing label is [`UNKNOWN`].
    pub fn from_optional(label: Option<&str>) -> Self {
        label.map(Self::normalize).unwrap_or_else(Self::unknown)
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self::normalize(&value)
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.0
    }
}

impl Deref for Severity {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for Severity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Severity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[rstest]
    #[case("CRITICAL", "CRITICAL")]
    #[case("Critical", "CRITICAL")]
    #[case("high", "HIGH")]
    #[case("  medium\t", "MEDIUM")]
    #[case("", "UNKNOWN")]
    #[case("   ", "UNKNOWN")]
    #[case("unknown", "UNKNOWN")]
    #[case("Negligible", "NEGLIGIBLE")]
    fn normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Severity::normalize(input).as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" Critical ")]
    #[case("moderate")]
    #[case("straße")]
    fn normalize_is_idempotent(#[case] input: &str) {
        let once = Severity::normalize(input);
        let twice = Severity::normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn missing_label_is_unknown() {
        assert!(Severity::from_optional(None).is_unknown());
        assert!(Severity::from_optional(Some(" ")).is_unknown());
        assert!(!Severity::from_optional(Some("low")).is_unknown());
    }

    #[test]
    fn lookup_by_str() {
        let map = BTreeMap::from([(Severity::normalize("high"), 2usize)]);
        assert_eq!(map.get("HIGH"), Some(&2));
        assert_eq!(map.get("high"), None);
    }

    #[test]
    fn serde_normalizes() -> anyhow::Result<()> {
        let severity: Severity = serde_json::from_str(r#"" low ""#)?;
        assert_eq!(severity.as_str(), "LOW");
        assert_eq!(serde_json::to_string(&severity)?, r#""LOW""#);
        Ok(())
    }
}
