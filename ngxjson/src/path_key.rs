//! Dot-separated resource keys.
//!
//! A [`PathKey`] is the name of a resource in the flat table (`home.title`)
//! and, at the same time, the path of a leaf in the nested JSON document
//! (`{"home": {"title": ...}}`). There is no escaping: a segment can never
//! contain the separator.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Separator between the segments of a key.
pub const SEPARATOR: char = '.';

/// An ordered, non-empty sequence of non-empty segments.
///
/// Equality and ordering are segment-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathKey {
    segments: Vec<String>,
}

impl PathKey {
    /// Parses a dotted key.
    ///
    /// # Example
    /// ```rust
    /// use ngxjson::PathKey;
    /// let key = PathKey::parse("home.title")?;
    /// assert_eq!(key.segments(), ["home", "title"]);
    /// assert!(PathKey::parse("home..title").is_err());
    /// # Ok::<(), ngxjson::Error>(())
    /// ```
    pub fn parse(key: &str) -> Result<Self, Error> {
        Self::from_segments(split(key))
    }

    /// Builds a key from already separated segments.
    ///
    /// Fails when there are no segments, when a segment is empty, or when a
    /// segment contains the separator.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::invalid_key("", "a key needs at least one segment"));
        }
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || s.contains(SEPARATOR))
        {
            let reason = if bad.is_empty() {
                "empty segment".to_string()
            } else {
                format!("segment `{}` contains the separator", bad)
            };
            return Err(Error::invalid_key(join(&segments), reason));
        }
        Ok(PathKey { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_single_segment(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// The first `len` segments as a key of their own.
    ///
    /// `len` is clamped to `1..=self.len()`.
    pub fn prefix(&self, len: usize) -> PathKey {
        let len = len.clamp(1, self.segments.len());
        PathKey {
            segments: self.segments[..len].to_vec(),
        }
    }

    /// The dotted form of the key.
    pub fn join(&self) -> String {
        join(&self.segments)
    }
}

/// Splits a dotted key into its segments.
///
/// A key without separator yields a single segment. Malformed keys may yield
/// empty segments; [`PathKey::parse`] rejects those.
pub fn split(key: &str) -> Vec<String> {
    key.split(SEPARATOR).map(str::to_string).collect()
}

/// Joins segments with the separator.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

impl Display for PathKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.join())
    }
}

impl FromStr for PathKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathKey::parse(s)
    }
}

impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.join())
    }
}

impl<'de> Deserialize<'de> for PathKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PathKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_segment() {
        assert_eq!(split("footer"), vec!["footer"]);
    }

    #[test]
    fn test_split_and_join_are_inverse() {
        let segments = split("home.header.title");
        assert_eq!(segments, vec!["home", "header", "title"]);
        assert_eq!(join(&segments), "home.header.title");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for key in ["", ".a", "a.", "a..b"] {
            let err = PathKey::parse(key).unwrap_err();
            assert!(
                matches!(err, Error::InvalidKey { .. }),
                "expected invalid key for {:?}",
                key
            );
        }
    }

    #[test]
    fn test_from_segments_rejects_separator_inside_segment() {
        let err = PathKey::from_segments(["a", "b.c"]).unwrap_err();
        assert!(err.to_string().contains("contains the separator"));
    }

    #[test]
    fn test_from_segments_rejects_no_segments() {
        assert!(PathKey::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_accessors() {
        let key = PathKey::parse("a.b.c").unwrap();
        assert_eq!(key.len(), 3);
        assert!(!key.is_empty());
        assert!(!key.is_single_segment());
        assert_eq!(key.first(), "a");
        assert_eq!(key.last(), "c");
        assert_eq!(key.prefix(2).join(), "a.b");
        assert_eq!(key.prefix(0).join(), "a");
        assert_eq!(key.prefix(10).join(), "a.b.c");
    }

    #[test]
    fn test_ordering_is_segment_wise() {
        // Plain string order would put "a.b" after "a-b" ('.' > '-'); segment
        // order compares "a" with "a-b" first.
        let dotted = PathKey::parse("a.b").unwrap();
        let dashed = PathKey::parse("a-b").unwrap();
        assert!(dotted < dashed);
        assert!("a.b" > "a-b");
    }

    #[test]
    fn test_serde_uses_dotted_string() {
        let key = PathKey::parse("home.title").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"home.title\"");
        let back: PathKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<PathKey>("\"a..b\"").is_err());
    }
}
