use crate::error::PatternError;
use crate::path::{is_placeholder, SEPARATOR, WILDCARD};

/// A key pattern with exactly one wildcard marker.
///
/// The `(left, right)` split and the listing prefix are derived once at
/// parse time and reused for every candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPattern {
    raw: String,
    left: String,
    right: String,
    prefix: String,
}

impl KeyPattern {
    /// Parse a pattern such as `tmp/*.csv`.
    ///
    /// Fails with [`PatternError::NoWildcard`] if the pattern is a literal key
    /// and [`PatternError::MultipleWildcards`] if it has more than one `*`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some((left, right)) = pattern.split_once(WILDCARD) else {
            return Err(PatternError::NoWildcard(pattern.to_string()));
        };
        if right.contains(WILDCARD) {
            return Err(PatternError::MultipleWildcards {
                pattern: pattern.to_string(),
                count: pattern.matches(WILDCARD).count(),
            });
        }

        // Only the literal directory part of `left` may go to the server.
        let prefix = match left.rfind(SEPARATOR) {
            Some(idx) => &left[..=idx],
            None => "",
        };

        Ok(Self {
            raw: pattern.to_string(),
            left: left.to_string(),
            right: right.to_string(),
            prefix: prefix.to_string(),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Literal text before the wildcard.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Literal text after the wildcard.
    pub fn right(&self) -> &str {
        &self.right
    }

    /// Prefix to hand to a server-side key listing.
    ///
    /// This is `left` up to and including its last `/`, or the empty string
    /// (full namespace scan) when `left` has no separator.
    pub fn listing_prefix(&self) -> &str {
        &self.prefix
    }

    /// Test one candidate key.
    pub fn matches(&self, key: &str) -> bool {
        if is_placeholder(key) {
            return false;
        }
        key.strip_prefix(self.left.as_str())
            .is_some_and(|rest| rest.contains(self.right.as_str()))
    }

    /// Keep the candidates that match, in their original order.
    pub fn filter<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + Into<String>,
    {
        candidates
            .into_iter()
            .filter(|key| self.matches(key.as_ref()))
            .map(Into::into)
            .collect()
    }
}

impl std::fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Match a lazily produced sequence of candidate keys against `pattern`.
///
/// The result follows the candidate order and is empty (not an error) when
/// nothing matches.
///
/// ```
/// use nordata_glob::{match_keys, KeyPattern};
///
/// let pattern = KeyPattern::parse("tmp/*.csv").unwrap();
/// let keys = match_keys(&pattern, ["tmp/a.csv", "tmp/b.txt", "tmp/sub/"]);
/// assert_eq!(keys, vec!["tmp/a.csv".to_string()]);
/// ```
pub fn match_keys<I, S>(pattern: &KeyPattern, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str> + Into<String>,
{
    pattern.filter(candidates)
}
