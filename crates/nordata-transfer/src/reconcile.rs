//! Turning user-supplied source/destination arguments into aligned pairs.
//!
//! Validation runs in a fixed order and fails before any listing call:
//!
//! 1. each argument is a string or a list of strings (loosely typed entry
//!    points only; [`PathSpec`] enforces this by construction),
//! 2. both arguments have the same shape,
//! 3. for lists: no element holds a wildcard, and the lengths agree.
//!
//! Only a single source path may carry a wildcard. It is expanded through a
//! [`KeySource`], and each match is sent to `destination/<file name>`.

use nordata_glob::{file_name, has_wildcard, join_key, KeyPattern};
use serde_json::Value;
use tracing::debug;

use crate::error::{TransferError, TransferResult};
use crate::path_spec::{PathSpec, Shape};
use crate::source::KeySource;

/// One `(source, destination)` transfer, consumed immediately by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPair {
    pub source: String,
    pub destination: String,
}

impl TransferPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl<S: Into<String>, D: Into<String>> From<(S, D)> for TransferPair {
    fn from((source, destination): (S, D)) -> Self {
        Self::new(source, destination)
    }
}

/// How a single source path containing `*` is treated.
#[derive(Clone, Copy)]
pub enum Expansion<'a> {
    /// Take the path literally.
    Literal,
    /// Expand the wildcard against this key source.
    Glob(&'a dyn KeySource),
}

impl std::fmt::Debug for Expansion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => f.write_str("Literal"),
            Self::Glob(_) => f.write_str("Glob(..)"),
        }
    }
}

/// Check shape, list wildcards and list lengths. Performs no I/O.
pub fn validate(source: &PathSpec, destination: &PathSpec) -> TransferResult<()> {
    match (source, destination) {
        (PathSpec::Single(_), PathSpec::Single(_)) => Ok(()),
        (PathSpec::Many(sources), PathSpec::Many(destinations)) => {
            reject_list_wildcards(sources.iter().chain(destinations))?;
            if sources.len() != destinations.len() {
                return Err(TransferError::LengthMismatch {
                    source_len: sources.len(),
                    destination_len: destinations.len(),
                });
            }
            Ok(())
        }
        _ => Err(TransferError::ShapeMismatch {
            source_kind: source.kind(),
            destination_kind: destination.kind(),
        }),
    }
}

/// Check a delete-style argument. Performs no I/O.
pub fn validate_delete(keys: &PathSpec) -> TransferResult<()> {
    match keys {
        PathSpec::Single(_) => Ok(()),
        PathSpec::Many(keys) => reject_list_wildcards(keys),
    }
}

fn reject_list_wildcards<'a, I>(paths: I) -> TransferResult<()>
where
    I: IntoIterator<Item = &'a String>,
{
    match paths.into_iter().find(|p| has_wildcard(p)) {
        Some(path) => Err(TransferError::WildcardNotAllowedInList(path.clone())),
        None => Ok(()),
    }
}

/// Validate the arguments and produce order-aligned transfer pairs.
///
/// Lists pair up element by element. A single source with a wildcard is
/// expanded when `expansion` allows it; an empty expansion yields no pairs
/// and no error.
pub fn reconcile(
    source: &PathSpec,
    destination: &PathSpec,
    expansion: Expansion<'_>,
) -> TransferResult<Vec<TransferPair>> {
    validate(source, destination)?;

    match (source, destination) {
        (PathSpec::Many(sources), PathSpec::Many(destinations)) => Ok(sources
            .iter()
            .zip(destinations)
            .map(|(s, d)| TransferPair::new(s.as_str(), d.as_str()))
            .collect()),
        (PathSpec::Single(source), PathSpec::Single(destination)) => match expansion {
            Expansion::Glob(keys) if has_wildcard(source) => {
                let pattern = KeyPattern::parse(source)?;
                Ok(expand(&pattern, keys)?
                    .into_iter()
                    .map(|matched| {
                        let target = join_key(destination, file_name(&matched));
                        TransferPair::new(matched, target)
                    })
                    .collect())
            }
            _ => Ok(vec![TransferPair::new(source.as_str(), destination.as_str())]),
        },
        _ => Err(TransferError::ShapeMismatch {
            source_kind: source.kind(),
            destination_kind: destination.kind(),
        }),
    }
}

/// Validate a delete-style argument and produce the keys to delete.
pub fn reconcile_delete(keys: &PathSpec, expansion: Expansion<'_>) -> TransferResult<Vec<String>> {
    validate_delete(keys)?;

    match (keys, expansion) {
        (PathSpec::Single(key), Expansion::Glob(source)) if has_wildcard(key) => {
            let pattern = KeyPattern::parse(key)?;
            expand(&pattern, source)
        }
        _ => Ok(keys.paths().to_vec()),
    }
}

/// [`reconcile`] for loosely typed arguments.
///
/// Rule 1 and rule 2 are checked on the raw values before element types, so
/// `([1], "x")` is a shape mismatch and `(1, "x")` a type error.
pub fn reconcile_values(
    source: &Value,
    destination: &Value,
    expansion: Expansion<'_>,
) -> TransferResult<Vec<TransferPair>> {
    let source_shape = Shape::of(source, "source")?;
    let destination_shape = Shape::of(destination, "destination")?;
    if source_shape != destination_shape {
        return Err(TransferError::ShapeMismatch {
            source_kind: source_shape.describe(),
            destination_kind: destination_shape.describe(),
        });
    }
    let source = PathSpec::from_value_as(source, "source")?;
    let destination = PathSpec::from_value_as(destination, "destination")?;
    reconcile(&source, &destination, expansion)
}

/// [`reconcile_delete`] for a loosely typed argument.
pub fn reconcile_delete_value(keys: &Value, expansion: Expansion<'_>) -> TransferResult<Vec<String>> {
    let keys = PathSpec::from_value_as(keys, "key")?;
    reconcile_delete(&keys, expansion)
}

fn expand(pattern: &KeyPattern, keys: &dyn KeySource) -> TransferResult<Vec<String>> {
    let candidates = keys.list_keys(pattern.listing_prefix())?;
    let matched = pattern.filter(candidates);
    debug!(
        pattern = %pattern,
        prefix = pattern.listing_prefix(),
        matched = matched.len(),
        "expanded wildcard"
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::cell::Cell;

    /// Fixed key listing that counts how often it is asked.
    struct Listing {
        keys: Vec<&'static str>,
        calls: Cell<usize>,
        last_prefix: std::cell::RefCell<String>,
    }

    impl Listing {
        fn new(keys: &[&'static str]) -> Self {
            Self {
                keys: keys.to_vec(),
                calls: Cell::new(0),
                last_prefix: Default::default(),
            }
        }
    }

    impl KeySource for Listing {
        fn list_keys(&self, prefix: &str) -> TransferResult<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prefix.borrow_mut() = prefix.to_string();
            Ok(self
                .keys
                .iter()
                .filter(|k| k.starts_with(prefix))
                .map(|k| k.to_string())
                .collect())
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<TransferPair> {
        items.iter().map(|&(s, d)| TransferPair::new(s, d)).collect()
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    #[test]
    fn lists_pair_in_order() {
        let got = reconcile(
            &PathSpec::many(["a.txt", "b.txt"]),
            &PathSpec::many(["x/a.txt", "x/b.txt"]),
            Expansion::Literal,
        )
        .unwrap();
        assert_eq!(got, pairs(&[("a.txt", "x/a.txt"), ("b.txt", "x/b.txt")]));
    }

    #[test]
    fn empty_lists_give_no_pairs() {
        let got = reconcile(&PathSpec::Many(vec![]), &PathSpec::Many(vec![]), Expansion::Literal).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn shape_mismatch() {
        let err = reconcile(&PathSpec::many(["a.txt"]), &PathSpec::single("x/"), Expansion::Literal)
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::ShapeMismatch { source_kind: "list of paths", destination_kind: "single path" }
        ));
        let err = reconcile(&PathSpec::single("a"), &PathSpec::many(["b"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::ShapeMismatch { .. }));
    }

    #[test]
    fn wildcard_in_source_list() {
        let err = reconcile(&PathSpec::many(["a*.txt"]), &PathSpec::many(["x/a.txt"]), Expansion::Literal)
            .unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(p) if p == "a*.txt"));
    }

    #[test]
    fn wildcard_in_destination_list() {
        let err = reconcile(&PathSpec::many(["foo"]), &PathSpec::many(["b*"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(p) if p == "b*"));
    }

    #[test]
    fn wildcard_checked_before_length() {
        let err = reconcile(
            &PathSpec::many(["f*", "g"]),
            &PathSpec::many(["bar"]),
            Expansion::Literal,
        )
        .unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(_)));
    }

    #[test]
    fn length_mismatch() {
        let err = reconcile(
            &PathSpec::many(["foo", "bar"]),
            &PathSpec::many(["baz"]),
            Expansion::Literal,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TransferError::LengthMismatch { source_len: 2, destination_len: 1 }
        ));
    }

    // -----------------------------------------------------------------------
    // Single paths
    // -----------------------------------------------------------------------

    #[test]
    fn single_literal_is_one_pair() {
        let listing = Listing::new(&["tmp/a.csv"]);
        let got = reconcile(
            &PathSpec::single("tmp/a.csv"),
            &PathSpec::single("../data/a.csv"),
            Expansion::Glob(&listing),
        )
        .unwrap();
        assert_eq!(got, pairs(&[("tmp/a.csv", "../data/a.csv")]));
        assert_eq!(listing.calls.get(), 0);
    }

    #[test]
    fn single_wildcard_expands_against_source() {
        let listing = Listing::new(&["tmp/a.csv", "tmp/b.txt", "tmp/c.csv", "tmp/sub/", "other/d.csv"]);
        let got = reconcile(
            &PathSpec::single("tmp/*.csv"),
            &PathSpec::single("../data"),
            Expansion::Glob(&listing),
        )
        .unwrap();
        assert_eq!(
            got,
            pairs(&[("tmp/a.csv", "../data/a.csv"), ("tmp/c.csv", "../data/c.csv")])
        );
        assert_eq!(listing.calls.get(), 1);
        assert_eq!(*listing.last_prefix.borrow(), "tmp/");
    }

    #[test]
    fn nested_matches_flatten_to_file_name() {
        let listing = Listing::new(&["tmp/sub/x.csv"]);
        let got = reconcile(
            &PathSpec::single("tmp/*"),
            &PathSpec::single("local/"),
            Expansion::Glob(&listing),
        )
        .unwrap();
        assert_eq!(got, pairs(&[("tmp/sub/x.csv", "local/x.csv")]));
    }

    #[test]
    fn wildcard_with_no_matches_is_empty() {
        let listing = Listing::new(&["elsewhere/a"]);
        let got = reconcile(
            &PathSpec::single("tmp/*"),
            &PathSpec::single("local/"),
            Expansion::Glob(&listing),
        )
        .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn literal_expansion_keeps_wildcard_verbatim() {
        let got = reconcile(&PathSpec::single("a*b"), &PathSpec::single("c"), Expansion::Literal).unwrap();
        assert_eq!(got, pairs(&[("a*b", "c")]));
    }

    #[test]
    fn multiple_wildcards_rejected_before_listing() {
        let listing = Listing::new(&["tmp/a/b.csv"]);
        let err = reconcile(
            &PathSpec::single("tmp/*/*.csv"),
            &PathSpec::single("out/"),
            Expansion::Glob(&listing),
        )
        .unwrap_err();
        assert!(matches!(err, TransferError::Pattern(_)));
        assert!(err.is_validation());
        assert_eq!(listing.calls.get(), 0);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_list_passes_through() {
        let keys = reconcile_delete(&PathSpec::many(["a", "b"]), Expansion::Literal).unwrap();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn delete_rejects_wildcard_in_list() {
        let err = reconcile_delete(&PathSpec::many(["*"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(_)));
    }

    #[test]
    fn delete_wildcard_expands() {
        let listing = Listing::new(&["tmp/a.csv", "tmp/b.txt", "tmp/"]);
        let keys = reconcile_delete(&PathSpec::single("tmp/*"), Expansion::Glob(&listing)).unwrap();
        assert_eq!(keys, vec!["tmp/a.csv", "tmp/b.txt"]);
    }

    #[test]
    fn delete_wildcard_without_matches_is_empty() {
        let listing = Listing::new(&[]);
        let keys = reconcile_delete(&PathSpec::single("tmp/*.csv"), Expansion::Glob(&listing)).unwrap();
        assert!(keys.is_empty());
    }

    // -----------------------------------------------------------------------
    // Loosely typed arguments
    // -----------------------------------------------------------------------

    #[test]
    fn value_type_errors() {
        let cases = [
            (json!(1), json!("foo")),
            (json!("foo"), json!(1)),
            (json!(1), json!(["foo"])),
            (json!(["foo"]), json!(1)),
            (json!(["foo", 2]), json!(["a", "b"])),
            (json!(["foo"]), json!([null])),
        ];
        for (source, destination) in cases {
            let listing = Listing::new(&["foo"]);
            let err = reconcile_values(&source, &destination, Expansion::Glob(&listing)).unwrap_err();
            assert!(
                matches!(err, TransferError::InvalidArgumentType(_)),
                "({source}, {destination}) gave {err:?}"
            );
            assert_eq!(listing.calls.get(), 0);
        }
    }

    #[test]
    fn value_shape_errors() {
        let cases = [
            (json!(["foo"]), json!("bar")),
            (json!("foo"), json!(["bar"])),
            (json!([1]), json!("foo")),
            (json!("foo"), json!([1])),
        ];
        for (source, destination) in cases {
            let err = reconcile_values(&source, &destination, Expansion::Literal).unwrap_err();
            assert!(
                matches!(err, TransferError::ShapeMismatch { .. }),
                "({source}, {destination}) gave {err:?}"
            );
        }
    }

    #[test]
    fn value_list_errors() {
        let err = reconcile_values(&json!(["f*"]), &json!(["bar"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(_)));
        let err = reconcile_values(&json!(["foo"]), &json!(["bar", "baz"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::LengthMismatch { .. }));
    }

    #[test]
    fn value_delete_errors() {
        for value in [json!(1), json!([1])] {
            let err = reconcile_delete_value(&value, Expansion::Literal).unwrap_err();
            assert!(matches!(err, TransferError::InvalidArgumentType(_)));
        }
        let err = reconcile_delete_value(&json!(["*"]), Expansion::Literal).unwrap_err();
        assert!(matches!(err, TransferError::WildcardNotAllowedInList(_)));
    }

    #[test]
    fn value_happy_path() {
        let got = reconcile_values(&json!(["a.txt", "b.txt"]), &json!(["x/a.txt", "x/b.txt"]), Expansion::Literal)
            .unwrap();
        assert_eq!(got, pairs(&[("a.txt", "x/a.txt"), ("b.txt", "x/b.txt")]));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn equal_lists_pair_one_to_one(
            items in proptest::collection::vec(("[a-z/.]{1,8}", "[a-z/.]{1,8}"), 0..16),
        ) {
            let (sources, destinations): (Vec<String>, Vec<String>) = items.iter().cloned().unzip();
            let got = reconcile(
                &PathSpec::Many(sources.clone()),
                &PathSpec::Many(destinations.clone()),
                Expansion::Literal,
            ).unwrap();
            prop_assert_eq!(got.len(), sources.len());
            for (i, pair) in got.iter().enumerate() {
                prop_assert_eq!(&pair.source, &sources[i]);
                prop_assert_eq!(&pair.destination, &destinations[i]);
            }
        }

        #[test]
        fn unequal_lists_never_list(
            sources in proptest::collection::vec("[a-z]{1,4}", 0..6),
            destinations in proptest::collection::vec("[a-z]{1,4}", 0..6),
        ) {
            prop_assume!(sources.len() != destinations.len());
            let listing = Listing::new(&["a"]);
            let err = reconcile(
                &PathSpec::Many(sources),
                &PathSpec::Many(destinations),
                Expansion::Glob(&listing),
            ).unwrap_err();
            prop_assert!(
                matches!(err, TransferError::LengthMismatch { .. }),
                "expected LengthMismatch, got {:?}",
                err
            );
            prop_assert_eq!(listing.calls.get(), 0);
        }
    }
}
