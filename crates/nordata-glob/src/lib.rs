//! Wildcard key matching over a flat object namespace.
//!
//! Object stores have no real directories: a key such as `tmp/a.csv` is one
//! opaque string. This crate emulates a shell-style wildcard on top of that
//! namespace so callers can say `tmp/*.csv` and get back the concrete keys.
//!
//! # Matching rule
//!
//! A [`KeyPattern`] holds exactly one `*`. The pattern is split at the marker
//! into a literal `left` and a literal `right`. A candidate key matches when:
//!
//! 1. it does not end in `/` (directory placeholders never match),
//! 2. it starts with `left`, and
//! 3. the remainder after `left` contains `right` as a substring.
//!
//! Rule 3 is a substring test, not a suffix test: `*.csv` also matches
//! `data.csvx`.
//!
//! Candidates are listed server-side under [`KeyPattern::listing_prefix`], the
//! literal directory portion of `left`, and results keep the listing order.

pub mod error;
pub mod path;
pub mod pattern;

pub use error::PatternError;
pub use path::{file_name, has_wildcard, is_placeholder, join_key, SEPARATOR, WILDCARD};
pub use pattern::{match_keys, KeyPattern};
