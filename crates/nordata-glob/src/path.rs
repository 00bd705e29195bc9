//! Helpers for `/`-separated keys.

/// The namespace separator used by object keys and store paths.
pub const SEPARATOR: char = '/';

/// The wildcard marker: zero or more arbitrary characters.
pub const WILDCARD: char = '*';

/// Returns `true` if `path` contains a wildcard marker.
pub fn has_wildcard(path: &str) -> bool {
    path.contains(WILDCARD)
}

/// Returns `true` if `key` is a directory placeholder (ends in `/`).
///
/// ```
/// use nordata_glob::is_placeholder;
///
/// assert!(is_placeholder("tmp/sub/"));
/// assert!(!is_placeholder("tmp/sub/a.csv"));
/// ```
pub fn is_placeholder(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}

/// The final path component of `key`: everything after the last `/`.
///
/// ```
/// use nordata_glob::file_name;
///
/// assert_eq!(file_name("tmp/sub/a.csv"), "a.csv");
/// assert_eq!(file_name("a.csv"), "a.csv");
/// ```
pub fn file_name(key: &str) -> &str {
    match key.rfind(SEPARATOR) {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// Append `name` to the directory `base`.
///
/// A separator is inserted only when `base` is non-empty and does not
/// already end in one.
pub fn join_key(base: &str, name: &str) -> String {
    if base.is_empty() || base.ends_with(SEPARATOR) {
        format!("{base}{name}")
    } else {
        format!("{base}{SEPARATOR}{name}")
    }
}
