// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Lexical handling of slash-delimited paths and object keys.
//!
//! Nothing here touches storage. The resolver cleans every incoming path
//! and parses it into a [`Location`] before deciding what to list.

/// Separator shared by file paths and object keys
pub const SEPARATOR: char = '/';

/// Lexically normalize a path.
///
/// The result always starts with a separator, never ends with one (except
/// for the root itself), contains no empty or `.` segments, and has `..`
/// segments resolved without ever climbing above the root.
#[must_use]
pub fn clean(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => {
                _ = parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("{SEPARATOR}{}", parts.join("/"))
}

/// Lexical parent of a path. The root is its own parent.
#[must_use]
pub fn parent(path: &str) -> String {
    let cleaned = clean(path);
    match cleaned.rfind(SEPARATOR) {
        Some(0) | None => SEPARATOR.to_string(),
        Some(idx) => cleaned[..idx].to_string(),
    }
}

/// Final non-empty segment of a key, ignoring trailing separators
#[must_use]
pub fn basename(key: &str) -> &str {
    key.split(SEPARATOR)
        .rfind(|s| !s.is_empty())
        .unwrap_or("")
}

/// A stored key with repeated and trailing separators removed
#[must_use]
pub fn clean_key(key: &str) -> String {
    key.split(SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when a stored key denotes a directory-like prefix
#[must_use]
pub fn is_dir_key(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}

/// Where a cleaned path points in the bucket namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The storage root, listing buckets
    Root,
    /// A path with exactly one separator
    Bucket { bucket: String },
    /// Bucket plus the remaining segments joined by separators
    Key { bucket: String, key: String },
}

impl Location {
    /// Parse a path. The input is cleaned first, so callers may pass
    /// whatever the file-serving layer hands them.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let cleaned = clean(path);
        if parent(&cleaned) == cleaned {
            return Location::Root;
        }

        let mut segments = cleaned[1..].splitn(2, SEPARATOR);
        let bucket = segments.next().unwrap_or_default().to_string();
        match segments.next() {
            None => Location::Bucket { bucket },
            Some(key) => Location::Key {
                bucket,
                key: key.to_string(),
            },
        }
    }

    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        match self {
            Location::Root => None,
            Location::Bucket { bucket } | Location::Key { bucket, .. } => Some(bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("/"), "/");
        assert_eq!(clean(""), "/");
        assert_eq!(clean("assets"), "/assets");
        assert_eq!(clean("/assets/"), "/assets");
        assert_eq!(clean("//assets///img//"), "/assets/img");
        assert_eq!(clean("/assets/./img/../readme.txt"), "/assets/readme.txt");

        // Never climbs above the root
        assert_eq!(clean("/../../etc"), "/etc");
        assert_eq!(clean("/.."), "/");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("/"), "/");
        assert_eq!(parent("/assets"), "/");
        assert_eq!(parent("/assets/img/a.png"), "/assets/img");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("img/a.png"), "a.png");
        assert_eq!(basename("img/sub/"), "sub");
        assert_eq!(basename("readme.txt"), "readme.txt");
        assert_eq!(basename("/"), "");
    }

    #[test]
    fn test_clean_key() {
        assert_eq!(clean_key("img/"), "img");
        assert_eq!(clean_key("a//b/"), "a/b");
        assert_eq!(clean_key("readme.txt"), "readme.txt");
    }

    #[test]
    fn test_parse_locations() {
        assert_eq!(Location::parse("/"), Location::Root);
        assert_eq!(Location::parse("/./"), Location::Root);
        assert_eq!(
            Location::parse("/assets"),
            Location::Bucket {
                bucket: "assets".to_string()
            }
        );
        assert_eq!(
            Location::parse("/assets/img/icons"),
            Location::Key {
                bucket: "assets".to_string(),
                key: "img/icons".to_string()
            }
        );
        assert_eq!(Location::parse("/assets/img").bucket(), Some("assets"));
        assert_eq!(Location::Root.bucket(), None);
    }
}
