// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Entry descriptors: file-info views over listing records.
//!
//! An [`Entry`] borrows the bucket or object record it describes, so a
//! `read_dir` result lives no longer than the handle that produced it.

use crate::client::{BucketInfo, ObjectInfo};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Unix-style mode bits. Only owner read/write and the directory bit are
/// ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    pub const DIR: u32 = 0o040_000;
    pub const OWNER_RW: u32 = 0o600;

    #[must_use]
    pub const fn file() -> Self {
        Self(Self::OWNER_RW)
    }

    #[must_use]
    pub const fn dir() -> Self {
        Self(Self::DIR | Self::OWNER_RW)
    }

    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn permissions(&self) -> u32 {
        self.0 & 0o777
    }

    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.0 & Self::DIR != 0
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_dir() { 'd' } else { '-' };
        let mut rendered = String::with_capacity(10);
        rendered.push(kind);
        for shift in [6, 3, 0] {
            let bits = (self.0 >> shift) & 0o7;
            rendered.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            rendered.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            rendered.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&rendered)
    }
}

/// Placeholder for an OS-level stat block, which object storage cannot supply
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SysStat {
    pub dev: u64,
    pub ino: u64,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
}

/// The one placeholder every entry reports
pub static DEFAULT_STAT: SysStat = SysStat {
    dev: 0,
    ino: 0,
    nlink: 0,
    uid: 0,
    gid: 0,
};

/// The listing record an entry describes
#[derive(Debug, Clone, PartialEq)]
enum Record<'a> {
    Bucket(&'a BucketInfo),
    Object(Cow<'a, ObjectInfo>),
    /// A directory with no record of its own (the root, a bucket or a prefix being stat'ed)
    Synthetic,
}

/// File-info for one listing item or one stat result
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    name: Cow<'a, str>,
    is_dir: bool,
    record: Record<'a>,
    observed_at: DateTime<Utc>,
}

impl<'a> Entry<'a> {
    /// A bucket in the root listing
    #[must_use]
    pub fn for_bucket(bucket: &'a BucketInfo) -> Self {
        Self {
            name: Cow::Borrowed(bucket.name.as_str()),
            is_dir: true,
            record: Record::Bucket(bucket),
            observed_at: Utc::now(),
        }
    }

    /// An object or common prefix, shown under `name`
    #[must_use]
    pub fn for_object<N: Into<Cow<'a, str>>>(name: N, object: &'a ObjectInfo) -> Self {
        Self {
            name: name.into(),
            is_dir: crate::path::is_dir_key(&object.key),
            record: Record::Object(Cow::Borrowed(object)),
            observed_at: Utc::now(),
        }
    }

    /// A directory-like node that has no listing record
    #[must_use]
    pub fn synthetic_dir<N: Into<Cow<'a, str>>>(name: N) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            record: Record::Synthetic,
            observed_at: Utc::now(),
        }
    }
}

impl Entry<'static> {
    /// Stat result of an open object
    #[must_use]
    pub fn for_stat(name: String, object: ObjectInfo) -> Self {
        Self {
            name: Cow::Owned(name),
            is_dir: false,
            record: Record::Object(Cow::Owned(object)),
            observed_at: Utc::now(),
        }
    }
}

impl Entry<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Object size in bytes, 0 for anything directory-like
    #[must_use]
    pub fn size(&self) -> u64 {
        match &self.record {
            Record::Object(object) if !self.is_dir => object.size,
            _ => 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> FileMode {
        if self.is_dir {
            FileMode::dir()
        } else {
            FileMode::file()
        }
    }

    /// Last-modified time of objects. Buckets and prefixes have none, so
    /// they report the time the entry was produced.
    #[must_use]
    pub fn mod_time(&self) -> DateTime<Utc> {
        match &self.record {
            Record::Object(object) if !self.is_dir => {
                object.last_modified.unwrap_or(self.observed_at)
            }
            _ => self.observed_at,
        }
    }

    #[must_use]
    pub fn sys(&self) -> &'static SysStat {
        &DEFAULT_STAT
    }

    /// The bucket record behind a root listing entry
    #[must_use]
    pub fn bucket(&self) -> Option<&BucketInfo> {
        match &self.record {
            Record::Bucket(bucket) => Some(bucket),
            _ => None,
        }
    }

    /// The object record behind a bucket/directory listing or stat entry
    #[must_use]
    pub fn object(&self) -> Option<&ObjectInfo> {
        match &self.record {
            Record::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }

    /// Same name, type, size and mode. Timestamps of synthetic
    /// directories are ignored since they are taken at creation.
    #[must_use]
    pub fn same_file(&self, other: &Entry<'_>) -> bool {
        self.name() == other.name()
            && self.is_dir() == other.is_dir()
            && self.size() == other.size()
            && self.mode() == other.mode()
            && (self.is_dir || self.mod_time() == other.mod_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn object(key: &str, size: u64) -> ObjectInfo {
        ObjectInfo {
            key: key.to_string(),
            size,
            last_modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single(),
            e_tag: None,
            version: None,
        }
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(FileMode::file().to_string(), "-rw-------");
        assert_eq!(FileMode::dir().to_string(), "drw-------");
        assert_eq!(FileMode::dir().permissions(), 0o600);
        assert!(FileMode::dir().is_dir());
        assert!(!FileMode::file().is_dir());
    }

    #[test]
    fn test_bucket_entry() {
        let bucket = BucketInfo::new("logs");
        let entry = Entry::for_bucket(&bucket);
        assert_eq!(entry.name(), "logs");
        assert!(entry.is_dir());
        assert_eq!(entry.size(), 0);
        assert_eq!(entry.mode(), FileMode::dir());
        assert_eq!(entry.bucket(), Some(&bucket));
        assert!(entry.object().is_none());
    }

    #[test]
    fn test_object_entry() {
        let info = object("img/a.png", 42);
        let entry = Entry::for_object("a.png", &info);
        assert!(!entry.is_dir());
        assert_eq!(entry.size(), 42);
        assert_eq!(entry.mode().bits(), 0o600);
        assert_eq!(Some(entry.mod_time()), info.last_modified);
        assert_eq!(entry.sys(), &DEFAULT_STAT);
    }

    #[test]
    fn test_prefix_entry_is_dir_with_zero_size() {
        let info = ObjectInfo {
            size: 99,
            ..object("img/", 0)
        };
        let before = Utc::now();
        let entry = Entry::for_object("img", &info);
        assert!(entry.is_dir());
        assert_eq!(entry.size(), 0);
        assert!(entry.mod_time() >= before);
    }

    #[test]
    fn test_same_file_ignores_dir_timestamps() {
        let a = Entry::synthetic_dir("/assets");
        let b = Entry::synthetic_dir("/assets");
        assert!(a.same_file(&b));
        assert!(!a.same_file(&Entry::synthetic_dir("/logs")));
    }
}
