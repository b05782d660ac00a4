// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The storage client seam.
//!
//! The resolver only ever talks to object storage through
//! [`StorageClient`] and [`ObjectStream`]. Retries, timeouts and
//! pagination belong to the implementation behind these traits; this
//! crate passes their behavior through unchanged.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use std::io::SeekFrom;
use tokio_util::sync::CancellationToken;

/// One bucket as reported by the storage listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

impl BucketInfo {
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }
}

/// One object, or common prefix, as reported by the storage listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Full key within the bucket. Common prefixes end with `/`.
    pub key: String,
    /// Object size in bytes (0 for common prefixes)
    pub size: u64,
    /// Last modified timestamp, absent for common prefixes
    pub last_modified: Option<DateTime<Utc>>,
    pub e_tag: Option<String>,
    pub version: Option<String>,
}

impl ObjectInfo {
    /// A pseudo-record for a key prefix folded by a non-recursive listing
    #[must_use]
    pub fn prefix<S: Into<String>>(key: S) -> Self {
        Self {
            key: key.into(),
            size: 0,
            last_modified: None,
            e_tag: None,
            version: None,
        }
    }
}

/// Conditions forwarded to the backend when fetching an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetObjectOptions {
    /// Fetch a specific object version
    pub version: Option<String>,
    /// Fail unless the object's entity tag matches
    pub if_match: Option<String>,
}

/// An open, seekable view of one object's bytes
#[async_trait]
pub trait ObjectStream: Send {
    /// Read up to `buf.len()` bytes at the current offset. Returns 0 at end of object.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Move the read offset, returning the new absolute position
    async fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Metadata of the underlying object
    async fn stat(&mut self) -> Result<ObjectInfo>;

    /// Release the underlying resources
    async fn close(&mut self) -> Result<()>;
}

/// Read-only access to a bucketed object store
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// List objects in `bucket` whose key starts with `prefix`.
    ///
    /// With `recursive == false`, keys below the next separator after the
    /// prefix are folded into one [`ObjectInfo::prefix`] record. The stream
    /// stops producing as soon as `cancel` fires.
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        recursive: bool,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<ObjectInfo>>;

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        options: GetObjectOptions,
    ) -> Result<Box<dyn ObjectStream>>;
}
