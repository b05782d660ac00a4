// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::client::{BucketInfo, ObjectInfo, ObjectStream};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::path;
use std::io::SeekFrom;

/// What a resolved path turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Bucket,
    Directory,
    File,
}

impl NodeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Bucket => "bucket",
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The data gathered while resolving, exactly one shape per kind
enum Node {
    Root { buckets: Vec<BucketInfo> },
    Bucket { objects: Vec<ObjectInfo> },
    Directory { objects: Vec<ObjectInfo> },
    File { stream: Box<dyn ObjectStream> },
}

/// An open file or directory in the bucket namespace.
///
/// Handles are produced by [`crate::ObjectFs::open`] and never change
/// kind. A handle is meant for one caller at a time; every method that
/// touches the object stream takes `&mut self`.
pub struct Handle {
    path: String,
    node: Node,
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("path", &self.path)
            .field("kind", &self.kind())
            .finish()
    }
}

impl Handle {
    pub(crate) fn root(path: String, buckets: Vec<BucketInfo>) -> Self {
        Self {
            path,
            node: Node::Root { buckets },
        }
    }

    pub(crate) fn bucket(path: String, objects: Vec<ObjectInfo>) -> Self {
        Self {
            path,
            node: Node::Bucket { objects },
        }
    }

    pub(crate) fn directory(path: String, objects: Vec<ObjectInfo>) -> Self {
        Self {
            path,
            node: Node::Directory { objects },
        }
    }

    pub(crate) fn file(path: String, stream: Box<dyn ObjectStream>) -> Self {
        Self {
            path,
            node: Node::File { stream },
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.node {
            Node::Root { .. } => NodeKind::Root,
            Node::Bucket { .. } => NodeKind::Bucket,
            Node::Directory { .. } => NodeKind::Directory,
            Node::File { .. } => NodeKind::File,
        }
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        !matches!(self.node, Node::File { .. })
    }

    /// Read from the object. Directory-like handles always read 0 bytes.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        match &mut self.node {
            Node::File { stream } => stream.read(buf).await,
            _ => Ok(0),
        }
    }

    /// Seek within the object. A no-op returning 0 for directory-like handles.
    pub async fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match &mut self.node {
            Node::File { stream } => stream.seek(pos).await,
            _ => Ok(0),
        }
    }

    /// Read from the current offset to the end of the object
    pub async fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let mut chunk = vec![0u8; 64 * 1024];
        let mut total = 0;
        loop {
            let n = self.read(&mut chunk).await?;
            if n == 0 {
                return Ok(total);
            }
            out.extend_from_slice(&chunk[..n]);
            total += n;
        }
    }

    /// Release the object stream. Never fails for directory-like handles,
    /// however often it is called.
    pub async fn close(&mut self) -> Result<()> {
        match &mut self.node {
            Node::File { stream } => stream.close().await,
            _ => Ok(()),
        }
    }

    /// List the directory.
    ///
    /// `count` is accepted for interface compatibility but ignored: the
    /// complete listing gathered at open time is returned in one call, and
    /// calling again returns it again. Files list as empty.
    #[must_use]
    pub fn read_dir(&self, _count: usize) -> Vec<Entry<'_>> {
        match &self.node {
            Node::Root { buckets } => buckets.iter().map(Entry::for_bucket).collect(),
            Node::Bucket { objects } => objects
                .iter()
                .map(|object| Entry::for_object(path::clean_key(&object.key), object))
                .collect(),
            Node::Directory { objects } => objects
                .iter()
                .map(|object| Entry::for_object(path::basename(&object.key), object))
                .collect(),
            Node::File { .. } => Vec::new(),
        }
    }

    /// Describe the handle itself, named after its resolved path.
    ///
    /// Any failure reading object metadata is reported as not-found.
    pub async fn stat(&mut self) -> Result<Entry<'static>> {
        match &mut self.node {
            Node::File { stream } => {
                let info = stream
                    .stat()
                    .await
                    .map_err(|_| Error::not_found(&self.path))?;
                Ok(Entry::for_stat(self.path.clone(), info))
            }
            _ => Ok(Entry::synthetic_dir(self.path.clone())),
        }
    }
}
