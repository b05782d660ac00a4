// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::client::{GetObjectOptions, ObjectInfo, StorageClient};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::path::{self, Location, SEPARATOR};
use diagnostics::{debug, info};
use futures::TryStreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Object storage presented as a read-only file tree.
///
/// `/` lists buckets, `/<bucket>` lists the bucket's top level, and any
/// deeper path is either a key prefix (directory) or an object (file).
#[derive(Clone)]
pub struct ObjectFs {
    client: Arc<dyn StorageClient>,
}

impl std::fmt::Debug for ObjectFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFs").finish_non_exhaustive()
    }
}

impl ObjectFs {
    #[must_use]
    pub fn new<C: StorageClient + 'static>(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    #[must_use]
    pub fn with_client(client: Arc<dyn StorageClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<dyn StorageClient> {
        &self.client
    }

    /// Resolve `path` and open it.
    ///
    /// Paths are cleaned first (leading separator forced, `.`/`..` and
    /// duplicate or trailing separators removed). Below bucket level the
    /// path is tried as a directory before it is tried as an object:
    /// when `key/` has children the result is always a directory, even
    /// if an object named exactly `key` also exists. That object is then
    /// unreachable through this interface.
    ///
    /// Storage errors are returned unchanged. A path that is neither a
    /// prefix with children nor an existing object yields
    /// [`Error::NotFound`].
    pub async fn open(&self, path: &str) -> Result<Handle> {
        let path = path::clean(path);

        match Location::parse(&path) {
            Location::Root => {
                let buckets = self.client.list_buckets().await?;
                debug!("Resolved {path} as root with {count} buckets", path: path.as_str(), count: buckets.len());
                Ok(Handle::root(path, buckets))
            }
            Location::Bucket { bucket } => {
                let objects = self.list_children(&bucket, "").await?;
                debug!("Resolved {path} as bucket with {count} entries", path: path.as_str(), count: objects.len());
                Ok(Handle::bucket(path, objects))
            }
            Location::Key { bucket, key } => {
                let prefix = format!("{key}{SEPARATOR}");
                let objects = self.list_children(&bucket, &prefix).await?;
                if !objects.is_empty() {
                    debug!("Resolved {path} as directory with {count} entries", path: path.as_str(), count: objects.len());
                    return Ok(Handle::directory(path, objects));
                }

                match self
                    .client
                    .get_object(&bucket, &key, GetObjectOptions::default())
                    .await
                {
                    Ok(stream) => {
                        debug!("Resolved {path} as file", path: path.as_str());
                        Ok(Handle::file(path, stream))
                    }
                    Err(e) if e.is_not_found() => {
                        info!("No directory or object at {path}", path: path.as_str());
                        Err(Error::NotFound(path))
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Non-recursive listing of `prefix`, materialized in full.
    ///
    /// The first failed record fails the whole listing. The listing is
    /// cancelled on every return path so the client can release it.
    async fn list_children(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let cancel = CancellationToken::new();
        let _stop = cancel.clone().drop_guard();
        self.client
            .list_objects(bucket, prefix, false, cancel)
            .try_collect()
            .await
    }
}
