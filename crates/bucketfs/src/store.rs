// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! `object_store`-backed storage client
//!
//! `object_store` has no notion of buckets: every store is already scoped
//! to one. `ObjectStoreClient` is therefore a registry of named stores,
//! one per bucket, which can mix backends (S3, local files, memory).
//!
//! Reads are lazy. Opening an object only fetches its metadata; bytes
//! are pulled with ranged GETs starting at the current offset, and a
//! seek simply drops the in-flight body.

use crate::client::{BucketInfo, GetObjectOptions, ObjectInfo, ObjectStream, StorageClient};
use crate::error::{Error, Result};
use crate::path::SEPARATOR;
use async_trait::async_trait;
use bytes::{Buf, Bytes};
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::path::Path;
use object_store::{GetOptions, GetRange, ObjectMeta, ObjectStore};
use std::collections::BTreeMap;
use std::io::SeekFrom;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn object_info(meta: &ObjectMeta) -> ObjectInfo {
    ObjectInfo {
        key: meta.location.to_string(),
        size: meta.size,
        last_modified: Some(meta.last_modified),
        e_tag: meta.e_tag.clone(),
        version: meta.version.clone(),
    }
}

/// A key exactly as the backend stores and lists it. Listed keys are
/// already encoded, so they must not be escaped a second time.
fn stored_path(key: &str) -> Result<Path> {
    Path::parse(key).map_err(|e| Error::ObjectStore(e.into()))
}

/// Split an arbitrary key prefix into the segment-aligned part that
/// `object_store` can list, leaving the caller to filter on the full prefix.
fn listing_root(prefix: &str) -> Result<Option<Path>> {
    match prefix.rfind(SEPARATOR) {
        Some(idx) if idx > 0 => stored_path(&prefix[..idx]).map(Some),
        _ => Ok(None),
    }
}

async fn fetch_range(
    store: Arc<dyn ObjectStore>,
    location: Path,
    options: GetOptions,
) -> Result<BoxStream<'static, object_store::Result<Bytes>>> {
    let result = store.get_opts(&location, options).await?;
    Ok(result.into_stream())
}

/// Storage client over a set of named `object_store` instances
#[derive(Clone, Default)]
pub struct ObjectStoreClient {
    buckets: BTreeMap<String, Arc<dyn ObjectStore>>,
}

impl std::fmt::Debug for ObjectStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreClient")
            .field("buckets", &self.buckets.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ObjectStoreClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` under the bucket name `name`, replacing any previous one
    pub fn insert_bucket<S: Into<String>>(&mut self, name: S, store: Arc<dyn ObjectStore>) {
        _ = self.buckets.insert(name.into(), store);
    }

    #[must_use]
    pub fn with_bucket<S: Into<String>>(mut self, name: S, store: Arc<dyn ObjectStore>) -> Self {
        self.insert_bucket(name, store);
        self
    }

    /// Look up the store registered for `bucket`
    pub fn store(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>> {
        self.buckets
            .get(bucket)
            .cloned()
            .ok_or_else(|| Error::no_such_bucket(bucket))
    }
}

#[async_trait]
impl StorageClient for ObjectStoreClient {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        Ok(self.buckets.keys().map(BucketInfo::new).collect())
    }

    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        recursive: bool,
        cancel: CancellationToken,
    ) -> BoxStream<'static, Result<ObjectInfo>> {
        let store = self.store(bucket);
        let prefix = prefix.to_string();
        let root = listing_root(&prefix);

        let listing = async_stream::stream! {
            let (store, root) = match (store, root) {
                (Ok(store), Ok(root)) => (store, root),
                (Err(e), _) | (_, Err(e)) => {
                    yield Err(e);
                    return;
                }
            };

            if recursive {
                let mut metas = store.list(root.as_ref());
                while let Some(item) = metas.next().await {
                    match item {
                        Ok(meta) => {
                            let info = object_info(&meta);
                            if info.key.starts_with(&prefix) {
                                yield Ok(info);
                            }
                        }
                        Err(e) => {
                            yield Err(Error::from(e));
                            return;
                        }
                    }
                }
            } else {
                match store.list_with_delimiter(root.as_ref()).await {
                    Ok(result) => {
                        let mut records: Vec<ObjectInfo> = result
                            .common_prefixes
                            .iter()
                            .map(|p| ObjectInfo::prefix(format!("{p}{SEPARATOR}")))
                            .chain(result.objects.iter().map(object_info))
                            .filter(|info| info.key.starts_with(&prefix))
                            .collect();
                        records.sort_by(|a, b| a.key.cmp(&b.key));
                        for record in records {
                            yield Ok(record);
                        }
                    }
                    Err(e) => yield Err(Error::from(e)),
                }
            }
        };

        listing.take_until(cancel.cancelled_owned()).boxed()
    }

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        options: GetObjectOptions,
    ) -> Result<Box<dyn ObjectStream>> {
        let store = self.store(bucket)?;
        let location = stored_path(key)?;
        let head = GetOptions {
            head: true,
            version: options.version.clone(),
            if_match: options.if_match.clone(),
            ..Default::default()
        };
        let meta = store.get_opts(&location, head).await?.meta;
        Ok(Box::new(ObjectStoreReader::new(store, meta, options)))
    }
}

/// A lazily fetched, seekable object body
pub struct ObjectStoreReader {
    store: Arc<dyn ObjectStore>,
    meta: ObjectMeta,
    options: GetObjectOptions,
    position: u64,
    body: Option<BoxStream<'static, object_store::Result<Bytes>>>,
    pending: Bytes,
    closed: bool,
}

impl ObjectStoreReader {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, meta: ObjectMeta, options: GetObjectOptions) -> Self {
        Self {
            store,
            meta,
            options,
            position: 0,
            body: None,
            pending: Bytes::new(),
            closed: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::closed(self.meta.location.as_ref()));
        }
        Ok(())
    }

    /// Request for the remainder of the object from the current offset
    fn range_options(&self) -> GetOptions {
        GetOptions {
            range: Some(GetRange::Bounded(self.position..self.meta.size)),
            version: self.options.version.clone(),
            if_match: self.options.if_match.clone(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ObjectStream for ObjectStoreReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.ensure_open()?;
        if buf.is_empty() || self.position >= self.meta.size {
            return Ok(0);
        }

        while self.pending.is_empty() {
            if self.body.is_none() {
                let body = fetch_range(
                    self.store.clone(),
                    self.meta.location.clone(),
                    self.range_options(),
                )
                .await?;
                self.body = Some(body);
            }
            let Some(body) = self.body.as_mut() else {
                return Ok(0);
            };
            match body.next().await {
                Some(chunk) => self.pending = chunk?,
                None => {
                    self.body = None;
                    return Ok(0);
                }
            }
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.advance(n);
        self.position += n as u64;
        Ok(n)
    }

    async fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.ensure_open()?;
        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => self
                .position
                .checked_add_signed(delta)
                .ok_or(Error::InvalidSeek(delta))?,
            SeekFrom::End(delta) => self
                .meta
                .size
                .checked_add_signed(delta)
                .ok_or(Error::InvalidSeek(delta))?,
        };

        if target != self.position {
            self.body = None;
            self.pending = Bytes::new();
            self.position = target;
        }
        Ok(self.position)
    }

    async fn stat(&mut self) -> Result<ObjectInfo> {
        self.ensure_open()?;
        Ok(object_info(&self.meta))
    }

    async fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.body = None;
        self.pending = Bytes::new();
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use object_store::PutPayload;
    use object_store::memory::InMemory;

    async fn bucket(objects: &[(&str, &[u8])]) -> Arc<dyn ObjectStore> {
        let store = InMemory::new();
        for (key, content) in objects {
            _ = store
                .put(&Path::from(*key), PutPayload::from(content.to_vec()))
                .await
                .unwrap();
        }
        Arc::new(store)
    }

    async fn test_client() -> ObjectStoreClient {
        ObjectStoreClient::new()
            .with_bucket(
                "assets",
                bucket(&[
                    ("img/a.png", b"png-a"),
                    ("img/sub/b.png", b"png-b"),
                    ("readme.txt", b"Hello, World!"),
                    ("release.txt", b"v1"),
                ])
                .await,
            )
            .with_bucket("logs", bucket(&[]).await)
    }

    async fn keys(client: &ObjectStoreClient, bucket: &str, prefix: &str, recursive: bool) -> Vec<String> {
        client
            .list_objects(bucket, prefix, recursive, CancellationToken::new())
            .map_ok(|info| info.key)
            .try_collect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_buckets_sorted() {
        let client = test_client().await;
        let names: Vec<_> = client
            .list_buckets()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["assets", "logs"]);
    }

    #[tokio::test]
    async fn test_list_non_recursive_folds_prefixes() {
        let client = test_client().await;
        assert_eq!(
            keys(&client, "assets", "", false).await,
            vec!["img/", "readme.txt", "release.txt"]
        );
        assert_eq!(
            keys(&client, "assets", "img/", false).await,
            vec!["img/a.png", "img/sub/"]
        );
    }

    #[tokio::test]
    async fn test_list_partial_prefix() {
        let client = test_client().await;
        assert_eq!(keys(&client, "assets", "re", false).await, vec!["readme.txt", "release.txt"]);
        assert_eq!(keys(&client, "assets", "img/s", false).await, vec!["img/sub/"]);
        assert!(keys(&client, "assets", "readme.txt/", false).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_recursive() {
        let client = test_client().await;
        let mut found = keys(&client, "assets", "img/", true).await;
        found.sort();
        assert_eq!(found, vec!["img/a.png", "img/sub/b.png"]);
    }

    #[tokio::test]
    async fn test_list_unknown_bucket_errors() {
        let client = test_client().await;
        let result: Result<Vec<ObjectInfo>> = client
            .list_objects("nope", "", false, CancellationToken::new())
            .try_collect()
            .await;
        assert!(matches!(result, Err(Error::NoSuchBucket(name)) if name == "nope"));
    }

    #[tokio::test]
    async fn test_cancelled_listing_yields_nothing() {
        let client = test_client().await;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let found: Vec<ObjectInfo> = client
            .list_objects("assets", "", true, cancel)
            .try_collect()
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_object_is_not_found() {
        let client = test_client().await;
        let result = client
            .get_object("assets", "missing.txt", GetObjectOptions::default())
            .await;
        match result {
            Err(e) => assert!(e.is_not_found()),
            Ok(_) => panic!("expected not found"),
        }
    }

    #[tokio::test]
    async fn test_malformed_key_is_storage_error() {
        let client = test_client().await;
        let result = client
            .get_object("assets", "img//a.png", GetObjectOptions::default())
            .await;
        match result {
            Err(e) => {
                assert!(matches!(e, Error::ObjectStore(_)));
                assert!(!e.is_not_found());
            }
            Ok(_) => panic!("expected an invalid path error"),
        }

        let listed: Result<Vec<ObjectInfo>> = client
            .list_objects("assets", "img//sub/", false, CancellationToken::new())
            .try_collect()
            .await;
        assert!(matches!(listed, Err(Error::ObjectStore(_))));
    }

    #[tokio::test]
    async fn test_reader_read_seek_close() {
        let client = test_client().await;
        let mut reader = client
            .get_object("assets", "readme.txt", GetObjectOptions::default())
            .await
            .unwrap();

        let mut buf = [0u8; 5];
        assert_eq!(reader.read(&mut buf).await.unwrap(), 5);
        assert_eq!(&buf, b"Hello");

        assert_eq!(reader.seek(SeekFrom::Start(7)).await.unwrap(), 7);
        let mut rest = [0u8; 32];
        let n = reader.read(&mut rest).await.unwrap();
        assert_eq!(&rest[..n], b"World!");
        assert_eq!(reader.read(&mut rest).await.unwrap(), 0);

        assert_eq!(reader.seek(SeekFrom::End(-6)).await.unwrap(), 7);
        assert_eq!(reader.seek(SeekFrom::Current(-7)).await.unwrap(), 0);
        assert!(matches!(
            reader.seek(SeekFrom::Current(-1)).await,
            Err(Error::InvalidSeek(-1))
        ));

        // Seeking past the end is allowed; reads there are empty
        assert_eq!(reader.seek(SeekFrom::Start(100)).await.unwrap(), 100);
        assert_eq!(reader.read(&mut rest).await.unwrap(), 0);

        let info = reader.stat().await.unwrap();
        assert_eq!(info.key, "readme.txt");
        assert_eq!(info.size, 13);

        reader.close().await.unwrap();
        assert!(matches!(reader.read(&mut rest).await, Err(Error::Closed(_))));
        assert!(matches!(reader.close().await, Err(Error::Closed(_))));
    }
}
