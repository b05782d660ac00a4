// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0


use crate::{ObjectFs, ObjectStoreClient};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use std::sync::Arc;

/// An in-memory bucket holding `objects`
pub(crate) async fn memory_bucket(objects: &[(&str, &[u8])]) -> Arc<dyn ObjectStore> {
    let store = InMemory::new();
    for (key, content) in objects {
        _ = store
            .put(&Path::from(*key), PutPayload::from(content.to_vec()))
            .await
            .expect("put into memory store");
    }
    Arc::new(store)
}

/// Three buckets:
/// - `assets`: a nested `img/` prefix, `readme.txt` and `docs/guide.txt`
/// - `logs`: empty
/// - `shadow`: an object `img` alongside objects under `img/`
pub(crate) async fn sample_fs() -> ObjectFs {
    let client = ObjectStoreClient::new()
        .with_bucket(
            "assets",
            memory_bucket(&[
                ("img/a.png", b"png-a"),
                ("img/sub/b.png", b"png-b"),
                ("readme.txt", b"Hello, World!"),
                ("docs/guide.txt", b"guide"),
            ])
            .await,
        )
        .with_bucket("logs", memory_bucket(&[]).await)
        .with_bucket(
            "shadow",
            memory_bucket(&[("img", b"not a directory"), ("img/a.png", b"png-a")]).await,
        );
    ObjectFs::new(client)
}
