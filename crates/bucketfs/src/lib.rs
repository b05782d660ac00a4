// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! bucketfs -- object storage as a read-only file tree
//!
//! The storage root lists buckets as directories, each bucket lists its
//! top-level keys, and key prefixes ending in `/` behave as
//! subdirectories. [`ObjectFs::open`] resolves a path to a [`Handle`]
//! which answers read/seek/close/read_dir/stat the way a local file or
//! directory would.
//!
//! Storage access goes through the [`StorageClient`] trait;
//! [`ObjectStoreClient`] implements it over the `object_store` crate.

pub mod client;
pub mod config;
pub mod entry;
pub mod error;
mod fs;
mod handle;
pub mod path;
pub mod store;

#[cfg(test)]
mod tests;

pub use client::{BucketInfo, GetObjectOptions, ObjectInfo, ObjectStream, StorageClient};
pub use config::{BucketConfig, StorageConfig};
pub use entry::{DEFAULT_STAT, Entry, FileMode, SysStat};
pub use error::{Error, Result};
pub use fs::ObjectFs;
pub use handle::{Handle, NodeKind};
pub use store::{ObjectStoreClient, ObjectStoreReader};
