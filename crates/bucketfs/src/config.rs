// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Storage configuration
//!
//! A YAML document mapping bucket names to `object_store` URLs:
//!
//! ```yaml
//! buckets:
//!   assets:
//!     url: s3://assets-prod/public
//!     options:
//!       region: us-east-1
//!       endpoint: http://localhost:9000
//!   scratch:
//!     url: file:///srv/scratch
//! ```
//!
//! `options` are passed through to the backend builder, so any key the
//! backend understands (credentials, region, endpoint) is accepted. A path
//! in the URL scopes the bucket to that key prefix.

use crate::error::{Error, Result};
use crate::store::ObjectStoreClient;
use diagnostics::debug;
use object_store::ObjectStore;
use object_store::prefix::PrefixStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Environment variable naming the default configuration file
pub const CONFIG_ENV: &str = "BUCKETFS_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub buckets: BTreeMap<String, BucketConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    pub url: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl StorageConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: StorageConfig = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        for name in self.buckets.keys() {
            if name.is_empty() || name.contains(crate::path::SEPARATOR) || name == "." || name == ".." {
                return Err(Error::config(format!("Invalid bucket name '{name}'")));
            }
        }
        Ok(())
    }

    /// Build one store per configured bucket
    pub fn build_client(&self) -> Result<ObjectStoreClient> {
        let mut client = ObjectStoreClient::new();
        for (name, bucket) in &self.buckets {
            client.insert_bucket(name.as_str(), bucket.build_store()?);
            debug!("Configured bucket {name} at {url}", name: name.as_str(), url: bucket.url.as_str());
        }
        Ok(client)
    }
}

impl BucketConfig {
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        let url = Url::parse(&self.url)?;
        let (store, prefix) = object_store::parse_url_opts(&url, self.options.iter())
            .map_err(|e| Error::config(format!("Unsupported storage URL '{}': {}", self.url, e)))?;

        if prefix.as_ref().is_empty() {
            Ok(Arc::from(store))
        } else {
            Ok(Arc::new(PrefixStore::new(store, prefix)))
        }
    }
}
