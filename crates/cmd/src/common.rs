// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use bucketfs::{Entry, ObjectFs, StorageConfig};

/// Pick the config file: explicit flag first, then BUCKETFS_CONFIG
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    std::env::var_os(bucketfs::config::CONFIG_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| {
            anyhow!(
                "No storage configuration: pass --config or set {}",
                bucketfs::config::CONFIG_ENV
            )
        })
}

/// Build the filesystem described by a config file
pub fn open_fs(explicit: Option<&Path>) -> Result<ObjectFs> {
    let path = config_path(explicit)?;
    let config = StorageConfig::from_file(&path)
        .with_context(|| format!("Failed to load config '{}'", path.display()))?;
    let shown = path.display().to_string();
    diagnostics::log_debug!("Loaded {count} buckets from {path}", count: config.buckets.len(), path: shown.as_str());
    Ok(ObjectFs::new(config.build_client()?))
}

/// Format a file size in human-readable format
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// One `ls -l` style line: mode, size, modification time, name
pub fn format_entry(entry: &Entry<'_>) -> String {
    let size = if entry.is_dir() {
        "-".to_string()
    } else {
        format_file_size(entry.size())
    };
    let name = if entry.is_dir() {
        format!("{}/", entry.name())
    } else {
        entry.name().to_string()
    };
    format!(
        "{} {:>10} {} {}",
        entry.mode(),
        size,
        entry.mod_time().format("%Y-%m-%d %H:%M"),
        name
    )
}
