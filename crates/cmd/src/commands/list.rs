// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::Result;
use bucketfs::ObjectFs;

use crate::common::format_entry;

/// List a directory, or describe a single file
pub async fn list_command(fs: &ObjectFs, path: &str, out: &mut impl Write) -> Result<()> {
    diagnostics::log_debug!("Listing {path}", path: path);
    let mut handle = fs.open(path).await?;

    if handle.is_dir() {
        for entry in handle.read_dir(0) {
            writeln!(out, "{}", format_entry(&entry))?;
        }
    } else {
        let entry = handle.stat().await?;
        writeln!(out, "{}", format_entry(&entry))?;
    }

    handle.close().await?;
    Ok(())
}
