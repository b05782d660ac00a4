// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::Result;
use bucketfs::ObjectFs;

/// Print the descriptor of a path, one field per line
pub async fn stat_command(fs: &ObjectFs, path: &str, out: &mut impl Write) -> Result<()> {
    let mut handle = fs.open(path).await?;
    let entry = handle.stat().await?;

    writeln!(out, "  Path: {}", entry.name())?;
    writeln!(out, "  Kind: {}", handle.kind())?;
    writeln!(out, "  Size: {}", entry.size())?;
    writeln!(out, "  Mode: {} ({:o})", entry.mode(), entry.mode().bits())?;
    writeln!(out, "Modify: {}", entry.mod_time().to_rfc3339())?;
    if let Some(object) = entry.object() {
        if let Some(e_tag) = &object.e_tag {
            writeln!(out, "  ETag: {e_tag}")?;
        }
        if let Some(version) = &object.version {
            writeln!(out, "Version: {version}")?;
        }
    }

    handle.close().await?;
    Ok(())
}
