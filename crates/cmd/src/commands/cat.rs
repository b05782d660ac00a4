// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{SeekFrom, Write};

use anyhow::{Result, bail};
use bucketfs::ObjectFs;

const CHUNK_SIZE: usize = 64 * 1024;

/// Stream an object to `out`, optionally starting at `offset`
pub async fn cat_command(fs: &ObjectFs, path: &str, offset: u64, out: &mut impl Write) -> Result<()> {
    let mut handle = fs.open(path).await?;
    if handle.is_dir() {
        bail!("{} is a directory", handle.path());
    }

    if offset > 0 {
        _ = handle.seek(SeekFrom::Start(offset)).await?;
    }

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0usize;
    loop {
        let n = handle.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])?;
        total += n;
    }
    out.flush()?;
    handle.close().await?;

    diagnostics::log_debug!("Wrote {total} bytes from {path}", total: total, path: path);
    Ok(())
}
