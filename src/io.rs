//! File driver around the codec: reads a UTF-8 text file, writes the
//! compressed form next to it as `<stem>.bin`, and decompresses back to
//! `<stem>_decompressed.txt`.
//!
//! File content is passed to the codec verbatim, trailing whitespace
//! included, so a compress/decompress cycle reproduces the file exactly.
//! Output is written to a `.tmp` sibling and renamed into place, so a
//! failure mid-write never leaves a partial file under the final name.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::codec::{compress, decompress};
use crate::error::Result;

/// Compress the text file at `path`, writing `<stem>.bin` beside it.
/// Returns the output path.
pub fn compress_file(path: &Path) -> Result<PathBuf> {
    let text = fs::read_to_string(path)?;
    let bytes = compress(&text)?;
    let output = path.with_extension("bin");
    write_atomic(&output, &bytes)?;
    debug!(
        "compressed {} ({} bytes) into {} ({} bytes)",
        path.display(),
        text.len(),
        output.display(),
        bytes.len()
    );
    Ok(output)
}

/// Decompress the file at `path`, writing `<stem>_decompressed.txt`
/// beside it. Returns the output path.
pub fn decompress_file(path: &Path) -> Result<PathBuf> {
    let bytes = fs::read(path)?;
    let text = decompress(&bytes)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = path.with_file_name(format!("{stem}_decompressed.txt"));
    write_atomic(&output, text.as_bytes())?;
    debug!("decompressed {} into {}", path.display(), output.display());
    Ok(output)
}

fn write_atomic(dest: &Path, data: &[u8]) -> Result<()> {
    let mut tmp_name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = dest.with_file_name(tmp_name);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, dest)?;
    Ok(())
}
