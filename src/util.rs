use crate::error::Result;
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

pub fn write_serialized<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Lowercase hex SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}
