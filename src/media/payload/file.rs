//! File metadata wrapper.
//!
//! A file payload carries its own header so the unveiling side can restore
//! the original name:
//!
//! ```text
//! [4 bytes ] metadata length M (big-endian)
//! [M bytes ] compact JSON: {"fileName":..,"fileExt":..,"fileSize":..}
//! [N bytes ] file content, N == fileSize
//! ```
//!
//! The wrapper is embedded as the payload of the outer frame; `fileSize`
//! must match the trailing content exactly.

use byteorder::{BigEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::StegoError;
use crate::result::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_name: String,
    /// Extension including the leading dot, empty for extension-less files.
    pub file_ext: String,
    pub file_size: u64,
}

/// Wraps file content with its JSON metadata header.
pub fn wrap_file(name: &str, ext: &str, content: &[u8]) -> Result<Vec<u8>> {
    if name.is_empty() {
        return Err(StegoError::InvalidFileName);
    }
    let metadata = FileMetadata {
        file_name: name.to_owned(),
        file_ext: ext.to_owned(),
        file_size: content.len() as u64,
    };
    let header = serde_json::to_vec(&metadata)?;
    let mut wrapped = Vec::with_capacity(4 + header.len() + content.len());
    wrapped.extend_from_slice(&(header.len() as u32).to_be_bytes());
    wrapped.extend_from_slice(&header);
    wrapped.extend_from_slice(content);
    Ok(wrapped)
}

/// Splits a wrapped payload into its metadata and content.
///
/// Fails with [`StegoError::LengthMismatch`] when the `fileSize` field
/// disagrees with the trailing content length.
pub fn unwrap_file(wrapped: &[u8]) -> Result<(FileMetadata, &[u8])> {
    let mut cursor = wrapped;
    let header_len = cursor
        .read_u32::<BigEndian>()
        .map_err(|_| StegoError::DecodeTruncated)? as usize;
    if cursor.len() < header_len {
        return Err(StegoError::DecodeTruncated);
    }
    let metadata: FileMetadata = serde_json::from_slice(&cursor[..header_len])?;
    let content = &cursor[header_len..];
    if metadata.file_size != content.len() as u64 {
        return Err(StegoError::LengthMismatch {
            expected: metadata.file_size as usize,
            actual: content.len(),
        });
    }
    Ok((metadata, content))
}
