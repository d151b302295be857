//! Framed payload codec.
//!
//! Everything a codec embeds goes through the same frame: a 4-byte
//! big-endian length followed by the content. The length prefix is what
//! lets a decoder stop at the right byte; without it the tail of the
//! carrier is indistinguishable from payload.

pub mod file;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::StegoError;
use crate::result::Result;

/// Prepends the 4-byte big-endian length to the payload.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(4 + payload.len());
    framed.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Reads the length prefix and returns the content slice.
///
/// Fails with [`StegoError::DecodeTruncated`] when the stream is shorter
/// than the declared length. Trailing bytes beyond the frame are ignored.
pub fn unframe(stream: &[u8]) -> Result<&[u8]> {
    let mut cursor = stream;
    let len = cursor
        .read_u32::<BigEndian>()
        .map_err(|_| StegoError::DecodeTruncated)? as usize;
    if cursor.len() < len {
        return Err(StegoError::DecodeTruncated);
    }
    Ok(&cursor[..len])
}
