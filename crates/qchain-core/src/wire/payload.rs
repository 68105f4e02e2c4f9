//! Compressed rich payloads: `[flag u8] + data`.
//!
//! Flag 0 carries raw UTF-8, flag 1 carries zlib-deflated UTF-8.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{QchainError, Result};

pub const FLAG_RAW: u8 = 0;
pub const FLAG_ZLIB: u8 = 1;

/// Deflate `content` and prefix the zlib flag.
pub fn pack(content: &str) -> Result<Vec<u8>> {
    let mut enc = ZlibEncoder::new(vec![FLAG_ZLIB], Compression::default());
    enc.write_all(content.as_bytes())
        .map_err(|e| QchainError::Internal(format!("deflate failed: {e}")))?;
    enc.finish()
        .map_err(|e| QchainError::Internal(format!("deflate failed: {e}")))
}

/// Decode a flagged payload into text.
pub fn unpack(data: &[u8]) -> Result<String> {
    let Some((&flag, body)) = data.split_first() else {
        return Err(QchainError::Decode("empty rich payload".into()));
    };
    match flag {
        FLAG_RAW => String::from_utf8(body.to_vec())
            .map_err(|e| QchainError::Decode(format!("rich payload not utf-8: {e}"))),
        FLAG_ZLIB => {
            let mut out = String::new();
            ZlibDecoder::new(body)
                .read_to_string(&mut out)
                .map_err(|e| QchainError::Decode(format!("inflate failed: {e}")))?;
            Ok(out)
        }
        other => Err(QchainError::Decode(format!(
            "unknown compression flag={other}"
        ))),
    }
}

/// Compress arbitrary bytes (upload bodies).
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data)
        .map_err(|e| QchainError::Internal(format!("deflate failed: {e}")))?;
    enc.finish()
        .map_err(|e| QchainError::Internal(format!("deflate failed: {e}")))
}

/// Value of an XML attribute `name="..."`, or empty.
pub fn xml_attr<'a>(content: &'a str, name: &str) -> &'a str {
    let needle = format!("{name}=\"");
    content
        .find(&needle)
        .map(|at| &content[at + needle.len()..])
        .and_then(|rest| rest.find('"').map(|end| &rest[..end]))
        .unwrap_or("")
}
