//! Saved body files
//!
//! Each body is stored in its own file named `_<kind>_<English_Name>.body`.
//! The file is a small binary header followed by the body as JSON:
//!
//! | field      | encoding                         |
//! |------------|----------------------------------|
//! | magic      | `ORBODY`                         |
//! | version    | `u8`                             |
//! | kind       | `u8` tag                         |
//! | saved at   | `u16` length + RFC 3339 UTF-8     |
//! | payload    | `u64` length + JSON UTF-8         |
//!
//! All integers are little endian.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, FixedOffset, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::bodies::{BodyKind, CelestialBody};
use crate::{OrreryError, Result};

/// Magic bytes for identification of saved body files
pub const MAGIC_BYTES: &[u8; 6] = b"ORBODY";

/// Current version of the file format
pub const FORMAT_VERSION: u8 = 1;

/// File extension of saved bodies
pub const EXTENSION: &str = "body";

lazy_static! {
    static ref FILE_NAME: Regex = Regex::new(r"^_(sun|planet|moon)_(.+)\.body$").unwrap();
}

/// Header of a saved body file
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version: u8,
    pub kind: BodyKind,
    pub saved_at: DateTime<FixedOffset>,
}

/// Characters escaped as `%XX` in file names; spaces become `_`
const ESCAPED: &[char] = &['%', '_', '/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Encode an English name as a file name component
pub fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        if c == ' ' {
            encoded.push('_');
        } else if ESCAPED.contains(&c) || c.is_ascii_control() {
            encoded.push_str(&format!("%{:02X}", c as u32));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Inverse of [`encode_name`], `None` for malformed escapes
pub fn decode_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = encoded.get(i + 1..i + 3)?;
                decoded.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b'_' => {
                decoded.push(b' ');
                i += 1;
            }
            b => {
                decoded.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(decoded).ok()
}

/// File name a body is saved under
pub fn file_name(body: &CelestialBody) -> String {
    format!(
        "_{}_{}.{}",
        body.kind().config_key(),
        encode_name(&body.english_name),
        EXTENSION
    )
}

/// Kind and English name encoded in a saved file name
pub fn parse_file_name(name: &str) -> Option<(BodyKind, String)> {
    let caps = FILE_NAME.captures(name)?;
    let kind = caps[1].parse().ok()?;
    Some((kind, decode_name(&caps[2])?))
}

/// Save a body into `dir`, returning the path written
pub fn save<P: AsRef<Path>>(body: &CelestialBody, dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(body));
    save_to(body, &path)?;
    log::debug!("saved {} to {}", body.english_name, path.display());
    Ok(path)
}

/// Save a body to an explicit path
pub fn save_to<P: AsRef<Path>>(body: &CelestialBody, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_body(body, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the binary representation of a body
pub fn write_body<W: Write>(body: &CelestialBody, writer: &mut W) -> Result<()> {
    let payload = serde_json::to_vec(body)?;
    let saved_at = Utc::now().to_rfc3339();

    writer.write_all(MAGIC_BYTES)?;
    writer.write_u8(FORMAT_VERSION)?;
    writer.write_u8(body.kind().tag())?;

    writer.write_u16::<LittleEndian>(saved_at.len() as u16)?;
    writer.write_all(saved_at.as_bytes())?;

    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(&payload)?;
    Ok(())
}

/// Load a body from a saved file
pub fn load<P: AsRef<Path>>(path: P) -> Result<CelestialBody> {
    let file = File::open(&path)?;
    let mut reader = BufReader::new(file);
    let (_, body) = read_body(&mut reader)?;
    Ok(body)
}

/// Read only the header of a saved file
pub fn read_header_from<P: AsRef<Path>>(path: P) -> Result<Header> {
    let file = File::open(&path)?;
    let mut reader = BufReader::new(file);
    read_header(&mut reader)
}

/// Read and verify a header
pub fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC_BYTES {
        return Err(OrreryError::DataError(
            "Invalid body file format: incorrect magic bytes".to_string(),
        ));
    }

    let version = reader.read_u8().map_err(truncated)?;
    if version != FORMAT_VERSION {
        return Err(OrreryError::DataError(format!(
            "Unsupported body file version: {}. Expected version {}",
            version, FORMAT_VERSION
        )));
    }

    let tag = reader.read_u8().map_err(truncated)?;
    let kind = BodyKind::from_tag(tag)
        .ok_or_else(|| OrreryError::DataError(format!("Unknown body kind tag: {}", tag)))?;

    let len = reader.read_u16::<LittleEndian>().map_err(truncated)?;
    let mut stamp = vec![0u8; len as usize];
    reader.read_exact(&mut stamp).map_err(truncated)?;
    let stamp = String::from_utf8(stamp)
        .map_err(|e| OrreryError::DataError(format!("Invalid timestamp: {}", e)))?;
    let saved_at = DateTime::parse_from_rfc3339(&stamp)
        .map_err(|e| OrreryError::DataError(format!("Invalid timestamp `{}`: {}", stamp, e)))?;

    Ok(Header {
        version,
        kind,
        saved_at,
    })
}

/// Read a header and the body following it
pub fn read_body<R: Read>(reader: &mut R) -> Result<(Header, CelestialBody)> {
    let header = read_header(reader)?;

    let len = reader.read_u64::<LittleEndian>().map_err(truncated)?;
    let mut payload = Vec::new();
    reader.take(len).read_to_end(&mut payload)?;
    if payload.len() as u64 != len {
        return Err(OrreryError::DataError(format!(
            "Truncated body file: expected {} payload bytes but read {}",
            len,
            payload.len()
        )));
    }

    let body: CelestialBody = serde_json::from_slice(&payload)?;
    if body.kind() != header.kind {
        return Err(OrreryError::DataError(format!(
            "Body file header says {} but payload is a {}",
            header.kind,
            body.kind()
        )));
    }
    Ok((header, body))
}

/// Saved files for one kind of body in `dir`, sorted by file name
pub fn list_saved<P: AsRef<Path>>(dir: P, kind: BodyKind) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_file_name)
            .is_some_and(|(k, _)| k == kind);
        if matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn truncated(e: io::Error) -> OrreryError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        OrreryError::DataError("Truncated body file".to_string())
    } else {
        OrreryError::IoError(e)
    }
}
