//! Value encoding/decoding for the DMAP wire format.
//!
//! The payload layout is chosen by the tag's kind: strings are raw bytes,
//! integers are big-endian boxes of 1, 2, 4 or 8 bytes, versions are two
//! big-endian u16s and times are a big-endian u32 of seconds since the epoch.
//! Lists are delegated back to the element codec.

use crate::codec::element::{DecodeContext, decode_list, encode_container};
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::FIXED_PAYLOAD_LEN;
use crate::model::{Integer, Kind, Timestamp, Value, Version, Width};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes the payload of an element whose length prefix has been read.
pub(crate) fn decode_value(
    reader: &mut Reader<'_>,
    kind: Kind,
    len: u32,
    ctx: &DecodeContext<'_>,
    depth: usize,
) -> Result<Value, DecodeError> {
    match kind {
        Kind::String => decode_text(reader, len),
        Kind::Version => decode_version(reader, len),
        Kind::Time => decode_time(reader, len),
        Kind::List => decode_list(reader, len, ctx, depth).map(Value::Container),
        _ => decode_integer(reader, kind, len),
    }
}

fn decode_text(reader: &mut Reader<'_>, len: u32) -> Result<Value, DecodeError> {
    Ok(Value::Text(reader.read_payload(len, "string")?))
}

fn decode_integer(reader: &mut Reader<'_>, kind: Kind, len: u32) -> Result<Value, DecodeError> {
    let width = Width::from_len(len).ok_or(DecodeError::UnsupportedWidth { width: len })?;
    let bytes = reader.read_payload(len, "integer")?;
    Ok(Value::Integer(Integer::from_be_bytes(
        &bytes,
        width,
        kind.is_signed(),
    )))
}

fn check_fixed_len(kind: Kind, len: u32) -> Result<(), DecodeError> {
    if len != FIXED_PAYLOAD_LEN {
        return Err(DecodeError::FixedLengthMismatch {
            kind,
            expected: FIXED_PAYLOAD_LEN,
            found: len,
        });
    }
    Ok(())
}

fn decode_version(reader: &mut Reader<'_>, len: u32) -> Result<Value, DecodeError> {
    check_fixed_len(Kind::Version, len)?;
    reader.check_declared(len as u64, "version")?;
    let major = reader.read_u16("version.major")?;
    let minor = reader.read_u16("version.minor")?;
    Ok(Value::Version(Version::from_wire(major, minor)?))
}

fn decode_time(reader: &mut Reader<'_>, len: u32) -> Result<Value, DecodeError> {
    check_fixed_len(Kind::Time, len)?;
    let secs = reader.read_u32("time")?;
    Ok(Value::Timestamp(Timestamp::from_secs(secs)))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value's length prefix and payload.
pub fn encode_value(writer: &mut Writer, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Text(bytes) => writer.write_prefixed(bytes, "string"),
        Value::Integer(int) => writer.write_prefixed(&int.to_be_bytes(), "integer"),
        Value::Version(version) => {
            writer.write_u32(FIXED_PAYLOAD_LEN);
            writer.write_u16(version.major());
            writer.write_u16(version.minor());
            Ok(())
        }
        Value::Timestamp(timestamp) => {
            writer.write_u32(FIXED_PAYLOAD_LEN);
            writer.write_u32(timestamp.secs());
            Ok(())
        }
        Value::Container(container) => encode_container(writer, container),
    }
}
