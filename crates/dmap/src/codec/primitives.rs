//! Primitive encoding/decoding for the DMAP wire format.
//!
//! Implements tags, big-endian length prefixes and raw payload reads with
//! bounds checking against either the end of the source or the end of the
//! enclosing container.

use crate::codec::source::ByteSource;
use crate::error::{DecodeError, EncodeError};
use crate::limits::{LENGTH_PREFIX_LEN, MAX_PAYLOAD_LEN, TAG_LEN};
use crate::registry::TagCode;

// =============================================================================
// DECODING
// =============================================================================

/// Where a reader's limit comes from; decides how overruns are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// End of the byte source.
    Source,
    /// Declared end of an enclosing container.
    Container,
}

/// Reader for decoding DMAP data from a byte source.
///
/// Tracks the cursor position itself and refuses to read past `limit`.
pub struct Reader<'s> {
    source: &'s mut dyn ByteSource,
    pos: u64,
    limit: u64,
    bound: Bound,
}

impl<'s> Reader<'s> {
    /// Creates a reader at the source's current position, bounded by its end.
    pub fn new(source: &'s mut dyn ByteSource) -> Result<Self, DecodeError> {
        let pos = source.tell()?;
        let limit = source.len()?;
        Ok(Self {
            source,
            pos,
            limit,
            bound: Bound::Source,
        })
    }

    /// Creates a reader over `[start, end)` of a container's children.
    ///
    /// Seeks the source to `start`.
    pub fn container(source: &'s mut dyn ByteSource, start: u64, end: u64) -> Result<Self, DecodeError> {
        source.seek(start)?;
        Ok(Self {
            source,
            pos: start,
            limit: end,
            bound: Bound::Container,
        })
    }

    /// Reborrows the same source as a reader over a nested container.
    pub fn nested(&mut self, start: u64, end: u64) -> Result<Reader<'_>, DecodeError> {
        Reader::container(&mut *self.source, start, end)
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Returns the position this reader may not read past.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the number of bytes left before the limit.
    pub fn remaining_len(&self) -> u64 {
        self.limit.saturating_sub(self.pos)
    }

    /// Returns true if the limit has been reached.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.limit
    }

    /// Moves to an absolute position inside the reader's range.
    pub fn seek(&mut self, pos: u64) -> Result<(), DecodeError> {
        self.source.seek(pos)?;
        self.pos = pos;
        Ok(())
    }

    /// Checks a fixed-size read (tag or length prefix).
    fn check_fixed(&self, n: u64, context: &'static str) -> Result<(), DecodeError> {
        if n <= self.remaining_len() {
            return Ok(());
        }
        match self.bound {
            Bound::Source => Err(DecodeError::TruncatedInput {
                context,
                needed: n,
                available: self.remaining_len(),
            }),
            Bound::Container => Err(DecodeError::ChildOverrun {
                context,
                offset: self.pos,
                end: self.limit,
            }),
        }
    }

    /// Checks a payload whose length was declared on the wire.
    pub fn check_declared(&self, declared: u64, context: &'static str) -> Result<(), DecodeError> {
        if declared <= self.remaining_len() {
            return Ok(());
        }
        match self.bound {
            Bound::Source => Err(DecodeError::MalformedPayload {
                context,
                declared,
                available: self.remaining_len(),
            }),
            Bound::Container => Err(DecodeError::ChildOverrun {
                context,
                offset: self.pos,
                end: self.limit,
            }),
        }
    }

    fn fill(&mut self, buf: &mut [u8], context: &'static str) -> Result<(), DecodeError> {
        self.source.read_exact(buf).map_err(|err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::TruncatedInput {
                    context,
                    needed: buf.len() as u64,
                    available: self.remaining_len(),
                }
            } else {
                err.into()
            }
        })?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    /// Reads a 4-byte tag code.
    pub fn read_tag(&mut self) -> Result<TagCode, DecodeError> {
        self.check_fixed(TAG_LEN as u64, "tag")?;
        let mut buf = [0u8; TAG_LEN];
        self.fill(&mut buf, "tag")?;
        Ok(TagCode::new(buf))
    }

    /// Reads a 4-byte big-endian length prefix.
    pub fn read_length(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.check_fixed(LENGTH_PREFIX_LEN as u64, context)?;
        let mut buf = [0u8; LENGTH_PREFIX_LEN];
        self.fill(&mut buf, context)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Reads exactly `len` declared payload bytes.
    pub fn read_payload(&mut self, len: u32, context: &'static str) -> Result<Vec<u8>, DecodeError> {
        self.check_declared(len as u64, context)?;
        let mut buf = vec![0u8; len as usize];
        self.fill(&mut buf, context)?;
        Ok(buf)
    }

    /// Reads a big-endian u16.
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        let mut buf = [0u8; 2];
        self.check_declared(2, context)?;
        self.fill(&mut buf, context)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reads a big-endian u32.
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        self.check_declared(4, context)?;
        self.fill(&mut buf, context)?;
        Ok(u32::from_be_bytes(buf))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding DMAP data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a 4-byte tag code.
    #[inline]
    pub fn write_tag(&mut self, code: TagCode) {
        self.buf.extend_from_slice(code.as_bytes());
    }

    /// Writes a big-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a big-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a 4-byte length prefix followed by the payload.
    pub fn write_prefixed(&mut self, payload: &[u8], field: &'static str) -> Result<(), EncodeError> {
        let len = checked_len(payload.len(), field)?;
        self.write_u32(len);
        self.buf.extend_from_slice(payload);
        Ok(())
    }

    /// Reserves a zeroed length prefix and returns its offset for [`Self::backfill_length`].
    pub fn reserve_length(&mut self) -> usize {
        let at = self.buf.len();
        self.buf.extend_from_slice(&[0u8; LENGTH_PREFIX_LEN]);
        at
    }

    /// Fills a reserved prefix with the number of bytes written after it.
    pub fn backfill_length(&mut self, at: usize, field: &'static str) -> Result<(), EncodeError> {
        let len = checked_len(self.buf.len() - at - LENGTH_PREFIX_LEN, field)?;
        self.buf[at..at + LENGTH_PREFIX_LEN].copy_from_slice(&len.to_be_bytes());
        Ok(())
    }
}

fn checked_len(len: usize, field: &'static str) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::LengthExceedsLimit {
        field,
        len,
        max: MAX_PAYLOAD_LEN,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_tag_and_length() {
        let mut writer = Writer::new();
        writer.write_tag(TagCode::new(*b"minm"));
        writer.write_prefixed(b"hello", "test").unwrap();

        let mut cursor = Cursor::new(writer.into_bytes());
        let mut reader = Reader::new(&mut cursor).unwrap();
        assert_eq!(reader.read_tag().unwrap(), TagCode::new(*b"minm"));
        let len = reader.read_length("test").unwrap();
        assert_eq!(len, 5);
        assert_eq!(reader.read_payload(len, "test").unwrap(), b"hello");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_length_is_big_endian() {
        let mut writer = Writer::new();
        writer.write_u32(0x0102_0304);
        assert_eq!(writer.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_backfill() {
        let mut writer = Writer::new();
        let at = writer.reserve_length();
        writer.write_bytes(&[9u8; 300]);
        writer.backfill_length(at, "test").unwrap();
        assert_eq!(&writer.as_bytes()[..4], &300u32.to_be_bytes());
        assert_eq!(writer.len(), 304);
    }

    #[test]
    fn test_truncated_tag() {
        let mut cursor = Cursor::new(b"ms".to_vec());
        let mut reader = Reader::new(&mut cursor).unwrap();
        let result = reader.read_tag();
        assert!(matches!(
            result,
            Err(DecodeError::TruncatedInput { context: "tag", needed: 4, available: 2 })
        ));
    }

    #[test]
    fn test_declared_length_exceeds_source() {
        let mut cursor = Cursor::new(vec![0u8; 5]);
        let mut reader = Reader::new(&mut cursor).unwrap();
        let result = reader.read_payload(10, "string");
        assert!(matches!(
            result,
            Err(DecodeError::MalformedPayload { declared: 10, available: 5, .. })
        ));
    }

    #[test]
    fn test_container_bound_reports_overrun() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        let mut reader = Reader::container(&mut cursor, 2, 6).unwrap();
        assert_eq!(reader.position(), 2);
        assert!(matches!(
            reader.read_payload(8, "child"),
            Err(DecodeError::ChildOverrun { offset: 2, end: 6, .. })
        ));
        reader.read_tag().unwrap();
        assert!(matches!(
            reader.read_length("child"),
            Err(DecodeError::ChildOverrun { offset: 6, .. })
        ));
    }

    #[test]
    fn test_reader_starts_at_current_position() {
        let mut cursor = Cursor::new(vec![0u8; 10]);
        std::io::Seek::seek(&mut cursor, std::io::SeekFrom::Start(7)).unwrap();
        let reader = Reader::new(&mut cursor).unwrap();
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.remaining_len(), 3);
    }
}
