//! Element encoding/decoding for the DMAP wire format.
//!
//! An element is a 4-byte tag, a 4-byte big-endian length and a payload. A
//! list's payload is the concatenation of its children's encodings.
//!
//! Lists are lazy by default: decoding a list reads only its tag and length
//! and remembers the byte range. The children are parsed on first use (see
//! [`Container`]). [`DecodeOptions::eager`] parses every list immediately.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::codec::primitives::{Reader, Writer};
use crate::codec::source::{ByteSource, SharedSource};
use crate::codec::value::{decode_value, encode_value};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{Container, Element};
use crate::registry::Registry;

/// Options for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Parse nested lists while decoding instead of on first use.
    pub eager: bool,

    /// Tags known to the decoder. Lazy lists keep a handle so later
    /// materialization resolves tags the same way.
    pub registry: Arc<Registry>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            eager: false,
            registry: Registry::shared(),
        }
    }
}

impl DecodeOptions {
    /// Creates lazy decoding options over the builtin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that parse every list at decode time.
    pub fn eager() -> Self {
        Self {
            eager: true,
            ..Self::default()
        }
    }

    pub fn with_eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }
}

/// State shared by every element of one decode call.
pub(crate) struct DecodeContext<'a> {
    source: &'a SharedSource,
    options: &'a DecodeOptions,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(source: &'a SharedSource, options: &'a DecodeOptions) -> Self {
        Self { source, options }
    }
}

/// Unparsed children of a lazy list: `[start, start + length)` in `source`.
#[derive(Clone)]
pub(crate) struct LazyRange {
    source: SharedSource,
    options: DecodeOptions,
    pub(crate) start: u64,
    pub(crate) length: u32,
    /// Nesting depth of the children.
    depth: usize,
}

impl LazyRange {
    fn end(&self) -> u64 {
        self.start + self.length as u64
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one element at the source's cursor with default options.
///
/// A scalar leaves the cursor after its payload; a list leaves it right
/// after its length prefix.
pub fn decode(source: &SharedSource) -> Result<Element, DecodeError> {
    decode_with_options(source, &DecodeOptions::default())
}

/// Decodes one element at the source's cursor.
pub fn decode_with_options(source: &SharedSource, options: &DecodeOptions) -> Result<Element, DecodeError> {
    let ctx = DecodeContext::new(source, options);
    let mut guard = source.borrow_mut()?;
    let mut reader = Reader::new(&mut *guard)?;
    let (element, _) = decode_element(&mut reader, &ctx, 0)?;
    Ok(element)
}

/// Decodes one element from an in-memory buffer.
///
/// The buffer is copied; lazy lists read from the copy.
pub fn decode_bytes(bytes: &[u8]) -> Result<Element, DecodeError> {
    decode(&SharedSource::from_bytes(bytes))
}

/// Decodes an element and returns it with the offset where its span ends.
fn decode_element(
    reader: &mut Reader<'_>,
    ctx: &DecodeContext<'_>,
    depth: usize,
) -> Result<(Element, u64), DecodeError> {
    let offset = reader.position();
    let code = reader.read_tag()?;
    let Some(tag) = ctx.options.registry.get(code) else {
        debug!(%code, offset, "unknown tag");
        return Err(DecodeError::UnknownTag { code });
    };
    let tag = tag.clone();
    let len = reader.read_length("length")?;
    let start = reader.position();
    let value = decode_value(reader, tag.kind(), len, ctx, depth).inspect_err(|err| {
        if matches!(err, DecodeError::ChildOverrun { .. } | DecodeError::MalformedPayload { .. }) {
            debug!(%code, offset, length = len, "element overruns its bounds: {}", err);
        }
    })?;
    Ok((Element::from_parts(tag, value), start + len as u64))
}

/// Decodes a list payload whose length prefix has been read.
///
/// The reader is left at the start of the payload.
pub(crate) fn decode_list(
    reader: &mut Reader<'_>,
    len: u32,
    ctx: &DecodeContext<'_>,
    depth: usize,
) -> Result<Container, DecodeError> {
    reader.check_declared(len as u64, "list")?;
    let depth = depth + 1;
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep { max: MAX_NESTING_DEPTH });
    }
    let start = reader.position();
    let end = start + len as u64;

    if ctx.options.eager {
        let children = {
            let mut nested = reader.nested(start, end)?;
            decode_children(&mut nested, ctx, depth)?
        };
        reader.seek(start)?;
        return Ok(Container::new(children));
    }

    trace!(start, length = len, depth, "deferred list");
    Ok(Container::lazy(LazyRange {
        source: ctx.source.clone(),
        options: ctx.options.clone(),
        start,
        length: len,
        depth,
    }))
}

/// Decodes elements until the reader's limit.
fn decode_children(
    reader: &mut Reader<'_>,
    ctx: &DecodeContext<'_>,
    depth: usize,
) -> Result<Vec<Element>, DecodeError> {
    let mut children = Vec::new();
    while !reader.is_empty() {
        let (child, end) = decode_element(reader, ctx, depth)?;
        // Lists stop after their length prefix.
        if reader.position() != end {
            reader.seek(end)?;
        }
        children.push(child);
    }
    Ok(children)
}

/// Parses a lazy list's children, restoring the source cursor afterwards.
pub(crate) fn materialize(range: &LazyRange) -> Result<Vec<Element>, DecodeError> {
    let mut guard = range.source.borrow_mut()?;
    let saved = guard.tell()?;
    let result = scan(&mut *guard, range);
    guard.seek(saved)?;

    match &result {
        Ok(children) => trace!(
            start = range.start,
            length = range.length,
            children = children.len(),
            "materialized list"
        ),
        Err(err) => debug!(start = range.start, length = range.length, "list failed to materialize: {}", err),
    }
    result
}

fn scan(source: &mut dyn ByteSource, range: &LazyRange) -> Result<Vec<Element>, DecodeError> {
    let mut reader = Reader::container(source, range.start, range.end())?;
    let ctx = DecodeContext::new(&range.source, &range.options);
    decode_children(&mut reader, &ctx, range.depth)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an element, materializing any lazy lists it contains.
pub fn encode(element: &Element) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    encode_element(&mut writer, element)?;
    Ok(writer.into_bytes())
}

/// Writes the element's registered tag bytes followed by its payload.
pub fn encode_element(writer: &mut Writer, element: &Element) -> Result<(), EncodeError> {
    writer.write_tag(element.code());
    encode_value(writer, element.value())
}

pub(crate) fn encode_container(writer: &mut Writer, container: &Container) -> Result<(), EncodeError> {
    let at = writer.reserve_length();
    for child in container.iter()? {
        encode_element(writer, child)?;
    }
    writer.backfill_length(at, "list")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::limits::ELEMENT_HEADER_LEN;
    use crate::model::Kind;
    use crate::registry::{TagCase, TagCode};

    fn header(code: &[u8; 4], len: u32) -> Vec<u8> {
        let mut bytes = code.to_vec();
        bytes.extend_from_slice(&len.to_be_bytes());
        bytes
    }

    /// `msrv` holding `mstt` = 200 and a nested `mlcl` with one `minm`.
    fn nested_bytes() -> Vec<u8> {
        let mut inner = header(b"minm", 3);
        inner.extend_from_slice(b"abc");
        let mut list = header(b"mlcl", inner.len() as u32);
        list.extend_from_slice(&inner);

        let mut status = header(b"mstt", 4);
        status.extend_from_slice(&200u32.to_be_bytes());

        let mut body = status;
        body.extend_from_slice(&list);
        let mut bytes = header(b"msrv", body.len() as u32);
        bytes.extend_from_slice(&body);
        bytes
    }

    #[test]
    fn test_decode_scalar_advances_past_payload() {
        let mut bytes = header(b"minm", 5);
        bytes.extend_from_slice(b"hello");
        let source = SharedSource::from_bytes(bytes);

        let element = decode(&source).unwrap();
        assert_eq!(element.name(), "dmap.itemname");
        assert_eq!(element.value().as_str(), Some("hello"));
        assert_eq!(source.tell().unwrap(), 13);
    }

    #[test]
    fn test_decode_list_advances_past_header_only() {
        let source = SharedSource::from_bytes(nested_bytes());
        let element = decode(&source).unwrap();
        assert_eq!(element.kind(), Kind::List);
        assert_eq!(source.tell().unwrap(), ELEMENT_HEADER_LEN);
    }

    #[test]
    fn test_lazy_nested_lists() {
        let source = SharedSource::from_bytes(nested_bytes());
        let element = decode(&source).unwrap();
        let top = element.value().as_container().unwrap();

        assert_eq!(top.len().unwrap(), 2);
        let status = top.get(0).unwrap().unwrap();
        assert_eq!(status.value().as_u64(), Some(200));

        let nested = top.get(1).unwrap().unwrap().value().as_container().unwrap();
        assert!(!nested.is_materialized());
        let name = nested.get(0).unwrap().unwrap();
        assert_eq!(name.value().as_str(), Some("abc"));
        assert_eq!(source.tell().unwrap(), ELEMENT_HEADER_LEN);
    }

    #[test]
    fn test_eager_decoding() {
        let source = SharedSource::from_bytes(nested_bytes());
        let element = decode_with_options(&source, &DecodeOptions::eager()).unwrap();
        let top = element.value().as_container().unwrap();
        assert!(top.is_materialized());

        let nested = top.get(1).unwrap().unwrap().value().as_container().unwrap();
        assert!(nested.is_materialized());
        assert_eq!(source.tell().unwrap(), ELEMENT_HEADER_LEN);
    }

    #[test]
    fn test_lazy_and_eager_agree() {
        let lazy = decode_bytes(&nested_bytes()).unwrap();
        let eager = decode_with_options(
            &SharedSource::from_bytes(nested_bytes()),
            &DecodeOptions::new().with_eager(true),
        )
        .unwrap();
        assert_eq!(lazy, eager);
    }

    #[test]
    fn test_unknown_tag() {
        let result = decode_bytes(&header(b"xxxx", 0));
        assert!(matches!(
            result,
            Err(DecodeError::UnknownTag { code }) if code == TagCode::new(*b"xxxx")
        ));
    }

    #[test]
    fn test_unknown_child_tag_surfaces_on_materialization() {
        let child = header(b"zzzz", 0);
        let mut bytes = header(b"mlcl", child.len() as u32);
        bytes.extend_from_slice(&child);

        let element = decode_bytes(&bytes).unwrap();
        let container = element.value().as_container().unwrap();
        assert!(matches!(container.len(), Err(DecodeError::UnknownTag { .. })));
        assert!(!container.is_materialized());
    }

    #[test]
    fn test_list_exceeding_source() {
        let mut bytes = header(b"mlcl", 20);
        bytes.extend_from_slice(&[0u8; 12]);
        let result = decode_bytes(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::MalformedPayload { declared: 20, available: 12, .. })
        ));
    }

    #[test]
    fn test_child_overruns_container() {
        // The child declares 10 bytes but the list only holds 4 more.
        let mut child = header(b"minm", 10);
        child.extend_from_slice(b"abcd");
        let mut bytes = header(b"mlcl", child.len() as u32);
        bytes.extend_from_slice(&child);
        bytes.extend_from_slice(&[0u8; 16]);

        let source = SharedSource::from_bytes(bytes);
        let element = decode(&source).unwrap();
        let err = element.value().as_container().unwrap().len().unwrap_err();
        assert!(matches!(err, DecodeError::ChildOverrun { .. }));
        assert_eq!(err.code(), ErrorCode::MalformedPayload);
        // Cursor restored on failure.
        assert_eq!(source.tell().unwrap(), ELEMENT_HEADER_LEN);
    }

    #[test]
    fn test_nesting_limit() {
        let mut bytes = Vec::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            let mut outer = header(b"mlcl", bytes.len() as u32);
            outer.extend_from_slice(&bytes);
            bytes = outer;
        }
        let source = SharedSource::from_bytes(bytes);
        let result = decode_with_options(&source, &DecodeOptions::eager());
        assert!(matches!(result, Err(DecodeError::NestingTooDeep { max: MAX_NESTING_DEPTH })));
    }

    #[test]
    fn test_nesting_limit_lazy() {
        let mut bytes = Vec::new();
        for _ in 0..=MAX_NESTING_DEPTH {
            let mut outer = header(b"mlcl", bytes.len() as u32);
            outer.extend_from_slice(&bytes);
            bytes = outer;
        }
        let source = SharedSource::from_bytes(bytes);
        let root = decode(&source).unwrap();

        let mut current = &root;
        let mut levels = 0;
        let err = loop {
            match current.value().as_container().unwrap().get(0) {
                Ok(Some(child)) => {
                    current = child;
                    levels += 1;
                }
                Ok(None) => panic!("innermost list reached after {} levels", levels),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, DecodeError::NestingTooDeep { max: MAX_NESTING_DEPTH }));
        assert_eq!(err.code(), ErrorCode::MalformedPayload);
        assert_eq!(levels, MAX_NESTING_DEPTH - 1);
        assert_eq!(source.tell().unwrap(), ELEMENT_HEADER_LEN);
    }

    #[test]
    fn test_busy_source_fails_materialization() {
        let source = SharedSource::from_bytes(nested_bytes());
        let element = decode(&source).unwrap();
        let _held = source.borrow_mut().unwrap();
        let container = element.value().as_container().unwrap();
        assert!(matches!(container.len(), Err(DecodeError::SourceBusy)));
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = Registry::new(TagCase::Lower);
        registry.register("abcd", "test.custom", Kind::Short).unwrap();
        let options = DecodeOptions::new().with_registry(Arc::new(registry));

        let mut bytes = header(b"ABCD", 2);
        bytes.extend_from_slice(&[1, 0]);
        let element = decode_with_options(&SharedSource::from_bytes(bytes), &options).unwrap();
        assert_eq!(element.name(), "test.custom");
        assert_eq!(element.code(), TagCode::new(*b"abcd"));
        assert_eq!(element.value().as_u64(), Some(256));

        assert!(matches!(
            decode_with_options(&SharedSource::from_bytes(header(b"minm", 0)), &options),
            Err(DecodeError::UnknownTag { .. })
        ));
    }

    #[test]
    fn test_encode_reproduces_wire_bytes() {
        let bytes = nested_bytes();
        let element = decode_bytes(&bytes).unwrap();
        assert_eq!(encode(&element).unwrap(), bytes);
    }

    #[test]
    fn test_encode_preserves_mixed_case_code() {
        let element = Registry::shared().number("aeNV", 5).unwrap();
        let bytes = encode(&element).unwrap();
        assert_eq!(&bytes[..4], b"aeNV");
    }
}
