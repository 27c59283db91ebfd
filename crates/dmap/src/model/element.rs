//! Elements: a registered tag paired with one value.

use std::fmt;

use crate::codec::{self, DecodeOptions, SharedSource};
use crate::error::{BuildError, DecodeError, EncodeError};
use crate::model::{Container, Kind, Value};
use crate::registry::{Registry, Tag, TagCode};

/// A decoded or constructed DMAP element.
///
/// The value's kind always matches the tag's kind; neither can be swapped
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    value: Value,
}

impl Element {
    /// Pairs a tag with a value already checked against it.
    pub(crate) fn from_parts(tag: Tag, value: Value) -> Self {
        Self { tag, value }
    }

    /// Creates an element for a builtin tag.
    ///
    /// See [`Registry::element`] for the checks applied.
    pub fn new(code: impl AsRef<[u8]>, value: impl Into<Value>) -> Result<Self, BuildError> {
        Registry::builtin_ref().element(code, value)
    }

    /// Decodes an element at the source's cursor using the builtin registry.
    pub fn decode(source: &SharedSource) -> Result<Self, DecodeError> {
        codec::decode(source)
    }

    pub fn decode_with_options(source: &SharedSource, options: &DecodeOptions) -> Result<Self, DecodeError> {
        codec::decode_with_options(source, options)
    }

    /// Encodes the element. Lazy lists are materialized first.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode(self)
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The code as registered, which is what gets written on encode.
    pub fn code(&self) -> TagCode {
        self.tag.code()
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn kind(&self) -> Kind {
        self.tag.kind()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the children of a list element.
    pub fn container(&self) -> Option<&Container> {
        self.value.as_container()
    }

    /// Returns the children of a list element for appending.
    pub fn container_mut(&mut self) -> Option<&mut Container> {
        self.value.as_container_mut()
    }

    /// Returns the first child with the given code; `None` for scalars.
    pub fn find(&self, code: impl AsRef<[u8]>) -> Result<Option<&Element>, DecodeError> {
        match self.container() {
            Some(container) => container.find(code),
            None => Ok(None),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.code(), self.value)
    }
}
