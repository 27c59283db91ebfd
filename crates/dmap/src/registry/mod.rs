//! Tag registry: maps 4-byte codes to semantic names and primitive kinds.
//!
//! Codes are stored byte-exact as registered and written back that way on
//! encode. Lookups try the exact bytes first, then fall back to comparing
//! the ASCII-case-normalized form (using the registry's canonical case), so
//! `MSRV` finds `msrv` while mixed-case codes such as `aeNV` stay distinct
//! from any lower-case namesake. Non-ASCII bytes are never folded.

pub mod builtin;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::BuildError;
use crate::limits::TAG_LEN;
use crate::model::{Container, Element, Integer, Kind, Timestamp, Value, Version, Width};

lazy_static! {
    static ref SHARED_BUILTIN: Arc<Registry> = Arc::new(Registry::builtin());
}

/// A 4-byte tag code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagCode([u8; TAG_LEN]);

impl TagCode {
    pub const fn new(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a code from a slice that must be exactly 4 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BuildError> {
        <[u8; TAG_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| BuildError::InvalidTagCode { len: bytes.len() })
    }

    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Returns the code with ASCII letters converted to `case`.
    pub fn to_case(self, case: TagCase) -> Self {
        let mut bytes = self.0;
        match case {
            TagCase::Lower => bytes.make_ascii_lowercase(),
            TagCase::Upper => bytes.make_ascii_uppercase(),
        }
        Self(bytes)
    }
}

impl AsRef<[u8]> for TagCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; TAG_LEN]> for TagCode {
    fn from(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagCode(\"{}\")", self)
    }
}

/// Canonical letter case used to normalize codes on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagCase {
    /// DMAP's own wire convention.
    #[default]
    Lower,
    Upper,
}

/// A registered tag definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    code: TagCode,
    name: Cow<'static, str>,
    kind: Kind,
}

impl Tag {
    pub fn code(&self) -> TagCode {
        self.code
    }

    /// Semantic name, e.g. `dmap.itemname`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// Lookup table of known tags.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    case: TagCase,
    tags: FxHashMap<TagCode, Tag>,
    /// Normalized code -> registered code.
    folded: FxHashMap<TagCode, TagCode>,
}

impl Registry {
    /// Creates an empty registry with the given canonical case.
    pub fn new(case: TagCase) -> Self {
        Self {
            case,
            tags: FxHashMap::default(),
            folded: FxHashMap::default(),
        }
    }

    /// Creates a registry holding the built-in DAAP/DMAP tags.
    pub fn builtin() -> Self {
        let mut registry = Self::new(TagCase::Lower);
        registry.tags.reserve(builtin::BUILTIN_TAGS.len());
        for &(code, name, kind) in builtin::BUILTIN_TAGS {
            registry.insert(TagCode(code), Cow::Borrowed(name), kind);
        }
        registry
    }

    /// Returns the process-wide immutable builtin registry.
    pub fn shared() -> Arc<Registry> {
        Arc::clone(&SHARED_BUILTIN)
    }

    /// Borrows the process-wide builtin registry.
    pub(crate) fn builtin_ref() -> &'static Registry {
        &SHARED_BUILTIN
    }

    pub fn case(&self) -> TagCase {
        self.case
    }

    /// Registers (or replaces) a tag definition.
    pub fn register(
        &mut self,
        code: impl AsRef<[u8]>,
        name: impl Into<Cow<'static, str>>,
        kind: Kind,
    ) -> Result<(), BuildError> {
        let code = TagCode::from_slice(code.as_ref())?;
        self.insert(code, name.into(), kind);
        Ok(())
    }

    fn insert(&mut self, code: TagCode, name: Cow<'static, str>, kind: Kind) {
        self.tags.insert(code, Tag { code, name, kind });
        let normalized = code.to_case(self.case);
        if normalized == code {
            // A code already in canonical case owns its normalized slot.
            self.folded.insert(normalized, code);
        } else {
            self.folded.entry(normalized).or_insert(code);
        }
    }

    /// Looks up a tag, exact bytes first, then case-normalized.
    pub fn get(&self, code: TagCode) -> Option<&Tag> {
        self.tags.get(&code).or_else(|| {
            self.folded
                .get(&code.to_case(self.case))
                .and_then(|registered| self.tags.get(registered))
        })
    }

    /// Looks up a tag, failing with [`BuildError::UnknownTag`].
    pub fn lookup(&self, code: impl AsRef<[u8]>) -> Result<&Tag, BuildError> {
        let code = TagCode::from_slice(code.as_ref())?;
        self.get(code).ok_or(BuildError::UnknownTag { code })
    }

    pub fn contains(&self, code: TagCode) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over registered tags in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    // =========================================================================
    // ELEMENT CONSTRUCTION
    // =========================================================================

    /// Builds an element, checking that `value` matches the tag's kind.
    ///
    /// Integers must have the kind's signedness and fit its nominal width.
    pub fn element(&self, code: impl AsRef<[u8]>, value: impl Into<Value>) -> Result<Element, BuildError> {
        let tag = self.lookup(code)?;
        let value = value.into();
        if !tag.kind.accepts(&value) {
            return Err(BuildError::KindMismatch {
                code: tag.code,
                expected: tag.kind,
                found: value.shape(),
            });
        }
        if let (Value::Integer(int), Some(max)) = (&value, tag.kind.integer_width()) {
            if int.width() > max {
                return Err(BuildError::Overflow {
                    value: int.value(),
                    width: max as u8,
                    signedness: if int.is_signed() { "signed" } else { "unsigned" },
                });
            }
        }
        Ok(Element::from_parts(tag.clone(), value))
    }

    /// Builds an integer element with the minimal width, signedness from the tag.
    pub fn number(&self, code: impl AsRef<[u8]>, value: impl Into<i128>) -> Result<Element, BuildError> {
        self.integer_element(code, value.into(), None)
    }

    /// Builds an integer element with an explicit box width.
    pub fn number_with_width(
        &self,
        code: impl AsRef<[u8]>,
        value: impl Into<i128>,
        width: Width,
    ) -> Result<Element, BuildError> {
        self.integer_element(code, value.into(), Some(width))
    }

    fn integer_element(
        &self,
        code: impl AsRef<[u8]>,
        value: i128,
        width: Option<Width>,
    ) -> Result<Element, BuildError> {
        let tag = self.lookup(code)?;
        if !tag.kind.is_integer() {
            return Err(BuildError::KindMismatch {
                code: tag.code,
                expected: tag.kind,
                found: "integer",
            });
        }
        let int = Integer::new(value, width, tag.kind.is_signed())?;
        let code = tag.code;
        self.element(code, int)
    }

    /// Builds a string element.
    pub fn text(&self, code: impl AsRef<[u8]>, value: impl Into<Vec<u8>>) -> Result<Element, BuildError> {
        self.element(code, Value::Text(value.into()))
    }

    /// Builds a version element.
    pub fn version(&self, code: impl AsRef<[u8]>, major: u16, minor: u16) -> Result<Element, BuildError> {
        self.element(code, Version::new(major, minor)?)
    }

    /// Builds a time element.
    pub fn time(&self, code: impl AsRef<[u8]>, timestamp: Timestamp) -> Result<Element, BuildError> {
        self.element(code, timestamp)
    }

    /// Builds a list element from already constructed children.
    pub fn list(
        &self,
        code: impl AsRef<[u8]>,
        children: impl IntoIterator<Item = Element>,
    ) -> Result<Element, BuildError> {
        self.element(code, children.into_iter().collect::<Container>())
    }
}
