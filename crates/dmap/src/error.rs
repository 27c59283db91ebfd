//! Error types for DMAP decoding, construction, encoding and validation.

use std::io;

use thiserror::Error;

use crate::model::Kind;
use crate::registry::TagCode;

/// Error categories shared by every error type in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Tag code absent from the registry
    UnknownTag,
    /// E002: Fewer bytes available than a fixed-size read requires
    TruncatedInput,
    /// E003: Declared length inconsistent with the available bytes
    MalformedPayload,
    /// E004: Integer box width not in {1, 2, 4, 8}
    UnsupportedWidth,
    /// E005: Integer does not fit the requested width
    Overflow,
    /// E006: Version or timestamp component out of bounds
    Range,
    /// E007: Value shape does not match the tag's kind
    KindMismatch,
    /// E008: Byte source failure
    Io,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownTag => "E001",
            ErrorCode::TruncatedInput => "E002",
            ErrorCode::MalformedPayload => "E003",
            ErrorCode::UnsupportedWidth => "E004",
            ErrorCode::Overflow => "E005",
            ErrorCode::Range => "E006",
            ErrorCode::KindMismatch => "E007",
            ErrorCode::Io => "E008",
        }
    }
}

/// Error during binary decoding or lazy container materialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Unknown tag ===
    #[error("[E001] unknown tag {code}")]
    UnknownTag { code: TagCode },

    // === E002: Truncated input ===
    #[error("[E002] unexpected end of input while reading {context} (needed {needed} bytes, {available} available)")]
    TruncatedInput {
        context: &'static str,
        needed: u64,
        available: u64,
    },

    // === E003: Malformed payload ===
    #[error("[E003] {context} declares {declared} bytes but only {available} remain")]
    MalformedPayload {
        context: &'static str,
        declared: u64,
        available: u64,
    },

    #[error("[E003] {context} at offset {offset} overruns its container ending at {end}")]
    ChildOverrun {
        context: &'static str,
        offset: u64,
        end: u64,
    },

    #[error("[E003] {kind:?} payload must be {expected} bytes, found {found}")]
    FixedLengthMismatch {
        kind: Kind,
        expected: u32,
        found: u32,
    },

    #[error("[E003] lists nested deeper than {max} levels")]
    NestingTooDeep { max: usize },

    // === E004: Unsupported width ===
    #[error("[E004] unsupported integer width {width} (expected 1, 2, 4 or 8)")]
    UnsupportedWidth { width: u32 },

    // === E006: Range ===
    #[error("[E006] {field} value {value} out of range [0, {max}]")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    // === E008: Byte source ===
    #[error("[E008] byte source error ({kind:?}): {message}")]
    Io { kind: io::ErrorKind, message: String },

    #[error("[E008] byte source is already borrowed")]
    SourceBusy,
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnknownTag { .. } => ErrorCode::UnknownTag,
            DecodeError::TruncatedInput { .. } => ErrorCode::TruncatedInput,
            DecodeError::MalformedPayload { .. }
            | DecodeError::ChildOverrun { .. }
            | DecodeError::FixedLengthMismatch { .. }
            | DecodeError::NestingTooDeep { .. } => ErrorCode::MalformedPayload,
            DecodeError::UnsupportedWidth { .. } => ErrorCode::UnsupportedWidth,
            DecodeError::OutOfRange { .. } => ErrorCode::Range,
            DecodeError::Io { .. } | DecodeError::SourceBusy => ErrorCode::Io,
        }
    }
}

impl From<io::Error> for DecodeError {
    fn from(err: io::Error) -> Self {
        DecodeError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Error while constructing an element from a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("[E001] tag code must be exactly 4 bytes, got {len}")]
    InvalidTagCode { len: usize },

    #[error("[E001] unknown tag {code}")]
    UnknownTag { code: TagCode },

    #[error("[E004] unsupported integer width {width} (expected 1, 2, 4 or 8)")]
    UnsupportedWidth { width: u32 },

    #[error("[E005] value {value} does not fit in {width} {signedness} byte(s)")]
    Overflow {
        value: i128,
        width: u8,
        signedness: &'static str,
    },

    #[error("[E006] {field} value {value} out of range [0, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: u64,
    },

    #[error("[E007] tag {code} expects a {expected:?} value, got {found}")]
    KindMismatch {
        code: TagCode,
        expected: Kind,
        found: &'static str,
    },
}

impl BuildError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BuildError::InvalidTagCode { .. } | BuildError::UnknownTag { .. } => {
                ErrorCode::UnknownTag
            }
            BuildError::UnsupportedWidth { .. } => ErrorCode::UnsupportedWidth,
            BuildError::Overflow { .. } => ErrorCode::Overflow,
            BuildError::OutOfRange { .. } => ErrorCode::Range,
            BuildError::KindMismatch { .. } => ErrorCode::KindMismatch,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E003] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A lazy container had to be parsed before it could be written.
    #[error(transparent)]
    Materialize(#[from] DecodeError),
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::LengthExceedsLimit { .. } => ErrorCode::MalformedPayload,
            EncodeError::Materialize(err) => err.code(),
        }
    }
}

/// Error raised by strict validation of an element tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("[E001] tag {code} is not registered")]
    UnknownTag { code: TagCode },

    #[error("[E007] tag {code} is registered as {registered:?} but holds a {found:?} value")]
    KindMismatch {
        code: TagCode,
        registered: Kind,
        found: Kind,
    },

    #[error("[E005] tag {code} allows {max} byte integers, found {width}")]
    WidthExceedsKind { code: TagCode, max: u8, width: u8 },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ValidationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::UnknownTag { .. } => ErrorCode::UnknownTag,
            ValidationError::KindMismatch { .. } => ErrorCode::KindMismatch,
            ValidationError::WidthExceedsKind { .. } => ErrorCode::Overflow,
            ValidationError::Decode(err) => err.code(),
        }
    }
}
