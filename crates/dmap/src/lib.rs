//! DMAP: the tagged, length-prefixed binary format behind DAAP and DACP.
//!
//! This crate provides decoding, encoding, construction and validation of
//! DMAP element trees.
//!
//! # Overview
//!
//! Every DMAP element is a 4-byte tag, a 4-byte big-endian length and a
//! payload. The tag determines how the payload is read:
//! - **Strings**: raw bytes, no charset conversion
//! - **Integers**: big-endian boxes of 1, 2, 4 or 8 bytes, signed or unsigned
//! - **Versions**: two big-endian u16s (`major.minor`)
//! - **Times**: a big-endian u32 of seconds since the Unix epoch
//! - **Lists**: the concatenated encodings of child elements
//!
//! # Quick Start
//!
//! ```rust
//! use dmap::{ElementBuilder, SharedSource, decode, encode};
//!
//! // Build a server-info response
//! let response = ElementBuilder::new("msrv")
//!     .number("mstt", 200)
//!     .version("mpro", 2, 0)
//!     .text("minm", "Music Library")
//!     .build()
//!     .unwrap();
//!
//! // Encode to binary
//! let bytes = encode(&response).unwrap();
//!
//! // Decode back; lists are parsed on first use
//! let source = SharedSource::from_bytes(bytes);
//! let decoded = decode(&source).unwrap();
//! let status = decoded.find("mstt").unwrap().unwrap();
//! assert_eq!(status.value().as_u64(), Some(200));
//! assert_eq!(decoded, response);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Element, Value, Container, builders)
//! - [`codec`]: Binary encoding/decoding over seekable byte sources
//! - [`registry`]: Tag codes, names and kinds, including the builtin DAAP table
//! - [`validate`]: Strict validation of decoded trees
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoding limits
//!
//! # Lazy Lists
//!
//! Decoding a list reads only its tag and length. The children are parsed
//! the first time the list is observed, after which the source cursor is
//! put back where it was. Use [`DecodeOptions::eager`] to parse everything
//! up front.
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Declared lengths are checked against the source or enclosing list
//!   before any payload is allocated
//! - List nesting is bounded by [`limits::MAX_NESTING_DEPTH`]
//! - Invalid data is rejected with descriptive errors

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod registry;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{ByteSource, DecodeOptions, SharedSource, decode, decode_bytes, decode_with_options, encode};
pub use error::{BuildError, DecodeError, EncodeError, ErrorCode, ValidationError};
pub use model::{Container, Element, ElementBuilder, Integer, Kind, Timestamp, Value, Version, Width};
pub use registry::{Registry, Tag, TagCase, TagCode};
pub use validate::{validate_element, validate_elements};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
