//! Binary encoding/decoding for DMAP.
//!
//! This module implements the tagged, length-prefixed DMAP wire format used
//! by DAAP and DACP.

pub mod element;
pub mod primitives;
pub mod source;
pub mod value;

pub use element::{DecodeOptions, decode, decode_bytes, decode_with_options, encode, encode_element};
pub use primitives::{Reader, Writer};
pub use source::{ByteSource, SharedSource};
pub use value::encode_value;
