//! Wire constants and decoding limits.

/// Length of a tag code on the wire.
pub const TAG_LEN: usize = 4;

/// Length of the big-endian payload length that follows every tag.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Bytes occupied by an element before its payload.
pub const ELEMENT_HEADER_LEN: u64 = (TAG_LEN + LENGTH_PREFIX_LEN) as u64;

/// Payload length of version and time values.
pub const FIXED_PAYLOAD_LEN: u32 = 4;

/// Largest accepted `major` or `minor` version component.
pub const MAX_VERSION_COMPONENT: u16 = 255;

/// Maximum nesting of lists accepted while decoding.
///
/// Eager decoding recurses once per level, so this also bounds stack use.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Largest payload a single length prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;
