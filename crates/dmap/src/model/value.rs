//! Value types carried by DMAP elements.
//!
//! Every tag resolves to a [`Kind`]; an element's [`Value`] must match it.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{BuildError, DecodeError};
use crate::limits::MAX_VERSION_COMPONENT;
use crate::model::Container;
use crate::util::datetime::{DateTimeParseError, format_timestamp_rfc3339, parse_timestamp_rfc3339};

/// Primitive kinds a tag can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Byte,
    Short,
    Integer,
    Long,
    SignedByte,
    SignedShort,
    SignedInteger,
    SignedLong,
    Version,
    Time,
    List,
}

impl Kind {
    /// Returns the nominal box width of an integer kind.
    pub fn integer_width(self) -> Option<Width> {
        match self {
            Kind::Byte | Kind::SignedByte => Some(Width::One),
            Kind::Short | Kind::SignedShort => Some(Width::Two),
            Kind::Integer | Kind::SignedInteger => Some(Width::Four),
            Kind::Long | Kind::SignedLong => Some(Width::Eight),
            _ => None,
        }
    }

    /// Returns true for the eight integer kinds.
    pub fn is_integer(self) -> bool {
        self.integer_width().is_some()
    }

    /// Returns true for signed integer kinds.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Kind::SignedByte | Kind::SignedShort | Kind::SignedInteger | Kind::SignedLong
        )
    }

    /// Returns true for the list kind.
    pub fn is_list(self) -> bool {
        self == Kind::List
    }

    /// Returns the integer kind for a box width and signedness.
    pub fn for_integer(width: Width, signed: bool) -> Kind {
        match (width, signed) {
            (Width::One, false) => Kind::Byte,
            (Width::Two, false) => Kind::Short,
            (Width::Four, false) => Kind::Integer,
            (Width::Eight, false) => Kind::Long,
            (Width::One, true) => Kind::SignedByte,
            (Width::Two, true) => Kind::SignedShort,
            (Width::Four, true) => Kind::SignedInteger,
            (Width::Eight, true) => Kind::SignedLong,
        }
    }

    /// Returns true if `value` has the shape this kind requires.
    ///
    /// Integer kinds check signedness only; the width ceiling is enforced
    /// separately when constructing.
    pub fn accepts(self, value: &Value) -> bool {
        match value {
            Value::Text(_) => self == Kind::String,
            Value::Integer(int) => self.is_integer() && self.is_signed() == int.is_signed(),
            Value::Version(_) => self == Kind::Version,
            Value::Timestamp(_) => self == Kind::Time,
            Value::Container(_) => self == Kind::List,
        }
    }
}

/// Integer box width on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Width {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl Width {
    /// All widths, narrowest first.
    pub const ALL: [Width; 4] = [Width::One, Width::Two, Width::Four, Width::Eight];

    /// Creates a Width from a wire length.
    pub fn from_len(len: u32) -> Option<Width> {
        match len {
            1 => Some(Width::One),
            2 => Some(Width::Two),
            4 => Some(Width::Four),
            8 => Some(Width::Eight),
            _ => None,
        }
    }

    /// Returns the number of bytes in this width.
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// Returns true if `value` is representable in this width.
    pub fn holds(self, value: i128, signed: bool) -> bool {
        let bits = self.bytes() as u32 * 8;
        if signed {
            let max = (1i128 << (bits - 1)) - 1;
            let min = -(1i128 << (bits - 1));
            (min..=max).contains(&value)
        } else {
            (0..=(1i128 << bits) - 1).contains(&value)
        }
    }

    /// Returns the narrowest width holding `value`, if any.
    pub fn minimal(value: i128, signed: bool) -> Option<Width> {
        Width::ALL.into_iter().find(|w| w.holds(value, signed))
    }
}

impl TryFrom<u32> for Width {
    type Error = BuildError;

    fn try_from(bytes: u32) -> Result<Self, Self::Error> {
        Width::from_len(bytes).ok_or(BuildError::UnsupportedWidth { width: bytes })
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// An integer together with its box width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer {
    value: i128,
    width: Width,
    signed: bool,
}

impl Integer {
    /// Creates an integer, choosing the minimal width when `width` is None.
    ///
    /// A zero value gets width 1. Negative values never fit unsigned.
    pub fn new(value: impl Into<i128>, width: Option<Width>, signed: bool) -> Result<Self, BuildError> {
        let value = value.into();
        let width = match width {
            Some(w) if w.holds(value, signed) => w,
            Some(w) => return Err(overflow(value, w, signed)),
            None => Width::minimal(value, signed).ok_or_else(|| overflow(value, Width::Eight, signed))?,
        };
        Ok(Self { value, width, signed })
    }

    /// Creates an unsigned integer with the minimal width.
    pub fn unsigned(value: u64) -> Self {
        let value = value as i128;
        let width = Width::minimal(value, false).unwrap_or(Width::Eight);
        Self { value, width, signed: false }
    }

    /// Creates a signed integer with the minimal width.
    pub fn signed(value: i64) -> Self {
        let value = value as i128;
        let width = Width::minimal(value, true).unwrap_or(Width::Eight);
        Self { value, width, signed: true }
    }

    /// Interprets big-endian bytes as an integer of `bytes.len()` width.
    pub(crate) fn from_be_bytes(bytes: &[u8], width: Width, signed: bool) -> Self {
        let negative = signed && bytes.first().is_some_and(|b| b & 0x80 != 0);
        let mut value: i128 = if negative { -1 } else { 0 };
        for &b in bytes {
            value = (value << 8) | b as i128;
        }
        Self { value, width, signed }
    }

    /// Writes the value as `width` big-endian two's complement bytes.
    pub(crate) fn to_be_bytes(self) -> Vec<u8> {
        let all = self.value.to_be_bytes();
        all[all.len() - self.width.bytes()..].to_vec()
    }

    pub fn value(&self) -> i128 {
        self.value
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Returns the value as u64 if it is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        u64::try_from(self.value).ok()
    }

    /// Returns the value as i64 if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        i64::try_from(self.value).ok()
    }
}

fn overflow(value: i128, width: Width, signed: bool) -> BuildError {
    BuildError::Overflow {
        value,
        width: width as u8,
        signedness: if signed { "signed" } else { "unsigned" },
    }
}

/// A protocol version: two components in `0..=MAX_VERSION_COMPONENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u16,
    minor: u16,
}

impl Version {
    /// Creates a version, rejecting components above [`MAX_VERSION_COMPONENT`].
    pub fn new(major: u16, minor: u16) -> Result<Self, BuildError> {
        for (field, value) in [("version.major", major), ("version.minor", minor)] {
            if value > MAX_VERSION_COMPONENT {
                return Err(BuildError::OutOfRange {
                    field,
                    value: value as i64,
                    max: MAX_VERSION_COMPONENT as u64,
                });
            }
        }
        Ok(Self { major, minor })
    }

    pub(crate) fn from_wire(major: u16, minor: u16) -> Result<Self, DecodeError> {
        for (field, value) in [("version.major", major), ("version.minor", minor)] {
            if value > MAX_VERSION_COMPONENT {
                return Err(DecodeError::OutOfRange {
                    field,
                    value: value as u64,
                    max: MAX_VERSION_COMPONENT as u64,
                });
            }
        }
        Ok(Self { major, minor })
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Seconds since the Unix epoch, limited to the unsigned 32-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Creates a timestamp from signed seconds.
    pub fn new(secs: i64) -> Result<Self, BuildError> {
        u32::try_from(secs).map(Self).map_err(|_| BuildError::OutOfRange {
            field: "timestamp",
            value: secs,
            max: u32::MAX as u64,
        })
    }

    /// Creates a timestamp from unsigned seconds (always in range).
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the current time, truncated to whole seconds.
    pub fn now() -> Result<Self, BuildError> {
        Self::from_system_time(SystemTime::now())
    }

    /// Converts a system time, rejecting times before the epoch or after 2106.
    pub fn from_system_time(time: SystemTime) -> Result<Self, BuildError> {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self::new(i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)),
            Err(before) => Self::new(-i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX)),
        }
    }

    /// Parses an RFC 3339 datetime and converts it to UTC seconds.
    pub fn parse_rfc3339(s: &str) -> Result<Self, DateTimeParseError> {
        let secs = parse_timestamp_rfc3339(s)?;
        Self::new(secs).map_err(|_| DateTimeParseError {
            message: format!("datetime outside the 32-bit epoch range: {}", s),
        })
    }

    pub fn secs(&self) -> u32 {
        self.0
    }

    pub fn to_system_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.0 as u64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp_rfc3339(self.0 as i64))
    }
}

/// The payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw string bytes; no charset is assumed.
    Text(Vec<u8>),
    Integer(Integer),
    Version(Version),
    Timestamp(Timestamp),
    /// Ordered child elements, possibly not parsed yet.
    Container(Container),
}

impl Value {
    /// Short name of the value's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(int) if int.is_signed() => "signed integer",
            Value::Integer(_) => "unsigned integer",
            Value::Version(_) => "version",
            Value::Timestamp(_) => "timestamp",
            Value::Container(_) => "container",
        }
    }

    /// Returns the kind this value would be decoded as.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::String,
            Value::Integer(int) => Kind::for_integer(int.width(), int.is_signed()),
            Value::Version(_) => Kind::Version,
            Value::Timestamp(_) => Kind::Time,
            Value::Container(_) => Kind::List,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the text as UTF-8, if it is text and valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Value::Integer(int) => Some(int),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_integer().and_then(Integer::as_u64)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(Integer::as_i64)
    }

    pub fn as_version(&self) -> Option<Version> {
        match self {
            Value::Version(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Value::Integer(int) => write!(f, "{}", int.value()),
            Value::Version(v) => write!(f, "{}", v),
            Value::Timestamp(t) => write!(f, "{}", t),
            Value::Container(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Text(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Text(bytes.to_vec())
    }
}

impl From<Integer> for Value {
    fn from(int: Integer) -> Self {
        Value::Integer(int)
    }
}

impl From<Version> for Value {
    fn from(v: Version) -> Self {
        Value::Version(v)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Container> for Value {
    fn from(c: Container) -> Self {
        Value::Container(c)
    }
}
