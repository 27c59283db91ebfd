//! Seekable byte sources.
//!
//! The codec never owns the bytes it decodes. Callers wrap a reader in a
//! [`SharedSource`]; lazy containers keep a clone of that handle and seek
//! back into it when first observed.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use crate::error::DecodeError;

/// A readable, seekable stream of bytes with absolute positions.
pub trait ByteSource {
    /// Fills `buf` completely or fails with [`io::ErrorKind::UnexpectedEof`].
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// Returns the current absolute position.
    fn tell(&mut self) -> io::Result<u64>;

    /// Moves to an absolute position.
    fn seek(&mut self, pos: u64) -> io::Result<()>;

    /// Returns the total length in bytes. Must not move the cursor.
    fn len(&mut self) -> io::Result<u64>;
}

impl<T: Read + Seek> ByteSource for T {
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        Read::read_exact(self, buf)
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn seek(&mut self, pos: u64) -> io::Result<()> {
        Seek::seek(self, SeekFrom::Start(pos)).map(|_| ())
    }

    fn len(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let end = Seek::seek(self, SeekFrom::End(0))?;
        if pos != end {
            Seek::seek(self, SeekFrom::Start(pos))?;
        }
        Ok(end)
    }
}

/// Shared handle to a byte source.
///
/// Cloning the handle does not clone the source. The handle is `!Send`:
/// a source's cursor must only be driven from one thread.
#[derive(Clone)]
pub struct SharedSource {
    inner: Rc<RefCell<dyn ByteSource>>,
}

impl SharedSource {
    pub fn new<S: ByteSource + 'static>(source: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(source)),
        }
    }

    /// Wraps an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Borrows the source mutably, failing if it is already borrowed.
    pub(crate) fn borrow_mut(&self) -> Result<RefMut<'_, dyn ByteSource + 'static>, DecodeError> {
        self.inner.try_borrow_mut().map_err(|_| DecodeError::SourceBusy)
    }

    /// Returns the current cursor position.
    pub fn tell(&self) -> Result<u64, DecodeError> {
        Ok(self.borrow_mut()?.tell()?)
    }

    /// Moves the cursor to an absolute position.
    pub fn seek(&self, pos: u64) -> Result<(), DecodeError> {
        Ok(self.borrow_mut()?.seek(pos)?)
    }

    /// Returns true if both handles refer to the same source.
    pub fn ptr_eq(&self, other: &SharedSource) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SharedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSource")
            .field("handles", &Rc::strong_count(&self.inner))
            .finish()
    }
}
