//! Ordered, lazily parsed sequences of elements.
//!
//! A decoded list starts out as a byte range in a shared source. The first
//! observing call parses that range once, restores the source cursor, and
//! keeps the parsed children from then on.

use std::cell::{OnceCell, RefCell};
use std::fmt;

use crate::codec::element::{LazyRange, materialize};
use crate::error::DecodeError;
use crate::model::Element;

/// The children of a list element.
#[derive(Clone)]
pub struct Container {
    children: OnceCell<Vec<Element>>,
    /// Set until the first successful materialization.
    pending: RefCell<Option<LazyRange>>,
}

impl Container {
    /// Creates an already materialized container.
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            children: OnceCell::from(elements),
            pending: RefCell::new(None),
        }
    }

    pub(crate) fn lazy(range: LazyRange) -> Self {
        Self {
            children: OnceCell::new(),
            pending: RefCell::new(Some(range)),
        }
    }

    /// Returns true once the children have been parsed (or were given).
    pub fn is_materialized(&self) -> bool {
        self.children.get().is_some()
    }

    /// Parses the pending byte range if needed and returns the children.
    ///
    /// The scan runs at most once. On failure nothing is retained and the
    /// next call scans again.
    pub fn elements(&self) -> Result<&[Element], DecodeError> {
        if let Some(children) = self.children.get() {
            return Ok(children);
        }
        let range = match self.pending.borrow().as_ref() {
            Some(range) => range.clone(),
            None => return Ok(self.children.get_or_init(Vec::new)),
        };
        let parsed = materialize(&range)?;
        self.pending.borrow_mut().take();
        Ok(self.children.get_or_init(|| parsed))
    }

    pub fn len(&self) -> Result<usize, DecodeError> {
        Ok(self.elements()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DecodeError> {
        Ok(self.elements()?.is_empty())
    }

    pub fn get(&self, index: usize) -> Result<Option<&Element>, DecodeError> {
        Ok(self.elements()?.get(index))
    }

    pub fn iter(&self) -> Result<std::slice::Iter<'_, Element>, DecodeError> {
        Ok(self.elements()?.iter())
    }

    /// Returns the first child whose code matches, ignoring ASCII case.
    pub fn find(&self, code: impl AsRef<[u8]>) -> Result<Option<&Element>, DecodeError> {
        let code = code.as_ref();
        Ok(self
            .elements()?
            .iter()
            .find(|e| e.code().as_bytes().eq_ignore_ascii_case(code)))
    }

    /// Compares children element by element, materializing both sides.
    pub fn try_eq(&self, other: &Container) -> Result<bool, DecodeError> {
        Ok(self.elements()? == other.elements()?)
    }

    /// Appends a child, materializing first.
    pub fn push(&mut self, element: Element) -> Result<(), DecodeError> {
        self.elements()?;
        if let Some(children) = self.children.get_mut() {
            children.push(element);
        }
        Ok(())
    }

    pub fn into_elements(self) -> Result<Vec<Element>, DecodeError> {
        self.elements()?;
        Ok(self.children.into_inner().unwrap_or_default())
    }
}

impl PartialEq for Container {
    /// A container that fails to materialize is unequal to everything.
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Element>> for Container {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}

impl FromIterator<Element> for Container {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.children.get(), self.pending.borrow().as_ref()) {
            (Some(children), _) => f.debug_list().entries(children).finish(),
            (None, Some(range)) => f
                .debug_struct("Unparsed")
                .field("start", &range.start)
                .field("length", &range.length)
                .finish(),
            (None, None) => f.debug_list().finish(),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(children) = self.children.get() else {
            return f.write_str("<unparsed>");
        };
        f.write_str("[")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::{self, Cursor, Read, Seek, SeekFrom};
    use std::rc::Rc;

    use super::*;
    use crate::codec::{DecodeOptions, SharedSource, decode_with_options, encode};
    use crate::model::{Integer, Value};
    use crate::registry::Registry;

    /// Cursor that counts `read` calls.
    struct CountingCursor {
        inner: Cursor<Vec<u8>>,
        reads: Rc<Cell<usize>>,
    }

    impl Read for CountingCursor {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(buf)
        }
    }

    impl Seek for CountingCursor {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn sample_list() -> Element {
        let registry = Registry::shared();
        registry
            .list(
                "mlcl",
                [
                    registry.number("miid", 1).unwrap(),
                    registry.text("minm", "one").unwrap(),
                    registry.number("miid", 2).unwrap(),
                ],
            )
            .unwrap()
    }

    fn counting_source(bytes: Vec<u8>) -> (SharedSource, Rc<Cell<usize>>) {
        let reads = Rc::new(Cell::new(0));
        let source = SharedSource::new(CountingCursor {
            inner: Cursor::new(bytes),
            reads: Rc::clone(&reads),
        });
        (source, reads)
    }

    #[test]
    fn test_new_is_materialized() {
        let container = Container::new(vec![]);
        assert!(container.is_materialized());
        assert_eq!(container.len().unwrap(), 0);
        assert!(Container::default().is_materialized());
        assert!(Container::default().is_empty().unwrap());
    }

    #[test]
    fn test_decoded_list_is_lazy() {
        let bytes = encode(&sample_list()).unwrap();
        let source = SharedSource::from_bytes(bytes);
        let element = decode_with_options(&source, &DecodeOptions::new()).unwrap();
        let container = element.value().as_container().unwrap();

        assert!(!container.is_materialized());
        assert_eq!(format!("{}", container), "<unparsed>");
        assert_eq!(container.len().unwrap(), 3);
        assert!(container.is_materialized());
    }

    #[test]
    fn test_scan_runs_once() {
        let bytes = encode(&sample_list()).unwrap();
        let (source, reads) = counting_source(bytes);
        let element = decode_with_options(&source, &DecodeOptions::new()).unwrap();
        let container = element.value().as_container().unwrap();

        let before = reads.get();
        assert_eq!(container.len().unwrap(), 3);
        let after_first = reads.get();
        assert!(after_first > before);

        assert_eq!(container.iter().unwrap().count(), 3);
        assert!(container.get(2).unwrap().is_some());
        assert_eq!(reads.get(), after_first);
    }

    #[test]
    fn test_cursor_restored_after_materialization() {
        let mut bytes = encode(&sample_list()).unwrap();
        let list_len = bytes.len() as u64;
        let trailer = encode(&Registry::shared().text("minm", "after").unwrap()).unwrap();
        bytes.extend_from_slice(&trailer);

        let source = SharedSource::from_bytes(bytes);
        let element = decode_with_options(&source, &DecodeOptions::new()).unwrap();
        // Cursor sits right after the list's tag and length prefix.
        assert_eq!(source.tell().unwrap(), 8);

        source.seek(list_len).unwrap();
        let container = element.value().as_container().unwrap();
        assert_eq!(container.len().unwrap(), 3);
        assert_eq!(source.tell().unwrap(), list_len);

        let sibling = decode_with_options(&source, &DecodeOptions::new()).unwrap();
        assert_eq!(sibling.value().as_str(), Some("after"));
    }

    #[test]
    fn test_find_and_push() {
        let mut container = Container::new(vec![
            Registry::shared().text("minm", "name").unwrap(),
        ]);
        assert!(container.find("MINM").unwrap().is_some());
        assert!(container.find("miid").unwrap().is_none());

        container
            .push(Registry::shared().number("miid", 7).unwrap())
            .unwrap();
        let found = container.find("miid").unwrap().unwrap();
        assert_eq!(found.value(), &Value::Integer(Integer::unsigned(7)));
    }

    #[test]
    fn test_equality_materializes() {
        let original = sample_list();
        let bytes = encode(&original).unwrap();
        let decoded = decode_with_options(&SharedSource::from_bytes(bytes), &DecodeOptions::new()).unwrap();

        let lazy = decoded.value().as_container().unwrap();
        let built = original.value().as_container().unwrap();
        assert!(lazy.try_eq(built).unwrap());
        assert_eq!(lazy, built);
        assert!(lazy.is_materialized());
    }

    #[test]
    fn test_clone_of_lazy_container_is_independent() {
        let bytes = encode(&sample_list()).unwrap();
        let decoded = decode_with_options(&SharedSource::from_bytes(bytes), &DecodeOptions::new()).unwrap();
        let lazy = decoded.value().as_container().unwrap();
        let copy = lazy.clone();

        assert_eq!(copy.len().unwrap(), 3);
        assert!(!lazy.is_materialized());

        let owned = lazy.clone().into_elements().unwrap();
        assert_eq!(owned.len(), 3);
        assert_eq!(owned[1].value().as_str(), Some("one"));
    }
}
