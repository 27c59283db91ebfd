//! Builder API for ergonomic nested element construction.
//!
//! Provides a fluent interface for building list elements and their
//! children.
//!
//! # Example
//!
//! ```rust
//! use dmap::model::builder::ElementBuilder;
//! use dmap::Timestamp;
//!
//! let response = ElementBuilder::new("msrv")
//!     .number("mstt", 200)
//!     .version("mpro", 2, 0)
//!     .text("minm", "Music Library")
//!     .time("mstc", Timestamp::from_secs(1_200_000_000))
//!     .list("mlcl", |b| b
//!         .list("mlit", |b| b.number("miid", 1).text("minm", "First"))
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(response.name(), "dmap.serverinforesponse");
//! ```

use crate::error::BuildError;
use crate::model::{Element, Timestamp, Value, Width};
use crate::registry::{Registry, TagCode};

/// Builder for a list element.
///
/// Construction errors are deferred: the first one is kept and returned by
/// [`ElementBuilder::build`], later calls become no-ops.
#[derive(Debug, Clone)]
pub struct ElementBuilder<'r> {
    registry: &'r Registry,
    code: Result<TagCode, BuildError>,
    children: Vec<Element>,
    error: Option<BuildError>,
}

impl ElementBuilder<'static> {
    /// Creates a builder for a builtin list tag.
    pub fn new(code: impl AsRef<[u8]>) -> Self {
        Self::with_registry(Registry::builtin_ref(), code)
    }
}

impl<'r> ElementBuilder<'r> {
    /// Creates a builder that resolves tags against `registry`.
    pub fn with_registry(registry: &'r Registry, code: impl AsRef<[u8]>) -> Self {
        Self {
            registry,
            code: TagCode::from_slice(code.as_ref()),
            children: Vec::new(),
            error: None,
        }
    }

    /// Appends the result of a construction, keeping the first error.
    pub fn child(mut self, result: Result<Element, BuildError>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match result {
            Ok(element) => self.children.push(element),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Appends an already constructed element.
    pub fn element(mut self, element: Element) -> Self {
        if self.error.is_none() {
            self.children.push(element);
        }
        self
    }

    /// Appends a child built from any value.
    pub fn value(self, code: impl AsRef<[u8]>, value: impl Into<Value>) -> Self {
        let result = self.registry.element(code, value);
        self.child(result)
    }

    /// Appends an integer child using the minimal width.
    pub fn number(self, code: impl AsRef<[u8]>, value: impl Into<i128>) -> Self {
        let result = self.registry.number(code, value);
        self.child(result)
    }

    /// Appends an integer child with an explicit width.
    pub fn number_with_width(self, code: impl AsRef<[u8]>, value: impl Into<i128>, width: Width) -> Self {
        let result = self.registry.number_with_width(code, value, width);
        self.child(result)
    }

    pub fn text(self, code: impl AsRef<[u8]>, value: impl Into<Vec<u8>>) -> Self {
        let result = self.registry.text(code, value);
        self.child(result)
    }

    pub fn version(self, code: impl AsRef<[u8]>, major: u16, minor: u16) -> Self {
        let result = self.registry.version(code, major, minor);
        self.child(result)
    }

    pub fn time(self, code: impl AsRef<[u8]>, timestamp: Timestamp) -> Self {
        let result = self.registry.time(code, timestamp);
        self.child(result)
    }

    /// Appends a nested list built by `f`.
    pub fn list<F>(self, code: impl AsRef<[u8]>, f: F) -> Self
    where
        F: FnOnce(ElementBuilder<'r>) -> ElementBuilder<'r>,
    {
        if self.error.is_some() {
            return self;
        }
        let result = f(ElementBuilder::with_registry(self.registry, code)).build();
        self.child(result)
    }

    /// Builds the list element.
    pub fn build(self) -> Result<Element, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let code = self.code?;
        self.registry.list(code, self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Kind;
    use crate::registry::TagCase;

    #[test]
    fn test_server_info() {
        let element = ElementBuilder::new("msrv")
            .number("mstt", 200)
            .version("mpro", 2, 0)
            .version("apro", 3, 0)
            .text("minm", "Library")
            .number("msdc", 1)
            .build()
            .unwrap();

        let children = element.container().unwrap();
        assert_eq!(children.len().unwrap(), 5);
        assert_eq!(children.get(0).unwrap().unwrap().value().as_u64(), Some(200));
        assert_eq!(
            children.get(1).unwrap().unwrap().value().as_version().unwrap().to_string(),
            "2.0"
        );
    }

    #[test]
    fn test_nested_lists() {
        let element = ElementBuilder::new("adbs")
            .number("mstt", 200)
            .list("mlcl", |b| {
                b.list("mlit", |b| b.number("miid", 1).text("minm", "one"))
                    .list("mlit", |b| b.number("miid", 2).text("minm", "two"))
            })
            .build()
            .unwrap();

        let listing = element.find("mlcl").unwrap().unwrap();
        let items = listing.container().unwrap();
        assert_eq!(items.len().unwrap(), 2);
        let second = items.get(1).unwrap().unwrap();
        assert_eq!(second.find("minm").unwrap().unwrap().value().as_str(), Some("two"));
    }

    #[test]
    fn test_first_error_wins() {
        let result = ElementBuilder::new("msrv")
            .number("mikd", 1000)
            .text("xxxx", "ignored")
            .build();
        assert!(matches!(result, Err(BuildError::Overflow { width: 1, .. })));
    }

    #[test]
    fn test_error_in_nested_list() {
        let result = ElementBuilder::new("msrv")
            .list("mlcl", |b| b.text("zzzz", "x"))
            .build();
        assert!(matches!(result, Err(BuildError::UnknownTag { .. })));
    }

    #[test]
    fn test_non_list_code() {
        let result = ElementBuilder::new("minm").build();
        assert!(matches!(
            result,
            Err(BuildError::KindMismatch { expected: Kind::String, found: "container", .. })
        ));
        assert!(matches!(
            ElementBuilder::new("ml").build(),
            Err(BuildError::InvalidTagCode { len: 2 })
        ));
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = Registry::new(TagCase::Lower);
        registry.register("tlst", "test.list", Kind::List).unwrap();
        registry.register("tval", "test.value", Kind::SignedShort).unwrap();

        let element = ElementBuilder::with_registry(&registry, "tlst")
            .number("tval", -2)
            .build()
            .unwrap();
        let child = element.find("tval").unwrap().unwrap();
        assert_eq!(child.value().as_i64(), Some(-2));
    }
}
