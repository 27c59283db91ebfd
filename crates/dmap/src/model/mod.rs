//! Data model types for DMAP.
//!
//! This module contains the core types for representing DMAP data:
//! - Values (typed payloads: text, integers, versions, timestamps, lists)
//! - Elements (a registered tag plus its value)
//! - Containers (lazily parsed child sequences)
//! - Builders (ergonomic nested construction)

pub mod builder;
pub mod container;
pub mod element;
pub mod value;

pub use builder::ElementBuilder;
pub use container::Container;
pub use element::Element;
pub use value::{Integer, Kind, Timestamp, Value, Version, Width};
