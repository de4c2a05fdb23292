// src/sink/mod.rs
//! Destinations for the decoded file structure.
//!
//! A [`StructureSink`] receives a strictly nested stream of events: every
//! [`enter`](StructureSink::enter) is matched by exactly one
//! [`leave`](StructureSink::leave), and leaf facts arrive through
//! [`record`](StructureSink::record) in between.
//!
//! - [`XmlSink`] - renders the stream as indented XML
//! - [`TreeSink`] - collects the stream into an in-memory [`Node`] tree
//!
//! # Example
//!
//! ```
//! use tdms_dump::sink::{StructureSink, StructureSinkExt, TreeSink};
//!
//! let mut sink = TreeSink::new();
//! sink.enter("segment").unwrap();
//! sink.add("index", 0u32).unwrap();
//! sink.leave().unwrap();
//!
//! let root = sink.into_root().unwrap();
//! assert_eq!(root.leaf("index").and_then(|v| v.as_u64()), Some(0));
//! ```

mod tree;
mod value;
mod xml;

use crate::error::Result;

pub use tree::{Node, TreeSink};
pub use value::Value;
pub use xml::{escape_xml, XmlOptions, XmlSink};

/// Receiver of the hierarchical structure found in a file
pub trait StructureSink {
    /// Open a named node
    fn enter(&mut self, name: &str) -> Result<()>;

    /// Emit a named leaf value inside the innermost open node
    fn record(&mut self, name: &str, value: Value) -> Result<()>;

    /// Close the innermost open node
    fn leave(&mut self) -> Result<()>;
}

/// Convenience methods available on every sink, including `dyn StructureSink`
pub trait StructureSinkExt: StructureSink {
    fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.record(name, value.into())
    }
}

impl<K: StructureSink + ?Sized> StructureSinkExt for K {}

impl<K: StructureSink + ?Sized> StructureSink for &mut K {
    fn enter(&mut self, name: &str) -> Result<()> {
        (**self).enter(name)
    }

    fn record(&mut self, name: &str, value: Value) -> Result<()> {
        (**self).record(name, value)
    }

    fn leave(&mut self) -> Result<()> {
        (**self).leave()
    }
}
