//! # ldml-core
//!
//! The writing system codec: reads LDML documents into a
//! [`WritingSystemDefinition`](ldml_types::WritingSystemDefinition) and writes
//! definitions back out, merging with the previously written document so that
//! content the mapper does not understand survives untouched.
//!
//! - **reader**: Read, over a parsed `roxmltree` document
//! - **writer**: Write, a single forward pass driven by the merge cursor
//! - **collation**: decode attempts and write plans for `<collation>`
//! - **defaults**: FillWithDefaults for a few well-known tags
//!
//! Recognized sections are identity, layout, collations and the vendor
//! `special` blocks. Everything else is passed through.

// Re-export foundation crates
pub use ldml_collation as rules;
pub use ldml_merge as merge;
pub use ldml_tags as tags;
pub use ldml_types as types;

pub mod collation;
pub mod config;
pub mod context;
pub mod dates;
pub mod defaults;
pub mod error;
pub mod mapper;
pub mod reader;
pub mod vocab;
pub mod writer;

pub use config::{Compatibility, IndentStyle, MapperConfig};
pub use error::LdmlError;
pub use mapper::LdmlDataMapper;
