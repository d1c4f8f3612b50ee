//! Single forward pass merge of regenerated LDML sections into a previously
//! written document.
//!
//! [`MergeCursor`] reads the prior document as a stream and writes the new one
//! through an [`XmlSink`]. Recognized sections are regenerated by the caller;
//! everything else is copied across unexamined, so memory use is bounded by
//! nesting depth rather than document size.

pub mod cursor;
pub mod error;
pub mod namespaces;
pub mod order;
pub mod sink;
pub mod source;

pub use cursor::{Entered, MergeCursor};
pub use error::MergeError;
pub use namespaces::{FIELDWORKS, NamespaceTable, PALASO, PALASO2};
pub use order::{ElementOrder, LdmlElementOrder};
pub use sink::{XmlSink, element};
pub use source::attribute;
