//! Tag and attribute queries over a parsed HTML document.
//!
//! A [`Document`] is built from markup (or a URL, or an existing
//! [`DomTree`](ladle_dom::DomTree)) and hands out [`Handle`]s. A handle
//! points at one node and offers:
//!
//! - **Search**: [`Handle::find`] and [`Handle::find_all`] walk the subtree
//!   depth-first, in pre-order, looking for a [`Query`] (a tag name with an
//!   optional attribute key and value).
//! - **Navigation**: parent, first and last child, siblings, and
//!   element-only siblings that skip text and comments.
//! - **Extraction**: [`Handle::attrs`] (first occurrence of a repeated
//!   attribute wins) and [`Handle::text`] (first direct text child that is
//!   not whitespace-only).
//!
//! Every operation returns a `Result`. The [`ErrorPolicy`] picked when the
//! document is built decides whether failures are also logged.
//!
//! ```
//! use ladle_query::{Document, DocumentOptions, ErrorPolicy};
//!
//! let options = DocumentOptions::default().with_policy(ErrorPolicy::Log);
//! let doc = Document::parse_with(r#"<div><p>Hi</p><p class="x">Bye</p></div>"#, options)?;
//!
//! let paragraphs = doc.root().find_all("p")?;
//! assert_eq!(paragraphs.len(), 2);
//! assert_eq!(paragraphs[0].text()?, "Hi");
//! assert!(doc.root().find("table").is_err());
//! # Ok::<(), ladle_query::QueryError>(())
//! ```

/// Building documents and locating the root element.
pub mod document;
/// The error type shared by every operation.
pub mod error;
/// Node handles: navigation, search and extraction.
pub mod handle;
/// Failure reporting and document options.
pub mod policy;
/// Tag and attribute queries.
pub mod query;
/// Depth-first searches over the tree.
pub mod search;

pub use document::Document;
pub use error::QueryError;
pub use handle::{AttributesMap, Handle};
pub use policy::{DocumentOptions, ErrorPolicy};
pub use query::Query;
