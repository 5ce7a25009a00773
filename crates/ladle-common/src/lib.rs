//! Common utilities for ladle.
//!
//! This crate provides shared infrastructure used by all ladle components:
//! - **Warning System** - deduplicated warnings routed through `log`
//! - **Fetch** - blocking HTTP GET of a document body

pub mod net;
pub mod warning;

pub use net::{FetchError, fetch_text};
