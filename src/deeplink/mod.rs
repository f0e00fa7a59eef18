//! Deep-link parsing.
//!
//! Links have the form `scheme://host/segment1/segment2?key1=value1&key2=value2`.
//! The scheme and host are ignored; routing only looks at the path segments
//! and query parameters.

mod url;

pub use url::{Url, UrlError, PAGE_PARAMETER};
