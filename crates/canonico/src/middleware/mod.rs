//! HTTP middleware.

pub mod canonicalize;

pub use canonicalize::{REVALIDATE_CACHE_CONTROL, canonicalize_request};
