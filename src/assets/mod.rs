//! Variant discovery and decoding.

/// Decoding of raw variant bytes into drawable handles.
pub mod decode;
/// Per-category variant lists.
pub mod library;
/// Asset source collaborator and built-in sources.
pub mod source;
