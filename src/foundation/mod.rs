/// Session configuration.
pub mod config;
/// Category enumeration and per-category tables.
pub mod core;
/// Error taxonomy.
pub mod error;
