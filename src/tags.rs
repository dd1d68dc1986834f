//! Tag backend: reading and writing embedded audio metadata.
//!
//! The rest of the crate only sees the `TagBackend` trait and the
//! `MetadataRecord` snapshot it produces; `LoftyBackend` is the one real
//! implementation.

mod backend;
mod record;

pub use backend::{LoftyBackend, TagBackend, TagError};
pub use record::MetadataRecord;
