//! Metadata view-model: projection, row ordering and editability.
//!
//! `build_projection` turns filesystem facts plus a backend record into an
//! ordered key/value mapping; `ordered_rows` flattens it for display and
//! `is_editable` gates which rows may enter edit mode.

mod policy;
mod projection;
mod rows;

pub use policy::is_editable;
pub use projection::{
    FileFacts, Projection, build_projection, read_error_projection, stat_error_projection,
};
pub use rows::ordered_rows;
