//! Application module: the session state machine driving the TUI.
//!
//! `App` lives in `app::model` and owns the current mode, the selected file,
//! the metadata projection and the edit buffer.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
