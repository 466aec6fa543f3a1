//! Window management subsystem
//!
//! # Module Organization
//!
//! - **`flags`**: Window creation options and the window icon
//! - **`backend`**: Internal traits defining the native backend contract
//! - Backend implementations live in [`crate::backend`]

pub mod backend;
pub mod flags;

pub use backend::{NativeBackend, NativeEvent, NativeWindow};
pub use flags::{WindowFlags, WindowIcon};
