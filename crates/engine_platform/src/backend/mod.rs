//! Native backend implementations
//!
//! - **`glfw_backend`**: GLFW windows with an OpenGL context
//! - **`headless_backend`**: simulated display for tests and display-less machines

pub mod glfw_backend;
pub mod headless_backend;

pub use glfw_backend::{GlfwBackend, GlfwConfig, GlfwWindow};
pub use headless_backend::{HeadlessBackend, HeadlessConfig, HeadlessWindow, Simulator};

/// Fatal hook for errors reported by the native library
///
/// Logs the description, then panics.
pub(crate) fn fail_on_native_error(description: &str) -> ! {
    log::error!("Native windowing error: {description}");
    panic!("Native windowing error: {description}");
}
