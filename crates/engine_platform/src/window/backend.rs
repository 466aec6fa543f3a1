//! Backend-agnostic native windowing traits
//!
//! [`crate::Platform`] talks to the native windowing library only through
//! these two traits. [`NativeBackend`] covers library-wide state (init,
//! clock, event pump, window creation) and [`NativeWindow`] covers the
//! per-window queries.
//!
//! # Thread Safety
//! Neither trait requires `Send`. Native window operations have to stay on
//! the thread that initialized the library.

use crate::input::{KeyCode, MouseButton, MouseMode};
use crate::platform::PlatformResult;
use crate::window::WindowFlags;

/// Raw window event as reported by a backend
///
/// The platform filters and translates these into
/// [`crate::PlatformEvent`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEvent {
    /// The user asked to close the window
    CloseRequested,
    /// The window was resized, in screen coordinates
    Resized {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
    /// A mouse button changed state
    MouseButton {
        /// The engine button, `None` for buttons the engine has no name for
        button: Option<MouseButton>,
        /// Whether the button went down
        pressed: bool,
    },
}

/// Library-wide backend operations
pub trait NativeBackend: Sized {
    /// Backend-specific initialization options
    type Config: Default;

    /// Window type created by this backend
    type Window: NativeWindow;

    /// Initialize the native library
    ///
    /// Installs the fatal error hook before anything else runs.
    fn init(config: Self::Config) -> PlatformResult<Self>;

    /// Fetch pending OS events into the windows' event queues
    fn pump_events(&mut self);

    /// Seconds on the library clock
    fn time(&self) -> f64;

    /// Rebase the library clock
    fn set_time(&mut self, seconds: f64);

    /// Create a window with a current rendering context and event delivery enabled
    fn create_window(&mut self, flags: &WindowFlags) -> PlatformResult<Self::Window>;
}

/// Per-window backend operations
pub trait NativeWindow {
    /// Take the events queued for this window since the last call, oldest first
    fn drain_events(&mut self) -> Vec<NativeEvent>;

    /// Window size in screen coordinates
    fn size(&self) -> (u32, u32);

    /// Framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Cursor position in screen coordinates relative to the window
    fn cursor_position(&self) -> (f64, f64);

    /// Change cursor behaviour
    fn set_mouse_mode(&mut self, mode: MouseMode);

    /// Current cursor behaviour
    fn mouse_mode(&self) -> MouseMode;

    /// Polled button state
    ///
    /// Callers only pass buttons for which [`MouseButton::is_platform_button`]
    /// holds.
    fn is_mouse_button_pressed(&self, button: MouseButton) -> PlatformResult<bool>;

    /// Polled key state
    ///
    /// Callers only pass keys for which [`KeyCode::is_platform_key`] holds.
    fn is_key_pressed(&self, key: KeyCode) -> PlatformResult<bool>;
}
