//! Platform context: the engine-facing window and input API
//!
//! A [`Platform`] owns the native library handle, at most one window, and
//! the registered event callbacks. Every operation runs synchronously on the
//! calling thread; [`Platform::poll_events`] is the only one that invokes
//! callbacks, in event-arrival order, before it returns.
//!
//! # Error Tiers
//!
//! - **Recoverable**: [`Platform::init`], [`Platform::create_window`] and the
//!   `try_is_*` queries return [`PlatformError`] and leave state untouched.
//! - **Fatal**: native library errors and [`Platform::is_key_down`] /
//!   [`Platform::is_mouse_down`] on unsupported input panic.

use thiserror::Error;

use crate::input::{ButtonAction, KeyCode, MouseButton, MouseMode};
use crate::window::{NativeBackend, NativeEvent, NativeWindow, WindowFlags};


/// Platform errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The native library failed to initialize
    #[error("Platform initialization failed: {0}")]
    InitializationFailed(String),

    /// No native window could be created with the requested configuration
    #[error("Window creation failed")]
    WindowCreationFailed,

    /// Window flags rejected before reaching the native library
    #[error("Invalid window flags: {0}")]
    InvalidFlags(String),

    /// Key outside the set the platform can report
    #[error("Unsupported key: {0}")]
    UnsupportedKey(KeyCode),

    /// Mouse button outside the set the platform can report
    #[error("Unsupported mouse button: {0}")]
    UnsupportedMouseButton(MouseButton),

    /// Window icon could not be loaded or is malformed
    #[error("Window icon error: {0}")]
    Icon(String),
}

/// Result alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Window event delivered by [`Platform::poll_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user asked to close the window
    WindowClosed,
    /// The window was resized
    WindowResized {
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// Left or right mouse button changed state
    MouseButton {
        /// The button
        button: MouseButton,
        /// Press or release
        action: ButtonAction,
    },
}

impl PlatformEvent {
    /// Translate a native event, dropping the ones the engine does not see
    pub fn from_native(event: NativeEvent) -> Option<Self> {
        match event {
            NativeEvent::CloseRequested => Some(Self::WindowClosed),
            NativeEvent::Resized { width, height } => Some(Self::WindowResized {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            }),
            NativeEvent::MouseButton { button, pressed } => button
                .filter(|button| button.is_platform_button())
                .map(|button| Self::MouseButton {
                    button,
                    action: ButtonAction::from_pressed(pressed),
                }),
        }
    }
}

type CloseCallback = Box<dyn FnMut()>;
type ResizeCallback = Box<dyn FnMut(u32, u32)>;
type MouseButtonCallback = Box<dyn FnMut(MouseButton, ButtonAction)>;

/// One slot per event kind; registering replaces the previous callback
#[derive(Default)]
struct Callbacks {
    close: Option<CloseCallback>,
    resize: Option<ResizeCallback>,
    mouse_button: Option<MouseButtonCallback>,
}

impl Callbacks {
    fn dispatch(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::WindowClosed => {
                if let Some(callback) = self.close.as_mut() {
                    callback();
                }
            }
            PlatformEvent::WindowResized { width, height } => {
                if let Some(callback) = self.resize.as_mut() {
                    callback(width, height);
                }
            }
            PlatformEvent::MouseButton { button, action } => {
                if let Some(callback) = self.mouse_button.as_mut() {
                    callback(button, action);
                }
            }
        }
    }
}

/// Window and input context
///
/// Not thread-safe: all calls must come from the thread that created it.
pub struct Platform<B: NativeBackend> {
    // Declared before `backend` so the window is dropped first.
    window: Option<B::Window>,
    backend: B,
    callbacks: Callbacks,
    events: Vec<PlatformEvent>,
}

impl<B: NativeBackend> Platform<B> {
    /// Initialize the native library
    ///
    /// Native errors reported after this point are fatal.
    pub fn init(config: B::Config) -> PlatformResult<Self> {
        let backend = B::init(config)?;
        log::info!("Platform initialized");
        Ok(Self {
            window: None,
            backend,
            callbacks: Callbacks::default(),
            events: Vec::new(),
        })
    }

    /// Tear down the window and the native library
    pub fn destroy(self) {
        drop(self);
    }

    /// Drain pending OS events
    ///
    /// Each event invokes its registered callback once, in arrival order.
    /// Returns the events handled by this call.
    pub fn poll_events(&mut self) -> &[PlatformEvent] {
        self.events.clear();
        self.backend.pump_events();

        let Some(window) = self.window.as_mut() else {
            return &self.events;
        };

        for native in window.drain_events() {
            let Some(event) = PlatformEvent::from_native(native) else {
                continue;
            };
            log::debug!("Platform event: {event:?}");
            self.callbacks.dispatch(event);
            self.events.push(event);
        }

        &self.events
    }

    /// Events handled by the most recent [`Platform::poll_events`]
    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }

    /// Seconds on the platform clock
    pub fn time(&self) -> f64 {
        self.backend.time()
    }

    /// Rebase the platform clock so it reads `seconds` now
    pub fn set_time(&mut self, seconds: f64) {
        self.backend.set_time(seconds);
    }

    /// Create the window
    ///
    /// Does nothing and succeeds if a window already exists. On failure no
    /// state changes and a later call may try again.
    pub fn create_window(&mut self, flags: &WindowFlags) -> PlatformResult<()> {
        if self.window.is_some() {
            log::debug!("Window already exists, ignoring create request");
            return Ok(());
        }

        flags.validate()?;
        let window = self.backend.create_window(flags)?;

        let (width, height) = window.size();
        log::info!(
            "Created window \"{}\" ({width}x{height}, fullscreen: {}, vsync: {}, msaa: {})",
            flags.title,
            flags.fullscreen,
            flags.vsync,
            flags.msaa
        );
        self.window = Some(window);
        Ok(())
    }

    /// Whether a window exists
    pub const fn has_window(&self) -> bool {
        self.window.is_some()
    }

    /// Window size in screen coordinates, `(0, 0)` without a window
    pub fn window_size(&self) -> (u32, u32) {
        self.window.as_ref().map_or((0, 0), NativeWindow::size)
    }

    /// Framebuffer size in pixels, `(0, 0)` without a window
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.window.as_ref().map_or((0, 0), NativeWindow::framebuffer_size)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        match self.window.as_mut() {
            Some(window) => window.swap_buffers(),
            None => log::warn!("swap_buffers called without a window"),
        }
    }

    /// Register the window close callback, replacing any previous one
    pub fn on_window_close(&mut self, callback: impl FnMut() + 'static) {
        self.callbacks.close = Some(Box::new(callback));
    }

    /// Register the window resize callback, replacing any previous one
    pub fn on_window_resize(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.callbacks.resize = Some(Box::new(callback));
    }

    /// Register the mouse button callback, replacing any previous one
    ///
    /// Only left and right buttons are reported.
    pub fn on_mouse_button(&mut self, callback: impl FnMut(MouseButton, ButtonAction) + 'static) {
        self.callbacks.mouse_button = Some(Box::new(callback));
    }

    /// Cursor position in window screen coordinates, `(0, 0)` without a window
    pub fn mouse_position(&self) -> (f64, f64) {
        self.window.as_ref().map_or((0.0, 0.0), NativeWindow::cursor_position)
    }

    /// Change cursor behaviour; ignored without a window
    pub fn set_mouse_mode(&mut self, mode: MouseMode) {
        if let Some(window) = self.window.as_mut() {
            log::debug!("Mouse mode set to {mode:?}");
            window.set_mouse_mode(mode);
        }
    }

    /// Current cursor behaviour, [`MouseMode::Normal`] without a window
    pub fn mouse_mode(&self) -> MouseMode {
        self.window.as_ref().map_or(MouseMode::Normal, NativeWindow::mouse_mode)
    }

    /// Polled mouse button state
    ///
    /// Buttons other than left and right are rejected even without a window.
    pub fn try_is_mouse_down(&self, button: MouseButton) -> PlatformResult<bool> {
        if !button.is_platform_button() {
            return Err(PlatformError::UnsupportedMouseButton(button));
        }
        self.window
            .as_ref()
            .map_or(Ok(false), |window| window.is_mouse_button_pressed(button))
    }

    /// Polled key state
    ///
    /// Keys outside [`KeyCode::PLATFORM_KEYS`] are rejected even without a window.
    pub fn try_is_key_down(&self, key: KeyCode) -> PlatformResult<bool> {
        if !key.is_platform_key() {
            return Err(PlatformError::UnsupportedKey(key));
        }
        self.window
            .as_ref()
            .map_or(Ok(false), |window| window.is_key_pressed(key))
    }

    /// Polled mouse button state
    ///
    /// # Panics
    /// Panics if the button is not left or right.
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        match self.try_is_mouse_down(button) {
            Ok(down) => down,
            Err(error) => unreachable!("{error}"),
        }
    }

    /// Polled key state
    ///
    /// # Panics
    /// Panics if the key is not in [`KeyCode::PLATFORM_KEYS`].
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        match self.try_is_key_down(key) {
            Ok(down) => down,
            Err(error) => unreachable!("{error}"),
        }
    }

    /// The native backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn native_window_mut(&mut self) -> Option<&mut B::Window> {
        self.window.as_mut()
    }
}

impl<B: NativeBackend> Drop for Platform<B> {
    fn drop(&mut self) {
        if self.window.take().is_some() {
            log::info!("Window destroyed");
        }
        log::info!("Platform shut down");
    }
}
