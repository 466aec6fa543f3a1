//! Headless backend with a simulated display
//!
//! Used by the test suite and by machines without a display. Input is
//! injected through a [`Simulator`] handle and becomes visible, both as
//! events and as polled state, at the next [`NativeBackend::pump_events`].

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use super::fail_on_native_error;
use crate::foundation::time::MonotonicClock;
use crate::input::{KeyCode, MouseButton, MouseMode};
use crate::platform::{Platform, PlatformError, PlatformResult};
use crate::window::{NativeBackend, NativeEvent, NativeWindow, WindowFlags};

/// Simulated monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessConfig {
    /// Monitor width of the current video mode
    pub monitor_width: u32,
    /// Monitor height of the current video mode
    pub monitor_height: u32,
    /// Monitor refresh rate in Hz
    pub refresh_rate: u32,
    /// Framebuffer pixels per screen coordinate
    pub content_scale: f32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            monitor_width: 1920,
            monitor_height: 1080,
            refresh_rate: 60,
            content_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
enum SimInput {
    Close,
    Resize(i32, i32),
    MouseButton(Option<MouseButton>, bool),
    Key(KeyCode, bool),
    Cursor(f64, f64),
    Error(String),
}

#[derive(Debug)]
struct SimWindow {
    size: (u32, u32),
    cursor: (f64, f64),
    mode: MouseMode,
    buttons: HashSet<MouseButton>,
    keys: HashSet<KeyCode>,
    queue: Vec<NativeEvent>,
}

impl SimWindow {
    fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            cursor: (0.0, 0.0),
            mode: MouseMode::Normal,
            buttons: HashSet::new(),
            keys: HashSet::new(),
            queue: Vec::new(),
        }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Close => self.queue.push(NativeEvent::CloseRequested),
            SimInput::Resize(width, height) => {
                self.size = (width.max(0) as u32, height.max(0) as u32);
                self.queue.push(NativeEvent::Resized { width, height });
            }
            SimInput::MouseButton(button, pressed) => {
                if let Some(button) = button {
                    if pressed {
                        self.buttons.insert(button);
                    } else {
                        self.buttons.remove(&button);
                    }
                }
                self.queue.push(NativeEvent::MouseButton { button, pressed });
            }
            SimInput::Key(key, pressed) => {
                if pressed {
                    self.keys.insert(key);
                } else {
                    self.keys.remove(&key);
                }
            }
            SimInput::Cursor(x, y) => self.cursor = (x, y),
            SimInput::Error(_) => {}
        }
    }
}

#[derive(Debug, Default)]
struct SimState {
    pending: VecDeque<SimInput>,
    window: Option<SimWindow>,
    fail_next_window: bool,
    windows_created: usize,
    swap_count: u64,
    swap_interval: Option<u32>,
    last_flags: Option<WindowFlags>,
}

/// Handle for injecting input into a headless backend
///
/// Clones share the same simulated display.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    state: Rc<RefCell<SimState>>,
}

impl Simulator {
    fn push(&self, input: SimInput) {
        self.state.borrow_mut().pending.push_back(input);
    }

    /// Queue a window close request
    pub fn request_close(&self) {
        self.push(SimInput::Close);
    }

    /// Queue a window resize
    pub fn resize(&self, width: i32, height: i32) {
        self.push(SimInput::Resize(width, height));
    }

    /// Queue a mouse button press
    pub fn press_mouse(&self, button: MouseButton) {
        self.push(SimInput::MouseButton(Some(button), true));
    }

    /// Queue a mouse button release
    pub fn release_mouse(&self, button: MouseButton) {
        self.push(SimInput::MouseButton(Some(button), false));
    }

    /// Queue a press of a button beyond left, right and middle
    pub fn press_extra_mouse_button(&self) {
        self.push(SimInput::MouseButton(None, true));
    }

    /// Queue a key press
    pub fn press_key(&self, key: KeyCode) {
        self.push(SimInput::Key(key, true));
    }

    /// Queue a key release
    pub fn release_key(&self, key: KeyCode) {
        self.push(SimInput::Key(key, false));
    }

    /// Queue a cursor move
    pub fn move_cursor(&self, x: f64, y: f64) {
        self.push(SimInput::Cursor(x, y));
    }

    /// Queue a native library error; fatal at the next event pump
    pub fn raise_error(&self, description: impl Into<String>) {
        self.push(SimInput::Error(description.into()));
    }

    /// Make the next window creation fail
    pub fn fail_next_window(&self) {
        self.state.borrow_mut().fail_next_window = true;
    }

    /// Whether a simulated window is currently open
    pub fn has_window(&self) -> bool {
        self.state.borrow().window.is_some()
    }

    /// Number of native windows created so far
    pub fn windows_created(&self) -> usize {
        self.state.borrow().windows_created
    }

    /// Number of buffer swaps presented so far
    pub fn swap_count(&self) -> u64 {
        self.state.borrow().swap_count
    }

    /// Swap interval set at window creation
    pub fn swap_interval(&self) -> Option<u32> {
        self.state.borrow().swap_interval
    }

    /// Flags of the most recently created window
    pub fn last_window_flags(&self) -> Option<WindowFlags> {
        self.state.borrow().last_flags.clone()
    }
}

/// Simulated native library
pub struct HeadlessBackend {
    config: HeadlessConfig,
    clock: MonotonicClock,
    simulator: Simulator,
}

impl HeadlessBackend {
    /// Handle for injecting input
    pub fn simulator(&self) -> Simulator {
        self.simulator.clone()
    }
}

impl NativeBackend for HeadlessBackend {
    type Config = HeadlessConfig;
    type Window = HeadlessWindow;

    fn init(config: HeadlessConfig) -> PlatformResult<Self> {
        if config.monitor_width == 0 || config.monitor_height == 0 {
            return Err(PlatformError::InitializationFailed(
                "headless monitor has no video mode".to_string(),
            ));
        }
        Ok(Self {
            config,
            clock: MonotonicClock::new(),
            simulator: Simulator::default(),
        })
    }

    fn pump_events(&mut self) {
        let mut state = self.simulator.state.borrow_mut();
        while let Some(input) = state.pending.pop_front() {
            if let SimInput::Error(description) = &input {
                fail_on_native_error(description);
            }
            if let Some(window) = state.window.as_mut() {
                window.apply(input);
            }
        }
    }

    fn time(&self) -> f64 {
        self.clock.now()
    }

    fn set_time(&mut self, seconds: f64) {
        self.clock.set(seconds);
    }

    fn create_window(&mut self, flags: &WindowFlags) -> PlatformResult<HeadlessWindow> {
        let mut state = self.simulator.state.borrow_mut();
        if std::mem::take(&mut state.fail_next_window) {
            return Err(PlatformError::WindowCreationFailed);
        }

        let monitor = (self.config.monitor_width, self.config.monitor_height);
        let size = if flags.fullscreen {
            // Single video mode, so fullscreen always lands on it
            monitor
        } else {
            flags.resolve_size(monitor.0, monitor.1)
        };

        state.window = Some(SimWindow::new(size));
        state.windows_created += 1;
        state.swap_interval = Some(u32::from(flags.vsync));
        state.last_flags = Some(flags.clone());

        Ok(HeadlessWindow {
            state: Rc::clone(&self.simulator.state),
            content_scale: self.config.content_scale,
        })
    }
}

/// Simulated window
pub struct HeadlessWindow {
    state: Rc<RefCell<SimState>>,
    content_scale: f32,
}

impl HeadlessWindow {
    fn with<T>(&self, f: impl FnOnce(&SimWindow) -> T) -> Option<T> {
        self.state.borrow().window.as_ref().map(f)
    }

    fn with_mut<T>(&self, f: impl FnOnce(&mut SimWindow) -> T) -> Option<T> {
        self.state.borrow_mut().window.as_mut().map(f)
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.state.borrow_mut().window = None;
    }
}

impl NativeWindow for HeadlessWindow {
    fn drain_events(&mut self) -> Vec<NativeEvent> {
        self.with_mut(|window| std::mem::take(&mut window.queue))
            .unwrap_or_default()
    }

    fn size(&self) -> (u32, u32) {
        self.with(|window| window.size).unwrap_or_default()
    }

    #[allow(clippy::cast_precision_loss)]
    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.size();
        let scale = |value: u32| (value as f32 * self.content_scale).round() as u32;
        (scale(width), scale(height))
    }

    fn swap_buffers(&mut self) {
        self.state.borrow_mut().swap_count += 1;
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.with(|window| window.cursor).unwrap_or_default()
    }

    fn set_mouse_mode(&mut self, mode: MouseMode) {
        self.with_mut(|window| window.mode = mode);
    }

    fn mouse_mode(&self) -> MouseMode {
        self.with(|window| window.mode).unwrap_or_default()
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> PlatformResult<bool> {
        Ok(self
            .with(|window| window.buttons.contains(&button))
            .unwrap_or(false))
    }

    fn is_key_pressed(&self, key: KeyCode) -> PlatformResult<bool> {
        Ok(self.with(|window| window.keys.contains(&key)).unwrap_or(false))
    }
}

impl Platform<HeadlessBackend> {
    /// Initialize a platform on a default simulated display
    pub fn headless() -> PlatformResult<Self> {
        Self::init(HeadlessConfig::default())
    }

    /// Handle for injecting input into this platform
    pub fn simulator(&self) -> Simulator {
        self.backend().simulator()
    }
}
