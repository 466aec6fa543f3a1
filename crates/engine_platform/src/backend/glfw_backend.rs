//! GLFW-based window management
//!
//! Creates a single window with an OpenGL core, forward-compatible context.
//! GLFW errors are routed to the fatal error hook, so every call below either
//! succeeds or aborts.

use glfw::Context;

use super::fail_on_native_error;
use crate::input::{KeyCode, MouseButton, MouseMode};
use crate::platform::{Platform, PlatformError, PlatformResult};
use crate::window::{NativeBackend, NativeEvent, NativeWindow, WindowFlags};

/// GLFW initialization options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlfwConfig {
    /// Requested OpenGL context version (major, minor)
    pub context_version: (u32, u32),
}

impl Default for GlfwConfig {
    fn default() -> Self {
        Self {
            context_version: (3, 3),
        }
    }
}

fn on_glfw_error(error: glfw::Error, description: String) {
    fail_on_native_error(&format!("{error:?}: {description}"));
}

/// GLFW library handle
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    config: GlfwConfig,
}

impl NativeBackend for GlfwBackend {
    type Config = GlfwConfig;
    type Window = GlfwWindow;

    fn init(config: GlfwConfig) -> PlatformResult<Self> {
        let glfw = glfw::init(on_glfw_error)
            .map_err(|e| PlatformError::InitializationFailed(e.to_string()))?;
        log::debug!("GLFW {} initialized", glfw::get_version_string());
        Ok(Self { glfw, config })
    }

    fn pump_events(&mut self) {
        self.glfw.poll_events();
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn set_time(&mut self, seconds: f64) {
        self.glfw.set_time(seconds);
    }

    fn create_window(&mut self, flags: &WindowFlags) -> PlatformResult<GlfwWindow> {
        let (major, minor) = self.config.context_version;
        self.glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        self.glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        self.glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        self.glfw.window_hint(glfw::WindowHint::Samples(Some(flags.msaa)));
        self.glfw.window_hint(glfw::WindowHint::Resizable(false));
        self.glfw.window_hint(glfw::WindowHint::SRgbCapable(flags.srgb));

        let created = self.glfw.with_primary_monitor(|native, monitor| {
            let monitor = monitor.as_deref();
            let mode = monitor.and_then(glfw::Monitor::get_video_mode);
            let (monitor_width, monitor_height) =
                mode.as_ref().map_or((0, 0), |mode| (mode.width, mode.height));
            let (width, height) = flags.resolve_size(monitor_width, monitor_height);
            if width == 0 || height == 0 {
                log::warn!("No primary monitor mode to size the window from");
                return None;
            }

            let window_mode = match monitor {
                Some(monitor) if flags.fullscreen => {
                    if let Some(mode) = &mode {
                        native.window_hint(glfw::WindowHint::RedBits(Some(mode.red_bits)));
                        native.window_hint(glfw::WindowHint::GreenBits(Some(mode.green_bits)));
                        native.window_hint(glfw::WindowHint::BlueBits(Some(mode.blue_bits)));
                        native.window_hint(glfw::WindowHint::RefreshRate(Some(mode.refresh_rate)));
                    }
                    glfw::WindowMode::FullScreen(monitor)
                }
                _ => glfw::WindowMode::Windowed,
            };

            native.create_window(width, height, &flags.title, window_mode)
        });

        let (mut window, events) = created.ok_or(PlatformError::WindowCreationFailed)?;

        if let Some(icon) = &flags.icon {
            window.set_icon_from_pixels(vec![glfw::PixelImage {
                width: icon.width,
                height: icon.height,
                pixels: icon.packed_pixels(),
            }]);
        }

        window.make_current();
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_mouse_button_polling(true);
        self.glfw.set_swap_interval(if flags.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        Ok(GlfwWindow { window, events })
    }
}

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl NativeWindow for GlfwWindow {
    fn drain_events(&mut self) -> Vec<NativeEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn set_mouse_mode(&mut self, mode: MouseMode) {
        let cursor = match mode {
            MouseMode::Normal => glfw::CursorMode::Normal,
            MouseMode::Grabbed => glfw::CursorMode::Disabled,
        };
        self.window.set_cursor_mode(cursor);
    }

    fn mouse_mode(&self) -> MouseMode {
        match self.window.get_cursor_mode() {
            glfw::CursorMode::Disabled => MouseMode::Grabbed,
            glfw::CursorMode::Normal | glfw::CursorMode::Hidden => MouseMode::Normal,
        }
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> PlatformResult<bool> {
        let native =
            native_mouse_button(button).ok_or(PlatformError::UnsupportedMouseButton(button))?;
        Ok(self.window.get_mouse_button(native) == glfw::Action::Press)
    }

    fn is_key_pressed(&self, key: KeyCode) -> PlatformResult<bool> {
        let native = native_key(key).ok_or(PlatformError::UnsupportedKey(key))?;
        Ok(self.window.get_key(native) == glfw::Action::Press)
    }
}

fn translate_event(event: glfw::WindowEvent) -> Option<NativeEvent> {
    match event {
        glfw::WindowEvent::Close => Some(NativeEvent::CloseRequested),
        glfw::WindowEvent::Size(width, height) => Some(NativeEvent::Resized { width, height }),
        glfw::WindowEvent::MouseButton(button, action, _) => Some(NativeEvent::MouseButton {
            button: engine_mouse_button(button),
            pressed: action == glfw::Action::Press,
        }),
        _ => None,
    }
}

const fn engine_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

const fn native_mouse_button(button: MouseButton) -> Option<glfw::MouseButton> {
    match button {
        MouseButton::Left => Some(glfw::MouseButton::Button1),
        MouseButton::Right => Some(glfw::MouseButton::Button2),
        MouseButton::Middle => None,
    }
}

const fn native_key(key: KeyCode) -> Option<glfw::Key> {
    match key {
        KeyCode::W => Some(glfw::Key::W),
        KeyCode::A => Some(glfw::Key::A),
        KeyCode::S => Some(glfw::Key::S),
        KeyCode::D => Some(glfw::Key::D),
        KeyCode::Q => Some(glfw::Key::Q),
        KeyCode::E => Some(glfw::Key::E),
        KeyCode::Up => Some(glfw::Key::Up),
        KeyCode::Down => Some(glfw::Key::Down),
        KeyCode::Left => Some(glfw::Key::Left),
        KeyCode::Right => Some(glfw::Key::Right),
        _ => None,
    }
}

impl Platform<GlfwBackend> {
    /// Initialize GLFW with the default OpenGL 3.3 context settings
    pub fn init_glfw() -> PlatformResult<Self> {
        Self::init(GlfwConfig::default())
    }

    /// Look up an OpenGL function for the window's context
    ///
    /// Returns `None` without a window.
    pub fn gl_proc_address(&mut self, name: &str) -> Option<glfw::GLProc> {
        self.native_window_mut()
            .map(|native| native.window.get_proc_address(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_key_has_a_native_key() {
        for key in KeyCode::PLATFORM_KEYS {
            assert!(native_key(key).is_some(), "{key} has no GLFW key");
        }
        assert_eq!(native_key(KeyCode::Space), None);
        assert_eq!(native_key(KeyCode::Escape), None);
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(native_mouse_button(MouseButton::Left), Some(glfw::MouseButton::Button1));
        assert_eq!(native_mouse_button(MouseButton::Right), Some(glfw::MouseButton::Button2));
        assert_eq!(native_mouse_button(MouseButton::Middle), None);

        assert_eq!(engine_mouse_button(glfw::MouseButton::Button1), Some(MouseButton::Left));
        assert_eq!(engine_mouse_button(glfw::MouseButton::Button3), Some(MouseButton::Middle));
        assert_eq!(engine_mouse_button(glfw::MouseButton::Button5), None);
    }

    #[test]
    fn test_window_events_translate() {
        assert_eq!(
            translate_event(glfw::WindowEvent::Close),
            Some(NativeEvent::CloseRequested)
        );
        assert_eq!(
            translate_event(glfw::WindowEvent::Size(800, 600)),
            Some(NativeEvent::Resized { width: 800, height: 600 })
        );
        assert_eq!(
            translate_event(glfw::WindowEvent::MouseButton(
                glfw::MouseButton::Button2,
                glfw::Action::Repeat,
                glfw::Modifiers::empty(),
            )),
            Some(NativeEvent::MouseButton {
                button: Some(MouseButton::Right),
                pressed: false,
            })
        );
        assert_eq!(translate_event(glfw::WindowEvent::Focus(true)), None);
    }
}
