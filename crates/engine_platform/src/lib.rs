//! # Engine Platform
//!
//! Windowing and input layer for the engine. Owns at most one native window,
//! pumps OS events once per frame, and exposes polled input state plus a
//! monotonic clock.
//!
//! ## Features
//!
//! - **GLFW Backend**: OpenGL 3.3 core context, vsync, MSAA and sRGB hints
//! - **Headless Backend**: simulated display for tests and CI machines
//! - **Event Delivery**: registered callbacks and a per-poll event list
//! - **Configuration**: window flags loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine_platform::prelude::*;
//!
//! fn main() -> Result<(), PlatformError> {
//!     let mut platform = Platform::init_glfw()?;
//!     platform.create_window(&WindowFlags::default().with_title("Hello"))?;
//!
//!     let mut running = true;
//!     while running {
//!         for event in platform.poll_events() {
//!             if *event == PlatformEvent::WindowClosed {
//!                 running = false;
//!             }
//!         }
//!         platform.swap_buffers();
//!     }
//!
//!     platform.destroy();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backend;
pub mod config;
pub mod foundation;
pub mod input;
pub mod platform;
pub mod window;

pub use platform::{Platform, PlatformError, PlatformEvent, PlatformResult};

/// Common imports for platform users
pub mod prelude {
    pub use crate::{
        backend::{GlfwBackend, HeadlessBackend, HeadlessConfig, Simulator},
        config::{Config, ConfigError},
        input::{ButtonAction, KeyCode, MouseButton, MouseMode},
        platform::{Platform, PlatformError, PlatformEvent, PlatformResult},
        window::{WindowFlags, WindowIcon},
    };
}
