//! Window demo application
//!
//! Opens a window, reports input once per frame and exits when the window is
//! closed. With `--headless` it runs against the simulated display and feeds
//! itself a short scripted session instead.
//!
//! Usage: `window_demo [--headless] [config.toml|config.ron]`

use std::cell::Cell;
use std::rc::Rc;

use engine_platform::foundation::{logging, time::Timer};
use engine_platform::prelude::*;
use engine_platform::window::NativeBackend;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/window_demo.toml");
const MOVEMENT_KEYS: [KeyCode; 6] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Q,
    KeyCode::E,
];

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What the frame loop observed before the window closed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SessionStats {
    frames: u64,
    grabbed_frames: u64,
    moving_frames: u64,
}

struct Options {
    headless: bool,
    config_path: String,
}

impl Options {
    fn from_args() -> Self {
        let mut options = Self {
            headless: false,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
        };
        for arg in std::env::args().skip(1) {
            if arg == "--headless" {
                options.headless = true;
            } else {
                options.config_path = arg;
            }
        }
        options
    }
}

fn main() {
    logging::init();

    if let Err(e) = run(&Options::from_args()) {
        log::error!("Window demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), DemoError> {
    let mut flags = WindowFlags::load_or_default(&options.config_path)?;
    flags.load_icon()?;

    let stats = if options.headless {
        let mut platform = Platform::headless()?;
        let simulator = platform.simulator();
        run_loop(&mut platform, &flags, |frame| script_frame(&simulator, frame))?
    } else {
        let mut platform = Platform::<GlfwBackend>::init_glfw()?;
        run_loop(&mut platform, &flags, |_| {})?
    };

    log::info!(
        "Mouse grabbed for {} of {} frames, moving for {}",
        stats.grabbed_frames,
        stats.frames,
        stats.moving_frames
    );
    Ok(())
}

/// Feed the simulated display one step of a short session
///
/// Each step becomes visible at the poll of the same frame, so presses are
/// held across the frames between them and their releases.
fn script_frame(simulator: &Simulator, frame: u64) {
    match frame {
        0 => {
            simulator.move_cursor(320.0, 240.0);
            simulator.press_key(KeyCode::W);
        }
        2 => simulator.press_mouse(MouseButton::Right),
        4 => simulator.resize(800, 600),
        6 => simulator.release_mouse(MouseButton::Right),
        8 => simulator.release_key(KeyCode::W),
        10 => simulator.request_close(),
        _ => {}
    }
}

fn run_loop<B: NativeBackend>(
    platform: &mut Platform<B>,
    flags: &WindowFlags,
    mut before_poll: impl FnMut(u64),
) -> Result<SessionStats, DemoError> {
    platform.create_window(flags)?;

    let running = Rc::new(Cell::new(true));
    let close_flag = Rc::clone(&running);
    platform.on_window_close(move || close_flag.set(false));
    platform.on_window_resize(|width, height| log::info!("Resized to {width}x{height}"));
    platform.on_mouse_button(|button, action| {
        log::info!("Mouse {button:?} {action:?}");
    });

    let (fb_width, fb_height) = platform.framebuffer_size();
    log::info!("Framebuffer is {fb_width}x{fb_height} pixels");

    let mut timer = Timer::new();
    let mut stats = SessionStats::default();
    platform.set_time(0.0);

    while running.get() {
        before_poll(stats.frames);
        platform.poll_events();
        timer.update();
        stats.frames += 1;

        if platform.is_mouse_down(MouseButton::Right) {
            platform.set_mouse_mode(MouseMode::Grabbed);
        } else if platform.mouse_mode() == MouseMode::Grabbed {
            platform.set_mouse_mode(MouseMode::Normal);
        }
        if platform.mouse_mode() == MouseMode::Grabbed {
            stats.grabbed_frames += 1;
        }

        let held: Vec<KeyCode> = MOVEMENT_KEYS
            .into_iter()
            .filter(|key| platform.is_key_down(*key))
            .collect();
        if !held.is_empty() {
            stats.moving_frames += 1;
            let (x, y) = platform.mouse_position();
            log::debug!("Holding {held:?} with cursor at ({x:.1}, {y:.1})");
        }

        platform.swap_buffers();
    }

    log::info!(
        "Closed after {} frames in {:.2}s ({:.1} fps average)",
        timer.frame_count(),
        platform.time(),
        timer.average_fps()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_resolves_from_any_directory() {
        let flags = WindowFlags::load_from_file(DEFAULT_CONFIG_PATH).unwrap();
        assert!(flags.validate().is_ok());
    }

    #[test]
    fn test_scripted_session_holds_input_across_frames() {
        logging::init_for_tests();
        let mut platform = Platform::headless().unwrap();
        let simulator = platform.simulator();

        let stats = run_loop(&mut platform, &WindowFlags::default(), |frame| {
            script_frame(&simulator, frame);
        })
        .unwrap();

        assert_eq!(stats.frames, 11);
        // Right button held from frame 2 until its release at frame 6
        assert_eq!(stats.grabbed_frames, 4);
        // W held from frame 0 until its release at frame 8
        assert_eq!(stats.moving_frames, 8);
        assert_eq!(platform.mouse_mode(), MouseMode::Normal);
        assert_eq!(platform.window_size(), (800, 600));
    }
}
