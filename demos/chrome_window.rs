//! Opens a decorated window and attaches flexframe chrome to it.
//!
//! Keys: `L` toggles the aspect ratio lock, `B` cycles the frame buttons.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use flexframe::utils::config::Config;
use flexframe::window::{AspectRatio, Capability, CapabilitySet};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

#[cfg(windows)]
use flexframe::platform::Win32Platform;
#[cfg(windows)]
use flexframe::window::{WindowChrome, WinitShell};

/// flexframe demo - native chrome on a winit window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lock the window to an aspect ratio such as 16:9
    #[arg(short, long, value_name = "W:H")]
    ratio: Option<AspectRatio>,

    /// Enabled frame buttons: none, all or a list like min,close
    #[arg(short, long, value_name = "SET")]
    buttons: Option<CapabilitySet>,

    /// Size the window to this fraction of its monitor
    #[arg(long, value_name = "FRACTION")]
    relative_size: Option<f64>,

    /// Read settings from this file instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Button sets stepped through with `B`
fn button_cycle() -> [CapabilitySet; 4] {
    [
        CapabilitySet::All,
        CapabilitySet::subset([Capability::Minimize, Capability::Close]),
        CapabilitySet::subset([Capability::Close]),
        CapabilitySet::None,
    ]
}

struct ChromeDemo {
    config: Config,
    window: Option<Arc<Window>>,
    toggle_ratio: AspectRatio,
    button_step: usize,

    #[cfg(windows)]
    chrome: Option<WindowChrome<Win32Platform, WinitShell>>,
}

impl ChromeDemo {
    fn new(config: Config, toggle_ratio: AspectRatio) -> Self {
        Self {
            config,
            window: None,
            toggle_ratio,
            button_step: 0,
            #[cfg(windows)]
            chrome: None,
        }
    }

    #[cfg(windows)]
    fn attach(&mut self, window: &Arc<Window>) -> Result<()> {
        let platform = Win32Platform::from_window(window.as_ref())?;
        let chrome = WindowChrome::attach(platform, WinitShell::new(Arc::clone(window)), &self.config.chrome)?;
        info!(
            "Chrome attached: ratio {:?}, buttons {:?}",
            chrome.aspect_ratio(),
            chrome.enabled_buttons()
        );
        self.chrome = Some(chrome);
        Ok(())
    }

    #[cfg(not(windows))]
    fn attach(&mut self, _window: &Arc<Window>) -> Result<()> {
        warn!("Native window chrome is only available on Windows");
        Ok(())
    }

    #[cfg(windows)]
    fn toggle_lock(&mut self) -> Result<()> {
        if let Some(chrome) = self.chrome.as_mut() {
            let next = match chrome.aspect_ratio() {
                Some(_) => None,
                None => Some(self.toggle_ratio),
            };
            chrome.set_aspect_ratio(next)?;
            info!("Aspect ratio lock: {:?}", next);
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn toggle_lock(&mut self) -> Result<()> {
        debug!("Ignoring lock toggle for {}", self.toggle_ratio);
        Ok(())
    }

    #[cfg(windows)]
    fn cycle_buttons(&mut self) -> Result<()> {
        self.button_step = (self.button_step + 1) % button_cycle().len();
        let set = button_cycle()[self.button_step].clone();
        if let Some(chrome) = self.chrome.as_mut() {
            chrome.set_enabled_buttons(set.clone())?;
        }
        info!("Frame buttons: {:?}", set);
        Ok(())
    }

    #[cfg(not(windows))]
    fn cycle_buttons(&mut self) -> Result<()> {
        self.button_step = (self.button_step + 1) % button_cycle().len();
        debug!("Ignoring button step {}", self.button_step);
        Ok(())
    }

    fn detach(&mut self) {
        #[cfg(windows)]
        {
            self.chrome = None;
        }
        self.window = None;
    }
}

impl ApplicationHandler for ChromeDemo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title("flexframe");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.attach(&window) {
            warn!("Failed to attach chrome: {}", e);
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let outcome = match event {
            WindowEvent::CloseRequested => {
                self.detach();
                event_loop.exit();
                Ok(())
            }
            WindowEvent::Resized(size) => {
                debug!("Client area {}x{}", size.width, size.height);
                Ok(())
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Character("l") | Key::Character("L") => self.toggle_lock(),
                    Key::Character("b") | Key::Character("B") => self.cycle_buttons(),
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            error!("Chrome error: {}", e);
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(ratio) = args.ratio {
        config.chrome.aspect_ratio = Some(ratio.to_string());
    }
    if let Some(buttons) = args.buttons.clone() {
        config.chrome.enabled_buttons = buttons;
    }
    if args.relative_size.is_some() {
        config.chrome.relative_size = args.relative_size;
    }
    config.validate()?;

    // Initialize logging
    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting flexframe demo v{}", env!("CARGO_PKG_VERSION"));

    let toggle_ratio = match config.chrome.parsed_aspect_ratio()? {
        Some(ratio) if ratio.is_constraining() => ratio,
        _ => AspectRatio::new(16.0, 9.0)?,
    };

    let event_loop = EventLoop::new()?;
    let mut app = ChromeDemo::new(config, toggle_ratio);
    event_loop.run_app(&mut app)?;

    Ok(())
}
