// vidbind/src/platform/headless/device.rs
//
//! The stand-in device and its subsystem-level state.

use crate::backend::{NativeContext, NativeFailure, NativeResult, NativeWindow, SubsystemBackend};
use crate::display::DisplayMode;
use crate::info::Version;
use crate::Error;
use super::context::ContextData;
use super::surface::SurfaceData;
use super::window::{RendererData, WindowData};
use super::{HeadlessConfig, HeadlessMode};

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;

/// How many native handles of each kind have been released.
///
/// Buffers that windows own and release themselves are not counted as freed surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseStats {
    pub surfaces_freed: usize,
    pub windows_destroyed: usize,
    pub contexts_deleted: usize,
    pub renderers_destroyed: usize,
}

#[derive(Default)]
pub(crate) struct State {
    pub(crate) driver: Option<String>,
    pub(crate) screen_saver_enabled: bool,
    next_handle: usize,
    pub(crate) next_window_id: u32,
    pub(crate) surfaces: HashMap<usize, SurfaceData>,
    pub(crate) windows: HashMap<usize, WindowData>,
    pub(crate) renderers: HashMap<usize, RendererData>,
    pub(crate) contexts: HashMap<usize, ContextData>,
    pub(crate) current_context: Option<(NativeWindow, NativeContext)>,
    pub(crate) stats: ReleaseStats,
}

impl State {
    /// Handles are never reused, so stale ones are always detected.
    pub(crate) fn allocate_handle(&mut self) -> usize {
        self.next_handle += 1;
        self.next_handle
    }
}

/// The headless stand-in for the native video library.
pub struct Device {
    pub(crate) config: HeadlessConfig,
    pub(crate) state: RefCell<State>,
    last_error: RefCell<String>,
    phantom: PhantomData<*mut ()>,
}

impl Device {
    #[inline]
    pub fn new() -> Result<Device, Error> {
        Ok(Device::with_config(HeadlessConfig::default()))
    }

    pub fn with_config(config: HeadlessConfig) -> Device {
        Device {
            config,
            state: RefCell::new(State::default()),
            last_error: RefCell::new(String::new()),
            phantom: PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> ReleaseStats {
        self.state.borrow().stats
    }

    /// The number of live surfaces, not counting window framebuffers.
    pub fn live_surfaces(&self) -> usize {
        self.state.borrow().surfaces.values().filter(|surface| surface.window.is_none()).count()
    }

    #[inline]
    pub fn live_windows(&self) -> usize {
        self.state.borrow().windows.len()
    }

    #[inline]
    pub fn live_contexts(&self) -> usize {
        self.state.borrow().contexts.len()
    }

    #[inline]
    pub fn live_renderers(&self) -> usize {
        self.state.borrow().renderers.len()
    }

    /// Records `message` as the last error.
    pub(crate) fn set_error<S>(&self, message: S) where S: Into<String> {
        *self.last_error.borrow_mut() = message.into();
    }

    /// Records `message` and returns the failure marker.
    pub(crate) fn fail<T, S>(&self, message: S) -> NativeResult<T> where S: Into<String> {
        self.set_error(message);
        Err(NativeFailure)
    }

    /// The first describable mode of the first display.
    pub(crate) fn desktop_mode(&self) -> Option<HeadlessMode> {
        self.config.displays.first()?.modes.iter().flatten().next().copied()
    }

    fn check_display(&self, display_index: i32) -> Option<usize> {
        let count = self.config.displays.len();
        if display_index < 0 || display_index as usize >= count {
            self.set_error(format!("displayIndex must be in the range 0 - {}",
                                   count as i32 - 1));
            return None;
        }
        Some(display_index as usize)
    }
}

impl SubsystemBackend for Device {
    #[inline]
    fn name(&self) -> &'static str {
        "headless"
    }

    #[inline]
    fn version(&self) -> Version {
        self.config.version
    }

    fn last_error(&self) -> String {
        self.last_error.borrow().clone()
    }

    fn video_init(&self, driver: Option<&str>) -> NativeResult<()> {
        let name = match driver {
            None => match self.config.drivers.first() {
                Some(name) => name.clone(),
                None => return self.fail("No available video device"),
            },
            Some(requested) => {
                match self.config.drivers.iter().find(|name| name.eq_ignore_ascii_case(requested)) {
                    Some(name) => name.clone(),
                    None => return self.fail(format!("{} not available", requested)),
                }
            }
        };
        debug!("Initializing headless video driver {}", name);
        self.state.borrow_mut().driver = Some(name);
        Ok(())
    }

    fn video_quit(&self) {
        self.state.borrow_mut().driver = None;
    }

    fn is_screen_saver_enabled(&self) -> bool {
        self.state.borrow().screen_saver_enabled
    }

    fn set_screen_saver_enabled(&self, enabled: bool) {
        self.state.borrow_mut().screen_saver_enabled = enabled;
    }

    fn num_video_drivers(&self) -> i32 {
        self.config.drivers.len() as i32
    }

    fn video_driver(&self, index: i32) -> Option<String> {
        if index < 0 {
            return None;
        }
        self.config.drivers.get(index as usize).cloned()
    }

    fn current_video_driver(&self) -> Option<String> {
        self.state.borrow().driver.clone()
    }

    fn num_video_displays(&self) -> i32 {
        if self.state.borrow().driver.is_none() {
            self.set_error("Video subsystem has not been initialized");
            return -1;
        }
        self.config.displays.len() as i32
    }

    fn num_display_modes(&self, display_index: i32) -> i32 {
        match self.check_display(display_index) {
            Some(display) => self.config.displays[display].modes.len() as i32,
            None => -1,
        }
    }

    fn display_mode(&self, display_index: i32, mode_index: i32) -> NativeResult<DisplayMode> {
        let display = match self.check_display(display_index) {
            Some(display) => &self.config.displays[display],
            None => return Err(NativeFailure),
        };
        if mode_index < 0 || mode_index as usize >= display.modes.len() {
            return self.fail(format!("index must be in the range of 0 - {}",
                                     display.modes.len() as i32 - 1));
        }
        match display.modes[mode_index as usize] {
            Some(mode) => {
                Ok(DisplayMode::new(mode.format, mode.width, mode.height, mode.refresh_rate))
            }
            None => self.fail("Display mode could not be described"),
        }
    }
}
