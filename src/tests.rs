// vidbind/src/tests.rs
//
//! Unit tests.

use crate::backend::SurfaceBackend;
use crate::geom::{self, Point, Rgb, Size};
use crate::platform::headless::{Device, HeadlessConfig, HeadlessDisplay, HeadlessMode};
use crate::{BlendMode, ChannelMasks, Error, GLAttr, GLContext, GammaRamp, Ownership};
use crate::{PixelFormatEnum, Surface, Value, Version, Video, Window, WindowFlags, WindowPos};
use crate::{Capability, DisplayMode, Renderer};

use std::fs;
use std::rc::Rc;

fn open_with(config: HeadlessConfig) -> (Rc<Device>, Video) {
    let device = Rc::new(Device::with_config(config));
    let video = Video::with_backend(device.clone());
    video.init(&Value::Nil).unwrap();
    (device, video)
}

fn open() -> (Rc<Device>, Video) {
    open_with(HeadlessConfig::default())
}

fn rgb_surface(video: &Video, width: i32, height: i32) -> Surface {
    Surface::new(video, 0, width, height, 32, ChannelMasks::default()).unwrap()
}

fn window(video: &Video, flags: WindowFlags) -> Window {
    Window::new(video,
                "test",
                WindowPos::Centered.to_raw(),
                WindowPos::Centered.to_raw(),
                640,
                480,
                flags).unwrap()
}

fn pixels(device: &Device, surface: &Surface) -> Vec<u32> {
    device.surface_pixels(surface.native_surface().unwrap()).unwrap()
}

#[test]
fn test_init_with_default_driver() {
    let (_, video) = open();
    let current = video.current_video_driver().unwrap();
    assert!(!current.is_empty());
    let drivers = video.video_drivers().unwrap();
    assert!(!drivers.is_empty());
    assert!(drivers.contains(&current));
}

#[test]
fn test_init_driver_conversion() {
    let device = Rc::new(Device::new().unwrap());
    let video = Video::with_backend(device);

    video.init(&Value::Symbol("dummy".to_owned())).unwrap();
    assert_eq!(video.current_video_driver().as_deref(), Some("dummy"));

    match video.init(&Value::Int(5)) {
        Err(Error::NativeOperation(message)) => assert_eq!(message, "5 not available"),
        other => panic!("unexpected result: {:?}", other),
    }
    match video.init(&Value::Array(vec![])) {
        Err(Error::Type(message)) => {
            assert_eq!(message, "supplied argument cannot be converted to string.")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_init_with_empty_driver_name() {
    let device = Rc::new(Device::new().unwrap());
    let video = Video::with_backend(device);
    video.init(&Value::from("")).unwrap();
    assert_eq!(video.current_video_driver().as_deref(), Some("headless"));

    video.init(&Value::Symbol(String::new())).unwrap();
    assert_eq!(video.current_video_driver().as_deref(), Some("headless"));
}

#[test]
fn test_quit_and_displays() {
    let (_, video) = open();
    assert_eq!(video.displays().unwrap(), 1);
    video.quit();
    assert_eq!(video.current_video_driver(), None);
    assert!(matches!(video.displays(), Err(Error::NativeOperation(_))));
}

#[test]
fn test_screen_saver() {
    let (_, video) = open();
    video.set_screen_saver_enabled(true);
    assert!(video.screen_saver_enabled());
    video.set_screen_saver_enabled(false);
    assert!(!video.screen_saver_enabled());
}

#[test]
fn test_display_modes_skip_undescribable_entries() {
    let display = HeadlessDisplay {
        modes: vec![
            Some(HeadlessMode::new(PixelFormatEnum::RGB888, 1024, 768, 60)),
            None,
            Some(HeadlessMode::new(PixelFormatEnum::RGB565, 640, 480, 75)),
        ],
    };
    let (_, video) = open_with(HeadlessConfig::default().with_displays(vec![display]));
    let modes = video.display_modes(0).unwrap();
    assert_eq!(modes.len(), 2);
    assert_eq!(modes[0].size(), Size::new(1024, 768));
    assert_eq!(modes[0].format(), PixelFormatEnum::RGB888);
    assert_eq!(modes[1].refresh_rate(), 75);
    assert!(matches!(video.display_modes(3), Err(Error::NativeOperation(_))));
}

#[test]
fn test_gl_facade_not_implemented() {
    let (_, video) = open();
    let window = Window::empty(&video);
    assert!(matches!(video.gl_attribute(GLAttr::DoubleBuffer), Err(Error::NotImplemented)));
    assert!(matches!(video.set_gl_attribute(GLAttr::DepthSize, 24), Err(Error::NotImplemented)));
    assert!(matches!(video.gl_extension_supported("GL_ARB_sync"), Err(Error::NotImplemented)));
    assert!(matches!(video.gl_swap_interval(), Err(Error::NotImplemented)));
    assert!(matches!(video.set_gl_swap_interval(1), Err(Error::NotImplemented)));
    assert!(matches!(video.gl_swap_window(&window), Err(Error::NotImplemented)));
}

#[test]
fn test_surface_map_and_fill() {
    let (device, video) = open();
    let surface = rgb_surface(&video, 10, 10);

    let format = *surface.pixel_format().unwrap();
    assert_eq!(format.format, PixelFormatEnum::RGB888);
    assert_eq!(format.bytes_per_pixel, 4);
    assert_eq!(format.masks, ChannelMasks::new(0xff0000, 0x00ff00, 0x0000ff, 0));

    let red = surface.map_rgb(255, 0, 0).unwrap();
    assert_eq!(red, 0x00ff0000);
    assert_eq!(surface.map_rgb(255, 0, 0).unwrap(), red);

    surface.fill_rect(red, None).unwrap();
    assert!(pixels(&device, &surface).iter().all(|&pixel| pixel == red));
}

#[test]
fn test_map_rgb_with_alpha_and_packed_formats() {
    let (_, video) = open();
    let argb = ChannelMasks::new(0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000);
    let surface = Surface::new(&video, 0, 4, 4, 32, argb).unwrap();
    assert_eq!(surface.pixel_format().unwrap().format, PixelFormatEnum::ARGB8888);
    assert_eq!(surface.map_rgb(255, 0, 0).unwrap(), 0xffff0000);
    assert_eq!(surface.map_rgba(255, 0, 0, 0x80).unwrap(), 0x80ff0000);
    assert_eq!(surface.blend_mode().unwrap(), BlendMode::Blend);

    let surface = Surface::new(&video, 0, 4, 4, 16, ChannelMasks::default()).unwrap();
    assert_eq!(surface.pixel_format().unwrap().format, PixelFormatEnum::RGB565);
    assert_eq!(surface.map_rgb(255, 0, 0).unwrap(), 0xf800);
    assert_eq!(surface.map_rgb(255, 255, 255).unwrap(), 0xffff);
}

#[test]
fn test_pixel_format_is_memoized() {
    let (_, video) = open();
    let surface = rgb_surface(&video, 2, 2);
    let first = surface.pixel_format().unwrap();
    let second = surface.pixel_format().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_surface_allocation_failure() {
    let (_, video) = open();
    match Surface::new(&video, 0, 10, 10, 7, ChannelMasks::default()) {
        Err(Error::Allocation(message)) => assert_eq!(message, "Unknown pixel format"),
        other => panic!("unexpected result: {:?}", other),
    }

    let (_, video) = open_with(HeadlessConfig::default().with_allocation_limit(1024));
    assert!(matches!(Surface::new(&video, 0, 100, 100, 32, ChannelMasks::default()),
                     Err(Error::Allocation(_))));
}

#[test]
fn test_surface_free_is_idempotent() {
    let (device, video) = open();
    let mut surface = rgb_surface(&video, 4, 4);
    surface.free();
    surface.free();
    assert!(surface.is_null());
    assert_eq!(device.stats().surfaces_freed, 1);
    drop(surface);
    assert_eq!(device.stats().surfaces_freed, 1);

    drop(rgb_surface(&video, 4, 4));
    assert_eq!(device.stats().surfaces_freed, 2);
    assert_eq!(device.live_surfaces(), 0);
}

#[test]
fn test_freed_surface_reports_runtime_error() {
    let (_, video) = open();
    let mut surface = rgb_surface(&video, 4, 4);
    surface.free();
    assert!(matches!(surface.fill_rect(0, None), Err(Error::Runtime(_))));
    assert!(matches!(surface.map_rgb(1, 2, 3), Err(Error::Runtime(_))));
    assert!(matches!(surface.pixel_format(), Err(Error::Runtime(_))));
    // Unlocking never fails.
    surface.unlock();
    assert_eq!(format!("{:?}", surface), "Surface(null)");
}

#[test]
fn test_referenced_surface_is_never_freed() {
    let (device, video) = open();
    let owner = rgb_surface(&video, 4, 4);
    let native = owner.native_surface().unwrap();

    let mut alias = unsafe { Surface::from_native_surface(&video, native, Ownership::Referenced) };
    alias.free();
    assert!(!alias.is_null());
    drop(alias);
    assert_eq!(device.stats().surfaces_freed, 0);

    drop(owner);
    assert_eq!(device.stats().surfaces_freed, 1);
}

#[test]
fn test_wrapping_an_external_surface() {
    let (device, video) = open();
    let native = device.create_surface(0, 2, 2, 32, ChannelMasks::default()).unwrap();
    let surface = unsafe { Surface::from_native_surface(&video, native, Ownership::Owned) };
    assert_eq!(surface.ownership(), Ownership::Owned);
    drop(surface);
    assert_eq!(device.stats().surfaces_freed, 1);
}

#[test]
fn test_blit_requires_destination_rect() {
    let (device, video) = open();
    let src = rgb_surface(&video, 4, 4);
    let dst = rgb_surface(&video, 8, 8);
    let red = src.map_rgb(255, 0, 0).unwrap();
    src.fill_rect(red, None).unwrap();

    match src.blit(None, &dst, None) {
        Err(Error::Argument(message)) => assert_eq!(message, "cannot set 3rd argument nil."),
        other => panic!("unexpected result: {:?}", other),
    }

    let target = geom::rect(2, 2, 4, 4);
    src.blit(None, &dst, Some(&target)).unwrap();
    assert_eq!(target, geom::rect(2, 2, 4, 4));

    let pixels = pixels(&device, &dst);
    assert_eq!(pixels[3 * 8 + 3], red);
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels[6 * 8 + 6], 0);
}

#[test]
fn test_blit_scaled_fills_whole_destination() {
    let (device, video) = open();
    let src = rgb_surface(&video, 2, 2);
    let dst = rgb_surface(&video, 4, 4);
    let blue = src.map_rgb(0, 0, 255).unwrap();
    src.fill_rect(blue, None).unwrap();

    src.blit_scaled(None, &dst, None).unwrap();
    assert!(pixels(&device, &dst).iter().all(|&pixel| pixel == blue));
}

#[test]
fn test_blit_fails_while_locked() {
    let (_, video) = open();
    let src = rgb_surface(&video, 2, 2);
    let dst = rgb_surface(&video, 2, 2);
    let target = geom::rect(0, 0, 2, 2);

    src.lock().unwrap();
    match src.blit(None, &dst, Some(&target)) {
        Err(Error::NativeOperation(message)) => {
            assert_eq!(message, "Surfaces must not be locked during blit")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    src.unlock();
    src.blit(None, &dst, Some(&target)).unwrap();
}

#[test]
fn test_blit_copies_and_honours_color_key() {
    let (device, video) = open();
    let src = rgb_surface(&video, 2, 1);
    let dst = rgb_surface(&video, 2, 1);
    let (red, blue) = (src.map_rgb(255, 0, 0).unwrap(), src.map_rgb(0, 0, 255).unwrap());
    let green = dst.map_rgb(0, 255, 0).unwrap();
    src.fill_rect(blue, None).unwrap();
    src.fill_rect(red, Some(&geom::rect(0, 0, 1, 1))).unwrap();
    dst.fill_rect(green, None).unwrap();

    src.set_color_key(true, red).unwrap();
    // Modulation and blend state are kept but a blit is a plain copy.
    src.set_color_mod(Rgb::new(0, 0, 0)).unwrap();
    src.set_alpha_mod(0).unwrap();
    src.set_blend_mode(BlendMode::Add).unwrap();

    src.blit(None, &dst, Some(&geom::rect(0, 0, 2, 1))).unwrap();
    assert_eq!(pixels(&device, &dst), vec![green, blue]);
}

#[test]
fn test_blit_converts_between_formats() {
    let (device, video) = open();
    let src = rgb_surface(&video, 2, 2);
    let dst = Surface::new(&video, 0, 2, 2, 16, ChannelMasks::default()).unwrap();
    src.fill_rect(src.map_rgb(255, 0, 0).unwrap(), None).unwrap();

    src.blit(None, &dst, Some(&geom::rect(0, 0, 2, 2))).unwrap();
    assert!(pixels(&device, &dst).iter().all(|&pixel| pixel == 0xf800));
}

#[test]
fn test_extreme_rectangles_are_clipped() {
    let (device, video) = open();
    let surface = rgb_surface(&video, 4, 4);
    let white = surface.map_rgb(255, 255, 255).unwrap();
    let far = geom::rect(i32::MAX - 1, 0, 10, 10);
    let huge = geom::rect(i32::MIN, i32::MIN, i32::MAX, i32::MAX);

    surface.fill_rect(white, Some(&far)).unwrap();
    surface.fill_rect(white, Some(&huge)).unwrap();
    surface.fill_rects(white, &Value::from(vec![far, huge])).unwrap();
    assert!(pixels(&device, &surface).iter().all(|&pixel| pixel == 0));

    assert!(matches!(surface.set_clip_rect(Some(&far)), Err(Error::NativeOperation(_))));
    surface.set_clip_rect(None).unwrap();

    let src = rgb_surface(&video, 2, 2);
    src.fill_rect(white, None).unwrap();
    src.blit(None, &surface, Some(&geom::rect(i32::MAX - 1, 0, 1, 1))).unwrap();
    src.blit(Some(&geom::rect(i32::MIN, 0, 1, 1)), &surface, Some(&geom::rect(0, 0, 1, 1)))
       .unwrap();
    src.blit(None, &surface, Some(&geom::rect(i32::MIN, i32::MIN, 1, 1))).unwrap();
    assert!(pixels(&device, &surface).iter().all(|&pixel| pixel == 0));

    src.blit_scaled(None, &surface, Some(&geom::rect(i32::MIN + 10, 0, i32::MAX, 4))).unwrap();
    assert!(pixels(&device, &surface).iter().all(|&pixel| pixel == white));
}

#[test]
fn test_fill_rects() {
    let (device, video) = open();
    let surface = rgb_surface(&video, 4, 4);
    let white = surface.map_rgb(255, 255, 255).unwrap();

    assert!(matches!(surface.fill_rects(white, &Value::Int(1)), Err(Error::Type(_))));

    let rects = Value::Array(vec![
        Value::from(geom::rect(0, 0, 1, 1)),
        Value::Str("not a rectangle".to_owned()),
        Value::from(geom::rect(3, 3, 1, 1)),
    ]);
    surface.fill_rects(white, &rects).unwrap();
    let pixels = pixels(&device, &surface);
    assert_eq!(pixels[0], white);
    assert_eq!(pixels[15], white);
    assert_eq!(pixels.iter().filter(|&&pixel| pixel == white).count(), 2);
}

#[test]
fn test_clip_rect() {
    let (_, video) = open();
    let surface = rgb_surface(&video, 10, 10);
    assert_eq!(surface.clip_rect().unwrap(), geom::rect(0, 0, 10, 10));

    surface.set_clip_rect(Some(&geom::rect(2, 2, 3, 3))).unwrap();
    assert_eq!(surface.clip_rect().unwrap(), geom::rect(2, 2, 3, 3));

    assert!(matches!(surface.set_clip_rect(Some(&geom::rect(20, 20, 5, 5))),
                     Err(Error::NativeOperation(_))));

    surface.set_clip_rect(None).unwrap();
    assert_eq!(surface.clip_rect().unwrap(), geom::rect(0, 0, 10, 10));
}

#[test]
fn test_surface_render_state() {
    let (_, video) = open();
    let surface = rgb_surface(&video, 2, 2);

    assert!(matches!(surface.color_key(), Err(Error::NativeOperation(_))));
    surface.set_color_key(true, 5).unwrap();
    assert_eq!(surface.color_key().unwrap(), 5);

    assert_eq!(surface.alpha_mod().unwrap(), 255);
    surface.set_alpha_mod(128).unwrap();
    assert_eq!(surface.alpha_mod().unwrap(), 128);

    assert_eq!(surface.blend_mode().unwrap(), BlendMode::None);
    surface.set_blend_mode(BlendMode::Add).unwrap();
    assert_eq!(surface.blend_mode().unwrap(), BlendMode::Add);

    surface.set_color_mod(Rgb::new(10, 20, 30)).unwrap();
    assert_eq!(surface.color_mod().unwrap(), Rgb::new(10, 20, 30));

    surface.set_rle(true).unwrap();
}

#[test]
fn test_unimplemented_surface_operations() {
    let (_, video) = open();
    let surface = rgb_surface(&video, 2, 2);
    let format = *surface.pixel_format().unwrap();
    assert!(matches!(surface.convert_format(&format, 0), Err(Error::NotImplemented)));
    assert!(matches!(surface.set_palette(&Value::Nil), Err(Error::NotImplemented)));
}

#[test]
fn test_bmp_save_and_load() {
    let (device, video) = open();
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("red.bmp");

    let surface = rgb_surface(&video, 4, 3);
    let red = surface.map_rgb(255, 0, 0).unwrap();
    surface.fill_rect(red, None).unwrap();
    surface.save_bmp(&path).unwrap();

    let loaded = Surface::load_bmp(&video, &path).unwrap();
    assert_eq!(loaded.pixel_format().unwrap().format, PixelFormatEnum::RGB888);
    let pixels = pixels(&device, &loaded);
    assert_eq!(pixels.len(), 12);
    assert!(pixels.iter().all(|&pixel| pixel == red));
}

#[test]
fn test_bmp_load_errors() {
    let (_, video) = open();
    let directory = tempfile::tempdir().unwrap();

    let missing = directory.path().join("missing.bmp");
    assert!(matches!(Surface::load_bmp(&video, &missing), Err(Error::Io(_))));
    assert!(matches!(Surface::load_bmp(&video, directory.path()), Err(Error::Io(_))));

    let junk = directory.path().join("junk.bmp");
    fs::write(&junk, b"this is not a bitmap").unwrap();
    assert!(matches!(Surface::load_bmp(&video, &junk), Err(Error::Format(_))));
}

#[test]
fn test_empty_window() {
    let (_, video) = open();
    let window = Window::empty(&video);
    assert!(!window.is_created());
    assert_eq!(window.width(), None);
    assert_eq!(window.height(), None);
    assert_eq!(window.title(), None);
    assert_eq!(window.flags(), None);
    assert!(window.set_size(10, 10).is_none());
    assert!(window.set_title("nope").is_none());
    assert!(window.show().is_none());
    assert!(window.swap().is_none());
    assert!(matches!(window.display_index(), Ok(None)));
    assert!(matches!(window.surface(), Ok(None)));
    assert!(matches!(window.update_surface(), Ok(None)));
    match window.id() {
        Err(Error::Runtime(message)) => assert_eq!(message, "Couldn't find window"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_empty_window_mutators_do_nothing() {
    let (device, video) = open();
    let window = Window::empty(&video);
    let icon = rgb_surface(&video, 16, 16);
    let context = GLContext::new(&video, None).unwrap();

    assert_eq!(window.position(), None);
    assert!(window.set_position(Point::new(1, 2)).is_none());
    assert!(matches!(window.set_icon(&icon), Ok(None)));
    assert_eq!(window.brightness(), None);
    assert!(matches!(window.set_brightness(0.5), Ok(None)));
    assert!(matches!(window.display_mode(), Ok(None)));
    assert!(matches!(window.set_display_mode(None), Ok(None)));
    assert!(matches!(window.gamma_ramp(), Ok(None)));
    assert!(matches!(window.set_gamma_ramp(&GammaRamp::identity()), Ok(None)));
    assert_eq!(window.grab(), None);
    assert!(window.set_grab(true).is_none());
    assert_eq!(window.minimum_size(), None);
    assert!(window.set_minimum_size(10, 10).is_none());
    assert_eq!(window.maximum_size(), None);
    assert!(window.set_maximum_size(100, 100).is_none());
    let rects = Value::from(vec![geom::rect(0, 0, 1, 1)]);
    assert!(matches!(window.update_surface_rects(&rects), Ok(None)));
    assert!(matches!(window.make_current(Some(&context)), Ok(None)));
    assert!(matches!(window.make_current(None), Ok(None)));
    assert!(matches!(window.set_opacity(0.5), Ok(None)));
    assert!(matches!(window.renderer(), Ok(None)));
    assert!(window.maximize().is_none());
    assert!(window.minimize().is_none());
    assert!(window.hide().is_none());
    assert!(window.restore().is_none());
    assert!(window.raise().is_none());

    assert_eq!(device.current_context(), None);
    assert_eq!(device.live_windows(), 0);
}

#[test]
fn test_window_two_phase_creation() {
    let (device, video) = open();
    let mut window = Window::empty(&video);
    window.create("late", 0, 0, 320, 200, WindowFlags::empty()).unwrap();
    assert!(window.is_created());
    assert_eq!(window.size(), Some(Size::new(320, 200)));
    assert!(window.id().unwrap() > 0);

    assert!(matches!(window.create("again", 0, 0, 1, 1, WindowFlags::empty()),
                     Err(Error::AlreadyCreated)));
    assert!(matches!(window.create_with_renderer(1, 1, WindowFlags::empty()),
                     Err(Error::AlreadyCreated)));

    window.destroy();
    window.destroy();
    assert!(!window.is_created());
    drop(window);
    assert_eq!(device.stats().windows_destroyed, 1);
    assert_eq!(device.live_windows(), 0);
}

#[test]
fn test_window_requires_initialized_video() {
    let video = Video::with_backend(Rc::new(Device::new().unwrap()));
    match Window::new(&video, "x", 0, 0, 10, 10, WindowFlags::empty()) {
        Err(Error::NativeOperation(message)) => {
            assert_eq!(message, "Video subsystem has not been initialized")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_window_geometry() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::RESIZABLE);
    assert_eq!(window.position(), Some(Point::new(640, 300)));

    window.set_position(Point::new(10, 20)).unwrap();
    assert_eq!(window.position(), Some(Point::new(10, 20)));

    window.set_minimum_size(800, 600).unwrap();
    assert_eq!(window.minimum_size(), Some(Size::new(800, 600)));
    assert_eq!(window.size(), Some(Size::new(800, 600)));

    window.set_maximum_size(1000, 900).unwrap();
    assert_eq!(window.maximum_size(), Some(Size::new(1000, 900)));
    window.set_size(2000, 2000).unwrap();
    assert_eq!(window.width(), Some(1000));
    assert_eq!(window.height(), Some(900));
}

#[test]
fn test_window_title_and_state() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::empty());
    assert_eq!(window.title().as_deref(), Some("test"));
    window.set_title("renamed").unwrap();
    assert_eq!(window.title().as_deref(), Some("renamed"));

    assert!(window.flags().unwrap().contains(WindowFlags::SHOWN));
    window.hide().unwrap();
    let flags = window.flags().unwrap();
    assert!(flags.contains(WindowFlags::HIDDEN));
    assert!(!flags.contains(WindowFlags::SHOWN));

    window.maximize().unwrap();
    assert!(window.flags().unwrap().contains(WindowFlags::MAXIMIZED));
    window.restore().unwrap();
    assert!(!window.flags().unwrap().contains(WindowFlags::MAXIMIZED));
    window.raise().unwrap();
    window.minimize().unwrap();
    window.show().unwrap();
}

#[test]
fn test_window_grab_reports_actual_state() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::empty());
    assert_eq!(window.grab(), Some(false));
    window.set_grab(true).unwrap();
    assert_eq!(window.grab(), Some(true));
    assert!(window.flags().unwrap().contains(WindowFlags::INPUT_GRABBED));
}

#[test]
fn test_window_gamma_ramp() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::empty());
    assert_eq!(window.gamma_ramp().unwrap(), Some(GammaRamp::identity()));

    let mut ramp = GammaRamp::identity();
    ramp.red = [0; 256];
    window.set_gamma_ramp(&ramp).unwrap();
    assert_eq!(window.gamma_ramp().unwrap(), Some(ramp));
}

#[test]
fn test_window_brightness() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::empty());
    assert_eq!(window.brightness(), Some(1.0));
    window.set_brightness(0.5).unwrap();
    assert_eq!(window.brightness(), Some(0.5));
    assert!(matches!(window.set_brightness(-1.0), Err(Error::NativeOperation(_))));
}

#[test]
fn test_window_display_mode() {
    let (_, video) = open();
    let window = window(&video, WindowFlags::empty());
    assert_eq!(window.display_index().unwrap(), Some(0));

    let mode = window.display_mode().unwrap().unwrap();
    assert_eq!(mode.size(), Size::new(640, 480));
    assert_eq!(mode.format(), PixelFormatEnum::RGB888);
    assert_eq!(mode.refresh_rate(), 60);
    assert_eq!(mode, DisplayMode::new(PixelFormatEnum::RGB888, 640, 480, 60));

    let fullscreen = video.display_modes(0).unwrap()[1];
    window.set_display_mode(Some(&fullscreen)).unwrap();
    assert_eq!(window.display_mode().unwrap(), Some(fullscreen));
    window.set_display_mode(None).unwrap();
    assert_eq!(window.display_mode().unwrap(), Some(mode));
}

#[test]
fn test_window_without_displays() {
    let (_, video) = open_with(HeadlessConfig::default().with_displays(vec![]));
    let window = window(&video, WindowFlags::empty());
    assert!(matches!(window.display_index(), Err(Error::NativeOperation(_))));
    assert!(matches!(window.display_mode(), Err(Error::NativeOperation(_))));
}

#[test]
fn test_window_surface_is_referenced() {
    let (device, video) = open();
    let window = window(&video, WindowFlags::empty());
    let native = window.native_window().unwrap();

    assert!(matches!(window.update_surface(), Err(Error::NativeOperation(_))));

    let surface = window.surface().unwrap().unwrap();
    assert_eq!(surface.ownership(), Ownership::Referenced);
    let green = surface.map_rgb(0, 255, 0).unwrap();
    surface.fill_rect(green, None).unwrap();

    window.update_surface().unwrap();
    let rects = Value::from(vec![geom::rect(0, 0, 10, 10), geom::rect(5, 5, 10, 10)]);
    window.update_surface_rects(&rects).unwrap();
    assert_eq!(device.presented_frames(native), Some(2));
    assert!(matches!(window.update_surface_rects(&Value::Nil), Err(Error::Type(_))));

    drop(surface);
    assert_eq!(device.stats().surfaces_freed, 0);

    // Resizing invalidates the framebuffer, leaving older wrappers stale.
    let stale = window.surface().unwrap().unwrap();
    window.set_size(320, 240).unwrap();
    assert!(matches!(stale.fill_rect(green, None), Err(Error::NativeOperation(_))));
    drop(stale);
    assert_eq!(device.stats().surfaces_freed, 0);

    let fresh = window.surface().unwrap().unwrap();
    assert_eq!(fresh.clip_rect().unwrap(), geom::rect(0, 0, 320, 240));
}

#[test]
fn test_window_icon() {
    let (device, video) = open();
    let window = window(&video, WindowFlags::empty());
    let icon = rgb_surface(&video, 16, 16);
    window.set_icon(&icon).unwrap();
    assert_eq!(device.window_icon_size(window.native_window().unwrap()),
               Some(Size::new(16, 16)));
}

#[test]
fn test_window_opacity_capability_gate() {
    let (device, video) = open();
    assert!(video.supports(Capability::WindowOpacity));
    let window = window(&video, WindowFlags::empty());
    window.set_opacity(0.5).unwrap();
    assert_eq!(device.window_opacity(window.native_window().unwrap()), Some(0.5));

    let config = HeadlessConfig::default().with_version(Version::new(2, 0, 4));
    let (device, video) = open_with(config);
    assert!(!video.supports(Capability::WindowOpacity));
    let window = self::window(&video, WindowFlags::empty());
    assert!(window.set_opacity(0.5).unwrap().is_some());
    assert_eq!(device.window_opacity(window.native_window().unwrap()), Some(1.0));
}

#[test]
fn test_window_renderers() {
    let (device, video) = open();
    let mut window = Window::empty(&video);
    let owned = window.create_with_renderer(320, 240, WindowFlags::empty()).unwrap().unwrap();
    assert_eq!(owned.ownership(), Ownership::Owned);

    let referenced = window.renderer().unwrap().unwrap();
    assert_eq!(referenced.ownership(), Ownership::Referenced);
    assert_eq!(referenced.native_renderer(), owned.native_renderer());
    drop(referenced);
    assert_eq!(device.stats().renderers_destroyed, 0);

    drop(owned);
    assert_eq!(device.stats().renderers_destroyed, 1);
    assert!(matches!(window.renderer(), Err(Error::NativeOperation(_))));
}

#[test]
fn test_window_without_renderer() {
    let (_, video) = open_with(HeadlessConfig::default().with_renderer_available(false));
    let mut window = Window::empty(&video);
    let renderer: Option<Renderer> =
        window.create_with_renderer(320, 240, WindowFlags::empty()).unwrap();
    assert!(renderer.is_none());
    assert!(window.is_created());
}

#[test]
fn test_gl_context_lifecycle() {
    let (device, video) = open();
    let plain = window(&video, WindowFlags::empty());
    assert!(matches!(GLContext::new(&video, Some(&plain)), Err(Error::NativeOperation(_))));

    let window = window(&video, WindowFlags::OPENGL);
    let native_window = window.native_window().unwrap();
    let mut context = GLContext::new(&video, Some(&window)).unwrap();
    let native_context = context.native_context().unwrap();
    assert_eq!(device.context_window(native_context), Some(native_window));

    window.make_current(Some(&context)).unwrap();
    assert_eq!(device.current_context(), Some((native_window, native_context)));
    window.make_current(None).unwrap();
    assert_eq!(device.current_context(), None);

    context.delete();
    context.delete();
    assert!(context.is_null());
    assert_eq!(device.stats().contexts_deleted, 1);
    assert!(matches!(window.make_current(Some(&context)), Err(Error::Runtime(_))));
    drop(context);
    assert_eq!(device.stats().contexts_deleted, 1);
}

#[test]
fn test_gl_context_recreate_releases_previous() {
    let (device, video) = open();
    let window = window(&video, WindowFlags::OPENGL);
    let mut context = GLContext::empty(&video);
    assert!(context.is_null());
    context.create(Some(&window)).unwrap();
    context.create(Some(&window)).unwrap();
    assert_eq!(device.stats().contexts_deleted, 1);
    assert_eq!(device.live_contexts(), 1);

    let windowless = GLContext::new(&video, None).unwrap();
    assert_eq!(device.context_window(windowless.native_context().unwrap()), None);
}

#[test]
fn test_gl_swap() {
    let (device, video) = open();
    let window = window(&video, WindowFlags::OPENGL);
    window.swap().unwrap();
    window.swap().unwrap();
    assert_eq!(device.swap_count(window.native_window().unwrap()), Some(2));
}

#[test]
fn test_value_conversions() {
    let rect = geom::rect(1, 2, 3, 4);
    assert_eq!(Value::from(rect).to_rect(), Some(rect));
    assert_eq!(Value::Int(3).to_rect(), None);
    assert_eq!(Value::from(Some(Point::new(1, 1))).to_point(), Some(Point::new(1, 1)));
    assert_eq!(Value::from(None::<Point>), Value::Nil);
    assert_eq!(Value::from(Rgb::new(1, 2, 3)).to_rgb(), Some(Rgb::new(1, 2, 3)));

    assert_eq!(Value::Symbol("x11".to_owned()).to_host_string().as_deref(), Some("x11"));
    assert_eq!(Value::Float(1.5).to_host_string().as_deref(), Some("1.5"));
    assert_eq!(Value::Object("Window").to_host_string(), None);
    assert_eq!(Value::from(rect).to_string(), "#<Rect>");
}

#[test]
fn test_window_pos_and_versions() {
    assert_eq!(WindowPos::Centered.to_raw(), 0x2fff0000);
    assert_eq!(WindowPos::Undefined.to_raw(), 0x1fff0000);
    assert_eq!(WindowPos::from_raw(0x2fff0001), WindowPos::Centered);
    assert_eq!(WindowPos::from(42), WindowPos::At(42));

    assert!(Version::new(2, 0, 5).at_least(2, 0, 5));
    assert!(!Capability::WindowOpacity.is_supported_by(Version::new(2, 0, 4)));
    assert_eq!(Version::new(2, 0, 22).to_string(), "2.0.22");

    assert_eq!(BlendMode::from_raw(BlendMode::Mod.to_raw()), Some(BlendMode::Mod));
    assert_eq!(PixelFormatEnum::RGB888.name(), Some("RGB888"));
    assert_eq!(format!("{:?}", PixelFormatEnum(0xdead)), "PixelFormatEnum(0x0000dead)");
}

#[cfg(sdl2_backend)]
mod sdl2 {
    use crate::platform::sdl2::Device;
    use crate::{ChannelMasks, Error, Surface, Value, Video};

    use serial_test::serial;
    use std::rc::Rc;

    #[test]
    #[serial]
    fn test_sdl2_dummy_driver() {
        let video = Video::with_backend(Rc::new(Device::new().unwrap()));
        video.init(&Value::from("dummy")).unwrap();
        assert_eq!(video.current_video_driver().as_deref(), Some("dummy"));

        let surface = Surface::new(&video, 0, 10, 10, 32, ChannelMasks::default()).unwrap();
        let red = surface.map_rgb(255, 0, 0).unwrap();
        assert_eq!(red, 0x00ff0000);
        surface.fill_rect(red, None).unwrap();
        drop(surface);
        video.quit();
    }

    #[test]
    #[serial]
    fn test_sdl2_single_device() {
        let first = Device::new().unwrap();
        assert!(matches!(Device::new(), Err(Error::Runtime(_))));
        drop(first);
        drop(Device::new().unwrap());
    }
}
