use std::num::NonZeroU32;

use anyhow::{Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::api::GlApi;
use super::init::{ContextProfile, GlInit};
use super::native::Gl;
use crate::window::{FailureStage, RunError, RuntimeConfig};

/// A window with a current OpenGL context bound to it.
///
/// Field order is drop order: the function table goes first, then the context,
/// then the surface it renders into, then the OS window.
pub struct ContextWindow {
    gl: Gl,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl ContextWindow {
    /// Creates the window, a context matching `init`, makes it current and
    /// loads GL entry points.
    ///
    /// Errors carry the stage that failed so the caller can pick an exit code.
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &RuntimeConfig,
        init: &GlInit,
    ) -> std::result::Result<Self, RunError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_resizable(true);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")
            .map_err(|e| RunError::new(FailureStage::Window, e))?;

        let (context, surface) =
            create_context(&window, init).map_err(|e| RunError::new(FailureStage::Context, e))?;

        // SAFETY: `context` was just made current on this thread and is owned
        // by the returned value alongside `gl`.
        let gl = unsafe {
            let display = context.display();
            Gl::load(|symbol| display.get_proc_address(symbol))
        };

        let (major, minor) = gl.version();
        if !init.accepts(major, minor) {
            return Err(RunError::new(
                FailureStage::Loader,
                anyhow::anyhow!(
                    "context reports OpenGL {major}.{minor}, need {}.{}",
                    init.version.0,
                    init.version.1
                ),
            ));
        }

        let (version, renderer) = gl.describe();
        log::info!("OpenGL {version} on {renderer}");

        let this = Self {
            gl,
            context,
            surface,
            window,
        };

        apply_viewport(&this.gl, this.framebuffer_size());

        Ok(this)
    }

    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn framebuffer_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Resizes the GL surface and viewport.
    ///
    /// A zero-sized framebuffer (minimized window) is ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        apply_viewport(&self.gl, size);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Viewport covering a framebuffer of `size`, or `None` while it has no area.
pub(crate) fn viewport_for(size: PhysicalSize<u32>) -> Option<(i32, i32)> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let w = i32::try_from(size.width).unwrap_or(i32::MAX);
    let h = i32::try_from(size.height).unwrap_or(i32::MAX);
    Some((w, h))
}

/// Points the viewport at the whole framebuffer. Returns `false` when the
/// framebuffer is empty and nothing was set.
pub(crate) fn apply_viewport<G: GlApi>(gl: &G, size: PhysicalSize<u32>) -> bool {
    match viewport_for(size) {
        Some((w, h)) => {
            gl.viewport(0, 0, w, h);
            true
        }
        None => false,
    }
}

impl Drop for ContextWindow {
    fn drop(&mut self) {
        log::debug!("releasing GL context and window");
    }
}

fn create_context(
    window: &Window,
    init: &GlInit,
) -> Result<(PossiblyCurrentContext, Surface<WindowSurface>)> {
    let raw_window = window
        .window_handle()
        .context("window has no native handle")?
        .as_raw();
    let raw_display = window
        .display_handle()
        .context("window has no native display handle")?
        .as_raw();

    let display = unsafe { Display::new(raw_display, display_preference(raw_window)) }
        .context("failed to open GL display")?;

    let template = ConfigTemplateBuilder::new()
        .compatible_with_native_window(raw_window)
        .build();

    let config = unsafe { display.find_configs(template) }
        .context("failed to query GL configs")?
        .max_by_key(|c| c.num_samples())
        .context("no GL config is compatible with the window")?;

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window,
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    );
    let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
        .context("failed to create GL window surface")?;

    let profile = match init.profile {
        ContextProfile::Core => GlProfile::Core,
        ContextProfile::Compatibility => GlProfile::Compatibility,
    };
    // glutin has no forward-compatible flag; CGL only hands out forward-
    // compatible core contexts, and a core profile drops the deprecated API
    // on the other backends.
    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(
            init.version.0,
            init.version.1,
        ))))
        .with_profile(profile)
        .build(Some(raw_window));

    let context = unsafe { display.create_context(&config, &context_attrs) }
        .with_context(|| {
            format!(
                "failed to create OpenGL {}.{} {:?} context",
                init.version.0, init.version.1, init.profile
            )
        })?
        .make_current(&surface)
        .context("failed to make GL context current")?;

    let interval = if init.vsync {
        SwapInterval::Wait(NonZeroU32::MIN)
    } else {
        SwapInterval::DontWait
    };
    if let Err(e) = surface.set_swap_interval(&context, interval) {
        log::warn!("failed to set swap interval: {e}");
    }

    Ok((context, surface))
}

#[cfg(target_os = "windows")]
fn display_preference(raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(Some(raw_window))
}

#[cfg(target_os = "macos")]
fn display_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_preference(_raw_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::EglThenGlx(Box::new(winit::platform::x11::register_xlib_error_hook))
}
