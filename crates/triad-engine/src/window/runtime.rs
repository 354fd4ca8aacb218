use std::time::Duration;

use anyhow::Context;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::device::{ContextWindow, Gl, GlInit};
use crate::render::{center_pixel, Color, SceneDesc, TriangleScene};
use crate::time::FrameClock;

use super::error::{FailureStage, RunError};
use super::state::LoopControl;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub clear_color: Color,

    /// Stop after this many presented frames. The last frame's center pixel
    /// is read back into [`RunSummary::center_pixel`].
    pub frame_limit: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Main Window".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
            clear_color: Color::RED,
            frame_limit: None,
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: Duration,
    pub center_pixel: Option<[u8; 4]>,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds `scene`, and renders until the window closes.
    ///
    /// Every GPU object and the context are released before this returns,
    /// on success and on failure.
    pub fn run(
        config: RuntimeConfig,
        gl_init: GlInit,
        scene: SceneDesc,
    ) -> Result<RunSummary, RunError> {
        let event_loop = EventLoop::new()
            .context("failed to create winit EventLoop")
            .map_err(|e| RunError::new(FailureStage::Windowing, e))?;

        let mut state = AppState::new(config, gl_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")
            .map_err(|e| RunError::new(FailureStage::EventLoop, e))?;

        state.finish()
    }
}

#[self_referencing]
struct Session {
    clock: FrameClock,

    target: ContextWindow,

    #[borrows(target)]
    #[covariant]
    scene: TriangleScene<'this, Gl>,
}

struct AppState {
    config: RuntimeConfig,
    gl_init: GlInit,
    scene: SceneDesc,

    session: Option<Session>,
    control: LoopControl,
    summary: RunSummary,
    failure: Option<RunError>,
}

impl AppState {
    fn new(config: RuntimeConfig, gl_init: GlInit, scene: SceneDesc) -> Self {
        let control = LoopControl::new(config.frame_limit);
        Self {
            config,
            gl_init,
            scene,
            session: None,
            control,
            summary: RunSummary::default(),
            failure: None,
        }
    }

    fn open_session(&self, event_loop: &ActiveEventLoop) -> Result<Session, RunError> {
        let target = ContextWindow::new(event_loop, &self.config, &self.gl_init)?;
        let policy = self.gl_init.shader_policy;

        SessionTryBuilder {
            clock: FrameClock::new(),
            target,
            scene_builder: |target: &ContextWindow| {
                TriangleScene::new(target.gl(), &self.scene, policy)
            },
        }
        .try_build()
        .map_err(|e| RunError::new(FailureStage::Scene, e))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.control.is_running() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let clear = self.config.clear_color;
        let control = &self.control;

        let outcome = session.with_mut(|fields| {
            let ft = fields.clock.tick();
            fields.scene.draw(clear);

            let probe = if control.is_last_frame(ft.frame_index) {
                center_pixel(fields.target.gl(), fields.target.framebuffer_size())
            } else {
                None
            };

            fields.target.swap_buffers().map(|()| (ft.frame_index + 1, probe))
        });

        match outcome {
            Ok((presented, probe)) => {
                if probe.is_some() {
                    self.summary.center_pixel = probe;
                }
                self.control.frame_presented(presented);
                if !self.control.is_running() {
                    log::info!("frame limit reached after {presented} frames");
                    self.shutdown(event_loop);
                }
            }
            Err(e) => self.fail(event_loop, RunError::new(FailureStage::Present, e)),
        }
    }

    /// Releases the scene, then the context and window.
    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            self.summary.frames = session.borrow_clock().frames();
            self.summary.elapsed = session.borrow_clock().elapsed();
            drop(session);
            log::info!(
                "teardown complete: {} frames in {:.2?}",
                self.summary.frames,
                self.summary.elapsed
            );
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.control.close_requested();
        self.teardown();
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        // Keep the first failure; later ones are usually fallout.
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.shutdown(event_loop);
    }

    fn finish(mut self) -> Result<RunSummary, RunError> {
        self.teardown();
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(self.summary),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        if !self.control.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        match self.open_session(event_loop) {
            Ok(session) => {
                session.borrow_target().window().request_redraw();
                self.session = Some(session);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.control.is_running() {
            event_loop.exit();
            return;
        }

        // Continuous redraw: one frame per loop iteration.
        if let Some(session) = &self.session {
            session.borrow_target().window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                if let Some(session) = &self.session {
                    session.borrow_target().resize(size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
