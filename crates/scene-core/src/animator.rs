//! Scene animator: owns one view's objects and drives them once per frame.
//!
//! The animator never schedules itself. Callers invoke `tick` once per
//! display refresh until `dispose`, with pointer and resize notifications in
//! between; those are plain field writes observed on the next tick.

use crate::camera::Camera;
use crate::clock::FrameClock;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::object::SceneObject;
use crate::pointer::PointerState;
use crate::scene::SceneGraph;
use crate::surface::{DrawItem, Frame, RenderSurface, SurfaceSetup, Viewport};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Uninitialized,
    Running,
    /// Initialization failed; every later call is a no-op.
    Inert,
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// Not running; nothing was updated or drawn.
    Idle,
    Drawn,
    /// State advanced but the draw failed. The next tick tries again.
    DrawFailed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u64,
    pub failed_draws: u64,
}

struct Running<S> {
    surface: S,
    objects: Vec<SceneObject>,
    camera: Camera,
    viewport: Viewport,
    clear_color: [f32; 4],
    items: SmallVec<[DrawItem; 16]>,
}

enum Stage<S> {
    Uninitialized,
    Running(Box<Running<S>>),
    Inert,
    Disposed,
}

pub struct SceneAnimator<S: RenderSurface> {
    stage: Stage<S>,
    pointer: PointerState,
    clock: FrameClock,
    stats: FrameStats,
}

impl<S: RenderSurface> Default for SceneAnimator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> SceneAnimator<S> {
    pub fn new() -> Self {
        Self {
            stage: Stage::Uninitialized,
            pointer: PointerState::default(),
            clock: FrameClock::new(),
            stats: FrameStats::default(),
        }
    }

    /// Build the scene from `config` and acquire a surface from
    /// `make_surface`. On failure the error is logged once, returned, and the
    /// animator stays inert.
    pub fn initialize<F>(
        &mut self,
        config: &SceneConfig,
        viewport: Viewport,
        make_surface: F,
    ) -> Result<(), SceneError>
    where
        F: FnOnce(&SurfaceSetup<'_>) -> Result<S, SceneError>,
    {
        if !matches!(self.stage, Stage::Uninitialized) {
            return Err(SceneError::AlreadyInitialized);
        }
        match self.build(config, viewport, make_surface) {
            Ok(running) => {
                log::info!(
                    "[scene] running: objects={} size={}x{}",
                    running.objects.len(),
                    running.viewport.width,
                    running.viewport.height
                );
                self.stage = Stage::Running(Box::new(running));
                Ok(())
            }
            Err(e) => {
                log::error!("[scene] initialization failed, staying inert: {e}");
                self.stage = Stage::Inert;
                Err(e)
            }
        }
    }

    fn build<F>(
        &self,
        config: &SceneConfig,
        viewport: Viewport,
        make_surface: F,
    ) -> Result<Running<S>, SceneError>
    where
        F: FnOnce(&SurfaceSetup<'_>) -> Result<S, SceneError>,
    {
        config.validate()?;
        let viewport = Viewport::new(viewport.width.max(1), viewport.height.max(1));
        let graph = SceneGraph::build(config);
        let surface = make_surface(&SurfaceSetup {
            viewport,
            meshes: &graph.meshes,
            clear_color: config.clear_color,
            object_count: graph.objects.len(),
        })?;
        let camera = Camera::from_config(&config.camera, viewport.aspect());
        Ok(Running {
            surface,
            items: SmallVec::with_capacity(graph.objects.len()),
            objects: graph.objects,
            camera,
            viewport,
            clear_color: config.clear_color,
        })
    }

    /// Record a normalized pointer position. Values are clamped to [-1, 1];
    /// non-finite input is dropped.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if let Some(p) = PointerState::normalized(x, y) {
            self.pointer = p;
        }
    }

    /// Advance every object to `elapsed` (time since the animation started)
    /// and issue one draw.
    pub fn tick(&mut self, elapsed: Duration) -> TickStatus {
        let Stage::Running(run) = &mut self.stage else {
            return TickStatus::Idle;
        };
        let run = &mut **run;
        let now = self.clock.advance_to(elapsed);
        let pointer = self.pointer;

        run.camera.follow_pointer(pointer);
        run.items.clear();
        for obj in &mut run.objects {
            obj.update(now, pointer);
            run.items.push(DrawItem {
                mesh: obj.mesh,
                model: obj.transform.matrix(),
                color: obj.color,
                blend: obj.blend,
            });
        }

        let frame = Frame {
            view: run.camera.view_matrix(),
            projection: run.camera.projection_matrix(),
            clear_color: run.clear_color,
            items: &run.items,
        };
        self.stats.draw_calls += 1;
        match run.surface.draw(&frame) {
            Ok(()) => TickStatus::Drawn,
            Err(e) => {
                self.stats.failed_draws += 1;
                log::warn!("[scene] frame {} dropped: {e}", self.clock.ticks());
                TickStatus::DrawFailed
            }
        }
    }

    /// Resize the output surface and camera. Repeating the current size, or
    /// passing an empty size, does nothing.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Stage::Running(run) = &mut self.stage else {
            return;
        };
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() || viewport == run.viewport {
            return;
        }
        run.viewport = viewport;
        run.camera.set_aspect(width, height);
        run.surface.resize(viewport);
    }

    /// Release the surface and stop for good. Safe from any state.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.stage, Stage::Disposed) {
            Stage::Running(mut run) => {
                run.surface.release();
                log::info!("[scene] disposed after {} draws", self.stats.draw_calls);
            }
            Stage::Uninitialized | Stage::Inert | Stage::Disposed => {}
        }
    }

    pub fn state(&self) -> AnimatorState {
        match self.stage {
            Stage::Uninitialized => AnimatorState::Uninitialized,
            Stage::Running(_) => AnimatorState::Running,
            Stage::Inert => AnimatorState::Inert,
            Stage::Disposed => AnimatorState::Disposed,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.stage, Stage::Running(_))
    }

    pub fn objects(&self) -> &[SceneObject] {
        match &self.stage {
            Stage::Running(run) => &run.objects,
            _ => &[],
        }
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects().iter().find(|o| o.name == name)
    }

    pub fn camera(&self) -> Option<&Camera> {
        match &self.stage {
            Stage::Running(run) => Some(&run.camera),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match &self.stage {
            Stage::Running(run) => Some(run.viewport),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.stage {
            Stage::Running(run) => Some(&run.surface),
            _ => None,
        }
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

impl<S: RenderSurface> Drop for SceneAnimator<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
