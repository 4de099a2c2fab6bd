use clap::Parser;
use instant::Instant;
use scene_core::{PointerState, SceneAnimator, SceneError, Viewport};
use scene_render::{GpuContext, GpuState};
use std::sync::Arc;
use winit::{dpi::LogicalSize, event::*, event_loop::EventLoop, window::WindowBuilder};

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = cli::Cli::parse();
    let config = cli.scene_config()?;
    let (w, h) = cli.window_size();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("vault-scene ({})", cli.preset.name()))
            .with_inner_size(LogicalSize::new(w, h))
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let viewport = Viewport::new(size.width, size.height);

    let instance = wgpu::Instance::default();
    let ctx = instance
        .create_surface(Arc::clone(&window))
        .map_err(|e| SceneError::SurfaceUnavailable(e.to_string()))
        .and_then(|surface| pollster::block_on(GpuContext::new(&instance, surface, viewport)));

    let mut animator = SceneAnimator::new();
    animator.initialize(&config, viewport, move |setup| Ok(GpuState::new(ctx?, setup)))?;
    let start = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => animator.on_resize(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let size = window.inner_size();
            let p = PointerState::from_pixels(
                position.x as f32,
                position.y as f32,
                size.width as f32,
                size.height as f32,
            );
            animator.on_pointer_move(p.x, p.y);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            let stats = animator.stats();
            log::info!(
                "[native] {} draws, {} dropped",
                stats.draw_calls,
                stats.failed_draws
            );
            animator.dispose();
            elwt.exit();
        }
        Event::AboutToWait => {
            if animator.is_running() {
                animator.tick(start.elapsed());
                window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
